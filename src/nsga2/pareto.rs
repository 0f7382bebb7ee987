//! Pareto ranking utilities.
//!
//! - [`non_dominated_sort`]: fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: crowding distance for diversity preservation
//! - [`dominates`]: pairwise Pareto dominance
//!
//! All objectives are minimized.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197

/// Result of non-dominated sorting.
///
/// `ranks[i]` is the front index of solution `i`; rank 0 is the Pareto front.
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` holds the rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Returns `true` if `a` is no worse than `b` everywhere and strictly better
/// somewhere.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Fast non-dominated sorting.
///
/// # Complexity
///
/// O(m · n²) for m objectives and n solutions.
///
/// # Example
///
/// ```
/// use u_moea::nsga2::pareto::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
///     vec![4.0, 4.0], // dominated by (3, 3)
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(result.fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn non_dominated_sort<O: AsRef<[f64]>>(objectives: &[O]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(objectives[i].as_ref(), objectives[j].as_ref()) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next.push(j);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    NondominatedSortResult { ranks, fronts }
}

#[derive(Debug, PartialEq)]
enum Dominance {
    Left,
    Right,
    Neither,
}

fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better = false;
    let mut b_better = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better = true;
        } else if vb < va {
            b_better = true;
        }
    }

    match (a_better, b_better) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Crowding distance of each solution within one front.
///
/// Boundary solutions of any objective receive `f64::INFINITY`; interior
/// solutions accumulate the normalized gap between their neighbors.
///
/// # Complexity
///
/// O(m · n log n)
///
/// ```
/// use u_moea::nsga2::pareto::crowding_distance;
///
/// let d = crowding_distance(&[vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]]);
/// assert!(d[0].is_infinite() && d[2].is_infinite());
/// assert!(d[1].is_finite());
/// ```
pub fn crowding_distance<O: AsRef<[f64]>>(objectives: &[O]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].as_ref().len();
    let value = |i: usize, k: usize| objectives[i].as_ref()[k];
    let mut distances = vec![0.0f64; n];

    for k in 0..m {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            value(a, k)
                .partial_cmp(&value(b, k))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        distances[order[0]] = f64::INFINITY;
        distances[order[n - 1]] = f64::INFINITY;

        let range = value(order[n - 1], k) - value(order[0], k);
        if range > 0.0 {
            for w in 1..(n - 1) {
                let gap = value(order[w + 1], k) - value(order[w - 1], k);
                distances[order[w]] += gap / range;
            }
        }
    }

    distances
}
