//! Environmental selection: rank-and-crowding survival.

use super::pareto::{crowding_distance, non_dominated_sort};
use super::selection::SurvivalInfo;
use crate::error::{OperatorError, Result};
use crate::genotype::Genotype;
use crate::population::Population;
use std::cmp::Ordering;

/// Keeps at most `n_survive` rows of an evaluated population.
///
/// Feasible rows are taken front by front; the front that does not fit is
/// cut by descending crowding distance. Infeasible rows fill any remaining
/// places by ascending constraint violation. Returns the survivors and
/// their [`SurvivalInfo`], index-aligned.
pub fn rank_and_crowding<G: Genotype>(
    population: &Population<G>,
    n_survive: usize,
) -> Result<(Population<G>, Vec<SurvivalInfo>)> {
    let mut objectives: Vec<&[f64]> = Vec::with_capacity(population.len());
    let mut violations = Vec::with_capacity(population.len());
    for (i, ind) in population.iter().enumerate() {
        let eval = ind
            .evaluation()
            .ok_or_else(|| OperatorError::Evaluation(format!("row {i} has not been evaluated")))?;
        objectives.push(eval.objectives.as_slice());
        violations.push(eval.constraint_violation());
    }

    let (feasible, mut infeasible): (Vec<usize>, Vec<usize>) =
        (0..population.len()).partition(|&i| violations[i] <= 0.0);

    let mut chosen: Vec<usize> = Vec::with_capacity(n_survive);
    let mut infos: Vec<SurvivalInfo> = Vec::with_capacity(n_survive);

    let feasible_objs: Vec<&[f64]> = feasible.iter().map(|&i| objectives[i]).collect();
    let sorted = non_dominated_sort(&feasible_objs);
    let n_fronts = sorted.fronts.len();

    for (rank, front) in sorted.fronts.iter().enumerate() {
        if chosen.len() >= n_survive {
            break;
        }
        let front_objs: Vec<&[f64]> = front.iter().map(|&k| feasible_objs[k]).collect();
        let crowding = crowding_distance(&front_objs);

        let mut order: Vec<usize> = (0..front.len()).collect();
        let remaining = n_survive - chosen.len();
        if front.len() > remaining {
            order.sort_by(|&a, &b| {
                crowding[b]
                    .partial_cmp(&crowding[a])
                    .unwrap_or(Ordering::Equal)
            });
            order.truncate(remaining);
        }

        for w in order {
            chosen.push(feasible[front[w]]);
            infos.push(SurvivalInfo {
                rank,
                crowding: crowding[w],
                violation: 0.0,
            });
        }
    }

    if chosen.len() < n_survive {
        infeasible.sort_by(|&a, &b| {
            violations[a]
                .partial_cmp(&violations[b])
                .unwrap_or(Ordering::Equal)
        });
        for i in infeasible.into_iter().take(n_survive - chosen.len()) {
            chosen.push(i);
            infos.push(SurvivalInfo {
                rank: n_fronts,
                crowding: 0.0,
                violation: violations[i],
            });
        }
    }

    Ok((population.select(&chosen), infos))
}
