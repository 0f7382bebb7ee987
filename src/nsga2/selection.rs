//! Parent selection for the reference driver.
//!
//! Binary tournament with the NSGA-II comparison: lower constraint
//! violation wins; among equally feasible rows the lower Pareto rank wins;
//! ties go to the larger crowding distance, and remaining ties are broken
//! at random.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective GA: NSGA-II"
//! - Deb (2000), "An efficient constraint handling method for genetic algorithms"

use rand::Rng;
use std::cmp::Ordering;

/// Survival metadata carried by each member of the current population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurvivalInfo {
    /// Pareto front index among feasible rows; infeasible rows rank after
    /// every feasible front.
    pub rank: usize,

    /// Crowding distance within the row's front (higher = more isolated).
    pub crowding: f64,

    /// Total constraint violation (0 when feasible).
    pub violation: f64,
}

impl SurvivalInfo {
    /// Compares two rows; `Less` means `self` is preferred.
    pub fn compare(&self, other: &SurvivalInfo) -> Ordering {
        let feasible = (self.violation <= 0.0, other.violation <= 0.0);
        match feasible {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {
                return self
                    .violation
                    .partial_cmp(&other.violation)
                    .unwrap_or(Ordering::Equal)
            }
            (true, true) => {}
        }
        self.rank.cmp(&other.rank).then_with(|| {
            other
                .crowding
                .partial_cmp(&self.crowding)
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// Picks one index from `infos` by binary tournament.
///
/// # Panics
/// Panics if `infos` is empty.
pub fn binary_tournament<R: Rng>(infos: &[SurvivalInfo], rng: &mut R) -> usize {
    assert!(!infos.is_empty(), "cannot select from empty population");

    let n = infos.len();
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    match infos[i].compare(&infos[j]) {
        Ordering::Less => i,
        Ordering::Greater => j,
        Ordering::Equal => {
            if rng.random_bool(0.5) {
                i
            } else {
                j
            }
        }
    }
}
