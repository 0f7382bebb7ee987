//! Explicit random context.
//!
//! No operator in this crate touches a process-global generator. The driver
//! owns one seeded stream and threads it through every call; work that can
//! run row-by-row draws its own child stream from [`fork_rngs`] so results do
//! not depend on iteration order or on whether rows run in parallel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed.
///
/// `None` draws a fresh seed from the thread-local entropy source.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}

/// Derives `n` independent child generators from `rng`.
///
/// Consumes exactly `n` words from the parent stream, so the parent's
/// position afterwards depends only on `n`.
pub fn fork_rngs<R: Rng>(rng: &mut R, n: usize) -> Vec<StdRng> {
    (0..n).map(|_| create_rng(rng.random())).collect()
}

/// Runs `f` once per unit of work `0..n`, each with its own forked generator,
/// and collects the results in unit order.
///
/// With the `parallel` feature the units run on the rayon pool; the output
/// is identical either way because every unit owns its stream.
pub fn map_partitioned<R, T, F>(rng: &mut R, n: usize, f: F) -> Vec<T>
where
    R: Rng,
    T: Send,
    F: Fn(usize, &mut StdRng) -> T + Send + Sync,
{
    let rngs = fork_rngs(rng, n);

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        rngs.into_par_iter()
            .enumerate()
            .map(|(i, mut unit_rng)| f(i, &mut unit_rng))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        rngs.into_iter()
            .enumerate()
            .map(|(i, mut unit_rng)| f(i, &mut unit_rng))
            .collect()
    }
}

/// Like [`map_partitioned`], but hands each unit one owned item from `items`
/// instead of an index.
pub fn map_owned<R, I, T, F>(rng: &mut R, items: Vec<I>, f: F) -> Vec<T>
where
    R: Rng,
    I: Send,
    T: Send,
    F: Fn(I, &mut StdRng) -> T + Send + Sync,
{
    let rngs = fork_rngs(rng, items.len());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .into_par_iter()
            .zip(rngs)
            .map(|(item, mut unit_rng)| f(item, &mut unit_rng))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .into_iter()
            .zip(rngs)
            .map(|(item, mut unit_rng)| f(item, &mut unit_rng))
            .collect()
    }
}
