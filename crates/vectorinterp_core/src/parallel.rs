//! Chunked fan-out of batched queries over the global rayon pool.
//!
//! Every chunk is processed by one closure call, so callers can give each
//! worker its own copy of a bracket cache. Results keep the input order.

use crate::error::InterpolationError;
use tracing::debug;

/// Split `items` into `workers` consecutive chunks, apply `f` to each on the
/// rayon pool and concatenate the results.
///
/// `workers <= 1` (or a batch smaller than two items) runs on the calling thread.
pub(crate) fn map_chunks<I, R, F>(
    items: &[I],
    workers: usize,
    f: F,
) -> Result<Vec<R>, InterpolationError>
where
    I: Sync,
    R: Send,
    F: Fn(&[I]) -> Result<Vec<R>, InterpolationError> + Send + Sync,
{
    if workers <= 1 || items.len() < 2 {
        return f(items);
    }
    fan_out(items, workers, f)
}

#[cfg(feature = "parallel")]
fn fan_out<I, R, F>(items: &[I], workers: usize, f: F) -> Result<Vec<R>, InterpolationError>
where
    I: Sync,
    R: Send,
    F: Fn(&[I]) -> Result<Vec<R>, InterpolationError> + Send + Sync,
{
    use rayon::prelude::*;

    let workers = workers.min(items.len());
    let chunk_size = items.len().div_ceil(workers);
    debug!(items = items.len(), workers, chunk_size, "fanning out batched query");

    let chunks: Vec<Vec<R>> = items.par_chunks(chunk_size).map(&f).collect::<Result<_, _>>()?;
    Ok(chunks.into_iter().flatten().collect())
}

#[cfg(not(feature = "parallel"))]
fn fan_out<I, R, F>(items: &[I], workers: usize, f: F) -> Result<Vec<R>, InterpolationError>
where
    I: Sync,
    R: Send,
    F: Fn(&[I]) -> Result<Vec<R>, InterpolationError> + Send + Sync,
{
    debug!(workers, "built without the parallel feature, running sequentially");
    f(items)
}
