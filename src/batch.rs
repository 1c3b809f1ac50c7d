// File: ./src/batch.rs
use crate::model::{Conversion, DateTriple};
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// Reference policy value for simultaneous in-flight calls.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Bounded-parallel map over independent conversion calls.
///
/// Output length equals input length and `output[i]` belongs to `requests[i]`
/// no matter in which order the calls complete: every unit of work carries its
/// submission index, and completions are written into a pre-sized vector slot
/// owned by that index. Collecting in completion order instead would silently
/// misalign rows whenever network latency reorders completions.
///
/// A call that fails, finds no match, or panics yields `None` at its slot and
/// never aborts the rest of the batch.
pub async fn convert_batch<F, Fut>(
    requests: Vec<DateTriple>,
    convert_one: F,
    max_concurrency: usize,
) -> Vec<Option<DateTriple>>
where
    F: Fn(DateTriple) -> Fut,
    Fut: Future<Output = Conversion>,
{
    let mut results: Vec<Option<DateTriple>> = vec![None; requests.len()];
    if requests.is_empty() {
        return results;
    }

    let units = requests.into_iter().enumerate().map(|(index, date)| {
        let call = convert_one(date);
        async move { (index, AssertUnwindSafe(call).catch_unwind().await) }
    });

    // buffer_unordered pulls a new unit only when a slot frees up, so at most
    // max_concurrency calls are ever in flight.
    let mut in_flight = stream::iter(units).buffer_unordered(max_concurrency.max(1));
    while let Some((index, outcome)) = in_flight.next().await {
        results[index] = match outcome {
            Ok(conversion) => conversion.into_option(),
            Err(_) => {
                log::warn!("conversion for row {} panicked, leaving it blank", index + 1);
                None
            }
        };
    }
    results
}
