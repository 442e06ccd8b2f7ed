//! Conditional parallel iteration for batch calculation.
//!
//! Uses rayon when the `parallel` feature is enabled and the batch is large
//! enough; output order always equals input order.

use rwa_config::ProcessingConfig;

/// Maps `f(index, item)` over items, conditionally in parallel.
///
/// Uses parallel iteration when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - The batch size reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_parallel_map<T, U, F>(items: &[T], config: &ProcessingConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(usize, &T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            // indexed collect keeps input order
            return items.par_iter().enumerate().map(|(i, t)| f(i, t)).collect();
        }
    }

    items.iter().enumerate().map(|(i, t)| f(i, t)).collect()
}
