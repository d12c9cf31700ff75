//! Parallel statistics collection across independent model replicates
//!
//! Each replicate is one indivisible unit of work: a full model run on its
//! own freshly sampled grid, seeded deterministically from the replicate
//! index. Workers share nothing mutable, so replicates may execute in any
//! order on the pool while their results are still collected in submission
//! order. One failing replicate aborts the whole run; the aggregation
//! assumes a complete, uniform sample and never degrades to a partial one.

use crate::params::{ConfigError, SimulationParameters};
use crate::simulation::run_model;
use crate::stats::AggregatedStatistics;
use rayon::prelude::*;
use tracing::info;

/// Derive the seed of one replicate from the run's base seed.
///
/// Splitmix64-style finalizer over the combined value: a small change in
/// either input flips about half the output bits, so consecutive replicate
/// indices yield unrelated generator states while staying fully
/// reproducible and independent of scheduling order.
#[must_use]
pub fn replicate_seed(base_seed: u64, replicate: u64) -> u64 {
    let mut z = base_seed.wrapping_add(replicate.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Run every replicate on a fixed-size worker pool and aggregate the kept
/// episode records into one table, in submission order.
///
/// # Errors
///
/// Returns [`HarnessError`] when the parameters fail validation, when the
/// requested worker count exceeds what the platform offers, when the pool
/// cannot be built, or when any replicate fails; in the latter case no
/// partial statistics are returned.
pub fn collect_statistics(
    params: &SimulationParameters,
    base_seed: u64,
) -> Result<AggregatedStatistics, HarnessError> {
    params.validate()?;

    if let Ok(available) = std::thread::available_parallelism() {
        if params.workers > available.get() {
            return Err(HarnessError::UnsupportedParallelism {
                requested: params.workers,
                available: available.get(),
            });
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.workers)
        .build()
        .map_err(|e| HarnessError::PoolCreation(e.to_string()))?;

    info!(
        "Collecting statistics: {} replicates on {} workers",
        params.replicates, params.workers
    );

    let replicates = pool.install(|| {
        (0..params.replicates)
            .into_par_iter()
            .map(|index| {
                let seed = replicate_seed(base_seed, index as u64);
                run_model(params, seed).map(|run| run.records)
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    Ok(AggregatedStatistics::from_replicates(replicates))
}

/// Errors raised by the parallel statistics harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// The configuration failed validation or a replicate rejected it.
    Config(ConfigError),
    /// More workers were requested than the platform can provide.
    UnsupportedParallelism {
        /// Requested worker count.
        requested: usize,
        /// Parallelism the platform reports.
        available: usize,
    },
    /// The worker pool could not be constructed.
    PoolCreation(String),
}

impl From<ConfigError> for HarnessError {
    fn from(error: ConfigError) -> Self {
        HarnessError::Config(error)
    }
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Config(error) => write!(f, "Invalid configuration: {error}"),
            HarnessError::UnsupportedParallelism {
                requested,
                available,
            } => write!(
                f,
                "Requested {requested} workers but the platform provides {available}"
            ),
            HarnessError::PoolCreation(msg) => write!(f, "Failed to build worker pool: {msg}"),
        }
    }
}

impl std::error::Error for HarnessError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> SimulationParameters {
        SimulationParameters {
            grid_size: 10,
            tree_density: 0.5,
            regrowth_probability: 0.01,
            warmup_fires: 1,
            measured_fires: 4,
            replicates: 3,
            workers: 1,
        }
    }

    #[test]
    fn test_replicate_seeds_are_distinct_and_stable() {
        let seeds: Vec<u64> = (0..64).map(|i| replicate_seed(42, i)).collect();
        let mut deduped = seeds.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), seeds.len());

        // Stable across calls
        assert_eq!(replicate_seed(42, 7), replicate_seed(42, 7));
        // Sensitive to the base seed
        assert_ne!(replicate_seed(42, 7), replicate_seed(43, 7));
    }

    #[test]
    fn test_aggregate_has_one_record_per_measured_episode() {
        let params = small_params();
        let stats = collect_statistics(&params, 42).unwrap();
        assert_eq!(stats.len(), params.replicates * params.measured_fires);
    }

    #[test]
    fn test_invalid_parameters_fail_at_entry() {
        let params = SimulationParameters {
            measured_fires: 0,
            ..small_params()
        };
        let err = collect_statistics(&params, 0).unwrap_err();
        assert!(matches!(err, HarnessError::Config(_)));
    }

    #[test]
    fn test_oversubscribed_workers_are_rejected() {
        let Ok(available) = std::thread::available_parallelism() else {
            return;
        };
        let params = SimulationParameters {
            workers: available.get() + 1,
            ..small_params()
        };
        let err = collect_statistics(&params, 0).unwrap_err();
        assert!(matches!(err, HarnessError::UnsupportedParallelism { .. }));
    }

    #[test]
    fn test_collection_is_deterministic() {
        let params = small_params();
        let first = collect_statistics(&params, 7).unwrap();
        let second = collect_statistics(&params, 7).unwrap();
        assert_eq!(first, second);
    }
}
