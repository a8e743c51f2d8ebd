//! Demonstration configurations, all built (and the first one validated)
//! while compiling.
//!
//! Try adding a second option of an already-present kind to any of them,
//! e.g. `ConfigurationOption::Dev(Toggle::Enabled)` at the end of
//! [`DEV_BENCHMARK_BATCH_SIZE`]: the crate stops compiling.

use crate::model::{ConfigurationOption, ModelConfiguration, ResolvedModelConfiguration, Toggle};
use crate::{model_config, resolved_model_config};


/// Every option left at its default.
pub const DEFAULTS: ModelConfiguration = model_config!();

/// Options given in arbitrary order; each one lands in its own field.
pub const DEV_BENCHMARK_BATCH_SIZE: ModelConfiguration = model_config!(
    ConfigurationOption::Dev(Toggle::Disabled),
    ConfigurationOption::Benchmark(Toggle::Disabled),
    ConfigurationOption::MaxBatchSize(23),
);

/// Not valid as-is: with a context length of 23, the default prompt and
/// generation lengths (12 each) do not fit. Only validated at runtime.
pub const BENCHMARK_CONTEXT_DEV: ModelConfiguration = model_config!(
    ConfigurationOption::Benchmark(Toggle::Disabled),
    ConfigurationOption::MaxContextLength(23),
    ConfigurationOption::Dev(Toggle::Enabled),
);

pub const RESOLVED_DEFAULTS: ResolvedModelConfiguration = resolved_model_config!(DEFAULTS);


/// All demonstration configurations, with a short name for each.
pub fn demonstration_configurations() -> [(&'static str, ModelConfiguration); 3] {
    [
        ("defaults", DEFAULTS),
        ("dev-benchmark-batch-size", DEV_BENCHMARK_BATCH_SIZE),
        ("benchmark-context-dev", BENCHMARK_CONTEXT_DEV),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelConfigurationError, OptionKind};

    #[test]
    fn test_resolved_defaults() {
        assert_eq!(RESOLVED_DEFAULTS.max_context_length(), 1024);
        assert_eq!(RESOLVED_DEFAULTS.max_prompt_length(), 512);
        assert_eq!(RESOLVED_DEFAULTS.max_generation_length(), 512);
        assert_eq!(RESOLVED_DEFAULTS.source(), &DEFAULTS);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        assert_eq!(
            DEV_BENCHMARK_BATCH_SIZE.get(OptionKind::MaxBatchSize),
            ConfigurationOption::MaxBatchSize(23)
        );
        assert_eq!(
            DEV_BENCHMARK_BATCH_SIZE.get(OptionKind::MaxContextLength),
            ConfigurationOption::MaxContextLength(1024)
        );
        assert!(DEV_BENCHMARK_BATCH_SIZE.validate().is_ok());
    }

    #[test]
    fn test_odd_context_with_default_lengths_is_rejected() {
        assert_eq!(
            BENCHMARK_CONTEXT_DEV.validate(),
            Err(ModelConfigurationError::PromptOrGenerationTooLarge {
                context_length: 23,
                generation_length: 12,
                prompt_length: 12,
            })
        );
    }

    #[test]
    fn test_demonstration_names_are_unique() {
        let configurations = demonstration_configurations();
        let mut names = configurations.map(|(name, _)| name).to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), configurations.len());
    }
}
