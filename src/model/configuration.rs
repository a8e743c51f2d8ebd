use tracing::{debug, trace};

use super::error::ModelConfigurationError;
use super::option::{ConfigurationOption, OptionKind, Toggle, UNSET};


/// Unvalidated model configuration: exactly one value per [`OptionKind`].
///
/// This is a plain value. Every update returns a new configuration
/// and leaves the original untouched. Call
/// [`validate`][ModelConfiguration::validate] (or the const
/// [`resolve`][ModelConfiguration::resolve]) to obtain a
/// [`ResolvedModelConfiguration`][super::ResolvedModelConfiguration].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ModelConfiguration {
    pub(super) exceptions: Toggle,
    pub(super) max_context_length: u64,
    pub(super) max_prompt_length: u64,
    pub(super) max_generation_length: u64,
    pub(super) max_batch_size: u64,
    pub(super) gpu_count: u64,
    pub(super) gpu_rank: u64,
    pub(super) benchmark: Toggle,
    pub(super) dev: Toggle,
}

impl ModelConfiguration {
    /// The configuration every build starts from unless given another base.
    ///
    /// Prompt and generation lengths are left unset, so they resolve to
    /// half of the context length each.
    pub const DEFAULT: ModelConfiguration = ModelConfiguration {
        exceptions: Toggle::Disabled,
        max_context_length: 1024,
        max_prompt_length: UNSET,
        max_generation_length: UNSET,
        max_batch_size: 1,
        gpu_count: 1,
        gpu_rank: 0,
        benchmark: Toggle::Disabled,
        dev: Toggle::Disabled,
    };

    /// Returns a copy of this configuration with the field matching
    /// `option`'s kind replaced by its value.
    pub const fn with_option(self, option: ConfigurationOption) -> Self {
        match option {
            ConfigurationOption::Exceptions(exceptions) => Self { exceptions, ..self },
            ConfigurationOption::MaxContextLength(max_context_length) => Self {
                max_context_length,
                ..self
            },
            ConfigurationOption::MaxPromptLength(max_prompt_length) => Self {
                max_prompt_length,
                ..self
            },
            ConfigurationOption::MaxGenerationLength(max_generation_length) => Self {
                max_generation_length,
                ..self
            },
            ConfigurationOption::MaxBatchSize(max_batch_size) => Self {
                max_batch_size,
                ..self
            },
            ConfigurationOption::GpuCount(gpu_count) => Self { gpu_count, ..self },
            ConfigurationOption::GpuRank(gpu_rank) => Self { gpu_rank, ..self },
            ConfigurationOption::Benchmark(benchmark) => Self { benchmark, ..self },
            ConfigurationOption::Dev(dev) => Self { dev, ..self },
        }
    }

    /// Returns the kind of the first option whose kind already appeared
    /// earlier in `options`, or `None` if all kinds are distinct.
    pub const fn find_duplicate_kind(options: &[ConfigurationOption]) -> Option<OptionKind> {
        let mut seen_kinds = [false; OptionKind::ALL.len()];

        let mut option_index = 0;
        while option_index < options.len() {
            let kind = options[option_index].kind();

            if seen_kinds[kind.index()] {
                return Some(kind);
            }
            seen_kinds[kind.index()] = true;

            option_index += 1;
        }

        None
    }

    /// Applies all `options` over this configuration.
    ///
    /// Duplicated kinds are rejected before any option is applied.
    /// Kinds already set in `self` are never considered duplicates.
    pub const fn try_with_options(
        self,
        options: &[ConfigurationOption],
    ) -> Result<Self, ModelConfigurationError> {
        if let Some(kind) = Self::find_duplicate_kind(options) {
            return Err(ModelConfigurationError::DuplicateOptionKind { kind });
        }

        let mut configuration = self;

        let mut option_index = 0;
        while option_index < options.len() {
            configuration = configuration.with_option(options[option_index]);
            option_index += 1;
        }

        Ok(configuration)
    }

    /// Builds a configuration by applying `options`, in any order, over
    /// [`ModelConfiguration::DEFAULT`].
    pub fn build<I>(options: I) -> Result<Self, ModelConfigurationError>
    where
        I: IntoIterator<Item = ConfigurationOption>,
    {
        Self::DEFAULT.with_options(options)
    }

    /// Builds a configuration by applying `options`, in any order, over `self`.
    pub fn with_options<I>(self, options: I) -> Result<Self, ModelConfigurationError>
    where
        I: IntoIterator<Item = ConfigurationOption>,
    {
        let options = options.into_iter().collect::<Vec<_>>();
        trace!("Applying {} configuration options: {:?}", options.len(), options);

        let configuration = self.try_with_options(&options)?;

        debug!(
            "Applied {} configuration options, result: {:?}",
            options.len(),
            configuration
        );

        Ok(configuration)
    }

    /// Current value of the field of the given kind.
    pub const fn get(&self, kind: OptionKind) -> ConfigurationOption {
        match kind {
            OptionKind::Exceptions => ConfigurationOption::Exceptions(self.exceptions),
            OptionKind::MaxContextLength => {
                ConfigurationOption::MaxContextLength(self.max_context_length)
            }
            OptionKind::MaxPromptLength => {
                ConfigurationOption::MaxPromptLength(self.max_prompt_length)
            }
            OptionKind::MaxGenerationLength => {
                ConfigurationOption::MaxGenerationLength(self.max_generation_length)
            }
            OptionKind::MaxBatchSize => ConfigurationOption::MaxBatchSize(self.max_batch_size),
            OptionKind::GpuCount => ConfigurationOption::GpuCount(self.gpu_count),
            OptionKind::GpuRank => ConfigurationOption::GpuRank(self.gpu_rank),
            OptionKind::Benchmark => ConfigurationOption::Benchmark(self.benchmark),
            OptionKind::Dev => ConfigurationOption::Dev(self.dev),
        }
    }

    /// All current values, in canonical order.
    pub fn options(&self) -> [ConfigurationOption; 9] {
        OptionKind::ALL.map(|kind| self.get(kind))
    }
}

impl Default for ModelConfiguration {
    fn default() -> Self {
        Self::DEFAULT
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let configuration = ModelConfiguration::default();

        assert_eq!(
            configuration.options(),
            [
                ConfigurationOption::Exceptions(Toggle::Disabled),
                ConfigurationOption::MaxContextLength(1024),
                ConfigurationOption::MaxPromptLength(UNSET),
                ConfigurationOption::MaxGenerationLength(UNSET),
                ConfigurationOption::MaxBatchSize(1),
                ConfigurationOption::GpuCount(1),
                ConfigurationOption::GpuRank(0),
                ConfigurationOption::Benchmark(Toggle::Disabled),
                ConfigurationOption::Dev(Toggle::Disabled),
            ]
        );
    }

    #[test]
    fn test_with_option_only_touches_its_own_field() {
        let base = ModelConfiguration::DEFAULT;

        let overrides = [
            ConfigurationOption::Exceptions(Toggle::Enabled),
            ConfigurationOption::MaxContextLength(4096),
            ConfigurationOption::MaxPromptLength(100),
            ConfigurationOption::MaxGenerationLength(200),
            ConfigurationOption::MaxBatchSize(23),
            ConfigurationOption::GpuCount(8),
            ConfigurationOption::GpuRank(3),
            ConfigurationOption::Benchmark(Toggle::Enabled),
            ConfigurationOption::Dev(Toggle::Enabled),
        ];

        for option in overrides {
            let updated = base.with_option(option);

            for kind in OptionKind::ALL {
                if kind == option.kind() {
                    assert_eq!(updated.get(kind), option);
                } else {
                    assert_eq!(
                        updated.get(kind),
                        base.get(kind),
                        "applying {option} changed {kind}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_with_option_leaves_original_untouched() {
        let original = ModelConfiguration::DEFAULT;
        let _updated = original.with_option(ConfigurationOption::GpuRank(5));

        assert_eq!(original, ModelConfiguration::DEFAULT);
    }

    #[test]
    fn test_find_duplicate_kind() {
        assert_eq!(ModelConfiguration::find_duplicate_kind(&[]), None);

        assert_eq!(
            ModelConfiguration::find_duplicate_kind(&[
                ConfigurationOption::Dev(Toggle::Enabled),
                ConfigurationOption::GpuRank(1),
                ConfigurationOption::MaxBatchSize(2),
            ]),
            None
        );

        assert_eq!(
            ModelConfiguration::find_duplicate_kind(&[
                ConfigurationOption::Dev(Toggle::Enabled),
                ConfigurationOption::GpuRank(1),
                ConfigurationOption::GpuCount(2),
                ConfigurationOption::GpuRank(1),
                ConfigurationOption::Dev(Toggle::Disabled),
            ]),
            Some(OptionKind::GpuRank)
        );
    }

    #[test]
    fn test_duplicates_are_rejected_before_anything_is_applied() {
        let result = ModelConfiguration::DEFAULT.try_with_options(&[
            ConfigurationOption::MaxBatchSize(4),
            ConfigurationOption::Benchmark(Toggle::Enabled),
            ConfigurationOption::Benchmark(Toggle::Enabled),
        ]);

        assert_eq!(
            result,
            Err(ModelConfigurationError::DuplicateOptionKind {
                kind: OptionKind::Benchmark
            })
        );
    }

    #[test]
    fn test_layered_build_does_not_flag_kinds_set_in_base() {
        let base = ModelConfiguration::build([ConfigurationOption::Dev(Toggle::Enabled)]).unwrap();

        let layered = base
            .with_options([
                ConfigurationOption::Dev(Toggle::Disabled),
                ConfigurationOption::GpuCount(2),
            ])
            .unwrap();

        assert_eq!(layered.get(OptionKind::Dev), ConfigurationOption::Dev(Toggle::Disabled));
        assert_eq!(layered.get(OptionKind::GpuCount), ConfigurationOption::GpuCount(2));
    }

    #[test]
    fn test_options_rebuild_the_same_configuration() {
        let configuration = ModelConfiguration::build([
            ConfigurationOption::MaxContextLength(2048),
            ConfigurationOption::Benchmark(Toggle::Enabled),
            ConfigurationOption::GpuRank(1),
        ])
        .unwrap();

        let rebuilt = ModelConfiguration::build(configuration.options()).unwrap();
        assert_eq!(rebuilt, configuration);
    }
}
