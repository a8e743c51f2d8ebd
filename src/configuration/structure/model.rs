use miette::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::configuration::traits::ResolvableConfiguration;
use crate::model::{integer_serde, ConfigurationOption, ModelConfiguration, Toggle};


/// The `[model]` table. Every key is optional; a missing key keeps the
/// default value of that option (which for the prompt and generation
/// lengths means "derive it from the context length").
///
/// Integer keys also accept `"unset"`, `"disabled"` or a decimal string,
/// since TOML integers cannot go above `i64::MAX`.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct UnresolvedModelConfiguration {
    exceptions: Option<bool>,
    #[serde(default, deserialize_with = "integer_serde::deserialize_optional")]
    max_context_length: Option<u64>,
    #[serde(default, deserialize_with = "integer_serde::deserialize_optional")]
    max_prompt_length: Option<u64>,
    #[serde(default, deserialize_with = "integer_serde::deserialize_optional")]
    max_generation_length: Option<u64>,
    #[serde(default, deserialize_with = "integer_serde::deserialize_optional")]
    max_batch_size: Option<u64>,
    #[serde(default, deserialize_with = "integer_serde::deserialize_optional")]
    gpu_count: Option<u64>,
    #[serde(default, deserialize_with = "integer_serde::deserialize_optional")]
    gpu_rank: Option<u64>,
    benchmark: Option<bool>,
    dev: Option<bool>,
}

impl UnresolvedModelConfiguration {
    /// Every option present in the table, in canonical order.
    fn options(&self) -> Vec<ConfigurationOption> {
        fn flag(
            value: Option<bool>,
            into_option: fn(Toggle) -> ConfigurationOption,
        ) -> Option<ConfigurationOption> {
            value.map(|value| into_option(Toggle::from_bool(value)))
        }

        [
            flag(self.exceptions, ConfigurationOption::Exceptions),
            self.max_context_length.map(ConfigurationOption::MaxContextLength),
            self.max_prompt_length.map(ConfigurationOption::MaxPromptLength),
            self.max_generation_length.map(ConfigurationOption::MaxGenerationLength),
            self.max_batch_size.map(ConfigurationOption::MaxBatchSize),
            self.gpu_count.map(ConfigurationOption::GpuCount),
            self.gpu_rank.map(ConfigurationOption::GpuRank),
            flag(self.benchmark, ConfigurationOption::Benchmark),
            flag(self.dev, ConfigurationOption::Dev),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl ResolvableConfiguration for UnresolvedModelConfiguration {
    type Resolved = ModelConfiguration;

    fn resolve(self) -> Result<Self::Resolved> {
        let options = self.options();
        debug!("Model table sets {} options.", options.len());

        // A TOML table cannot repeat a key, so this only fails if that ever changes.
        ModelConfiguration::build(options)
            .wrap_err("Failed to build model configuration from the model table.")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionKind, UNSET};

    #[test]
    fn test_empty_table_is_default() {
        let table: UnresolvedModelConfiguration = toml::from_str("").unwrap();

        assert!(table.options().is_empty());
        assert_eq!(table.resolve().unwrap(), ModelConfiguration::DEFAULT);
    }

    #[test]
    fn test_table_options() {
        let table: UnresolvedModelConfiguration = toml::from_str(
            r#"
            dev = true
            max_context_length = 4096
            gpu_rank = 2
            "#,
        )
        .unwrap();

        assert_eq!(
            table.options(),
            vec![
                ConfigurationOption::MaxContextLength(4096),
                ConfigurationOption::GpuRank(2),
                ConfigurationOption::Dev(Toggle::Enabled),
            ]
        );

        let configuration = table.resolve().unwrap();
        assert_eq!(
            configuration.get(OptionKind::MaxContextLength),
            ConfigurationOption::MaxContextLength(4096)
        );
        assert_eq!(
            configuration.get(OptionKind::MaxBatchSize),
            ConfigurationOption::MaxBatchSize(1)
        );
    }

    #[test]
    fn test_table_rejects_unknown_keys() {
        let result = toml::from_str::<UnresolvedModelConfiguration>("max_context = 10");
        assert!(result.is_err());
    }

    #[test]
    fn test_table_accepts_unset_and_large_values() {
        let table: UnresolvedModelConfiguration = toml::from_str(
            r#"
            max_context_length = "18446744073709551614"
            max_prompt_length = "unset"
            gpu_count = "disabled"
            "#,
        )
        .unwrap();

        assert_eq!(
            table.options(),
            vec![
                ConfigurationOption::MaxContextLength(u64::MAX - 1),
                ConfigurationOption::MaxPromptLength(UNSET),
                ConfigurationOption::GpuCount(0),
            ]
        );
    }

    #[test]
    fn test_table_rejects_invalid_integer_strings() {
        let result = toml::from_str::<UnresolvedModelConfiguration>("gpu_rank = \"second\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_table_rejects_negative_lengths() {
        let result = toml::from_str::<UnresolvedModelConfiguration>("max_batch_size = -1");
        assert!(result.is_err());
    }
}
