use std::path::PathBuf;

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::configuration::{
    traits::ResolvableConfigurationWithContext,
    utilities::anchor_path_at,
};


#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub(super) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    /// Relative paths are relative to the configuration file's directory.
    log_file_output_directory: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    pub log_file_output_directory: PathBuf,
}

impl ResolvableConfigurationWithContext for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    /// Directory containing the configuration file.
    type Context = PathBuf;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        // Both filters are parsed again on use, so they have to be valid now.
        EnvFilter::try_new(&self.console_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse field console_output_level_filter"))?;

        EnvFilter::try_new(&self.log_file_output_level_filter)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to parse field log_file_output_level_filter"))?;


        let log_file_output_directory =
            anchor_path_at(&context, self.log_file_output_directory);


        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory,
        })
    }
}

impl LoggingConfiguration {
    /// Builds a fresh console filter, with `override_directive` (e.g. from the
    /// command line) taking precedence over the configured one if present.
    pub fn console_output_level_filter(&self, override_directive: Option<&str>) -> Result<EnvFilter> {
        let directive = override_directive.unwrap_or(&self.console_output_level_filter);

        EnvFilter::try_new(directive)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Invalid console log level filter: {directive}"))
    }

    pub fn log_file_output_level_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_file_output_level_filter)
            .into_diagnostic()
            .wrap_err("Invalid log file level filter.")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn unresolved(console_output_level_filter: &str) -> UnresolvedLoggingConfiguration {
        UnresolvedLoggingConfiguration {
            console_output_level_filter: console_output_level_filter.to_string(),
            log_file_output_level_filter: "debug".to_string(),
            log_file_output_directory: "logs".to_string(),
        }
    }

    #[test]
    fn test_resolve_anchors_log_directory() {
        let resolved = unresolved("info")
            .resolve(PathBuf::from("/srv/model-config"))
            .unwrap();

        assert_eq!(
            resolved.log_file_output_directory,
            PathBuf::from("/srv/model-config/logs")
        );
    }

    #[test]
    fn test_resolve_rejects_invalid_filter() {
        let result = unresolved("info,model_config=loudest").resolve(PathBuf::from("/srv/model-config"));
        assert!(result.is_err(), "invalid filter directive was accepted");
    }

    #[test]
    fn test_console_filter_override() {
        let resolved = unresolved("info")
            .resolve(PathBuf::from("/srv/model-config"))
            .unwrap();

        assert!(resolved.console_output_level_filter(None).is_ok());
        assert!(resolved.console_output_level_filter(Some("trace")).is_ok());
        assert!(resolved.console_output_level_filter(Some("info,model_config=loudest")).is_err());
    }
}
