//! Text the binary prints: the resolved configuration as TOML
//! and the demonstration summary.

use miette::{Context, IntoDiagnostic, Result};
use serde::Serialize;
use tracing::trace;

use crate::demonstration::{demonstration_configurations, RESOLVED_DEFAULTS};
use crate::model::ResolvedModelConfiguration;


/// Shape of the printed output, so it can be pasted back into
/// a configuration file as its `[model]` table.
#[derive(Serialize)]
struct ResolvedOutput<'a> {
    model: &'a ResolvedModelConfiguration,
}


/// Renders `configuration` as a TOML document with a single `[model]` table.
///
/// Integers that TOML cannot represent are written as strings
/// (see [`integer_serde`][crate::model::integer_serde]), so the output
/// always loads back as the same configuration.
pub fn render_resolved(configuration: &ResolvedModelConfiguration) -> Result<String> {
    let rendered = toml::to_string_pretty(&ResolvedOutput {
        model: configuration,
    })
    .into_diagnostic()
    .wrap_err("Failed to render resolved configuration as TOML.")?;

    trace!("Rendered resolved configuration ({} bytes).", rendered.len());
    Ok(rendered)
}

/// One line per demonstration configuration with its options and whether
/// it validates, followed by the defaults resolved at compile time.
pub fn describe_demonstration() -> String {
    let mut lines = vec!["Demonstration configurations:".to_string()];

    for (name, configuration) in demonstration_configurations() {
        let options = configuration
            .options()
            .map(|option| option.to_string())
            .join(" ");

        lines.push(match configuration.validate() {
            Ok(_) => format!("  {name}: {options} (valid)"),
            Err(error) => format!("  {name}: {options} (invalid: {error})"),
        });
    }

    lines.push(format!(
        "  defaults, resolved at compile time: max-prompt-length={} max-generation-length={}",
        RESOLVED_DEFAULTS.max_prompt_length(),
        RESOLVED_DEFAULTS.max_generation_length()
    ));

    lines.join("\n")
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfigurationOption, ModelConfiguration};

    #[test]
    fn test_render_defaults() {
        let rendered = render_resolved(&RESOLVED_DEFAULTS).unwrap();

        assert!(rendered.starts_with("[model]"), "unexpected output:\n{rendered}");
        for line in [
            "exceptions = false",
            "max_context_length = 1024",
            "max_prompt_length = 512",
            "max_generation_length = 512",
            "max_batch_size = 1",
            "gpu_count = 1",
            "gpu_rank = 0",
            "benchmark = false",
            "dev = false",
        ] {
            assert!(
                rendered.lines().any(|rendered_line| rendered_line == line),
                "missing \"{line}\" in:\n{rendered}"
            );
        }
    }

    #[test]
    fn test_render_values_beyond_toml_integers() {
        let resolved = ModelConfiguration::DEFAULT
            .with_option(ConfigurationOption::MaxContextLength(u64::MAX - 1))
            .with_option(ConfigurationOption::GpuCount(crate::model::UNSET))
            .validate()
            .unwrap();

        let rendered = render_resolved(&resolved).unwrap();

        assert!(rendered.contains("max_context_length = \"18446744073709551614\""));
        assert!(rendered.contains("max_prompt_length = 9223372036854775807"));
        assert!(rendered.contains("gpu_count = \"unset\""));
    }

    #[test]
    fn test_describe_demonstration() {
        let description = describe_demonstration();
        let lines: Vec<&str> = description.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Demonstration configurations:");
        assert!(lines[1].starts_with("  defaults: exceptions=disabled max-context-length=1024"));
        assert!(lines[1].ends_with("(valid)"));
        assert!(lines[2].contains("max-batch-size=23"));
        assert!(lines[2].ends_with("(valid)"));
        assert!(lines[3].starts_with("  benchmark-context-dev:"));
        assert!(lines[3].contains("(invalid: "));
        assert_eq!(
            lines[4],
            "  defaults, resolved at compile time: max-prompt-length=512 max-generation-length=512"
        );
    }
}
