use miette::Diagnostic;
use thiserror::Error;

use super::option::OptionKind;


/// Rejection of a model configuration, either while building it
/// from options or while validating it.
///
/// None of these are retryable: they always point at a mistake
/// at the call site (or in the configuration file).
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelConfigurationError {
    #[error("option {kind} was provided more than once")]
    #[diagnostic(
        code(model_config::duplicate_option_kind),
        help("each option kind may appear at most once per build, remove the repeated option")
    )]
    DuplicateOptionKind { kind: OptionKind },

    #[error("max-context-length must be greater than 1, got {context_length}")]
    #[diagnostic(
        code(model_config::context_length_too_short),
        help("set max-context-length to at least 2")
    )]
    ContextLengthTooShort { context_length: u64 },

    #[error(
        "max-generation-length ({generation_length}) plus max-prompt-length ({prompt_length}) \
        exceeds max-context-length ({context_length})"
    )]
    #[diagnostic(
        code(model_config::prompt_or_generation_too_large),
        help(
            "lower max-prompt-length or max-generation-length, raise max-context-length, \
            or leave the lengths unset to default each to half of the context"
        )
    )]
    PromptOrGenerationTooLarge {
        context_length: u64,
        generation_length: u64,
        prompt_length: u64,
    },
}

impl ModelConfigurationError {
    /// A static description of the error.
    ///
    /// Const-evaluated configurations cannot format values into their
    /// panic messages, so they report this instead.
    pub const fn summary(&self) -> &'static str {
        match self {
            ModelConfigurationError::DuplicateOptionKind { kind } => match kind {
                OptionKind::Exceptions => "option exceptions was provided more than once",
                OptionKind::MaxContextLength => {
                    "option max-context-length was provided more than once"
                }
                OptionKind::MaxPromptLength => {
                    "option max-prompt-length was provided more than once"
                }
                OptionKind::MaxGenerationLength => {
                    "option max-generation-length was provided more than once"
                }
                OptionKind::MaxBatchSize => "option max-batch-size was provided more than once",
                OptionKind::GpuCount => "option gpu-count was provided more than once",
                OptionKind::GpuRank => "option gpu-rank was provided more than once",
                OptionKind::Benchmark => "option benchmark was provided more than once",
                OptionKind::Dev => "option dev was provided more than once",
            },
            ModelConfigurationError::ContextLengthTooShort { .. } => {
                "max-context-length must be greater than 1"
            }
            ModelConfigurationError::PromptOrGenerationTooLarge { .. } => {
                "max-generation-length plus max-prompt-length exceeds max-context-length"
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offending_values() {
        let duplicate = ModelConfigurationError::DuplicateOptionKind {
            kind: OptionKind::GpuRank,
        };
        assert_eq!(duplicate.to_string(), "option gpu-rank was provided more than once");
        assert_eq!(duplicate.to_string(), duplicate.summary());

        let too_large = ModelConfigurationError::PromptOrGenerationTooLarge {
            context_length: 10,
            generation_length: 6,
            prompt_length: 7,
        };
        let message = too_large.to_string();
        assert!(message.contains("(6)"), "{message}");
        assert!(message.contains("(7)"), "{message}");
        assert!(message.contains("(10)"), "{message}");
    }

    #[test]
    fn test_diagnostic_codes() {
        let error = ModelConfigurationError::ContextLengthTooShort { context_length: 1 };

        let code = error.code().map(|code| code.to_string());
        assert_eq!(code.as_deref(), Some("model_config::context_length_too_short"));
        assert!(error.help().is_some());
    }

    #[test]
    fn test_summary_matches_message_for_every_duplicate_kind() {
        for kind in OptionKind::ALL {
            let error = ModelConfigurationError::DuplicateOptionKind { kind };
            assert_eq!(error.summary(), error.to_string());
        }
    }
}
