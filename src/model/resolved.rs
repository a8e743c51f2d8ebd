use std::num::NonZeroU64;

use serde::Serialize;
use tracing::debug;

use super::configuration::ModelConfiguration;
use super::error::ModelConfigurationError;
use super::option::UNSET;


const TWO: NonZeroU64 = match NonZeroU64::new(2) {
    Some(two) => two,
    None => unreachable!(),
};


/// Unsigned division rounding up.
///
/// Equivalent to `(dividend + divisor - 1) / divisor`, but cannot overflow
/// for dividends close to `u64::MAX`.
pub const fn ceil_div(dividend: u64, divisor: NonZeroU64) -> u64 {
    let divisor = divisor.get();
    dividend / divisor + (dividend % divisor != 0) as u64
}

/// Returns `value`, unless it is [`UNSET`], in which case it defaults
/// to half of `max_context_length` (rounded up).
pub const fn resolve_dependent_length(value: u64, max_context_length: u64) -> u64 {
    if value == UNSET {
        ceil_div(max_context_length, TWO)
    } else {
        value
    }
}


/// A validated model configuration with all dependent defaults computed.
///
/// Can only be obtained through [`ModelConfiguration::resolve`]
/// or [`ModelConfiguration::validate`].
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResolvedModelConfiguration {
    exceptions: bool,
    #[serde(with = "super::integer_serde")]
    max_context_length: u64,
    #[serde(with = "super::integer_serde")]
    max_prompt_length: u64,
    #[serde(with = "super::integer_serde")]
    max_generation_length: u64,
    #[serde(with = "super::integer_serde")]
    max_batch_size: u64,
    #[serde(with = "super::integer_serde")]
    gpu_count: u64,
    #[serde(with = "super::integer_serde")]
    gpu_rank: u64,
    benchmark: bool,
    dev: bool,

    #[serde(skip)]
    source: ModelConfiguration,
}

impl ResolvedModelConfiguration {
    pub const fn exceptions(&self) -> bool {
        self.exceptions
    }

    pub const fn max_context_length(&self) -> u64 {
        self.max_context_length
    }

    /// Explicit prompt length, or half the context length if it was left unset.
    pub const fn max_prompt_length(&self) -> u64 {
        self.max_prompt_length
    }

    /// Explicit generation length, or half the context length if it was left unset.
    pub const fn max_generation_length(&self) -> u64 {
        self.max_generation_length
    }

    pub const fn max_batch_size(&self) -> u64 {
        self.max_batch_size
    }

    pub const fn gpu_count(&self) -> u64 {
        self.gpu_count
    }

    pub const fn gpu_rank(&self) -> u64 {
        self.gpu_rank
    }

    pub const fn benchmark(&self) -> bool {
        self.benchmark
    }

    pub const fn dev(&self) -> bool {
        self.dev
    }

    /// The unresolved configuration this was validated from.
    pub const fn source(&self) -> &ModelConfiguration {
        &self.source
    }
}


impl ModelConfiguration {
    /// Computes dependent defaults and checks cross-field constraints.
    ///
    /// Being a `const fn`, this can run at compile time; see
    /// [`resolved_model_config!`][crate::resolved_model_config].
    ///
    /// # Errors
    /// - [`ModelConfigurationError::ContextLengthTooShort`] if
    ///   `max-context-length` is not greater than 1.
    /// - [`ModelConfigurationError::PromptOrGenerationTooLarge`] if the
    ///   resolved prompt and generation lengths together exceed the context length.
    pub const fn resolve(self) -> Result<ResolvedModelConfiguration, ModelConfigurationError> {
        let max_context_length = self.max_context_length;
        let max_prompt_length = resolve_dependent_length(self.max_prompt_length, max_context_length);
        let max_generation_length =
            resolve_dependent_length(self.max_generation_length, max_context_length);

        if max_context_length <= 1 {
            return Err(ModelConfigurationError::ContextLengthTooShort {
                context_length: max_context_length,
            });
        }

        // An overflowing sum can never fit in the context either.
        let fits_in_context = match max_generation_length.checked_add(max_prompt_length) {
            Some(total_length) => total_length <= max_context_length,
            None => false,
        };

        if !fits_in_context {
            return Err(ModelConfigurationError::PromptOrGenerationTooLarge {
                context_length: max_context_length,
                generation_length: max_generation_length,
                prompt_length: max_prompt_length,
            });
        }


        Ok(ResolvedModelConfiguration {
            exceptions: self.exceptions.is_enabled(),
            max_context_length,
            max_prompt_length,
            max_generation_length,
            max_batch_size: self.max_batch_size,
            gpu_count: self.gpu_count,
            gpu_rank: self.gpu_rank,
            benchmark: self.benchmark.is_enabled(),
            dev: self.dev.is_enabled(),
            source: self,
        })
    }

    /// Runtime counterpart of [`resolve`][ModelConfiguration::resolve].
    pub fn validate(&self) -> Result<ResolvedModelConfiguration, ModelConfigurationError> {
        let resolved = self.resolve()?;

        debug!(
            "Model configuration is valid: context length {}, prompt length {}, generation length {}.",
            resolved.max_context_length,
            resolved.max_prompt_length,
            resolved.max_generation_length
        );

        Ok(resolved)
    }
}
