//! Strongly-typed model configuration options, their order-independent
//! builder and the validation that turns a [`ModelConfiguration`] into a
//! [`ResolvedModelConfiguration`].
//!
//! # Building
//! A configuration is built from any number of [`ConfigurationOption`]s,
//! supplied in any order, applied over [`ModelConfiguration::DEFAULT`]
//! (or over an explicit base configuration for layered setups).
//! Each option kind may appear at most once per build.
//!
//! # Compile-time evaluation
//! Every step (applying options, checking for duplicates, resolving and
//! validating) is a `const fn`. The [`model_config!`][crate::model_config]
//! and [`resolved_model_config!`][crate::resolved_model_config] macros
//! evaluate them in a `const` item, so an invalid configuration
//! fails to compile:
//!
//! ```
//! use model_config::model::{ConfigurationOption, ResolvedModelConfiguration, Toggle};
//! use model_config::{model_config, resolved_model_config};
//!
//! const RESOLVED: ResolvedModelConfiguration = resolved_model_config!(model_config!(
//!     ConfigurationOption::Benchmark(Toggle::Enabled),
//!     ConfigurationOption::MaxContextLength(2048),
//! ));
//!
//! assert_eq!(RESOLVED.max_prompt_length(), 1024);
//! ```
//!
//! ```compile_fail,E0080
//! use model_config::model::{ConfigurationOption, Toggle};
//! use model_config::model_config;
//!
//! // Two dev options: rejected while compiling.
//! let configuration = model_config!(
//!     ConfigurationOption::Dev(Toggle::Disabled),
//!     ConfigurationOption::Dev(Toggle::Enabled),
//! );
//! ```
//!
//! ```compile_fail,E0080
//! use model_config::model::ConfigurationOption;
//! use model_config::{model_config, resolved_model_config};
//!
//! // Context length too short: rejected while compiling.
//! let resolved = resolved_model_config!(model_config!(ConfigurationOption::MaxContextLength(1)));
//! ```

mod configuration;
mod error;
pub mod integer_serde;
mod option;
mod resolved;

pub use configuration::ModelConfiguration;
pub use error::ModelConfigurationError;
pub use option::{
    parse_integer_value,
    ConfigurationOption,
    OptionKind,
    OptionParseError,
    Toggle,
    DISABLED,
    UNSET,
};
pub use resolved::{ceil_div, resolve_dependent_length, ResolvedModelConfiguration};


/// Builds a [`ModelConfiguration`][crate::model::ModelConfiguration] at compile time.
///
/// - `model_config!(option, ...)` applies the options over the default configuration.
/// - `model_config!(base; option, ...)` applies them over a const `base`.
///
/// Providing the same option kind twice is a compile error.
#[macro_export]
macro_rules! model_config {
    ($($option:expr),* $(,)?) => {
        $crate::model_config!($crate::model::ModelConfiguration::DEFAULT; $($option),*)
    };
    ($base:expr; $($option:expr),* $(,)?) => {{
        const CONFIGURATION: $crate::model::ModelConfiguration =
            match $crate::model::ModelConfiguration::try_with_options($base, &[$($option),*]) {
                Ok(configuration) => configuration,
                Err(error) => panic!("{}", error.summary()),
            };

        CONFIGURATION
    }};
}

/// Validates a const [`ModelConfiguration`][crate::model::ModelConfiguration]
/// at compile time, producing a
/// [`ResolvedModelConfiguration`][crate::model::ResolvedModelConfiguration].
///
/// An invalid configuration is a compile error.
#[macro_export]
macro_rules! resolved_model_config {
    ($configuration:expr) => {{
        const RESOLVED: $crate::model::ResolvedModelConfiguration =
            match $crate::model::ModelConfiguration::resolve($configuration) {
                Ok(resolved) => resolved,
                Err(error) => panic!("{}", error.summary()),
            };

        RESOLVED
    }};
}
