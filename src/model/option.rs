use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;


/// Integer option value meaning "not explicitly set, use the computed default".
pub const UNSET: u64 = u64::MAX;

/// Integer option value meaning "disabled".
pub const DISABLED: u64 = 0;


/// The semantic category of a configuration option.
///
/// Each kind maps to exactly one field of
/// [`ModelConfiguration`][super::ModelConfiguration].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OptionKind {
    Exceptions,
    MaxContextLength,
    MaxPromptLength,
    MaxGenerationLength,
    MaxBatchSize,
    GpuCount,
    GpuRank,
    Benchmark,
    Dev,
}

impl OptionKind {
    /// Every option kind, in canonical (field) order.
    pub const ALL: [OptionKind; 9] = [
        OptionKind::Exceptions,
        OptionKind::MaxContextLength,
        OptionKind::MaxPromptLength,
        OptionKind::MaxGenerationLength,
        OptionKind::MaxBatchSize,
        OptionKind::GpuCount,
        OptionKind::GpuRank,
        OptionKind::Benchmark,
        OptionKind::Dev,
    ];

    /// Kebab-case key of this option, as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            OptionKind::Exceptions => "exceptions",
            OptionKind::MaxContextLength => "max-context-length",
            OptionKind::MaxPromptLength => "max-prompt-length",
            OptionKind::MaxGenerationLength => "max-generation-length",
            OptionKind::MaxBatchSize => "max-batch-size",
            OptionKind::GpuCount => "gpu-count",
            OptionKind::GpuRank => "gpu-rank",
            OptionKind::Benchmark => "benchmark",
            OptionKind::Dev => "dev",
        }
    }

    /// Whether values of this kind are two-state flags (as opposed to integers).
    pub const fn is_flag(self) -> bool {
        matches!(
            self,
            OptionKind::Exceptions | OptionKind::Benchmark | OptionKind::Dev
        )
    }

    /// Position of this kind in [`OptionKind::ALL`].
    ///
    /// Usable in const contexts, where `PartialEq` is not.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Display for OptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptionKind {
    type Err = OptionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized_key = value.trim().to_ascii_lowercase().replace('_', "-");

        OptionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized_key)
            .ok_or_else(|| OptionParseError::UnknownKey {
                key: value.trim().to_string(),
            })
    }
}


/// Two-state flag value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Toggle {
    #[default]
    Disabled,
    Enabled,
}

impl Toggle {
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Toggle::Enabled
        } else {
            Toggle::Disabled
        }
    }

    pub const fn is_enabled(self) -> bool {
        matches!(self, Toggle::Enabled)
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Toggle::from_bool(value)
    }
}

impl From<Toggle> for bool {
    fn from(value: Toggle) -> Self {
        value.is_enabled()
    }
}

impl Display for Toggle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::Disabled => f.write_str("disabled"),
            Toggle::Enabled => f.write_str("enabled"),
        }
    }
}

impl FromStr for Toggle {
    type Err = OptionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "enabled" | "true" | "on" | "yes" | "1" => Ok(Toggle::Enabled),
            "disabled" | "false" | "off" | "no" | "0" => Ok(Toggle::Disabled),
            _ => Err(OptionParseError::InvalidToggle {
                value: value.trim().to_string(),
            }),
        }
    }
}


/// Parses an integer option value: a decimal `u64`, `unset` ([`UNSET`])
/// or `disabled` ([`DISABLED`]).
pub fn parse_integer_value(value: &str) -> Option<u64> {
    match value.trim().to_ascii_lowercase().as_str() {
        "unset" => Some(UNSET),
        "disabled" => Some(DISABLED),
        other => other.parse::<u64>().ok(),
    }
}


/// A single recognized setting, tagged with its kind.
///
/// Applying an option only ever touches the field of its own kind,
/// so any set of options with distinct kinds can be applied in any order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ConfigurationOption {
    Exceptions(Toggle),
    MaxContextLength(u64),
    MaxPromptLength(u64),
    MaxGenerationLength(u64),
    MaxBatchSize(u64),
    GpuCount(u64),
    GpuRank(u64),
    Benchmark(Toggle),
    Dev(Toggle),
}

impl ConfigurationOption {
    pub const fn kind(&self) -> OptionKind {
        match self {
            ConfigurationOption::Exceptions(_) => OptionKind::Exceptions,
            ConfigurationOption::MaxContextLength(_) => OptionKind::MaxContextLength,
            ConfigurationOption::MaxPromptLength(_) => OptionKind::MaxPromptLength,
            ConfigurationOption::MaxGenerationLength(_) => OptionKind::MaxGenerationLength,
            ConfigurationOption::MaxBatchSize(_) => OptionKind::MaxBatchSize,
            ConfigurationOption::GpuCount(_) => OptionKind::GpuCount,
            ConfigurationOption::GpuRank(_) => OptionKind::GpuRank,
            ConfigurationOption::Benchmark(_) => OptionKind::Benchmark,
            ConfigurationOption::Dev(_) => OptionKind::Dev,
        }
    }

    /// Builds a flag option of the given kind.
    ///
    /// Returns `None` if `kind` is an integer option.
    pub const fn flag(kind: OptionKind, value: Toggle) -> Option<Self> {
        match kind {
            OptionKind::Exceptions => Some(ConfigurationOption::Exceptions(value)),
            OptionKind::Benchmark => Some(ConfigurationOption::Benchmark(value)),
            OptionKind::Dev => Some(ConfigurationOption::Dev(value)),
            _ => None,
        }
    }

    /// Builds an integer option of the given kind.
    ///
    /// Returns `None` if `kind` is a flag option.
    pub const fn integer(kind: OptionKind, value: u64) -> Option<Self> {
        match kind {
            OptionKind::MaxContextLength => Some(ConfigurationOption::MaxContextLength(value)),
            OptionKind::MaxPromptLength => Some(ConfigurationOption::MaxPromptLength(value)),
            OptionKind::MaxGenerationLength => {
                Some(ConfigurationOption::MaxGenerationLength(value))
            }
            OptionKind::MaxBatchSize => Some(ConfigurationOption::MaxBatchSize(value)),
            OptionKind::GpuCount => Some(ConfigurationOption::GpuCount(value)),
            OptionKind::GpuRank => Some(ConfigurationOption::GpuRank(value)),
            _ => None,
        }
    }
}

impl Display for ConfigurationOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let key = self.kind().name();

        match *self {
            ConfigurationOption::Exceptions(value)
            | ConfigurationOption::Benchmark(value)
            | ConfigurationOption::Dev(value) => write!(f, "{key}={value}"),
            ConfigurationOption::MaxContextLength(value)
            | ConfigurationOption::MaxPromptLength(value)
            | ConfigurationOption::MaxGenerationLength(value)
            | ConfigurationOption::MaxBatchSize(value)
            | ConfigurationOption::GpuCount(value)
            | ConfigurationOption::GpuRank(value) => {
                if value == UNSET {
                    write!(f, "{key}=unset")
                } else {
                    write!(f, "{key}={value}")
                }
            }
        }
    }
}

impl FromStr for ConfigurationOption {
    type Err = OptionParseError;

    /// Parses `key=value`, e.g. `max-batch-size=23` or `dev=enabled`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let Some((raw_key, raw_value)) = input.split_once('=') else {
            return Err(OptionParseError::MissingValue {
                input: input.to_string(),
            });
        };

        let kind = raw_key.parse::<OptionKind>()?;
        let raw_value = raw_value.trim();

        if kind.is_flag() {
            let value = raw_value
                .parse::<Toggle>()
                .map_err(|_| OptionParseError::InvalidFlagValue {
                    kind,
                    value: raw_value.to_string(),
                })?;

            return ConfigurationOption::flag(kind, value).ok_or_else(|| {
                OptionParseError::UnknownKey {
                    key: raw_key.to_string(),
                }
            });
        }


        let value = parse_integer_value(raw_value).ok_or_else(|| {
            OptionParseError::InvalidIntegerValue {
                kind,
                value: raw_value.to_string(),
            }
        })?;

        ConfigurationOption::integer(kind, value).ok_or_else(|| OptionParseError::UnknownKey {
            key: raw_key.to_string(),
        })
    }
}


/// Failure to parse a textual `key=value` option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionParseError {
    #[error("unknown option \"{key}\" (expected one of: {})", known_option_names())]
    UnknownKey { key: String },

    #[error("option \"{input}\" has no value, expected the form key=value")]
    MissingValue { input: String },

    #[error("invalid flag value \"{value}\", expected enabled or disabled")]
    InvalidToggle { value: String },

    #[error("invalid value \"{value}\" for flag option {kind}, expected enabled or disabled")]
    InvalidFlagValue { kind: OptionKind, value: String },

    #[error(
        "invalid value \"{value}\" for option {kind}, \
        expected an unsigned integer, \"unset\" or \"disabled\""
    )]
    InvalidIntegerValue { kind: OptionKind, value: String },
}

fn known_option_names() -> String {
    OptionKind::ALL
        .iter()
        .map(|kind| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}
