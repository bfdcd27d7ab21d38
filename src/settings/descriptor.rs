//! Option descriptors
//! One static entry per option: its spellings, the values it takes and where it is stored

use crate::constants::errors;
use crate::error::{ErrorKind, FlitError};
use std::fmt;

/// Values an option accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingType {
    /// `on/off`, `true/false`, `yes/no` or `1/0`; a bare name means on
    Flag,
    /// Whole number within inclusive bounds
    Count { min: usize, max: usize },
}

/// A value that passed its option's checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Count(usize),
}

impl SettingValue {
    #[must_use]
    pub fn as_flag(self) -> bool {
        match self {
            SettingValue::Flag(on) => on,
            SettingValue::Count(n) => n != 0,
        }
    }

    #[must_use]
    pub fn as_count(self) -> usize {
        match self {
            SettingValue::Count(n) => n,
            SettingValue::Flag(on) => usize::from(on),
        }
    }
}

impl SettingType {
    /// Parse and bounds-check `raw` as the value of option `name`
    pub fn parse(self, name: &'static str, raw: &str) -> Result<SettingValue, SettingError> {
        let raw = raw.trim();
        let bad_value = || SettingError::BadValue {
            name,
            value: raw.to_string(),
        };
        match self {
            SettingType::Flag => match raw.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" | "1" => Ok(SettingValue::Flag(true)),
                "off" | "false" | "no" | "0" => Ok(SettingValue::Flag(false)),
                _ => Err(bad_value()),
            },
            SettingType::Count { min, max } => {
                let value: usize = raw.parse().map_err(|_| bad_value())?;
                if (min..=max).contains(&value) {
                    Ok(SettingValue::Count(value))
                } else {
                    Err(SettingError::OutOfRange {
                        name,
                        value,
                        min,
                        max,
                    })
                }
            }
        }
    }

    /// Value placeholder for help output
    #[must_use]
    pub fn hint(self) -> String {
        match self {
            SettingType::Flag => "on|off".to_string(),
            SettingType::Count { min, max } => format!("{min}..{max}"),
        }
    }
}

/// Why an option assignment was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    /// The value does not parse as the option's type
    BadValue { name: &'static str, value: String },
    /// A count outside the option's bounds
    OutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
    /// No option has this name or alias
    Unknown(String),
}

impl SettingError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SettingError::BadValue { .. } => errors::SETTING_VALUE,
            SettingError::OutOfRange { .. } => errors::SETTING_RANGE,
            SettingError::Unknown(_) => errors::UNKNOWN_SETTING,
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::BadValue { name, value } => {
                write!(f, "{name}: '{value}' is not a valid value")
            }
            SettingError::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name}: {value} is outside {min}..{max}"),
            SettingError::Unknown(name) => write!(f, "unknown option '{name}'"),
        }
    }
}

impl std::error::Error for SettingError {}

impl From<SettingError> for FlitError {
    fn from(err: SettingError) -> Self {
        FlitError::error(ErrorKind::Settings, err.code(), err.to_string())
    }
}

/// Store a checked value into the options
pub type SettingSetter<T> = fn(&mut T, SettingValue);

/// Static description of one option
#[derive(Debug)]
pub struct SettingDescriptor<T: 'static> {
    /// Canonical name (`tabstop`)
    pub name: &'static str,
    /// Short spellings (`ts`)
    pub aliases: &'static [&'static str],
    /// One line shown by `flit --help`
    pub summary: &'static str,
    pub ty: SettingType,
    pub set: SettingSetter<T>,
}
