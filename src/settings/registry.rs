//! Settings registry
//! Resolves option names and applies `name=value` assignments through descriptors

use super::descriptor::{SettingDescriptor, SettingError, SettingType};
use std::fmt::Write;

/// The descriptor table for one options struct
pub struct SettingsRegistry<T: 'static> {
    settings: &'static [SettingDescriptor<T>],
}

impl<T: 'static> Clone for SettingsRegistry<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SettingsRegistry<T> {}

impl<T: 'static> SettingsRegistry<T> {
    #[must_use]
    pub const fn new(descriptors: &'static [SettingDescriptor<T>]) -> Self {
        SettingsRegistry {
            settings: descriptors,
        }
    }

    /// Find a descriptor by canonical name or alias, ignoring case
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&'static SettingDescriptor<T>> {
        let name = name.trim().to_ascii_lowercase();
        self.settings
            .iter()
            .find(|d| d.name == name || d.aliases.iter().any(|a| *a == name))
    }

    /// Set one option by name from its string value
    pub fn set(&self, name: &str, value: &str, target: &mut T) -> Result<(), SettingError> {
        let desc = self
            .resolve(name)
            .ok_or_else(|| SettingError::Unknown(name.trim().to_string()))?;
        let value = desc.ty.parse(desc.name, value)?;
        (desc.set)(target, value);
        Ok(())
    }

    /// Apply a single `name=value` assignment
    ///
    /// A bare flag name (`linenumbers`) turns it on, `noname` turns it off.
    pub fn apply(&self, assignment: &str, target: &mut T) -> Result<(), SettingError> {
        if let Some((name, value)) = assignment.split_once('=') {
            return self.set(name, value, target);
        }

        let name = assignment.trim();
        if let Some(desc) = self.resolve(name) {
            // A count given without a value is rejected by its parser
            let value = if desc.ty == SettingType::Flag { "on" } else { "" };
            return self.set(name, value, target);
        }
        match name.strip_prefix("no") {
            Some(rest) if self.resolve(rest).is_some() => self.set(rest, "off", target),
            _ => Err(SettingError::Unknown(name.to_string())),
        }
    }

    /// Apply a comma separated list of assignments, stopping at the first error
    pub fn apply_list(&self, list: &str, target: &mut T) -> Result<(), SettingError> {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .try_for_each(|item| self.apply(item, target))
    }

    /// One line per option: spellings, accepted values and summary
    #[must_use]
    pub fn help(&self) -> String {
        let mut out = String::new();
        for desc in self.settings {
            let mut names = desc.name.to_string();
            for alias in desc.aliases {
                names.push_str(", ");
                names.push_str(alias);
            }
            let _ = writeln!(out, "  {names:<22} {:<10} {}", desc.ty.hint(), desc.summary);
        }
        out
    }
}
