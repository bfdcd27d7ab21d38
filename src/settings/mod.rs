//! Editor configuration
//! Declarative registry of `name=value` options applied at startup

pub mod definitions;
pub mod descriptor;
pub mod registry;

pub use definitions::{create_settings_registry, EditorOptions};
pub use descriptor::{SettingDescriptor, SettingError, SettingSetter, SettingType, SettingValue};
pub use registry::SettingsRegistry;
