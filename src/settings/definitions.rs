//! Settings definitions
//! The option struct and its declarative descriptor table

use super::descriptor::{SettingDescriptor, SettingType, SettingValue};
use super::registry::SettingsRegistry;
use crate::constants::defaults;
use std::time::Duration;

/// Options that shape editing and rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Columns between tab stops
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses required to quit with unsaved changes
    pub quit_times: usize,
    /// Seconds a status message stays visible
    pub message_timeout: u64,
    /// Draw a line number gutter
    pub line_numbers: bool,
    /// Enable syntax highlighting
    pub syntax: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        EditorOptions {
            tab_stop: defaults::TAB_STOP,
            quit_times: defaults::QUIT_TIMES,
            message_timeout: defaults::MESSAGE_TIMEOUT,
            line_numbers: false,
            syntax: true,
        }
    }
}

impl EditorOptions {
    #[must_use]
    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.message_timeout)
    }
}

fn set_tab_stop(options: &mut EditorOptions, value: SettingValue) {
    options.tab_stop = value.as_count();
}

fn set_quit_times(options: &mut EditorOptions, value: SettingValue) {
    options.quit_times = value.as_count();
}

fn set_message_timeout(options: &mut EditorOptions, value: SettingValue) {
    options.message_timeout = value.as_count() as u64;
}

fn set_line_numbers(options: &mut EditorOptions, value: SettingValue) {
    options.line_numbers = value.as_flag();
}

fn set_syntax(options: &mut EditorOptions, value: SettingValue) {
    options.syntax = value.as_flag();
}

const EDITOR_SETTINGS: &[SettingDescriptor<EditorOptions>] = &[
    SettingDescriptor {
        name: "tabstop",
        aliases: &["ts"],
        summary: "Columns between tab stops",
        ty: SettingType::Count { min: 1, max: 32 },
        set: set_tab_stop,
    },
    SettingDescriptor {
        name: "quittimes",
        aliases: &["qt"],
        summary: "Extra Ctrl-Q presses needed to quit with unsaved changes",
        ty: SettingType::Count { min: 0, max: 100 },
        set: set_quit_times,
    },
    SettingDescriptor {
        name: "messagetimeout",
        aliases: &["mt"],
        summary: "Seconds a status message stays visible",
        ty: SettingType::Count { min: 1, max: 3600 },
        set: set_message_timeout,
    },
    SettingDescriptor {
        name: "linenumbers",
        aliases: &["nu", "number"],
        summary: "Show a line number gutter",
        ty: SettingType::Flag,
        set: set_line_numbers,
    },
    SettingDescriptor {
        name: "syntax",
        aliases: &["syn"],
        summary: "Enable syntax highlighting",
        ty: SettingType::Flag,
        set: set_syntax,
    },
];

#[must_use]
pub fn create_settings_registry() -> SettingsRegistry<EditorOptions> {
    SettingsRegistry::new(EDITOR_SETTINGS)
}
