//! Flit - A small terminal text editor

pub mod command;
pub mod constants;
pub mod cursor;
pub mod document;
pub mod edit;
pub mod editor;
pub mod error;
pub mod input;
pub mod key;
pub mod render;
pub mod row;
pub mod search;
pub mod selection;
pub mod settings;
pub mod state;
pub mod status;
pub mod syntax;
pub mod term;
pub mod viewport;

#[cfg(test)]
pub mod test_utils;
