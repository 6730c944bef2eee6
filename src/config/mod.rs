//! Configuration module for Lectern.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, TaskPrompts};
pub use settings::{
    ArxivSettings, ComposioSettings, GeneralSettings, ModelSettings, PromptSettings,
    SearchSettings, ServerSettings, Settings,
};
