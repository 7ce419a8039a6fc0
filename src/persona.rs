//! Loading of the text blobs that shape the character.
//!
//! Both files are read once at startup and injected verbatim as system
//! entries of the chat history. A missing file is a fatal startup error.

use anyhow::{Context, Result};
use std::fs;

use crate::config::ContentConfig;

/// System instructions and character sheet text.
#[derive(Debug, Clone)]
pub struct Persona {
    pub instructions: String,
    pub character_sheet: String,
}

impl Persona {
    pub fn load(content: &ContentConfig) -> Result<Self> {
        let instructions = fs::read_to_string(&content.instructions).with_context(|| {
            format!(
                "Failed to read system instructions from {:?}",
                content.instructions
            )
        })?;
        let character_sheet = fs::read_to_string(&content.character_sheet).with_context(|| {
            format!(
                "Failed to read character sheet from {:?}",
                content.character_sheet
            )
        })?;
        tracing::debug!(
            instructions = instructions.len(),
            character_sheet = character_sheet.len(),
            "loaded persona"
        );
        Ok(Self {
            instructions,
            character_sheet,
        })
    }
}
