//! Editor defaults parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use crate::consts::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR};
use crate::controller::FontState;
use crate::error::EditorError;

pub const FONT_FAMILY_VAR: &str = "SKETCHPAD_FONT_FAMILY";
pub const FONT_SIZE_VAR: &str = "SKETCHPAD_FONT_SIZE";
pub const TEXT_COLOR_VAR: &str = "SKETCHPAD_TEXT_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub font_family: String,
    pub font_size: i64,
    pub text_color: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }
}

impl EditorConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `SKETCHPAD_FONT_FAMILY`: default `Arial`
    /// - `SKETCHPAD_FONT_SIZE`: positive integer, default 12
    /// - `SKETCHPAD_TEXT_COLOR`: default `black`
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` when the font size is not a positive integer.
    pub fn from_env() -> Result<Self, EditorError> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Same as [`Self::from_env`] but reads through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` when the font size is not a positive integer or
    /// a variable holds non-Unicode data.
    pub fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<Self, EditorError> {
        let defaults = Self::default();
        let font_family = setting(&lookup, FONT_FAMILY_VAR)?.unwrap_or(defaults.font_family);
        let text_color = setting(&lookup, TEXT_COLOR_VAR)?.unwrap_or(defaults.text_color);
        let font_size = match setting(&lookup, FONT_SIZE_VAR)? {
            Some(raw) => parse_font_size(&raw)?,
            None => defaults.font_size,
        };
        Ok(Self { font_family, font_size, text_color })
    }

    /// Ambient font state seeded into the property panel.
    #[must_use]
    pub fn font_state(&self) -> FontState {
        FontState {
            family: self.font_family.clone(),
            size: self.font_size.to_string(),
            color: self.text_color.clone(),
        }
    }
}

/// A trimmed, non-blank value for `key`. Unset and blank both mean "use the
/// default".
fn setting(lookup: impl Fn(&str) -> Result<String, VarError>, key: &str) -> Result<Option<String>, EditorError> {
    match lookup(key) {
        Ok(raw) => {
            let value = raw.trim();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(EditorError::ConfigParse(format!("{key} is not valid unicode"))),
    }
}

fn parse_font_size(raw: &str) -> Result<i64, EditorError> {
    match raw.parse::<i64>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(EditorError::ConfigParse(format!("{FONT_SIZE_VAR} must be a positive integer, got '{raw}'"))),
    }
}
