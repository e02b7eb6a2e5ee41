//! Rule configuration loaded from TOML.
//!
//! Every field has a standard-chess default, so an empty file (or no file at
//! all) yields [`RulesConfig::default()`]. A legacy profile reproduces the
//! older ply-counting and castling behaviour for compatibility with old
//! fixtures.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing rule configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Which castling rights a king move gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CastlingRevocation {
    /// The mover's kingside and queenside rights.
    #[default]
    OwnSide,
    /// All four rights, for both colors.
    AllSides,
}

/// Tunable rule parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RulesConfig {
    /// Plies without a capture or pawn move before the fifty-move draw.
    /// Defaults to 100.
    pub fifty_move_plies: u32,
    /// Defaults to [`CastlingRevocation::OwnSide`].
    pub castling_revocation: CastlingRevocation,
    /// When set, threefold repetition and the fifty-move rule only make a
    /// draw claimable; fivefold repetition and the seventy-five-move rule
    /// end the game automatically. Defaults to false (every draw automatic).
    pub claimable_draws: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            fifty_move_plies: 100,
            castling_revocation: CastlingRevocation::OwnSide,
            claimable_draws: false,
        }
    }
}

impl RulesConfig {
    /// File looked up in the working directory when no path is given.
    pub const DEFAULT_PATH: &'static str = "chess-rules.toml";

    /// Fifty half-moves and all-sides revocation.
    pub fn legacy() -> Self {
        RulesConfig {
            fifty_move_plies: 50,
            castling_revocation: CastlingRevocation::AllSides,
            claimable_draws: false,
        }
    }

    /// Threshold of the automatic seventy-five-move draw.
    #[inline]
    pub fn seventy_five_move_plies(&self) -> u32 {
        self.fifty_move_plies.saturating_mul(3) / 2
    }

    /// Parses a TOML document. Missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the document is not valid TOML
    /// or a value has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads [`Self::DEFAULT_PATH`] if it exists, defaults otherwise.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = PathBuf::from(Self::DEFAULT_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(RulesConfig::from_toml_str("").unwrap(), RulesConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = RulesConfig::from_toml_str("fifty-move-plies = 50\n").unwrap();
        assert_eq!(config.fifty_move_plies, 50);
        assert_eq!(config.castling_revocation, CastlingRevocation::OwnSide);
        assert!(!config.claimable_draws);
    }

    #[test]
    fn full_document() {
        let config = RulesConfig::from_toml_str(
            "fifty-move-plies = 50\ncastling-revocation = \"all-sides\"\nclaimable-draws = true\n",
        )
        .unwrap();
        assert_eq!(config.castling_revocation, CastlingRevocation::AllSides);
        assert!(config.claimable_draws);
        assert_eq!(config.seventy_five_move_plies(), 75);
    }

    #[test]
    fn huge_fifty_move_plies_does_not_overflow() {
        let config =
            RulesConfig::from_toml_str("fifty-move-plies = 4000000000\nclaimable-draws = true\n")
                .unwrap();
        assert_eq!(config.fifty_move_plies, 4_000_000_000);
        assert_eq!(config.seventy_five_move_plies(), u32::MAX / 2);
    }

    #[test]
    fn bad_value_is_parse_error() {
        let err = RulesConfig::from_toml_str("castling-revocation = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = RulesConfig::load("/nonexistent/chess-rules.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn legacy_profile() {
        let legacy = RulesConfig::legacy();
        assert_eq!(legacy.fifty_move_plies, 50);
        assert_eq!(legacy.castling_revocation, CastlingRevocation::AllSides);
    }
}
