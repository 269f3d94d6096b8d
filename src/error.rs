//! # Error Types
//!
//! This module defines the error type for the songsheet engine.
//!
//! The engine sits on a save/import path, so almost nothing here is fatal:
//! parsers catch `InvalidChordToken` internally and degrade the offending
//! token to plain lyric text. Empty input to detection and missing fingering
//! diagrams are expected states and are modelled as absent values
//! (`Option`), not errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// A chord-shaped token does not start with a note letter A-G.
    ///
    /// # Example
    /// ```
    /// # use songsheet::{Chord, SheetError};
    /// let err = Chord::parse("H7").unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid chord token 'H7': expected a note letter A-G"
    /// );
    /// ```
    #[error("invalid chord token '{token}': expected a note letter A-G")]
    InvalidChordToken { token: String },
}
