use thiserror::Error;

/// Errors originating from the character brightness matcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The active character set is empty; no brightness query can be answered.
    #[error("character set is empty")]
    EmptyCharset,
}

/// Errors originating from the conversion engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Fewer than two characters in the active set; a conversion needs at
    /// least two brightness levels to be meaningful.
    #[error("charset too small: have {have} character(s), need at least 2")]
    CharsetTooSmall {
        /// Number of characters currently in the active set.
        have: usize,
    },

    /// Requested resolution falls outside the bounds derived from the
    /// source image. The previous resolution is left untouched.
    #[error("resolution {requested} out of range [{min}, {max}]")]
    ResolutionOutOfRange {
        /// The rejected value.
        requested: u32,
        /// Lower bound, inclusive.
        min: u32,
        /// Upper bound, inclusive.
        max: u32,
    },

    /// A matcher-level failure surfaced through the engine.
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Errors from parsing a character specification (`a`, `a-z`, `all`, `space`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The argument does not name a character, range, or keyword.
    #[error("malformed character spec: {0:?}")]
    Malformed(String),
}
