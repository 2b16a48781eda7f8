//! The single error type shared by every engine.

use thiserror::Error;

/// Errors raised by grouping, tables, brackets and the Swiss pairer.
///
/// All of them signal caller misuse or bad input; none is transient.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum JoustError {
    /// Malformed construction input (bracket size, duplicate teams, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A team that is not part of the table or bracket.
    #[error("unknown team: {0}")]
    UnknownTeam(String),
    /// A pairing or node pair that is not part of the fixed schedule.
    #[error("unknown match: {0}")]
    UnknownMatch(String),
    /// Score string syntax or numeric range violation.
    #[error("parse error: {0}")]
    ParseError(String),
    /// The Swiss pairer found no unplayed opponent for a team.
    #[error("no pairing possible: {0}")]
    NoPairing(String),
}

pub type Result<T> = std::result::Result<T, JoustError>;
