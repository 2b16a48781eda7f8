//! Match outcomes and the goal-based result type.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::models::error::{JoustError, Result};

/// Which side of a pairing won the match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    First,
    Second,
    Draw,
}

/// A finished match, comparable into an [`Outcome`] and parseable from its
/// canonical string form.
///
/// New sports add an implementation; tables and brackets only rely on
/// `winner` and `from_str`.
pub trait MatchResult: Clone + Debug + FromStr<Err = JoustError> {
    fn winner(&self) -> Outcome;
}

/// Goals (or any plain score) per side, e.g. "3:1".
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct GoalScore {
    pub goals_one: u32,
    pub goals_two: u32,
}

impl GoalScore {
    pub fn new(goals_one: u32, goals_two: u32) -> Self {
        Self {
            goals_one,
            goals_two,
        }
    }
}

impl MatchResult for GoalScore {
    fn winner(&self) -> Outcome {
        match self.goals_one.cmp(&self.goals_two) {
            std::cmp::Ordering::Greater => Outcome::First,
            std::cmp::Ordering::Less => Outcome::Second,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Accepts "a:b" with optional whitespace around both numbers and the colon.
impl FromStr for GoalScore {
    type Err = JoustError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || JoustError::ParseError(format!("must be of form \"a:b\", got {:?}", s));
        let (first, second) = s.split_once(':').ok_or_else(invalid)?;
        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(parse_count(first, s)?, parse_count(second, s)?))
    }
}

impl fmt::Display for GoalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.goals_one, self.goals_two)
    }
}

/// Parses a run of ASCII digits; signs, blanks and overflow are rejected.
pub(crate) fn parse_count(digits: &str, input: &str) -> Result<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(JoustError::ParseError(format!(
            "expected a non-negative integer in {:?}, got {:?}",
            input, digits
        )));
    }
    digits
        .parse()
        .map_err(|_| JoustError::ParseError(format!("number out of range in {:?}", input)))
}
