//! Kubb results: remaining pieces per side, optionally ended by timeout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::error::{JoustError, Result};
use crate::models::result::{parse_count, MatchResult, Outcome};

/// Remaining kubbs for each side. At least one side is always present.
///
/// Fewer remaining pieces wins. An absent count ranks below any present one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct KubbResult {
    pub first: Option<u32>,
    pub second: Option<u32>,
    pub timeout: bool,
}

impl KubbResult {
    pub fn new(first: Option<u32>, second: Option<u32>, timeout: bool) -> Result<Self> {
        if first.is_none() && second.is_none() {
            return Err(JoustError::InvalidArgument(
                "at least one team must have remaining kubbs".to_string(),
            ));
        }
        Ok(Self {
            first,
            second,
            timeout,
        })
    }
}

impl MatchResult for KubbResult {
    fn winner(&self) -> Outcome {
        // Option orders None first, so an absent count counts as fewest pieces.
        match self.first.cmp(&self.second) {
            std::cmp::Ordering::Less => Outcome::First,
            std::cmp::Ordering::Greater => Outcome::Second,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Accepts "[timeout:]a:b" where either `a` or `b` (not both) may be empty.
impl FromStr for KubbResult {
    type Err = JoustError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || JoustError::ParseError(format!("invalid kubb result {:?}", s));
        let body = s.trim();
        let (timeout, body) = match body.strip_prefix("timeout:") {
            Some(rest) => (true, rest.trim_start()),
            None => (false, body),
        };
        let (first, second) = body.split_once(':').ok_or_else(invalid)?;
        if first.is_empty() && second.is_empty() {
            return Err(JoustError::ParseError(format!(
                "invalid kubb result {:?}, at least one team must have remaining kubbs",
                s
            )));
        }
        let side = |digits: &str| -> Result<Option<u32>> {
            if digits.is_empty() {
                Ok(None)
            } else {
                parse_count(digits, s).map(Some)
            }
        };
        Ok(Self {
            first: side(first)?,
            second: side(second)?,
            timeout,
        })
    }
}

impl fmt::Display for KubbResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.timeout {
            write!(f, "timeout:")?;
        }
        if let Some(first) = self.first {
            write!(f, "{}", first)?;
        }
        write!(f, ":")?;
        if let Some(second) = self.second {
            write!(f, "{}", second)?;
        }
        Ok(())
    }
}
