//! Team identifiers, pairings and rounds.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::models::error::{JoustError, Result};

/// Anything usable as a team identifier: names, numeric ids, uuids.
pub trait Team: Clone + Debug + Eq + Hash + Ord {}

impl<T: Clone + Debug + Eq + Hash + Ord> Team for T {}

/// A scheduled match between two teams.
///
/// Orientation matters: a score "a:b" recorded for `Pairing { first, second }`
/// means `first` scored `a`. `(x, y)` and `(y, x)` are different pairings.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Pairing<T> {
    pub first: T,
    pub second: T,
}

/// Pairings that can be played concurrently: no team appears twice.
pub type Round<T> = Vec<Pairing<T>>;

impl<T> Pairing<T> {
    pub fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// The same match seen from the other side.
    pub fn reversed(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

impl<T: PartialEq> Pairing<T> {
    pub fn contains(&self, team: &T) -> bool {
        self.first == *team || self.second == *team
    }
}

impl<T: Ord + Clone> Pairing<T> {
    /// Orientation-free form, smaller team first.
    pub fn unordered(&self) -> (T, T) {
        if self.first <= self.second {
            (self.first.clone(), self.second.clone())
        } else {
            (self.second.clone(), self.first.clone())
        }
    }
}

impl<T> From<(T, T)> for Pairing<T> {
    fn from((first, second): (T, T)) -> Self {
        Self::new(first, second)
    }
}

/// Fails with `InvalidArgument` if any team occurs more than once.
pub fn ensure_unique<T: Team>(teams: &[T]) -> Result<()> {
    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if !seen.insert(team) {
            return Err(JoustError::InvalidArgument(format!(
                "duplicate team {:?}",
                team
            )));
        }
    }
    Ok(())
}
