//! Point values accumulated in tables and the schemes that award them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::ops::Add;

/// A score value a table can accumulate.
///
/// `Ord` must rank better scores higher.
pub trait Points: Copy + Debug + Eq + Ord + Add<Output = Self> {
    /// Starting value for every team.
    fn zero() -> Self;
}

impl Points for i64 {
    fn zero() -> Self {
        0
    }
}

/// Plus and minus points.
///
/// More plus points always wins; on equal plus points fewer minus points wins.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TwoPoints {
    pub plus: i64,
    pub minus: i64,
}

impl TwoPoints {
    pub fn new(plus: i64, minus: i64) -> Self {
        Self { plus, minus }
    }
}

impl Ord for TwoPoints {
    fn cmp(&self, other: &Self) -> Ordering {
        self.plus
            .cmp(&other.plus)
            .then_with(|| other.minus.cmp(&self.minus))
    }
}

impl PartialOrd for TwoPoints {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for TwoPoints {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.plus + other.plus, self.minus + other.minus)
    }
}

impl fmt::Display for TwoPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.plus, self.minus)
    }
}

impl Points for TwoPoints {
    fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Points handed out per outcome: winner, both sides on a draw, loser.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoring<S> {
    pub win: S,
    pub draw: S,
    pub lose: S,
}

impl<S> Scoring<S> {
    pub fn new(win: S, draw: S, lose: S) -> Self {
        Self { win, draw, lose }
    }
}

impl Scoring<i64> {
    /// 3 for a win, 1 for a draw, 0 for a loss.
    pub fn three_points() -> Self {
        Self::new(3, 1, 0)
    }
}

impl Scoring<TwoPoints> {
    /// 2:0 for a win, 1:1 for a draw, 0:2 for a loss.
    pub fn two_points() -> Self {
        Self::new(
            TwoPoints::new(2, 0),
            TwoPoints::new(1, 1),
            TwoPoints::new(0, 2),
        )
    }
}

impl Default for Scoring<i64> {
    fn default() -> Self {
        Self::three_points()
    }
}
