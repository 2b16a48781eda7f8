//! Deciding a tie between two teams: a rematch or a coin toss.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{JoustError, MatchResult, Outcome, Result};

/// 50/50 coin toss, `true` for heads.
pub fn toss_coin<G: Rng + ?Sized>(rng: &mut G) -> bool {
    rng.gen_bool(0.5)
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TieBreaker<T, R> {
    /// The two teams play again; needs a result that is not a draw.
    Rematch {
        team_one: T,
        team_two: T,
        result: Option<R>,
    },
    /// Decided once, when the breaker is created.
    Coin {
        team_one: T,
        team_two: T,
        outcome: Outcome,
    },
}

impl<T, R: MatchResult> TieBreaker<T, R> {
    pub fn rematch(team_one: T, team_two: T) -> Self {
        TieBreaker::Rematch {
            team_one,
            team_two,
            result: None,
        }
    }

    pub fn coin<G: Rng + ?Sized>(team_one: T, team_two: T, rng: &mut G) -> Self {
        let outcome = if toss_coin(rng) {
            Outcome::First
        } else {
            Outcome::Second
        };
        TieBreaker::Coin {
            team_one,
            team_two,
            outcome,
        }
    }

    pub fn teams(&self) -> (&T, &T) {
        match self {
            TieBreaker::Rematch {
                team_one, team_two, ..
            }
            | TieBreaker::Coin {
                team_one, team_two, ..
            } => (team_one, team_two),
        }
    }

    /// Stores the rematch result. A coin toss can't take a result.
    pub fn set_result(&mut self, new_result: R) -> Result<()> {
        match self {
            TieBreaker::Rematch { result, .. } => {
                *result = Some(new_result);
                Ok(())
            }
            TieBreaker::Coin { .. } => Err(JoustError::InvalidArgument(
                "a coin toss has no result to set".to_string(),
            )),
        }
    }

    /// `First` or `Second`, never `Draw`.
    pub fn break_tie(&self) -> Result<Outcome> {
        match self {
            TieBreaker::Rematch { result: None, .. } => Err(JoustError::InvalidArgument(
                "no result set for rematch".to_string(),
            )),
            TieBreaker::Rematch {
                result: Some(result),
                ..
            } => match result.winner() {
                Outcome::Draw => Err(JoustError::InvalidArgument(
                    "result for rematch is a draw".to_string(),
                )),
                decided => Ok(decided),
            },
            TieBreaker::Coin { outcome, .. } => Ok(*outcome),
        }
    }

    pub fn winner(&self) -> Result<&T> {
        let (one, two) = self.teams();
        Ok(match self.break_tie()? {
            Outcome::First => one,
            _ => two,
        })
    }
}
