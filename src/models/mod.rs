//! Data structures: teams and pairings, points, match results, tournaments.

mod error;
mod kubb;
mod pairing;
mod points;
mod result;
mod tournament;

pub use error::{JoustError, Result};
pub use kubb::KubbResult;
pub use pairing::{ensure_unique, Pairing, Round, Team};
pub use points::{Points, Scoring, TwoPoints};
pub use result::{GoalScore, MatchResult, Outcome};
pub use tournament::{
    ExtraMatch, ExtraMatchId, GroupPhase, KoPhase, Phase, PhaseId, Scheduler, TieBreakerId,
    Tournament, TournamentId, TournamentPhase,
};
