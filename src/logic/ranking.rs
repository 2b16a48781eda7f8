//! Ranking policies: optional secondary keys that break ties on points.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::models::{GoalScore, KubbResult, Pairing, Team};

/// Recorded results of a match table, `None` for matches not yet played.
pub type Results<T, R> = HashMap<Pairing<T>, Option<R>>;

/// Picked when a table is built; decides the secondary ranking key.
///
/// Teams are ordered by points, then by this key (higher ranks better), then
/// by identifier. Teams only share a rank group when points and key agree.
pub trait RankingPolicy<T, R>: Debug + Send + Sync {
    /// Secondary key per team, or `None` to rank on points alone.
    fn tie_break_keys(&self, teams: &[T], results: &Results<T, R>) -> Option<HashMap<T, i64>>;
}

/// Points first, identifier second.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRanking;

impl<T, R> RankingPolicy<T, R> for DefaultRanking {
    fn tie_break_keys(&self, _teams: &[T], _results: &Results<T, R>) -> Option<HashMap<T, i64>> {
        None
    }
}

/// Equal points are split by total goals scored, more is better.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoalsRanking;

impl<T: Team> RankingPolicy<T, GoalScore> for GoalsRanking {
    fn tie_break_keys(
        &self,
        teams: &[T],
        results: &Results<T, GoalScore>,
    ) -> Option<HashMap<T, i64>> {
        let mut goals: HashMap<T, i64> = teams.iter().map(|t| (t.clone(), 0)).collect();
        for (pairing, score) in results {
            let Some(score) = score else { continue };
            if let Some(g) = goals.get_mut(&pairing.first) {
                *g += i64::from(score.goals_one);
            }
            if let Some(g) = goals.get_mut(&pairing.second) {
                *g += i64::from(score.goals_two);
            }
        }
        Some(goals)
    }
}

/// Equal points are split by kubbs left standing over all matches; fewer
/// remaining pieces ranks better, so the key is the negated sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct KubbRanking;

impl<T: Team> RankingPolicy<T, KubbResult> for KubbRanking {
    fn tie_break_keys(
        &self,
        teams: &[T],
        results: &Results<T, KubbResult>,
    ) -> Option<HashMap<T, i64>> {
        let mut left: HashMap<T, i64> = teams.iter().map(|t| (t.clone(), 0)).collect();
        for (pairing, result) in results {
            let Some(result) = result else { continue };
            if let (Some(count), Some(l)) = (result.first, left.get_mut(&pairing.first)) {
                *l += i64::from(count);
            }
            if let (Some(count), Some(l)) = (result.second, left.get_mut(&pairing.second)) {
                *l += i64::from(count);
            }
        }
        Some(left.into_iter().map(|(team, sum)| (team, -sum)).collect())
    }
}
