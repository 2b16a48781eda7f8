//! Point tables: team → points, sorted rankings and rank groups.
//!
//! [`Table`] only knows points and can be filled by hand. [`MatchTable`] owns
//! a fixed schedule, stores one optional result per scheduled pairing and
//! recomputes every team's points from scratch whenever a result changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::logic::ranking::{DefaultRanking, RankingPolicy, Results};
use crate::models::{
    ensure_unique, JoustError, MatchResult, Outcome, Pairing, Points, Result, Scoring, Team,
    TwoPoints,
};

/// One line of a sorted ranking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing<T, S> {
    pub team: T,
    pub points: S,
    /// Secondary key from the table's ranking policy, if it has one.
    pub tie_break: Option<i64>,
}

/// Teams sharing the same points (and the same secondary key).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankGroup<T, S> {
    pub points: S,
    pub tie_break: Option<i64>,
    pub teams: Vec<T>,
}

/// Team → points, without any notion of matches.
#[derive(Clone, Debug)]
pub struct Table<T, S> {
    teams: Vec<T>,
    points: HashMap<T, S>,
}

impl<T: Team, S: Points> Table<T, S> {
    /// Every team starts at `S::zero()`. Fails on duplicate teams.
    pub fn new(teams: &[T]) -> Result<Self> {
        ensure_unique(teams)?;
        Ok(Self {
            teams: teams.to_vec(),
            points: teams.iter().map(|t| (t.clone(), S::zero())).collect(),
        })
    }

    /// Teams in construction order.
    pub fn teams(&self) -> &[T] {
        &self.teams
    }

    pub fn contains(&self, team: &T) -> bool {
        self.points.contains_key(team)
    }

    pub fn points(&self, team: &T) -> Option<S> {
        self.points.get(team).copied()
    }

    pub fn points_map(&self) -> &HashMap<T, S> {
        &self.points
    }

    pub fn check_exists(&self, teams: &[&T]) -> Result<()> {
        match teams.iter().find(|t| !self.contains(t)) {
            Some(missing) => Err(JoustError::UnknownTeam(format!("{:?}", missing))),
            None => Ok(()),
        }
    }

    pub fn set_points(&mut self, team: &T, points: S) -> Result<()> {
        let entry = self
            .points
            .get_mut(team)
            .ok_or_else(|| JoustError::UnknownTeam(format!("{:?}", team)))?;
        *entry = points;
        Ok(())
    }

    pub fn increase_points(&mut self, team: &T, by: S) -> Result<()> {
        let entry = self
            .points
            .get_mut(team)
            .ok_or_else(|| JoustError::UnknownTeam(format!("{:?}", team)))?;
        *entry = *entry + by;
        Ok(())
    }

    /// Back to `S::zero()` for every team.
    pub fn reset(&mut self) {
        for points in self.points.values_mut() {
            *points = S::zero();
        }
    }

    /// Highest points first; equal points in ascending identifier order.
    pub fn sorted_ranking(&self) -> Vec<Standing<T, S>> {
        self.sorted_with(None)
    }

    pub fn rank_groups(&self) -> Vec<RankGroup<T, S>> {
        group_standings(self.sorted_ranking())
    }

    fn sorted_with(&self, keys: Option<&HashMap<T, i64>>) -> Vec<Standing<T, S>> {
        let mut ranking: Vec<Standing<T, S>> = self
            .points
            .iter()
            .map(|(team, &points)| Standing {
                team: team.clone(),
                points,
                tie_break: keys.map(|k| k.get(team).copied().unwrap_or_default()),
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.tie_break.cmp(&a.tie_break))
                .then_with(|| a.team.cmp(&b.team))
        });
        ranking
    }
}

/// Splits a sorted ranking into consecutive groups of equal points and key.
pub fn group_standings<T, S: PartialEq>(ranking: Vec<Standing<T, S>>) -> Vec<RankGroup<T, S>> {
    let mut groups: Vec<RankGroup<T, S>> = Vec::new();
    for standing in ranking {
        match groups.last_mut() {
            Some(group)
                if group.points == standing.points && group.tie_break == standing.tie_break =>
            {
                group.teams.push(standing.team);
            }
            _ => groups.push(RankGroup {
                points: standing.points,
                tie_break: standing.tie_break,
                teams: vec![standing.team],
            }),
        }
    }
    groups
}

/// A table computed from a fixed schedule of matches.
///
/// The schedule is set at construction; results can be recorded, replaced or
/// cleared, but no pairing can be added later. Pairings are orientation
/// sensitive: a result for `(b, a)` is rejected if only `(a, b)` was
/// scheduled.
#[derive(Debug)]
pub struct MatchTable<T, R, S> {
    table: Table<T, S>,
    scoring: Scoring<S>,
    schedule: Vec<Pairing<T>>,
    results: Results<T, R>,
    policy: Box<dyn RankingPolicy<T, R>>,
}

impl<T: Team, R: MatchResult, S: Points> MatchTable<T, R, S> {
    /// Table ranked on points and identifier only.
    pub fn new(
        teams: &[T],
        schedule: impl IntoIterator<Item = Pairing<T>>,
        scoring: Scoring<S>,
    ) -> Result<Self> {
        Self::with_policy(teams, schedule, scoring, DefaultRanking)
    }

    /// Fails with `InvalidArgument` on duplicate teams and `UnknownTeam` if a
    /// scheduled pairing names a team outside `teams`.
    pub fn with_policy(
        teams: &[T],
        schedule: impl IntoIterator<Item = Pairing<T>>,
        scoring: Scoring<S>,
        policy: impl RankingPolicy<T, R> + 'static,
    ) -> Result<Self> {
        let table = Table::new(teams)?;
        let mut ordered = Vec::new();
        let mut results = HashMap::new();
        for pairing in schedule {
            table.check_exists(&[&pairing.first, &pairing.second])?;
            if results.insert(pairing.clone(), None).is_none() {
                ordered.push(pairing);
            }
        }
        Ok(Self {
            table,
            scoring,
            schedule: ordered,
            results,
            policy: Box::new(policy),
        })
    }

    pub fn table(&self) -> &Table<T, S> {
        &self.table
    }

    pub fn teams(&self) -> &[T] {
        self.table.teams()
    }

    pub fn scoring(&self) -> &Scoring<S> {
        &self.scoring
    }

    /// Scheduled pairings in construction order.
    pub fn schedule(&self) -> &[Pairing<T>] {
        &self.schedule
    }

    pub fn points(&self, team: &T) -> Option<S> {
        self.table.points(team)
    }

    pub fn points_map(&self) -> &HashMap<T, S> {
        self.table.points_map()
    }

    pub fn result(&self, first: &T, second: &T) -> Option<&R> {
        self.results
            .get(&Pairing::new(first.clone(), second.clone()))
            .and_then(Option::as_ref)
    }

    /// Scheduled pairings that have no result yet.
    pub fn pending(&self) -> impl Iterator<Item = &Pairing<T>> {
        self.schedule
            .iter()
            .filter(|p| matches!(self.results.get(*p), Some(None)))
    }

    pub fn is_complete(&self) -> bool {
        self.pending().next().is_none()
    }

    /// Records (or replaces) the result of a scheduled match and recomputes
    /// all points. Nothing changes on error.
    pub fn set_result(&mut self, first: &T, second: &T, result: R) -> Result<()> {
        *self.slot(first, second)? = Some(result);
        self.recompute();
        Ok(())
    }

    /// Parses `text` with the result type's parser, then calls [`set_result`].
    ///
    /// [`set_result`]: MatchTable::set_result
    pub fn set_result_from_str(&mut self, first: &T, second: &T, text: &str) -> Result<()> {
        let result: R = text.parse()?;
        self.set_result(first, second, result)
    }

    /// Forgets the result of a scheduled match.
    pub fn clear_result(&mut self, first: &T, second: &T) -> Result<()> {
        *self.slot(first, second)? = None;
        self.recompute();
        Ok(())
    }

    fn slot(&mut self, first: &T, second: &T) -> Result<&mut Option<R>> {
        self.table.check_exists(&[first, second])?;
        self.results
            .get_mut(&Pairing::new(first.clone(), second.clone()))
            .ok_or_else(|| JoustError::UnknownMatch(format!("{:?} vs {:?}", first, second)))
    }

    /// Resets every team to zero and folds in every recorded result.
    pub fn recompute(&mut self) {
        self.table.reset();
        let Scoring { win, draw, lose } = self.scoring;
        for pairing in &self.schedule {
            let Some(Some(result)) = self.results.get(pairing) else {
                continue;
            };
            let (first, second) = match result.winner() {
                Outcome::First => (win, lose),
                Outcome::Second => (lose, win),
                Outcome::Draw => (draw, draw),
            };
            for (team, delta) in [(&pairing.first, first), (&pairing.second, second)] {
                if let Some(points) = self.table.points.get_mut(team) {
                    *points = *points + delta;
                }
            }
        }
    }

    /// Overwrites a team's points directly. The next recompute discards it.
    pub fn set_points(&mut self, team: &T, points: S) -> Result<()> {
        self.table.set_points(team, points)
    }

    pub fn increase_points(&mut self, team: &T, by: S) -> Result<()> {
        self.table.increase_points(team, by)
    }

    /// Points descending, then the policy's key descending, then identifier.
    pub fn sorted_ranking(&self) -> Vec<Standing<T, S>> {
        let keys = self
            .policy
            .tie_break_keys(self.table.teams(), &self.results);
        self.table.sorted_with(keys.as_ref())
    }

    pub fn rank_groups(&self) -> Vec<RankGroup<T, S>> {
        group_standings(self.sorted_ranking())
    }
}

impl<T: Team, R: MatchResult> MatchTable<T, R, i64> {
    /// 3 points for a win, 1 for a draw, 0 for a loss.
    pub fn three_points(
        teams: &[T],
        schedule: impl IntoIterator<Item = Pairing<T>>,
    ) -> Result<Self> {
        Self::new(teams, schedule, Scoring::three_points())
    }
}

impl<T: Team, R: MatchResult> MatchTable<T, R, TwoPoints> {
    /// Plus/minus points: 2:0 for a win, 1:1 for a draw, 0:2 for a loss.
    pub fn two_points(
        teams: &[T],
        schedule: impl IntoIterator<Item = Pairing<T>>,
    ) -> Result<Self> {
        Self::new(teams, schedule, Scoring::two_points())
    }
}
