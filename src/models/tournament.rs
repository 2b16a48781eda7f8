//! Tournament, phases and their keyed collections.
//!
//! These containers only glue engines together: a group phase builds one
//! schedule and one match table per group, a knockout phase wraps a bracket.
//! Errors from the engines are passed through unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::logic::knockout::KoTree;
use crate::logic::ranking::{DefaultRanking, RankingPolicy};
use crate::logic::round_robin::{all_pairs, berger_table_rounds, circle_method_rounds};
use crate::logic::table::MatchTable;
use crate::logic::tie_break::TieBreaker;
use crate::models::error::{JoustError, Result};
use crate::models::pairing::{ensure_unique, Pairing, Round, Team};
use crate::models::points::{Points, Scoring};
use crate::models::result::MatchResult;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Key of a phase within a tournament.
pub type PhaseId = Uuid;

/// Key of a tie breaker within a phase.
pub type TieBreakerId = Uuid;

/// Key of an extra match within a phase.
pub type ExtraMatchId = Uuid;

/// How a group's matches are laid out in rounds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduler {
    /// Input order, one match per round.
    Flat,
    #[default]
    Circle,
    Berger,
}

impl Scheduler {
    pub fn rounds<T: Team>(self, teams: &[T]) -> Result<Vec<Round<T>>> {
        match self {
            Scheduler::Flat => {
                ensure_unique(teams)?;
                Ok(all_pairs(teams).map(|p| vec![p]).collect())
            }
            Scheduler::Circle => Ok(circle_method_rounds(teams)?.collect()),
            Scheduler::Berger => Ok(berger_table_rounds(teams)?.collect()),
        }
    }
}

/// Round robin groups, each with its own rounds and table.
#[derive(Debug)]
pub struct GroupPhase<T, R, S> {
    pub groups: Vec<Vec<T>>,
    pub rounds: Vec<Vec<Round<T>>>,
    pub tables: Vec<MatchTable<T, R, S>>,
}

impl<T: Team, R: MatchResult, S: Points> GroupPhase<T, R, S> {
    pub fn new(groups: Vec<Vec<T>>, scheduler: Scheduler, scoring: Scoring<S>) -> Result<Self> {
        Self::with_policy(groups, scheduler, scoring, DefaultRanking)
    }

    /// Every group's table gets its own copy of `policy`.
    pub fn with_policy<P>(
        groups: Vec<Vec<T>>,
        scheduler: Scheduler,
        scoring: Scoring<S>,
        policy: P,
    ) -> Result<Self>
    where
        P: RankingPolicy<T, R> + Clone + 'static,
    {
        let mut rounds = Vec::with_capacity(groups.len());
        let mut tables = Vec::with_capacity(groups.len());
        for group in &groups {
            let group_rounds = scheduler.rounds(group)?;
            let schedule = group_rounds.iter().flatten().cloned();
            tables.push(MatchTable::with_policy(
                group,
                schedule,
                scoring,
                policy.clone(),
            )?);
            rounds.push(group_rounds);
        }
        Ok(Self {
            groups,
            rounds,
            tables,
        })
    }

    pub fn table(&self, group: usize) -> Result<&MatchTable<T, R, S>> {
        self.tables.get(group).ok_or_else(|| unknown_group(group))
    }

    pub fn table_mut(&mut self, group: usize) -> Result<&mut MatchTable<T, R, S>> {
        self.tables.get_mut(group).ok_or_else(|| unknown_group(group))
    }

    pub fn set_result_from_str(
        &mut self,
        group: usize,
        first: &T,
        second: &T,
        text: &str,
    ) -> Result<()> {
        self.table_mut(group)?.set_result_from_str(first, second, text)
    }

    /// All groups have a result for every scheduled match.
    pub fn is_complete(&self) -> bool {
        self.tables.iter().all(MatchTable::is_complete)
    }
}

fn unknown_group(group: usize) -> JoustError {
    JoustError::InvalidArgument(format!("no group {}", group))
}

/// A single elimination bracket.
#[derive(Clone, Debug)]
pub struct KoPhase<T, R> {
    pub seeds: Vec<Option<T>>,
    pub tree: KoTree<T, R>,
}

impl<T: Team, R: MatchResult> KoPhase<T, R> {
    pub fn new(seeds: Vec<Option<T>>) -> Result<Self> {
        let tree = KoTree::new(seeds.clone())?;
        Ok(Self { seeds, tree })
    }
}

#[derive(Debug)]
pub enum Phase<T, R, S> {
    Group(GroupPhase<T, R, S>),
    Knockout(KoPhase<T, R>),
}

/// A match played outside the phase's schedule, e.g. a placement game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtraMatch<T, R> {
    pub pairing: Pairing<T>,
    pub result: Option<R>,
}

/// A phase plus the tie breakers and extra matches decided during it.
#[derive(Debug)]
pub struct TournamentPhase<T, R, S> {
    pub phase: Phase<T, R, S>,
    pub tie_breakers: HashMap<TieBreakerId, TieBreaker<T, R>>,
    pub extra_matches: HashMap<ExtraMatchId, ExtraMatch<T, R>>,
}

impl<T: Team, R: MatchResult, S: Points> TournamentPhase<T, R, S> {
    pub fn new(phase: Phase<T, R, S>) -> Self {
        Self {
            phase,
            tie_breakers: HashMap::new(),
            extra_matches: HashMap::new(),
        }
    }

    /// Stores `breaker` under `key`, or a fresh key if none is given.
    pub fn add_tie_breaker(
        &mut self,
        breaker: TieBreaker<T, R>,
        key: Option<TieBreakerId>,
    ) -> TieBreakerId {
        let key = key.unwrap_or_else(Uuid::new_v4);
        self.tie_breakers.insert(key, breaker);
        key
    }

    pub fn tie_breaker_mut(&mut self, key: TieBreakerId) -> Result<&mut TieBreaker<T, R>> {
        self.tie_breakers
            .get_mut(&key)
            .ok_or_else(|| JoustError::InvalidArgument(format!("no tie breaker {}", key)))
    }

    /// Registers a match between two teams under `key`, or a fresh key.
    /// Fails with `InvalidArgument` if both sides are the same team.
    pub fn add_extra_match(
        &mut self,
        pairing: Pairing<T>,
        key: Option<ExtraMatchId>,
    ) -> Result<ExtraMatchId> {
        if pairing.first == pairing.second {
            return Err(JoustError::InvalidArgument(format!(
                "{:?} can't play itself",
                pairing.first
            )));
        }
        let key = key.unwrap_or_else(Uuid::new_v4);
        self.extra_matches.insert(
            key,
            ExtraMatch {
                pairing,
                result: None,
            },
        );
        Ok(key)
    }

    pub fn set_extra_result(&mut self, key: ExtraMatchId, result: R) -> Result<()> {
        let extra = self
            .extra_matches
            .get_mut(&key)
            .ok_or_else(|| JoustError::UnknownMatch(format!("no extra match {}", key)))?;
        extra.result = Some(result);
        Ok(())
    }

    pub fn group(&self) -> Result<&GroupPhase<T, R, S>> {
        match &self.phase {
            Phase::Group(group) => Ok(group),
            Phase::Knockout(_) => Err(wrong_phase("group")),
        }
    }

    pub fn group_mut(&mut self) -> Result<&mut GroupPhase<T, R, S>> {
        match &mut self.phase {
            Phase::Group(group) => Ok(group),
            Phase::Knockout(_) => Err(wrong_phase("group")),
        }
    }

    pub fn knockout(&self) -> Result<&KoPhase<T, R>> {
        match &self.phase {
            Phase::Knockout(ko) => Ok(ko),
            Phase::Group(_) => Err(wrong_phase("knockout")),
        }
    }

    pub fn knockout_mut(&mut self) -> Result<&mut KoPhase<T, R>> {
        match &mut self.phase {
            Phase::Knockout(ko) => Ok(ko),
            Phase::Group(_) => Err(wrong_phase("knockout")),
        }
    }
}

fn wrong_phase(expected: &str) -> JoustError {
    JoustError::InvalidArgument(format!("phase is not a {} phase", expected))
}

/// Phases keyed by generated ids, in the order they were added.
#[derive(Debug)]
pub struct Tournament<T, R, S> {
    pub id: TournamentId,
    phases: HashMap<PhaseId, TournamentPhase<T, R, S>>,
    order: Vec<PhaseId>,
}

impl<T: Team, R: MatchResult, S: Points> Default for Tournament<T, R, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Team, R: MatchResult, S: Points> Tournament<T, R, S> {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phases: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// A tournament with a single group phase; returns it with the phase key.
    pub fn round_robin(
        groups: Vec<Vec<T>>,
        scheduler: Scheduler,
        scoring: Scoring<S>,
    ) -> Result<(Self, PhaseId)> {
        let mut tournament = Self::new();
        let group_phase = GroupPhase::new(groups, scheduler, scoring)?;
        let key = tournament.add_phase(Phase::Group(group_phase), None);
        Ok((tournament, key))
    }

    /// Stores `phase` under `key`, or a fresh key if none is given.
    pub fn add_phase(&mut self, phase: Phase<T, R, S>, key: Option<PhaseId>) -> PhaseId {
        let key = key.unwrap_or_else(Uuid::new_v4);
        let kind = match &phase {
            Phase::Group(g) => format!("group phase with {} group(s)", g.groups.len()),
            Phase::Knockout(ko) => format!("knockout phase with {} slot(s)", ko.seeds.len()),
        };
        log::debug!("Tournament {}: added {} as {}", self.id, kind, key);
        if self.phases.insert(key, TournamentPhase::new(phase)).is_none() {
            self.order.push(key);
        }
        key
    }

    /// Adds a knockout phase seeded with `seeds`.
    pub fn add_knockout(&mut self, seeds: Vec<Option<T>>) -> Result<PhaseId> {
        let ko = KoPhase::new(seeds)?;
        Ok(self.add_phase(Phase::Knockout(ko), None))
    }

    pub fn phase(&self, key: PhaseId) -> Result<&TournamentPhase<T, R, S>> {
        self.phases.get(&key).ok_or_else(|| unknown_phase(key))
    }

    pub fn phase_mut(&mut self, key: PhaseId) -> Result<&mut TournamentPhase<T, R, S>> {
        self.phases.get_mut(&key).ok_or_else(|| unknown_phase(key))
    }

    /// Phase keys in insertion order.
    pub fn phase_ids(&self) -> &[PhaseId] {
        &self.order
    }
}

fn unknown_phase(key: PhaseId) -> JoustError {
    JoustError::InvalidArgument(format!("no phase {}", key))
}
