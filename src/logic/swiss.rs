//! Swiss system: each round pairs teams of similar standing that have not
//! met yet.
//!
//! Pairing is greedy (best remaining team against the best ranked opponent it
//! has not played) and can dead-end late in an event; callers get
//! `NoPairing` in that case and nothing is recorded.

use std::collections::{HashMap, HashSet};

use crate::logic::round_robin::all_pairs_bidirectional;
use crate::logic::table::{MatchTable, Standing};
use crate::models::{JoustError, MatchResult, Pairing, Result, Round, Scoring, Team};

/// One generated round.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwissRound<T> {
    pub pairings: Round<T>,
    /// Team sitting out this round (odd fields only).
    pub bye: Option<T>,
}

#[derive(Debug)]
pub struct SwissSystem<T, R> {
    table: MatchTable<T, R, i64>,
    played: HashSet<(T, T)>,
    byes: HashMap<T, u32>,
    rounds: Vec<SwissRound<T>>,
}

impl<T: Team, R: MatchResult> SwissSystem<T, R> {
    /// Three points table over every possible pairing.
    pub fn new(teams: &[T]) -> Result<Self> {
        Self::with_scoring(teams, Scoring::three_points())
    }

    pub fn with_scoring(teams: &[T], scoring: Scoring<i64>) -> Result<Self> {
        let table = MatchTable::new(teams, all_pairs_bidirectional(teams), scoring)?;
        Ok(Self {
            table,
            played: HashSet::new(),
            byes: teams.iter().map(|t| (t.clone(), 0)).collect(),
            rounds: Vec::new(),
        })
    }

    pub fn table(&self) -> &MatchTable<T, R, i64> {
        &self.table
    }

    pub fn rounds(&self) -> &[SwissRound<T>] {
        &self.rounds
    }

    pub fn bye_count(&self, team: &T) -> Option<u32> {
        self.byes.get(team).copied()
    }

    pub fn has_played(&self, a: &T, b: &T) -> bool {
        let key = Pairing::new(a.clone(), b.clone()).unordered();
        self.played.contains(&key)
    }

    pub fn sorted_ranking(&self) -> Vec<Standing<T, i64>> {
        self.table.sorted_ranking()
    }

    /// Pairs the next round from the current standings and records it.
    pub fn next_round(&mut self) -> Result<SwissRound<T>> {
        let mut ranking: Vec<T> = self
            .table
            .sorted_ranking()
            .into_iter()
            .map(|s| s.team)
            .collect();
        let bye = match ranking.len() % 2 {
            0 => None,
            _ => Some(self.select_bye(&ranking)?),
        };
        if let Some(bye) = &bye {
            ranking.retain(|t| t != bye);
        }

        let mut pairings = Vec::with_capacity(ranking.len() / 2);
        while !ranking.is_empty() {
            let team = ranking.remove(0);
            let pos = ranking
                .iter()
                .position(|candidate| !self.has_played(&team, candidate))
                .ok_or_else(|| JoustError::NoPairing(format!("can't find match for {:?}", team)))?;
            let opponent = ranking.remove(pos);
            pairings.push(Pairing::new(team, opponent));
        }

        for p in &pairings {
            self.played.insert(p.unordered());
        }
        if let Some(team) = &bye {
            if let Some(count) = self.byes.get_mut(team) {
                *count += 1;
            }
        }
        let round = SwissRound { pairings, bye };
        self.rounds.push(round.clone());
        Ok(round)
    }

    /// Lowest ranked team among those with the fewest byes so far.
    fn select_bye(&self, ranking: &[T]) -> Result<T> {
        let fewest = ranking
            .iter()
            .filter_map(|t| self.byes.get(t))
            .min()
            .copied()
            .ok_or_else(|| JoustError::InvalidArgument("can't select bye, no teams".to_string()))?;
        ranking
            .iter()
            .rev()
            .find(|t| self.byes.get(*t) == Some(&fewest))
            .cloned()
            .ok_or_else(|| JoustError::InvalidArgument("can't select bye, no teams".to_string()))
    }

    /// Records a result for two teams that were paired in some round, in
    /// either orientation. A result entered earlier from the other side is
    /// replaced.
    pub fn set_result(&mut self, first: &T, second: &T, result: R) -> Result<()> {
        self.check_paired(first, second)?;
        self.table.clear_result(second, first)?;
        self.table.set_result(first, second, result)
    }

    pub fn set_result_from_str(&mut self, first: &T, second: &T, text: &str) -> Result<()> {
        let result: R = text.parse()?;
        self.set_result(first, second, result)
    }

    fn check_paired(&self, first: &T, second: &T) -> Result<()> {
        self.table.table().check_exists(&[first, second])?;
        if !self.has_played(first, second) {
            return Err(JoustError::UnknownMatch(format!(
                "{:?} and {:?} were never paired",
                first, second
            )));
        }
        Ok(())
    }
}
