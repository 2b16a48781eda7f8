//! Single elimination brackets as an array backed complete binary tree.
//!
//! For `n` teams (a power of two) the tree has `2n - 1` nodes. Node `0` is
//! the final, node `i` has children `2i + 1` and `2i + 2`, and the leaves are
//! the last `n` slots. Seeds fill the leaves in reverse, so seed `0` sits in
//! the highest slot. Inner nodes stay unassigned until a caller fills them,
//! for instance through [`KoTree::advance`].

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{JoustError, MatchResult, Outcome, Result, Team};

pub fn is_power_of_two(num: usize) -> bool {
    num.is_power_of_two()
}

/// Smallest power of two `>= num` (1 for 0).
pub fn next_power_of_two(num: usize) -> usize {
    num.next_power_of_two()
}

pub fn children(id: usize) -> (usize, usize) {
    (2 * id + 1, 2 * id + 2)
}

/// `None` for the root.
pub fn parent(id: usize) -> Option<usize> {
    match id {
        0 => None,
        _ => Some((id - 1) / 2),
    }
}

/// `id`, its parent, ..., up to and including the root.
pub fn root_path(id: usize) -> Vec<usize> {
    let mut path = vec![id];
    let mut current = id;
    while let Some(up) = parent(current) {
        path.push(up);
        current = up;
    }
    path
}

/// Matches of a row: entries `2k` and `2k + 1` play each other. An odd
/// trailing entry is dropped.
pub fn matches_in_row(row: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    row.chunks_exact(2).map(|pair| (pair[0], pair[1]))
}

/// An assigned bracket slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KoNode<T, R> {
    /// `None` for a bye.
    pub team: Option<T>,
    pub description: Option<String>,
    pub is_bye: bool,
    /// Result of the last match this slot played.
    pub result: Option<R>,
}

impl<T, R> KoNode<T, R> {
    fn new(team: Option<T>) -> Self {
        Self {
            is_bye: team.is_none(),
            team,
            description: None,
            result: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct KoTree<T, R> {
    num_teams: usize,
    nodes: Vec<Option<KoNode<T, R>>>,
    matches: HashMap<(usize, usize), R>,
}

impl<T: Team, R: MatchResult> KoTree<T, R> {
    /// `seeds.len()` must be a power of two; `None` entries are byes.
    /// Fails with `InvalidArgument` otherwise or if a team is seeded twice.
    pub fn new(seeds: Vec<Option<T>>) -> Result<Self> {
        let n = seeds.len();
        if !is_power_of_two(n) {
            return Err(JoustError::InvalidArgument(format!(
                "knockout tree needs a power of two number of seeds, got {}",
                n
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = seeds.iter().flatten().find(|t| !seen.insert(*t)) {
            return Err(JoustError::InvalidArgument(format!(
                "team {:?} seeded twice",
                dup
            )));
        }
        let total = 2 * n - 1;
        let mut nodes: Vec<Option<KoNode<T, R>>> = vec![None; total];
        for (slot, seed) in nodes[total - n..].iter_mut().zip(seeds.into_iter().rev()) {
            *slot = Some(KoNode::new(seed));
        }
        Ok(Self {
            num_teams: n,
            nodes,
            matches: HashMap::new(),
        })
    }

    /// Pads `teams` with trailing byes up to the next power of two.
    pub fn with_byes(teams: Vec<T>) -> Result<Self> {
        if teams.is_empty() {
            return Err(JoustError::InvalidArgument(
                "knockout tree needs at least one team".to_string(),
            ));
        }
        let size = next_power_of_two(teams.len());
        let mut seeds: Vec<Option<T>> = teams.into_iter().map(Some).collect();
        seeds.resize(size, None);
        Self::new(seeds)
    }

    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// `None` if out of range or not assigned yet.
    pub fn node(&self, id: usize) -> Option<&KoNode<T, R>> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    pub fn nodes(&self) -> &[Option<KoNode<T, R>>] {
        &self.nodes
    }

    /// Node ids per row: leaves first (highest id first), ending with `[0]`.
    pub fn rows(&self) -> Vec<Vec<usize>> {
        let total = self.nodes.len();
        let mut next = 0;
        let mut width = self.num_teams;
        let mut rows = Vec::new();
        while width > 0 {
            rows.push((next..next + width).map(|k| total - k - 1).collect());
            next += width;
            width /= 2;
        }
        rows
    }

    pub fn row(&self, row_id: usize) -> Option<Vec<usize>> {
        self.rows().into_iter().nth(row_id)
    }

    pub fn row_matches(&self, row_id: usize) -> Vec<(usize, usize)> {
        self.row(row_id)
            .map(|row| matches_in_row(&row).collect())
            .unwrap_or_default()
    }

    /// Records `result` for the match between two sibling slots.
    ///
    /// Both slots must be assigned (`InvalidArgument` otherwise) and share a
    /// parent (`UnknownMatch` otherwise). Recording again, from either side,
    /// overwrites.
    pub fn set_match(&mut self, first: usize, second: usize, result: R) -> Result<()> {
        self.check_match(first, second)?;
        for id in [first, second] {
            if let Some(node) = self.nodes[id].as_mut() {
                node.result = Some(result.clone());
            }
        }
        // One entry per match, in the orientation it was last recorded.
        self.matches.remove(&(second, first));
        self.matches.insert((first, second), result);
        Ok(())
    }

    pub fn get_match_result(&self, first: usize, second: usize) -> Option<&R> {
        self.matches.get(&(first, second))
    }

    pub fn set_description(&mut self, id: usize, description: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or_else(|| JoustError::InvalidArgument(format!("node {} is not assigned", id)))?;
        node.description = Some(description.into());
        Ok(())
    }

    /// Moves the winner of the match between two sibling slots into their
    /// parent slot and returns the parent id.
    ///
    /// The winner comes from the recorded result (a draw is rejected). Without
    /// a result, a team facing a bye advances; two byes advance a bye.
    pub fn advance(&mut self, first: usize, second: usize) -> Result<usize> {
        self.check_match(first, second)?;
        let up = parent(first).ok_or_else(|| {
            JoustError::UnknownMatch(format!("node {} has no parent", first))
        })?;
        let winner = match self.recorded_winner(first, second) {
            Some(Outcome::First) => first,
            Some(Outcome::Second) => second,
            Some(Outcome::Draw) => {
                return Err(JoustError::InvalidArgument(format!(
                    "match {} vs {} ended in a draw",
                    first, second
                )))
            }
            None => self.bye_winner(first, second)?,
        };
        let team = self.nodes[winner].as_ref().and_then(|n| n.team.clone());
        self.nodes[up] = Some(KoNode::new(team));
        Ok(up)
    }

    fn recorded_winner(&self, first: usize, second: usize) -> Option<Outcome> {
        if let Some(result) = self.matches.get(&(first, second)) {
            return Some(result.winner());
        }
        self.matches
            .get(&(second, first))
            .map(|result| match result.winner() {
                Outcome::First => Outcome::Second,
                Outcome::Second => Outcome::First,
                Outcome::Draw => Outcome::Draw,
            })
    }

    fn bye_winner(&self, first: usize, second: usize) -> Result<usize> {
        let is_bye = |id: usize| self.nodes[id].as_ref().map_or(false, |n| n.is_bye);
        match (is_bye(first), is_bye(second)) {
            (false, true) => Ok(first),
            (true, _) => Ok(second),
            (false, false) => Err(JoustError::UnknownMatch(format!(
                "no result recorded for {} vs {}",
                first, second
            ))),
        }
    }

    fn check_match(&self, first: usize, second: usize) -> Result<()> {
        for id in [first, second] {
            if id >= self.nodes.len() {
                return Err(JoustError::InvalidArgument(format!(
                    "node {} out of range",
                    id
                )));
            }
        }
        if first == second || parent(first).is_none() || parent(first) != parent(second) {
            return Err(JoustError::UnknownMatch(format!(
                "nodes {} and {} do not meet in this bracket",
                first, second
            )));
        }
        if self.nodes[first].is_none() || self.nodes[second].is_none() {
            return Err(JoustError::InvalidArgument(
                "invalid node id (no teams set yet)".to_string(),
            ));
        }
        Ok(())
    }
}
