//! Round robin schedules: every team meets every other team once.
//!
//! [`all_pairs`] lists the matches flat. [`circle_method_rounds`] and
//! [`berger_table_rounds`] split them into rounds whose matches can be played
//! at the same time. Both round generators produce `n - 1` rounds for an even
//! number of teams and `n` rounds for an odd number (one team sits out each
//! round). Pair orientation differs between the generators.

use crate::models::{ensure_unique, Pairing, Result, Round, Team};

/// All `n * (n - 1) / 2` pairings in input order: `(teams[i], teams[j])` with `i < j`.
///
/// Teams must be unique. The iterator borrows `teams`; call again to restart.
pub fn all_pairs<T: Clone>(teams: &[T]) -> impl Iterator<Item = Pairing<T>> + '_ {
    teams.iter().enumerate().flat_map(move |(i, a)| {
        teams[i + 1..]
            .iter()
            .map(move |b| Pairing::new(a.clone(), b.clone()))
    })
}

/// Every pairing in both orientations, `(a, b)` directly followed by `(b, a)`.
pub fn all_pairs_bidirectional<T: Clone>(teams: &[T]) -> impl Iterator<Item = Pairing<T>> + '_ {
    all_pairs(teams).flat_map(|p| {
        let back = p.clone().reversed();
        [p, back]
    })
}

/// Rounds built by the circle method: two rows facing each other, the first
/// team stays put and everybody else rotates one seat per round.
///
/// Fails with `InvalidArgument` on duplicate teams.
pub fn circle_method_rounds<T: Team>(teams: &[T]) -> Result<CircleRounds<T>> {
    ensure_unique(teams)?;
    let n = teams.len();
    if n < 2 {
        return Ok(CircleRounds {
            top: Vec::new(),
            bottom: Vec::new(),
            remaining: 0,
        });
    }
    let mut top: Vec<Option<T>> = teams[..n / 2].iter().cloned().map(Some).collect();
    let bottom: Vec<Option<T>> = teams[n / 2..].iter().rev().cloned().map(Some).collect();
    let mut size = n;
    if n % 2 != 0 {
        top.push(None);
        size += 1;
    }
    Ok(CircleRounds {
        top,
        bottom,
        remaining: size - 1,
    })
}

/// Lazy sequence of circle method rounds. `None` seats are byes.
#[derive(Clone, Debug)]
pub struct CircleRounds<T> {
    top: Vec<Option<T>>,
    bottom: Vec<Option<T>>,
    remaining: usize,
}

impl<T: Clone> CircleRounds<T> {
    fn rotate(&mut self) {
        let top_last = self.top.pop();
        let bottom_first = self.bottom.remove(0);
        self.top.insert(1, bottom_first);
        if let Some(seat) = top_last {
            self.bottom.push(seat);
        }
    }
}

impl<T: Clone> Iterator for CircleRounds<T> {
    type Item = Round<T>;

    fn next(&mut self) -> Option<Round<T>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let round = self
            .top
            .iter()
            .zip(&self.bottom)
            .filter_map(|seats| match seats {
                (Some(a), Some(b)) => Some(Pairing::new(a.clone(), b.clone())),
                _ => None,
            })
            .collect();
        if self.remaining > 0 {
            self.rotate();
        }
        Some(round)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for CircleRounds<T> {}

/// Rounds following the Berger table.
///
/// Works on seat positions `1..=n`, not on the identifiers, so any team type
/// is fine. An odd field gets a bye appended at the end. The last seat never
/// moves; every other seat advances by `n / 2` positions per round.
///
/// Fails with `InvalidArgument` on duplicate teams.
pub fn berger_table_rounds<T: Team>(teams: &[T]) -> Result<BergerRounds<T>> {
    ensure_unique(teams)?;
    if teams.len() < 2 {
        return Ok(BergerRounds {
            seats: Vec::new(),
            order: Vec::new(),
            fixed: 0,
            remaining: 0,
        });
    }
    let mut seats: Vec<Option<T>> = teams.iter().cloned().map(Some).collect();
    if seats.len() % 2 != 0 {
        seats.push(None);
    }
    let n = seats.len();
    let mut order = Vec::with_capacity(n);
    for (front, back) in (1..=n / 2).zip((n / 2 + 1..=n).rev()) {
        order.push(front);
        order.push(back);
    }
    let fixed = order[1];
    Ok(BergerRounds {
        seats,
        order,
        fixed,
        remaining: n - 1,
    })
}

/// Lazy sequence of Berger table rounds.
#[derive(Clone, Debug)]
pub struct BergerRounds<T> {
    /// Team at position `p` is `seats[p - 1]`; `None` is the bye.
    seats: Vec<Option<T>>,
    /// Positions, consecutive entries play each other.
    order: Vec<usize>,
    fixed: usize,
    remaining: usize,
}

impl<T: Clone> BergerRounds<T> {
    fn rotate(&mut self) {
        let n = self.order.len();
        let add = n / 2;
        let sub = add - 1;
        let shift = |old: usize| {
            if old + add > n - 1 {
                old - sub
            } else {
                old + add
            }
        };
        let mut next = Vec::with_capacity(n);
        if self.order[0] == self.fixed {
            next.push(shift(self.order[1]));
            next.push(self.fixed);
        } else {
            next.push(self.fixed);
            next.push(shift(self.order[0]));
        }
        next.extend(self.order[2..].iter().map(|&pos| shift(pos)));
        self.order = next;
    }
}

impl<T: Clone> Iterator for BergerRounds<T> {
    type Item = Round<T>;

    fn next(&mut self) -> Option<Round<T>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let round = self
            .order
            .chunks_exact(2)
            .filter_map(|pair| {
                match (&self.seats[pair[0] - 1], &self.seats[pair[1] - 1]) {
                    (Some(a), Some(b)) => Some(Pairing::new(a.clone(), b.clone())),
                    _ => None,
                }
            })
            .collect();
        if self.remaining > 0 {
            self.rotate();
        }
        Some(round)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for BergerRounds<T> {}
