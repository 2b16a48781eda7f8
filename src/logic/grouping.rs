//! Group stage setup: split a participant list into groups.

use rand::seq::SliceRandom;
use rand::Rng;

/// Number of groups needed for groups of `group_size`.
///
/// With `extra_group` the remaining teams get a group of their own (ceil
/// division), otherwise they are folded into the existing groups (floor).
pub fn group_count(group_size: usize, num_participants: usize, extra_group: bool) -> usize {
    if group_size == 0 {
        return 0;
    }
    let mut count = num_participants / group_size;
    if extra_group && num_participants % group_size != 0 {
        count += 1;
    }
    count
}

/// Size of each group, in order.
///
/// Without `extra_group` the first groups (indices `0..=rest`) get one extra
/// team each; the sizes may then add up to one more than `num_participants`
/// and [`groups_by_size`] hands the last group whatever is left.
pub fn group_sizes(
    group_size: usize,
    num_participants: usize,
    extra_group: bool,
) -> impl Iterator<Item = usize> {
    let (num_groups, rest) = match group_size {
        0 => (0, 0),
        size => (num_participants / size, num_participants % size),
    };
    let regular = (0..num_groups).map(move |i| {
        if !extra_group && rest != 0 && i <= rest {
            group_size + 1
        } else {
            group_size
        }
    });
    let trailing = (extra_group && rest != 0).then_some(rest);
    regular.chain(trailing)
}

/// Splits `participants` into consecutive groups following [`group_sizes`].
///
/// A `group_size` of zero yields no groups; callers must check for an empty
/// result.
pub fn groups_by_size<T: Clone>(
    group_size: usize,
    participants: &[T],
    extra_group: bool,
) -> Vec<Vec<T>> {
    let n = participants.len();
    let mut start = 0;
    group_sizes(group_size, n, extra_group)
        .map(|size| {
            let from = start.min(n);
            let to = (start + size).min(n);
            start += size;
            participants[from..to].to_vec()
        })
        .collect()
}

/// Like [`groups_by_size`] on a random permutation of `participants`.
/// The caller's slice is left untouched.
pub fn shuffled_groups_by_size<T: Clone, R: Rng + ?Sized>(
    group_size: usize,
    participants: &[T],
    extra_group: bool,
    rng: &mut R,
) -> Vec<Vec<T>> {
    if group_size == 0 {
        return Vec::new();
    }
    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);
    groups_by_size(group_size, &shuffled, extra_group)
}

/// Splits `participants` into `num_groups` groups, folding leftovers into the
/// first groups.
pub fn groups_by_count<T: Clone>(num_groups: usize, participants: &[T]) -> Vec<Vec<T>> {
    if num_groups == 0 {
        return Vec::new();
    }
    groups_by_size(participants.len() / num_groups, participants, false)
}

pub fn shuffled_groups_by_count<T: Clone, R: Rng + ?Sized>(
    num_groups: usize,
    participants: &[T],
    rng: &mut R,
) -> Vec<Vec<T>> {
    if num_groups == 0 {
        return Vec::new();
    }
    shuffled_groups_by_size(participants.len() / num_groups, participants, false, rng)
}
