//! Scheduling and ranking engines.

pub mod grouping;
pub mod knockout;
pub mod ranking;
pub mod round_robin;
pub mod swiss;
pub mod table;
pub mod tie_break;

pub use grouping::{
    group_count, group_sizes, groups_by_count, groups_by_size, shuffled_groups_by_count,
    shuffled_groups_by_size,
};
pub use knockout::{is_power_of_two, next_power_of_two, KoNode, KoTree};
pub use ranking::{DefaultRanking, GoalsRanking, KubbRanking, RankingPolicy, Results};
pub use round_robin::{
    all_pairs, all_pairs_bidirectional, berger_table_rounds, circle_method_rounds, BergerRounds,
    CircleRounds,
};
pub use swiss::{SwissRound, SwissSystem};
pub use table::{group_standings, MatchTable, RankGroup, Standing, Table};
pub use tie_break::{toss_coin, TieBreaker};
