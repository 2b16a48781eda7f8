//! Tournament scheduling and ranking: group splits, round robin schedules,
//! point tables with pluggable tie breaks, knockout brackets and Swiss rounds.

pub mod logic;
pub mod models;

pub use logic::{
    all_pairs, all_pairs_bidirectional, berger_table_rounds, circle_method_rounds, group_count,
    group_sizes, group_standings, groups_by_count, groups_by_size, is_power_of_two,
    next_power_of_two, shuffled_groups_by_count, shuffled_groups_by_size, toss_coin,
    DefaultRanking, GoalsRanking, KoNode, KoTree, KubbRanking, MatchTable, RankGroup,
    RankingPolicy, Standing, SwissRound, SwissSystem, Table, TieBreaker,
};
pub use models::{
    ExtraMatch, ExtraMatchId, GoalScore, GroupPhase, JoustError, KoPhase, KubbResult,
    MatchResult, Outcome, Pairing, Phase, PhaseId, Points, Result, Round, Scheduler, Scoring,
    Team, TieBreakerId, Tournament, TournamentId, TournamentPhase, TwoPoints,
};
