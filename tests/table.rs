//! Integration tests for point tables, result types and ranking policies.

use joust::{
    all_pairs, GoalScore, GoalsRanking, JoustError, KubbRanking, KubbResult, MatchResult,
    MatchTable, Outcome, Pairing, RankGroup, Scoring, Standing, Table, TwoPoints,
};

type GoalTable = MatchTable<&'static str, GoalScore, i64>;

const ABC: [&str; 3] = ["A", "B", "C"];

fn abc_table() -> GoalTable {
    MatchTable::three_points(&ABC, all_pairs(&ABC)).unwrap()
}

fn standing(team: &'static str, points: i64) -> Standing<&'static str, i64> {
    Standing {
        team,
        points,
        tie_break: None,
    }
}

fn ranking_of<S: Copy, T: Clone>(ranking: &[Standing<T, S>]) -> Vec<(T, S)> {
    ranking.iter().map(|s| (s.team.clone(), s.points)).collect()
}

#[test]
fn three_teams_three_points() {
    let mut t = abc_table();
    t.set_result_from_str(&"A", &"B", "3:1").unwrap();
    t.set_result_from_str(&"A", &"C", "1:1").unwrap();
    t.set_result_from_str(&"B", &"C", "0:2").unwrap();

    // A: win + draw, C: draw + win, B: two losses.
    assert_eq!(t.points(&"A"), Some(4));
    assert_eq!(t.points(&"B"), Some(0));
    assert_eq!(t.points(&"C"), Some(4));
    assert_eq!(
        t.sorted_ranking(),
        vec![standing("A", 4), standing("C", 4), standing("B", 0)]
    );
    assert_eq!(
        t.rank_groups(),
        vec![
            RankGroup {
                points: 4,
                tie_break: None,
                teams: vec!["A", "C"],
            },
            RankGroup {
                points: 0,
                tie_break: None,
                teams: vec!["B"],
            },
        ]
    );
    assert!(t.is_complete());
}

#[test]
fn fresh_table_is_all_zero_and_pending() {
    let t = abc_table();
    assert!(t.points_map().values().all(|&p| p == 0));
    assert_eq!(t.pending().count(), 3);
    assert!(!t.is_complete());
    assert_eq!(t.schedule().len(), 3);
    assert_eq!(t.teams(), &ABC);
    // Everyone tied: identifier order.
    assert_eq!(
        ranking_of(&t.sorted_ranking()),
        vec![("A", 0), ("B", 0), ("C", 0)]
    );
}

#[test]
fn unscheduled_or_reversed_pairing_is_unknown_match() {
    let mut t = abc_table();
    t.set_result(&"A", &"B", GoalScore::new(2, 0)).unwrap();
    let before = t.sorted_ranking();

    // Only (A, B) is scheduled, not (B, A).
    assert!(matches!(
        t.set_result(&"B", &"A", GoalScore::new(5, 0)),
        Err(JoustError::UnknownMatch(_))
    ));
    assert!(matches!(
        t.set_result(&"A", &"A", GoalScore::new(1, 0)),
        Err(JoustError::UnknownMatch(_))
    ));
    assert_eq!(t.sorted_ranking(), before);
    assert_eq!(t.result(&"B", &"A"), None);
    assert_eq!(t.result(&"A", &"B"), Some(&GoalScore::new(2, 0)));
}

#[test]
fn unknown_team_is_rejected() {
    let mut t = abc_table();
    assert!(matches!(
        t.set_result(&"A", &"Z", GoalScore::new(1, 0)),
        Err(JoustError::UnknownTeam(_))
    ));
    assert!(matches!(
        t.set_points(&"Z", 3),
        Err(JoustError::UnknownTeam(_))
    ));
}

#[test]
fn malformed_strings_do_not_touch_results() {
    let mut t = abc_table();
    t.set_result_from_str(&"A", &"B", "1:0").unwrap();
    for text in ["abc", "3-1", "3:", ":3", "", "-1:2", "1:2:3", "1.5:2", "99999999999:1"] {
        let err = t.set_result_from_str(&"A", &"B", text).unwrap_err();
        assert!(matches!(err, JoustError::ParseError(_)), "{:?}", text);
    }
    assert_eq!(t.result(&"A", &"B"), Some(&GoalScore::new(1, 0)));
    assert_eq!(t.points(&"A"), Some(3));
}

#[test]
fn parse_error_wins_over_unknown_match() {
    let mut t = abc_table();
    assert!(matches!(
        t.set_result_from_str(&"B", &"A", "oops"),
        Err(JoustError::ParseError(_))
    ));
}

#[test]
fn correcting_and_clearing_results_recomputes() {
    let mut t = abc_table();
    t.set_result_from_str(&"A", &"B", "3:1").unwrap();
    assert_eq!((t.points(&"A"), t.points(&"B")), (Some(3), Some(0)));

    t.set_result_from_str(&"A", &"B", "0:2").unwrap();
    assert_eq!((t.points(&"A"), t.points(&"B")), (Some(0), Some(3)));

    t.clear_result(&"A", &"B").unwrap();
    assert_eq!((t.points(&"A"), t.points(&"B")), (Some(0), Some(0)));
    assert_eq!(t.pending().count(), 3);
}

#[test]
fn recompute_is_idempotent_and_drops_manual_points() {
    let mut t = abc_table();
    t.set_result_from_str(&"B", &"C", "2:2").unwrap();
    t.recompute();
    let first = t.points_map().clone();
    t.recompute();
    assert_eq!(t.points_map(), &first);

    t.increase_points(&"A", 10).unwrap();
    assert_eq!(t.points(&"A"), Some(10));
    t.recompute();
    assert_eq!(t.points_map(), &first);
}

#[test]
fn construction_checks_teams_and_schedule() {
    assert!(matches!(
        GoalTable::three_points(&["A", "B", "A"], Vec::new()),
        Err(JoustError::InvalidArgument(_))
    ));
    assert!(matches!(
        GoalTable::three_points(&["A", "B"], vec![Pairing::new("A", "X")]),
        Err(JoustError::UnknownTeam(_))
    ));
    // Repeated pairings collapse into one scheduled match.
    let t = GoalTable::three_points(&["A", "B"], vec![Pairing::new("A", "B"); 3]).unwrap();
    assert_eq!(t.schedule(), &[Pairing::new("A", "B")]);
}

#[test]
fn custom_scoring() {
    let mut t: GoalTable =
        MatchTable::new(&ABC, all_pairs(&ABC), Scoring::new(2, 1, -1)).unwrap();
    t.set_result_from_str(&"A", &"B", "1:0").unwrap();
    t.set_result_from_str(&"A", &"C", "0:0").unwrap();
    assert_eq!(t.points(&"A"), Some(3));
    assert_eq!(t.points(&"B"), Some(-1));
    assert_eq!(t.points(&"C"), Some(1));
}

#[test]
fn two_point_table() {
    let mut t: MatchTable<&str, GoalScore, TwoPoints> =
        MatchTable::two_points(&ABC, all_pairs(&ABC)).unwrap();
    t.set_result_from_str(&"A", &"B", "1:0").unwrap();
    t.set_result_from_str(&"A", &"C", "1:1").unwrap();
    t.set_result_from_str(&"B", &"C", "2:1").unwrap();

    assert_eq!(t.points(&"A"), Some(TwoPoints::new(3, 1)));
    assert_eq!(t.points(&"B"), Some(TwoPoints::new(2, 2)));
    assert_eq!(t.points(&"C"), Some(TwoPoints::new(1, 3)));
    assert_eq!(
        ranking_of(&t.sorted_ranking()),
        vec![
            ("A", TwoPoints::new(3, 1)),
            ("B", TwoPoints::new(2, 2)),
            ("C", TwoPoints::new(1, 3)),
        ]
    );
}

#[test]
fn two_points_order_plus_then_fewer_minus() {
    assert!(TwoPoints::new(2, 0) > TwoPoints::new(2, 1));
    assert!(TwoPoints::new(3, 5) > TwoPoints::new(2, 0));
    assert_eq!(TwoPoints::new(1, 1) + TwoPoints::new(2, 0), TwoPoints::new(3, 1));
    assert_eq!(TwoPoints::new(4, 2).to_string(), "4:2");
}

#[test]
fn plain_table_by_hand() {
    let mut t: Table<u32, i64> = Table::new(&[3, 1, 2]).unwrap();
    t.set_points(&3, 5).unwrap();
    t.increase_points(&1, 5).unwrap();
    t.increase_points(&2, 1).unwrap();
    assert_eq!(
        ranking_of(&t.sorted_ranking()),
        vec![(1, 5), (3, 5), (2, 1)]
    );
    assert_eq!(t.rank_groups().len(), 2);
    assert!(t.check_exists(&[&1, &2]).is_ok());
    assert!(matches!(
        t.check_exists(&[&1, &9]),
        Err(JoustError::UnknownTeam(_))
    ));
    t.reset();
    assert!(t.points_map().values().all(|&p| p == 0));
}

#[test]
fn goal_score_parsing() {
    assert_eq!("3:1".parse::<GoalScore>().unwrap(), GoalScore::new(3, 1));
    assert_eq!(" 3 : 1 ".parse::<GoalScore>().unwrap(), GoalScore::new(3, 1));
    assert_eq!("0:0".parse::<GoalScore>().unwrap().winner(), Outcome::Draw);
    assert_eq!("0:4".parse::<GoalScore>().unwrap().winner(), Outcome::Second);
    assert_eq!(GoalScore::new(7, 2).to_string(), "7:2");
    assert!("+3:1".parse::<GoalScore>().is_err());
}

#[test]
fn kubb_parsing() {
    let r: KubbResult = "2:5".parse().unwrap();
    assert_eq!(r, KubbResult::new(Some(2), Some(5), false).unwrap());
    assert_eq!(r.winner(), Outcome::First);

    let r: KubbResult = " timeout: 3:".parse().unwrap();
    assert_eq!((r.first, r.second, r.timeout), (Some(3), None, true));
    assert_eq!(r.winner(), Outcome::Second);
    assert_eq!(r.to_string(), "timeout:3:");

    let r: KubbResult = ":1".parse().unwrap();
    assert_eq!(r.winner(), Outcome::First);
    assert_eq!("4:4".parse::<KubbResult>().unwrap().winner(), Outcome::Draw);

    for text in [":", "timeout::", "timeout:", "abc", "1-2", "x:1", "1:-2"] {
        assert!(
            matches!(text.parse::<KubbResult>(), Err(JoustError::ParseError(_))),
            "{:?}",
            text
        );
    }
    assert!(matches!(
        KubbResult::new(None, None, true),
        Err(JoustError::InvalidArgument(_))
    ));
}

#[test]
fn kubb_ranking_breaks_ties_on_pieces_left() {
    let mut t: MatchTable<&str, KubbResult, i64> =
        MatchTable::with_policy(&ABC, all_pairs(&ABC), Scoring::three_points(), KubbRanking)
            .unwrap();
    // Everyone wins once. Pieces left: A 1+2, B 3+0, C 0+2.
    t.set_result_from_str(&"A", &"B", "1:3").unwrap();
    t.set_result_from_str(&"A", &"C", "2:0").unwrap();
    t.set_result_from_str(&"B", &"C", "0:2").unwrap();

    let ranking = t.sorted_ranking();
    assert_eq!(
        ranking
            .iter()
            .map(|s| (s.team, s.points, s.tie_break))
            .collect::<Vec<_>>(),
        vec![("C", 3, Some(-2)), ("A", 3, Some(-3)), ("B", 3, Some(-3))]
    );
    assert_eq!(
        t.rank_groups(),
        vec![
            RankGroup {
                points: 3,
                tie_break: Some(-2),
                teams: vec!["C"],
            },
            RankGroup {
                points: 3,
                tie_break: Some(-3),
                teams: vec!["A", "B"],
            },
        ]
    );
}

#[test]
fn goals_ranking_breaks_ties_on_goals_scored() {
    let mut t: GoalTable =
        MatchTable::with_policy(&ABC, all_pairs(&ABC), Scoring::three_points(), GoalsRanking)
            .unwrap();
    t.set_result_from_str(&"A", &"B", "1:1").unwrap();
    t.set_result_from_str(&"A", &"C", "2:2").unwrap();
    t.set_result_from_str(&"B", &"C", "4:4").unwrap();

    // Three draws, two points each. Goals: A 1+2, B 1+4, C 2+4.
    assert_eq!(
        t.sorted_ranking()
            .iter()
            .map(|s| (s.team, s.points, s.tie_break))
            .collect::<Vec<_>>(),
        vec![("C", 2, Some(6)), ("B", 2, Some(5)), ("A", 2, Some(3))]
    );
    assert_eq!(t.rank_groups().len(), 3);
}
