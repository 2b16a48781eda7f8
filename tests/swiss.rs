//! Integration tests for Swiss system pairing.

use joust::{GoalScore, JoustError, Pairing, Scoring, SwissSystem};

type Swiss = SwissSystem<&'static str, GoalScore>;

fn pairs(round: &[Pairing<&'static str>]) -> Vec<(&'static str, &'static str)> {
    round.iter().map(|p| (p.first, p.second)).collect()
}

#[test]
fn first_round_follows_identifier_order() {
    let mut swiss = Swiss::new(&["A", "B", "C", "D"]).unwrap();
    let round = swiss.next_round().unwrap();
    assert_eq!(pairs(&round.pairings), vec![("A", "B"), ("C", "D")]);
    assert_eq!(round.bye, None);
    assert_eq!(swiss.rounds().len(), 1);
    assert!(swiss.has_played(&"B", &"A"));
    assert!(!swiss.has_played(&"A", &"C"));
}

#[test]
fn later_rounds_follow_standings_and_avoid_rematches() {
    let mut swiss = Swiss::new(&["A", "B", "C", "D"]).unwrap();
    swiss.next_round().unwrap();
    swiss.set_result_from_str(&"A", &"B", "2:0").unwrap();
    // Either orientation is accepted.
    swiss.set_result_from_str(&"D", &"C", "1:1").unwrap();

    // A 3, C 1, D 1, B 0.
    let round = swiss.next_round().unwrap();
    assert_eq!(pairs(&round.pairings), vec![("A", "C"), ("D", "B")]);

    swiss.set_result_from_str(&"A", &"C", "1:0").unwrap();
    swiss.set_result_from_str(&"D", &"B", "0:3").unwrap();
    // A 6, B 3, C 1, D 1.
    let round = swiss.next_round().unwrap();
    assert_eq!(pairs(&round.pairings), vec![("A", "D"), ("B", "C")]);
    assert_eq!(swiss.sorted_ranking()[0].team, "A");
}

#[test]
fn results_need_a_pairing() {
    let mut swiss = Swiss::new(&["A", "B", "C", "D"]).unwrap();
    swiss.next_round().unwrap();
    assert!(matches!(
        swiss.set_result(&"A", &"C", GoalScore::new(1, 0)),
        Err(JoustError::UnknownMatch(_))
    ));
    assert!(matches!(
        swiss.set_result(&"A", &"Z", GoalScore::new(1, 0)),
        Err(JoustError::UnknownTeam(_))
    ));
    assert!(matches!(
        swiss.set_result_from_str(&"A", &"B", "1-0"),
        Err(JoustError::ParseError(_))
    ));
    assert!(swiss.table().points_map().values().all(|&p| p == 0));
}

#[test]
fn odd_field_rotates_the_bye() {
    let mut swiss = Swiss::new(&["A", "B", "C"]).unwrap();

    let round = swiss.next_round().unwrap();
    assert_eq!(round.bye, Some("C"));
    assert_eq!(pairs(&round.pairings), vec![("A", "B")]);
    swiss.set_result_from_str(&"A", &"B", "3:0").unwrap();

    // C already had a bye; B is the lowest ranked of the rest.
    let round = swiss.next_round().unwrap();
    assert_eq!(round.bye, Some("B"));
    assert_eq!(pairs(&round.pairings), vec![("A", "C")]);
    assert_eq!(swiss.bye_count(&"B"), Some(1));
    assert_eq!(swiss.bye_count(&"C"), Some(1));
    assert_eq!(swiss.bye_count(&"A"), Some(0));
}

#[test]
fn dead_end_is_reported_and_not_recorded() {
    let mut swiss = Swiss::new(&["A", "B"]).unwrap();
    swiss.next_round().unwrap();
    assert!(matches!(
        swiss.next_round(),
        Err(JoustError::NoPairing(_))
    ));
    assert_eq!(swiss.rounds().len(), 1);
}

#[test]
fn custom_scoring_and_duplicates() {
    let mut swiss = Swiss::with_scoring(&["A", "B"], Scoring::new(2, 1, 0)).unwrap();
    swiss.next_round().unwrap();
    swiss.set_result(&"B", &"A", GoalScore::new(1, 0)).unwrap();
    assert_eq!(swiss.table().points(&"B"), Some(2));
    assert!(matches!(
        Swiss::new(&["A", "A"]),
        Err(JoustError::InvalidArgument(_))
    ));
}

#[test]
fn correcting_a_result_from_the_other_side_replaces_it() {
    let mut swiss = Swiss::new(&["A", "B"]).unwrap();
    swiss.next_round().unwrap();
    swiss.set_result_from_str(&"A", &"B", "2:0").unwrap();
    swiss.set_result_from_str(&"B", &"A", "0:2").unwrap();
    assert_eq!(swiss.table().points(&"A"), Some(3));
    assert_eq!(swiss.table().points(&"B"), Some(0));

    // Now B reports a win instead.
    swiss.set_result_from_str(&"B", &"A", "1:0").unwrap();
    assert_eq!(swiss.table().points(&"A"), Some(0));
    assert_eq!(swiss.table().points(&"B"), Some(3));
    assert_eq!(swiss.table().result(&"A", &"B"), None);
    assert_eq!(swiss.table().result(&"B", &"A"), Some(&GoalScore::new(1, 0)));
}
