//! Tests for the waiting-line aggregate.

use super::*;
use rstest::{fixture, rstest};

fn user(id: &str, name: &str, email: &str, gender: &str) -> User {
    User::try_from_strings(id, name, email, gender).expect("fixture user is valid")
}

fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value).expect("fixture email is valid")
}

fn gender(value: &str) -> Gender {
    Gender::new(value).expect("fixture gender is valid")
}

#[fixture]
fn ana() -> User {
    user("a", "Ana", "ana@x.com", "F")
}

#[fixture]
fn bo() -> User {
    user("b", "Bo", "bo@x.com", "M")
}

#[fixture]
fn cy() -> User {
    user("c", "Cy", "cy@x.com", "F")
}

#[fixture]
fn line(ana: User, bo: User, cy: User) -> Line {
    let mut line = Line::default();
    for entry in [ana, bo, cy] {
        line.admit(entry).expect("admission succeeds");
    }
    line
}

#[rstest]
fn admission_returns_the_tail_position(ana: User, bo: User) {
    let mut line = Line::default();

    assert_eq!(line.admit(ana), Ok(Position::from_index(0)));
    assert_eq!(line.admit(bo), Ok(Position::from_index(1)));
    assert_eq!(line.len(), 2);
}

#[rstest]
fn second_admission_of_the_same_id_is_rejected(ana: User) {
    let mut line = Line::default();
    line.admit(ana.clone()).expect("first admission");

    let result = line.admit(ana);

    assert_eq!(
        result,
        Err(LineError::DuplicateInLine { id: "a".to_owned() })
    );
    assert_eq!(line.len(), 1);
}

#[rstest]
#[case("ana@x.com", 1)]
#[case("bo@x.com", 2)]
#[case("cy@x.com", 3)]
fn positions_follow_admission_order(line: Line, #[case] address: &str, #[case] expected: usize) {
    let position = line.position_of(&email(address)).expect("email is in line");
    assert_eq!(position.get(), expected);
}

#[rstest]
fn unknown_email_is_reported(line: Line) {
    assert_eq!(
        line.position_of(&email("zed@x.com")),
        Err(LineError::EmailNotFound {
            email: "zed@x.com".to_owned()
        })
    );
}

#[rstest]
fn listing_annotates_every_entry_in_order(line: Line) {
    let listing = line.listing().expect("line has entries");

    let summary: Vec<(&str, usize)> = listing
        .iter()
        .map(|entry| (entry.name.as_str(), entry.position.get()))
        .collect();
    assert_eq!(summary, vec![("Ana", 1), ("Bo", 2), ("Cy", 3)]);
}

#[rstest]
fn listing_an_empty_line_fails() {
    assert_eq!(Line::default().listing(), Err(LineError::EmptyLine));
}

#[rstest]
fn filter_keeps_unfiltered_positions(line: Line) {
    let listing = line.listing().expect("line has entries");
    let filtered = line.filter_by_gender(&gender("F")).expect("matches exist");

    let expected: Vec<LineEntry> = listing
        .into_iter()
        .filter(|entry| entry.gender == "F")
        .collect();
    assert_eq!(filtered, expected);
    assert_eq!(
        filtered.iter().map(|e| e.position.get()).collect::<Vec<_>>(),
        vec![1, 3]
    );
}

#[rstest]
fn filter_without_matches_reports_gender(line: Line) {
    assert_eq!(
        line.filter_by_gender(&gender("X")),
        Err(LineError::GenderNotFound {
            gender: "X".to_owned()
        })
    );
}

#[rstest]
fn empty_line_takes_precedence_over_gender_not_found() {
    assert_eq!(
        Line::default().filter_by_gender(&gender("X")),
        Err(LineError::EmptyLine)
    );
}

#[rstest]
fn popping_renumbers_everyone_behind_the_head(mut line: Line, ana: User) {
    let before = line.listing().expect("line has entries");

    let served = line.pop_front().expect("head is served");

    assert_eq!(served, ana);
    let after = line.listing().expect("line still has entries");
    assert_eq!(after.len(), before.len() - 1);
    for (old, new) in before.iter().skip(1).zip(after.iter()) {
        assert_eq!(old.email, new.email);
        assert_eq!(new.position.get(), old.position.get() - 1);
    }
    assert!(!line.contains(&UserId::new("a").expect("id")));
}

#[rstest]
fn popping_an_empty_line_fails() {
    assert_eq!(Line::default().pop_front(), Err(LineError::EmptyLine));
}

#[rstest]
fn listing_strips_identifiers(line: Line) {
    let value = serde_json::to_value(line.listing().expect("entries")).expect("serialises");
    let first = &value.as_array().expect("array")[0];

    assert!(first.get("id").is_none());
    assert_eq!(first.get("position").and_then(|p| p.as_u64()), Some(1));
}

#[rstest]
fn snapshots_round_trip_in_order(line: Line) {
    let rebuilt = Line::from_entries(line.clone().into_entries());
    assert_eq!(rebuilt, line);
}
