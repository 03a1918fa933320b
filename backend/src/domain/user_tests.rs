//! Tests for user domain types.

use rstest::rstest;

use super::*;

#[rstest]
fn user_id_accepts_canonical_uuid() {
    let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let id = UserId::new(raw).expect("valid id");
    assert_eq!(id.to_string(), raw);
}

#[rstest]
fn user_id_rejects_empty_input() {
    let err = UserId::new("").expect_err("empty id rejected");
    assert_eq!(err, UserValidationError::EmptyId);
}

#[rstest]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
fn user_id_rejects_malformed_input(#[case] raw: &str) {
    let err = UserId::new(raw).expect_err("malformed id rejected");
    assert_eq!(err, UserValidationError::InvalidId);
}

#[rstest]
fn random_ids_parse_back() {
    let id = UserId::random();
    let reparsed = UserId::new(id.to_string()).expect("round trip");
    assert_eq!(reparsed, id);
}

#[rstest]
#[case("")]
#[case("   ")]
fn username_rejects_blank_input(#[case] raw: &str) {
    let err = Username::new(raw).expect_err("blank username rejected");
    assert_eq!(err, UserValidationError::EmptyUsername);
}

#[rstest]
fn username_preserves_surrounding_whitespace() {
    let username = Username::new(" bob ").expect("valid username");
    assert_eq!(username.as_ref(), " bob ");
}

#[rstest]
fn user_exposes_components() {
    let id = UserId::random();
    let username = Username::new("ada").expect("valid username");
    let user = User::new(id, username.clone(), 3);

    assert_eq!(user.id(), &id);
    assert_eq!(user.username(), &username);
    assert_eq!(user.exercise_count(), 3);
}
