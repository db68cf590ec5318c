#![cfg(feature = "serde")]

use ai_core::Status;

#[test]
fn status_serializes_by_variant_name() {
    let json = serde_json::to_string(&Status::Running).unwrap();
    assert_eq!(json, "\"Running\"");
    let back: Status = serde_json::from_str("\"Failure\"").unwrap();
    assert_eq!(back, Status::Failure);
}
