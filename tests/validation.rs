use axum_storefront::dto::{
    cart::{MAX_QUANTITY, QuantityDelta},
    reviews::{MAX_SCORE, MIN_SCORE, ReviewRequest, TITLE_MAX_CHARS},
};

fn request(title: &str, content: &str, score: i32) -> ReviewRequest {
    ReviewRequest {
        title: title.to_string(),
        content: content.to_string(),
        score,
    }
}

#[test]
fn valid_review_is_trimmed() {
    let review = request("  Sharp  ", " Cut a rock in half. ", 5)
        .validate()
        .expect("valid review");

    assert_eq!(review.title, "Sharp");
    assert_eq!(review.content, "Cut a rock in half.");
    assert_eq!(review.score, 5);
}

#[test]
fn score_bounds_are_inclusive() {
    assert!(request("t", "c", MIN_SCORE).validate().is_ok());
    assert!(request("t", "c", MAX_SCORE).validate().is_ok());

    let issues = request("t", "c", MIN_SCORE - 1).validate().unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "score");

    let issues = request("t", "c", MAX_SCORE + 1).validate().unwrap_err();
    assert_eq!(issues[0].field, "score");
}

#[test]
fn every_issue_is_reported() {
    let issues = request("   ", "", 0).validate().unwrap_err();
    let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();

    assert_eq!(fields, vec!["title", "content", "score"]);
}

#[test]
fn overlong_title_is_rejected() {
    let title = "a".repeat(TITLE_MAX_CHARS + 1);
    let issues = request(&title, "content", 3).validate().unwrap_err();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "title");
    assert!(request(&"a".repeat(TITLE_MAX_CHARS), "content", 3).validate().is_ok());
}

#[test]
fn decrement_stops_at_zero() {
    assert_eq!(QuantityDelta::Decrement.apply(3), Some(2));
    assert_eq!(QuantityDelta::Decrement.apply(1), Some(0));
    assert_eq!(QuantityDelta::Decrement.apply(0), Some(0));
}

#[test]
fn increment_adds_one() {
    assert_eq!(QuantityDelta::Increment.apply(1), Some(2));
    assert_eq!(QuantityDelta::Increment.apply(MAX_QUANTITY - 1), Some(MAX_QUANTITY));
}

#[test]
fn increment_past_limit_is_refused() {
    assert_eq!(QuantityDelta::Increment.apply(MAX_QUANTITY), None);
    assert_eq!(QuantityDelta::Decrement.apply(MAX_QUANTITY), Some(MAX_QUANTITY - 1));
}

#[test]
fn delta_deserializes_from_snake_case() {
    let delta: QuantityDelta = serde_json::from_str("\"decrement\"").expect("delta");
    assert_eq!(delta, QuantityDelta::Decrement);
}
