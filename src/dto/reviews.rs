use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::FieldError;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;
pub const TITLE_MAX_CHARS: usize = 150;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewRequest {
    pub title: String,
    pub content: String,
    pub score: i32,
}

/// A review submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReview {
    pub title: String,
    pub content: String,
    pub score: i32,
}

impl ReviewRequest {
    /// Checks every field and reports all issues at once.
    pub fn validate(self) -> Result<ValidReview, Vec<FieldError>> {
        let mut issues = Vec::new();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            issues.push(FieldError::new("title", "title is required"));
        } else if title.chars().count() > TITLE_MAX_CHARS {
            issues.push(FieldError::new(
                "title",
                format!("title must be at most {TITLE_MAX_CHARS} characters"),
            ));
        }

        let content = self.content.trim().to_string();
        if content.is_empty() {
            issues.push(FieldError::new("content", "content is required"));
        }

        if !(MIN_SCORE..=MAX_SCORE).contains(&self.score) {
            issues.push(FieldError::new(
                "score",
                format!("score must be between {MIN_SCORE} and {MAX_SCORE}"),
            ));
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        Ok(ValidReview {
            title,
            content,
            score: self.score,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewDeletion {
    pub review_id: Uuid,
    pub deleted: bool,
}
