//! Feedback service

use crate::error::ApiError;
use crate::repositories::{CreateFeedback, FeedbackRepository};
use fitplan_shared::types::{FeedbackRequest, FeedbackResponse};
use fitplan_shared::FeedbackType;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct FeedbackService;

impl FeedbackService {
    /// Store feedback from an authenticated user
    pub async fn submit(
        pool: &PgPool,
        user_id: Uuid,
        req: FeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        let feedback_type = parse_type(req.feedback_type.as_deref())?;
        let content = req.content.trim().to_string();
        if content.is_empty() {
            return Err(ApiError::Validation("Content is required".to_string()));
        }

        let record = FeedbackRepository::create(
            pool,
            CreateFeedback {
                user_id,
                content,
                feedback_type: feedback_type.as_str().to_string(),
                contact_info: req.contact_info.filter(|c| !c.trim().is_empty()),
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(feedback_id = %record.id, user_id = %user_id, kind = %record.feedback_type, "Feedback received");

        Ok(FeedbackResponse {
            id: record.id.to_string(),
            created_at: record.created_at,
        })
    }
}

fn parse_type(value: Option<&str>) -> Result<FeedbackType, ApiError> {
    value
        .unwrap_or_default()
        .parse::<FeedbackType>()
        .map_err(ApiError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_type_defaults_to_suggestion() {
        assert_eq!(parse_type(None).unwrap(), FeedbackType::Suggestion);
        assert_eq!(parse_type(Some("")).unwrap(), FeedbackType::Suggestion);
        assert_eq!(parse_type(Some("issue")).unwrap(), FeedbackType::Issue);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(parse_type(Some("praise")), Err(ApiError::Validation(_))));
    }
}
