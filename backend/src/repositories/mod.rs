//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod feedback;
pub mod plan;
pub mod record;
pub mod template;
pub mod user;

pub use feedback::{CreateFeedback, FeedbackRecord, FeedbackRepository};
pub use plan::{AggregateDelta, CreatePlan, PlanRecord, PlanRepository, SaveProgress};
pub use record::{
    CreateTrainingRecord, RecordFilter, TrainingRecordRepository, TrainingRecordRow,
    UpdateTrainingRecord,
};
pub use template::{
    CreateTemplate, TemplateFilter, TemplateRecord, TemplateRepository, UpdateTemplate,
};
pub use user::{CreateUser, UpdateUserProfile, UserRecord, UserRepository};
