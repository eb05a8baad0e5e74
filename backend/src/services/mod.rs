//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories. Each one maps storage failures to `ApiError`.

pub mod feedback;
pub mod plan;
pub mod record;
pub mod stats;
pub mod template;
pub mod user;

pub use feedback::FeedbackService;
pub use plan::PlanService;
pub use record::TrainingRecordService;
pub use stats::StatsService;
pub use template::TemplateService;
pub use user::UserService;
