pub mod activity_log_repo;
pub mod client_repo;
pub mod integration_settings_repo;
pub mod notification_repo;
pub mod notification_settings_repo;
pub mod part_repo;
pub mod project_repo;
pub mod proposal_repo;
pub mod task_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use client_repo::ClientRepo;
pub use integration_settings_repo::IntegrationSettingsRepo;
pub use notification_repo::{NewNotification, NotificationRepo};
pub use notification_settings_repo::NotificationSettingsRepo;
pub use part_repo::PartRepo;
pub use project_repo::ProjectRepo;
pub use proposal_repo::ProposalRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
