pub mod client;
pub mod functions;
pub mod integration_admin;
pub mod notification;
pub mod part;
pub mod project;
pub mod proposal;
pub mod task;
pub mod webhooks;
