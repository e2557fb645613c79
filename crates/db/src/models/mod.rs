pub mod activity;
pub mod client;
pub mod integration;
pub mod notification;
pub mod part;
pub mod project;
pub mod proposal;
pub mod task;
pub mod user;
