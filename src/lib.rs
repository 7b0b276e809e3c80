pub mod api;
pub mod dashboard;
pub mod filters;
pub mod models;
pub mod report;
pub mod session;
pub mod ui;
pub mod utils;
