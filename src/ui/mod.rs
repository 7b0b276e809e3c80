//! Terminal dashboard.
//!
//! `app` owns the screen flow (session check, login, role dashboard) and the
//! event loop; the role screens implement [`view::View`].

pub mod admin;
pub mod app;
pub mod components;
pub mod layout;
pub mod login;
pub mod reviewer;
pub mod view;

pub use app::{run_app, App};
