//! Entities

pub mod auth_session;
pub mod pending_authorization;
pub mod user;
