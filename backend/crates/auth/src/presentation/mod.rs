//! Presentation Layer
//!
//! HTTP handlers, form DTOs, route guard, pages and router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
