//! Infrastructure Layer
//!
//! Datastore and identity provider adapters.

pub mod google;
pub mod memory;
pub mod postgres;
