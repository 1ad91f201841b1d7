//! Shared Kernel
//!
//! The smallest vocabulary shared by every crate in the workspace:
//! - Unified error type and result alias
//! - Typed identifiers
//!
//! Only things that mean the same thing in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
