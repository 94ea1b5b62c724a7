//! Role-based access control.
//!
//! Every handler resolves ownership first and then asks [`authorize`] with a
//! fully described [`Resource`]; nothing here touches storage.
pub mod identity;
pub mod policy;

pub use identity::{Capabilities, Identity, Principal};
pub use policy::{authorize, ensure, Action, Decision, DenyReason, Resource};
