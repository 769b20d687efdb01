//! Network layer - runs API requests in the Tokio runtime
//!
//! The Network actor receives commands from the App layer,
//! calls the BlogSphere API and sends responses back.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::BlogClient;
