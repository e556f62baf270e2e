//! Client core for the EMS employee dashboard: session and access control,
//! attendance tracking with auto-checkout, leave requests, salary and audit
//! views, and the HR assistant conduit. Every remote dependency is an
//! external collaborator reached over REST, with deterministic local
//! fallbacks where availability beats strict correctness.

pub mod api;
pub mod assistant;
pub mod attendance;
pub mod auth;
pub mod config;
pub mod error;
pub mod leave;
pub mod location;
pub mod model;
pub mod store;
