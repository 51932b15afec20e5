//! `SkillTwin` Career Readiness
//!
//! Compares detected skills against role profiles and projects a 30/60/90
//! day growth plan.
//!
//! ## Features
//!
//! - Built-in backend developer profile, more roles loadable from YAML
//! - Case-insensitive role lookup by career goal
//! - Readiness percentage with status and timeline bands
//! - Growth projection listing missing core and advanced skills

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod career;
pub mod role;

pub use career::{Assessment, CareerMap, DEFAULT_ROLE};
pub use role::RoleProfile;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Assessment, CareerMap, RoleProfile};
}
