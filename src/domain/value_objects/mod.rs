//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod env_overrides;
mod hash;
mod pack_stage;

pub use env_overrides::EnvOverrides;
pub use hash::ContentHash;
pub use pack_stage::PackStage;
