//! Domain Layer
//!
//! The vocabulary of a packaging run, free of process and archive details.
//!
//! ## Structure
//!
//! - `entities/` - What is packaged (PackageSource, PackageIdentity, Artifact)
//! - `value_objects/` - Immutable value types (PackStage, EnvOverrides, ContentHash)
//! - `ports/` - Capability traits implemented by the infrastructure layer
//!
//! Nothing here spawns a process; all external work goes through `ports`.

pub mod entities;
pub mod ports;
pub mod value_objects;
