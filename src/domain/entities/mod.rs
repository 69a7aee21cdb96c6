//! Domain Entities
//!
//! - `PackageSource` - Repository locator plus optional revision
//! - `PackageIdentity` - Name and version used to label the artifact
//! - `Artifact` - The produced archive

mod artifact;
mod identity;
mod source;

pub use artifact::Artifact;
pub use identity::{derive_name, PackageIdentity};
pub use source::PackageSource;
