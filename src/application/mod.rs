//! Application Layer
//!
//! The packaging pipeline and the components it orchestrates.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Receives concrete ports from Infrastructure or from tests
//!
//! ## Components
//!
//! - `WorkspaceManager` - Owns the disposable staging directory
//! - `SourceFetcher` - Clones the source into the app directory
//! - `DependencyBuilder` - Vendors declared dependencies
//! - `VersionResolver` - Memoized short revision
//! - `Archiver` - Writes the tar.gz outside the workspace
//! - `Packer` - Runs the steps in order

pub mod archiver;
pub mod dependencies;
pub mod fetcher;
pub mod packer;
pub mod version;
pub mod workspace;

#[cfg(test)]
pub(crate) mod mocks;

pub use archiver::Archiver;
pub use dependencies::{BuildOutcome, DependencyBuilder};
pub use fetcher::{FetchOutcome, SourceFetcher};
pub use packer::{Packer, PackerBuilder};
pub use version::VersionResolver;
pub use workspace::{validate_app_subdir, WorkspaceManager, DEFAULT_APP_DIR};
