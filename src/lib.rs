//! Packer - package a git repository into a self-contained tarball
//!
//! A packaging run clones a source at a revision into a disposable
//! workspace, vendors its declared dependencies into the tree, derives a
//! short version from the revision, and writes `<name>-<version>.tar.gz`.
//!
//! ```no_run
//! use packer::{PackageSource, Packer};
//!
//! let source = PackageSource::new("https://example.com/widget.git").with_revision("v1.2.0");
//! let mut packer = Packer::new(source);
//! let artifact = packer.pack(None)?;
//! println!("{}", artifact.path().display());
//! # Ok::<(), packer::PackerError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{Packer, PackerBuilder};
pub use config::{ArchiveBackend, PackerConfig};
pub use domain::entities::{Artifact, PackageIdentity, PackageSource};
pub use domain::value_objects::PackStage;
pub use error::{PackerError, PackerResult};
