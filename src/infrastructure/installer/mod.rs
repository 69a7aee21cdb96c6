//! Dependency Installer Implementations

mod command;

pub use command::CommandInstaller;
