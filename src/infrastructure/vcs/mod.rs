//! Version Control Implementations

mod git;

pub use git::GitCli;
