//! File system access for template instantiation.
//!
//! [`FileSystem`] is the capability every pipeline step works through;
//! [`Staging`] keeps all mutation away from the destination until commit.

pub mod filesystem;
pub mod staging;

pub use filesystem::{FileSystem, PathKind, StdFs};
pub use staging::{Staging, check_destination};
