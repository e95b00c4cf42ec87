//! Provisioning stages
//!
//! - [`environment`]: build the isolated environment from the bundled builder
//! - [`packages`]: install setup prerequisites, then the application, offline
//! - [`symlink`]: expose the installed executable at a user-chosen path

pub mod environment;
pub mod packages;
pub mod symlink;

pub use environment::create_install_structure;
pub use packages::pip_install_packages;
pub use symlink::create_symlink;
