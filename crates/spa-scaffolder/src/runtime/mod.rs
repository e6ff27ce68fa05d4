//! Node.js toolchain: runtime detection, external commands, package managers

pub mod check;
pub mod command;
pub mod package_manager;

pub use check::{check_node, check_npm, check_runtimes, RuntimeInfo};
pub use command::run_command;
pub use package_manager::{run_install, PackageManager};
