//! CMake/Ninja build support: the build directory and the configure/compile
//! invocations run inside it.

pub mod cmake;
pub mod directory;

pub use cmake::{compile_invocation, configure_args, configure_invocation};
pub use directory::BuildDirectory;
