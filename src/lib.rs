//! # buildscript - CMake/Ninja command dispatcher
//!
//! `bs` turns a small set of commands into the right sequence of external tool
//! runs for a C/C++ project: configure and compile with CMake and Ninja, run
//! the result, and gate it with Doxygen, Valgrind, clang-tidy and cppcheck.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fresh release build for the host
//! bs clean build --build-type Release
//!
//! # Cross-compile for a board with its toolchain file
//! bs build --target Tm4c123 --toolchain cmake/tm4c123.cmake
//!
//! # Static analysis
//! bs clang-tidy cppcheck --path-to-analyze src
//! ```
//!
//! ## Module Organization
//!
//! - [`toolchain`] - Host platform profile and tool installation
//! - [`build`] - Build directory lifecycle and CMake/Ninja invocations
//! - [`dispatch`] - Ordered command execution with preconditions
//! - [`host`] - Process, search-path, user and prompt access

/// CMake configure / Ninja compile and the build directory.
pub mod build;

/// Code quality tools (clang-tidy, cppcheck, Valgrind).
pub mod checker;

/// Project settings file (`buildscript.toml`).
pub mod config;

/// Ordered command execution.
pub mod dispatch;

/// Documentation generation (Doxygen).
pub mod doc;

/// Access to processes, the search path, the current user and prompts.
pub mod host;

/// Parsed commands and flags.
pub mod request;

/// Platform profile resolution and tool installation.
pub mod toolchain;
