//! Command-line front end for script checks.
//!
//! The binary is a thin wrapper over [`cli::run`]; the library target exists
//! so integration tests can drive [`cli::execute`] with parsed arguments.

pub mod cli;
pub mod logging;
