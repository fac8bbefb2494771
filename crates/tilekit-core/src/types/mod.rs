//! Type system utilities and aliases.
//!
//! This module provides type aliases for the shared handles passed between
//! the tool host and its tools.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` handles

pub mod aliases;

pub use aliases::*;
