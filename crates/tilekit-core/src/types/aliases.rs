//! Type aliases for shared single-threaded state.
//!
//! The editing engine runs on the host's UI thread only, so sharing is done
//! with `Rc<RefCell<T>>` rather than locks.
//!
//! ## Usage
//!
//! ```rust
//! use tilekit_core::types::{shared, Shared};
//!
//! let markers: Shared<Vec<u32>> = shared(Vec::new());
//! markers.borrow_mut().push(7);
//! assert_eq!(markers.borrow().len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Used for capabilities handed to several owners at once, such as the
/// overlay sink every tool writes its markers into.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value in a new [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
