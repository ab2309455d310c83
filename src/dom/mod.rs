//! DOM - Headless Page Model
//!
//! The element tree, window, browser events and timer queue the page
//! components operate on.

mod document;
mod event;
mod scheduler;
mod window;

pub use document::*;
pub use event::*;
pub use scheduler::*;
pub use window::*;
