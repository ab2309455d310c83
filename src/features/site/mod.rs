//! Site - Page-Wide Behaviour

mod controller;
mod forms;
mod lightbox;
mod notifications;

pub use controller::*;
pub use notifications::NotificationKind;
