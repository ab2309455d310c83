//! Eventing - Page Events and the Bus That Carries Them

mod bus;
mod page_event;

pub use bus::*;
pub use page_event::*;
