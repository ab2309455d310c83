//! Features - Page Components
//!
//! Each feature owns one component: its state, event handling and timers.

pub mod language;
pub mod navigation;
pub mod site;
