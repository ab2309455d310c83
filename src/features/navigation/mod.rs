//! Navigation - Pages, Menu and History

mod controller;

pub use controller::*;
