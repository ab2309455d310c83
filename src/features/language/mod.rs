//! Language - Bilingual Text Switching

mod controller;

pub use controller::*;
