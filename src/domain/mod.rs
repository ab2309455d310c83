//! Domain - Pure Data Structures and Rules
//!
//! These types don't depend on the page model and describe the site's data.

pub mod config;
pub mod nav_state;
pub mod validation;
pub mod weather;
