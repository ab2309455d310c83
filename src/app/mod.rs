//! Application Layer
//!
//! Page context, component composition, the default page skeleton and
//! scripted replay.

pub mod application;
pub mod context;
pub mod navigation;
pub mod page;
pub mod script;
