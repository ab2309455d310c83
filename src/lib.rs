//! Pacific Panama Fishing Site Library
//!
//! Client-side behaviour of the Pacific Panama Fishing Expeditions website
//! (bilingual text, navigation, forms, lightbox, notifications) running
//! against a headless page model.

pub mod app;
pub mod constants;
pub mod dom;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod features;
pub mod helpers;
pub mod i18n;
pub mod services;

pub use app::application::{PageSummary, Site, SiteBuilder};
pub use error::{Error, Result};
