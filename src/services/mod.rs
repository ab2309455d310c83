//! Service Layer
//!
//! Integrations the page components talk to through traits or plain
//! clients: key/value storage, analytics, the JSON API and the tokio runtime.
//!
//! ```text
//! ┌──────────────────────── PageContext ────────────────────────┐
//! │  KeyValueStore (local)   KeyValueStore (session)   Analytics │
//! └──────────────────────────────────────────────────────────────┘
//!          ▲                                  ▲
//!   MemoryStore / FileStore              LogAnalytics
//!
//!   ApiClient ──(reqwest)──► booking backend      runtime::block_on
//! ```

mod analytics;
mod api;
mod runtime;
mod storage;

pub use analytics::*;
pub use api::*;
pub use runtime::*;
pub use storage::*;
