//! Script - Scripted Event Replay
//!
//! A JSON list of user actions (clicks, typing, scrolling, waits) replayed
//! against a [`Site`]. Selectors use the same minimal syntax as
//! [`Document::query_selector`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::application::Site;
use crate::dom::{Document, DomEvent, ElementId, HistoryState};
use crate::error::{Error, Result};

/// One scripted action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Click { selector: String },
    Focus { selector: String },
    Blur { selector: String },
    Input { selector: String, value: String },
    Submit { selector: String },
    Scroll { y: f64 },
    Resize { width: u32 },
    Key { key: String },
    Visibility { hidden: bool },
    PopState {
        path: String,
        #[serde(default)]
        page: Option<String>,
    },
    Intersect { selector: String },
    BeforeUnload,
    /// Let time pass so timers can fire
    Wait { ms: u64 },
    SetLanguage { code: String },
    ToggleLanguage,
    RestoreNavigation,
}

/// How `wait` steps spend time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Only the page clock moves
    #[default]
    Virtual,
    /// Sleep for real before moving the page clock
    RealTime,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path)?;
    parse_script(&text)
}

fn resolve(doc: &Document, selector: &str) -> Result<ElementId> {
    doc.query_selector(selector).ok_or_else(|| Error::Invalid {
        message: format!("no element matches {selector}"),
    })
}

impl ScriptStep {
    /// The browser event for this step, if it is one
    pub fn to_event(&self, doc: &Document) -> Result<Option<DomEvent>> {
        let event = match self {
            ScriptStep::Click { selector } => DomEvent::Click {
                target: resolve(doc, selector)?,
            },
            ScriptStep::Focus { selector } => DomEvent::Focus {
                target: resolve(doc, selector)?,
            },
            ScriptStep::Blur { selector } => DomEvent::Blur {
                target: resolve(doc, selector)?,
            },
            ScriptStep::Input { selector, value } => DomEvent::Input {
                target: resolve(doc, selector)?,
                value: value.clone(),
            },
            ScriptStep::Submit { selector } => DomEvent::Submit {
                form: resolve(doc, selector)?,
            },
            ScriptStep::Scroll { y } => DomEvent::Scroll { y: *y },
            ScriptStep::Resize { width } => DomEvent::Resize { width: *width },
            ScriptStep::Key { key } => DomEvent::key(key.as_str()),
            ScriptStep::Visibility { hidden } => DomEvent::VisibilityChange { hidden: *hidden },
            ScriptStep::PopState { path, page } => DomEvent::PopState {
                path: path.clone(),
                state: page.clone().map(|page| HistoryState { page }),
            },
            ScriptStep::Intersect { selector } => DomEvent::Intersect {
                target: resolve(doc, selector)?,
            },
            ScriptStep::BeforeUnload => DomEvent::BeforeUnload,
            ScriptStep::Wait { .. }
            | ScriptStep::SetLanguage { .. }
            | ScriptStep::ToggleLanguage
            | ScriptStep::RestoreNavigation => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Replay `steps` in order; steps whose target is missing are skipped
pub async fn replay(site: &mut Site, steps: &[ScriptStep], pacing: Pacing) {
    for (index, step) in steps.iter().enumerate() {
        debug!(index, ?step, "Script step");
        match step {
            ScriptStep::Wait { ms } => {
                let duration = Duration::from_millis(*ms);
                if pacing == Pacing::RealTime {
                    tokio::time::sleep(duration).await;
                }
                site.advance(duration);
            }
            ScriptStep::SetLanguage { code } => {
                if let Err(e) = site.set_language(code) {
                    warn!(index, error = %e, "Skipping script step");
                }
            }
            ScriptStep::ToggleLanguage => site.toggle_language(),
            ScriptStep::RestoreNavigation => site.restore_navigation_state(),
            _ => match step.to_event(site.document()) {
                Ok(Some(event)) => {
                    site.dispatch(event);
                }
                Ok(None) => {}
                Err(e) => warn!(index, error = %e, "Skipping script step"),
            },
        }
    }
}
