use serde::Deserialize;
use std::time::Duration;
use tracing::error;

/// Thresholds, timings and selectors the page behavior works with.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Offset past which the header gets the `scrolled` class.
    pub scrolled_threshold: f64,
    /// How far ahead of a section's top it becomes the active one.
    pub section_lookahead: f64,
    /// Height of the fixed header, subtracted from anchor destinations.
    pub header_offset: f64,
    /// Distance above the viewport bottom an element must cross to fade in.
    pub reveal_margin: f64,
    pub fade_stagger_ms: u64,
    pub fade_duration_ms: u64,
    pub fade_distance_px: f64,
    pub submit_revert_ms: u64,
    pub submit_success_label: String,
    pub submit_success_color: String,
    pub preloader_delay_ms: u64,
    pub preloader_fade_ms: u64,
    pub selectors: Selectors,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub header: String,
    pub hamburger: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub sections: String,
    pub anchors: String,
    pub contact_form: String,
    pub submit_button: String,
    pub fade_targets: String,
    pub preloader: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
            section_lookahead: 300.0,
            header_offset: 80.0,
            reveal_margin: 100.0,
            fade_stagger_ms: 100,
            fade_duration_ms: 600,
            fade_distance_px: 30.0,
            submit_revert_ms: 3000,
            submit_success_label: "Message Sent!".to_string(),
            submit_success_color: "#10b981".to_string(),
            preloader_delay_ms: 500,
            preloader_fade_ms: 500,
            selectors: Selectors::default(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header: ".header".to_string(),
            hamburger: ".hamburger".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_links: ".nav-link".to_string(),
            sections: "section[id]".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            contact_form: ".contact-form".to_string(),
            submit_button: "button[type=\"submit\"]".to_string(),
            fade_targets: ".project-card, .skill-category, .timeline-item, .stat-card".to_string(),
            preloader: ".preloader".to_string(),
        }
    }
}

impl BehaviorConfig {
    /// Parses a JSON override document. Malformed input is logged and the
    /// defaults are used instead.
    pub fn from_json_or_default(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(err) => {
                error!("failed to parse behavior config: {err}");
                Self::default()
            }
        }
    }

    pub fn submit_revert(&self) -> Duration {
        Duration::from_millis(self.submit_revert_ms)
    }

    pub fn preloader_delay(&self) -> Duration {
        Duration::from_millis(self.preloader_delay_ms)
    }

    pub fn preloader_fade(&self) -> Duration {
        Duration::from_millis(self.preloader_fade_ms)
    }
}
