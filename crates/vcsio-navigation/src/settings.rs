//! Navigation tuning

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    /// Viewport width below which the paper menu behaves as a mobile panel
    pub mobile_breakpoint: f64,
    /// Gap left between the sticky header and a section scrolled into view
    pub paper_link_offset: f64,
    /// Extra space below the sticky header before a section counts as read
    pub scrollspy_header_padding: f64,
    /// Bottom root margin of the paper scrollspy, in percent of the viewport
    pub paper_bottom_margin_percent: f64,
    /// Minimum visible ratio for a section to count as intersecting
    pub scrollspy_threshold: f64,
    /// Section highlighted while the reader is still at the hero banner
    pub abstract_section: String,
    /// Fraction of the hero height under which `abstract` is forced
    pub hero_abstract_fraction: f64,
    /// Offset used instead when there is no hero banner
    pub no_hero_abstract_offset: f64,
    /// Fraction of the hero height under which `abstract` is highlighted on setup
    pub hero_initial_fraction: f64,
    /// Offset used instead on setup when there is no hero banner
    pub no_hero_initial_offset: f64,
    /// Sections starting below this fraction of the viewport are skipped by
    /// the closest-section fallback
    pub fallback_viewport_fraction: f64,
    /// Top root margin of the API scrollspy, in pixels (shrinks the pane)
    pub api_margin_top: f64,
    /// Bottom root margin of the API scrollspy, in percent of the pane
    pub api_bottom_margin_percent: f64,
    /// Lead-in kept above an API section scrolled to by its link
    pub api_link_lead: f64,
    /// Delay before the API pane nudge that forces a first scrollspy pass
    pub api_nudge_delay_ms: u64,
    /// Window offset above which the scroll-to-top button shows
    pub scroll_top_threshold: f64,
    /// Fade-out time before the scroll-to-top button is removed
    pub scroll_top_fade_ms: u64,
}

impl NavSettings {
    pub fn api_nudge_delay(&self) -> Duration {
        Duration::from_millis(self.api_nudge_delay_ms)
    }

    pub fn scroll_top_fade(&self) -> Duration {
        Duration::from_millis(self.scroll_top_fade_ms)
    }

    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width < self.mobile_breakpoint
    }
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            paper_link_offset: 20.0,
            scrollspy_header_padding: 24.0,
            paper_bottom_margin_percent: 50.0,
            scrollspy_threshold: 0.01,
            abstract_section: "abstract".to_string(),
            hero_abstract_fraction: 0.5,
            no_hero_abstract_offset: 100.0,
            hero_initial_fraction: 0.3,
            no_hero_initial_offset: 50.0,
            fallback_viewport_fraction: 0.75,
            api_margin_top: 20.0,
            api_bottom_margin_percent: 60.0,
            api_link_lead: 10.0,
            api_nudge_delay_ms: 100,
            scroll_top_threshold: 100.0,
            scroll_top_fade_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: NavSettings =
            serde_json::from_str(r#"{ "mobile_breakpoint": 640 }"#).unwrap();
        assert_eq!(settings.mobile_breakpoint, 640.0);
        assert_eq!(settings.scroll_top_threshold, 100.0);
        assert!(settings.is_mobile(639.0));
        assert!(!settings.is_mobile(640.0));
    }
}
