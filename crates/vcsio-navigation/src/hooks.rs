//! Structural hooks the fragments and the host page must provide
//!
//! Ids are plain id values, selectors are CSS selector lists parsed by
//! [`vcsio_dom::Selector`], classes are bare class names.

use serde::{Deserialize, Serialize};
use vcsio_dom::Selector;

use crate::settings::NavSettings;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hooks {
    // Host page
    pub tab_buttons: String,
    pub content_region_id: String,
    pub secondary_nav_id: String,
    pub sticky_header: String,
    pub scroll_to_top_id: String,

    // Paper tab
    pub paper_links: String,
    pub paper_sections_nav_id: String,
    pub paper_menu_button_id: String,
    pub hero_id: String,
    pub content_sections: String,
    pub tab_inner_content: String,
    pub fade_in: String,

    // API tab
    pub api_links: String,
    pub api_pane_id: String,
    pub api_sections: String,
    pub api_reveal: String,

    // Classes
    pub active_class: String,
    pub api_active_class: String,
    pub visible_class: String,
    pub hidden_class: String,
    pub desktop_flex_class: String,
    pub fade_in_class: String,
    pub api_section_class: String,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            tab_buttons: "#primaryTabsNav .tab-button".to_string(),
            content_region_id: "mainContentContainer".to_string(),
            secondary_nav_id: "secondaryNavContainer".to_string(),
            sticky_header: ".sticky-header".to_string(),
            scroll_to_top_id: "scrollToTopBtn".to_string(),

            paper_links: "#secondaryNavContainer .nav-button".to_string(),
            paper_sections_nav_id: "paperSectionsNav".to_string(),
            paper_menu_button_id: "paperMobileMenuButton".to_string(),
            hero_id: "hero-section".to_string(),
            content_sections: ".content-section".to_string(),
            tab_inner_content: ".tab-inner-content".to_string(),
            fade_in: ".fade-in-section".to_string(),

            api_links: "#apiNavMenu .api-nav-link".to_string(),
            api_pane_id: "apiRightPane".to_string(),
            api_sections: "#apiContent .api-section-content".to_string(),
            api_reveal: ".fade-in-section, .api-section-content".to_string(),

            active_class: "active".to_string(),
            api_active_class: "active-api-link".to_string(),
            visible_class: "visible".to_string(),
            hidden_class: "hidden".to_string(),
            desktop_flex_class: "md:flex".to_string(),
            fade_in_class: "fade-in-section".to_string(),
            api_section_class: "api-section-content".to_string(),
        }
    }
}

impl Hooks {
    /// Parse every selector hook up front so queries cannot fail later
    pub fn compile(&self) -> Result<PageSelectors> {
        Ok(PageSelectors {
            tab_buttons: self.tab_buttons.parse()?,
            sticky_header: self.sticky_header.parse()?,
            paper_links: self.paper_links.parse()?,
            content_sections: self.content_sections.parse()?,
            tab_inner_content: self.tab_inner_content.parse()?,
            fade_in: self.fade_in.parse()?,
            api_links: self.api_links.parse()?,
            api_sections: self.api_sections.parse()?,
            api_reveal: self.api_reveal.parse()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub tab_buttons: Selector,
    pub sticky_header: Selector,
    pub paper_links: Selector,
    pub content_sections: Selector,
    pub tab_inner_content: Selector,
    pub fade_in: Selector,
    pub api_links: Selector,
    pub api_sections: Selector,
    pub api_reveal: Selector,
}

/// Hooks, their compiled selectors and the tuning knobs, shared by every
/// navigation component
#[derive(Debug, Clone)]
pub struct NavContext {
    pub hooks: Hooks,
    pub selectors: PageSelectors,
    pub settings: NavSettings,
}

impl NavContext {
    pub fn new(hooks: Hooks, settings: NavSettings) -> Result<Self> {
        let selectors = hooks.compile()?;
        Ok(Self {
            hooks,
            selectors,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavigationError;

    #[test]
    fn test_default_hooks_compile() {
        assert!(Hooks::default().compile().is_ok());
    }

    #[test]
    fn test_child_combinator_hook() {
        let hooks = Hooks {
            api_links: "#apiNavMenu > .api-nav-link".to_string(),
            ..Hooks::default()
        };
        let ctx = NavContext::new(hooks, NavSettings::default()).unwrap();

        let mut doc = vcsio_dom::Document::new(vcsio_dom::Viewport::default());
        let root = doc.root();
        doc.set_inner_html(
            root,
            r##"<nav id="apiNavMenu"><a class="api-nav-link" href="#auth">Auth</a>
                <div><a class="api-nav-link" href="#nested">Nested</a></div></nav>"##,
        );
        let links = doc.select(root, &ctx.selectors.api_links);
        assert_eq!(links.len(), 1);
        assert_eq!(doc.attribute(links[0], "href"), Some("#auth"));
    }

    #[test]
    fn test_bad_selector_rejected() {
        let hooks = Hooks {
            api_links: "#apiNavMenu >".to_string(),
            ..Hooks::default()
        };
        assert!(matches!(
            NavContext::new(hooks, NavSettings::default()),
            Err(NavigationError::Dom(_))
        ));
    }
}
