use std::collections::BTreeMap;

use crate::page::PageSnapshot;
use crate::storage::prefs::{
    log_persist_error, NAV_SECTION_STATES_KEY, SIDEBAR_COLLAPSED_KEY,
};
use crate::storage::PreferenceStore;

pub const MOBILE_BREAKPOINT: f32 = 1024.0;

const EXPANDED: &str = "expanded";
const COLLAPSED: &str = "collapsed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionState {
    pub slug: String,
    pub expanded: bool,
    pub has_active_link: bool,
}

/// Sidebar navigation: active links, collapsible sections and the collapse toggle.
#[derive(Debug)]
pub struct NavState {
    sections: Vec<SectionState>,
    active_links: Vec<(usize, usize)>,
    saved_states: BTreeMap<String, String>,
    sidebar_collapsed: bool,
}

impl NavState {
    pub fn new(page: &PageSnapshot, prefs: &PreferenceStore) -> Self {
        let current = page.current_page();
        let saved_states = prefs.get_map(NAV_SECTION_STATES_KEY);

        let mut active_links = Vec::new();
        let sections = page
            .nav
            .iter()
            .enumerate()
            .map(|(section_index, section)| {
                let mut has_active_link = false;
                for (link_index, link) in section.links.iter().enumerate() {
                    if link.href == current {
                        active_links.push((section_index, link_index));
                        has_active_link = true;
                    }
                }
                let slug = section_slug(&section.title);
                let expanded =
                    has_active_link || saved_states.get(&slug).map(String::as_str) == Some(EXPANDED);
                SectionState {
                    slug,
                    expanded,
                    has_active_link,
                }
            })
            .collect();

        Self {
            sections,
            active_links,
            saved_states,
            sidebar_collapsed: prefs.get_bool(SIDEBAR_COLLAPSED_KEY),
        }
    }

    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    pub fn is_link_active(&self, section: usize, link: usize) -> bool {
        self.active_links.contains(&(section, link))
    }

    pub fn is_expanded(&self, section: usize) -> bool {
        self.sections.get(section).is_some_and(|s| s.expanded)
    }

    pub fn toggle_section(&mut self, section: usize, prefs: &mut PreferenceStore) -> bool {
        let Some(state) = self.sections.get_mut(section) else {
            return false;
        };
        state.expanded = !state.expanded;
        let value = if state.expanded { EXPANDED } else { COLLAPSED };
        self.saved_states.insert(state.slug.clone(), value.to_string());
        log_persist_error(
            prefs.set_map(NAV_SECTION_STATES_KEY, &self.saved_states),
            "nav section states",
        );
        state.expanded
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn toggle_sidebar(&mut self, prefs: &mut PreferenceStore) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        log_persist_error(
            prefs.set_bool(SIDEBAR_COLLAPSED_KEY, self.sidebar_collapsed),
            "sidebar state",
        );
        self.sidebar_collapsed
    }
}

/// Section key for persisted state: non-alphanumerics become `-`, lowercased.
pub fn section_slug(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}

/// Slide-out sidebar for narrow viewports.
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Following a nav link closes the menu on narrow viewports only.
    pub fn on_nav_link_clicked(&mut self, viewport_width: f32) {
        if viewport_width <= MOBILE_BREAKPOINT {
            self.close();
        }
    }
}

pub fn is_narrow(viewport_width: f32) -> bool {
    viewport_width <= MOBILE_BREAKPOINT
}
