//! socguide - interactivity for the SOC analyst guide
//!
//! - page: structured snapshot of a rendered page (nav, toc, regions)
//! - storage: search index and persisted preferences
//! - widgets: search box, scroll spy, sidebar, tabs, accordions, copy buttons, theme
//! - hotkeys: page-wide keyboard shortcuts

pub mod clipboard;
pub mod hotkeys;
pub mod page;
pub mod storage;
pub mod widgets;
