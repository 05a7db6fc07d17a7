use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::storage::SearchEntry;

/// Structured snapshot of one rendered guide page.
///
/// Everything the widgets need is read from here once, at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    pub title: String,
    pub path: String,
    pub nav: Vec<NavSection>,
    pub search_entries: Option<Vec<SearchEntry>>,
    pub toc: Vec<TocLink>,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSection {
    pub title: String,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TocLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: String,
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        text: String,
    },
    Code {
        code: String,
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        no_copy: bool,
    },
    Tabs {
        tabs: Vec<Tab>,
    },
    Accordion {
        items: Vec<AccordionItem>,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        lazy: bool,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tab {
    pub label: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionItem {
    pub header: String,
    pub blocks: Vec<Block>,
}

impl PageSnapshot {
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, std::io::Error> {
        let page = serde_json::from_str(text)?;
        Ok(page)
    }

    /// File name used for active-link matching. An empty path is the index page.
    pub fn current_page(&self) -> &str {
        let name = self.path.rsplit('/').next().unwrap_or_default();
        if name.is_empty() {
            "index.html"
        } else {
            name
        }
    }

    /// Resolves a `#fragment` reference to the region it names.
    pub fn resolve_fragment(&self, href: &str) -> Option<&Region> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        self.regions.iter().find(|region| region.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"{
        "title": "Triage",
        "path": "guide/triage.html",
        "nav": [
            { "title": "Playbooks", "links": [ { "text": "Phishing Triage", "href": "triage.html" } ] }
        ],
        "toc": [ { "text": "Intro", "href": "#intro" } ],
        "regions": [
            {
                "id": "intro",
                "heading": "Intro",
                "blocks": [
                    { "type": "paragraph", "text": "Start here." },
                    { "type": "code", "code": "index=main" },
                    { "type": "tabs", "tabs": [ { "label": "Splunk", "blocks": [] } ] },
                    { "type": "image", "src": "flow.png", "lazy": true }
                ]
            }
        ]
    }"##;

    #[test]
    fn parses_snapshot_with_defaults() {
        let page = PageSnapshot::from_json(PAGE).unwrap();
        assert_eq!(page.nav.len(), 1);
        assert!(page.search_entries.is_none());
        assert_eq!(page.regions[0].blocks.len(), 4);
        match &page.regions[0].blocks[1] {
            Block::Code { no_copy, language, .. } => {
                assert!(!no_copy);
                assert!(language.is_none());
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_invalid_data() {
        let err = PageSnapshot::from_json("{ nope").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn current_page_uses_last_path_segment() {
        let mut page = PageSnapshot::from_json(PAGE).unwrap();
        assert_eq!(page.current_page(), "triage.html");
        page.path = "guide/".to_string();
        assert_eq!(page.current_page(), "index.html");
        page.path.clear();
        assert_eq!(page.current_page(), "index.html");
    }

    #[test]
    fn resolve_fragment_requires_hash_and_known_id() {
        let page = PageSnapshot::from_json(PAGE).unwrap();
        assert_eq!(page.resolve_fragment("#intro").map(|r| r.heading.as_str()), Some("Intro"));
        assert!(page.resolve_fragment("intro").is_none());
        assert!(page.resolve_fragment("#").is_none());
        assert!(page.resolve_fragment("#missing").is_none());
    }
}
