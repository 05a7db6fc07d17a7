use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::page::PageSnapshot;

/// One navigation target the search box can find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SearchEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            section: section.into(),
            content: None,
            tags: Vec::new(),
        }
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.section.to_lowercase().contains(query_lower)
            || self
                .content
                .as_deref()
                .is_some_and(|content| content.to_lowercase().contains(query_lower))
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(query_lower))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            min_query_len: 2,
            max_results: 8,
        }
    }
}

/// A kept entry plus the byte range of its title to emphasize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub index: usize,
    pub title: String,
    pub url: String,
    pub section: String,
    pub highlight: Option<Range<usize>>,
}

impl SearchHit {
    /// Splits the title into (before, emphasized, after).
    pub fn title_parts(&self) -> (&str, &str, &str) {
        match &self.highlight {
            Some(range) => (
                &self.title[..range.start],
                &self.title[range.clone()],
                &self.title[range.end..],
            ),
            None => (self.title.as_str(), "", ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Query too short to search; the panel is hidden.
    Hidden,
    NoResults,
    Results(Vec<SearchHit>),
}

#[derive(Debug, Default)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    config: SearchConfig,
}

impl SearchIndex {
    pub fn new(entries: Vec<SearchEntry>, config: SearchConfig) -> Self {
        Self { entries, config }
    }

    /// Builds the index from a page: its pre-built entries when supplied,
    /// otherwise one entry per navigation link.
    pub fn build(page: &PageSnapshot, config: SearchConfig) -> Self {
        let entries: Vec<SearchEntry> = match &page.search_entries {
            Some(entries) => entries
                .iter()
                .filter(|entry| !entry.title.trim().is_empty())
                .cloned()
                .collect(),
            None => page
                .nav
                .iter()
                .flat_map(|section| {
                    let section_title = section.title.trim();
                    section.links.iter().filter_map(move |link| {
                        let title = link.text.trim();
                        if title.is_empty() {
                            None
                        } else {
                            Some(SearchEntry::new(title, link.href.clone(), section_title))
                        }
                    })
                })
                .collect(),
        };
        log::debug!("search index built with {} entries", entries.len());
        Self::new(entries, config)
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn search(&self, raw_query: &str) -> QueryOutcome {
        let query = normalize_query(raw_query);
        if query.chars().count() < self.config.min_query_len {
            return QueryOutcome::Hidden;
        }

        let hits: Vec<SearchHit> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches(&query))
            .take(self.config.max_results)
            .map(|(index, entry)| SearchHit {
                index,
                title: entry.title.clone(),
                url: entry.url.clone(),
                section: entry.section.clone(),
                highlight: find_case_insensitive(&entry.title, &query),
            })
            .collect();

        if hits.is_empty() {
            QueryOutcome::NoResults
        } else {
            QueryOutcome::Results(hits)
        }
    }
}

pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Byte range of the first occurrence of `needle_lower` in `haystack`.
/// Matching runs on `str::to_lowercase` of the haystack, the same text the
/// filter sees, and the range is mapped back to the original. The needle is literal text.
pub fn find_case_insensitive(haystack: &str, needle_lower: &str) -> Option<Range<usize>> {
    if needle_lower.is_empty() {
        return None;
    }

    let lowered = haystack.to_lowercase();
    let found = lowered.find(needle_lower)?;
    let found_end = found + needle_lower.len();

    // (lowered offset, original start, original end) for every lowered char.
    let mut spans = Vec::with_capacity(lowered.len());
    let mut lowered_chars = lowered.char_indices();
    for (start, ch) in haystack.char_indices() {
        let end = start + ch.len_utf8();
        for _ in 0..ch.to_lowercase().count() {
            let (at, _) = lowered_chars.next()?;
            spans.push((at, start, end));
        }
    }

    let start = spans.iter().rev().find(|(at, _, _)| *at <= found)?.1;
    let end = spans.iter().rev().find(|(at, _, _)| *at < found_end)?.2;
    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{NavLink, NavSection};
    use pretty_assertions::assert_eq;

    fn playbooks() -> SearchIndex {
        SearchIndex::new(
            vec![
                SearchEntry::new("Phishing Triage", "/p1", "Playbooks"),
                SearchEntry::new("Log Review", "/p2", "Playbooks"),
            ],
            SearchConfig::default(),
        )
    }

    #[test]
    fn phishing_scenario() {
        let index = playbooks();

        let QueryOutcome::Results(hits) = index.search("phish") else {
            panic!("expected results");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "/p1");
        assert_eq!(hits[0].section, "Playbooks");
        assert_eq!(hits[0].title_parts(), ("", "Phish", "ing Triage"));

        assert_eq!(index.search("xyz"), QueryOutcome::NoResults);
        assert_eq!(index.search("p"), QueryOutcome::Hidden);
    }

    #[test]
    fn short_queries_are_hidden_after_trimming() {
        let index = playbooks();
        for query in ["", " ", "l", "  l  ", "\tP\n"] {
            assert_eq!(index.search(query), QueryOutcome::Hidden, "query {query:?}");
        }
    }

    #[test]
    fn section_matches_keep_index_order() {
        let index = playbooks();
        let QueryOutcome::Results(hits) = index.search("  PLAYBOOK ") else {
            panic!("expected results");
        };
        let urls: Vec<&str> = hits.iter().map(|hit| hit.url.as_str()).collect();
        assert_eq!(urls, vec!["/p1", "/p2"]);
        // Matched via section only, nothing in the title to emphasize.
        assert!(hits.iter().all(|hit| hit.highlight.is_none()));
    }

    #[test]
    fn results_truncate_to_max() {
        let entries = (0..20)
            .map(|i| SearchEntry::new(format!("Alert {i}"), format!("/a{i}"), "Alerts"))
            .collect();
        let index = SearchIndex::new(entries, SearchConfig::default());
        let QueryOutcome::Results(hits) = index.search("alert") else {
            panic!("expected results");
        };
        assert_eq!(hits.len(), 8);
        assert_eq!(hits.first().map(|h| h.index), Some(0));
        assert_eq!(hits.last().map(|h| h.index), Some(7));
    }

    #[test]
    fn content_and_tags_are_match_surfaces() {
        let mut malware = SearchEntry::new("Malware Analysis", "/m", "Playbooks");
        malware.content = Some("Detonate the sample in a sandbox".to_string());
        let mut edr = SearchEntry::new("EDR Basics", "/e", "Tools");
        edr.tags = vec!["CrowdStrike".to_string()];
        let index = SearchIndex::new(vec![malware, edr], SearchConfig::default());

        let QueryOutcome::Results(hits) = index.search("sandbox") else {
            panic!("expected results");
        };
        assert_eq!(hits[0].url, "/m");

        let QueryOutcome::Results(hits) = index.search("crowd") else {
            panic!("expected results");
        };
        assert_eq!(hits[0].url, "/e");
    }

    #[test]
    fn pattern_metacharacters_are_literal() {
        let index = SearchIndex::new(
            vec![
                SearchEntry::new("Regex: a.*b (greedy)", "/r", "Reference"),
                SearchEntry::new("aXXb", "/x", "Reference"),
                SearchEntry::new("C++ [tools]", "/c", "Reference"),
            ],
            SearchConfig::default(),
        );

        let QueryOutcome::Results(hits) = index.search("a.*b") else {
            panic!("expected results");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title_parts().1, "a.*b");

        let QueryOutcome::Results(hits) = index.search("++ [") else {
            panic!("expected results");
        };
        assert_eq!(hits[0].url, "/c");

        assert_eq!(index.search("(?i)"), QueryOutcome::NoResults);
        assert_eq!(index.search("^$|\\"), QueryOutcome::NoResults);
    }

    #[test]
    fn emphasizes_first_occurrence_only() {
        let range = find_case_insensitive("Log log LOG", "log");
        assert_eq!(range, Some(0..3));
        let range = find_case_insensitive("Blog Log", "log");
        assert_eq!(range, Some(1..4));
    }

    #[test]
    fn find_handles_non_ascii_boundaries() {
        let title = "Ärger über Phishing";
        let range = find_case_insensitive(title, "über").unwrap();
        assert_eq!(&title[range], "über");
        let range = find_case_insensitive(title, "är").unwrap();
        assert_eq!(&title[range], "Är");
        assert_eq!(find_case_insensitive(title, "zz"), None);
    }

    #[test]
    fn emphasis_agrees_with_filter_on_final_sigma() {
        let index = SearchIndex::new(
            vec![SearchEntry::new("ΟΔΟΣ Guide", "/g", "Greek")],
            SearchConfig::default(),
        );
        let QueryOutcome::Results(hits) = index.search("οδος") else {
            panic!("expected results");
        };
        assert_eq!(hits[0].title_parts(), ("", "ΟΔΟΣ", " Guide"));
    }

    #[test]
    fn build_prefers_page_entries_over_nav() {
        let mut page = PageSnapshot {
            nav: vec![NavSection {
                title: "  Playbooks ".to_string(),
                links: vec![
                    NavLink {
                        text: " Phishing Triage ".to_string(),
                        href: "phishing.html".to_string(),
                    },
                    NavLink {
                        text: "   ".to_string(),
                        href: "blank.html".to_string(),
                    },
                ],
            }],
            ..PageSnapshot::default()
        };

        let index = SearchIndex::build(&page, SearchConfig::default());
        assert_eq!(
            index.entries(),
            &[SearchEntry::new("Phishing Triage", "phishing.html", "Playbooks")]
        );

        page.search_entries = Some(vec![SearchEntry::new("Only This", "/o", "")]);
        let index = SearchIndex::build(&page, SearchConfig::default());
        assert_eq!(index.entries().len(), 1);
        assert_eq!(index.entries()[0].title, "Only This");
    }
}
