use std::time::{Duration, Instant};

use super::debounce::Debouncer;
use crate::page::PageSnapshot;
use crate::storage::{QueryOutcome, SearchConfig, SearchIndex};

/// Search-as-you-type box: owns the index, the pending query and the results panel state.
#[derive(Debug)]
pub struct SearchWidget {
    index: SearchIndex,
    debouncer: Debouncer<String>,
    outcome: QueryOutcome,
    executed_queries: usize,
}

impl SearchWidget {
    /// Builds the index once for the page. A page without entries gives an
    /// empty index whose queries all come back empty.
    pub fn create(page: &PageSnapshot, config: SearchConfig) -> Self {
        Self::with_index(SearchIndex::build(page, config))
    }

    pub fn with_index(index: SearchIndex) -> Self {
        let delay = Duration::from_millis(index.config().debounce_ms);
        Self {
            index,
            debouncer: Debouncer::new(delay),
            outcome: QueryOutcome::Hidden,
            executed_queries: 0,
        }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    pub fn is_panel_visible(&self) -> bool {
        !matches!(self.outcome, QueryOutcome::Hidden)
    }

    pub fn executed_queries(&self) -> usize {
        self.executed_queries
    }

    /// Records the input box's current text; the query runs after the quiet window.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.debouncer.schedule(text.to_string(), now);
    }

    /// When the next pending query is due, if any. Hosts wake up at this instant.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Runs the pending query if its window has elapsed. Returns true when the
    /// panel state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(query) = self.debouncer.poll(now) else {
            return false;
        };
        self.executed_queries += 1;
        let outcome = self.index.search(&query);
        log::debug!("search {:?}: {}", query, describe(&outcome));
        let changed = outcome != self.outcome;
        self.outcome = outcome;
        changed
    }

    /// Hides the panel and drops any pending query. The index is kept.
    pub fn dismiss(&mut self) {
        self.debouncer.cancel();
        self.outcome = QueryOutcome::Hidden;
    }

    pub fn on_click(&mut self, inside_widget: bool) {
        if !inside_widget {
            self.dismiss();
        }
    }

    pub fn teardown(mut self) -> SearchIndex {
        self.debouncer.cancel();
        self.index
    }
}

fn describe(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::Hidden => "hidden".to_string(),
        QueryOutcome::NoResults => "no results".to_string(),
        QueryOutcome::Results(hits) => format!("{} results", hits.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SearchEntry;

    fn widget() -> SearchWidget {
        SearchWidget::with_index(SearchIndex::new(
            vec![
                SearchEntry::new("Phishing Triage", "/p1", "Playbooks"),
                SearchEntry::new("Log Review", "/p2", "Playbooks"),
            ],
            SearchConfig::default(),
        ))
    }

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    #[test]
    fn create_on_page_without_entries_is_empty() {
        let mut widget = SearchWidget::create(&PageSnapshot::default(), SearchConfig::default());
        assert!(widget.index().is_empty());

        let start = Instant::now();
        widget.on_input("phish", start);
        widget.tick(ms(start, 150));
        assert_eq!(widget.outcome(), &QueryOutcome::NoResults);
    }

    #[test]
    fn keystrokes_in_one_window_execute_once() {
        let start = Instant::now();
        let mut widget = widget();
        let mut typed = String::new();
        for (i, ch) in "phish".chars().enumerate() {
            typed.push(ch);
            widget.on_input(&typed, ms(start, i as u64 * 50));
            widget.tick(ms(start, i as u64 * 50));
        }
        assert_eq!(widget.executed_queries(), 0);
        assert!(!widget.is_panel_visible());

        assert!(widget.tick(ms(start, 200 + 150)));
        assert_eq!(widget.executed_queries(), 1);
        let QueryOutcome::Results(hits) = widget.outcome() else {
            panic!("expected results");
        };
        assert_eq!(hits[0].url, "/p1");
    }

    #[test]
    fn short_query_hides_and_no_match_shows_placeholder() {
        let start = Instant::now();
        let mut widget = widget();

        widget.on_input("xyz", start);
        widget.tick(ms(start, 150));
        assert_eq!(widget.outcome(), &QueryOutcome::NoResults);
        assert!(widget.is_panel_visible());

        widget.on_input("p", ms(start, 200));
        widget.tick(ms(start, 350));
        assert_eq!(widget.outcome(), &QueryOutcome::Hidden);
        assert!(!widget.is_panel_visible());
    }

    #[test]
    fn outside_click_dismisses_but_keeps_index() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_input("log", start);
        widget.tick(ms(start, 150));
        assert!(widget.is_panel_visible());

        widget.on_click(true);
        assert!(widget.is_panel_visible());
        widget.on_click(false);
        assert!(!widget.is_panel_visible());
        assert_eq!(widget.index().entries().len(), 2);

        widget.on_input("log", ms(start, 500));
        widget.tick(ms(start, 650));
        assert!(widget.is_panel_visible());
    }

    #[test]
    fn dismiss_cancels_pending_query() {
        let start = Instant::now();
        let mut widget = widget();
        widget.on_input("phish", start);
        widget.dismiss();
        assert!(widget.next_deadline().is_none());
        assert!(!widget.tick(ms(start, 1000)));
        assert_eq!(widget.executed_queries(), 0);
    }
}
