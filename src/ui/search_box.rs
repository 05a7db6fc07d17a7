use egui::text::LayoutJob;
use egui_extras::{Column, TableBuilder};
use std::time::Instant;

use socguide::storage::{QueryOutcome, SearchHit};
use socguide::widgets::SearchWidget;

#[derive(Default)]
pub struct SearchBoxState {
    pub text: String,
    pub focus_requested: bool,
    pub has_focus: bool,
}

impl SearchBoxState {
    pub fn reset(&mut self) {
        self.text.clear();
        self.focus_requested = false;
    }
}

pub struct SearchBoxOutput {
    /// Input plus results panel; clicks outside this dismiss the panel.
    pub bounds: egui::Rect,
    pub selected_url: Option<String>,
}

pub fn show(
    ui: &mut egui::Ui,
    widget: &mut SearchWidget,
    state: &mut SearchBoxState,
    now: Instant,
) -> SearchBoxOutput {
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.text)
            .hint_text("Search the guide (/)")
            .desired_width(260.0),
    );

    if state.focus_requested {
        response.request_focus();
        state.focus_requested = false;
    }
    state.has_focus = response.has_focus();

    if response.changed() {
        widget.on_input(&state.text, now);
    }

    let mut bounds = response.rect;
    let mut selected_url = None;

    if widget.is_panel_visible() {
        let area = egui::Area::new(egui::Id::new("search_results"))
            .order(egui::Order::Foreground)
            .fixed_pos(response.rect.left_bottom() + egui::vec2(0.0, 4.0))
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_width(360.0);
                    selected_url = show_results(ui, widget.outcome());
                });
            });
        bounds = bounds.union(area.response.rect);
    }

    SearchBoxOutput {
        bounds,
        selected_url,
    }
}

fn show_results(ui: &mut egui::Ui, outcome: &QueryOutcome) -> Option<String> {
    let hits = match outcome {
        QueryOutcome::Hidden => return None,
        QueryOutcome::NoResults => {
            ui.weak("No results found");
            return None;
        }
        QueryOutcome::Results(hits) => hits,
    };

    let mut selected = None;
    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder())
        .column(Column::auto().at_least(90.0))
        .body(|body| {
            body.rows(24.0, hits.len(), |mut row| {
                let hit = &hits[row.index()];
                row.col(|ui| {
                    let job = highlighted_title(ui, hit);
                    ui.add(egui::Label::new(job).selectable(false));
                });
                row.col(|ui| {
                    ui.weak(hit.section.as_str());
                });
                if row.response().clicked() {
                    selected = Some(hit.url.clone());
                }
            });
        });
    selected
}

fn highlighted_title(ui: &egui::Ui, hit: &SearchHit) -> LayoutJob {
    let (before, marked, after) = hit.title_parts();
    let font_id = egui::TextStyle::Body.resolve(ui.style());
    let plain = egui::TextFormat {
        font_id: font_id.clone(),
        color: ui.visuals().text_color(),
        ..Default::default()
    };
    let mark = egui::TextFormat {
        font_id,
        color: ui.visuals().strong_text_color(),
        background: ui.visuals().selection.bg_fill,
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    for (text, format) in [(before, &plain), (marked, &mark), (after, &plain)] {
        if !text.is_empty() {
            job.append(text, 0.0, format.clone());
        }
    }
    job
}
