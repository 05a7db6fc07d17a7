use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use socguide::clipboard::copy_to_clipboard;
use socguide::page::{Block, PageSnapshot};
use socguide::widgets::{Accordion, CopyButton, LazyImages, TabGroup};

/// Per-block widget state, keyed by the block's position in the page.
#[derive(Default)]
pub struct ContentState {
    tabs: HashMap<String, TabGroup>,
    accordions: HashMap<String, Accordion>,
    copy_buttons: HashMap<String, CopyButton>,
    images: LazyImages,
    image_base: Option<PathBuf>,
    pub scroll_to: Option<String>,
}

pub struct ContentOutput {
    pub viewport_height: f32,
    /// `(region id, top, bottom)` relative to the top of the viewport.
    pub regions: Vec<(String, f32, f32)>,
}

impl ContentState {
    pub fn new(page: &PageSnapshot, image_base: Option<PathBuf>) -> Self {
        let mut lazy = Vec::new();
        for region in &page.regions {
            collect_lazy_images(&region.blocks, &mut lazy);
        }
        Self {
            images: LazyImages::new(lazy),
            image_base,
            ..Self::default()
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.copy_buttons
            .values()
            .filter_map(CopyButton::next_deadline)
            .min()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for button in self.copy_buttons.values_mut() {
            changed |= button.tick(now);
        }
        changed
    }

    fn image_uri(&self, src: &str) -> String {
        if src.contains("://") {
            return src.to_string();
        }
        let path = match &self.image_base {
            Some(base) => base.join(src),
            None => Path::new(src).to_path_buf(),
        };
        format!("file://{}", path.display())
    }
}

fn collect_lazy_images<'a>(blocks: &'a [Block], out: &mut Vec<&'a str>) {
    for block in blocks {
        match block {
            Block::Image { src, lazy: true, .. } => out.push(src),
            Block::Tabs { tabs } => {
                for tab in tabs {
                    collect_lazy_images(&tab.blocks, out);
                }
            }
            Block::Accordion { items } => {
                for item in items {
                    collect_lazy_images(&item.blocks, out);
                }
            }
            _ => {}
        }
    }
}

pub fn show(ui: &mut egui::Ui, page: &PageSnapshot, state: &mut ContentState) -> ContentOutput {
    let mut regions = Vec::with_capacity(page.regions.len());

    let output = egui::ScrollArea::vertical()
        .id_salt("content")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.heading(page.title.as_str());
            ui.add_space(12.0);

            for (r, region) in page.regions.iter().enumerate() {
                let top = ui.cursor().top();
                let heading = ui.label(egui::RichText::new(region.heading.as_str()).heading());
                if state.scroll_to.as_deref() == Some(region.id.as_str()) {
                    heading.scroll_to_me(Some(egui::Align::TOP));
                    state.scroll_to = None;
                }
                show_blocks(ui, &region.blocks, &format!("r{r}"), state);
                ui.add_space(24.0);
                regions.push((region.id.clone(), top, ui.cursor().top()));
            }
        });

    let viewport = output.inner_rect;
    ContentOutput {
        viewport_height: viewport.height(),
        regions: regions
            .into_iter()
            .map(|(id, top, bottom)| (id, top - viewport.top(), bottom - viewport.top()))
            .collect(),
    }
}

fn show_blocks(ui: &mut egui::Ui, blocks: &[Block], path: &str, state: &mut ContentState) {
    for (b, block) in blocks.iter().enumerate() {
        let key = format!("{path}/b{b}");
        match block {
            Block::Paragraph { text } => {
                ui.label(text.as_str());
            }
            Block::Code {
                code,
                language,
                no_copy,
            } => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        if let Some(language) = language {
                            ui.small(language.as_str());
                        }
                        if !*no_copy {
                            let button = state.copy_buttons.entry(key.clone()).or_default();
                            if ui.small_button(button.label()).clicked() {
                                button.copy(code, Instant::now(), copy_to_clipboard);
                            }
                        }
                    });
                    ui.label(egui::RichText::new(code.as_str()).monospace());
                });
            }
            Block::Tabs { tabs } => {
                let group = state
                    .tabs
                    .entry(key.clone())
                    .or_insert_with(|| TabGroup::new(tabs.len()));
                ui.horizontal(|ui| {
                    for (t, tab) in tabs.iter().enumerate() {
                        if ui
                            .selectable_label(group.active() == Some(t), tab.label.as_str())
                            .clicked()
                        {
                            group.select(t);
                        }
                    }
                });
                if let Some(active) = group.active() {
                    ui.separator();
                    show_blocks(ui, &tabs[active].blocks, &format!("{key}/t{active}"), state);
                }
            }
            Block::Accordion { items } => {
                let accordion = state
                    .accordions
                    .entry(key.clone())
                    .or_insert_with(|| Accordion::new(items.len()));
                let open: Vec<bool> = (0..items.len()).map(|a| accordion.is_open(a)).collect();

                for (a, item) in items.iter().enumerate() {
                    let marker = if open[a] { "-" } else { "+" };
                    let header = ui.selectable_label(open[a], format!("{} {}", marker, item.header));
                    if header.clicked() {
                        if let Some(accordion) = state.accordions.get_mut(&key) {
                            accordion.toggle(a);
                        }
                    }
                    if open[a] {
                        let item_path = format!("{key}/a{a}");
                        ui.indent(item_path.as_str(), |ui| {
                            show_blocks(ui, &item.blocks, &item_path, state);
                        });
                    }
                }
            }
            Block::Image { src, alt, .. } => {
                if state.images.is_loaded(src) {
                    let uri = state.image_uri(src);
                    ui.add(egui::Image::new(uri).max_width(ui.available_width()))
                        .on_hover_text(alt.as_str());
                } else {
                    let placeholder = ui.weak(format!("[{}]", alt));
                    if ui.is_rect_visible(placeholder.rect) {
                        state.images.on_visible(src);
                        ui.ctx().request_repaint();
                    }
                }
            }
        }
    }
}
