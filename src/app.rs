use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::Instant;

use socguide::hotkeys::{self, HotkeyEvent, Key, Modifiers};
use socguide::page::PageSnapshot;
use socguide::storage::{PreferenceStore, SearchConfig};
use socguide::widgets::nav::is_narrow;
use socguide::widgets::{
    MobileMenu, NavState, ScrollSpy, ScrollSpyConfig, SearchWidget, Theme,
};

use crate::ui::{self, ContentState, SearchBoxState};

pub struct GuideApp {
    page: PageSnapshot,
    page_path: Option<PathBuf>,
    prefs: PreferenceStore,

    search: Option<SearchWidget>,
    search_box: SearchBoxState,
    scroll_spy: Option<ScrollSpy>,
    nav: NavState,
    menu: MobileMenu,
    theme: Theme,
    content: ContentState,
}

impl GuideApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        page: PageSnapshot,
        page_path: Option<PathBuf>,
        prefs: PreferenceStore,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let theme = Theme::load(&prefs);
        apply_theme(&cc.egui_ctx, theme);

        let nav = NavState::new(&page, &prefs);
        let mut app = Self {
            page,
            page_path,
            prefs,
            search: None,
            search_box: SearchBoxState::default(),
            scroll_spy: None,
            nav,
            menu: MobileMenu::default(),
            theme,
            content: ContentState::default(),
        };
        app.init_page();
        app
    }

    fn init_page(&mut self) {
        self.search = Some(SearchWidget::create(&self.page, SearchConfig::default()));
        self.scroll_spy = ScrollSpy::create(&self.page, ScrollSpyConfig::default());
        self.nav = NavState::new(&self.page, &self.prefs);
        self.content = ContentState::new(&self.page, self.page_dir());
        self.search_box.reset();

        log::info!(
            "Page {} ready: {} search entries, {} toc targets",
            self.page.current_page(),
            self.search.as_ref().map_or(0, |s| s.index().entries().len()),
            self.scroll_spy.as_ref().map_or(0, |s| s.targets().len()),
        );
    }

    fn page_dir(&self) -> Option<PathBuf> {
        self.page_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }

    /// In-page fragments scroll; other pages load their JSON snapshot next to this one.
    fn open_link(&mut self, href: &str) {
        let (file, fragment) = match href.split_once('#') {
            Some((file, fragment)) => (file, Some(fragment)),
            None => (href, None),
        };

        if file.is_empty() || file == self.page.current_page() {
            if let Some(fragment) = fragment {
                self.scroll_to_fragment(fragment);
            }
            return;
        }

        let Some(dir) = self.page_dir() else {
            log::info!("Cannot follow {} from the bundled page", href);
            return;
        };
        let target = dir.join(file).with_extension("json");
        match PageSnapshot::load(&target) {
            Ok(page) => {
                self.switch_page(page, target);
                if let Some(fragment) = fragment {
                    self.scroll_to_fragment(fragment);
                }
            }
            Err(e) => log::warn!("Failed to open {}: {}", target.display(), e),
        }
    }

    fn scroll_to_fragment(&mut self, fragment: &str) {
        match self.page.resolve_fragment(&format!("#{fragment}")) {
            Some(region) => self.content.scroll_to = Some(region.id.clone()),
            None => log::debug!("Ignoring unknown fragment #{}", fragment),
        }
    }

    fn switch_page(&mut self, page: PageSnapshot, path: PathBuf) {
        if let Some(spy) = self.scroll_spy.as_mut() {
            spy.teardown();
        }
        if let Some(search) = self.search.take() {
            search.teardown();
        }
        self.menu.close();
        self.page = page;
        self.page_path = Some(path);
        self.init_page();
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        let (escape, slash, modifiers) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Slash),
                Modifiers {
                    ctrl: i.modifiers.ctrl,
                    meta: i.modifiers.mac_cmd,
                },
            )
        });

        let focused = self.search_box.has_focus;
        let events = [
            escape.then(|| hotkeys::resolve(Key::Escape, modifiers, focused)).flatten(),
            slash.then(|| hotkeys::resolve(Key::Slash, modifiers, focused)).flatten(),
        ];

        for event in events.into_iter().flatten() {
            match event {
                HotkeyEvent::Dismiss => {
                    self.menu.close();
                    if let Some(search) = self.search.as_mut() {
                        search.dismiss();
                    }
                }
                HotkeyEvent::FocusSearch => {
                    self.search_box.focus_requested = true;
                }
            }
        }
    }
}

impl eframe::App for GuideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.handle_hotkeys(ctx);
        if let Some(search) = self.search.as_mut() {
            search.tick(now);
        }
        self.content.tick(now);

        let width = ctx.screen_rect().width();
        let narrow = is_narrow(width);
        let mut link: Option<String> = None;
        let mut search_bounds = None;
        let mut menu_button = None;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if narrow {
                    let button = ui.button("Menu");
                    if button.clicked() {
                        self.menu.toggle();
                    }
                    menu_button = Some(button.rect);
                } else {
                    let label = if self.nav.is_sidebar_collapsed() {
                        "Show sidebar"
                    } else {
                        "Hide sidebar"
                    };
                    if ui.button(label).clicked() {
                        self.nav.toggle_sidebar(&mut self.prefs);
                    }
                }

                ui.strong("SOC Analyst Guide");
                ui.separator();

                if let Some(search) = self.search.as_mut() {
                    let output = ui::search_box::show(ui, search, &mut self.search_box, now);
                    search_bounds = Some(output.bounds);
                    if output.selected_url.is_some() {
                        link = output.selected_url;
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = match self.theme {
                        Theme::Dark => "Light theme",
                        Theme::Light => "Dark theme",
                    };
                    if ui.button(label).clicked() {
                        let theme = self.theme.toggle(&mut self.prefs);
                        apply_theme(ctx, theme);
                    }
                });
            });
        });

        let show_sidebar = if narrow {
            self.menu.is_open()
        } else {
            !self.nav.is_sidebar_collapsed()
        };
        let mut sidebar_rect = None;
        if show_sidebar {
            let panel = egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    ui::sidebar::show(ui, &self.page, &mut self.nav, &mut self.prefs)
                });
            sidebar_rect = Some(panel.response.rect);
            if let Some(href) = panel.inner {
                self.menu.on_nav_link_clicked(width);
                link = Some(href);
            }
        }

        if !narrow && !self.page.toc.is_empty() {
            let panel = egui::SidePanel::right("toc")
                .default_width(200.0)
                .show(ctx, |ui| ui::toc::show(ui, &self.page, self.scroll_spy.as_ref()));
            if let Some(href) = panel.inner {
                link = Some(href);
            }
        }

        let content = egui::CentralPanel::default()
            .show(ctx, |ui| ui::content::show(ui, &self.page, &mut self.content))
            .inner;

        if let Some(spy) = self.scroll_spy.as_mut() {
            let regions: Vec<(&str, f32, f32)> = content
                .regions
                .iter()
                .map(|(id, top, bottom)| (id.as_str(), *top, *bottom))
                .collect();
            spy.observe_layout(content.viewport_height, &regions);
        }

        let click = ctx.input(|i| {
            if i.pointer.any_click() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = click {
            if let (Some(search), Some(bounds)) = (self.search.as_mut(), search_bounds) {
                search.on_click(bounds.contains(pos));
            }
            let on_menu = menu_button.is_some_and(|rect: egui::Rect| rect.contains(pos));
            let on_sidebar = sidebar_rect.is_some_and(|rect: egui::Rect| rect.contains(pos));
            if narrow && !on_menu && !on_sidebar {
                self.menu.close();
            }
        }

        if let Some(href) = link {
            if let Some(search) = self.search.as_mut() {
                search.dismiss();
            }
            self.open_link(&href);
        }

        let deadline = [
            self.search.as_ref().and_then(SearchWidget::next_deadline),
            self.content.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min();
        if let Some(deadline) = deadline {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };
    ctx.set_visuals(visuals);
}
