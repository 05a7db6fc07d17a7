use socguide::page::PageSnapshot;
use socguide::storage::PreferenceStore;
use socguide::widgets::NavState;

/// Draws the navigation tree. Returns the href of a clicked link.
pub fn show(
    ui: &mut egui::Ui,
    page: &PageSnapshot,
    nav: &mut NavState,
    prefs: &mut PreferenceStore,
) -> Option<String> {
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .id_salt("sidebar")
        .show(ui, |ui| {
            for (s, section) in page.nav.iter().enumerate() {
                let expanded = nav.is_expanded(s);
                let chevron = if expanded { "v" } else { ">" };
                let title = egui::RichText::new(format!("{} {}", chevron, section.title.trim())).strong();

                let header = ui
                    .add(egui::Label::new(title).sense(egui::Sense::click()))
                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                if header.clicked() {
                    nav.toggle_section(s, prefs);
                }

                if nav.is_expanded(s) {
                    ui.indent(("nav_section", s), |ui| {
                        for (l, link) in section.links.iter().enumerate() {
                            if ui
                                .selectable_label(nav.is_link_active(s, l), link.text.trim())
                                .clicked()
                            {
                                clicked = Some(link.href.clone());
                            }
                        }
                    });
                }
                ui.add_space(6.0);
            }
        });

    clicked
}
