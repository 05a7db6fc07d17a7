use socguide::page::PageSnapshot;
use socguide::widgets::ScrollSpy;

/// Table of contents with the scroll-spy marker. Returns the clicked fragment.
pub fn show(ui: &mut egui::Ui, page: &PageSnapshot, spy: Option<&ScrollSpy>) -> Option<String> {
    let mut clicked = None;

    ui.strong("On this page");
    ui.separator();
    for (i, link) in page.toc.iter().enumerate() {
        let active = spy.is_some_and(|spy| spy.is_active(i));
        if ui.selectable_label(active, link.text.as_str()).clicked() {
            clicked = Some(link.href.clone());
        }
    }

    clicked
}
