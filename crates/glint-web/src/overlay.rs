use crate::dom;
use glint_core::OverlaySink;
use web_sys as web;

pub const LOADING_BAR_ID: &str = "loading-bar";
pub const TITLE_ID: &str = "title";

/// Loading bar and title elements driven by the loading sequencer.
///
/// The fullscreen overlay itself is drawn by the renderer from
/// `LoadingSequencer::overlay_opacity`; missing elements are skipped.
pub struct DomOverlay {
    bar: Option<web::HtmlElement>,
    title: Option<web::HtmlElement>,
}

impl DomOverlay {
    pub fn new(document: &web::Document) -> Self {
        let bar = dom::html_element(document, LOADING_BAR_ID);
        let title = dom::html_element(document, TITLE_ID);
        if bar.is_none() {
            log::warn!("[loading] #{} not found; progress will not be shown", LOADING_BAR_ID);
        }
        Self { bar, title }
    }
}

impl OverlaySink for DomOverlay {
    fn set_progress(&mut self, ratio: f32) {
        if let Some(bar) = &self.bar {
            _ = bar
                .style()
                .set_property("transform", &format!("scaleX({})", ratio));
        }
    }

    fn set_overlay_opacity(&mut self, _opacity: f32) {}

    fn end_loading_bar(&mut self) {
        if let Some(bar) = &self.bar {
            _ = bar.class_list().add_1("ended");
            _ = bar.style().set_property("transform", "scaleX(0)");
        }
    }

    fn set_title_opacity(&mut self, opacity: f32) {
        if let Some(title) = &self.title {
            _ = title.style().set_property("opacity", &opacity.to_string());
        }
    }

    fn hide_title(&mut self) {
        if let Some(title) = &self.title {
            _ = title.style().set_property("display", "none");
        }
    }
}
