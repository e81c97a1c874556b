//! DOM presentation of the boot-up sequence. All timing lives in
//! `app_core::boot`; this module only mirrors the state machine into the
//! terminal markup each frame.

use crate::{dom, overlay};
use app_core::BootSequence;
use web_sys as web;

pub struct BootView {
    document: web::Document,
}

impl BootView {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        document
            .get_element_by_id("boot")
            .ok_or_else(|| anyhow::anyhow!("missing #boot"))?;
        Ok(Self {
            document: document.clone(),
        })
    }

    pub fn render(&self, boot: &BootSequence) {
        let doc = &self.document;
        dom::set_text(doc, "boot-line", &boot.display_text());

        // Step 1 scans in amber; the final line glitches red.
        dom::set_class(doc, "boot-line", "amber", boot.step() == 1 && !boot.is_glitching());
        dom::set_class(doc, "boot-line", "glitching", boot.is_glitching());
        overlay::set_visible(doc, "boot-glitch-overlay", boot.is_glitching());

        if boot.show_progress_bar() {
            overlay::show(doc, "boot-progress");
            let pct = format!("{}%", boot.progress());
            dom::set_style(doc, "boot-progress-fill", "width", &pct);
            dom::set_style(doc, "boot-progress-glow", "width", &pct);
            dom::set_text(doc, "boot-progress-label", &format!("PROGRESS: {}", pct));
        } else {
            overlay::hide(doc, "boot-progress");
        }

        dom::set_text(
            doc,
            "boot-status-defense",
            if boot.step() >= 1 { "SCANNING" } else { "STANDBY" },
        );
        dom::set_text(
            doc,
            "boot-status-relay",
            if boot.step() >= 2 { "ACTIVE" } else { "INITIALIZING" },
        );
    }

    pub fn hide(&self) {
        overlay::hide(&self.document, "boot");
    }
}
