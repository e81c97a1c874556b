//! Gallery modal wiring and per-frame sync. Button handlers only poke
//! the `GalleryState` machine; fades, the next-cycle, and the camera
//! re-target all resolve in the frame loop.

use crate::{dom, overlay};
use app_core::{catalog, GalleryState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct GalleryView {
    document: web::Document,
    last_index: Cell<Option<usize>>,
}

impl GalleryView {
    pub fn new(document: &web::Document) -> Self {
        Self {
            document: document.clone(),
            last_index: Cell::new(None),
        }
    }

    /// One-time button wiring. These listeners live for the page, so
    /// their closures are forgotten rather than retained.
    pub fn wire_buttons(
        &self,
        gallery: Rc<RefCell<GalleryState>>,
        clock: Rc<Cell<f64>>,
    ) {
        let doc = &self.document;
        {
            let gallery = gallery.clone();
            let clock = clock.clone();
            dom::add_click_listener(doc, "modal-close", move || {
                gallery.borrow_mut().request_close(clock.get());
            });
        }
        {
            let gallery = gallery.clone();
            let clock = clock.clone();
            dom::add_click_listener(doc, "modal-backdrop", move || {
                gallery.borrow_mut().request_close(clock.get());
            });
        }
        {
            let gallery = gallery.clone();
            let clock = clock.clone();
            dom::add_click_listener(doc, "modal-next", move || {
                gallery.borrow_mut().request_next(clock.get());
            });
        }
        {
            let gallery = gallery.clone();
            dom::add_click_listener(doc, "modal-zoom-btn", move || {
                gallery.borrow_mut().set_zoomed(true);
            });
        }
        {
            let gallery = gallery.clone();
            dom::add_click_listener(doc, "modal-image", move || {
                gallery.borrow_mut().set_zoomed(true);
            });
        }
        {
            let gallery = gallery.clone();
            dom::add_click_listener(doc, "modal-return", move || {
                gallery.borrow_mut().set_zoomed(false);
            });
        }
        {
            let gallery = gallery.clone();
            let document = self.document.clone();
            dom::add_click_listener(doc, "modal-download", move || {
                if let Some(entry) = gallery.borrow().entry() {
                    let filename = catalog::download_filename(entry.title);
                    dom::trigger_download(&document, entry.image, &filename);
                }
            });
        }
    }

    pub fn render(&self, gallery: &GalleryState, now: f64) {
        let doc = &self.document;
        let Some(entry) = gallery.entry() else {
            overlay::hide(doc, "modal");
            overlay::hide(doc, "modal-zoom");
            self.last_index.set(None);
            return;
        };

        if self.last_index.get() != gallery.index() {
            self.last_index.set(gallery.index());
            dom::set_text(doc, "modal-title", entry.title);
            self.set_image_src("modal-image", entry.image, entry.title);
            self.set_image_src("modal-zoom-image", entry.image, entry.title);
        }

        if gallery.is_zoomed() {
            overlay::hide(doc, "modal");
            overlay::show(doc, "modal-zoom");
        } else {
            overlay::show(doc, "modal");
            overlay::hide(doc, "modal-zoom");
            dom::set_style(doc, "modal", "opacity", &format!("{:.3}", gallery.opacity(now)));
        }
    }

    fn set_image_src(&self, element_id: &str, src: &str, alt: &str) {
        if let Some(el) = self.document.get_element_by_id(element_id) {
            if let Some(img) = el.dyn_ref::<web::HtmlImageElement>() {
                img.set_src(src);
                img.set_alt(alt);
            }
        }
    }
}
