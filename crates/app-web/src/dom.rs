use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_class(document: &web::Document, element_id: &str, class: &str, enabled: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let list = el.class_list();
        if enabled {
            let _ = list.add_1(class);
        } else {
            let _ = list.remove_1(class);
        }
    }
}

#[inline]
pub fn set_style(document: &web::Document, element_id: &str, property: &str, value: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Browser-level file save: a temporary anchor with a `download`
/// attribute, clicked once and dropped.
pub fn trigger_download(document: &web::Document, href: &str, filename: &str) {
    let anchor = match document.create_element("a") {
        Ok(el) => el,
        Err(_) => return,
    };
    if let Some(anchor) = anchor.dyn_ref::<web::HtmlAnchorElement>() {
        anchor.set_href(href);
        anchor.set_download(filename);
        anchor.click();
    }
}

/// Inject the analytics script tag. Called at most once per page load;
/// the guard lives at the call site.
pub fn inject_tracker(document: &web::Document, src: &str, site_id: &str) {
    let script = match document.create_element("script") {
        Ok(el) => el,
        Err(_) => return,
    };
    if let Some(script) = script.dyn_ref::<web::HtmlScriptElement>() {
        script.set_src(src);
        let _ = script.set_attribute("data-website-id", site_id);
        script.set_async(true);
        script.set_defer(true);
        if let Some(body) = document.body() {
            let _ = body.append_child(script);
        }
    }
}
