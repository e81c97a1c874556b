use web_sys as web;

#[inline]
pub fn show(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.class_list().remove_1("hidden");
    }
}

#[inline]
pub fn hide(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.class_list().add_1("hidden");
    }
}

#[inline]
pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    if visible {
        show(document, element_id);
    } else {
        hide(document, element_id);
    }
}
