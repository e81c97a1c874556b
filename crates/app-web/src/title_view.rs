//! Per-letter spans for the glitching page title. Spans are built once;
//! each frame only the letters' text and styling are refreshed.

use app_core::LetterState;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct TitleView {
    letters: Vec<web::HtmlElement>,
}

impl TitleView {
    pub fn new(document: &web::Document, title: &str) -> anyhow::Result<Self> {
        let container = document
            .get_element_by_id("glitch-title")
            .ok_or_else(|| anyhow::anyhow!("missing #glitch-title"))?;
        container.set_text_content(None);
        let mut letters = Vec::with_capacity(title.chars().count());
        for ch in title.chars() {
            let span = document
                .create_element("span")
                .map_err(|e| anyhow::anyhow!("{e:?}"))?;
            span.set_class_name("letter");
            span.set_text_content(Some(&ch.to_string()));
            container
                .append_child(&span)
                .map_err(|e| anyhow::anyhow!("{e:?}"))?;
            let span: web::HtmlElement = span
                .dyn_into()
                .map_err(|_| anyhow::anyhow!("span cast failed"))?;
            letters.push(span);
        }
        Ok(Self { letters })
    }

    pub fn render(&self, states: &[LetterState]) {
        for (span, state) in self.letters.iter().zip(states) {
            let shown = span.text_content().unwrap_or_default();
            let want = state.ch.to_string();
            if shown != want {
                span.set_text_content(Some(&want));
            }
            let style = span.style();
            if state.is_glitching {
                let _ = span.class_list().add_1("glitching");
                let i = state.intensity;
                let shadow = format!(
                    "0 0 {}px #ff0000, 0 0 {}px #ff0000, {}px 0 #00ffff, {}px 0 #ff00ff",
                    10.0 + i * 25.0,
                    20.0 + i * 50.0,
                    2.0 + i * 6.0,
                    -2.0 - i * 6.0,
                );
                let _ = style.set_property("text-shadow", &shadow);
                let _ = style.set_property("transform", &format!("scale({})", 1.0 + i * 0.3));
            } else {
                let _ = span.class_list().remove_1("glitching");
                let _ = style.remove_property("text-shadow");
                let _ = style.remove_property("transform");
            }
        }
    }
}
