#![cfg(target_arch = "wasm32")]
//! Browser entry point: boots the terminal animation, then mounts the
//! WebGPU shrine scene, the glitch title, and the gallery modal.

use app_core::{glitch, BootSequence, GalleryState, GlitchTitle, SceneSession, SetupError};
use frame::{App, Phase, SceneParts};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod boot_view;
mod dom;
mod events;
mod frame;
mod gallery_view;
mod overlay;
mod render;
mod title_view;

// Analytics inclusion: one script tag per page load, nothing else.
const TRACKER_URL: &str = "https://stats.relic-collective.net/tracker.js";
const TRACKER_SITE_ID: &str = "rlc1-orbital-shrine";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(doc) = dom::window_document() {
                overlay::show(&doc, "fallback");
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    dom::inject_tracker(&document, TRACKER_URL, TRACKER_SITE_ID);

    let seed = js_sys::Date::now() as u64;
    let boot = BootSequence::new(seed, 0.0);
    let app = Rc::new(RefCell::new(App::new(document, boot)?));
    wire_pagehide(app.clone());
    frame::start_loop(app);
    Ok(())
}

/// Boot finished: build the scene asynchronously and swap phases. A
/// setup failure leaves a static fallback message instead of a scene.
pub(crate) async fn mount_scene(app: Rc<RefCell<App>>) {
    let document = app.borrow().document.clone();
    match build_scene(&document, &app).await {
        Ok(parts) => {
            log::info!("[scene] mounted");
            app.borrow_mut().phase = Phase::Scene(parts);
        }
        Err(e) => {
            log::error!("scene setup failed: {:?}", e);
            overlay::show(&document, "fallback");
            app.borrow_mut().phase = Phase::Failed;
        }
    }
}

async fn build_scene(
    document: &web::Document,
    app: &Rc<RefCell<App>>,
) -> anyhow::Result<SceneParts> {
    let mount = document
        .get_element_by_id("scene-mount")
        .ok_or(SetupError::NoMountTarget)?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{e:?}"))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("canvas cast failed"))?;
    canvas.set_id("scene-canvas");
    mount
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    dom::sync_canvas_backing_size(&canvas);

    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let seed = js_sys::Date::now() as u64;
    let gpu = render::GpuState::new(leaked_canvas, document, seed)
        .await
        .map_err(|e| SetupError::NoGraphicsContext {
            reason: format!("{e:#}"),
        })?;

    let clock = app.borrow().clock.clone();
    let now = clock.get();
    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let session = Rc::new(RefCell::new(SceneSession::new(
        seed ^ 0x9E37_79B9_7F4A_7C15,
        aspect,
    )));
    let gallery = Rc::new(RefCell::new(GalleryState::default()));
    let title = GlitchTitle::new(glitch::TITLE, seed.rotate_left(17), now);
    let title_view = title_view::TitleView::new(document, glitch::TITLE)?;
    overlay::show(document, "glitch-title");
    let gallery_view = gallery_view::GalleryView::new(document);
    gallery_view.wire_buttons(gallery.clone(), clock);
    let listeners = events::SceneListeners::wire(&canvas, session.clone());

    Ok(SceneParts::new(
        session,
        gallery,
        title,
        title_view,
        gallery_view,
        gpu,
        listeners,
        canvas,
    ))
}

/// GPU cleanup on page teardown; also the scene's dispose path.
fn wire_pagehide(app: Rc<RefCell<App>>) {
    if let Some(window) = web::window() {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            app.borrow_mut().shutdown();
        }) as Box<dyn FnMut()>);
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
