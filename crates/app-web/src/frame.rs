//! The single requestAnimationFrame loop and the app state it drives.
//! Every timed behavior in the page — boot typing, title glitches,
//! scene motion, modal fades — advances from here; there are no detached
//! timers anywhere.

use crate::boot_view::BootView;
use crate::events::SceneListeners;
use crate::gallery_view::GalleryView;
use crate::overlay;
use crate::render::GpuState;
use crate::title_view::TitleView;
use app_core::{BootSequence, GalleryEvent, GalleryState, GlitchTitle, SceneSession};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub enum Phase {
    Boot { boot: BootSequence, view: BootView },
    /// GPU init in flight; the loop idles until the future resolves.
    Starting,
    Scene(SceneParts),
    Failed,
}

pub enum Transition {
    MountScene,
}

pub struct SceneParts {
    session: Rc<RefCell<SceneSession>>,
    gallery: Rc<RefCell<GalleryState>>,
    title: GlitchTitle,
    title_view: TitleView,
    gallery_view: GalleryView,
    gpu: GpuState<'static>,
    listeners: SceneListeners,
    canvas: web::HtmlCanvasElement,
    disposed: bool,
}

impl SceneParts {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session: Rc<RefCell<SceneSession>>,
        gallery: Rc<RefCell<GalleryState>>,
        title: GlitchTitle,
        title_view: TitleView,
        gallery_view: GalleryView,
        gpu: GpuState<'static>,
        listeners: SceneListeners,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        Self {
            session,
            gallery,
            title,
            title_view,
            gallery_view,
            gpu,
            listeners,
            canvas,
            disposed: false,
        }
    }

    fn frame(&mut self, document: &web::Document, now: f64, dt: f64) {
        if self.disposed {
            return;
        }

        self.title.tick(now);
        self.title_view.render(self.title.letters());

        let events = self.session.borrow_mut().tick(dt);
        if events.entered_now {
            overlay::show(document, "status-overlay");
            overlay::show(document, "footer-panel");
        }
        if let Some(index) = events.opened {
            self.gallery.borrow_mut().open(index, now);
        }
        overlay::set_visible(
            document,
            "glitch-flash",
            self.session.borrow().is_flash_active(),
        );

        let gallery_event = self.gallery.borrow_mut().tick(now);
        match gallery_event {
            Some(GalleryEvent::Closed) => self.session.borrow_mut().set_selection(None),
            Some(GalleryEvent::Advanced(index)) => {
                let mut session = self.session.borrow_mut();
                session.set_selection(Some(index));
                session.retarget(index);
            }
            None => {}
        }
        self.gallery_view.render(&self.gallery.borrow(), now);

        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.session
            .borrow_mut()
            .set_aspect(w as f32 / h.max(1) as f32);
        self.gpu.resize_if_needed(w, h);
        let snap = self.session.borrow().snapshot();
        if let Err(e) = self.gpu.render(&snap) {
            log::error!("render error: {:?}", e);
        }
    }

    /// Teardown contract: remove listeners, stop mutating, detach the
    /// render surface. Idempotent; GPU resources drop with `self`.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.listeners.unwire();
        self.session.borrow_mut().dispose();
        self.canvas.remove();
    }
}

pub struct App {
    pub document: web::Document,
    pub phase: Phase,
    /// Monotonic page clock in seconds; shared with button closures so
    /// they can stamp state-machine requests.
    pub clock: Rc<Cell<f64>>,
    /// Cleared on shutdown; the RAF closure stops rescheduling.
    pub alive: Rc<Cell<bool>>,
    last_instant: Instant,
}

impl App {
    pub fn new(document: web::Document, boot: BootSequence) -> anyhow::Result<Self> {
        let view = BootView::new(&document)?;
        Ok(Self {
            document,
            phase: Phase::Boot { boot, view },
            clock: Rc::new(Cell::new(0.0)),
            alive: Rc::new(Cell::new(true)),
            last_instant: Instant::now(),
        })
    }

    pub fn frame(&mut self) -> Option<Transition> {
        let now_instant = Instant::now();
        let dt = (now_instant - self.last_instant).as_secs_f64();
        self.last_instant = now_instant;
        let now = self.clock.get() + dt;
        self.clock.set(now);

        match &mut self.phase {
            Phase::Boot { boot, view } => {
                boot.tick(now);
                view.render(boot);
                if boot.take_completed() {
                    view.hide();
                    self.phase = Phase::Starting;
                    return Some(Transition::MountScene);
                }
                None
            }
            Phase::Starting | Phase::Failed => None,
            Phase::Scene(parts) => {
                let (document, clock) = (self.document.clone(), self.clock.get());
                parts.frame(&document, clock, dt);
                None
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.alive.set(false);
        if let Phase::Scene(parts) = &mut self.phase {
            parts.dispose();
        }
    }
}

pub fn start_loop(app: Rc<RefCell<App>>) {
    let alive = app.borrow().alive.clone();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let app_tick = app.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive.get() {
            return;
        }
        let transition = app_tick.borrow_mut().frame();
        if let Some(Transition::MountScene) = transition {
            wasm_bindgen_futures::spawn_local(crate::mount_scene(app_tick.clone()));
        }
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
