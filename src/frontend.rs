mod backdrop;
mod controls;
pub(crate) mod dom;
mod hero;
mod pointer;
mod reveal;
mod scrolling;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::{Interval, Timeout};
use log::Level;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{DocumentReadyState, PageTransitionEvent};
use yew::AppHandle;

use crate::config::EffectsConfig;
use crate::error::Result;
use crate::loading::LoadingGate;
use crate::logging::log_event;
use crate::scroll::ThrottleGuard;

use self::backdrop::{Backdrop, BackdropProps};
use self::hero::GlitchBurst;
use self::reveal::RevealObserver;

const BACKDROP_HOST_ID: &str = "effects-backdrop";

thread_local! {
    static PAGE: RefCell<Option<PageController>> = const { RefCell::new(None) };
}

/// Re-requests an animation frame after every step until dropped.
pub(crate) struct FrameLoop {
    slot: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameLoop {
    pub(crate) fn start(step: impl FnMut(f64) + 'static) -> Self {
        let slot = Rc::new(RefCell::new(None));
        schedule_frame(&slot, Rc::new(RefCell::new(step)));
        Self { slot }
    }
}

fn schedule_frame<F: FnMut(f64) + 'static>(
    slot: &Rc<RefCell<Option<AnimationFrame>>>,
    step: Rc<RefCell<F>>,
) {
    let weak_slot = Rc::downgrade(slot);
    let frame = request_animation_frame(move |timestamp| {
        (step.borrow_mut())(timestamp);
        if let Some(slot) = weak_slot.upgrade() {
            schedule_frame(&slot, step);
        }
    });
    *slot.borrow_mut() = Some(frame);
}

pub(crate) enum Resource {
    Listener(EventListener),
    Interval(Interval),
    Timeout(Timeout),
    Frames(FrameLoop),
    Observer(RevealObserver),
}

impl From<EventListener> for Resource {
    fn from(listener: EventListener) -> Self {
        Self::Listener(listener)
    }
}

impl From<Interval> for Resource {
    fn from(interval: Interval) -> Self {
        Self::Interval(interval)
    }
}

impl From<Timeout> for Resource {
    fn from(timeout: Timeout) -> Self {
        Self::Timeout(timeout)
    }
}

impl From<FrameLoop> for Resource {
    fn from(frames: FrameLoop) -> Self {
        Self::Frames(frames)
    }
}

impl From<RevealObserver> for Resource {
    fn from(observer: RevealObserver) -> Self {
        Self::Observer(observer)
    }
}

/// Everything the effects share for one page load. Callbacks hold it weakly so
/// dropping the controller tears everything down.
pub(crate) struct PageState {
    pub(crate) config: EffectsConfig,
    pub(crate) last_scroll_y: Cell<f64>,
    pub(crate) scroll_throttle: RefCell<ThrottleGuard>,
    pub(crate) scroll_timer: RefCell<Option<Timeout>>,
    pub(crate) loading: RefCell<LoadingGate>,
    pub(crate) typing: RefCell<Option<Timeout>>,
    pub(crate) glitch_burst: RefCell<Option<GlitchBurst>>,
    resources: RefCell<Vec<Resource>>,
}

impl PageState {
    fn new(config: EffectsConfig) -> Self {
        Self {
            config,
            last_scroll_y: Cell::new(dom::scroll_y()),
            scroll_throttle: RefCell::new(ThrottleGuard::default()),
            scroll_timer: RefCell::new(None),
            loading: RefCell::new(LoadingGate::default()),
            typing: RefCell::new(None),
            glitch_burst: RefCell::new(None),
            resources: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn hold(&self, resource: impl Into<Resource>) {
        self.resources.borrow_mut().push(resource.into());
    }

    fn release_all(&self) {
        let resources = self.resources.take();
        drop(resources);
        self.scroll_timer.take();
        self.typing.take();
        self.glitch_burst.take();
    }
}

pub(crate) fn on_dom_ready(page: &Rc<PageState>, callback: impl FnOnce() + 'static) -> Result<()> {
    if dom::ready_state() != DocumentReadyState::Loading {
        callback();
        return Ok(());
    }

    let document = dom::document()?;
    let listener = EventListener::once(&document, "DOMContentLoaded", move |_| callback());
    page.hold(listener);
    Ok(())
}

pub(crate) fn on_window_load(page: &Rc<PageState>, callback: impl FnOnce() + 'static) -> Result<()> {
    if dom::ready_state() == DocumentReadyState::Complete {
        callback();
        return Ok(());
    }

    let window = dom::browser_window()?;
    let listener = EventListener::once(&window, "load", move |_| callback());
    page.hold(listener);
    Ok(())
}

pub(crate) struct PageController {
    page: Rc<PageState>,
    backdrop: Option<AppHandle<Backdrop>>,
}

impl PageController {
    fn start(config: EffectsConfig) -> Self {
        let page = Rc::new(PageState::new(config));

        start_effect("smooth_scroll", || scrolling::install_anchor_links(&page));
        start_effect("sidebar_navigation", || scrolling::install_sidebar_dots(&page));
        start_effect("scroll_effects", || scrolling::install_scroll_effects(&page));
        start_effect("mouse_trail", || pointer::install_mouse_trail(&page));
        start_effect("loading_screen", || hero::install_loading_screen(&page));
        start_effect("hero_intro", || hero::install_hero_intro(&page));
        start_effect("glitch", || hero::install_glitch(&page));
        start_effect("modals", || controls::install_modal_dismissal(&page));
        start_effect("contact_form", || controls::install_contact_form(&page));
        start_effect("global_exports", controls::install_globals);

        let reveal_page = Rc::downgrade(&page);
        start_effect("reveal", || {
            on_window_load(&page, move || {
                if let Some(page) = reveal_page.upgrade() {
                    start_effect("reveal_observer", || reveal::install(&page));
                }
            })
        });

        let mut backdrop = None;
        start_effect("backdrop", || {
            backdrop = Some(mount_backdrop(&page)?);
            Ok(())
        });

        Self { page, backdrop }
    }

    fn downgrade(&self) -> Weak<PageState> {
        Rc::downgrade(&self.page)
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        if let Some(handle) = self.backdrop.take() {
            handle.destroy();
        }
        if let Some(host) = dom::by_id(BACKDROP_HOST_ID) {
            host.remove();
        }
        controls::remove_globals();
        self.page.release_all();
        log_event(Level::Info, "page_torn_down", json!({}));
    }
}

fn mount_backdrop(page: &Rc<PageState>) -> Result<AppHandle<Backdrop>> {
    let document = dom::document()?;
    let host = document
        .create_element("div")
        .map_err(dom::js_error("create backdrop host"))?;
    host.set_id(BACKDROP_HOST_ID);
    dom::body()?
        .append_child(&host)
        .map_err(dom::js_error("attach backdrop host"))?;

    let props = BackdropProps {
        particle_count: page.config.particle_count,
    };
    Ok(yew::Renderer::<Backdrop>::with_root_and_props(host, props).render())
}

/// Runs one effect's setup in isolation; a failure is logged and skipped.
pub(crate) fn start_effect(name: &'static str, install: impl FnOnce() -> Result<()>) {
    match install() {
        Ok(()) => log_event(Level::Debug, "effect_started", json!({ "effect": name })),
        Err(error) => log_event(
            Level::Warn,
            "effect_skipped",
            json!({ "effect": name, "reason": error.class(), "detail": error.to_string() }),
        ),
    }
}

fn install_teardown(controller: &PageController) -> Result<()> {
    let window = dom::browser_window()?;
    let weak = controller.downgrade();
    let listener = EventListener::new(&window, "pagehide", move |event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .map(PageTransitionEvent::persisted)
            .unwrap_or(false);
        if persisted || weak.upgrade().is_none() {
            return;
        }
        let controller = PAGE.with(|slot| slot.borrow_mut().take());
        drop(controller);
    });
    controller.page.hold(listener);
    Ok(())
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(Level::Trace);

    let config = dom::load_config();
    log::set_max_level(config.log_level_filter());
    log_event(
        Level::Info,
        "effects_starting",
        json!({ "particles": config.particle_count, "log_level": config.log_level }),
    );

    let controller = PageController::start(config);
    start_effect("teardown", || install_teardown(&controller));
    PAGE.with(|slot| *slot.borrow_mut() = Some(controller));
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    async fn dropping_frame_loop_stops_stepping() {
        let frames = Rc::new(Cell::new(0_u32));
        let frame_loop = {
            let frames = Rc::clone(&frames);
            FrameLoop::start(move |_| frames.set(frames.get() + 1))
        };

        TimeoutFuture::new(100).await;
        assert!(frames.get() > 0);

        drop(frame_loop);
        let stopped_at = frames.get();
        TimeoutFuture::new(100).await;
        assert_eq!(frames.get(), stopped_at);
    }

    #[wasm_bindgen_test]
    async fn releasing_page_cancels_held_timers() {
        let page = PageState::new(EffectsConfig::default());
        let fired = Rc::new(Cell::new(false));

        {
            let fired = Rc::clone(&fired);
            page.hold(Timeout::new(20, move || fired.set(true)));
        }
        {
            let fired = Rc::clone(&fired);
            page.hold(Interval::new(10, move || fired.set(true)));
        }
        page.release_all();
        TimeoutFuture::new(80).await;

        assert!(!fired.get());
    }
}
