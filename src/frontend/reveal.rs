use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{dom, PageState};
use crate::error::Result;
use crate::reveal::{
    on_intersection, parse_pending_id, PendingReveals, RevealAction, RevealState, FADE_OUT_CLASS,
    PENDING_ATTRIBUTE, REVEAL_GROUPS, ROOT_MARGIN, THRESHOLD, VISIBLE_CLASS,
};

type PendingShows = Rc<RefCell<PendingReveals<Timeout>>>;

pub(crate) struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    _pending: PendingShows,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn reveal_state(target: &Element) -> RevealState {
    let classes = target.class_list();
    RevealState::from_classes(
        classes.contains(VISIBLE_CLASS),
        classes.contains(FADE_OUT_CLASS),
        target.has_attribute(PENDING_ATTRIBUTE),
    )
}

fn schedule_show(target: Element, delay_ms: u32, pending: &PendingShows) {
    let id = pending.borrow_mut().reserve();
    let _ = target.set_attribute(PENDING_ATTRIBUTE, &id.to_string());

    let weak: Weak<RefCell<PendingReveals<Timeout>>> = Rc::downgrade(pending);
    let timer = Timeout::new(delay_ms, move || {
        let _ = target.remove_attribute(PENDING_ATTRIBUTE);
        let classes = target.class_list();
        let _ = classes.remove_1(FADE_OUT_CLASS);
        let _ = classes.add_1(VISIBLE_CLASS);
        if let Some(pending) = weak.upgrade() {
            let fired = pending.borrow_mut().take(id);
            drop(fired);
        }
    });
    pending.borrow_mut().insert(id, timer);
}

fn cancel_show(target: &Element, pending: &PendingShows) {
    let id = target
        .get_attribute(PENDING_ATTRIBUTE)
        .and_then(|value| parse_pending_id(&value));
    let _ = target.remove_attribute(PENDING_ATTRIBUTE);
    if let Some(id) = id {
        let cancelled = pending.borrow_mut().take(id);
        drop(cancelled);
    }
}

fn apply_action(target: Element, action: RevealAction, pending: &PendingShows) {
    match action {
        RevealAction::Show { delay_ms } => schedule_show(target, delay_ms, pending),
        RevealAction::Cancel => cancel_show(&target, pending),
        RevealAction::Exit { clear_after_ms } => {
            let classes = target.class_list();
            let _ = classes.remove_1(VISIBLE_CLASS);
            let _ = classes.add_1(FADE_OUT_CLASS);
            Timeout::new(clear_after_ms, move || {
                let _ = target.class_list().remove_1(FADE_OUT_CLASS);
            })
            .forget();
        }
        RevealAction::Nothing => {}
    }
}

fn handle_entries(entries: Array, stagger_ms: u32, exit_ms: u32, pending: &PendingShows) {
    for (index, entry) in entries.iter().enumerate() {
        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
            continue;
        };
        let target = entry.target();
        let action = on_intersection(
            reveal_state(&target),
            entry.is_intersecting(),
            index,
            stagger_ms,
            exit_ms,
        );
        apply_action(target, action, pending);
    }
}

pub(super) fn install(page: &Rc<PageState>) -> Result<()> {
    let stagger_ms = page.config.reveal_stagger_ms;
    let exit_ms = page.config.reveal_exit_ms;

    let pending: PendingShows = Rc::default();

    let callback = {
        let pending = Rc::clone(&pending);
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                handle_entries(entries, stagger_ms, exit_ms, &pending);
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(dom::js_error("intersection observer"))?;

    for group in REVEAL_GROUPS {
        for (index, element) in dom::query_all(group.selector).iter().enumerate() {
            let _ = element
                .class_list()
                .add_1(group.animation_for(index).class_name());
            if let Some(delay) = group.transition_delay(index) {
                dom::set_style(element, "transition-delay", &delay);
            }
            observer.observe(element);
        }
    }

    page.hold(RevealObserver {
        observer,
        _callback: callback,
        _pending: pending,
    });
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    fn detached_target() -> Element {
        dom::document()
            .expect("document")
            .create_element("div")
            .expect("create element")
    }

    #[wasm_bindgen_test]
    async fn show_cancelled_before_it_fires_leaves_element_hidden() {
        let pending: PendingShows = Rc::default();
        let target = detached_target();

        apply_action(target.clone(), RevealAction::Show { delay_ms: 30 }, &pending);
        assert_eq!(reveal_state(&target), RevealState::Pending);

        apply_action(target.clone(), RevealAction::Cancel, &pending);
        TimeoutFuture::new(80).await;

        assert_eq!(reveal_state(&target), RevealState::Hidden);
        assert!(!target.class_list().contains(VISIBLE_CLASS));

        apply_action(target.clone(), RevealAction::Show { delay_ms: 10 }, &pending);
        TimeoutFuture::new(60).await;
        assert_eq!(reveal_state(&target), RevealState::Visible);
        assert!(!target.has_attribute(PENDING_ATTRIBUTE));
    }

    #[wasm_bindgen_test]
    async fn dropping_pending_shows_cancels_them() {
        let pending: PendingShows = Rc::default();
        let target = detached_target();

        apply_action(target.clone(), RevealAction::Show { delay_ms: 30 }, &pending);
        drop(pending);
        TimeoutFuture::new(80).await;

        assert!(!target.class_list().contains(VISIBLE_CLASS));
    }
}
