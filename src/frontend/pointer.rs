use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::{dom, FrameLoop, PageState};
use crate::error::Result;
use crate::trail::MouseTrail;

pub(super) fn install_mouse_trail(page: &Rc<PageState>) -> Result<()> {
    let trail = Rc::new(RefCell::new(MouseTrail::new(
        page.config.trail_capacity,
        page.config.trail_decay,
    )));

    let listener = {
        let trail = Rc::clone(&trail);
        EventListener::new(&dom::document()?, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                trail
                    .borrow_mut()
                    .push(f64::from(event.client_x()), f64::from(event.client_y()));
            }
        })
    };

    let frames = FrameLoop::start(move |_| trail.borrow_mut().step());

    page.hold(listener);
    page.hold(frames);
    Ok(())
}
