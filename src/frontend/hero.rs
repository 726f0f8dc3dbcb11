use std::rc::{Rc, Weak};

use gloo::timers::callback::{Interval, Timeout};
use log::Level;
use serde_json::json;
use web_sys::HtmlElement;

use super::{dom, on_dom_ready, on_window_load, PageState};
use crate::error::{EffectError, Result};
use crate::glitch::{corrupt, should_glitch};
use crate::loading::{DismissTrigger, HIDING_OPACITY, HIDING_TRANSFORM, LOADING_SCREEN_ID};
use crate::logging::log_event;
use crate::typing::Typewriter;

const HERO_CHILDREN_SELECTOR: &str = ".hero-content > *";
const HERO_TITLE_SELECTOR: &str = ".hero-content h1";
const HERO_SUBTITLE_SELECTOR: &str = ".hero-content h2";
const PROFILE_SELECTOR: &str = ".profile-placeholder";
const HERO_STAGGER_MS: u32 = 200;
const PROFILE_ENTRY_DELAY_MS: u32 = 800;

pub(super) fn install_loading_screen(page: &Rc<PageState>) -> Result<()> {
    if dom::by_id(LOADING_SCREEN_ID).is_none() {
        return Err(EffectError::missing(format!("#{LOADING_SCREEN_ID}")));
    }

    schedule_dismissal(page, DismissTrigger::Fallback);

    let weak = Rc::downgrade(page);
    on_dom_ready(page, move || {
        if let Some(page) = weak.upgrade() {
            schedule_dismissal(&page, DismissTrigger::DomReady);
        }
    })?;

    let weak = Rc::downgrade(page);
    on_window_load(page, move || {
        if let Some(page) = weak.upgrade() {
            schedule_dismissal(&page, DismissTrigger::Load);
        }
    })
}

fn schedule_dismissal(page: &Rc<PageState>, trigger: DismissTrigger) {
    let weak = Rc::downgrade(page);
    let timer = Timeout::new(trigger.delay_ms(&page.config), move || {
        if let Some(page) = weak.upgrade() {
            hide_loading_screen(&page, trigger);
        }
    });
    page.hold(timer);
}

fn hide_loading_screen(page: &PageState, trigger: DismissTrigger) {
    if !page.loading.borrow_mut().dismiss(trigger) {
        return;
    }
    let Some(screen) = dom::by_id(LOADING_SCREEN_ID) else {
        return;
    };

    dom::set_style(&screen, "opacity", HIDING_OPACITY);
    dom::set_style(&screen, "transform", HIDING_TRANSFORM);
    Timeout::new(page.config.loading_fade_ms, move || {
        dom::set_style(&screen, "display", "none");
    })
    .forget();

    log_event(
        Level::Info,
        "loading_screen_hidden",
        json!({ "trigger": trigger.as_str() }),
    );
}

pub(super) fn install_hero_intro(page: &Rc<PageState>) -> Result<()> {
    let weak = Rc::downgrade(page);
    on_dom_ready(page, move || {
        if let Some(page) = weak.upgrade() {
            play_hero_intro(&page);
        }
    })
}

fn play_hero_intro(page: &Rc<PageState>) {
    for (index, element) in dom::query_all(HERO_CHILDREN_SELECTOR).into_iter().enumerate() {
        dom::set_style(&element, "opacity", "0");
        dom::set_style(&element, "transform", "translateY(30px)");
        let delay = HERO_STAGGER_MS.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
        Timeout::new(delay, move || {
            dom::set_style(&element, "transition", "all 0.8s ease");
            dom::set_style(&element, "opacity", "1");
            dom::set_style(&element, "transform", "translateY(0)");
        })
        .forget();
    }

    if let Some(profile) = dom::query_opt(PROFILE_SELECTOR) {
        dom::set_style(&profile, "opacity", "0");
        dom::set_style(&profile, "transform", "scale(0.5) rotate(180deg)");
        Timeout::new(PROFILE_ENTRY_DELAY_MS, move || {
            dom::set_style(&profile, "transition", "all 1.2s ease");
            dom::set_style(&profile, "opacity", "1");
            dom::set_style(&profile, "transform", "scale(1) rotate(0deg)");
        })
        .forget();
    }

    let weak = Rc::downgrade(page);
    let typing_start = Timeout::new(page.config.typing_start_delay_ms, move || {
        let Some(page) = weak.upgrade() else {
            return;
        };
        if let Some(subtitle) = dom::query_opt(HERO_SUBTITLE_SELECTOR) {
            let text = page.config.typing_text.clone();
            start_typing(&page, subtitle, &text);
        }
    });
    page.hold(typing_start);
}

/// Types `text` into `element`. Any run already in flight is cancelled first.
pub(crate) fn start_typing(page: &Rc<PageState>, element: HtmlElement, text: &str) {
    page.typing.take();
    element.set_inner_html("");

    let writer = Typewriter::new(text, page.config.typing_speed_ms, page.config.typing_pause_ms);
    type_next(Rc::downgrade(page), element, writer);
}

fn type_next(page: Weak<PageState>, element: HtmlElement, mut writer: Typewriter) {
    let Some(frame) = writer.next() else {
        return;
    };
    element.set_inner_html(&frame.markup());

    let Some(strong) = page.upgrade() else {
        return;
    };
    let Some(delay) = frame.next_delay_ms else {
        strong.typing.take();
        return;
    };
    let timer = Timeout::new(delay, move || type_next(page, element, writer));
    *strong.typing.borrow_mut() = Some(timer);
}

pub(super) fn install_glitch(page: &Rc<PageState>) -> Result<()> {
    let weak = Rc::downgrade(page);
    let interval = Interval::new(page.config.glitch_interval_ms, move || {
        let Some(page) = weak.upgrade() else {
            return;
        };
        if should_glitch(&mut rand::thread_rng(), page.config.glitch_chance) {
            start_glitch_burst(&page);
        }
    });
    page.hold(interval);
    Ok(())
}

/// A running corruption burst. Dropping it puts the original title back.
pub(crate) struct GlitchBurst {
    title: HtmlElement,
    original: String,
    _ticker: Interval,
    _restore: Timeout,
}

impl Drop for GlitchBurst {
    fn drop(&mut self) {
        self.title.set_text_content(Some(&self.original));
    }
}

fn start_glitch_burst(page: &Rc<PageState>) {
    if page.glitch_burst.borrow().is_some() {
        return;
    }
    let Some(title) = dom::query_opt(HERO_TITLE_SELECTOR) else {
        return;
    };
    let original = title.text_content().unwrap_or_default();

    let ticker = {
        let title = title.clone();
        let original = original.clone();
        let chance = page.config.glitch_char_chance;
        Interval::new(page.config.glitch_tick_ms, move || {
            let glitched = corrupt(&original, chance, &mut rand::thread_rng());
            title.set_text_content(Some(&glitched));
        })
    };

    let weak = Rc::downgrade(page);
    let restore = Timeout::new(page.config.glitch_duration_ms, move || {
        if let Some(page) = weak.upgrade() {
            page.glitch_burst.take();
        }
    });

    *page.glitch_burst.borrow_mut() = Some(GlitchBurst {
        title,
        original,
        _ticker: ticker,
        _restore: restore,
    });
}
