use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use super::{dom, PageState};
use crate::error::Result;
use crate::scroll::{
    anchor_scroll_top, current_section, floating_icon_transform, is_in_viewport, navbar_style,
    profile_transform, project_card_transform, skill_tag_transform, ScrollDirection, SectionSpan,
};

const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
const SIDEBAR_DOT_SELECTOR: &str = ".sidebar-dot";
const ACTIVE_CLASS: &str = "active";

/// Smooth-scrolls so the target sits just below the fixed header. Selectors
/// that match nothing, or are not valid, do nothing.
pub(crate) fn smooth_scroll_to(selector: &str, header_offset: f64) {
    let Some(target) = dom::query_opt(selector) else {
        return;
    };
    let Ok(window) = dom::browser_window() else {
        return;
    };

    let top = anchor_scroll_top(
        target.get_bounding_client_rect().top(),
        dom::scroll_y(),
        header_offset,
    );
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub(super) fn install_anchor_links(page: &Rc<PageState>) -> Result<()> {
    let header_offset = page.config.header_offset;

    for anchor in dom::query_all(ANCHOR_SELECTOR) {
        let target = anchor.clone();
        let listener = EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                if let Some(href) = target.get_attribute("href") {
                    smooth_scroll_to(&href, header_offset);
                }
            },
        );
        page.hold(listener);
    }

    Ok(())
}

pub(super) fn install_sidebar_dots(page: &Rc<PageState>) -> Result<()> {
    let header_offset = page.config.header_offset;

    for dot in dom::query_all(SIDEBAR_DOT_SELECTOR) {
        let Some(section) = dot.get_attribute("data-section") else {
            continue;
        };
        let listener = EventListener::new(&dot, "click", move |_| {
            smooth_scroll_to(&format!("#{section}"), header_offset);
        });
        page.hold(listener);
    }

    Ok(())
}

pub(super) fn install_scroll_effects(page: &Rc<PageState>) -> Result<()> {
    let window = dom::browser_window()?;
    let weak = Rc::downgrade(page);

    let listener = EventListener::new(&window, "scroll", move |_| {
        let Some(page) = weak.upgrade() else {
            return;
        };
        if !page.scroll_throttle.borrow_mut().try_arm() {
            return;
        }

        let weak = Rc::downgrade(&page);
        let timer = Timeout::new(page.config.scroll_throttle_ms, move || {
            if let Some(page) = weak.upgrade() {
                page.scroll_throttle.borrow_mut().release();
                apply_scroll_frame(&page);
            }
        });
        *page.scroll_timer.borrow_mut() = Some(timer);
    });
    page.hold(listener);

    Ok(())
}

fn apply_scroll_frame(page: &PageState) {
    let scrolled = dom::scroll_y();
    let direction = ScrollDirection::between(page.last_scroll_y.replace(scrolled), scrolled);

    if let Some(profile) = dom::query_opt(".profile-placeholder") {
        dom::set_style(&profile, "transform", &profile_transform(scrolled, direction));
    }

    for (index, icon) in dom::query_all(".floating-icon").iter().enumerate() {
        dom::set_style(
            icon,
            "transform",
            &floating_icon_transform(scrolled, index, direction),
        );
    }

    if let Some(navbar) = dom::query_opt(".navbar") {
        let style = navbar_style(scrolled, page.config.navbar_threshold);
        dom::set_style(&navbar, "background", style.background);
        dom::set_style(&navbar, "backdrop-filter", style.backdrop_filter);
        dom::set_style(&navbar, "box-shadow", style.box_shadow);
    }

    update_section_indicators(scrolled, page.config.section_lookahead);

    let (_, viewport_height) = dom::viewport_size();
    for card in dom::query_all(".project-card") {
        let rect = card.get_bounding_client_rect();
        if is_in_viewport(rect.top(), rect.bottom(), viewport_height) {
            dom::set_style(&card, "transform", &project_card_transform(direction));
        }
    }

    for (index, tag) in dom::query_all(".skill-tag").iter().enumerate() {
        dom::set_style(
            tag,
            "transform",
            &skill_tag_transform(scrolled, index, direction),
        );
    }
}

fn section_span(section: &HtmlElement) -> SectionSpan {
    SectionSpan {
        top: f64::from(section.offset_top()),
        height: f64::from(section.offset_height()),
    }
}

fn update_section_indicators(scrolled: f64, lookahead: f64) {
    let sections = dom::query_all("section");
    let spans: Vec<SectionSpan> = sections.iter().map(section_span).collect();
    let dots = dom::query_all(SIDEBAR_DOT_SELECTOR);

    for (span, dot) in spans.iter().zip(dots.iter()) {
        dom::set_class(dot, ACTIVE_CLASS, span.contains(scrolled, lookahead));
    }

    let current_href = current_section(scrolled, &spans)
        .map(|index| format!("#{}", sections[index].id()));
    for link in dom::query_all(".nav-link") {
        let active = current_href.is_some() && link.get_attribute("href") == current_href;
        dom::set_class(&link, ACTIVE_CLASS, active);
    }
}
