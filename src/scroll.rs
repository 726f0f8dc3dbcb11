const PROFILE_PARALLAX_FACTOR: f64 = -0.1;
const PROFILE_TILT_DEG: f64 = 2.0;
const WAVE_FREQUENCY: f64 = 0.01;
const ICON_WAVE_AMPLITUDE: f64 = 10.0;
const ICON_DIRECTION_BIAS: f64 = 5.0;
const ICON_SPIN_FACTOR: f64 = 0.1;
const TAG_WAVE_AMPLITUDE: f64 = 0.5;
const TAG_DIRECTION_BIAS: f64 = 1.0;
const CARD_LIFT_PX: f64 = 0.5;
const CARD_TILT_DEG: f64 = 2.0;
const NAV_LINK_LOOKAHEAD: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn between(last: f64, current: f64) -> Self {
        if current > last {
            Self::Down
        } else {
            Self::Up
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::Up => -1.0,
            Self::Down => 1.0,
        }
    }
}

pub fn anchor_scroll_top(element_viewport_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    element_viewport_top + page_offset - header_offset
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavbarStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
    pub backdrop_filter: &'static str,
}

const NAVBAR_SCROLLED: NavbarStyle = NavbarStyle {
    background: "rgba(0, 0, 0, 0.8)",
    box_shadow: "0 8px 32px rgba(0, 212, 255, 0.2)",
    backdrop_filter: "blur(30px) saturate(200%)",
};

const NAVBAR_RESTING: NavbarStyle = NavbarStyle {
    background: "rgba(0, 0, 0, 0.4)",
    box_shadow: "none",
    backdrop_filter: "blur(20px) saturate(180%)",
};

pub fn navbar_style(scrolled: f64, threshold: f64) -> NavbarStyle {
    if scrolled > threshold {
        NAVBAR_SCROLLED
    } else {
        NAVBAR_RESTING
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpan {
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn contains(&self, scrolled: f64, lookahead: f64) -> bool {
        scrolled >= self.top - lookahead && scrolled < self.top + self.height - lookahead
    }
}

/// Index of the last section whose top (minus the nav lookahead) has been
/// scrolled past.
pub fn current_section(scrolled: f64, spans: &[SectionSpan]) -> Option<usize> {
    spans
        .iter()
        .rposition(|span| scrolled >= span.top - NAV_LINK_LOOKAHEAD)
}

pub fn profile_transform(scrolled: f64, direction: ScrollDirection) -> String {
    format!(
        "translate3d(0,{}px,0) rotate({}deg)",
        css_number(scrolled * PROFILE_PARALLAX_FACTOR),
        css_number(PROFILE_TILT_DEG * direction.sign()),
    )
}

fn wave(scrolled: f64, index: usize) -> f64 {
    (scrolled * WAVE_FREQUENCY + index as f64).sin()
}

pub fn floating_icon_transform(scrolled: f64, index: usize, direction: ScrollDirection) -> String {
    let offset = wave(scrolled, index) * ICON_WAVE_AMPLITUDE + ICON_DIRECTION_BIAS * direction.sign();
    format!(
        "translateY({}px) rotate({}deg)",
        css_number(offset),
        css_number(scrolled * ICON_SPIN_FACTOR),
    )
}

pub fn skill_tag_transform(scrolled: f64, index: usize, direction: ScrollDirection) -> String {
    let offset = wave(scrolled, index) * TAG_WAVE_AMPLITUDE + TAG_DIRECTION_BIAS * direction.sign();
    format!("translateY({}px)", css_number(offset))
}

pub fn project_card_transform(direction: ScrollDirection) -> String {
    let sign = -direction.sign();
    format!(
        "translateY({}px) rotateX({}deg)",
        css_number(CARD_LIFT_PX * sign),
        css_number(CARD_TILT_DEG * sign),
    )
}

pub fn is_in_viewport(rect_top: f64, rect_bottom: f64, viewport_height: f64) -> bool {
    rect_top < viewport_height && rect_bottom > 0.0
}

fn css_number(value: f64) -> String {
    let rounded = (value * 1_000.0).round() / 1_000.0;
    // Adding zero turns -0.0 into 0.0.
    format!("{}", rounded + 0.0)
}

/// Allows at most one pending recompute. Events arriving while armed are
/// dropped, not queued.
#[derive(Debug, Default)]
pub struct ThrottleGuard {
    pending: bool,
}

impl ThrottleGuard {
    pub fn try_arm(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn release(&mut self) {
        self.pending = false;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
