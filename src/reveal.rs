use std::collections::HashMap;

pub const VISIBLE_CLASS: &str = "visible";
pub const FADE_OUT_CLASS: &str = "fade-out";
pub const THRESHOLD: f64 = 0.1;
pub const ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const PENDING_ATTRIBUTE: &str = "data-reveal-pending";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryAnimation {
    FadeIn,
    ScaleIn,
    RotateIn,
    SlideLeft,
    SlideRight,
}

impl EntryAnimation {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::FadeIn => "fade-in",
            Self::ScaleIn => "scale-in",
            Self::RotateIn => "rotate-in",
            Self::SlideLeft => "slide-left",
            Self::SlideRight => "slide-right",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RevealGroup {
    pub selector: &'static str,
    pub animation: EntryAnimation,
    /// Used for odd indices when set.
    pub alternate: Option<EntryAnimation>,
    pub delay_step_secs: Option<f64>,
}

impl RevealGroup {
    pub fn animation_for(&self, index: usize) -> EntryAnimation {
        match self.alternate {
            Some(alternate) if index % 2 == 1 => alternate,
            _ => self.animation,
        }
    }

    pub fn transition_delay(&self, index: usize) -> Option<String> {
        let step = self.delay_step_secs?;
        let seconds = ((index as f64 * step) * 1_000.0).round() / 1_000.0;
        Some(format!("{seconds}s"))
    }
}

pub const REVEAL_GROUPS: &[RevealGroup] = &[
    RevealGroup {
        selector: ".section-title",
        animation: EntryAnimation::FadeIn,
        alternate: None,
        delay_step_secs: None,
    },
    RevealGroup {
        selector: ".about-text p",
        animation: EntryAnimation::SlideLeft,
        alternate: Some(EntryAnimation::SlideRight),
        delay_step_secs: None,
    },
    RevealGroup {
        selector: ".stat",
        animation: EntryAnimation::ScaleIn,
        alternate: None,
        delay_step_secs: Some(0.2),
    },
    RevealGroup {
        selector: ".skill-category",
        animation: EntryAnimation::FadeIn,
        alternate: None,
        delay_step_secs: Some(0.3),
    },
    RevealGroup {
        selector: ".project-card",
        animation: EntryAnimation::RotateIn,
        alternate: None,
        delay_step_secs: Some(0.2),
    },
    RevealGroup {
        selector: ".contact-info",
        animation: EntryAnimation::SlideLeft,
        alternate: None,
        delay_step_secs: None,
    },
    RevealGroup {
        selector: ".contact-form",
        animation: EntryAnimation::SlideRight,
        alternate: None,
        delay_step_secs: None,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    /// A delayed show is scheduled but has not fired yet.
    Pending,
    Visible,
    Exiting,
}

impl RevealState {
    pub fn from_classes(has_visible: bool, has_fade_out: bool, has_pending: bool) -> Self {
        match (has_visible, has_fade_out, has_pending) {
            (true, _, _) => Self::Visible,
            (false, _, true) => Self::Pending,
            (false, true, false) => Self::Exiting,
            (false, false, false) => Self::Hidden,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    Show { delay_ms: u32 },
    /// Drop the scheduled show; the element left before it fired.
    Cancel,
    Exit { clear_after_ms: u32 },
    Nothing,
}

pub fn on_intersection(
    state: RevealState,
    intersecting: bool,
    batch_index: usize,
    stagger_ms: u32,
    exit_ms: u32,
) -> RevealAction {
    match (state, intersecting) {
        (RevealState::Visible | RevealState::Pending, true) => RevealAction::Nothing,
        (_, true) => RevealAction::Show {
            delay_ms: stagger_ms.saturating_mul(u32::try_from(batch_index).unwrap_or(u32::MAX)),
        },
        (RevealState::Pending, false) => RevealAction::Cancel,
        (RevealState::Visible, false) => RevealAction::Exit {
            clear_after_ms: exit_ms,
        },
        (_, false) => RevealAction::Nothing,
    }
}

pub fn parse_pending_id(attribute: &str) -> Option<u32> {
    attribute.trim().parse().ok()
}

/// Scheduled shows keyed by the id written into `PENDING_ATTRIBUTE`.
/// Dropping a handle is what cancels it.
#[derive(Debug)]
pub struct PendingReveals<H> {
    next_id: u32,
    handles: HashMap<u32, H>,
}

impl<H> Default for PendingReveals<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handles: HashMap::new(),
        }
    }
}

impl<H> PendingReveals<H> {
    pub fn reserve(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn insert(&mut self, id: u32, handle: H) {
        self.handles.insert(id, handle);
    }

    /// Removes the handle for `id`, whether it fired or is being cancelled.
    pub fn take(&mut self, id: u32) -> Option<H> {
        self.handles.remove(&id)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(selector: &str) -> RevealGroup {
        *REVEAL_GROUPS
            .iter()
            .find(|group| group.selector == selector)
            .expect("group exists")
    }

    #[test]
    fn entering_elements_are_staggered_by_batch_index() {
        assert_eq!(
            on_intersection(RevealState::Hidden, true, 0, 100, 300),
            RevealAction::Show { delay_ms: 0 }
        );
        assert_eq!(
            on_intersection(RevealState::Hidden, true, 3, 100, 300),
            RevealAction::Show { delay_ms: 300 }
        );
    }

    #[test]
    fn leaving_visible_element_reverses() {
        assert_eq!(
            on_intersection(RevealState::Visible, false, 2, 100, 300),
            RevealAction::Exit { clear_after_ms: 300 }
        );
    }

    #[test]
    fn never_shown_element_does_not_flash_exit() {
        assert_eq!(
            on_intersection(RevealState::Hidden, false, 0, 100, 300),
            RevealAction::Nothing
        );
    }

    #[test]
    fn exiting_element_can_come_back() {
        let state = RevealState::from_classes(false, true, false);
        assert_eq!(state, RevealState::Exiting);
        assert_eq!(
            on_intersection(state, true, 1, 100, 300),
            RevealAction::Show { delay_ms: 100 }
        );
    }

    #[test]
    fn about_paragraphs_alternate_slide_direction() {
        let about = group(".about-text p");
        assert_eq!(about.animation_for(0), EntryAnimation::SlideLeft);
        assert_eq!(about.animation_for(1), EntryAnimation::SlideRight);
        assert_eq!(about.animation_for(2), EntryAnimation::SlideLeft);
    }

    #[test]
    fn transition_delay_steps_per_group() {
        assert_eq!(group(".stat").transition_delay(3).as_deref(), Some("0.6s"));
        assert_eq!(group(".skill-category").transition_delay(2).as_deref(), Some("0.6s"));
        assert_eq!(group(".project-card").transition_delay(0).as_deref(), Some("0s"));
        assert_eq!(group(".section-title").transition_delay(4), None);
        assert_eq!(group(".project-card").animation.class_name(), "rotate-in");
    }

    #[test]
    fn leaving_before_delayed_show_cancels_it() {
        let mut pending = PendingReveals::default();

        let action = on_intersection(RevealState::Hidden, true, 3, 100, 300);
        assert_eq!(action, RevealAction::Show { delay_ms: 300 });
        let id = pending.reserve();
        pending.insert(id, "timer");

        let state = RevealState::from_classes(false, false, true);
        assert_eq!(state, RevealState::Pending);
        assert_eq!(on_intersection(state, false, 0, 100, 300), RevealAction::Cancel);
        assert_eq!(pending.take(id), Some("timer"));
        assert_eq!(pending.len(), 0);

        let back = RevealState::from_classes(false, false, false);
        assert_eq!(
            on_intersection(back, true, 0, 100, 300),
            RevealAction::Show { delay_ms: 0 }
        );
    }

    #[test]
    fn pending_element_is_not_rescheduled_while_in_view() {
        let state = RevealState::from_classes(false, true, true);
        assert_eq!(state, RevealState::Pending);
        assert_eq!(on_intersection(state, true, 2, 100, 300), RevealAction::Nothing);
    }

    #[test]
    fn pending_ids_round_trip_through_attribute_text() {
        let mut pending: PendingReveals<()> = PendingReveals::default();
        let first = pending.reserve();
        let second = pending.reserve();
        assert_ne!(first, second);

        let attribute = second.to_string();
        assert_eq!(parse_pending_id(&attribute), Some(second));
        assert_eq!(parse_pending_id("soon"), None);
    }
}
