pub const MODAL_CLASS: &str = "modal";
pub const ESCAPE_KEY: &str = "Escape";
pub const SHOWN_DISPLAY: &str = "block";
pub const HIDDEN_DISPLAY: &str = "none";
pub const LOCKED_OVERFLOW: &str = "hidden";
pub const UNLOCKED_OVERFLOW: &str = "auto";

/// Where modals live. The browser implementation works on `.modal` elements
/// and the body's overflow style.
pub trait ModalSurface {
    type Modal;

    fn find(&self, id: &str) -> Option<Self::Modal>;
    fn all(&self) -> Vec<Self::Modal>;
    fn is_shown(&self, modal: &Self::Modal) -> bool;
    fn set_shown(&self, modal: &Self::Modal, shown: bool);
    fn set_scroll_locked(&self, locked: bool);
}

pub fn open_modal<S: ModalSurface>(surface: &S, id: &str) -> bool {
    let Some(modal) = surface.find(id) else {
        return false;
    };
    surface.set_shown(&modal, true);
    surface.set_scroll_locked(true);
    true
}

pub fn close_modal<S: ModalSurface>(surface: &S, id: &str) -> bool {
    let Some(modal) = surface.find(id) else {
        return false;
    };
    hide(surface, &modal);
    true
}

pub fn hide<S: ModalSurface>(surface: &S, modal: &S::Modal) {
    surface.set_shown(modal, false);
    surface.set_scroll_locked(false);
}

pub fn close_all_open<S: ModalSurface>(surface: &S) -> usize {
    let mut closed = 0;
    for modal in surface.all() {
        if surface.is_shown(&modal) {
            hide(surface, &modal);
            closed += 1;
        }
    }
    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    struct FakePage {
        modals: RefCell<BTreeMap<String, bool>>,
        scroll_locked: Cell<bool>,
        lock_writes: Cell<usize>,
    }

    impl FakePage {
        fn with_modals(ids: &[&str]) -> Self {
            Self {
                modals: RefCell::new(ids.iter().map(|id| (id.to_string(), false)).collect()),
                scroll_locked: Cell::new(false),
                lock_writes: Cell::new(0),
            }
        }

        fn shown(&self, id: &str) -> bool {
            self.modals.borrow().get(id).copied().unwrap_or(false)
        }
    }

    impl ModalSurface for FakePage {
        type Modal = String;

        fn find(&self, id: &str) -> Option<String> {
            self.modals.borrow().contains_key(id).then(|| id.to_string())
        }

        fn all(&self) -> Vec<String> {
            self.modals.borrow().keys().cloned().collect()
        }

        fn is_shown(&self, modal: &String) -> bool {
            self.shown(modal)
        }

        fn set_shown(&self, modal: &String, shown: bool) {
            self.modals.borrow_mut().insert(modal.clone(), shown);
        }

        fn set_scroll_locked(&self, locked: bool) {
            self.scroll_locked.set(locked);
            self.lock_writes.set(self.lock_writes.get() + 1);
        }
    }

    #[test]
    fn open_shows_modal_and_locks_scroll() {
        let page = FakePage::with_modals(&["project-1", "project-2"]);

        assert!(open_modal(&page, "project-2"));
        assert!(page.shown("project-2"));
        assert!(!page.shown("project-1"));
        assert!(page.scroll_locked.get());
    }

    #[test]
    fn unknown_id_is_ignored() {
        let page = FakePage::with_modals(&["project-1"]);

        assert!(!open_modal(&page, "missing"));
        assert!(!close_modal(&page, "missing"));
        assert_eq!(page.lock_writes.get(), 0);
    }

    #[test]
    fn escape_closes_open_modal_and_restores_scroll() {
        let page = FakePage::with_modals(&["project-1", "project-2"]);
        open_modal(&page, "project-1");

        assert_eq!(close_all_open(&page), 1);
        assert!(!page.shown("project-1"));
        assert!(!page.scroll_locked.get());
    }

    #[test]
    fn escape_with_nothing_open_touches_nothing() {
        let page = FakePage::with_modals(&["project-1"]);

        assert_eq!(close_all_open(&page), 0);
        assert_eq!(page.lock_writes.get(), 0);
    }

    #[test]
    fn close_restores_scroll() {
        let page = FakePage::with_modals(&["project-1"]);
        open_modal(&page, "project-1");

        assert!(close_modal(&page, "project-1"));
        assert!(!page.shown("project-1"));
        assert!(!page.scroll_locked.get());
    }
}
