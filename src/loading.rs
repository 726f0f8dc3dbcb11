use crate::config::EffectsConfig;

pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const HIDING_OPACITY: &str = "0";
pub const HIDING_TRANSFORM: &str = "scale(1.1)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissTrigger {
    Load,
    DomReady,
    Fallback,
}

impl DismissTrigger {
    #[cfg(test)]
    pub const ALL: [Self; 3] = [Self::Load, Self::DomReady, Self::Fallback];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomReady => "dom_ready",
            Self::Fallback => "fallback",
        }
    }

    pub fn delay_ms(self, config: &EffectsConfig) -> u32 {
        match self {
            Self::Load => config.loading_after_load_ms,
            Self::DomReady => config.loading_after_ready_ms,
            Self::Fallback => config.loading_fallback_ms,
        }
    }
}

/// One-way latch guarding the hide transition.
#[derive(Debug, Default)]
pub struct LoadingGate {
    hidden_by: Option<DismissTrigger>,
}

impl LoadingGate {
    /// Returns true exactly once, for the first trigger to fire.
    pub fn dismiss(&mut self, trigger: DismissTrigger) -> bool {
        if self.hidden_by.is_some() {
            return false;
        }
        self.hidden_by = Some(trigger);
        true
    }

    #[cfg(test)]
    pub fn hidden_by(&self) -> Option<DismissTrigger> {
        self.hidden_by
    }
}
