use log::LevelFilter;
use serde::Deserialize;

use crate::error::{EffectError, Result};
use crate::logging::parse_level_filter;

pub const CONFIG_ELEMENT_ID: &str = "effects-config";

const DEFAULT_HEADER_OFFSET: f64 = 70.0;
const DEFAULT_PARTICLE_COUNT: usize = 50;
const DEFAULT_TRAIL_CAPACITY: usize = 20;
const DEFAULT_TRAIL_DECAY: f64 = 0.05;
const DEFAULT_REVEAL_STAGGER_MS: u32 = 100;
const DEFAULT_REVEAL_EXIT_MS: u32 = 300;
const DEFAULT_SCROLL_THROTTLE_MS: u32 = 16;
const DEFAULT_NAVBAR_THRESHOLD: f64 = 50.0;
const DEFAULT_SECTION_LOOKAHEAD: f64 = 300.0;
const DEFAULT_TYPING_TEXT: &str = "Full Stack Web Developer";
const DEFAULT_TYPING_SPEED_MS: u32 = 150;
const DEFAULT_TYPING_PAUSE_MS: u32 = 1_000;
const DEFAULT_TYPING_START_DELAY_MS: u32 = 3_000;
const DEFAULT_LOADING_AFTER_LOAD_MS: u32 = 1_500;
const DEFAULT_LOADING_AFTER_READY_MS: u32 = 2_000;
const DEFAULT_LOADING_FALLBACK_MS: u32 = 3_000;
const DEFAULT_LOADING_FADE_MS: u32 = 800;
const DEFAULT_GLITCH_INTERVAL_MS: u32 = 5_000;
const DEFAULT_GLITCH_CHANCE: f64 = 0.1;
const DEFAULT_GLITCH_DURATION_MS: u32 = 200;
const DEFAULT_GLITCH_TICK_MS: u32 = 50;
const DEFAULT_GLITCH_CHAR_CHANCE: f64 = 0.1;
const DEFAULT_CONTACT_SENDING_MS: u32 = 1_500;
const DEFAULT_CONTACT_RESET_MS: u32 = 2_000;
const DEFAULT_LOG_LEVEL: &str = "info";

const HEADER_OFFSET_BOUNDS: (f64, f64) = (0.0, 400.0);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 500);
const TRAIL_CAPACITY_BOUNDS: (usize, usize) = (1, 200);
const TRAIL_DECAY_BOUNDS: (f64, f64) = (0.001, 1.0);
const REVEAL_STAGGER_MS_BOUNDS: (u32, u32) = (0, 2_000);
const REVEAL_EXIT_MS_BOUNDS: (u32, u32) = (0, 5_000);
const SCROLL_THROTTLE_MS_BOUNDS: (u32, u32) = (1, 1_000);
const SCROLL_DISTANCE_BOUNDS: (f64, f64) = (0.0, 5_000.0);
const TYPING_SPEED_MS_BOUNDS: (u32, u32) = (10, 2_000);
const PAUSE_MS_BOUNDS: (u32, u32) = (0, 60_000);
const GLITCH_INTERVAL_MS_BOUNDS: (u32, u32) = (100, 600_000);
const GLITCH_TICK_MS_BOUNDS: (u32, u32) = (10, 1_000);
const PROBABILITY_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Tunables for every effect. Each field falls back to its default when it is
/// missing from the page's config block or outside its allowed range.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub header_offset: f64,
    pub particle_count: usize,
    pub trail_capacity: usize,
    pub trail_decay: f64,
    pub reveal_stagger_ms: u32,
    pub reveal_exit_ms: u32,
    pub scroll_throttle_ms: u32,
    pub navbar_threshold: f64,
    pub section_lookahead: f64,
    pub typing_text: String,
    pub typing_speed_ms: u32,
    pub typing_pause_ms: u32,
    pub typing_start_delay_ms: u32,
    pub loading_after_load_ms: u32,
    pub loading_after_ready_ms: u32,
    pub loading_fallback_ms: u32,
    pub loading_fade_ms: u32,
    pub glitch_interval_ms: u32,
    pub glitch_chance: f64,
    pub glitch_duration_ms: u32,
    pub glitch_tick_ms: u32,
    pub glitch_char_chance: f64,
    pub contact_sending_ms: u32,
    pub contact_reset_ms: u32,
    pub log_level: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            particle_count: DEFAULT_PARTICLE_COUNT,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            trail_decay: DEFAULT_TRAIL_DECAY,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            reveal_exit_ms: DEFAULT_REVEAL_EXIT_MS,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            navbar_threshold: DEFAULT_NAVBAR_THRESHOLD,
            section_lookahead: DEFAULT_SECTION_LOOKAHEAD,
            typing_text: DEFAULT_TYPING_TEXT.to_string(),
            typing_speed_ms: DEFAULT_TYPING_SPEED_MS,
            typing_pause_ms: DEFAULT_TYPING_PAUSE_MS,
            typing_start_delay_ms: DEFAULT_TYPING_START_DELAY_MS,
            loading_after_load_ms: DEFAULT_LOADING_AFTER_LOAD_MS,
            loading_after_ready_ms: DEFAULT_LOADING_AFTER_READY_MS,
            loading_fallback_ms: DEFAULT_LOADING_FALLBACK_MS,
            loading_fade_ms: DEFAULT_LOADING_FADE_MS,
            glitch_interval_ms: DEFAULT_GLITCH_INTERVAL_MS,
            glitch_chance: DEFAULT_GLITCH_CHANCE,
            glitch_duration_ms: DEFAULT_GLITCH_DURATION_MS,
            glitch_tick_ms: DEFAULT_GLITCH_TICK_MS,
            glitch_char_chance: DEFAULT_GLITCH_CHAR_CHANCE,
            contact_sending_ms: DEFAULT_CONTACT_SENDING_MS,
            contact_reset_ms: DEFAULT_CONTACT_RESET_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl EffectsConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: Self =
            serde_json::from_str(raw).map_err(|error| EffectError::InvalidConfig(error.to_string()))?;
        Ok(parsed.sanitized())
    }

    pub fn sanitized(self) -> Self {
        let typing_text = Some(self.typing_text.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_TYPING_TEXT.to_string());
        let log_level = parse_level_filter(&self.log_level)
            .map(|_| self.log_level.trim().to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            header_offset: bounded(self.header_offset, DEFAULT_HEADER_OFFSET, HEADER_OFFSET_BOUNDS),
            particle_count: bounded(
                self.particle_count,
                DEFAULT_PARTICLE_COUNT,
                PARTICLE_COUNT_BOUNDS,
            ),
            trail_capacity: bounded(
                self.trail_capacity,
                DEFAULT_TRAIL_CAPACITY,
                TRAIL_CAPACITY_BOUNDS,
            ),
            trail_decay: bounded(self.trail_decay, DEFAULT_TRAIL_DECAY, TRAIL_DECAY_BOUNDS),
            reveal_stagger_ms: bounded(
                self.reveal_stagger_ms,
                DEFAULT_REVEAL_STAGGER_MS,
                REVEAL_STAGGER_MS_BOUNDS,
            ),
            reveal_exit_ms: bounded(
                self.reveal_exit_ms,
                DEFAULT_REVEAL_EXIT_MS,
                REVEAL_EXIT_MS_BOUNDS,
            ),
            scroll_throttle_ms: bounded(
                self.scroll_throttle_ms,
                DEFAULT_SCROLL_THROTTLE_MS,
                SCROLL_THROTTLE_MS_BOUNDS,
            ),
            navbar_threshold: bounded(
                self.navbar_threshold,
                DEFAULT_NAVBAR_THRESHOLD,
                SCROLL_DISTANCE_BOUNDS,
            ),
            section_lookahead: bounded(
                self.section_lookahead,
                DEFAULT_SECTION_LOOKAHEAD,
                SCROLL_DISTANCE_BOUNDS,
            ),
            typing_text,
            typing_speed_ms: bounded(
                self.typing_speed_ms,
                DEFAULT_TYPING_SPEED_MS,
                TYPING_SPEED_MS_BOUNDS,
            ),
            typing_pause_ms: bounded(self.typing_pause_ms, DEFAULT_TYPING_PAUSE_MS, PAUSE_MS_BOUNDS),
            typing_start_delay_ms: bounded(
                self.typing_start_delay_ms,
                DEFAULT_TYPING_START_DELAY_MS,
                PAUSE_MS_BOUNDS,
            ),
            loading_after_load_ms: bounded(
                self.loading_after_load_ms,
                DEFAULT_LOADING_AFTER_LOAD_MS,
                PAUSE_MS_BOUNDS,
            ),
            loading_after_ready_ms: bounded(
                self.loading_after_ready_ms,
                DEFAULT_LOADING_AFTER_READY_MS,
                PAUSE_MS_BOUNDS,
            ),
            loading_fallback_ms: bounded(
                self.loading_fallback_ms,
                DEFAULT_LOADING_FALLBACK_MS,
                PAUSE_MS_BOUNDS,
            ),
            loading_fade_ms: bounded(self.loading_fade_ms, DEFAULT_LOADING_FADE_MS, PAUSE_MS_BOUNDS),
            glitch_interval_ms: bounded(
                self.glitch_interval_ms,
                DEFAULT_GLITCH_INTERVAL_MS,
                GLITCH_INTERVAL_MS_BOUNDS,
            ),
            glitch_chance: bounded(self.glitch_chance, DEFAULT_GLITCH_CHANCE, PROBABILITY_BOUNDS),
            glitch_duration_ms: bounded(
                self.glitch_duration_ms,
                DEFAULT_GLITCH_DURATION_MS,
                PAUSE_MS_BOUNDS,
            ),
            glitch_tick_ms: bounded(self.glitch_tick_ms, DEFAULT_GLITCH_TICK_MS, GLITCH_TICK_MS_BOUNDS),
            glitch_char_chance: bounded(
                self.glitch_char_chance,
                DEFAULT_GLITCH_CHAR_CHANCE,
                PROBABILITY_BOUNDS,
            ),
            contact_sending_ms: bounded(
                self.contact_sending_ms,
                DEFAULT_CONTACT_SENDING_MS,
                PAUSE_MS_BOUNDS,
            ),
            contact_reset_ms: bounded(self.contact_reset_ms, DEFAULT_CONTACT_RESET_MS, PAUSE_MS_BOUNDS),
            log_level,
        }
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        parse_level_filter(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

fn bounded<T: PartialOrd + Copy>(value: T, default: T, bounds: (T, T)) -> T {
    if (bounds.0..=bounds.1).contains(&value) {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EffectsConfig::from_json("{}").expect("empty object parses");
        assert_eq!(config, EffectsConfig::default());
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.trail_capacity, 20);
        assert_eq!(config.header_offset, 70.0);
    }

    #[test]
    fn in_range_overrides_are_kept() {
        let config = EffectsConfig::from_json(
            r#"{ "particle_count": 120, "typing_text": "Rustacean", "log_level": "DEBUG" }"#,
        )
        .expect("valid config");

        assert_eq!(config.particle_count, 120);
        assert_eq!(config.typing_text, "Rustacean");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let config = EffectsConfig::from_json(
            r#"{ "glitch_chance": 4.0, "scroll_throttle_ms": 0, "trail_capacity": 9000, "typing_text": "   ", "log_level": "loud" }"#,
        )
        .expect("valid json");

        assert_eq!(config.glitch_chance, DEFAULT_GLITCH_CHANCE);
        assert_eq!(config.scroll_throttle_ms, DEFAULT_SCROLL_THROTTLE_MS);
        assert_eq!(config.trail_capacity, DEFAULT_TRAIL_CAPACITY);
        assert_eq!(config.typing_text, DEFAULT_TYPING_TEXT);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = EffectsConfig::from_json("{ particle_count: ");
        assert!(matches!(result, Err(EffectError::InvalidConfig(_))));
    }

    #[test]
    fn wrong_field_type_is_reported() {
        let result = EffectsConfig::from_json(r#"{ "particle_count": "many" }"#);
        assert!(result.is_err());
    }
}
