use rand::Rng;

pub const GLITCH_SYMBOLS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '-', '=', '[', ']', '{', '}', '|',
    ';', ':', ',', '.', '<', '>', '?',
];

pub fn should_glitch<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.gen::<f64>() < chance
}

/// Swaps each character for a random symbol with probability `chance`.
/// The character count never changes.
pub fn corrupt<R: Rng + ?Sized>(text: &str, chance: f64, rng: &mut R) -> String {
    text.chars()
        .map(|ch| {
            if rng.gen::<f64>() < chance {
                GLITCH_SYMBOLS[rng.gen_range(0..GLITCH_SYMBOLS.len())]
            } else {
                ch
            }
        })
        .collect()
}
