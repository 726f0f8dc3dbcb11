pub const CURSOR_MARKUP: &str = r#"<span class="cursor">|</span>"#;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub revealed: String,
    pub cursor: bool,
    /// Delay before the following frame, `None` on the last one.
    pub next_delay_ms: Option<u32>,
}

impl TypingFrame {
    pub fn markup(&self) -> String {
        let mut markup = escape_html(&self.revealed);
        if self.cursor {
            markup.push_str(CURSOR_MARKUP);
        }
        markup
    }
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    revealed: usize,
    speed_ms: u32,
    pause_ms: u32,
    settled: bool,
}

impl Typewriter {
    pub fn new(text: &str, speed_ms: u32, pause_ms: u32) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: 0,
            speed_ms,
            pause_ms,
            settled: false,
        }
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.settled
    }
}

impl Iterator for Typewriter {
    type Item = TypingFrame;

    fn next(&mut self) -> Option<TypingFrame> {
        if self.settled {
            return None;
        }

        if self.revealed < self.chars.len() {
            self.revealed += 1;
            let last = self.revealed == self.chars.len();
            let next_delay_ms = if last {
                self.speed_ms.saturating_add(self.pause_ms)
            } else {
                self.speed_ms
            };

            return Some(TypingFrame {
                revealed: self.chars[..self.revealed].iter().collect(),
                cursor: true,
                next_delay_ms: Some(next_delay_ms),
            });
        }

        self.settled = true;
        Some(TypingFrame {
            revealed: self.chars.iter().collect(),
            cursor: false,
            next_delay_ms: None,
        })
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
