//! Typewriter hero titles.
//!
//! Titles carry their full text in `data-text`; the page reveals it one
//! character per tick. Each frame is rendered as escaped HTML with line
//! breaks as `<br>`.

/// Escape text for inline HTML.
#[must_use]
pub fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render text as HTML, escaping each line and joining with `<br>`.
#[must_use]
pub fn to_html(text: &str) -> String {
    text.split('\n')
        .map(escape_inline)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// The typed-out text of one title.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
}

impl Typewriter {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Number of ticks until the full text is shown.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// HTML for the frame showing the first `shown` characters.
    #[must_use]
    pub fn frame(&self, shown: usize) -> String {
        let end = shown.min(self.chars.len());
        let text: String = self.chars.iter().take(end).collect();
        to_html(&text)
    }

    /// HTML with the whole text, used for reduced motion and height
    /// reservation.
    #[must_use]
    pub fn full(&self) -> String {
        self.frame(self.chars.len())
    }

    /// Frames from the first character to the full text.
    pub fn frames(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.chars.len()).map(|n| self.frame(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_and_breaks() {
        assert_eq!(to_html("Ram & <stuga>\n\"Hand\"made"), "Ram &amp; &lt;stuga&gt;<br>&quot;Hand&quot;made");
        assert_eq!(escape_inline("it's"), "it&#039;s");
    }

    #[test]
    fn test_frames_count_characters_not_bytes() {
        let writer = Typewriter::new("Hö\nj");
        assert_eq!(writer.len(), 4);
        let frames: Vec<String> = writer.frames().collect();
        assert_eq!(frames, vec!["H", "Hö", "Hö<br>", "Hö<br>j"]);
        assert_eq!(writer.frame(99), writer.full());
        assert_eq!(writer.frame(0), "");
    }

    #[test]
    fn test_empty_text() {
        let writer = Typewriter::new("");
        assert!(writer.is_empty());
        assert_eq!(writer.full(), "");
        assert_eq!(writer.frames().count(), 0);
    }
}
