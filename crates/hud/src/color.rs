//! Host text formatting codes.

use std::fmt;

/// Formatting code prefix understood by the host's font renderer.
pub const FORMAT_PREFIX: char = '\u{a7}';

/// Text colours, rendered as a two-character formatting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextColor {
    DarkGreen,
    DarkAqua,
    DarkPurple,
    Gold,
    Red,
    Yellow,
    Green,
    White,
}

impl TextColor {
    pub fn code(self) -> char {
        match self {
            TextColor::DarkGreen => '2',
            TextColor::DarkAqua => '3',
            TextColor::DarkPurple => '5',
            TextColor::Gold => '6',
            TextColor::Green => 'a',
            TextColor::Red => 'c',
            TextColor::Yellow => 'e',
            TextColor::White => 'f',
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FORMAT_PREFIX, self.code())
    }
}

/// `text` with every formatting code removed.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == FORMAT_PREFIX {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_render_as_codes_and_strip_cleanly() {
        let line = format!("{}Server Information", TextColor::Gold);
        assert_eq!(line, "\u{a7}6Server Information");
        assert_eq!(strip_formatting(&line), "Server Information");
        assert_eq!(strip_formatting("plain"), "plain");
    }
}
