//! Turns raw text into the ordered sequence of timed display units.

use alloc::string::String;
use alloc::vec::Vec;

use crate::timing::{self, TimingConfig};

/// How far past a word's end to look for a paragraph break.
const PARAGRAPH_LOOKAHEAD_CHARS: usize = 10;

/// One displayable word with its precomputed timing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedUnit {
    /// The word as displayed, trailing punctuation included. Never empty.
    pub text: String,
    /// Position in the unit sequence.
    pub index: usize,
    /// Time the unit stays on screen.
    pub duration_ms: u32,
    /// Character index to highlight. Always a valid index into `text`.
    pub orp_offset: usize,
}

/// Builds the full unit sequence for `text`. Empty or whitespace-only input
/// yields an empty sequence. The sequence is always rebuilt from scratch; a
/// configuration change affects every unit's duration uniformly, so there is
/// nothing to retime incrementally.
pub fn tokenize(text: &str, config: &TimingConfig) -> Vec<TimedUnit> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let normalized = normalize_whitespace(text);
    let mut units = Vec::new();
    let mut cursor = 0usize;

    while let Some((word, end)) = next_word_at(&normalized, cursor) {
        let index = units.len();
        let paragraph_break = paragraph_break_after(&normalized, end);
        units.push(TimedUnit {
            text: String::from(word),
            index,
            duration_ms: timing::word_duration_ms(word, config, paragraph_break),
            orp_offset: timing::recognition_offset(word),
        });
        cursor = end;
    }

    units
}

/// Normalizes line endings to `\n`, tabs to spaces, and collapses runs of
/// spaces to one. Newlines pass through untouched so blank lines survive for
/// paragraph-break detection.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut pending_space = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
                pending_space = false;
            }
            ' ' | '\t' => {
                if !pending_space {
                    out.push(' ');
                    pending_space = true;
                }
            }
            other => {
                out.push(other);
                pending_space = false;
            }
        }
    }

    out
}

fn next_word_at(text: &str, mut cursor: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    while cursor < len && bytes[cursor].is_ascii_whitespace() {
        cursor += 1;
    }
    if cursor >= len {
        return None;
    }

    let start = cursor;
    while cursor < len && !bytes[cursor].is_ascii_whitespace() {
        cursor += 1;
    }

    Some((&text[start..cursor], cursor))
}

/// True when a "newline, optional whitespace, newline" pattern starts within
/// the next few characters after `pos`.
fn paragraph_break_after(text: &str, pos: usize) -> bool {
    // Open while a newline has been seen with only whitespace since.
    let mut open = false;
    for ch in text[pos..].chars().take(PARAGRAPH_LOOKAHEAD_CHARS) {
        if ch == '\n' {
            if open {
                return true;
            }
            open = true;
        } else if !ch.is_whitespace() {
            open = false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn flat_config() -> TimingConfig {
        TimingConfig {
            adaptive_timing: false,
            ..TimingConfig::default()
        }
    }

    fn words(units: &[TimedUnit]) -> Vec<&str> {
        units.iter().map(|unit| unit.text.as_str()).collect()
    }

    #[test]
    fn empty_and_whitespace_yield_no_units() {
        let config = flat_config();
        assert!(tokenize("", &config).is_empty());
        assert!(tokenize("   ", &config).is_empty());
        assert!(tokenize("\n\t \r\n", &config).is_empty());
    }

    #[test]
    fn splits_on_whitespace_runs_in_order() {
        let units = tokenize("one  two\tthree\nfour", &flat_config());
        assert_eq!(words(&units), vec!["one", "two", "three", "four"]);
        for (expected, unit) in units.iter().enumerate() {
            assert_eq!(unit.index, expected);
        }
    }

    #[test]
    fn rejoined_words_round_trip() {
        let config = flat_config();
        let source = "The quick\r\nbrown fox,\n\njumps over\tthe lazy dog.";
        let first = tokenize(source, &config);
        let rejoined = words(&first).join(" ");
        let second = tokenize(&rejoined, &config);
        assert_eq!(words(&first), words(&second));
    }

    #[test]
    fn tokenize_is_idempotent() {
        let config = TimingConfig::default();
        let source = "Pack my box\n\nwith five dozen liquor jugs!";
        assert_eq!(tokenize(source, &config), tokenize(source, &config));
    }

    #[test]
    fn paragraph_break_lengthens_last_word_of_paragraph() {
        let config = TimingConfig {
            adaptive_timing: false,
            paragraph_factor: 2.0,
            ..TimingConfig::default()
        };
        let units = tokenize("first paragraph.\n\nsecond paragraph.", &config);
        assert_eq!(units[1].duration_ms, units[0].duration_ms * 2);
        assert_eq!(units[3].duration_ms, units[2].duration_ms);
    }

    #[test]
    fn single_newline_is_not_a_paragraph_break() {
        let config = TimingConfig {
            adaptive_timing: false,
            ..TimingConfig::default()
        };
        let units = tokenize("line one\nline two", &config);
        assert!(units.iter().all(|unit| unit.duration_ms == units[0].duration_ms));
    }

    #[test]
    fn crlf_blank_line_counts_as_paragraph_break() {
        let config = TimingConfig {
            adaptive_timing: false,
            ..TimingConfig::default()
        };
        let units = tokenize("ends here.\r\n\r\nnext", &config);
        assert_eq!(units[1].duration_ms, units[0].duration_ms * 2);
    }

    #[test]
    fn blank_line_with_spaces_still_breaks_paragraphs() {
        let config = TimingConfig {
            adaptive_timing: false,
            ..TimingConfig::default()
        };
        let units = tokenize("one\n   \ntwo", &config);
        assert_eq!(units[0].duration_ms, units[1].duration_ms * 2);
    }

    #[test]
    fn orp_offset_is_valid_for_every_unit() {
        let units = tokenize(
            "a an the hello reading wonderful comprehension antidisestablishmentarianism",
            &TimingConfig::default(),
        );
        for unit in &units {
            assert!(unit.orp_offset < unit.text.chars().count());
            assert!(unit.duration_ms > 0);
        }
    }
}
