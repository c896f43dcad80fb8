//! Word timing model: recognition point and adaptive display durations.

/// Multipliers applied by character-length bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthFactors {
    /// 4 characters or fewer.
    pub short: f32,
    /// 5 to 7 characters.
    pub medium: f32,
    /// 8 to 10 characters.
    pub long: f32,
    /// 11 characters or more.
    pub very_long: f32,
}

impl Default for LengthFactors {
    fn default() -> Self {
        Self {
            short: 1.0,
            medium: 1.1,
            long: 1.25,
            very_long: 1.4,
        }
    }
}

/// Multipliers applied when a word ends in the matching punctuation mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PunctuationFactors {
    pub comma: f32,
    pub period: f32,
    pub exclamation: f32,
    pub question: f32,
    pub semicolon: f32,
    pub colon: f32,
}

impl Default for PunctuationFactors {
    fn default() -> Self {
        Self {
            comma: 1.3,
            period: 1.6,
            exclamation: 1.6,
            question: 1.6,
            semicolon: 1.4,
            colon: 1.4,
        }
    }
}

/// Tunable timing parameters. Treated as immutable per tokenization pass;
/// changing any field requires rebuilding the unit sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingConfig {
    pub wpm: f32,
    pub adaptive_timing: bool,
    pub length_factors: LengthFactors,
    pub punctuation_factors: PunctuationFactors,
    pub paragraph_factor: f32,
    /// Ceiling on a single word's display time. `0` leaves durations uncapped.
    pub max_word_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wpm: 250.0,
            adaptive_timing: true,
            length_factors: LengthFactors::default(),
            punctuation_factors: PunctuationFactors::default(),
            paragraph_factor: 2.0,
            max_word_delay_ms: 3_000,
        }
    }
}

/// Partial update for [`TimingConfig`]. Unset fields keep their current
/// values; set fields are sanitized rather than rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimingConfigPatch {
    pub wpm: Option<f32>,
    pub adaptive_timing: Option<bool>,
    pub length_factors: Option<LengthFactors>,
    pub punctuation_factors: Option<PunctuationFactors>,
    pub paragraph_factor: Option<f32>,
    pub max_word_delay_ms: Option<u32>,
}

impl TimingConfig {
    /// Merges `patch` into `self`. Non-positive or non-finite rates are
    /// ignored; factors below 1.0 clamp to 1.0.
    pub fn apply(&mut self, patch: &TimingConfigPatch) {
        if let Some(wpm) = patch.wpm {
            if wpm.is_finite() && wpm > 0.0 {
                self.wpm = wpm;
            }
        }
        if let Some(adaptive) = patch.adaptive_timing {
            self.adaptive_timing = adaptive;
        }
        if let Some(factors) = patch.length_factors {
            self.length_factors = LengthFactors {
                short: factors.short.max(1.0),
                medium: factors.medium.max(1.0),
                long: factors.long.max(1.0),
                very_long: factors.very_long.max(1.0),
            };
        }
        if let Some(factors) = patch.punctuation_factors {
            self.punctuation_factors = PunctuationFactors {
                comma: factors.comma.max(1.0),
                period: factors.period.max(1.0),
                exclamation: factors.exclamation.max(1.0),
                question: factors.question.max(1.0),
                semicolon: factors.semicolon.max(1.0),
                colon: factors.colon.max(1.0),
            };
        }
        if let Some(factor) = patch.paragraph_factor {
            if factor.is_finite() {
                self.paragraph_factor = factor.max(1.0);
            }
        }
        if let Some(cap) = patch.max_word_delay_ms {
            self.max_word_delay_ms = cap;
        }
    }
}

/// Character index a reader should fixate on while the word is displayed.
/// Roughly 30-40% into the word, earlier for short words.
pub fn recognition_offset(word: &str) -> usize {
    let len = word.chars().count();
    if len <= 1 {
        0
    } else if len <= 5 {
        (len as f32 * 0.3) as usize
    } else if len <= 9 {
        (len as f32 * 0.35) as usize
    } else {
        (len as f32 * 0.4) as usize
    }
}

/// Length-bucket multiplier, 1.0 when adaptive timing is off.
pub fn length_factor(word: &str, config: &TimingConfig) -> f32 {
    if !config.adaptive_timing {
        return 1.0;
    }

    let len = word.chars().count();
    if len <= 4 {
        config.length_factors.short
    } else if len <= 7 {
        config.length_factors.medium
    } else if len <= 10 {
        config.length_factors.long
    } else {
        config.length_factors.very_long
    }
}

/// Trailing-punctuation multiplier, 1.0 when adaptive timing is off or the
/// final character is not a recognized mark. Only the final character counts.
pub fn punctuation_factor(word: &str, config: &TimingConfig) -> f32 {
    if !config.adaptive_timing {
        return 1.0;
    }

    let factors = &config.punctuation_factors;
    match word.chars().last() {
        Some(',') => factors.comma,
        Some('.') => factors.period,
        Some('!') => factors.exclamation,
        Some('?') => factors.question,
        Some(';') => factors.semicolon,
        Some(':') => factors.colon,
        _ => 1.0,
    }
}

/// Display duration for one word in integer milliseconds, rounded half-up.
/// Callers guarantee `config.wpm > 0`; the result is never zero.
pub fn word_duration_ms(word: &str, config: &TimingConfig, paragraph_break_after: bool) -> u32 {
    let base = 60_000.0 / config.wpm;
    let paragraph = if paragraph_break_after {
        config.paragraph_factor
    } else {
        1.0
    };

    let mut duration =
        base * length_factor(word, config) * punctuation_factor(word, config) * paragraph;
    if config.max_word_delay_ms > 0 {
        duration = duration.min(config.max_word_delay_ms as f32);
    }

    // f32::round is std-only; half-up cast keeps the crate no_std.
    ((duration + 0.5) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_rate_config() -> TimingConfig {
        TimingConfig {
            wpm: 250.0,
            adaptive_timing: false,
            ..TimingConfig::default()
        }
    }

    #[test]
    fn recognition_offset_stays_inside_word() {
        let words = [
            "a", "an", "the", "hello", "reading", "serialized", "presentation",
            "antidisestablishmentarianism", "?", "x.",
        ];
        for word in words {
            let len = word.chars().count();
            let orp = recognition_offset(word);
            assert!(orp < len.max(1), "orp {orp} out of range for {word:?}");
        }
    }

    #[test]
    fn recognition_offset_buckets() {
        assert_eq!(recognition_offset("a"), 0);
        assert_eq!(recognition_offset("word"), 1);
        assert_eq!(recognition_offset("hello"), 1);
        assert_eq!(recognition_offset("reading"), 2);
        assert_eq!(recognition_offset("wonderful"), 3);
        assert_eq!(recognition_offset("comprehension"), 5);
    }

    #[test]
    fn adaptive_off_disables_all_factors() {
        let config = fixed_rate_config();
        for word in ["hi", "stop.", "nevertheless,", "extraordinary!"] {
            assert_eq!(length_factor(word, &config), 1.0);
            assert_eq!(punctuation_factor(word, &config), 1.0);
        }
    }

    #[test]
    fn base_duration_at_250_wpm_is_240ms() {
        let config = fixed_rate_config();
        assert_eq!(word_duration_ms("hello", &config, false), 240);
    }

    #[test]
    fn adaptive_medium_word_with_period_is_422ms() {
        let config = TimingConfig::default();
        // 240 * 1.1 (medium) * 1.6 (period) = 422.4
        assert_eq!(word_duration_ms("stop.", &config, false), 422);
    }

    #[test]
    fn max_word_delay_clamps_duration() {
        let config = TimingConfig {
            max_word_delay_ms: 300,
            ..TimingConfig::default()
        };
        assert_eq!(word_duration_ms("stop.", &config, false), 300);
    }

    #[test]
    fn zero_cap_leaves_duration_unbounded() {
        let config = TimingConfig {
            wpm: 10.0,
            max_word_delay_ms: 0,
            ..TimingConfig::default()
        };
        assert!(word_duration_ms("extraordinarily,", &config, true) > 3_000);
    }

    #[test]
    fn paragraph_break_never_shortens_a_word() {
        let config = TimingConfig::default();
        for word in ["a", "hello", "stop.", "unquestionably?"] {
            assert!(
                word_duration_ms(word, &config, false) <= word_duration_ms(word, &config, true)
            );
        }
    }

    #[test]
    fn only_final_character_drives_punctuation() {
        let config = TimingConfig::default();
        assert_eq!(punctuation_factor("e.g!", &config), 1.6);
        assert_eq!(punctuation_factor("(hello)", &config), 1.0);
    }

    #[test]
    fn patch_merges_and_sanitizes() {
        let mut config = TimingConfig::default();
        config.apply(&TimingConfigPatch {
            wpm: Some(400.0),
            paragraph_factor: Some(0.2),
            ..TimingConfigPatch::default()
        });
        assert_eq!(config.wpm, 400.0);
        assert_eq!(config.paragraph_factor, 1.0);
        assert!(config.adaptive_timing);

        config.apply(&TimingConfigPatch {
            wpm: Some(-30.0),
            ..TimingConfigPatch::default()
        });
        assert_eq!(config.wpm, 400.0);
    }
}
