//! Phoneme estimation from raw text
//!
//! This is a heuristic, not phonetics. Playback time is mapped to a
//! character position at a fixed speaking rate and the character there
//! (with one character of lookahead for "th") picks the viseme.
//! Whitespace and punctuation consume speaking time like any letter.

use crate::Viseme;

/// Average spoken pace, in characters per second
pub const CHARS_PER_SECOND: f64 = 6.67;

/// Stateless text-to-viseme estimator
pub struct PhonemeEstimator;

impl PhonemeEstimator {
    /// Viseme for `text` at `elapsed_secs` into the utterance
    ///
    /// Negative or non-finite elapsed time reads as the start of the text.
    pub fn estimate(text: &str, elapsed_secs: f32) -> Viseme {
        let index = Self::char_index(elapsed_secs);

        let mut chars = text.chars().skip(index);
        let Some(current) = chars.next() else {
            return Viseme::Silence;
        };

        match current.to_ascii_lowercase() {
            'a' => Viseme::A,
            'e' | 'i' => Viseme::E,
            'o' | 'u' => Viseme::O,
            'm' | 'p' | 'b' => Viseme::M,
            'f' | 'v' => Viseme::F,
            't' if matches!(chars.next(), Some('h' | 'H')) => Viseme::TH,
            _ => Viseme::Default,
        }
    }

    /// Character position reached after `elapsed_secs`
    pub fn char_index(elapsed_secs: f32) -> usize {
        if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
            return 0;
        }
        (elapsed_secs as f64 * CHARS_PER_SECOND).floor() as usize
    }

    /// Seconds needed to scan the whole of `text`
    pub fn estimate_duration(text: &str) -> f32 {
        (text.chars().count() as f64 / CHARS_PER_SECOND) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_consonant_is_default() {
        assert_eq!(PhonemeEstimator::estimate("Hello", 0.0), Viseme::Default);
        // floor(0.3 * 6.67) = 2 -> 'l'
        assert_eq!(PhonemeEstimator::estimate("Hello", 0.3), Viseme::Default);
    }

    #[test]
    fn test_bilabial() {
        assert_eq!(PhonemeEstimator::estimate("mama", 0.0), Viseme::M);
        assert_eq!(PhonemeEstimator::estimate("Pop", 0.0), Viseme::M);
        assert_eq!(PhonemeEstimator::estimate("bob", 0.0), Viseme::M);
    }

    #[test]
    fn test_th_lookahead() {
        assert_eq!(PhonemeEstimator::estimate("this", 0.0), Viseme::TH);
        assert_eq!(PhonemeEstimator::estimate("THE", 0.0), Viseme::TH);
        assert_eq!(PhonemeEstimator::estimate("top", 0.0), Viseme::Default);
        assert_eq!(PhonemeEstimator::estimate("t", 0.0), Viseme::Default);
    }

    #[test]
    fn test_vowels() {
        assert_eq!(PhonemeEstimator::estimate("Apple", 0.0), Viseme::A);
        assert_eq!(PhonemeEstimator::estimate("egg", 0.0), Viseme::E);
        assert_eq!(PhonemeEstimator::estimate("ice", 0.0), Viseme::E);
        assert_eq!(PhonemeEstimator::estimate("orange", 0.0), Viseme::O);
        assert_eq!(PhonemeEstimator::estimate("up", 0.0), Viseme::O);
    }

    #[test]
    fn test_labiodental() {
        assert_eq!(PhonemeEstimator::estimate("five", 0.0), Viseme::F);
        assert_eq!(PhonemeEstimator::estimate("Very", 0.0), Viseme::F);
    }

    #[test]
    fn test_past_end_is_silence() {
        assert_eq!(PhonemeEstimator::estimate("hi", 10.0), Viseme::Silence);
        assert_eq!(PhonemeEstimator::estimate("", 0.0), Viseme::Silence);
    }

    #[test]
    fn test_whitespace_and_digits() {
        assert_eq!(PhonemeEstimator::estimate(" a", 0.0), Viseme::Default);
        assert_eq!(PhonemeEstimator::estimate("7", 0.0), Viseme::Default);
        assert_eq!(PhonemeEstimator::estimate("!", 0.0), Viseme::Default);
    }

    #[test]
    fn test_bad_elapsed() {
        assert_eq!(PhonemeEstimator::estimate("mama", -3.0), Viseme::M);
        assert_eq!(PhonemeEstimator::estimate("mama", f32::NAN), Viseme::M);
    }

    #[test]
    fn test_multibyte_text_indexes_by_char() {
        // 'é' is two bytes; index 1 must still land on 'm'
        assert_eq!(PhonemeEstimator::estimate("ém", 0.15), Viseme::M);
    }

    #[test]
    fn test_estimate_duration() {
        let secs = PhonemeEstimator::estimate_duration("Hello there");
        assert!((secs - 11.0 / 6.67).abs() < 1e-4);
        assert_eq!(
            PhonemeEstimator::estimate("Hello there", secs + 0.01),
            Viseme::Silence
        );
    }

    proptest! {
        #[test]
        fn estimate_is_deterministic(text in ".{0,40}", t in 0.0f32..20.0) {
            let first = PhonemeEstimator::estimate(&text, t);
            let second = PhonemeEstimator::estimate(&text, t);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn estimate_never_returns_alias(text in "[a-zA-Z ,.]{0,40}", t in 0.0f32..10.0) {
            prop_assert!(!PhonemeEstimator::estimate(&text, t).is_alias());
        }
    }
}
