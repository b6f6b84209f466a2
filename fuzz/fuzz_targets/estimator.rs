#![no_main]

use libfuzzer_sys::fuzz_target;
use visage_face::{PhonemeEstimator, Viseme};

fuzz_target!(|input: (String, f32)| {
    let (text, elapsed) = input;
    let viseme = PhonemeEstimator::estimate(&text, elapsed);

    assert!(!viseme.is_alias());
    assert_eq!(viseme, PhonemeEstimator::estimate(&text, elapsed));
    if PhonemeEstimator::char_index(elapsed) >= text.chars().count() {
        assert_eq!(viseme, Viseme::Silence);
    }
});
