//! Viseme table - target morph weights per mouth shape
//!
//! The table is static. Aliased visemes resolve to the very same
//! `&'static MorphWeightSet` as their canonical symbol. Channels a set does
//! not name are implicitly 0.

use crate::Viseme;

/// Upper bound applied to every table value before use
pub const INTENSITY_CAP: f32 = 0.25;

/// Cap a raw table value
#[inline]
pub fn capped(value: f32) -> f32 {
    value.min(INTENSITY_CAP)
}

/// Target intensities for a set of morph channels
#[derive(Debug, PartialEq)]
pub struct MorphWeightSet {
    entries: &'static [(&'static str, f32)],
}

impl MorphWeightSet {
    pub const fn new(entries: &'static [(&'static str, f32)]) -> Self {
        Self { entries }
    }

    /// Raw stored value for `channel` (0.0 when omitted)
    pub fn raw(&self, channel: &str) -> f32 {
        self.entries
            .iter()
            .find(|(name, _)| *name == channel)
            .map(|(_, value)| *value)
            .unwrap_or(0.0)
    }

    /// Stored value after the intensity cap
    pub fn target(&self, channel: &str) -> f32 {
        capped(self.raw(channel))
    }

    /// Named channels with their raw stored values
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Channels the table drives
pub const DRIVEN_CHANNELS: &[&str] = &[
    "jawOpen",
    "mouthFunnel",
    "mouthPucker",
    "mouthSmileLeft",
    "mouthSmileRight",
    "mouthRollUpper",
    "mouthRollLower",
    "mouthDimpleLeft",
    "mouthDimpleRight",
    "mouthLowerDownLeft",
    "mouthLowerDownRight",
    "mouthShrugUpper",
];

static SILENCE: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.0),
    ("mouthFunnel", 0.0),
    ("mouthPucker", 0.0),
    ("mouthSmileLeft", 0.0),
    ("mouthSmileRight", 0.0),
    ("mouthLowerDownLeft", 0.0),
    ("mouthLowerDownRight", 0.0),
]);

static A: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.6),
    ("mouthFunnel", 0.1),
    ("mouthLowerDownLeft", 0.4),
    ("mouthLowerDownRight", 0.4),
    ("mouthSmileLeft", 0.1),
    ("mouthSmileRight", 0.1),
]);

static E: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.35),
    ("mouthSmileLeft", 0.45),
    ("mouthSmileRight", 0.45),
    ("mouthDimpleLeft", 0.2),
    ("mouthDimpleRight", 0.2),
    ("mouthLowerDownLeft", 0.25),
    ("mouthLowerDownRight", 0.25),
]);

static I: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.25),
    ("mouthSmileLeft", 0.55),
    ("mouthSmileRight", 0.55),
    ("mouthDimpleLeft", 0.25),
    ("mouthDimpleRight", 0.25),
]);

static O: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.45),
    ("mouthFunnel", 0.6),
    ("mouthPucker", 0.35),
    ("mouthLowerDownLeft", 0.15),
    ("mouthLowerDownRight", 0.15),
]);

static U: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.2),
    ("mouthFunnel", 0.4),
    ("mouthPucker", 0.7),
]);

static M: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.0),
    ("mouthRollUpper", 0.4),
    ("mouthRollLower", 0.4),
    ("mouthShrugUpper", 0.2),
]);

static F: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.1),
    ("mouthRollLower", 0.5),
    ("mouthShrugUpper", 0.3),
    ("mouthDimpleLeft", 0.1),
    ("mouthDimpleRight", 0.1),
]);

static TH: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.2),
    ("mouthRollLower", 0.15),
    ("mouthShrugUpper", 0.1),
    ("mouthLowerDownLeft", 0.1),
    ("mouthLowerDownRight", 0.1),
]);

static DEFAULT: MorphWeightSet = MorphWeightSet::new(&[
    ("jawOpen", 0.25),
    ("mouthFunnel", 0.05),
    ("mouthLowerDownLeft", 0.15),
    ("mouthLowerDownRight", 0.15),
]);

/// Static viseme → weight-set mapping
pub struct VisemeTable;

impl VisemeTable {
    /// Weight-set for a viseme; aliases share their canonical entry
    pub fn lookup(viseme: Viseme) -> &'static MorphWeightSet {
        match viseme.canonical() {
            Viseme::Silence => &SILENCE,
            Viseme::A => &A,
            Viseme::E => &E,
            Viseme::I => &I,
            Viseme::O => &O,
            Viseme::U => &U,
            Viseme::M => &M,
            Viseme::F => &F,
            Viseme::TH => &TH,
            _ => &DEFAULT,
        }
    }

    /// Weight-set for a symbol name, unknown names use `default`
    pub fn lookup_symbol(symbol: &str) -> &'static MorphWeightSet {
        Self::lookup(Viseme::parse_lenient(symbol))
    }

    /// The fallback entry
    pub fn fallback() -> &'static MorphWeightSet {
        &DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_identity() {
        let m = VisemeTable::lookup(Viseme::M);
        assert!(std::ptr::eq(VisemeTable::lookup(Viseme::B), m));
        assert!(std::ptr::eq(VisemeTable::lookup(Viseme::P), m));
        assert_eq!(VisemeTable::lookup(Viseme::B), m);

        let f = VisemeTable::lookup(Viseme::F);
        assert!(std::ptr::eq(VisemeTable::lookup(Viseme::V), f));
        assert_eq!(VisemeTable::lookup(Viseme::V), f);
    }

    #[test]
    fn test_unknown_symbol_falls_back() {
        assert!(std::ptr::eq(
            VisemeTable::lookup_symbol("xyz"),
            VisemeTable::fallback()
        ));
        assert!(std::ptr::eq(
            VisemeTable::lookup(Viseme::Default),
            VisemeTable::fallback()
        ));
    }

    #[test]
    fn test_targets_are_capped() {
        let a = VisemeTable::lookup(Viseme::A);
        assert_eq!(a.raw("jawOpen"), 0.6);
        assert_eq!(a.target("jawOpen"), INTENSITY_CAP);
        assert_eq!(a.target("mouthFunnel"), 0.1);
        assert_eq!(a.target("mouthPucker"), 0.0);
    }

    #[test]
    fn test_only_driven_channels() {
        for viseme in Viseme::all() {
            for (channel, value) in VisemeTable::lookup(*viseme).iter() {
                assert!(DRIVEN_CHANNELS.contains(&channel), "{channel}");
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_driven_channels_covered() {
        for channel in DRIVEN_CHANNELS {
            let used = Viseme::all()
                .iter()
                .any(|v| VisemeTable::lookup(*v).iter().any(|(c, _)| c == *channel));
            assert!(used, "{channel} never driven");
        }
    }
}
