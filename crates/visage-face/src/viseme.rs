//! Viseme - mouth shapes for speech

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use visage_core::VisageError;

/// Visual mouth-shape category
///
/// `B`/`P` are aliases of `M` and `V` is an alias of `F`; they share the
/// same weight-set in the viseme table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Viseme {
    Silence,
    A,
    E,
    I,
    O,
    U,
    M,
    F,
    TH,
    #[default]
    Default,
    B,
    P,
    V,
}

impl Viseme {
    /// All symbols, aliases included
    pub fn all() -> &'static [Viseme] {
        &[
            Viseme::Silence,
            Viseme::A,
            Viseme::E,
            Viseme::I,
            Viseme::O,
            Viseme::U,
            Viseme::M,
            Viseme::F,
            Viseme::TH,
            Viseme::Default,
            Viseme::B,
            Viseme::P,
            Viseme::V,
        ]
    }

    /// Resolve aliases to the symbol that owns the weight-set
    pub fn canonical(self) -> Viseme {
        match self {
            Viseme::B | Viseme::P => Viseme::M,
            Viseme::V => Viseme::F,
            other => other,
        }
    }

    pub fn is_alias(self) -> bool {
        self.canonical() != self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Viseme::Silence => "silence",
            Viseme::A => "A",
            Viseme::E => "E",
            Viseme::I => "I",
            Viseme::O => "O",
            Viseme::U => "U",
            Viseme::M => "M",
            Viseme::F => "F",
            Viseme::TH => "TH",
            Viseme::Default => "default",
            Viseme::B => "B",
            Viseme::P => "P",
            Viseme::V => "V",
        }
    }

    /// Parse a symbol, falling back to `Default` for anything unknown
    pub fn parse_lenient(symbol: &str) -> Viseme {
        symbol.parse().unwrap_or(Viseme::Default)
    }
}

impl FromStr for Viseme {
    type Err = VisageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let viseme = match s.trim().to_ascii_lowercase().as_str() {
            "silence" | "sil" => Viseme::Silence,
            "a" => Viseme::A,
            "e" => Viseme::E,
            "i" => Viseme::I,
            "o" => Viseme::O,
            "u" => Viseme::U,
            "m" => Viseme::M,
            "f" => Viseme::F,
            "th" => Viseme::TH,
            "default" => Viseme::Default,
            "b" => Viseme::B,
            "p" => Viseme::P,
            "v" => Viseme::V,
            _ => return Err(VisageError::UnknownViseme(s.to_string())),
        };
        Ok(viseme)
    }
}

impl fmt::Display for Viseme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
