use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{PortalError, Result};

/// Letter grade on the fixed 4.0 scale
///
/// Points are kept as integer tenths so that credit-weighted sums are exact
/// and do not depend on the order the courses are added in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LetterGrade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
}

impl LetterGrade {
    /// The whole scale, best grade first
    pub const ALL: [LetterGrade; 12] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::F,
    ];

    /// Grade points in tenths (A- is 37)
    pub fn tenths(self) -> u32 {
        match self {
            LetterGrade::APlus | LetterGrade::A => 40,
            LetterGrade::AMinus => 37,
            LetterGrade::BPlus => 33,
            LetterGrade::B => 30,
            LetterGrade::BMinus => 27,
            LetterGrade::CPlus => 23,
            LetterGrade::C => 20,
            LetterGrade::CMinus => 17,
            LetterGrade::DPlus => 13,
            LetterGrade::D => 10,
            LetterGrade::F => 0,
        }
    }

    pub fn points(self) -> f64 {
        f64::from(self.tenths()) / 10.0
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for LetterGrade {
    type Err = PortalError;

    /// Strict: anything other than the twelve symbols is rejected.
    fn from_str(s: &str) -> Result<Self> {
        let symbol = s.trim();
        LetterGrade::ALL
            .iter()
            .copied()
            .find(|grade| grade.symbol() == symbol)
            .ok_or_else(|| PortalError::UnknownGrade(symbol.to_string()))
    }
}

impl Serialize for LetterGrade {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for LetterGrade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Grade points for a letter grade
pub fn grade_points(grade: LetterGrade) -> f64 {
    grade.points()
}

/// Grade points for a raw symbol, e.g. from a form field
///
/// # Errors
/// * `PortalError::UnknownGrade` if the symbol is not on the scale
pub fn grade_points_for_symbol(symbol: &str) -> Result<f64> {
    symbol.parse::<LetterGrade>().map(grade_points)
}
