//! Shared types and enums used across the converter.
//! Includes the spatial `Axis` tag and the axis mapping kinds (`MappingKind`,
//! `TimeMappingKind`) recognised in XDEF/YDEF/ZDEF/TDEF entries.
use serde::{Deserialize, Serialize};

/// Spatial axis an XDEF/YDEF/ZDEF entry describes
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// CTL keyword that defines this axis
    pub fn keyword(self) -> &'static str {
        match self {
            Axis::X => "XDEF",
            Axis::Y => "YDEF",
            Axis::Z => "ZDEF",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// How the values of a spatial axis are interpreted
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum MappingKind {
    /// `[origin, increment]`
    Linear,
    /// Explicit list of `count` values
    Levels,
    // Gaussian latitude grids, Y only
    GaussianT62,
    GaussianR15,
    GaussianR20,
    GaussianR30,
    GaussianR40,
}

impl MappingKind {
    /// Map a CTL mapping keyword for the given axis. Gaussian grids are only
    /// meaningful for latitudes, so they resolve on `Axis::Y` alone.
    pub fn from_keyword(keyword: &str, axis: Axis) -> Option<Self> {
        let kind = match keyword {
            "LINEAR" => MappingKind::Linear,
            "LEVELS" => MappingKind::Levels,
            "GAUST62" => MappingKind::GaussianT62,
            "GAUSR15" => MappingKind::GaussianR15,
            "GAUSR20" => MappingKind::GaussianR20,
            "GAUSR30" => MappingKind::GaussianR30,
            "GAUSR40" => MappingKind::GaussianR40,
            _ => return None,
        };
        if kind.is_gaussian() && axis != Axis::Y {
            return None;
        }
        Some(kind)
    }

    pub fn is_gaussian(self) -> bool {
        !matches!(self, MappingKind::Linear | MappingKind::Levels)
    }
}

impl std::fmt::Display for MappingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MappingKind::Linear => "LINEAR",
            MappingKind::Levels => "LEVELS",
            MappingKind::GaussianT62 => "GAUST62",
            MappingKind::GaussianR15 => "GAUSR15",
            MappingKind::GaussianR20 => "GAUSR20",
            MappingKind::GaussianR30 => "GAUSR30",
            MappingKind::GaussianR40 => "GAUSR40",
        };
        write!(f, "{}", s)
    }
}

/// How the values of the time axis are interpreted
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum TimeMappingKind {
    Linear,
    Levels,
}

impl TimeMappingKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "LINEAR" => Some(TimeMappingKind::Linear),
            "LEVELS" => Some(TimeMappingKind::Levels),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimeMappingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeMappingKind::Linear => write!(f, "LINEAR"),
            TimeMappingKind::Levels => write!(f, "LEVELS"),
        }
    }
}
