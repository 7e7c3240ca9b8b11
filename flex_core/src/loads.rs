//! Load kind definitions for the slope-deflection analyzer
//!
//! A member carries exactly one load pattern, described by a [`LoadKind`]
//! and a single magnitude: the point-load force P for concentrated
//! patterns, or the intensity w (force per unit length) for distributed
//! ones. Concentrated patterns with more than one force use equal forces
//! at the standard spacings (thirds, quarters).

use serde::{Deserialize, Serialize};

/// Load pattern applied to a member
///
/// Beams accept every kind. Frame members use a narrower subset: the beam
/// of a portal frame accepts `None`, `CenterPoint`, `PointAtDistance` and
/// `Udl`; columns accept `None`, `CenterPoint` and `PointAtDistance`.
///
/// # Example
/// ```
/// use flex_core::loads::LoadKind;
///
/// let kind = LoadKind::Udl;
/// assert_eq!(kind.display_name(), "Uniformly distributed load over the whole length");
/// assert!(kind.is_distributed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadKind {
    /// No applied load
    None,
    /// Single point load at midspan
    CenterPoint,
    /// Single point load at distance `a` from the start, `b` from the end
    PointAtDistance,
    /// Two equal point loads at L/3 and 2L/3
    TwoPointLoads,
    /// Three equal point loads at L/4, L/2 and 3L/4
    ThreePointLoads,
    /// Uniformly distributed load over the whole length
    #[default]
    Udl,
    /// Triangular load rising from zero at the start to w at the end
    VdlRight,
    /// Triangular load falling from w at the start to zero at the end
    VdlLeft,
}

impl LoadKind {
    /// All load kinds in form order
    pub const ALL: [LoadKind; 8] = [
        LoadKind::None,
        LoadKind::CenterPoint,
        LoadKind::PointAtDistance,
        LoadKind::TwoPointLoads,
        LoadKind::ThreePointLoads,
        LoadKind::Udl,
        LoadKind::VdlRight,
        LoadKind::VdlLeft,
    ];

    /// Human-readable description for UI selection
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadKind::None => "No Load",
            LoadKind::CenterPoint => "Point load at center",
            LoadKind::PointAtDistance => {
                "Point load at distance 'a' from left end and 'b' from the right end"
            }
            LoadKind::TwoPointLoads => {
                "Two equal point loads, spaced at 1/3 of the total length from each other"
            }
            LoadKind::ThreePointLoads => {
                "Three equal point loads, spaced at 1/4 of the total length from each other"
            }
            LoadKind::Udl => "Uniformly distributed load over the whole length",
            LoadKind::VdlRight => "Variably distributed load, with highest point on the right end",
            LoadKind::VdlLeft => "Variably distributed load, with highest point on the left end",
        }
    }

    /// Whether the magnitude is an intensity (force per unit length)
    /// rather than a concentrated force
    pub fn is_distributed(&self) -> bool {
        matches!(self, LoadKind::Udl | LoadKind::VdlRight | LoadKind::VdlLeft)
    }

    /// Whether this kind may be applied to the beam of a portal frame
    pub fn allowed_on_frame_beam(&self) -> bool {
        matches!(
            self,
            LoadKind::None | LoadKind::CenterPoint | LoadKind::PointAtDistance | LoadKind::Udl
        )
    }

    /// Whether this kind may be applied to a frame column
    pub fn allowed_on_column(&self) -> bool {
        matches!(
            self,
            LoadKind::None | LoadKind::CenterPoint | LoadKind::PointAtDistance
        )
    }

    /// Total applied force for magnitude `p` on a member of length `l`
    ///
    /// For distributed kinds `p` is the intensity; for the triangular
    /// patterns the total is the area of the triangle, w·L/2.
    pub fn total_load(&self, p: f64, l: f64) -> f64 {
        match self {
            LoadKind::None => 0.0,
            LoadKind::CenterPoint | LoadKind::PointAtDistance => p,
            LoadKind::TwoPointLoads => 2.0 * p,
            LoadKind::ThreePointLoads => 3.0 * p,
            LoadKind::Udl => p * l,
            LoadKind::VdlRight | LoadKind::VdlLeft => 0.5 * p * l,
        }
    }

    /// Moment of the applied load about the start of the member
    /// (total load times centroid distance, summed for multi-point kinds)
    ///
    /// `a` is the point-load distance from the start, used only by
    /// `PointAtDistance`.
    pub fn load_moment_about_start(&self, p: f64, l: f64, a: f64) -> f64 {
        match self {
            LoadKind::None => 0.0,
            LoadKind::CenterPoint => p * l / 2.0,
            LoadKind::PointAtDistance => p * a,
            LoadKind::TwoPointLoads => p * (l / 3.0 + 2.0 * l / 3.0),
            LoadKind::ThreePointLoads => p * (l / 4.0 + l / 2.0 + 3.0 * l / 4.0),
            // Triangle peaking at the right: centroid at 2L/3 from the start
            LoadKind::VdlRight => 0.5 * p * l * (l - l / 3.0),
            // Triangle peaking at the left: centroid at L/3 from the start
            LoadKind::VdlLeft => 0.5 * p * l * (l / 3.0),
            LoadKind::Udl => p * l * l / 2.0,
        }
    }

    /// Positions of the concentrated forces, measured from the start
    ///
    /// Empty for distributed kinds and `None`.
    pub fn point_load_positions(&self, l: f64, a: f64) -> Vec<f64> {
        match self {
            LoadKind::CenterPoint => vec![l / 2.0],
            LoadKind::PointAtDistance => vec![a],
            LoadKind::TwoPointLoads => vec![l / 3.0, 2.0 * l / 3.0],
            LoadKind::ThreePointLoads => vec![l / 4.0, l / 2.0, 3.0 * l / 4.0],
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for LoadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Distances locating a `PointAtDistance` load: `a` from the start of the
/// member, `b` from its end. Valid input satisfies a + b = L with both
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointLoadDistances {
    /// Distance from the start of the member
    pub a: f64,
    /// Distance from the end of the member
    pub b: f64,
}

impl PointLoadDistances {
    /// Create a distance pair
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }
}
