//! # Structural Analysis
//!
//! The slope-deflection pipeline for continuous beams and portal frames.
//! Each analysis follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), validated once at
//!   the boundary
//! - `*Analysis` - The full result bundle (JSON-serializable)
//! - `analyze_*(input) -> Result<*Analysis, CalcError>` - Pure pipeline
//!   function
//!
//! A run is atomic: either all six stages complete and a full bundle is
//! returned, or the run fails with a structured error and nothing is
//! surfaced.
//!
//! ## Available Analyses
//!
//! - [`beam`] - Continuous beams of two or three spans
//! - [`frame`] - Single-bay, two-column portal frames

pub mod beam;
pub mod diagrams;
pub mod fem;
pub mod frame;
pub mod moments;
pub mod reactions;
pub mod slope_deflection;

use serde::{Deserialize, Serialize};

use crate::expr::Unknown;

pub use beam::{analyze_beam, BeamAnalysis, BeamInput, Span};
pub use frame::{analyze_frame, Column, FrameAnalysis, FrameBeam, FrameInput};

// =============================================================================
// SUPPORT TYPE
// =============================================================================

/// Support condition at a member end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupportType {
    /// Hinged/pinned support - restrains translation, allows rotation
    #[default]
    Hinged,

    /// Roller support - equivalent to hinged for this analysis
    Roller,

    /// Fixed support - restrains translation and rotation (θ = 0)
    Fixed,

    /// No support - a free cantilever end
    None,
}

impl SupportType {
    /// All available support types for UI selection
    pub const ALL: [SupportType; 4] = [
        SupportType::Hinged,
        SupportType::Roller,
        SupportType::Fixed,
        SupportType::None,
    ];

    /// Returns true if this support restrains rotation
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, SupportType::Fixed)
    }

    /// Returns true if this support restrains translation
    pub fn restrains_translation(&self) -> bool {
        matches!(
            self,
            SupportType::Hinged | SupportType::Roller | SupportType::Fixed
        )
    }

    /// Returns true for the rotational releases (hinged or roller)
    pub fn is_rotational_release(&self) -> bool {
        matches!(self, SupportType::Hinged | SupportType::Roller)
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportType::Hinged => "Hinged",
            SupportType::Roller => "Roller",
            SupportType::Fixed => "Fixed",
            SupportType::None => "Free",
        }
    }

    /// Get short symbol for diagrams
    pub fn symbol(&self) -> &'static str {
        match self {
            SupportType::Hinged => "△",
            SupportType::Roller => "○",
            SupportType::Fixed => "▣",
            SupportType::None => "",
        }
    }
}

impl std::fmt::Display for SupportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// SHARED RESULT TYPES
// =============================================================================

/// Solved unknowns of one analysis run
///
/// `theta_d` is present only when a rotational release adds the θD
/// unknown; `delta` only for frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Rotation at joint B (times 1/EI)
    pub theta_b: f64,
    /// Rotation at joint C (times 1/EI)
    pub theta_c: f64,
    /// Rotation at joint D, when the end release makes it an unknown
    pub theta_d: Option<f64>,
    /// Horizontal sway of the beam level (frames only)
    pub delta: Option<f64>,
}

impl Solution {
    /// Value of an unknown; unknowns that were not part of the system are
    /// structurally zero
    pub fn value_of(&self, unknown: Unknown) -> f64 {
        match unknown {
            Unknown::ThetaA => 0.0,
            Unknown::ThetaB => self.theta_b,
            Unknown::ThetaC => self.theta_c,
            Unknown::ThetaD => self.theta_d.unwrap_or(0.0),
            Unknown::Delta => self.delta.unwrap_or(0.0),
        }
    }
}

/// A labelled member-end moment, e.g. `MAB` or `MC1s`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndMoment {
    /// Display label generated from the member ends
    pub label: String,
    /// Moment value
    pub value: f64,
}

/// A labelled support reaction, e.g. `RA` or `H1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Display label generated from the support
    pub label: String,
    /// Reaction value
    pub value: f64,
}

/// One sampled position of a bending-moment/shear-force distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    /// Position along the member, from its start
    pub x: f64,
    /// Bending moment at `x`
    pub bending_moment: f64,
    /// Shear force at `x`
    pub shear_force: f64,
}

/// Sampled bending-moment/shear-force series for one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDiagram {
    /// Member label, e.g. `AB` or `BC`
    pub member_label: String,
    /// Ordered samples from the member start to its end
    pub points: Vec<DiagramPoint>,
}

/// A critical position along a span: a load discontinuity or the interior
/// maximum-moment point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPoint {
    /// Human-readable description of the location
    pub location: String,
    /// Position measured from the start of the whole beam
    pub position: f64,
    /// Bending moment at the position
    pub bending_moment: f64,
    /// Shear force at the position
    pub shear_force: f64,
}

/// Critical points of one span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanCriticalPoints {
    /// Span label, e.g. `AB`
    pub span_label: String,
    /// Critical points in position order
    pub critical_points: Vec<CriticalPoint>,
}

/// Letter of the node at index `i` (A, B, C, ...)
pub(crate) fn node_letter(i: usize) -> char {
    (b'A' + i as u8) as char
}

/// Label of the span starting at node `i`, e.g. `AB`
pub(crate) fn span_label(i: usize) -> String {
    format!("{}{}", node_letter(i), node_letter(i + 1))
}
