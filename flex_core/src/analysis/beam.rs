//! # Continuous Beam Analysis
//!
//! Slope-deflection analysis of two- and three-span continuous beams with
//! configurable support conditions and support settlement.
//!
//! ## Notation
//!
//! - N spans create N+1 nodes labelled A, B, C, ... left to right
//! - Span i runs between nodes i and i+1; its label joins the letters
//!   (`AB`, `BC`, `CD`)
//! - Unknown rotations live at the interior joints (θB, θC) and, when the
//!   right end is hinged or a roller, at the end node (θD)
//!
//! ## Example
//!
//! ```rust
//! use flex_core::analysis::beam::{analyze_beam, BeamInput, Span};
//! use flex_core::analysis::SupportType;
//! use flex_core::loads::LoadKind;
//!
//! // Three equal spans under a uniform load, fixed at the outer walls.
//! let mut spans = vec![
//!     Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
//!     Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
//!     Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
//! ];
//! spans[0].start_support = SupportType::Fixed;
//! spans[2].end_support = SupportType::Fixed;
//!
//! let input = BeamInput {
//!     label: "CB-1".to_string(),
//!     modulus_of_elasticity: 1.0,
//!     moment_of_inertia: 1.0,
//!     spans,
//!     sinking_supports: vec![0.0; 4],
//! };
//!
//! let analysis = analyze_beam(&input).unwrap();
//! assert_eq!(analysis.reactions.len(), 4);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::diagrams::{beam_critical_points, beam_diagrams};
use crate::analysis::fem::{span_fixed_end_moments, MemberFem};
use crate::analysis::moments::{beam_end_moments, beam_span_moments};
use crate::analysis::reactions::{beam_reactions, span_reactions};
use crate::analysis::slope_deflection::{
    assemble_beam_boundary, generate_beam_equations, solve_boundary, RenderedEquation,
};
use crate::analysis::{
    span_label, EndMoment, MemberDiagram, Reaction, Solution, SpanCriticalPoints, SupportType,
};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{LoadKind, PointLoadDistances};

// =============================================================================
// SPAN
// =============================================================================

/// A single span between two supports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// Unique identifier for this span
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Span length
    pub length: f64,

    /// Moment of inertia relative to the reference span (values below 1
    /// are treated as 1 in the stiffness coefficients)
    pub moment_of_inertia: f64,

    /// Load pattern on this span
    pub load: LoadKind,

    /// Load magnitude: force for point patterns, intensity for
    /// distributed ones
    pub load_magnitude: f64,

    /// Location of a `PointAtDistance` load
    #[serde(default)]
    pub point_load_distances: Option<PointLoadDistances>,

    /// Support at the start (left) node
    pub start_support: SupportType,

    /// Support at the end (right) node
    pub end_support: SupportType,

    /// Optional user label for this span
    #[serde(default)]
    pub label: String,
}

impl Span {
    /// Create a span with hinged supports at both ends
    pub fn new(length: f64, moment_of_inertia: f64, load: LoadKind, load_magnitude: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            length,
            moment_of_inertia,
            load,
            load_magnitude,
            point_load_distances: None,
            start_support: SupportType::Hinged,
            end_support: SupportType::Hinged,
            label: String::new(),
        }
    }

    /// Set the supports at both ends
    pub fn with_supports(mut self, start: SupportType, end: SupportType) -> Self {
        self.start_support = start;
        self.end_support = end;
        self
    }

    /// Set the point-load distances
    pub fn with_point_load_distances(mut self, distances: PointLoadDistances) -> Self {
        self.point_load_distances = Some(distances);
        self
    }

    /// Set a user label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Validate span parameters; `index` locates the span in error
    /// messages
    pub fn validate(&self, index: usize) -> CalcResult<()> {
        let field = |name: &str| format!("spans[{}].{}", index, name);
        if self.length <= 0.0 {
            return Err(CalcError::invalid_input(
                field("length"),
                self.length.to_string(),
                "Span length must be positive",
            ));
        }
        if self.moment_of_inertia <= 0.0 {
            return Err(CalcError::invalid_input(
                field("moment_of_inertia"),
                self.moment_of_inertia.to_string(),
                "Moment of inertia must be positive",
            ));
        }
        if self.load_magnitude < 0.0 {
            return Err(CalcError::invalid_input(
                field("load_magnitude"),
                self.load_magnitude.to_string(),
                "Load magnitude cannot be negative",
            ));
        }
        if self.load == LoadKind::PointAtDistance {
            let distances = self
                .point_load_distances
                .ok_or_else(|| CalcError::missing_field(field("point_load_distances")))?;
            if distances.a <= 0.0 || distances.b <= 0.0 {
                return Err(CalcError::invalid_input(
                    field("point_load_distances"),
                    format!("a = {}, b = {}", distances.a, distances.b),
                    "Both distances must be positive",
                ));
            }
            if (distances.a + distances.b - self.length).abs() > 1e-9 {
                return Err(CalcError::invalid_input(
                    field("point_load_distances"),
                    format!("a + b = {}", distances.a + distances.b),
                    "Distances must sum to the span length",
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// BEAM INPUT
// =============================================================================

/// Input for continuous beam analysis
///
/// ## Node/Span Relationship
///
/// For N spans there are N+1 nodes (support locations):
///
/// ```text
/// Node A    Node B    Node C    Node D
///   |---------|---------|---------|
///     Span AB   Span BC   Span CD
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label for this beam
    #[serde(default)]
    pub label: String,

    /// Global modulus of elasticity E
    pub modulus_of_elasticity: f64,

    /// Global moment of inertia I; EI = round(E·I) scales the rotation
    /// terms
    pub moment_of_inertia: f64,

    /// Span segments, ordered left to right (two or three)
    pub spans: Vec<Span>,

    /// Support settlement at each node, `spans.len() + 1` entries;
    /// an empty vector means no settlement
    #[serde(default)]
    pub sinking_supports: Vec<f64>,
}

impl BeamInput {
    /// Validate the full input
    pub fn validate(&self) -> CalcResult<()> {
        if self.modulus_of_elasticity <= 0.0 {
            return Err(CalcError::invalid_input(
                "modulus_of_elasticity",
                self.modulus_of_elasticity.to_string(),
                "Modulus of elasticity must be positive",
            ));
        }
        if self.moment_of_inertia <= 0.0 {
            return Err(CalcError::invalid_input(
                "moment_of_inertia",
                self.moment_of_inertia.to_string(),
                "Moment of inertia must be positive",
            ));
        }
        if !(2..=3).contains(&self.spans.len()) {
            return Err(CalcError::invalid_input(
                "spans",
                self.spans.len().to_string(),
                "Beam analysis supports two or three spans",
            ));
        }
        for (index, span) in self.spans.iter().enumerate() {
            span.validate(index)?;
        }
        if !self.sinking_supports.is_empty() && self.sinking_supports.len() != self.spans.len() + 1
        {
            return Err(CalcError::invalid_input(
                "sinking_supports",
                self.sinking_supports.len().to_string(),
                "One settlement value per node is required",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// RESULT BUNDLE
// =============================================================================

/// The complete result of one beam analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamAnalysis {
    /// Fixed-end moments per span
    pub fixed_end_moments: Vec<MemberFem>,
    /// Slope-deflection equations per span, rendered for display
    pub equations: Vec<RenderedEquation>,
    /// Assembled joint-equilibrium equations, rendered for display
    pub boundary_equations: Vec<String>,
    /// Solved rotations
    pub solution: Solution,
    /// Final end moments, labelled `MAB`, `MBA`, ...
    pub final_moments: Vec<EndMoment>,
    /// Support reactions, labelled `RA`, `RB`, ...
    pub reactions: Vec<Reaction>,
    /// Bending-moment/shear-force series per span
    pub diagrams: Vec<MemberDiagram>,
    /// Critical points per span
    pub critical_points: Vec<SpanCriticalPoints>,
}

/// Run the full slope-deflection pipeline for a continuous beam.
///
/// The run is atomic: any failure (invalid input, unsupported
/// configuration, singular equilibrium system) aborts with a structured
/// error and no partial bundle. The same input always produces the same
/// bundle.
pub fn analyze_beam(input: &BeamInput) -> CalcResult<BeamAnalysis> {
    input.validate()?;

    let sinking = if input.sinking_supports.is_empty() {
        vec![0.0; input.spans.len() + 1]
    } else {
        input.sinking_supports.clone()
    };

    let fems: Vec<_> = input.spans.iter().map(span_fixed_end_moments).collect();
    let equations = generate_beam_equations(&input.spans, &fems, &sinking);

    let system = assemble_beam_boundary(&equations, &input.spans)?;
    let ei = (input.modulus_of_elasticity * input.moment_of_inertia).round();
    let solution = solve_boundary(&system, ei)?;

    let span_moments = beam_span_moments(&equations, &solution, ei);
    let final_moments = beam_end_moments(&equations, &span_moments);

    let span_reaction_pairs: Vec<(f64, f64)> = input
        .spans
        .iter()
        .zip(&span_moments)
        .map(|(span, (start, end))| span_reactions(span, *start, *end))
        .collect();
    let reactions = beam_reactions(&input.spans, &span_moments);

    let diagrams = beam_diagrams(&input.spans, &span_moments, &span_reaction_pairs);
    let critical_points =
        beam_critical_points(&input.spans, &span_moments, &span_reaction_pairs);

    Ok(BeamAnalysis {
        fixed_end_moments: fems
            .iter()
            .enumerate()
            .map(|(i, fem)| MemberFem {
                member_label: span_label(i),
                start: fem.start,
                end: fem.end,
            })
            .collect(),
        equations: equations.iter().map(RenderedEquation::from).collect(),
        boundary_equations: system
            .equations
            .iter()
            .map(|eq| format!("{} = 0", eq.render()))
            .collect(),
        solution,
        final_moments,
        reactions,
        diagrams,
        critical_points,
    })
}
