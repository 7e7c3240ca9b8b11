//! # Portal Frame Analysis
//!
//! Slope-deflection analysis of a single-bay, two-column portal frame
//! with sway.
//!
//! ## Notation
//!
//! ```text
//!      B ========== C
//!      |    beam    |
//!   C1 |            | C2
//!      |            |
//!      A            D
//! ```
//!
//! Column 1 runs from base A to joint B, column 2 from joint C to base D,
//! the beam from B to C. Unknowns are the joint rotations θB and θC, the
//! sway δ of the beam level, and θD when column 2's base is hinged or a
//! roller. Member inertia is baked into the equation coefficients and the
//! global EI is 1 by convention.
//!
//! ## Example
//!
//! ```rust
//! use flex_core::analysis::frame::{analyze_frame, Column, FrameBeam, FrameInput};
//! use flex_core::analysis::SupportType;
//! use flex_core::loads::LoadKind;
//!
//! let input = FrameInput {
//!     label: "PF-1".to_string(),
//!     columns: vec![
//!         Column::new(4.0, 1.0, SupportType::Fixed),
//!         Column::new(4.0, 1.0, SupportType::Fixed),
//!     ],
//!     beam: FrameBeam::new(6.0, 1.0, LoadKind::Udl, 10.0),
//! };
//!
//! let analysis = analyze_frame(&input).unwrap();
//! // A symmetric frame does not sway.
//! assert!(analysis.solution.delta.unwrap().abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::diagrams::{column_diagram, frame_beam_diagram, ColumnDiagram};
use crate::analysis::fem::{frame_member_fixed_end_moments, MemberFem};
use crate::analysis::moments::{frame_end_moments, frame_member_moments};
use crate::analysis::reactions::{frame_horizontal_reactions, frame_vertical_reactions};
use crate::analysis::slope_deflection::{
    assemble_frame_system, generate_frame_equations, solve_boundary, RenderedEquation,
    FRAME_BEAM, FRAME_COLUMN_1, FRAME_COLUMN_2,
};
use crate::analysis::{EndMoment, MemberDiagram, Reaction, Solution, SupportType};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{LoadKind, PointLoadDistances};

// =============================================================================
// MEMBERS
// =============================================================================

/// A frame column between a base support and a beam joint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier for this column
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Column height
    pub length: f64,

    /// Moment of inertia relative to the reference member
    pub moment_of_inertia: f64,

    /// Support at the column base
    pub support: SupportType,

    /// Horizontal load pattern on the column
    pub load: LoadKind,

    /// Load magnitude
    pub load_magnitude: f64,

    /// Location of a `PointAtDistance` load, measured from the member's
    /// start node
    #[serde(default)]
    pub point_load_distances: Option<PointLoadDistances>,
}

impl Column {
    /// Create an unloaded column
    pub fn new(length: f64, moment_of_inertia: f64, support: SupportType) -> Self {
        Self {
            id: Uuid::new_v4(),
            length,
            moment_of_inertia,
            support,
            load: LoadKind::None,
            load_magnitude: 0.0,
            point_load_distances: None,
        }
    }

    /// Set the load pattern
    pub fn with_load(mut self, load: LoadKind, magnitude: f64) -> Self {
        self.load = load;
        self.load_magnitude = magnitude;
        self
    }

    /// Set the point-load distances
    pub fn with_point_load_distances(mut self, distances: PointLoadDistances) -> Self {
        self.point_load_distances = Some(distances);
        self
    }

    fn validate(&self, index: usize) -> CalcResult<()> {
        let field = |name: &str| format!("columns[{}].{}", index, name);
        if self.length <= 0.0 {
            return Err(CalcError::invalid_input(
                field("length"),
                self.length.to_string(),
                "Column height must be positive",
            ));
        }
        if self.moment_of_inertia <= 0.0 {
            return Err(CalcError::invalid_input(
                field("moment_of_inertia"),
                self.moment_of_inertia.to_string(),
                "Moment of inertia must be positive",
            ));
        }
        if self.support == SupportType::None {
            return Err(CalcError::invalid_input(
                field("support"),
                self.support.to_string(),
                "A column base must be fixed, hinged or a roller",
            ));
        }
        if !self.load.allowed_on_column() {
            return Err(CalcError::invalid_input(
                field("load"),
                self.load.to_string(),
                "Columns accept no load, a center point load or a point load at a distance",
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
            let a = self
                .point_load_distances
                .ok_or_else(|| CalcError::missing_field(field("point_load_distances")))?
                .a;
            if a <= 0.0 || a >= self.length {
                return Err(CalcError::invalid_input(
                    field("point_load_distances"),
                    a.to_string(),
                    "The load must sit strictly inside the column",
                ));
            }
        }
        Ok(())
    }
}

/// The beam of a portal frame, spanning joints B and C
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameBeam {
    /// Unique identifier for this beam
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Beam length
    pub length: f64,

    /// Moment of inertia relative to the reference member
    pub moment_of_inertia: f64,

    /// Vertical load pattern on the beam
    pub load: LoadKind,

    /// Load magnitude
    pub load_magnitude: f64,

    /// Location of a `PointAtDistance` load
    #[serde(default)]
    pub point_load_distances: Option<PointLoadDistances>,
}

impl FrameBeam {
    /// Create a frame beam
    pub fn new(length: f64, moment_of_inertia: f64, load: LoadKind, load_magnitude: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            length,
            moment_of_inertia,
            load,
            load_magnitude,
            point_load_distances: None,
        }
    }

    /// Set the point-load distances
    pub fn with_point_load_distances(mut self, distances: PointLoadDistances) -> Self {
        self.point_load_distances = Some(distances);
        self
    }

    fn validate(&self) -> CalcResult<()> {
        if self.length <= 0.0 {
            return Err(CalcError::invalid_input(
                "beam.length",
                self.length.to_string(),
                "Beam length must be positive",
            ));
        }
        if self.moment_of_inertia <= 0.0 {
            return Err(CalcError::invalid_input(
                "beam.moment_of_inertia",
                self.moment_of_inertia.to_string(),
                "Moment of inertia must be positive",
            ));
        }
        if !self.load.allowed_on_frame_beam() {
            return Err(CalcError::invalid_input(
                "beam.load",
                self.load.to_string(),
                "The frame beam accepts no load, point loads or a uniform load",
            ));
        }
        if self.load_magnitude < 0.0 {
            return Err(CalcError::invalid_input(
                "beam.load_magnitude",
                self.load_magnitude.to_string(),
                "Load magnitude cannot be negative",
            ));
        }
        if self.load == LoadKind::PointAtDistance {
            let a = self
                .point_load_distances
                .ok_or_else(|| CalcError::missing_field("beam.point_load_distances"))?
                .a;
            if a <= 0.0 || a >= self.length {
                return Err(CalcError::invalid_input(
                    "beam.point_load_distances",
                    a.to_string(),
                    "The load must sit strictly inside the beam",
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// FRAME INPUT
// =============================================================================

/// Input for portal frame analysis: exactly two columns and one beam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameInput {
    /// User label for this frame
    #[serde(default)]
    pub label: String,

    /// The two columns, left (A-B) then right (C-D)
    pub columns: Vec<Column>,

    /// The beam spanning the column tops
    pub beam: FrameBeam,
}

impl FrameInput {
    /// Validate the full input
    pub fn validate(&self) -> CalcResult<()> {
        if self.columns.len() != 2 {
            return Err(CalcError::invalid_input(
                "columns",
                self.columns.len().to_string(),
                "A portal frame has exactly two columns",
            ));
        }
        for (index, column) in self.columns.iter().enumerate() {
            column.validate(index)?;
        }
        self.beam.validate()
    }
}

// =============================================================================
// RESULT BUNDLE
// =============================================================================

/// The complete result of one frame analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Fixed-end moments per member (C1, C2, BC)
    pub fixed_end_moments: Vec<MemberFem>,
    /// Slope-deflection equations per member, rendered for display
    pub equations: Vec<RenderedEquation>,
    /// Joint-equilibrium (and release) equations, rendered for display
    pub boundary_equations: Vec<String>,
    /// The shear condition, rendered for display
    pub shear_equation: String,
    /// Solved rotations and sway
    pub solution: Solution,
    /// Final end moments, labelled `MC1s`, `MC1e`, `MC2s`, `MC2e`,
    /// `MBCs`, `MBCe`
    pub final_moments: Vec<EndMoment>,
    /// Horizontal base reactions, labelled `H1`, `H2`
    pub horizontal_reactions: Vec<Reaction>,
    /// Vertical base reactions, labelled `RA`, `RD`
    pub vertical_reactions: Vec<Reaction>,
    /// Column distributions, split at load points
    pub column_diagrams: Vec<ColumnDiagram>,
    /// Beam distribution
    pub beam_diagram: MemberDiagram,
}

/// Run the full slope-deflection pipeline for a portal frame.
///
/// Atomic like [`analyze_beam`](crate::analysis::beam::analyze_beam):
/// a failure at any stage aborts the run with a structured error.
pub fn analyze_frame(input: &FrameInput) -> CalcResult<FrameAnalysis> {
    input.validate()?;

    let column_fems: Vec<_> = input
        .columns
        .iter()
        .map(|c| {
            frame_member_fixed_end_moments(
                c.load,
                c.load_magnitude,
                c.length,
                Some(c.support),
                c.point_load_distances,
            )
        })
        .collect();
    let beam_fem = frame_member_fixed_end_moments(
        input.beam.load,
        input.beam.load_magnitude,
        input.beam.length,
        None,
        input.beam.point_load_distances,
    );

    let equations = generate_frame_equations(
        &input.columns,
        input.beam.length,
        input.beam.moment_of_inertia,
        &column_fems,
        &beam_fem,
    );

    let system = assemble_frame_system(&input.columns, &equations)?;
    let solution = solve_boundary(&system, 1.0)?;

    let member_moments = frame_member_moments(&equations, &input.columns, &solution);
    let final_moments = frame_end_moments(&equations, &member_moments);

    let horizontal_reactions =
        frame_horizontal_reactions(&input.columns, &member_moments[..2]);
    let vertical_reactions =
        frame_vertical_reactions(&input.beam, member_moments[FRAME_BEAM]);

    let column_diagrams = input
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            column_diagram(
                column,
                i,
                member_moments[i].0,
                horizontal_reactions[i].value,
            )
        })
        .collect();
    let beam_diagram = frame_beam_diagram(
        &input.beam,
        member_moments[FRAME_BEAM].0,
        vertical_reactions[0].value,
    );

    // The shear condition is assembled last, after the joint equations.
    let (joint_equations, shear_equation) = system.equations.split_at(system.equations.len() - 1);

    Ok(FrameAnalysis {
        fixed_end_moments: vec![
            MemberFem {
                member_label: "C1".to_string(),
                start: column_fems[FRAME_COLUMN_1].start,
                end: column_fems[FRAME_COLUMN_1].end,
            },
            MemberFem {
                member_label: "C2".to_string(),
                start: column_fems[FRAME_COLUMN_2].start,
                end: column_fems[FRAME_COLUMN_2].end,
            },
            MemberFem {
                member_label: "BC".to_string(),
                start: beam_fem.start,
                end: beam_fem.end,
            },
        ],
        equations: equations.iter().map(RenderedEquation::from).collect(),
        boundary_equations: joint_equations
            .iter()
            .map(|eq| format!("{} = 0", eq.render()))
            .collect(),
        shear_equation: format!("{} = 0", shear_equation[0].render()),
        solution,
        final_moments,
        horizontal_reactions,
        vertical_reactions,
        column_diagrams,
        beam_diagram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn moment(analysis: &FrameAnalysis, label: &str) -> f64 {
        analysis
            .final_moments
            .iter()
            .find(|m| m.label == label)
            .unwrap()
            .value
    }

    /// Symmetric frame: fixed 4 m columns, 6 m beam under a 10 kN/m UDL.
    fn golden_input() -> FrameInput {
        FrameInput {
            label: "Golden".to_string(),
            columns: vec![
                Column::new(4.0, 1.0, SupportType::Fixed),
                Column::new(4.0, 1.0, SupportType::Fixed),
            ],
            beam: FrameBeam::new(6.0, 1.0, LoadKind::Udl, 10.0),
        }
    }

    #[test]
    fn test_golden_symmetric_frame() {
        let analysis = analyze_frame(&golden_input()).unwrap();

        // Antisymmetric rotations, no sway.
        assert!(approx_eq(analysis.solution.theta_b, 22.5, 1e-6));
        assert!(approx_eq(analysis.solution.theta_c, -22.5, 1e-6));
        assert!(approx_eq(
            analysis.solution.theta_b,
            -analysis.solution.theta_c,
            1e-6
        ));
        assert!(approx_eq(analysis.solution.delta.unwrap(), 0.0, 1e-6));
        assert!(analysis.solution.theta_d.is_none());

        assert!(approx_eq(moment(&analysis, "MBCs"), -22.5, 1e-6));
        assert!(approx_eq(moment(&analysis, "MBCe"), 22.5, 1e-6));
        assert!(approx_eq(moment(&analysis, "MC1s"), 11.25, 1e-6));
        assert!(approx_eq(moment(&analysis, "MC1e"), 22.5, 1e-6));
        assert!(approx_eq(moment(&analysis, "MC2e"), -11.25, 1e-6));
    }

    #[test]
    fn test_golden_frame_reactions() {
        let analysis = analyze_frame(&golden_input()).unwrap();
        assert!(approx_eq(
            analysis.horizontal_reactions[0].value,
            8.4375,
            1e-6
        ));
        assert!(approx_eq(
            analysis.horizontal_reactions[1].value,
            -8.4375,
            1e-6
        ));
        // Columns are unloaded: the base shears balance each other.
        let h_sum: f64 = analysis.horizontal_reactions.iter().map(|r| r.value).sum();
        assert!(approx_eq(h_sum, 0.0, 1e-6));

        assert!(approx_eq(analysis.vertical_reactions[0].value, 30.0, 1e-6));
        assert!(approx_eq(analysis.vertical_reactions[1].value, 30.0, 1e-6));
    }

    #[test]
    fn test_joint_equilibrium_of_final_moments() {
        let mut input = golden_input();
        input.columns[0] = Column::new(4.0, 1.0, SupportType::Fixed)
            .with_load(LoadKind::CenterPoint, 20.0);
        let analysis = analyze_frame(&input).unwrap();
        assert!(approx_eq(
            moment(&analysis, "MC1e") + moment(&analysis, "MBCs"),
            0.0,
            1e-6
        ));
        assert!(approx_eq(
            moment(&analysis, "MBCe") + moment(&analysis, "MC2s"),
            0.0,
            1e-6
        ));
    }

    #[test]
    fn test_released_second_column_base() {
        let mut input = golden_input();
        input.columns[1].support = SupportType::Hinged;
        let analysis = analyze_frame(&input).unwrap();
        // θD becomes an unknown and the released base carries no moment.
        assert!(analysis.solution.theta_d.is_some());
        assert!(approx_eq(moment(&analysis, "MC2e"), 0.0, 1e-9));
        assert_eq!(analysis.boundary_equations.len(), 3);
        // Vertical equilibrium still holds.
        let v_sum: f64 = analysis.vertical_reactions.iter().map(|r| r.value).sum();
        assert!(approx_eq(v_sum, 60.0, 1e-6));
    }

    #[test]
    fn test_released_first_column_is_rejected() {
        let mut input = golden_input();
        input.columns[0].support = SupportType::Roller;
        assert_eq!(
            analyze_frame(&input).unwrap_err().error_code(),
            "UNSUPPORTED_CONFIGURATION"
        );
    }

    #[test]
    fn test_loaded_column_sways() {
        let mut input = golden_input();
        input.columns[0] = Column::new(4.0, 1.0, SupportType::Fixed)
            .with_load(LoadKind::CenterPoint, 20.0);
        let analysis = analyze_frame(&input).unwrap();
        // A one-sided horizontal load pushes the frame sideways.
        assert!(analysis.solution.delta.unwrap().abs() > 1e-6);
        // The base shears balance the applied horizontal load.
        let h_sum: f64 = analysis.horizontal_reactions.iter().map(|r| r.value).sum();
        assert!(approx_eq(h_sum, -20.0, 1e-6));
    }

    #[test]
    fn test_column_diagrams_follow_load() {
        let mut input = golden_input();
        input.columns[0] = Column::new(4.0, 1.0, SupportType::Fixed)
            .with_load(LoadKind::CenterPoint, 20.0);
        let analysis = analyze_frame(&input).unwrap();
        assert_eq!(analysis.column_diagrams[0].sections.len(), 2);
        assert_eq!(analysis.column_diagrams[1].sections.len(), 1);
        assert_eq!(analysis.beam_diagram.points.len(), 21);
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let mut input = golden_input();
        input.columns.truncate(1);
        assert_eq!(
            analyze_frame(&input).unwrap_err().error_code(),
            "INVALID_INPUT"
        );

        let mut input = golden_input();
        input.beam.load = LoadKind::TwoPointLoads;
        assert_eq!(
            analyze_frame(&input).unwrap_err().error_code(),
            "INVALID_INPUT"
        );

        let mut input = golden_input();
        input.columns[1] = Column::new(4.0, 1.0, SupportType::None);
        assert_eq!(
            analyze_frame(&input).unwrap_err().error_code(),
            "INVALID_INPUT"
        );

        let mut input = golden_input();
        input.columns[0] = Column::new(4.0, 1.0, SupportType::Fixed)
            .with_load(LoadKind::Udl, 5.0);
        assert_eq!(
            analyze_frame(&input).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_bundle_is_idempotent() {
        let input = golden_input();
        let first = serde_json::to_string(&analyze_frame(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&analyze_frame(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rendered_equations_carry_sway_marker() {
        let analysis = analyze_frame(&golden_input()).unwrap();
        // Column equations must display their sway term.
        assert!(analysis.equations[0].start_equation.contains("EIδ"));
        assert!(analysis.shear_equation.contains("EIδ"));
    }
}
