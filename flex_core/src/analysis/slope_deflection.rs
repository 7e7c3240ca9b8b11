//! Slope-deflection equation generation and system assembly
//! (pipeline stages 2 and 3)
//!
//! Stage 2 turns each member's fixed-end moments and stiffness into a pair
//! of symbolic end-moment expressions over the joint rotations (and the
//! sway δ for frame columns). Stage 3 sums those expressions into the
//! joint-equilibrium system — plus the shear condition for frames — and
//! solves it.
//!
//! Expressions are carried as [`LinearExpr`] coefficient vectors end to
//! end; the rendered strings in the result bundle are produced from the
//! same values, so display and computation cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::analysis::beam::Span;
use crate::analysis::fem::FixedEndMoments;
use crate::analysis::frame::Column;
use crate::analysis::{span_label, Solution, SupportType};
use crate::errors::{CalcError, CalcResult};
use crate::expr::{LinearExpr, Unknown};
use crate::loads::LoadKind;
use crate::solver::solve_dense;

/// Index of column 1 in the frame equation list
pub(crate) const FRAME_COLUMN_1: usize = 0;
/// Index of column 2 in the frame equation list
pub(crate) const FRAME_COLUMN_2: usize = 1;
/// Index of the beam in the frame equation list
pub(crate) const FRAME_BEAM: usize = 2;

/// The pair of symbolic end-moment expressions of one member
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEquations {
    /// Member label, e.g. `AB`, `C1`, `BC`
    pub member_label: String,
    /// Expression for the moment at the member's start
    pub start: LinearExpr,
    /// Expression for the moment at the member's end
    pub end: LinearExpr,
}

/// Rendered form of [`MemberEquations`] as carried in the result bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedEquation {
    /// Member label, e.g. `AB`, `C1`, `BC`
    pub member_label: String,
    /// Display string of the start-moment expression
    pub start_equation: String,
    /// Display string of the end-moment expression
    pub end_equation: String,
}

impl From<&MemberEquations> for RenderedEquation {
    fn from(eq: &MemberEquations) -> Self {
        Self {
            member_label: eq.member_label.clone(),
            start_equation: eq.start.render(),
            end_equation: eq.end.render(),
        }
    }
}

/// The assembled equilibrium system: each expression equals zero
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySystem {
    /// Equilibrium/release expressions, one per unknown
    pub equations: Vec<LinearExpr>,
    /// Unknowns in column order
    pub unknowns: Vec<Unknown>,
}

/// Rotation unknown belonging to the node at index `i`
fn node_unknown(i: usize) -> Option<Unknown> {
    match i {
        0 => Some(Unknown::ThetaA),
        1 => Some(Unknown::ThetaB),
        2 => Some(Unknown::ThetaC),
        3 => Some(Unknown::ThetaD),
        _ => None,
    }
}

// =============================================================================
// BEAMS
// =============================================================================

/// Generate the slope-deflection equation pair for every span.
///
/// For a span between nodes i and i+1 with stiffness factor k = I·(2/L):
///
/// ```text
/// M_start = FEM_start + 2k·θ_start + k·θ_end + settlement
/// M_end   = FEM_end   + k·θ_start + 2k·θ_end + settlement
/// ```
///
/// A fixed end has θ = 0 and contributes no rotation term. A span with a
/// free (`None`) end degenerates to a cantilever: the supported end gets
/// the constant fixing moment (wL²/2 for a UDL, -wL otherwise) and the
/// free end the zero expression. The settlement term carries the relative
/// sinking Δ of the two supports as a bare EI coefficient, -(2/L)(3Δ/L).
pub fn generate_beam_equations(
    spans: &[Span],
    fems: &[FixedEndMoments],
    sinking_supports: &[f64],
) -> Vec<MemberEquations> {
    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let label = span_label(i);
            let l = span.length;
            let w = span.load_magnitude;

            // Cantilever cases: a free end leaves no equilibrium unknowns.
            let start_free = span.start_support == SupportType::None;
            let end_free = span.end_support == SupportType::None;
            if start_free || end_free {
                let fixing_moment = if span.load == LoadKind::Udl {
                    LinearExpr::constant(w * l * l / 2.0)
                } else {
                    LinearExpr::constant(-w * l)
                };
                let (start, end) = match (start_free, end_free) {
                    (true, false) => (LinearExpr::zero(), fixing_moment),
                    (false, true) => (fixing_moment, LinearExpr::zero()),
                    _ => (LinearExpr::zero(), LinearExpr::zero()),
                };
                return MemberEquations {
                    member_label: label,
                    start,
                    end,
                };
            }

            // Span inertia enters as a relative multiplier, floored at 1.
            let stiffness = span.moment_of_inertia.max(1.0) * (2.0 / l);

            let settlement = {
                let delta = sinking_supports[i + 1] - sinking_supports[i];
                -(2.0 / l) * (3.0 * delta) / l
            };

            let mut start = LinearExpr::constant(fems[i].start);
            let mut end = LinearExpr::constant(fems[i].end);
            start.ei_constant = settlement;
            end.ei_constant = settlement;

            if !span.start_support.restrains_rotation() {
                if let Some(theta) = node_unknown(i) {
                    start.add_term(theta, 2.0 * stiffness);
                    end.add_term(theta, stiffness);
                }
            }
            if !span.end_support.restrains_rotation() {
                if let Some(theta) = node_unknown(i + 1) {
                    start.add_term(theta, stiffness);
                    end.add_term(theta, 2.0 * stiffness);
                }
            }

            MemberEquations {
                member_label: label,
                start,
                end,
            }
        })
        .collect()
}

/// Assemble the joint-equilibrium system of a continuous beam.
///
/// One equation per interior joint (the end moments meeting there sum to
/// zero), plus the release equation M = 0 at the far end when the last
/// support is hinged or a roller, which adds that node's rotation as an
/// extra unknown.
pub fn assemble_beam_boundary(
    equations: &[MemberEquations],
    spans: &[Span],
) -> CalcResult<BoundarySystem> {
    let n = spans.len();
    let mut system_equations = Vec::with_capacity(n);
    let mut unknowns = Vec::with_capacity(n);

    for joint in 1..n {
        system_equations.push(equations[joint - 1].end + equations[joint].start);
        unknowns.push(node_unknown(joint).expect("interior joint within node range"));
    }

    if spans[n - 1].end_support.is_rotational_release() {
        system_equations.push(equations[n - 1].end);
        unknowns.push(node_unknown(n).ok_or_else(|| {
            CalcError::unsupported("beam has more nodes than the rotation unknowns can label")
        })?);
    }

    check_solvable(&system_equations, &unknowns)?;

    Ok(BoundarySystem {
        equations: system_equations,
        unknowns,
    })
}

/// Reject systems that reference an unknown outside the solvable set.
///
/// The classic case is a hinged or roller support at the left exterior
/// node: the first span's equations then carry a θA term, and the
/// equilibrium system has no θA column to absorb it. Folding such a term
/// into the constants would silently corrupt every downstream moment, so
/// it is a reported error instead.
fn check_solvable(equations: &[LinearExpr], unknowns: &[Unknown]) -> CalcResult<()> {
    for equation in equations {
        for unknown in Unknown::ALL {
            if equation.coeff(unknown) != 0.0 && !unknowns.contains(&unknown) {
                return Err(CalcError::unsupported(format!(
                    "equilibrium equations carry a {} term, but the unknowns are limited to \
                     interior rotations, an end release and sway; use a fixed support there",
                    unknown.marker(),
                )));
            }
        }
    }
    Ok(())
}

/// Solve an assembled system for the unknown rotations (and sway).
///
/// `ei` scales every rotation/sway coefficient and the settlement
/// constants: beams pass round(E·I), frames pass 1 because member
/// stiffness is already baked into the coefficients.
pub fn solve_boundary(system: &BoundarySystem, ei: f64) -> CalcResult<Solution> {
    let matrix: Vec<Vec<f64>> = system
        .equations
        .iter()
        .map(|eq| system.unknowns.iter().map(|u| eq.coeff(*u) * ei).collect())
        .collect();
    let rhs: Vec<f64> = system
        .equations
        .iter()
        .map(|eq| -(eq.constant + eq.ei_constant * ei))
        .collect();

    let values = solve_dense(matrix, rhs)?;
    let value_of = |target: Unknown| {
        system
            .unknowns
            .iter()
            .position(|u| *u == target)
            .map(|i| values[i])
    };

    Ok(Solution {
        theta_b: value_of(Unknown::ThetaB).unwrap_or(0.0),
        theta_c: value_of(Unknown::ThetaC).unwrap_or(0.0),
        theta_d: value_of(Unknown::ThetaD),
        delta: value_of(Unknown::Delta),
    })
}

// =============================================================================
// FRAMES
// =============================================================================

/// Generate the slope-deflection equations of a portal frame, in the
/// order column 1 (A-B), column 2 (C-D), beam (B-C).
///
/// Member inertia is baked into the coefficients and the global EI is 1 by
/// convention. Column equations carry the sway term -(2/h)(3/h)·I·δ since
/// the beam level can translate. A fixed base drops the base rotation; a
/// hinged or roller base keeps it as an unknown (θD for column 2 — a
/// release at column 1 would need θA and is rejected at assembly).
pub fn generate_frame_equations(
    columns: &[Column],
    beam_length: f64,
    beam_inertia: f64,
    column_fems: &[FixedEndMoments],
    beam_fem: &FixedEndMoments,
) -> Vec<MemberEquations> {
    let mut equations = Vec::with_capacity(3);

    for (index, column) in columns.iter().enumerate() {
        let h = column.length;
        let stiffness = (2.0 / h) * column.moment_of_inertia;
        let sway = (2.0 / h) * (3.0 / h) * column.moment_of_inertia;
        let fixed_base = column.support.restrains_rotation();

        // Column 1 runs base A to top B; column 2 runs top C to base D.
        let (base_theta, top_theta) = if index == 0 {
            (Unknown::ThetaA, Unknown::ThetaB)
        } else {
            (Unknown::ThetaD, Unknown::ThetaC)
        };
        let (start_theta, end_theta) = if index == 0 {
            (base_theta, top_theta)
        } else {
            (top_theta, base_theta)
        };

        let mut start = LinearExpr::constant(column_fems[index].start);
        let mut end = LinearExpr::constant(column_fems[index].end);

        // M_near = FEM + (2EI/h)(2θ_near + θ_far) - sway; a fixed base
        // pins its rotation to zero.
        for (expr, near, far) in [
            (&mut start, start_theta, end_theta),
            (&mut end, end_theta, start_theta),
        ] {
            if !(fixed_base && near == base_theta) {
                expr.add_term(near, 2.0 * stiffness);
            }
            if !(fixed_base && far == base_theta) {
                expr.add_term(far, stiffness);
            }
            expr.add_term(Unknown::Delta, -sway);
        }

        equations.push(MemberEquations {
            member_label: format!("C{}", index + 1),
            start,
            end,
        });
    }

    let stiffness = (2.0 / beam_length) * beam_inertia;
    let start = LinearExpr::constant(beam_fem.start)
        .with_term(Unknown::ThetaB, 2.0 * stiffness)
        .with_term(Unknown::ThetaC, stiffness);
    let end = LinearExpr::constant(beam_fem.end)
        .with_term(Unknown::ThetaB, stiffness)
        .with_term(Unknown::ThetaC, 2.0 * stiffness);
    equations.push(MemberEquations {
        member_label: "BC".to_string(),
        start,
        end,
    });

    equations
}

/// Build the horizontal shear condition of a portal frame.
///
/// Each column contributes its base shear (M_start + M_end - P·b)/h when
/// the base is fixed (b is the point load's distance from the top), or
/// M_top/h when the base is released; the column loads themselves enter as
/// a constant. The whole expression equals zero.
pub fn frame_shear_condition(
    columns: &[Column],
    equations: &[MemberEquations],
) -> LinearExpr {
    let mut shear = LinearExpr::zero();

    for (index, column) in columns.iter().enumerate() {
        let h = column.length;
        let eq = &equations[index];

        let component = if column.support.restrains_rotation() {
            let correction = match column.load {
                LoadKind::CenterPoint => -column.load_magnitude * (h / 2.0),
                LoadKind::PointAtDistance => {
                    let a = column.point_load_distances.map(|d| d.a).unwrap_or(0.0);
                    -column.load_magnitude * (h - a)
                }
                _ => 0.0,
            };
            (eq.start + eq.end + LinearExpr::constant(correction)).scale(1.0 / h)
        } else {
            // Released base: the base moment is zero, only the top
            // equation carries into the shear.
            let top = if index == 0 { eq.end } else { eq.start };
            top.scale(1.0 / h)
        };
        shear = shear + component;
    }

    let total_column_load: f64 = columns
        .iter()
        .filter(|c| c.load != LoadKind::None)
        .map(|c| c.load_magnitude)
        .sum();
    shear + LinearExpr::constant(total_column_load)
}

/// Assemble the full frame system: joint equilibrium at B and C, the end
/// release at D when a column base is hinged/roller, and the shear
/// condition.
pub fn assemble_frame_system(
    columns: &[Column],
    equations: &[MemberEquations],
) -> CalcResult<BoundarySystem> {
    let has_release = columns.iter().any(|c| c.support.is_rotational_release());

    let mut system_equations = vec![
        equations[FRAME_COLUMN_1].end + equations[FRAME_BEAM].start,
        equations[FRAME_BEAM].end + equations[FRAME_COLUMN_2].start,
    ];
    let mut unknowns = vec![Unknown::ThetaB, Unknown::ThetaC];

    if has_release {
        system_equations.push(equations[FRAME_COLUMN_2].end);
        unknowns.push(Unknown::ThetaD);
    }

    system_equations.push(frame_shear_condition(columns, equations));
    unknowns.push(Unknown::Delta);

    check_solvable(&system_equations, &unknowns)?;

    Ok(BoundarySystem {
        equations: system_equations,
        unknowns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fem::span_fixed_end_moments;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Three equal UDL spans, fixed-hinged-hinged-fixed.
    fn golden_spans() -> Vec<Span> {
        let mut spans = vec![
            Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
            Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
            Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
        ];
        spans[0].start_support = SupportType::Fixed;
        spans[2].end_support = SupportType::Fixed;
        spans
    }

    fn golden_equations(spans: &[Span]) -> Vec<MemberEquations> {
        let fems: Vec<_> = spans.iter().map(span_fixed_end_moments).collect();
        generate_beam_equations(spans, &fems, &[0.0; 4])
    }

    #[test]
    fn test_beam_equation_coefficients() {
        let spans = golden_spans();
        let eqs = golden_equations(&spans);

        // Span AB, A fixed: M_AB = -30 + (1/3)θB, M_BA = 30 + (2/3)θB
        assert!(approx_eq(eqs[0].start.constant, -30.0));
        assert!(approx_eq(eqs[0].start.coeff(Unknown::ThetaA), 0.0));
        assert!(approx_eq(eqs[0].start.coeff(Unknown::ThetaB), 1.0 / 3.0));
        assert!(approx_eq(eqs[0].end.coeff(Unknown::ThetaB), 2.0 / 3.0));

        // Span BC: both interior rotations appear.
        assert!(approx_eq(eqs[1].start.coeff(Unknown::ThetaB), 2.0 / 3.0));
        assert!(approx_eq(eqs[1].start.coeff(Unknown::ThetaC), 1.0 / 3.0));
        assert!(approx_eq(eqs[1].end.coeff(Unknown::ThetaB), 1.0 / 3.0));
        assert!(approx_eq(eqs[1].end.coeff(Unknown::ThetaC), 2.0 / 3.0));

        // Span CD, D fixed: no θD anywhere.
        assert!(approx_eq(eqs[2].start.coeff(Unknown::ThetaD), 0.0));
        assert!(approx_eq(eqs[2].end.coeff(Unknown::ThetaD), 0.0));
    }

    #[test]
    fn test_span_inertia_scales_coefficients() {
        let mut spans = golden_spans();
        spans[1].moment_of_inertia = 2.0;
        let eqs = golden_equations(&spans);
        assert!(approx_eq(eqs[1].start.coeff(Unknown::ThetaB), 4.0 / 3.0));
    }

    #[test]
    fn test_settlement_term() {
        let spans = golden_spans();
        let fems: Vec<_> = spans.iter().map(span_fixed_end_moments).collect();
        let eqs = generate_beam_equations(&spans, &fems, &[0.0, 0.01, 0.0, 0.0]);
        // Span AB: Δ = +0.01, term = (2/6)(3·0.01/6), carried negated.
        let expected = -(2.0 / 6.0) * (3.0 * 0.01) / 6.0;
        assert!(approx_eq(eqs[0].start.ei_constant, expected));
        assert!(approx_eq(eqs[0].end.ei_constant, expected));
        // Span BC: Δ = -0.01, sign flips.
        assert!(approx_eq(eqs[1].start.ei_constant, -expected));
    }

    #[test]
    fn test_cantilever_udl_fixing_moment() {
        let mut spans = golden_spans();
        spans[2].end_support = SupportType::None;
        let eqs = golden_equations(&spans);
        // Supported end carries wL²/2 = 180; free end is zero.
        assert!(approx_eq(eqs[2].start.constant, 180.0));
        assert!(eqs[2].start.coeff(Unknown::ThetaC) == 0.0);
        assert!(eqs[2].end.is_zero());
    }

    #[test]
    fn test_cantilever_point_fixing_moment() {
        let mut spans = golden_spans();
        spans[2].load = LoadKind::CenterPoint;
        spans[2].load_magnitude = 40.0;
        spans[2].end_support = SupportType::None;
        let eqs = golden_equations(&spans);
        assert!(approx_eq(eqs[2].start.constant, -40.0 * 6.0));
    }

    #[test]
    fn test_boundary_assembly_two_unknowns() {
        let spans = golden_spans();
        let eqs = golden_equations(&spans);
        let system = assemble_beam_boundary(&eqs, &spans).unwrap();
        assert_eq!(system.unknowns, vec![Unknown::ThetaB, Unknown::ThetaC]);
        // eq_B: M_BA + M_BC = (4/3)θB + (1/3)θC, constants cancel.
        assert!(approx_eq(system.equations[0].constant, 0.0));
        assert!(approx_eq(system.equations[0].coeff(Unknown::ThetaB), 4.0 / 3.0));
        assert!(approx_eq(system.equations[0].coeff(Unknown::ThetaC), 1.0 / 3.0));
    }

    #[test]
    fn test_boundary_assembly_release_adds_theta_d() {
        let mut spans = golden_spans();
        spans[2].end_support = SupportType::Hinged;
        let eqs = golden_equations(&spans);
        let system = assemble_beam_boundary(&eqs, &spans).unwrap();
        assert_eq!(
            system.unknowns,
            vec![Unknown::ThetaB, Unknown::ThetaC, Unknown::ThetaD]
        );
        // Release equation is M_DC = 0.
        let release = &system.equations[2];
        assert!(approx_eq(release.coeff(Unknown::ThetaD), 2.0 / 3.0));
        assert!(approx_eq(release.constant, 30.0));
    }

    #[test]
    fn test_hinged_left_exterior_is_rejected() {
        let mut spans = golden_spans();
        spans[0].start_support = SupportType::Hinged;
        let eqs = golden_equations(&spans);
        let err = assemble_beam_boundary(&eqs, &spans).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_CONFIGURATION");
    }

    #[test]
    fn test_solve_symmetric_golden_beam() {
        let spans = golden_spans();
        let eqs = golden_equations(&spans);
        let system = assemble_beam_boundary(&eqs, &spans).unwrap();
        let solution = solve_boundary(&system, 1.0).unwrap();
        // Fully symmetric loading: the interior joints do not rotate.
        assert!(approx_eq(solution.theta_b, 0.0));
        assert!(approx_eq(solution.theta_c, 0.0));
        assert!(solution.theta_d.is_none());
        assert!(solution.delta.is_none());
    }

    #[test]
    fn test_solve_asymmetric_beam() {
        // Only span AB loaded: eq_B: (4/3)θB + (1/3)θC = -30,
        // eq_C: (1/3)θB + (4/3)θC = 0  =>  θB = -24, θC = 6.
        let mut spans = golden_spans();
        spans[1].load = LoadKind::None;
        spans[1].load_magnitude = 0.0;
        spans[2].load = LoadKind::None;
        spans[2].load_magnitude = 0.0;
        let eqs = golden_equations(&spans);
        let system = assemble_beam_boundary(&eqs, &spans).unwrap();
        let solution = solve_boundary(&system, 1.0).unwrap();
        assert!(approx_eq(solution.theta_b, -24.0));
        assert!(approx_eq(solution.theta_c, 6.0));
    }

    mod frames {
        use super::*;
        use crate::analysis::fem::frame_member_fixed_end_moments;
        use crate::analysis::frame::Column;
        use crate::loads::PointLoadDistances;

        fn golden_columns() -> Vec<Column> {
            vec![
                Column::new(4.0, 1.0, SupportType::Fixed),
                Column::new(4.0, 1.0, SupportType::Fixed),
            ]
        }

        fn frame_equations(columns: &[Column]) -> Vec<MemberEquations> {
            let column_fems: Vec<_> = columns
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
                LoadKind::Udl,
                10.0,
                6.0,
                None,
                None,
            );
            generate_frame_equations(columns, 6.0, 1.0, &column_fems, &beam_fem)
        }

        #[test]
        fn test_fixed_column_equations() {
            let columns = golden_columns();
            let eqs = frame_equations(&columns);

            // C1 base fixed: M_AB = 0.5θB - 0.375δ, M_BA = 1.0θB - 0.375δ
            assert!(approx_eq(eqs[0].start.coeff(Unknown::ThetaB), 0.5));
            assert!(approx_eq(eqs[0].start.coeff(Unknown::Delta), -0.375));
            assert!(approx_eq(eqs[0].end.coeff(Unknown::ThetaB), 1.0));
            assert!(approx_eq(eqs[0].start.coeff(Unknown::ThetaA), 0.0));

            // C2 base fixed: M_CD = 1.0θC - 0.375δ, M_DC = 0.5θC - 0.375δ
            assert!(approx_eq(eqs[1].start.coeff(Unknown::ThetaC), 1.0));
            assert!(approx_eq(eqs[1].end.coeff(Unknown::ThetaC), 0.5));
            assert!(approx_eq(eqs[1].end.coeff(Unknown::ThetaD), 0.0));

            // Beam: M_BC = -30 + (2/3)θB + (1/3)θC
            assert!(approx_eq(eqs[2].start.constant, -30.0));
            assert!(approx_eq(eqs[2].start.coeff(Unknown::ThetaB), 2.0 / 3.0));
            assert!(approx_eq(eqs[2].end.coeff(Unknown::ThetaC), 2.0 / 3.0));
        }

        #[test]
        fn test_released_base_keeps_base_rotation() {
            let mut columns = golden_columns();
            columns[1].support = SupportType::Hinged;
            let eqs = frame_equations(&columns);
            assert!(approx_eq(eqs[1].start.coeff(Unknown::ThetaD), 0.5));
            assert!(approx_eq(eqs[1].end.coeff(Unknown::ThetaD), 1.0));
        }

        #[test]
        fn test_shear_condition_symmetric_frame() {
            let columns = golden_columns();
            let eqs = frame_equations(&columns);
            let shear = frame_shear_condition(&columns, &eqs);
            // ((0.5 + 1.0)θB - 0.75δ)/4 + ((1.0 + 0.5)θC - 0.75δ)/4
            assert!(approx_eq(shear.coeff(Unknown::ThetaB), 0.375));
            assert!(approx_eq(shear.coeff(Unknown::ThetaC), 0.375));
            assert!(approx_eq(shear.coeff(Unknown::Delta), -0.375));
            assert!(approx_eq(shear.constant, 0.0));
        }

        #[test]
        fn test_shear_condition_with_column_load() {
            let mut columns = golden_columns();
            columns[0].load = LoadKind::CenterPoint;
            columns[0].load_magnitude = 20.0;
            let eqs = frame_equations(&columns);
            let shear = frame_shear_condition(&columns, &eqs);
            // Correction -P·h/2 folded into column 1's component, plus the
            // total applied load: -20·2/4 + FEM terms/4 + 20.
            let fem = frame_member_fixed_end_moments(
                LoadKind::CenterPoint,
                20.0,
                4.0,
                Some(SupportType::Fixed),
                None,
            );
            let expected = (fem.start + fem.end - 20.0 * 2.0) / 4.0 + 20.0;
            assert!(approx_eq(shear.constant, expected));
        }

        #[test]
        fn test_point_at_distance_correction_matches_center_at_midheight() {
            let mut center = golden_columns();
            center[0].load = LoadKind::CenterPoint;
            center[0].load_magnitude = 20.0;

            let mut at_distance = golden_columns();
            at_distance[0].load = LoadKind::PointAtDistance;
            at_distance[0].load_magnitude = 20.0;
            at_distance[0].point_load_distances = Some(PointLoadDistances::new(2.0, 2.0));

            let shear_center = frame_shear_condition(&center, &frame_equations(&center));
            let shear_dist =
                frame_shear_condition(&at_distance, &frame_equations(&at_distance));
            assert!(approx_eq(shear_center.constant, shear_dist.constant));
        }

        #[test]
        fn test_assemble_fixed_frame_unknowns() {
            let columns = golden_columns();
            let eqs = frame_equations(&columns);
            let system = assemble_frame_system(&columns, &eqs).unwrap();
            assert_eq!(
                system.unknowns,
                vec![Unknown::ThetaB, Unknown::ThetaC, Unknown::Delta]
            );
            assert_eq!(system.equations.len(), 3);
        }

        #[test]
        fn test_assemble_released_second_column() {
            let mut columns = golden_columns();
            columns[1].support = SupportType::Roller;
            let eqs = frame_equations(&columns);
            let system = assemble_frame_system(&columns, &eqs).unwrap();
            assert_eq!(
                system.unknowns,
                vec![
                    Unknown::ThetaB,
                    Unknown::ThetaC,
                    Unknown::ThetaD,
                    Unknown::Delta
                ]
            );
        }

        #[test]
        fn test_released_first_column_is_rejected() {
            let mut columns = golden_columns();
            columns[0].support = SupportType::Hinged;
            let eqs = frame_equations(&columns);
            let err = assemble_frame_system(&columns, &eqs).unwrap_err();
            assert_eq!(err.error_code(), "UNSUPPORTED_CONFIGURATION");
        }

        #[test]
        fn test_solve_golden_frame() {
            let columns = golden_columns();
            let eqs = frame_equations(&columns);
            let system = assemble_frame_system(&columns, &eqs).unwrap();
            let solution = solve_boundary(&system, 1.0).unwrap();
            // Symmetric frame: antisymmetric rotations, no sway.
            assert!(approx_eq(solution.theta_b, 22.5));
            assert!(approx_eq(solution.theta_c, -22.5));
            assert!(approx_eq(solution.delta.unwrap(), 0.0));
            assert!(solution.theta_d.is_none());
        }
    }
}
