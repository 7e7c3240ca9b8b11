//! Final member-end moments (pipeline stage 4)
//!
//! Back-substitutes the solved rotations (and sway) into the symbolic
//! end-moment expressions. The expressions are evaluated directly from
//! their coefficient vectors — nothing is re-parsed.

use crate::analysis::frame::Column;
use crate::analysis::slope_deflection::MemberEquations;
use crate::analysis::{EndMoment, Solution};

/// Numeric end moments per span, in span order, as (start, end) pairs.
///
/// `ei` is round(E·I); it scales the rotation terms and the settlement
/// constants exactly as in the solve.
pub fn beam_span_moments(
    equations: &[MemberEquations],
    solution: &Solution,
    ei: f64,
) -> Vec<(f64, f64)> {
    equations
        .iter()
        .map(|eq| {
            (
                eq.start.evaluate(|u| solution.value_of(u), ei),
                eq.end.evaluate(|u| solution.value_of(u), ei),
            )
        })
        .collect()
}

/// Labelled beam moments for the result bundle: `MAB`, `MBA`, `MBC`, ...
pub fn beam_end_moments(
    equations: &[MemberEquations],
    span_moments: &[(f64, f64)],
) -> Vec<EndMoment> {
    let mut moments = Vec::with_capacity(span_moments.len() * 2);
    for (eq, (start, end)) in equations.iter().zip(span_moments) {
        let mut chars = eq.member_label.chars();
        let (a, b) = (chars.next().unwrap_or('?'), chars.next().unwrap_or('?'));
        moments.push(EndMoment {
            label: format!("M{}{}", a, b),
            value: *start,
        });
        moments.push(EndMoment {
            label: format!("M{}{}", b, a),
            value: *end,
        });
    }
    moments
}

/// Numeric end moments per frame member, in equation order
/// (C1, C2, BC), as (start, end) pairs.
///
/// Member stiffness is baked into the coefficients, so the global EI is 1.
/// For a column whose base is not fixed the base end cannot sustain
/// moment: that end is forced to exactly zero regardless of the symbolic
/// equation.
pub fn frame_member_moments(
    equations: &[MemberEquations],
    columns: &[Column],
    solution: &Solution,
) -> Vec<(f64, f64)> {
    equations
        .iter()
        .map(|eq| {
            let start = eq.start.evaluate(|u| solution.value_of(u), 1.0);
            let mut end = eq.end.evaluate(|u| solution.value_of(u), 1.0);

            if let Some(index) = eq
                .member_label
                .strip_prefix('C')
                .and_then(|n| n.parse::<usize>().ok())
            {
                if let Some(column) = columns.get(index - 1) {
                    if !column.support.restrains_rotation() {
                        end = 0.0;
                    }
                }
            }
            (start, end)
        })
        .collect()
}

/// Labelled frame moments for the result bundle: `MC1s`, `MC1e`, `MBCs`, ...
pub fn frame_end_moments(
    equations: &[MemberEquations],
    member_moments: &[(f64, f64)],
) -> Vec<EndMoment> {
    let mut moments = Vec::with_capacity(member_moments.len() * 2);
    for (eq, (start, end)) in equations.iter().zip(member_moments) {
        moments.push(EndMoment {
            label: format!("M{}s", eq.member_label),
            value: *start,
        });
        moments.push(EndMoment {
            label: format!("M{}e", eq.member_label),
            value: *end,
        });
    }
    moments
}
