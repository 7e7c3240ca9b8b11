//! Bending-moment and shear-force distributions (pipeline stage 6)
//!
//! Walks positions along each member accumulating
//!
//! ```text
//! M(x) = M_start + R_start·x - (load contribution up to x)
//! V(x) = R_start - (load contribution up to x)
//! ```
//!
//! with the closed-form load integral of the member's load kind. Beam
//! spans are sampled densely; frame members at their exact breakpoints,
//! with both sides of a point-load shear jump emitted. Critical points —
//! load positions and the interior zero-shear moment maximum — are
//! evaluated exactly at their abscissa rather than snapped to the nearest
//! sample.

use serde::{Deserialize, Serialize};

use crate::analysis::beam::Span;
use crate::analysis::frame::{Column, FrameBeam};
use crate::analysis::{
    span_label, CriticalPoint, DiagramPoint, MemberDiagram, SpanCriticalPoints,
};
use crate::loads::LoadKind;

/// Sample count for beam spans
pub const BEAM_SAMPLE_POINTS: usize = 100;

/// Sample intervals for a uniformly loaded frame beam
const FRAME_BEAM_UDL_INTERVALS: usize = 20;

/// A contiguous piece of a column's distribution, split at load points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSection {
    /// Section description, e.g. `Before Load`
    pub section_label: String,
    /// Samples within the section
    pub points: Vec<DiagramPoint>,
}

/// Bending-moment/shear-force distribution of one frame column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDiagram {
    /// Column label, `C1` or `C2`
    pub member_label: String,
    /// Sections from the base upward
    pub sections: Vec<DiagramSection>,
}

/// Load contribution subtracted from moment and shear at position `x`:
/// `(ΔM, ΔV)`.
fn load_contribution(kind: LoadKind, p: f64, l: f64, a: f64, x: f64) -> (f64, f64) {
    let mut dm = 0.0;
    let mut dv = 0.0;
    match kind {
        LoadKind::None => {}
        LoadKind::Udl => {
            dm = p * x * x / 2.0;
            dv = p * x;
        }
        LoadKind::VdlRight => {
            // Intensity grows at w = P/L per unit length.
            let w = p / l;
            dm = w * x * x * x / 6.0;
            dv = w * x * x / 2.0;
        }
        LoadKind::VdlLeft => {
            // Intensity P at the start, falling at w = -P/L.
            let w = -p / l;
            dm = w * x * x * x / 6.0 + p * x * x / 2.0;
            dv = w * x * x / 2.0 + p * x;
        }
        _ => {
            for position in kind.point_load_positions(l, a) {
                if x > position {
                    dm += p * (x - position);
                    dv += p;
                }
            }
        }
    }
    (dm, dv)
}

/// Moment and shear of a span at exact position `x`, as `(M, V)`
pub fn bmsf_at(span: &Span, start_moment: f64, start_reaction: f64, x: f64) -> (f64, f64) {
    let a = span.point_load_distances.map(|d| d.a).unwrap_or(0.0);
    let (dm, dv) = load_contribution(span.load, span.load_magnitude, span.length, a, x);
    (start_moment + start_reaction * x - dm, start_reaction - dv)
}

/// Densely sampled distribution of one span
pub fn span_diagram(
    span: &Span,
    label: String,
    start_moment: f64,
    start_reaction: f64,
) -> MemberDiagram {
    let dx = span.length / (BEAM_SAMPLE_POINTS - 1) as f64;
    let points = (0..BEAM_SAMPLE_POINTS)
        .map(|i| {
            let x = i as f64 * dx;
            let (bending_moment, shear_force) = bmsf_at(span, start_moment, start_reaction, x);
            DiagramPoint {
                x,
                bending_moment,
                shear_force,
            }
        })
        .collect();
    MemberDiagram {
        member_label: label,
        points,
    }
}

/// Distributions for every span of a continuous beam
pub fn beam_diagrams(
    spans: &[Span],
    span_moments: &[(f64, f64)],
    span_reactions: &[(f64, f64)],
) -> Vec<MemberDiagram> {
    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            span_diagram(span, span_label(i), span_moments[i].0, span_reactions[i].0)
        })
        .collect()
}

/// Interior maximum-moment point of a span, when the shear crosses zero
/// within it, as `(position, moment)`.
///
/// For a UDL the shear is linear and vanishes at x* = R_start/w (the
/// quadratic vertex of the moment). For two point loads the shear is
/// piecewise constant and the maximum sits under the last load with
/// positive shear ahead of it.
pub fn max_bending_moment(
    span: &Span,
    start_moment: f64,
    start_reaction: f64,
) -> Option<(f64, f64)> {
    let l = span.length;
    let p = span.load_magnitude;
    match span.load {
        LoadKind::Udl => {
            let x = start_reaction / p;
            if x > 0.0 && x < l {
                let moment = start_moment + start_reaction * x - p * x * x / 2.0;
                Some((x, moment))
            } else {
                None
            }
        }
        LoadKind::TwoPointLoads => {
            let x1 = l / 3.0;
            let x2 = 2.0 * l / 3.0;
            if start_reaction > 0.0 {
                Some((x1, start_moment + start_reaction * x1))
            } else if start_reaction - p > 0.0 {
                Some((x2, start_moment + start_reaction * x2 - p * (x2 - x1)))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Critical points of every span: ends, load positions, and the interior
/// moment maximum. Positions are measured from the start of the whole
/// beam.
pub fn beam_critical_points(
    spans: &[Span],
    span_moments: &[(f64, f64)],
    span_reactions: &[(f64, f64)],
) -> Vec<SpanCriticalPoints> {
    let mut offset = 0.0;

    spans
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let label = span_label(i);
            let start_moment = span_moments[i].0;
            let start_reaction = span_reactions[i].0;
            let mut critical_points = Vec::new();

            let mut push = |location: String, local_x: f64, offset: f64| {
                let (bending_moment, shear_force) =
                    bmsf_at(span, start_moment, start_reaction, local_x);
                critical_points.push(CriticalPoint {
                    location,
                    position: offset + local_x,
                    bending_moment,
                    shear_force,
                });
            };

            push(format!("Start of span {}", label), 0.0, offset);

            let a = span.point_load_distances.map(|d| d.a).unwrap_or(0.0);
            match span.load {
                LoadKind::CenterPoint => {
                    push(
                        format!("Center point load in span {}", label),
                        span.length / 2.0,
                        offset,
                    );
                }
                LoadKind::PointAtDistance if a > 0.0 => {
                    push(
                        format!("Point load at distance {}m in span {}", a, label),
                        a,
                        offset,
                    );
                }
                LoadKind::TwoPointLoads | LoadKind::ThreePointLoads => {
                    let names = ["First", "Second", "Third"];
                    for (j, position) in span
                        .load
                        .point_load_positions(span.length, a)
                        .into_iter()
                        .enumerate()
                    {
                        push(
                            format!("{} point load in span {}", names[j], label),
                            position,
                            offset,
                        );
                    }
                }
                _ => {}
            }

            push(format!("End of span {}", label), span.length, offset);

            if let Some((position, moment)) = max_bending_moment(span, start_moment, start_reaction)
            {
                critical_points.push(CriticalPoint {
                    location: format!("Maximum bending moment in span {}", label),
                    position: offset + position,
                    bending_moment: moment,
                    shear_force: 0.0,
                });
            }

            offset += span.length;
            SpanCriticalPoints {
                span_label: label,
                critical_points,
            }
        })
        .collect()
}

// =============================================================================
// FRAME MEMBERS
// =============================================================================

/// Distribution of a frame column, walked from the member's start node
/// (the base for column 1, joint C for column 2).
///
/// The shear everywhere equals the horizontal reaction (negated), stepping
/// by the load magnitude past the load point; the moment is the start
/// moment plus the shear couple.
pub fn column_diagram(
    column: &Column,
    index: usize,
    start_moment: f64,
    horizontal_reaction: f64,
) -> ColumnDiagram {
    let h = column.length;
    let p = column.load_magnitude;
    let before = |x: f64| DiagramPoint {
        x,
        bending_moment: start_moment - horizontal_reaction * x,
        shear_force: -horizontal_reaction,
    };

    let sections = match column.load {
        LoadKind::CenterPoint | LoadKind::PointAtDistance => {
            let a = if column.load == LoadKind::CenterPoint {
                h / 2.0
            } else {
                column.point_load_distances.map(|d| d.a).unwrap_or(0.0)
            };
            let after = |x: f64| DiagramPoint {
                x,
                bending_moment: start_moment - horizontal_reaction * x - p * (x - a),
                shear_force: -horizontal_reaction - p,
            };
            vec![
                DiagramSection {
                    section_label: "Before Load".to_string(),
                    points: vec![before(0.0), before(a)],
                },
                DiagramSection {
                    section_label: "After Load".to_string(),
                    points: vec![after(a), after(h)],
                },
            ]
        }
        _ => vec![DiagramSection {
            section_label: "Full Column".to_string(),
            points: vec![before(0.0), before(h)],
        }],
    };

    ColumnDiagram {
        member_label: format!("C{}", index + 1),
        sections,
    }
}

/// Distribution of the frame beam, measured from joint B.
///
/// A UDL is sampled densely; point loads produce the exact breakpoints
/// with both sides of the shear jump.
pub fn frame_beam_diagram(
    beam: &FrameBeam,
    start_moment: f64,
    start_reaction: f64,
) -> MemberDiagram {
    let l = beam.length;
    let p = beam.load_magnitude;
    let points = match beam.load {
        LoadKind::Udl => (0..=FRAME_BEAM_UDL_INTERVALS)
            .map(|i| {
                let x = i as f64 / FRAME_BEAM_UDL_INTERVALS as f64 * l;
                DiagramPoint {
                    x,
                    bending_moment: start_reaction * x + start_moment - p * x * x / 2.0,
                    shear_force: start_reaction - p * x,
                }
            })
            .collect(),
        LoadKind::CenterPoint | LoadKind::PointAtDistance => {
            let a = if beam.load == LoadKind::CenterPoint {
                l / 2.0
            } else {
                beam.point_load_distances.map(|d| d.a).unwrap_or(0.0)
            };
            let moment_at = |x: f64| {
                let step = if x > a { p * (x - a) } else { 0.0 };
                start_reaction * x + start_moment - step
            };
            let moment_at_load = start_reaction * a + start_moment;
            vec![
                DiagramPoint {
                    x: 0.0,
                    bending_moment: moment_at(0.0),
                    shear_force: start_reaction,
                },
                DiagramPoint {
                    x: a,
                    bending_moment: moment_at_load,
                    shear_force: start_reaction,
                },
                DiagramPoint {
                    x: a,
                    bending_moment: moment_at_load,
                    shear_force: start_reaction - p,
                },
                DiagramPoint {
                    x: l,
                    bending_moment: moment_at(l),
                    shear_force: start_reaction - p,
                },
            ]
        }
        _ => {
            let moment_at = |x: f64| start_reaction * x + start_moment;
            vec![
                DiagramPoint {
                    x: 0.0,
                    bending_moment: moment_at(0.0),
                    shear_force: start_reaction,
                },
                DiagramPoint {
                    x: l,
                    bending_moment: moment_at(l),
                    shear_force: start_reaction,
                },
            ]
        }
    };

    MemberDiagram {
        member_label: "BC".to_string(),
        points,
    }
}
