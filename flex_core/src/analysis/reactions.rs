//! Support reactions (pipeline stage 5)
//!
//! Per member, the far reaction comes from taking moments about the near
//! support, the near reaction from force equilibrium. Interior beam
//! supports accumulate the end-reaction of the span to their left and the
//! start-reaction of the span to their right.

use crate::analysis::beam::Span;
use crate::analysis::frame::{Column, FrameBeam};
use crate::analysis::{node_letter, Reaction};
use crate::loads::LoadKind;

/// Reactions of one span as (start, end).
///
/// Taking moments about the start support (hogging end moments carry their
/// sign): `R_end = (M_end + load moment about start + M_start) / L`, then
/// vertical equilibrium gives `R_start = total load - R_end`. A span
/// without load contributes nothing.
pub fn span_reactions(span: &Span, start_moment: f64, end_moment: f64) -> (f64, f64) {
    if span.load == LoadKind::None {
        return (0.0, 0.0);
    }
    let l = span.length;
    let p = span.load_magnitude;
    let a = span.point_load_distances.map(|d| d.a).unwrap_or(0.0);
    if span.load == LoadKind::PointAtDistance && a == 0.0 {
        return (0.0, 0.0);
    }

    let load_moment = span.load.load_moment_about_start(p, l, a);
    let end_reaction = (end_moment + load_moment + start_moment) / l;
    let start_reaction = span.load.total_load(p, l) - end_reaction;
    (start_reaction, end_reaction)
}

/// Accumulated support reactions of a continuous beam: `RA`, `RB`, ...
///
/// `span_moments` are the final (start, end) moments in span order.
pub fn beam_reactions(spans: &[Span], span_moments: &[(f64, f64)]) -> Vec<Reaction> {
    let mut totals = vec![0.0; spans.len() + 1];
    for (i, (span, (start_moment, end_moment))) in spans.iter().zip(span_moments).enumerate() {
        let (start_reaction, end_reaction) = span_reactions(span, *start_moment, *end_moment);
        totals[i] += start_reaction;
        totals[i + 1] += end_reaction;
    }
    totals
        .into_iter()
        .enumerate()
        .map(|(i, value)| Reaction {
            label: format!("R{}", node_letter(i)),
            value,
        })
        .collect()
}

/// Horizontal base reactions of the frame columns: `H1`, `H2`.
///
/// `H = (M_start + M_end - P·b) / h` where b is the point load's distance
/// from the column top; loadless columns reduce to `(M_start + M_end)/h`.
pub fn frame_horizontal_reactions(
    columns: &[Column],
    column_moments: &[(f64, f64)],
) -> Vec<Reaction> {
    columns
        .iter()
        .zip(column_moments)
        .enumerate()
        .map(|(index, (column, (start_moment, end_moment)))| {
            let h = column.length;
            let load_term = match column.load {
                LoadKind::CenterPoint => column.load_magnitude * (h / 2.0),
                LoadKind::PointAtDistance => {
                    let a = column.point_load_distances.map(|d| d.a).unwrap_or(0.0);
                    column.load_magnitude * (h - a)
                }
                _ => 0.0,
            };
            Reaction {
                label: format!("H{}", index + 1),
                value: (start_moment + end_moment - load_term) / h,
            }
        })
        .collect()
}

/// Vertical reactions at the column bases from the frame beam: `RA`, `RD`.
pub fn frame_vertical_reactions(beam: &FrameBeam, beam_moments: (f64, f64)) -> Vec<Reaction> {
    let (start_moment, end_moment) = beam_moments;
    let l = beam.length;
    let p = beam.load_magnitude;
    let a = beam.point_load_distances.map(|d| d.a).unwrap_or(0.0);

    let (start_reaction, end_reaction) = match beam.load {
        LoadKind::None => {
            // Only the end moments produce a reaction couple.
            let end = (end_moment + start_moment) / l;
            (-end, end)
        }
        kind => {
            let end = (end_moment + kind.load_moment_about_start(p, l, a) + start_moment) / l;
            (kind.total_load(p, l) - end, end)
        }
    };

    vec![
        Reaction {
            label: "RA".to_string(),
            value: start_reaction,
        },
        Reaction {
            label: "RD".to_string(),
            value: end_reaction,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SupportType;
    use crate::loads::PointLoadDistances;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_udl_span_symmetric_moments() {
        // w = 10, L = 6, end moments -30/+30: R_end = (30 + 180 - 30)/6 = 30
        let span = Span::new(6.0, 1.0, LoadKind::Udl, 10.0);
        let (start, end) = span_reactions(&span, -30.0, 30.0);
        assert!(approx_eq(end, 30.0));
        assert!(approx_eq(start, 30.0));
    }

    #[test]
    fn test_udl_span_asymmetric_moments() {
        // M_AB = -38, M_BA = 14: R_end = (14 + 180 - 38)/6 = 26
        let span = Span::new(6.0, 1.0, LoadKind::Udl, 10.0);
        let (start, end) = span_reactions(&span, -38.0, 14.0);
        assert!(approx_eq(end, 26.0));
        assert!(approx_eq(start, 34.0));
    }

    #[test]
    fn test_point_at_distance_span() {
        let span = Span::new(6.0, 1.0, LoadKind::PointAtDistance, 120.0)
            .with_point_load_distances(PointLoadDistances::new(2.0, 4.0));
        let (start, end) = span_reactions(&span, 0.0, 0.0);
        // Simply supported: R_end = P·a/L = 40, R_start = 80.
        assert!(approx_eq(end, 40.0));
        assert!(approx_eq(start, 80.0));
    }

    #[test]
    fn test_equilibrium_across_load_kinds() {
        let spans = [
            Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
            Span::new(6.0, 1.0, LoadKind::CenterPoint, 50.0),
            Span::new(6.0, 1.0, LoadKind::TwoPointLoads, 25.0),
            Span::new(6.0, 1.0, LoadKind::ThreePointLoads, 20.0),
            Span::new(6.0, 1.0, LoadKind::VdlRight, 12.0),
            Span::new(6.0, 1.0, LoadKind::VdlLeft, 12.0),
            Span::new(6.0, 1.0, LoadKind::PointAtDistance, 80.0)
                .with_point_load_distances(PointLoadDistances::new(1.5, 4.5)),
        ];
        for span in &spans {
            let (start, end) = span_reactions(span, -12.0, 17.0);
            let total = span.load.total_load(span.load_magnitude, span.length);
            assert!(
                approx_eq(start + end, total),
                "equilibrium violated for {:?}",
                span.load
            );
        }
    }

    #[test]
    fn test_interior_support_accumulates() {
        let spans = vec![
            Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
            Span::new(6.0, 1.0, LoadKind::Udl, 10.0),
        ];
        let moments = vec![(-30.0, 30.0), (-30.0, 30.0)];
        let reactions = beam_reactions(&spans, &moments);
        assert_eq!(reactions.len(), 3);
        assert_eq!(reactions[1].label, "RB");
        // 30 from the left span's end + 30 from the right span's start.
        assert!(approx_eq(reactions[1].value, 60.0));
        let total: f64 = reactions.iter().map(|r| r.value).sum();
        assert!((total - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_horizontal_reactions() {
        let columns = vec![
            Column::new(4.0, 1.0, SupportType::Fixed),
            Column::new(4.0, 1.0, SupportType::Fixed),
        ];
        let moments = vec![(11.25, 22.5), (-22.5, -11.25)];
        let reactions = frame_horizontal_reactions(&columns, &moments);
        assert_eq!(reactions[0].label, "H1");
        assert!(approx_eq(reactions[0].value, 8.4375));
        assert!(approx_eq(reactions[1].value, -8.4375));
    }

    #[test]
    fn test_frame_vertical_reactions_udl() {
        let beam = FrameBeam::new(6.0, 1.0, LoadKind::Udl, 10.0);
        let reactions = frame_vertical_reactions(&beam, (-22.5, 22.5));
        assert_eq!(reactions[0].label, "RA");
        assert!(approx_eq(reactions[0].value, 30.0));
        assert!(approx_eq(reactions[1].value, 30.0));
    }

    #[test]
    fn test_frame_vertical_reactions_no_load() {
        let beam = FrameBeam::new(6.0, 1.0, LoadKind::None, 0.0);
        let reactions = frame_vertical_reactions(&beam, (12.0, 6.0));
        // Pure moment couple: equal and opposite.
        assert!(approx_eq(reactions[0].value, -3.0));
        assert!(approx_eq(reactions[1].value, 3.0));
    }
}
