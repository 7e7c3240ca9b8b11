//! Fixed-end moment calculation (pipeline stage 1)
//!
//! Pure functions of member geometry and load. The calculators are total:
//! degenerate cases (no load, a free end, a rotational release at a column
//! base, missing point-load distances) produce `{0, 0}` rather than
//! failing, so they can be evaluated against draft input. The analysis
//! entry points reject those degenerate cases up front via `validate()`.

use serde::{Deserialize, Serialize};

use crate::analysis::beam::Span;
use crate::analysis::SupportType;
use crate::equations::fem::{
    fem_center_point, fem_point_at_distance, fem_three_point, fem_two_point, fem_udl,
    fem_vdl_left, fem_vdl_right,
};
use crate::loads::{LoadKind, PointLoadDistances};

/// Fixed-end moment pair for one member
///
/// `start` is the restraint moment at the member's start node (negative
/// for the standard cases), `end` at its end node (positive).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedEndMoments {
    /// Moment at the start node
    pub start: f64,
    /// Moment at the end node
    pub end: f64,
}

impl FixedEndMoments {
    /// The zero pair for degenerate cases
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A fixed-end moment pair labelled with its member, as carried in the
/// result bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberFem {
    /// Member label, e.g. `AB` or `C1`
    pub member_label: String,
    /// Moment at the start node
    pub start: f64,
    /// Moment at the end node
    pub end: f64,
}

/// Fixed-end moments of a beam span.
///
/// A span with a free (`None`) end cannot develop fixed-end restraint and
/// yields `{0, 0}`, as does a span without load or a `PointAtDistance`
/// load missing its distances.
pub fn span_fixed_end_moments(span: &Span) -> FixedEndMoments {
    if span.start_support == SupportType::None || span.end_support == SupportType::None {
        return FixedEndMoments::zero();
    }
    load_fixed_end_moments(
        span.load,
        span.load_magnitude,
        span.length,
        span.point_load_distances,
    )
}

/// Fixed-end moments of a frame member.
///
/// `base_support` is the column base support, `None` for the frame beam.
/// A hinged or roller base provides no rotational restraint to generate a
/// fixed-end moment against, so those columns yield `{0, 0}`.
pub fn frame_member_fixed_end_moments(
    kind: LoadKind,
    magnitude: f64,
    length: f64,
    base_support: Option<SupportType>,
    distances: Option<PointLoadDistances>,
) -> FixedEndMoments {
    if matches!(base_support, Some(s) if s.is_rotational_release()) {
        return FixedEndMoments::zero();
    }
    // Frame point-at-distance input carries only `a`; derive b = L - a.
    let distances = match kind {
        LoadKind::PointAtDistance => {
            distances.map(|d| PointLoadDistances::new(d.a, length - d.a))
        }
        _ => distances,
    };
    load_fixed_end_moments(kind, magnitude, length, distances)
}

fn load_fixed_end_moments(
    kind: LoadKind,
    p: f64,
    l: f64,
    distances: Option<PointLoadDistances>,
) -> FixedEndMoments {
    let (start, end) = match kind {
        LoadKind::None => (0.0, 0.0),
        LoadKind::Udl => fem_udl(p, l),
        LoadKind::CenterPoint => fem_center_point(p, l),
        LoadKind::PointAtDistance => match distances {
            Some(d) if d.a != 0.0 && d.b != 0.0 => fem_point_at_distance(p, d.a, d.b, l),
            _ => {
                log::debug!("point load distances missing, fixed-end moments default to zero");
                (0.0, 0.0)
            }
        },
        LoadKind::TwoPointLoads => fem_two_point(p, l),
        LoadKind::ThreePointLoads => fem_three_point(p, l),
        LoadKind::VdlRight => fem_vdl_right(p, l),
        LoadKind::VdlLeft => fem_vdl_left(p, l),
    };
    FixedEndMoments { start, end }
}
