//! # Fixed-End Moment Formulas
//!
//! Moments developed at a member's ends when both are fully restrained
//! against rotation, for each supported load pattern.
//!
//! ## Notation
//!
//! - `L` = member length
//! - `P` = point load magnitude
//! - `w` = distributed load intensity (force per unit length)
//! - `a` = point load distance from the start, `b` = from the end
//!
//! ## Sign Convention
//!
//! The start moment is the restraint moment the member exerts at its start
//! node, negative for the standard downward-load cases; the end moment is
//! positive. Symmetric patterns give `start == -end`.
//!
//! ## References
//!
//! - "Structural Analysis" by R.C. Hibbeler, slope-deflection tables
//! - Roark's Formulas for Stress and Strain, fixed-end beam cases

/// Fixed-end moments for a uniform load w over the full span
///
/// ```text
/// FEMab = -wL²/12, FEMba = +wL²/12
/// ```
#[inline]
pub fn fem_udl(w: f64, l: f64) -> (f64, f64) {
    let m = w * l * l / 12.0;
    (-m, m)
}

/// Fixed-end moments for a point load P at midspan
///
/// ```text
/// FEMab = -PL/8, FEMba = +PL/8
/// ```
#[inline]
pub fn fem_center_point(p: f64, l: f64) -> (f64, f64) {
    let m = p * l / 8.0;
    (-m, m)
}

/// Fixed-end moments for a point load P at distance `a` from the start and
/// `b` from the end (a + b = L)
///
/// ```text
/// FEMab = -Pb²a/L², FEMba = +Pba²/L²
/// ```
#[inline]
pub fn fem_point_at_distance(p: f64, a: f64, b: f64, l: f64) -> (f64, f64) {
    let l2 = l * l;
    (-(p * b * b * a) / l2, (p * b * a * a) / l2)
}

/// Fixed-end moments for two equal point loads at L/3 and 2L/3
///
/// ```text
/// FEMab = -2PL/9, FEMba = +2PL/9
/// ```
#[inline]
pub fn fem_two_point(p: f64, l: f64) -> (f64, f64) {
    let m = 2.0 * p * l / 9.0;
    (-m, m)
}

/// Fixed-end moments for three equal point loads at L/4, L/2 and 3L/4
///
/// ```text
/// FEMab = -15PL/48, FEMba = +15PL/48
/// ```
#[inline]
pub fn fem_three_point(p: f64, l: f64) -> (f64, f64) {
    let m = 15.0 * p * l / 48.0;
    (-m, m)
}

/// Fixed-end moments for a triangular load rising from zero at the start
/// to w at the end
///
/// ```text
/// FEMab = -wL²/30, FEMba = +wL²/20
/// ```
#[inline]
pub fn fem_vdl_right(w: f64, l: f64) -> (f64, f64) {
    (-(w * l * l) / 30.0, (w * l * l) / 20.0)
}

/// Fixed-end moments for a triangular load falling from w at the start to
/// zero at the end — the mirror of [`fem_vdl_right`]
///
/// ```text
/// FEMab = -wL²/20, FEMba = +wL²/30
/// ```
#[inline]
pub fn fem_vdl_left(w: f64, l: f64) -> (f64, f64) {
    (-(w * l * l) / 20.0, (w * l * l) / 30.0)
}
