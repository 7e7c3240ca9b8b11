//! Closed-form structural formulas
//!
//! Reference formulas used by the analysis pipeline. Kept as plain
//! functions of plain numbers so they are trivial to verify against the
//! textbook tables they come from.

pub mod fem;

pub use fem::{
    fem_center_point, fem_point_at_distance, fem_three_point, fem_two_point, fem_udl,
    fem_vdl_left, fem_vdl_right,
};
