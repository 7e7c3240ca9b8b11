//! # flex_core - Slope-Deflection Analysis Engine
//!
//! `flex_core` is the computational heart of Flexura: classical
//! slope-deflection analysis of continuous beams and two-column portal
//! frames. Given member geometry, stiffness, support conditions and
//! loading it computes fixed-end moments, solves the joint-equilibrium
//! (and sway) equations, and derives final end moments, support reactions
//! and full bending-moment/shear-force distributions.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results;
//!   two runs on the same input are bit-identical
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings —
//!   degenerate input fails at the boundary instead of flowing through
//!   the pipeline as silent zeros
//! - **Explicit Coefficients**: Symbolic equations are coefficient
//!   vectors with a display rendering, not parsed strings
//!
//! ## Quick Start
//!
//! ```rust
//! use flex_core::analysis::beam::{analyze_beam, BeamInput, Span};
//! use flex_core::analysis::SupportType;
//! use flex_core::loads::LoadKind;
//!
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
//!     sinking_supports: Vec::new(),
//! };
//!
//! let analysis = analyze_beam(&input).unwrap();
//! let json = serde_json::to_string_pretty(&analysis).unwrap();
//! assert!(json.contains("MAB"));
//! ```
//!
//! ## Modules
//!
//! - [`analysis`] - The beam and frame pipelines and their input/result
//!   types
//! - [`equations`] - Closed-form fixed-end-moment formulas
//! - [`expr`] - Symbolic linear expressions over the unknowns
//! - [`solver`] - The simultaneous-equation solver
//! - [`loads`] - Load kinds and their geometry
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod equations;
pub mod errors;
pub mod expr;
pub mod loads;
pub mod solver;

// Re-export commonly used types at crate root for convenience
pub use analysis::{
    analyze_beam, analyze_frame, BeamAnalysis, BeamInput, Column, FrameAnalysis, FrameBeam,
    FrameInput, Solution, Span, SupportType,
};
pub use errors::{CalcError, CalcResult};
pub use expr::{LinearExpr, Unknown};
pub use loads::{LoadKind, PointLoadDistances};
