//! Symbolic slope-deflection expressions
//!
//! A member-end moment is a flat linear expression over the unknown joint
//! rotations (θA…θD), the sway displacement (δ) and a bare EI settlement
//! term:
//!
//! ```text
//! M = constant + Σ cᵢ·EIθᵢ + c_δ·EIδ + c_s·EI
//! ```
//!
//! [`LinearExpr`] carries the coefficients explicitly through the pipeline
//! — downstream stages read numbers, never re-parse text. The rendered
//! string form exists for display and transport, and [`LinearExpr::parse`]
//! accepts exactly what [`LinearExpr::render`] emits: a flat signed sum
//! with the literal markers `EIθA` … `EIθD`, `EIδ` and `EI`, no
//! parentheses, no operator precedence. The two are inverses: for any
//! expression `e`, `parse(&e.render())` recovers `e` exactly.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// An unknown of the equilibrium system
///
/// Rotations are named by the node letter they belong to; `Delta` is the
/// horizontal sway of a frame's beam level. θA is representable so member
/// equations can be generated faithfully for any support configuration,
/// but the solvable set is {θB, θC, θD, δ} — assembly rejects systems
/// that would need θA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unknown {
    /// Rotation at node A
    ThetaA,
    /// Rotation at node B
    ThetaB,
    /// Rotation at node C
    ThetaC,
    /// Rotation at node D
    ThetaD,
    /// Horizontal sway displacement
    Delta,
}

impl Unknown {
    /// All unknowns in rendering order
    pub const ALL: [Unknown; 5] = [
        Unknown::ThetaA,
        Unknown::ThetaB,
        Unknown::ThetaC,
        Unknown::ThetaD,
        Unknown::Delta,
    ];

    /// The literal marker this unknown renders as
    pub fn marker(&self) -> &'static str {
        match self {
            Unknown::ThetaA => "EIθA",
            Unknown::ThetaB => "EIθB",
            Unknown::ThetaC => "EIθC",
            Unknown::ThetaD => "EIθD",
            Unknown::Delta => "EIδ",
        }
    }

    fn index(&self) -> usize {
        match self {
            Unknown::ThetaA => 0,
            Unknown::ThetaB => 1,
            Unknown::ThetaC => 2,
            Unknown::ThetaD => 3,
            Unknown::Delta => 4,
        }
    }
}

/// A flat linear expression over the analysis unknowns
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearExpr {
    /// Constant term (the fixed-end moment contribution)
    pub constant: f64,
    /// Coefficient of the bare EI term produced by support settlement
    pub ei_constant: f64,
    coeffs: [f64; 5],
}

impl LinearExpr {
    /// The zero expression
    pub fn zero() -> Self {
        Self::default()
    }

    /// An expression with only a constant term
    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            ..Self::default()
        }
    }

    /// Coefficient of an unknown (0 when the term is absent)
    pub fn coeff(&self, unknown: Unknown) -> f64 {
        self.coeffs[unknown.index()]
    }

    /// Add `coeff` to an unknown's coefficient
    pub fn add_term(&mut self, unknown: Unknown, coeff: f64) {
        self.coeffs[unknown.index()] += coeff;
    }

    /// Builder form of [`add_term`](Self::add_term)
    pub fn with_term(mut self, unknown: Unknown, coeff: f64) -> Self {
        self.add_term(unknown, coeff);
        self
    }

    /// True when every term is zero
    pub fn is_zero(&self) -> bool {
        self.constant == 0.0 && self.ei_constant == 0.0 && self.coeffs.iter().all(|c| *c == 0.0)
    }

    /// Term-wise scaling (used to divide column equations by the height
    /// when forming the shear condition)
    pub fn scale(&self, factor: f64) -> Self {
        let mut out = *self;
        out.constant *= factor;
        out.ei_constant *= factor;
        for c in &mut out.coeffs {
            *c *= factor;
        }
        out
    }

    /// Evaluate at a set of unknown values.
    ///
    /// `ei` scales the rotation/sway terms and the settlement term; the
    /// beam pipeline passes round(E·I), the frame pipeline passes 1
    /// because member stiffness is already baked into the coefficients.
    pub fn evaluate(&self, values: impl Fn(Unknown) -> f64, ei: f64) -> f64 {
        let mut total = self.constant + self.ei_constant * ei;
        for unknown in Unknown::ALL {
            total += self.coeff(unknown) * values(unknown) * ei;
        }
        total
    }

    /// Render to the display string form.
    ///
    /// Terms appear in the order constant, θA…θD, δ, EI; zero-coefficient
    /// terms are omitted entirely; a coefficient of magnitude 1 renders as
    /// the bare marker. Numbers use the shortest form that parses back to
    /// the same `f64`, so [`parse`](Self::parse) recovers the expression
    /// exactly. An all-zero expression renders as `"0"`.
    pub fn render(&self) -> String {
        let mut parts: Vec<(f64, Option<&'static str>)> = Vec::new();

        if self.constant != 0.0 {
            parts.push((self.constant, None));
        }
        for unknown in Unknown::ALL {
            let coeff = self.coeff(unknown);
            if coeff != 0.0 {
                parts.push((coeff, Some(unknown.marker())));
            }
        }
        if self.ei_constant != 0.0 {
            parts.push((self.ei_constant, Some("EI")));
        }

        if parts.is_empty() {
            return "0".to_string();
        }

        let mut out = String::new();
        for (i, (value, marker)) in parts.iter().enumerate() {
            if i == 0 {
                if *value < 0.0 {
                    out.push('-');
                }
            } else if *value < 0.0 {
                out.push_str(" - ");
            } else {
                out.push_str(" + ");
            }

            let magnitude = value.abs();
            match marker {
                Some(m) if magnitude == 1.0 => out.push_str(m),
                Some(m) => {
                    out.push_str(&magnitude.to_string());
                    out.push_str(m);
                }
                None => out.push_str(&magnitude.to_string()),
            }
        }
        out
    }

    /// Parse the display string form back into an expression.
    ///
    /// The grammar is a flat sum of signed terms split at `+`/`-`
    /// boundaries. A term ending in a marker contributes its leading
    /// number (1 when absent) to that unknown; a term ending in bare `EI`
    /// is a settlement term; anything else must be a plain number. A term
    /// that fits none of these is a reported error — a dropped coefficient
    /// would corrupt every downstream moment without a signal.
    pub fn parse(text: &str) -> CalcResult<Self> {
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let mut expr = LinearExpr::zero();
        if cleaned.is_empty() || cleaned == "0" {
            return Ok(expr);
        }

        let mut terms: Vec<String> = Vec::new();
        let mut current = String::new();
        for ch in cleaned.chars() {
            if (ch == '+' || ch == '-') && !current.is_empty() && current != "-" {
                terms.push(std::mem::take(&mut current));
            }
            match ch {
                '+' => {}
                _ => current.push(ch),
            }
        }
        if !current.is_empty() {
            terms.push(current);
        }

        for term in &terms {
            if let Some(unknown) = Unknown::ALL
                .iter()
                .find(|u| term.ends_with(u.marker()))
                .copied()
            {
                let prefix = &term[..term.len() - unknown.marker().len()];
                expr.add_term(unknown, Self::parse_coefficient(prefix, term, text)?);
            } else if let Some(prefix) = term.strip_suffix("EI") {
                expr.ei_constant += Self::parse_coefficient(prefix, term, text)?;
            } else {
                expr.constant += term
                    .parse::<f64>()
                    .map_err(|_| CalcError::parse_error(term.clone(), text))?;
            }
        }

        Ok(expr)
    }

    fn parse_coefficient(prefix: &str, term: &str, equation: &str) -> CalcResult<f64> {
        match prefix {
            "" => Ok(1.0),
            "-" => Ok(-1.0),
            _ => prefix
                .parse::<f64>()
                .map_err(|_| CalcError::parse_error(term.to_string(), equation)),
        }
    }
}

impl std::ops::Add for LinearExpr {
    type Output = LinearExpr;

    fn add(self, rhs: LinearExpr) -> LinearExpr {
        let mut out = self;
        out.constant += rhs.constant;
        out.ei_constant += rhs.ei_constant;
        for unknown in Unknown::ALL {
            out.coeffs[unknown.index()] += rhs.coeff(unknown);
        }
        out
    }
}

impl std::fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_render_basic() {
        let expr = LinearExpr::constant(-30.0)
            .with_term(Unknown::ThetaB, 2.0 / 3.0)
            .with_term(Unknown::ThetaC, 1.0 / 3.0);
        let text = expr.render();
        assert!(text.starts_with("-30"));
        assert!(text.contains("EIθB"));
        assert!(text.contains("EIθC"));
    }

    #[test]
    fn test_render_unit_coefficient_is_bare_marker() {
        let expr = LinearExpr::zero().with_term(Unknown::ThetaB, 1.0);
        assert_eq!(expr.render(), "EIθB");
        let expr = LinearExpr::zero().with_term(Unknown::ThetaB, -1.0);
        assert_eq!(expr.render(), "-EIθB");
    }

    #[test]
    fn test_render_zero() {
        assert_eq!(LinearExpr::zero().render(), "0");
    }

    #[test]
    fn test_parse_absent_marker_is_zero_coefficient() {
        let expr = LinearExpr::parse("12.5 + 2EIθB").unwrap();
        assert!(approx_eq(expr.constant, 12.5));
        assert!(approx_eq(expr.coeff(Unknown::ThetaB), 2.0));
        assert!(approx_eq(expr.coeff(Unknown::ThetaC), 0.0));
        assert!(approx_eq(expr.coeff(Unknown::Delta), 0.0));
    }

    #[test]
    fn test_parse_default_coefficient_is_one() {
        let expr = LinearExpr::parse("EIθC - EIδ").unwrap();
        assert!(approx_eq(expr.coeff(Unknown::ThetaC), 1.0));
        assert!(approx_eq(expr.coeff(Unknown::Delta), -1.0));
    }

    #[test]
    fn test_parse_settlement_term() {
        let expr = LinearExpr::parse("30 + 0.5EIθB - 0.0025EI").unwrap();
        assert!(approx_eq(expr.ei_constant, -0.0025));
        assert!(approx_eq(expr.constant, 30.0));
    }

    #[test]
    fn test_parse_rejects_unknown_marker() {
        let err = LinearExpr::parse("2EIθX + 5").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_parse_rejects_garbage_term() {
        let err = LinearExpr::parse("3 + banana").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_round_trip_exact() {
        // Shapes the generator actually produces: FEM constant, stiffness
        // terms, negative sway term, settlement term, unit coefficients.
        let cases = vec![
            LinearExpr::constant(-30.0)
                .with_term(Unknown::ThetaB, 2.0 / 3.0)
                .with_term(Unknown::ThetaC, 1.0 / 3.0),
            LinearExpr::constant(45.5625)
                .with_term(Unknown::ThetaC, 1.0)
                .with_term(Unknown::Delta, -0.375),
            {
                let mut e = LinearExpr::constant(-18.75).with_term(Unknown::ThetaB, 0.5);
                e.ei_constant = -0.0016666666666666668;
                e
            },
            LinearExpr::zero(),
            LinearExpr::constant(180.0),
            LinearExpr::zero()
                .with_term(Unknown::ThetaA, 0.5)
                .with_term(Unknown::ThetaB, 0.25)
                .with_term(Unknown::Delta, -0.375),
        ];

        for expr in cases {
            let parsed = LinearExpr::parse(&expr.render()).unwrap();
            assert_eq!(parsed, expr, "round trip failed for '{}'", expr.render());
        }
    }

    #[test]
    fn test_addition_merges_terms() {
        let a = LinearExpr::constant(30.0).with_term(Unknown::ThetaB, 2.0);
        let b = LinearExpr::constant(-30.0)
            .with_term(Unknown::ThetaB, 2.0)
            .with_term(Unknown::ThetaC, 1.0);
        let sum = a + b;
        assert!(approx_eq(sum.constant, 0.0));
        assert!(approx_eq(sum.coeff(Unknown::ThetaB), 4.0));
        assert!(approx_eq(sum.coeff(Unknown::ThetaC), 1.0));
    }

    #[test]
    fn test_scale() {
        let expr = LinearExpr::constant(8.0)
            .with_term(Unknown::ThetaB, 2.0)
            .scale(0.25);
        assert!(approx_eq(expr.constant, 2.0));
        assert!(approx_eq(expr.coeff(Unknown::ThetaB), 0.5));
    }

    #[test]
    fn test_evaluate() {
        let expr = LinearExpr::constant(-30.0)
            .with_term(Unknown::ThetaB, 2.0 / 3.0)
            .with_term(Unknown::ThetaC, 1.0 / 3.0);
        let value = expr.evaluate(
            |u| match u {
                Unknown::ThetaB => -24.0,
                Unknown::ThetaC => 6.0,
                _ => 0.0,
            },
            1.0,
        );
        assert!(approx_eq(value, -44.0));
    }
}
