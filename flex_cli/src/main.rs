//! # Flexura CLI
//!
//! Terminal front end for the slope-deflection engine. Two modes:
//!
//! - `flexura <input.json>` — run the analysis described by a JSON file
//!   containing a `BeamInput` (key `"spans"`) or a `FrameInput` (key
//!   `"columns"`) and print the result bundle as JSON.
//! - `flexura` — interactive demo: prompts for the geometry of a
//!   three-span beam and prints a formatted report plus the JSON bundle.

use std::io::{self, BufRead, Write};

use flex_core::analysis::beam::{analyze_beam, BeamAnalysis, BeamInput, Span};
use flex_core::analysis::frame::analyze_frame;
use flex_core::analysis::SupportType;
use flex_core::loads::LoadKind;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    env_logger::init();

    if let Some(path) = std::env::args().nth(1) {
        run_file(&path);
        return;
    }

    run_demo();
}

/// Analyze a JSON input file and print the bundle as JSON.
fn run_file(path: &str) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error parsing {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let result = if value.get("columns").is_some() {
        serde_json::from_value(value)
            .map_err(|e| e.to_string())
            .and_then(|input| {
                analyze_frame(&input)
                    .map_err(|e| e.to_string())
                    .and_then(|a| serde_json::to_string_pretty(&a).map_err(|e| e.to_string()))
            })
    } else {
        serde_json::from_value(value)
            .map_err(|e| e.to_string())
            .and_then(|input| {
                analyze_beam(&input)
                    .map_err(|e| e.to_string())
                    .and_then(|a| serde_json::to_string_pretty(&a).map_err(|e| e.to_string()))
            })
    };

    match result {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Interactive three-span beam demo.
fn run_demo() {
    println!("Flexura CLI - Slope-Deflection Analyzer");
    println!("=======================================");
    println!();
    println!("Three-span continuous beam, fixed at the outer walls,");
    println!("hinged over the interior supports, uniform load on every span.");
    println!();

    let span_length = prompt_f64("Enter span length (m) [6.0]: ", 6.0);
    let load = prompt_f64("Enter uniform load (kN/m) [10.0]: ", 10.0);
    let e = prompt_f64("Enter modulus of elasticity E [1.0]: ", 1.0);
    let i = prompt_f64("Enter moment of inertia I [1.0]: ", 1.0);

    let mut spans = vec![
        Span::new(span_length, 1.0, LoadKind::Udl, load),
        Span::new(span_length, 1.0, LoadKind::Udl, load),
        Span::new(span_length, 1.0, LoadKind::Udl, load),
    ];
    spans[0].start_support = SupportType::Fixed;
    spans[2].end_support = SupportType::Fixed;

    let input = BeamInput {
        label: "CLI-Demo".to_string(),
        modulus_of_elasticity: e,
        moment_of_inertia: i,
        spans,
        sinking_supports: Vec::new(),
    };

    match analyze_beam(&input) {
        Ok(analysis) => print_report(&input, &analysis),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

fn print_report(input: &BeamInput, analysis: &BeamAnalysis) {
    println!();
    println!("═══════════════════════════════════════");
    println!("  BEAM ANALYSIS RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Fixed-End Moments:");
    for fem in &analysis.fixed_end_moments {
        println!(
            "  {}: FEM_start = {:.2}, FEM_end = {:.2}",
            fem.member_label, fem.start, fem.end
        );
    }
    println!();
    println!("Slope-Deflection Equations:");
    for eq in &analysis.equations {
        println!("  M{} = {}", eq.member_label, eq.start_equation);
        let reversed: String = eq.member_label.chars().rev().collect();
        println!("  M{} = {}", reversed, eq.end_equation);
    }
    println!();
    println!("Boundary Conditions:");
    for eq in &analysis.boundary_equations {
        println!("  {}", eq);
    }
    println!();
    println!("Solution:");
    println!("  θB = {:.6}", analysis.solution.theta_b);
    println!("  θC = {:.6}", analysis.solution.theta_c);
    if let Some(theta_d) = analysis.solution.theta_d {
        println!("  θD = {:.6}", theta_d);
    }
    println!();
    println!("Final Moments:");
    for moment in &analysis.final_moments {
        println!("  {} = {:.2}", moment.label, moment.value);
    }
    println!();
    println!("Support Reactions:");
    for reaction in &analysis.reactions {
        println!("  {} = {:.2}", reaction.label, reaction.value);
    }
    let total: f64 = analysis.reactions.iter().map(|r| r.value).sum();
    let applied: f64 = input
        .spans
        .iter()
        .map(|s| s.load.total_load(s.load_magnitude, s.length))
        .sum();
    println!("  (ΣR = {:.2} against ΣP = {:.2})", total, applied);
    println!();
    println!("Critical Points:");
    for span in &analysis.critical_points {
        for point in &span.critical_points {
            println!(
                "  {:<40} x = {:>6.2}  M = {:>8.2}  V = {:>8.2}",
                point.location, point.position, point.bending_moment, point.shear_force
            );
        }
    }
    println!();
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output (for UI/API use):");
    if let Ok(json) = serde_json::to_string_pretty(analysis) {
        println!("{}", json);
    }
}
