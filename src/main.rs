use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use herbrand::{Convergence, EisensteinEngine, PresentedCompletion, WeakExtension};

#[derive(Parser, Debug)]
#[command(
    name = "herbrand",
    about = "Ramification filtrations of p-adic Galois extensions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ramification filtration of a presented extension.
    Jumps {
        /// Residue characteristic p.
        #[arg(short, long)]
        prime: u64,
        /// Ascending integer coefficients of the Eisenstein generator,
        /// comma-separated (e.g. "3,0,3,0,0,0,1" for x^6 + 3x^2 + 3).
        generator: String,
        /// Required divisor of the ramification index.
        #[arg(long, default_value_t = 1)]
        minimal_ramification: u64,
        /// Print upper-numbering jumps instead of lower.
        #[arg(long)]
        upper: bool,
    },
    /// Print the Newton polygon of the ramification polynomial.
    Polygon {
        /// Residue characteristic p.
        #[arg(short, long)]
        prime: u64,
        /// Ascending integer coefficients of the Eisenstein generator.
        generator: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Jumps {
            prime,
            generator,
            minimal_ramification,
            upper,
        } => run_jumps(prime, &generator, minimal_ramification, upper)?,
        Commands::Polygon { prime, generator } => run_polygon(prime, &generator)?,
    }

    Ok(())
}

fn run_jumps(prime: u64, generator: &str, minimal_ramification: u64, upper: bool) -> Result<()> {
    let ext = build_extension(prime, generator, minimal_ramification)?;
    println!("{ext}");

    let filtration = ext
        .ramification_filtration(upper)
        .context("failed to compute the ramification filtration")?;
    let numbering = if upper { "upper" } else { "lower" };
    if filtration.is_empty() {
        println!("no {numbering} jumps (unramified extension)");
        return Ok(());
    }
    println!("{numbering} numbering:");
    for jump in filtration {
        println!("  u = {:<8} |G_u| = {}", jump.jump.to_string(), jump.order);
    }
    Ok(())
}

fn run_polygon(prime: u64, generator: &str) -> Result<()> {
    let ext = build_extension(prime, generator, 1)?;
    let polygon = ext
        .ramification_polygon()
        .context("failed to compute the ramification polygon")?;

    println!("{ext}");
    if polygon.convergence == Convergence::Truncated {
        println!("warning: refinement budget exhausted, polygon may be under-refined");
    }
    println!("vertices:");
    for (x, y) in polygon.polygon.vertices() {
        println!("  ({x}, {y})");
    }
    println!("sides:");
    for side in polygon.polygon.sides() {
        println!(
            "  ({}, {}) -> ({}, {})  slope {}",
            side.start.0,
            side.start.1,
            side.end.0,
            side.end.1,
            side.slope()
        );
    }
    Ok(())
}

fn build_extension(
    prime: u64,
    generator: &str,
    minimal_ramification: u64,
) -> Result<WeakExtension<PresentedCompletion, EisensteinEngine>> {
    let coeffs = parse_coefficients(generator)?;
    let target = PresentedCompletion::eisenstein(prime, &coeffs)
        .with_context(|| format!("invalid Eisenstein generator over Q_{prime}"))?;
    let base = Arc::new(PresentedCompletion::rationals(prime).with_splitting_field(target));
    let f = base.polynomial_over_rationals(&coeffs);

    WeakExtension::new(base, &[f], minimal_ramification, EisensteinEngine)
        .context("failed to construct the weak Galois extension")
}

fn parse_coefficients(input: &str) -> Result<Vec<i64>> {
    input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .with_context(|| format!("invalid coefficient {part:?}"))
        })
        .collect()
}
