use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking firmware builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    step(
        "hardware target (RP2040)",
        &[
            "check",
            "-p",
            "firmware",
            "--target",
            "thumbv6m-none-eabi",
            "--features",
            "hardware",
        ],
        true,
    )?;

    step(
        "simulator target (host)",
        &[
            "check",
            "-p",
            "firmware",
            "--example",
            "simulator",
            "--features",
            "simulator",
        ],
        true,
    )?;

    step(
        "platform crate (no_std)",
        &[
            "check",
            "-p",
            "platform",
            "--target",
            "thumbv6m-none-eabi",
            "--no-default-features",
        ],
        true,
    )?;

    step(
        "catalog crate (no_std)",
        &[
            "check",
            "-p",
            "catalog",
            "--target",
            "thumbv6m-none-eabi",
            "--no-default-features",
        ],
        true,
    )?;

    // Lints are advisory: show, don't fail.
    step(
        "clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        false,
    )?;

    step("code formatting", &["fmt", "--all", "--check"], false)?;

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

/// Run one `cargo` step; `fatal` steps abort the whole check on failure.
fn step(label: &str, args: &[&str], fatal: bool) -> Result<()> {
    println!("{}", format!("  Checking {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo for {label}"))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
    } else if fatal {
        eprintln!("{}", format!("  ✗ {label} failed").red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{label} failed");
    } else {
        eprintln!("{}", format!("  ⚠ {label} has findings").yellow().bold());
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
    }
    println!();
    Ok(())
}
