use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();

    let run_unit = !integration_only;
    let run_integration = !unit_only;

    if run_unit {
        println!("{}", "  Running unit tests...".cyan());
        let unit_start = Instant::now();

        let unit_output = Command::new("cargo")
            .args(["test", "--lib", "--workspace"])
            .output()
            .context("Failed to run unit tests")?;

        if !unit_output.status.success() {
            eprintln!("{}", "  ✗ Unit tests failed".red().bold());
            eprintln!();
            let output_str = String::from_utf8_lossy(&unit_output.stdout);
            for line in output_str.lines() {
                eprintln!("  {line}");
            }
            anyhow::bail!("Unit tests failed");
        }

        let output_str = String::from_utf8_lossy(&unit_output.stdout);
        println!(
            "{}",
            format!(
                "  ✓ Unit tests passed {} in {:.2}s",
                extract_test_summary(&output_str),
                unit_start.elapsed().as_secs_f64()
            )
            .green()
        );
        println!();
    }

    if run_integration {
        println!("{}", "  Running integration tests...".cyan());
        let int_start = Instant::now();

        let int_output = Command::new("cargo")
            .args(["test", "--workspace", "--tests"])
            .output()
            .context("Failed to run integration tests")?;

        if !int_output.status.success() {
            eprintln!("{}", "  ✗ Integration tests failed".red().bold());
            eprintln!();
            let output_str = String::from_utf8_lossy(&int_output.stdout);
            for line in output_str.lines() {
                eprintln!("  {line}");
            }
            anyhow::bail!("Integration tests failed");
        }

        let output_str = String::from_utf8_lossy(&int_output.stdout);
        println!(
            "{}",
            format!(
                "  ✓ Integration tests passed {} in {:.2}s",
                extract_test_summary(&output_str),
                int_start.elapsed().as_secs_f64()
            )
            .green()
        );
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ Tests completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

/// Sum up the "N passed; M failed" lines cargo prints per test binary.
fn extract_test_summary(output: &str) -> String {
    let mut passed = 0u32;
    let mut failed = 0u32;
    for line in output.lines() {
        let Some(rest) = line.strip_prefix("test result:") else {
            continue;
        };
        for part in rest.split(';') {
            let part = part.trim();
            if let Some(n) = part
                .strip_suffix(" passed")
                .and_then(|s| s.split_whitespace().last())
                .and_then(|s| s.parse::<u32>().ok())
            {
                passed += n;
            }
            if let Some(n) = part
                .strip_suffix(" failed")
                .and_then(|s| s.parse::<u32>().ok())
            {
                failed += n;
            }
        }
    }
    format!("({passed} passed, {failed} failed)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_sums_multiple_binaries() {
        let out = "test result: ok. 12 passed; 0 failed; 0 ignored\n\
                   other noise\n\
                   test result: ok. 3 passed; 1 failed; 0 ignored\n";
        assert_eq!(extract_test_summary(out), "(15 passed, 1 failed)");
    }
}
