//! xtask scan-audio — factory pre-flight for a device clip directory.
//!
//! Prints what the device's catalog scan will see: which files count as
//! clips, the rule parsed from each name, the resulting index bound, and
//! the indices that will resolve only through fallback.

use std::path::Path;

use anyhow::Result;
use catalog::parse_prefix;
use colored::Colorize;
use walkdir::WalkDir;

pub fn run(dir: &Path) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🔎 Scanning clip directory {}", dir.display())
            .cyan()
            .bold()
    );
    println!();

    if !dir.is_dir() {
        // The device treats a missing directory as an empty catalog.
        println!("{}", "  Directory does not exist — the device will boot with an empty catalog and park.".yellow());
        return Ok(());
    }

    let mut clips = 0usize;
    let mut unruled = 0usize;
    let mut skipped = 0usize;
    let mut max_index = 0u32;
    let mut rules: Vec<(String, Option<catalog::RangeSpec>)> = Vec::new();

    for entry in WalkDir::new(dir).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();

        let is_clip = !name.starts_with('.')
            && Path::new(&name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
        if !is_clip {
            skipped += 1;
            println!("  {} {}", "skip".dimmed(), name.dimmed());
            continue;
        }

        clips += 1;
        match parse_prefix(&name) {
            Some(spec) => {
                max_index = max_index.max(spec.upper_bound());
                let ranges: Vec<String> = spec
                    .intervals()
                    .iter()
                    .map(|iv| {
                        if iv.min == iv.max {
                            format!("{}", iv.min)
                        } else {
                            format!("{}-{}", iv.min, iv.max)
                        }
                    })
                    .collect();
                let shown = if ranges.is_empty() {
                    "(no usable tokens)".yellow().to_string()
                } else {
                    ranges.join(", ")
                };
                println!("  {} {}  →  indices {}", "clip".green(), name, shown);
                rules.push((name, Some(spec)));
            }
            None => {
                unruled += 1;
                println!("  {} {}  →  {}", "clip".green(), name, "random-mode only".dimmed());
                rules.push((name, None));
            }
        }
    }

    println!();
    println!(
        "  {clips} clips ({unruled} without rules), {skipped} other files, max index {max_index}"
    );

    if clips == 0 {
        println!();
        println!(
            "{}",
            "  ⚠ No usable clips: the device will log and park without playing.".yellow().bold()
        );
        return Ok(());
    }

    // Indices inside the bound with no direct rule match resolve through
    // the falling-back walk; list them so surprises are visible up front.
    let fallback: Vec<u32> = (0..=max_index)
        .filter(|&i| !rules.iter().any(|(_, s)| s.as_ref().is_some_and(|s| s.contains(i))))
        .collect();
    if !fallback.is_empty() {
        println!();
        println!(
            "  {} {fallback:?}",
            "indices served by fallback only:".yellow()
        );
        if fallback.contains(&0) && rules.iter().any(|(_, s)| s.is_some()) {
            println!(
                "{}",
                "  ⚠ index 0 has no direct clip and pure-random is disabled — the first touch after every wake will be silent."
                    .yellow()
                    .bold()
            );
        }
    }

    println!();
    println!("{}", "✓ Scan complete".green().bold());
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_of_mixed_directory_succeeds() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("0-2_hello.wav"), b"x").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"x").unwrap();
        fs::write(tmp.path().join("intro.wav"), b"x").unwrap();
        run(tmp.path()).unwrap();
    }

    #[test]
    fn scan_of_missing_directory_succeeds() {
        let tmp = TempDir::new().unwrap();
        run(&tmp.path().join("nope")).unwrap();
    }
}
