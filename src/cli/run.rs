//! The batch redaction run: discover files, extract, redact, write.

use super::output::{log_info, render_report};
use super::parser::{Cli, ReportFormat};
use crate::{ingest, GermanNer, GermanOptions, Pipeline};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Execute a full redaction run.
///
/// Error handling follows three tiers:
/// - input errors (nothing to process) fail the run before any file is
///   touched;
/// - per-file extraction errors are reported and the file skipped;
/// - detector or resolver errors abort the run: a partially redacted
///   batch must never look like a finished one.
pub fn run(args: Cli) -> Result<(), String> {
    let files = discover_files(&args.input)?;

    let options = GermanOptions {
        structured_threshold: args.threshold,
        street: !args.no_street,
        ..GermanOptions::default()
    };
    let pipeline = Pipeline::german_with(options, Arc::new(GermanNer::new()));

    let out_dir = Path::new(&args.output);
    std::fs::create_dir_all(out_dir)
        .map_err(|e| format!("failed to create output directory {}: {}", out_dir.display(), e))?;

    let mut written = 0usize;
    let mut skipped = 0usize;
    for path in &files {
        let text = match ingest::extract(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("warning: skipping {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };

        let outcome = pipeline
            .run(&text)
            .map_err(|e| format!("{}: {}", path.display(), e))?;

        let target = output_path(out_dir, path);
        std::fs::write(&target, &outcome.text)
            .map_err(|e| format!("failed to write {}: {}", target.display(), e))?;
        written += 1;
        log_info(
            &format!(
                "{} -> {} ({} replacements)",
                path.display(),
                target.display(),
                outcome.total_replacements()
            ),
            args.quiet,
        );

        match args.report {
            ReportFormat::Off => {}
            ReportFormat::Human => print!("{}", render_report(path, &outcome)),
            ReportFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&outcome.passes).map_err(|e| e.to_string())?
            ),
        }
    }

    log_info(
        &format!("done: {} redacted, {} skipped", written, skipped),
        args.quiet,
    );
    Ok(())
}

/// Resolve the input argument to a sorted list of processable files.
///
/// Accepts a single file, a directory (all supported files inside,
/// non-recursive), or a glob pattern. An empty result is a whole-run
/// error: no document list, nothing to start.
pub fn discover_files(input: &str) -> Result<Vec<PathBuf>, String> {
    let path = Path::new(input);

    let mut files: Vec<PathBuf> = if path.is_file() {
        if !ingest::is_supported(path) {
            return Err(format!(
                "unsupported file type: {} (supported: pdf, docx, log, txt)",
                input
            ));
        }
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        let entries = std::fs::read_dir(path)
            .map_err(|e| format!("failed to read directory {}: {}", input, e))?;
        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| format!("failed to read directory entry: {}", e))?;
            let p = entry.path();
            if p.is_file() && ingest::is_supported(&p) {
                found.push(p);
            }
        }
        found
    } else if input.contains(['*', '?', '[']) {
        let pattern =
            glob::glob(input).map_err(|e| format!("invalid glob pattern {}: {}", input, e))?;
        let mut found = Vec::new();
        for entry in pattern {
            let p = entry.map_err(|e| e.to_string())?;
            if p.is_file() && ingest::is_supported(&p) {
                found.push(p);
            }
        }
        found
    } else {
        return Err(format!("file not found: {}", input));
    };

    files.sort();
    if files.is_empty() {
        return Err("no files found! Supported file types: pdf, docx, log, txt".to_string());
    }
    Ok(files)
}

/// Output file for an input: base name, original extension stripped,
/// `.txt` appended.
fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{}.txt", stem))
}
