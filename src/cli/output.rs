//! Output helpers for CLI commands.

use crate::RedactionOutcome;
use std::path::Path;

/// Log a status message to stderr (respects the quiet flag).
pub fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", msg);
    }
}

/// Render the human-readable replacement report for one file.
///
/// Lists entity type, pass, and position for every replacement, never the
/// redacted content itself, which would leak the PII the run just removed.
#[must_use]
pub fn render_report(path: &Path, outcome: &RedactionOutcome) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} replacements",
        path.display(),
        outcome.total_replacements()
    );
    for pass in &outcome.passes {
        for r in &pass.replacements {
            let _ = writeln!(
                out,
                "  [{}] {:>5}..{:<5} {}",
                pass.pass, r.start, r.end, r.placeholder
            );
        }
    }
    out
}
