//! CLI argument parsing and structure definitions.

use clap::{Parser, ValueEnum};

/// Redacts PII from German-language documents.
#[derive(Parser, Debug)]
#[command(name = "redakt")]
#[command(
    author,
    version,
    about = "Redacts PII from German-language documents",
    long_about = r#"
redakt - PII redaction for German-language documents

Replaces names, locations, organizations, dates, contact details, postal
codes and street addresses with typed placeholder tokens (<PERSON>,
<LOCATION>, ...). One redacted .txt file is written per input file.

PASSES:
  1. ner         persons, locations, organizations (threshold 0.5)
  2. structured  dates, phone, email, URL, IBAN, codes, postcodes
  3. street      <LOCATION> placeholder + house number

EXAMPLES:
  redakt brief.pdf
  redakt eingang/ -o geschwaerzt/
  redakt 'eingang/*.docx' --report json
"#
)]
pub struct Cli {
    /// File, directory, or glob pattern to process
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output directory, created if absent
    #[arg(short, long, default_value = "output", value_name = "DIR")]
    pub output: String,

    /// Score threshold for the structured and street passes
    #[arg(long, default_value_t = 0.3, value_name = "SCORE")]
    pub threshold: f64,

    /// Skip the composite street pass
    #[arg(long)]
    pub no_street: bool,

    /// Replacement report printed to stdout
    #[arg(long, default_value = "off", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Suppress status messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Replacement report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// No report
    #[default]
    Off,
    /// Per-file summary of what was replaced where (no original content)
    Human,
    /// Full per-pass replacement log as JSON
    Json,
}
