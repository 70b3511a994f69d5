//! File-level integration tests for the CLI batch run.

use redakt::cli::{discover_files, run, Cli, ReportFormat};

fn cli(input: &str, output: &str) -> Cli {
    Cli {
        input: input.to_string(),
        output: output.to_string(),
        threshold: 0.3,
        no_street: false,
        report: ReportFormat::Off,
        quiet: true,
    }
}

#[test]
fn redacts_a_single_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("brief.txt");
    std::fs::write(&input, "Herr Müller wohnt in Berlin.").unwrap();
    let out_dir = dir.path().join("geschwaerzt");

    run(cli(
        input.to_str().unwrap(),
        out_dir.to_str().unwrap(),
    ))
    .unwrap();

    let redacted = std::fs::read_to_string(out_dir.join("brief.txt")).unwrap();
    assert_eq!(redacted, "Herr <PERSON> wohnt in <LOCATION>.");
}

#[test]
fn output_name_strips_the_original_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("protokoll.log");
    std::fs::write(&input, "Zugriff von max@beispiel.de").unwrap();
    let out_dir = dir.path().join("out");

    run(cli(input.to_str().unwrap(), out_dir.to_str().unwrap())).unwrap();

    let redacted = std::fs::read_to_string(out_dir.join("protokoll.txt")).unwrap();
    assert_eq!(redacted, "Zugriff von <EMAIL_ADDRESS>");
}

#[test]
fn processes_a_directory_and_skips_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    let in_dir = dir.path().join("eingang");
    std::fs::create_dir(&in_dir).unwrap();
    std::fs::write(in_dir.join("gut.txt"), "Frau Schmidt war in Hamburg.").unwrap();
    // A .pdf that is not a PDF: extraction fails, the file is skipped,
    // the run keeps going.
    std::fs::write(in_dir.join("kaputt.pdf"), b"definitely not a pdf").unwrap();
    let out_dir = dir.path().join("out");

    run(cli(in_dir.to_str().unwrap(), out_dir.to_str().unwrap())).unwrap();

    assert!(out_dir.join("gut.txt").exists());
    assert!(!out_dir.join("kaputt.txt").exists());
}

#[test]
fn missing_input_aborts_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let err = run(cli("/does/not/exist.txt", out_dir.to_str().unwrap()));
    assert!(err.is_err());
    // Input errors happen before any output is created.
    assert!(!out_dir.exists());
}

#[test]
fn directory_without_documents_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let in_dir = dir.path().join("leer");
    std::fs::create_dir(&in_dir).unwrap();
    let err = run(cli(in_dir.to_str().unwrap(), "unused"));
    assert!(err.unwrap_err().contains("no files found"));
}

#[test]
fn discover_accepts_globs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "x").unwrap();
    std::fs::write(dir.path().join("b.docx"), "x").unwrap();
    std::fs::write(dir.path().join("c.odt"), "x").unwrap();

    let files = discover_files(&format!("{}/*", dir.path().display())).unwrap();
    assert_eq!(files.len(), 2); // a.txt and b.docx; .odt filtered out
}

#[test]
fn no_street_flag_leaves_house_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("brief.txt");
    std::fs::write(&input, "Er wohnt in Hamburg 12.").unwrap();
    let out_dir = dir.path().join("out");

    let mut args = cli(input.to_str().unwrap(), out_dir.to_str().unwrap());
    args.no_street = true;
    run(args).unwrap();

    let redacted = std::fs::read_to_string(out_dir.join("brief.txt")).unwrap();
    assert_eq!(redacted, "Er wohnt in <LOCATION> 12.");
}
