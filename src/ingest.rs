//! Document text extraction.
//!
//! The pipeline itself only ever sees text; this module turns input files
//! into that text. Supported inputs: plain text (`.txt`, `.log`), PDF
//! (feature `pdf`, via `pdf-extract`), and DOCX (feature `docx`, reading
//! paragraph text out of the OOXML `word/document.xml` part).
//!
//! Extraction failures are per-file errors: callers report them, skip the
//! file, and keep processing the batch.

use crate::{Error, Result};
use std::path::Path;

/// File extensions an [`extract`] call can handle.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "log", "txt"];

/// Whether a path has a supported extension.
#[must_use]
pub fn is_supported(path: &Path) -> bool {
    extension(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Extract the text of a document, dispatching on its file extension.
///
/// Returns [`Error::UnsupportedExtension`] for anything outside
/// [`SUPPORTED_EXTENSIONS`] and [`Error::Extraction`] when the file
/// cannot be read or parsed.
pub fn extract(path: &Path) -> Result<String> {
    match extension(path).as_deref() {
        Some("txt") | Some("log") => extract_plain(path),
        Some("pdf") => extract_pdf(path),
        Some("docx") => extract_docx(path),
        other => Err(Error::UnsupportedExtension(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn extract_plain(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::extraction(path, e.to_string()))?;
    // Logs are not always clean UTF-8; degrade lossily instead of failing.
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|e| Error::extraction(path, e.to_string()))
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path) -> Result<String> {
    Err(Error::extraction(
        path,
        "PDF support not compiled in (enable the 'pdf' feature)",
    ))
}

/// Pull paragraph text out of the OOXML main document part. Text lives in
/// `w:t` elements; `w:p` boundaries become newlines, matching how the
/// original documents were authored (one logical line per paragraph).
#[cfg(feature = "docx")]
fn extract_docx(path: &Path) -> Result<String> {
    use quick_xml::events::Event;
    use std::io::Read;

    let file = std::fs::File::open(path).map_err(|e| Error::extraction(path, e.to_string()))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| Error::extraction(path, e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| Error::extraction(path, e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| Error::extraction(path, e.to_string()))?;

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:br" => text.push('\n'),
                b"w:tab" => text.push('\t'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let piece = t
                    .unescape()
                    .map_err(|e| Error::extraction(path, e.to_string()))?;
                text.push_str(&piece);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::extraction(path, e.to_string())),
        }
    }
    Ok(text)
}

#[cfg(not(feature = "docx"))]
fn extract_docx(path: &Path) -> Result<String> {
    Err(Error::extraction(
        path,
        "DOCX support not compiled in (enable the 'docx' feature)",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported(Path::new("brief.PDF")));
        assert!(is_supported(Path::new("notizen.txt")));
        assert!(is_supported(Path::new("server.log")));
        assert!(is_supported(Path::new("schreiben.docx")));
        assert!(!is_supported(Path::new("bild.png")));
        assert!(!is_supported(Path::new("ohne_endung")));
    }

    #[test]
    fn plain_text_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.txt");
        std::fs::write(&path, "Herr Müller wohnt in Berlin.").unwrap();
        assert_eq!(extract(&path).unwrap(), "Herr Müller wohnt in Berlin.");
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kaputt.log");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"Zeile eins\xFF ende").unwrap();
        drop(f);
        let text = extract(&path).unwrap();
        assert!(text.starts_with("Zeile eins"));
        assert!(text.ends_with(" ende"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = extract(Path::new("unterlagen.odt"));
        assert!(matches!(err, Err(Error::UnsupportedExtension(_))));
    }

    #[test]
    fn missing_file_is_an_extraction_error() {
        let err = extract(Path::new("/nonexistent/datei.txt"));
        assert!(matches!(err, Err(Error::Extraction { .. })));
    }

    #[cfg(feature = "docx")]
    #[test]
    fn docx_paragraphs_become_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schreiben.docx");
        let file = std::fs::File::create(&path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        archive
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        archive
            .write_all(
                br#"<?xml version="1.0"?><w:document><w:body>
                <w:p><w:r><w:t>Herr M&#252;ller</w:t></w:r></w:p>
                <w:p><w:r><w:t>wohnt in Berlin.</w:t></w:r></w:p>
                </w:body></w:document>"#,
            )
            .unwrap();
        archive.finish().unwrap();

        let text = extract(&path).unwrap();
        assert_eq!(text, "Herr Müller\nwohnt in Berlin.\n");
    }
}
