// Test fixtures for integration testing

use advisor::core::error::{AdvisorError, Result};
use advisor::core::llm::GenerationClient;
use async_trait::async_trait;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// A directory of documents on disk
#[allow(dead_code)]
pub struct DocumentSet {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl DocumentSet {
    /// A small set of advising documents
    #[allow(dead_code)]
    pub fn handbook() -> Self {
        Self::with_files(&[
            (
                "programs.txt",
                "The MS IT program offers three tracks: Professional, Research, \
                 and Applied. Each MS IT student picks one of the tracks in the \
                 first semester.",
            ),
            (
                "registration.md",
                "# Registration\n\nCourse registration opens in week one. The add/drop \
                 deadline is the end of week two.",
            ),
            (
                "integrity.txt",
                "Academic integrity policies are strictly enforced. Contact the \
                 academic advising office with questions.",
            ),
            ("notes/slides.pptx", "PK binary slides"),
        ])
    }

    /// Create a document set from (relative path, content) pairs
    #[allow(dead_code)]
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut paths = Vec::new();

        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            std::fs::write(&path, content).expect("Failed to write file");
            paths.push(path);
        }

        Self { dir, files: paths }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// A DOCX package holding one paragraph per entry
#[allow(dead_code)]
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| {
            let escaped = p.replace('&', "&amp;").replace('<', "&lt;");
            format!("<w:p><w:r><w:t>{escaped}</w:t></w:r></w:p>")
        })
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    writer
        .start_file("[Content_Types].xml", options)
        .expect("Failed to start content types");
    writer
        .write_all(b"<?xml version=\"1.0\"?><Types/>")
        .expect("Failed to write content types");
    writer
        .start_file("word/document.xml", options)
        .expect("Failed to start document part");
    writer
        .write_all(xml.as_bytes())
        .expect("Failed to write document part");
    writer.finish().expect("Failed to finish docx").into_inner()
}

/// A single-page PDF showing one text line per entry in Helvetica
#[allow(dead_code)]
pub fn pdf_bytes(lines: &[&str]) -> Vec<u8> {
    let mut content = String::from("BT /F1 12 Tf 72 720 Td\n");
    for line in lines {
        content.push_str(&format!("({line}) Tj 0 -16 Td\n"));
    }
    content.push_str("ET");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

/// Generation client returning canned results and recording prompts
#[allow(dead_code)]
pub struct ScriptedClient {
    outcome: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    /// Always answers with `answer`
    #[allow(dead_code)]
    pub fn answering(answer: &str) -> Self {
        Self {
            outcome: Ok(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always fails as if every candidate model errored
    #[allow(dead_code)]
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far
    #[allow(dead_code)]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.outcome {
            Ok(answer) => Ok(answer.clone()),
            Err(reason) => Err(AdvisorError::GenerationExhausted {
                attempts: vec![reason.clone()],
            }),
        }
    }
}
