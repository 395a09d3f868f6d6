// Chunking properties and document loading

use advisor::core::error::AdvisorError;
use advisor::core::indexer::{split, Chunker, DocumentLoader, IngestPipeline};
use advisor::core::config::IndexingConfig;

use crate::common::{docx_bytes, pdf_bytes};

fn sample_text(len: usize) -> String {
    (0..len)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect()
}

#[test]
fn test_chunks_cover_every_character() {
    let text = sample_text(2_345);
    let chunker = Chunker::new(300, 45).unwrap();
    let chunks = chunker.chunk_text(&text);

    let mut covered = vec![false; text.len()];
    for chunk in &chunks {
        for slot in &mut covered[chunk.start_offset..chunk.end_offset] {
            *slot = true;
        }
        assert_eq!(&text[chunk.start_offset..chunk.end_offset], chunk.text);
    }
    assert!(covered.iter().all(|c| *c), "Some characters are in no chunk");
}

#[test]
fn test_chunk_count_is_bounded() {
    for (len, size, overlap) in [(0, 10, 2), (9, 10, 2), (10, 10, 2), (1_001, 100, 99), (5_000, 1000, 200)] {
        let text = sample_text(len);
        let chunker = Chunker::new(size, overlap).unwrap();
        let count = chunker.chunk_text(&text).len();
        let bound = len.div_ceil(size - overlap);
        assert!(count <= bound, "len={len} size={size} overlap={overlap}: {count} > {bound}");
    }
}

#[test]
fn test_every_chunk_is_trimmed_and_bounded() {
    let text = "  Course   registration opens  Monday.   Add/drop ends Friday.  ".repeat(20);
    let chunks = split(&text, 37, 11).unwrap();

    assert!(!chunks.is_empty());
    for chunk in &chunks {
        assert!(!chunk.is_empty());
        assert_eq!(chunk.trim(), chunk);
        assert!(chunk.chars().count() <= 37);
    }
}

#[test]
fn test_ten_thousand_characters_default_sizes() {
    let chunks = split(&sample_text(10_000), 1000, 200).unwrap();

    assert_eq!(chunks.len(), 13);
    assert!(chunks[..12].iter().all(|c| c.chars().count() == 1000));
    assert_eq!(chunks[12].chars().count(), 400);
}

#[test]
fn test_invalid_overlap_is_rejected() {
    for (size, overlap) in [(500, 500), (500, 600), (0, 0)] {
        let result = split("anything", size, overlap);
        assert!(
            matches!(result, Err(AdvisorError::InvalidConfiguration(_))),
            "size={size} overlap={overlap} should be rejected"
        );
    }
}

#[test]
fn test_loader_then_split_matches_pipeline() {
    let raw = b"Tuition\n\n is due\tbefore the first day of classes.";
    let loader = DocumentLoader::new(&[".txt".to_string()], 1);
    let text = loader.load_bytes("fees.txt", raw).unwrap();

    let config = IndexingConfig {
        chunk_size: 20,
        chunk_overlap: 5,
        ..IndexingConfig::default()
    };
    let pipeline = IngestPipeline::new(&config).unwrap();
    let prepared = pipeline.prepare("fees.txt", raw).unwrap();

    assert_eq!(prepared.chunks, split(&text, 20, 5).unwrap());
}

#[test]
fn test_default_pipeline_reads_pdf_and_docx() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("probation.docx"),
        docx_bytes(&["Academic probation", "follows a GPA below 3.0"]),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("calendar.pdf"),
        pdf_bytes(&["Registration opens Monday"]),
    )
    .unwrap();
    std::fs::write(dir.path().join("slides.pptx"), b"PK").unwrap();

    let pipeline = IngestPipeline::new(&IndexingConfig::default()).unwrap();
    let files = pipeline.discover(dir.path()).unwrap();
    assert_eq!(files.len(), 2);

    let docx = pipeline.prepare_path(&dir.path().join("probation.docx")).unwrap();
    assert_eq!(docx.chunks, vec!["Academic probation follows a GPA below 3.0"]);

    let pdf = pipeline.prepare_path(&dir.path().join("calendar.pdf")).unwrap();
    assert_eq!(pdf.chunks.len(), 1);
    assert!(pdf.chunks[0].contains("Registration opens Monday"));
}

#[test]
fn test_docx_without_body_part_is_invalid() {
    let loader = DocumentLoader::new(&[".docx".to_string()], 1);

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let err = loader.load_bytes("empty.docx", &bytes).unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidDocument(_)));
    assert!(err.message().contains("empty.docx"));
}
