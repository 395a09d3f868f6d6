// End-to-end behaviour of the service layer

use advisor::core::error::AdvisorError;
use advisor::core::services::{APOLOGY, DEFAULT_DEBUG_QUERY, PREVIEW_CHARS};
use advisor::core::types::ModelName;
use std::sync::Arc;

use crate::common::{
    create_test_services, create_test_services_with, docx_bytes, DocumentSet, ScriptedClient,
};

#[test]
fn test_ingest_directory_indexes_text_documents() {
    let docs = DocumentSet::handbook();
    let services = create_test_services();

    let stats = services.ingest_directory(docs.path()).unwrap();
    assert_eq!(stats.documents_indexed, 3);
    assert!(stats.chunks_created >= 3);

    let listed = services.list_documents().unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|doc| !doc.filename.ends_with(".pptx")));
}

#[test]
fn test_upload_then_search_returns_document() {
    let services = create_test_services();
    let report = services
        .ingest_document("deadlines.txt", b"The add/drop deadline is the end of week two.")
        .unwrap();

    let hits = services.search("deadline", None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document_id, report.file_id);
}

#[test]
fn test_upload_docx_then_search() {
    let services = create_test_services();
    let report = services
        .ingest_document(
            "advising.docx",
            &docx_bytes(&["Advising office hours", "are Tuesday & Thursday."]),
        )
        .unwrap();
    assert_eq!(report.chunks, 1);

    let hits = services.search("thursday", None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "Advising office hours are Tuesday & Thursday.");
}

#[test]
fn test_failed_upload_leaves_no_record() {
    let services = create_test_services();

    let unsupported = services.ingest_document("slides.pptx", b"PK");
    assert!(matches!(unsupported, Err(AdvisorError::UnsupportedFileType(_))));

    let corrupt = services.ingest_document("transcript.pdf", b"%PDF-1.7");
    assert!(matches!(corrupt, Err(AdvisorError::InvalidDocument(_))));

    let blank = services.ingest_document("blank.txt", b" \n\t ");
    assert!(matches!(blank, Err(AdvisorError::InvalidDocument(_))));

    assert!(services.list_documents().unwrap().is_empty());
    assert!(services.index.read().unwrap().is_empty());
}

#[test]
fn test_remove_document_then_missing() {
    let services = create_test_services();
    let report = services
        .ingest_document("policy.md", b"Academic integrity is enforced.")
        .unwrap();

    services.remove_document(report.file_id).unwrap();
    assert!(services.search("integrity", None).unwrap().is_empty());

    let again = services.remove_document(report.file_id).unwrap_err();
    assert!(again.is_not_found());
}

#[test]
fn test_reset_clears_records_and_index() {
    let docs = DocumentSet::handbook();
    let services = create_test_services();
    services.ingest_directory(docs.path()).unwrap();

    assert_eq!(services.reset().unwrap(), 3);
    assert!(services.list_documents().unwrap().is_empty());
    assert!(services.search("tracks", None).unwrap().is_empty());
}

#[test]
fn test_purge_stale_records_after_restart() {
    let services = create_test_services();
    services
        .ingest_document("kept.txt", b"registration opens monday")
        .unwrap();
    // Record without chunks, as left behind by a previous process
    services.records.insert_document("orphan.txt").unwrap();

    assert_eq!(services.purge_stale_records().unwrap(), 1);
    let names: Vec<String> = services
        .list_documents()
        .unwrap()
        .into_iter()
        .map(|doc| doc.filename)
        .collect();
    assert_eq!(names, vec!["kept.txt"]);
}

#[test]
fn test_search_rejects_out_of_range_k() {
    let services = create_test_services();
    let max_k = services.config.search.max_k;

    assert!(services.search("tracks", Some(0)).unwrap_err().is_bad_request());
    assert!(services
        .search("tracks", Some(max_k + 1))
        .unwrap_err()
        .is_bad_request());
    assert!(services.search("   ", None).unwrap_err().is_bad_request());
}

#[test]
fn test_debug_search_defaults_and_previews() {
    let services = create_test_services();
    let long = format!("MS IT tracks {}", "x".repeat(500));
    services.ingest_document("tracks.txt", long.as_bytes()).unwrap();

    let response = services.debug_search(None, None).unwrap();
    assert_eq!(response.search_query, DEFAULT_DEBUG_QUERY);
    assert_eq!(response.total_documents, 1);
    assert_eq!(response.results_count, 1);

    // Test chunks are 120 characters, below the preview length
    let preview = &response.results[0].content_preview;
    assert!(preview.starts_with("MS IT tracks"));
    assert!(preview.ends_with("..."));
    assert_eq!(preview.chars().count(), 120 + 3);
    assert!(preview.chars().count() <= PREVIEW_CHARS + 3);
}

#[tokio::test]
async fn test_answer_uses_context_and_history() {
    let client = Arc::new(ScriptedClient::answering("Pick a track in semester one."));
    let services = create_test_services_with(client.clone());
    services
        .ingest_document(
            "programs.txt",
            b"The MS IT program offers Professional and Research tracks.",
        )
        .unwrap();

    let first = services
        .answer("Which tracks exist?", None, ModelName::GeminiPro)
        .await
        .unwrap();
    assert_eq!(first.answer, "Pick a track in semester one.");
    assert!(!first.session_id.is_empty());

    let second = services
        .answer("And when?", Some(first.session_id.clone()), ModelName::GeminiFlash)
        .await
        .unwrap();
    assert_eq!(second.session_id, first.session_id);
    assert_eq!(second.model, ModelName::GeminiFlash);

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Professional and Research tracks"));
    assert!(prompts[1].contains("Human: Which tracks exist?"));
    assert!(prompts[1].contains("Assistant: Pick a track in semester one."));
    assert!(prompts[1].ends_with("Student Question: And when?\n\nAnswer:"));
}

#[tokio::test]
async fn test_answer_without_context_uses_placeholder() {
    let client = Arc::new(ScriptedClient::answering("ok"));
    let services = create_test_services_with(client.clone());

    services
        .answer("Anything?", Some("s-1".to_string()), ModelName::default())
        .await
        .unwrap();

    assert!(client.prompts()[0].contains("No specific context available."));
}

#[tokio::test]
async fn test_generation_failure_returns_apology_and_logs() {
    let services = create_test_services_with(Arc::new(ScriptedClient::failing("quota exceeded")));

    let response = services
        .answer("Is the library open?", Some("s-2".to_string()), ModelName::GeminiPro)
        .await
        .unwrap();
    assert_eq!(response.answer, APOLOGY);

    let history = services.records.chat_history("s-2").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].content, APOLOGY);
}

#[tokio::test]
async fn test_blank_session_id_gets_fresh_uuid() {
    let services = create_test_services();
    let response = services
        .answer("Hello?", Some("  ".to_string()), ModelName::GeminiPro)
        .await
        .unwrap();

    assert!(uuid::Uuid::parse_str(&response.session_id).is_ok());
}

#[test]
fn test_concurrent_ingest_and_reset_keep_records_and_index_aligned() {
    let services = create_test_services();

    for round in 0..100 {
        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..20 {
                    services.ingest_document("x.txt", b"alpha beta").unwrap();
                }
            });
            scope.spawn(|| {
                for _ in 0..20 {
                    services.reset().unwrap();
                }
            });
        });

        let indexed = services.index.read().unwrap().document_ids();
        for id in &indexed {
            assert!(
                services.records.get_document(*id).unwrap().is_some(),
                "round {round}: document {id} is searchable without a record"
            );
        }
        for doc in services.list_documents().unwrap() {
            assert!(
                indexed.contains(&doc.id),
                "round {round}: record {} has no chunks",
                doc.id
            );
        }
    }
}

#[test]
fn test_concurrent_ingest_and_remove_keep_records_and_index_aligned() {
    let services = create_test_services();
    let services = &services;

    std::thread::scope(|scope| {
        let (tx, rx) = std::sync::mpsc::channel();
        scope.spawn(move || {
            for _ in 0..200 {
                let report = services.ingest_document("y.txt", b"gamma delta").unwrap();
                tx.send(report.file_id).unwrap();
            }
        });
        scope.spawn(move || {
            for id in rx.iter().step_by(2) {
                services.remove_document(id).unwrap();
            }
        });
    });

    let indexed = services.index.read().unwrap().document_ids();
    let mut recorded: Vec<i64> = services
        .list_documents()
        .unwrap()
        .into_iter()
        .map(|doc| doc.id)
        .collect();
    recorded.sort_unstable();
    assert_eq!(indexed, recorded);
    assert_eq!(indexed.len(), 100);
}
