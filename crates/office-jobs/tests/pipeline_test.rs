//! Workflow over real file extraction and the LLM annotators.

mod common;

use std::sync::Arc;

use common::*;
use office_inference::mock::MockGenerationBackend;
use office_inference::{LlmClassifier, LlmSummarizer, LlmTagExtractor};
use office_jobs::workflow::TextSource;
use office_jobs::{
    Document, DocumentWorkflow, FailedStage, FileContentExtractor, GenerationBackend,
    ProcessContext,
};

fn annotating_backend() -> MockGenerationBackend {
    MockGenerationBackend::new()
        .with_response_containing("Please classify", "  技术文档\n")
        .with_response_containing("Please extract relevant tags", "```json\n[\"技术\", \"测试\"]\n```")
        .with_response_containing("Please generate a concise summary", "这是文档的摘要")
}

fn workflow(
    storage: &std::path::Path,
    backend: &MockGenerationBackend,
    repository: Arc<InMemoryRepository>,
    knowledge_base: Arc<StubKnowledgeBase>,
    optical: Arc<StubExtractor>,
) -> DocumentWorkflow {
    let backend: Arc<dyn GenerationBackend> = Arc::new(backend.clone());
    DocumentWorkflow::builder()
        .content_extractor(Arc::new(FileContentExtractor::with_defaults(storage, 5)))
        .optical_extractor(optical)
        .classifier(Arc::new(LlmClassifier::new(backend.clone())))
        .tag_extractor(Arc::new(LlmTagExtractor::new(backend.clone())))
        .summarizer(Arc::new(LlmSummarizer::new(backend)))
        .repository(repository)
        .knowledge_base(knowledge_base)
        .build()
        .expect("all collaborators set")
}

#[tokio::test]
async fn test_plain_text_document_end_to_end() {
    let storage = tempfile::tempdir().unwrap();
    std::fs::write(storage.path().join("notes.txt"), "季度技术评审会议纪要").unwrap();

    let doc = Document::new("doc-010", "会议纪要", "notes.txt", "text/plain", "user-007");
    let repository = InMemoryRepository::with(&[doc.clone()]);
    let knowledge_base = StubKnowledgeBase::ok();
    let optical = StubExtractor::ok("unused");
    let backend = annotating_backend();
    let wf = workflow(
        storage.path(),
        &backend,
        repository.clone(),
        knowledge_base.clone(),
        optical.clone(),
    );

    let outcome = wf
        .run(&ProcessContext::for_document(&doc), &doc)
        .await
        .unwrap();

    assert_eq!(outcome.text_source, TextSource::Primary);
    assert_eq!(outcome.document.category, "技术文档");
    assert_eq!(outcome.document.tags, "[\"技术\",\"测试\"]");
    assert_eq!(outcome.document.description, "这是文档的摘要");
    assert_eq!(repository.get("doc-010").unwrap(), outcome.document);
    assert_eq!(optical.calls(), 0);

    let calls = backend.get_calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.user == "user-007"));
    assert!(calls.iter().all(|c| c.query.contains("季度技术评审会议纪要")));
    assert!(calls.iter().all(|c| c.query.contains("Document title: 会议纪要")));

    assert_eq!(knowledge_base.ingested()[0].1, "季度技术评审会议纪要");
}

#[tokio::test]
async fn test_html_document_text_nodes_reach_annotators() {
    let storage = tempfile::tempdir().unwrap();
    std::fs::write(
        storage.path().join("page.html"),
        "<html><body><h1>标题</h1><p>正文内容</p></body></html>",
    )
    .unwrap();

    let doc = Document::new("doc-011", "网页", "page.html", "TEXT/HTML", "user-007");
    let repository = InMemoryRepository::with(&[doc.clone()]);
    let backend = annotating_backend();
    let wf = workflow(
        storage.path(),
        &backend,
        repository,
        StubKnowledgeBase::ok(),
        StubExtractor::ok("unused"),
    );

    wf.process_document(&ProcessContext::for_document(&doc), &doc)
        .await
        .unwrap();

    let first = &backend.get_calls()[0];
    assert!(first.query.contains("标题"));
    assert!(first.query.contains("正文内容"));
    assert!(!first.query.contains("<p>"));
}

#[tokio::test]
async fn test_missing_file_falls_back_to_optical() {
    let storage = tempfile::tempdir().unwrap();
    let doc = Document::new("doc-012", "扫描件", "missing.txt", "text/plain", "user-007");
    let repository = InMemoryRepository::with(&[doc.clone()]);
    let optical = StubExtractor::ok("扫描识别的文字");
    let backend = annotating_backend();
    let wf = workflow(
        storage.path(),
        &backend,
        repository,
        StubKnowledgeBase::ok(),
        optical.clone(),
    );

    let outcome = wf
        .run(&ProcessContext::for_document(&doc), &doc)
        .await
        .unwrap();

    assert_eq!(outcome.text_source, TextSource::Optical);
    assert_eq!(optical.calls(), 1);
    assert!(backend
        .get_calls()
        .iter()
        .all(|c| c.query.contains("扫描识别的文字")));
}

#[tokio::test]
async fn test_unparseable_tags_use_fallback() {
    let storage = tempfile::tempdir().unwrap();
    std::fs::write(storage.path().join("a.txt"), "内容").unwrap();

    let doc = Document::new("doc-013", "文档", "a.txt", "text/plain", "user-007");
    let repository = InMemoryRepository::with(&[doc.clone()]);
    let backend = MockGenerationBackend::new()
        .with_response_containing("Please extract relevant tags", "技术, 测试")
        .with_fixed_response("其他");
    let wf = workflow(
        storage.path(),
        &backend,
        repository,
        StubKnowledgeBase::ok(),
        StubExtractor::ok("unused"),
    );

    let updated = wf
        .process_document(&ProcessContext::for_document(&doc), &doc)
        .await
        .unwrap();

    assert_eq!(updated.tags, "[\"document\",\"ai_processed\"]");
}

#[tokio::test]
async fn test_backend_failure_fails_annotation_stage() {
    let storage = tempfile::tempdir().unwrap();
    std::fs::write(storage.path().join("a.txt"), "内容").unwrap();

    let doc = Document::new("doc-014", "文档", "a.txt", "text/plain", "user-007");
    let repository = InMemoryRepository::with(&[doc.clone()]);
    let backend = annotating_backend().with_failure_on("Please generate a concise summary");
    let wf = workflow(
        storage.path(),
        &backend,
        repository.clone(),
        StubKnowledgeBase::ok(),
        StubExtractor::ok("unused"),
    );

    let err = wf
        .process_document(&ProcessContext::for_document(&doc), &doc)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), FailedStage::Annotation);
    assert_eq!(repository.saves(), 0);
}
