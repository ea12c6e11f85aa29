mod common;

use std::sync::{Arc, Mutex};

use serde_json::json;

use common::*;
use office_jobs::{DocumentProcessingHandler, Job, JobContext, JobHandler, JobResult, JobType};

fn handler(h: &Harness) -> DocumentProcessingHandler {
    DocumentProcessingHandler::new(h.repository.clone(), Arc::new(h.workflow()))
}

fn harness(annotator: StubAnnotator) -> Harness {
    Harness::new(
        StubExtractor::ok("这是文档的内容"),
        StubExtractor::ok("unused"),
        annotator,
        InMemoryRepository::with(&[test_document()]),
        StubKnowledgeBase::ok(),
    )
}

fn job_for(document_id: &str) -> Job {
    Job::new(
        JobType::DocumentProcessing,
        Some(json!({ "document_id": document_id })),
    )
}

#[tokio::test]
async fn test_handler_processes_document() {
    let h = harness(StubAnnotator::new("技术文档", &["技术", "测试"], "这是文档的摘要"));
    let progress = Arc::new(Mutex::new(Vec::new()));
    let seen = progress.clone();
    let ctx = JobContext::new(job_for("doc-001")).with_progress_callback(move |percent, _| {
        seen.lock().unwrap().push(percent);
    });

    let result = handler(&h).execute(ctx).await;

    match result {
        JobResult::Success(Some(value)) => {
            assert_eq!(value["document_id"], "doc-001");
            assert_eq!(value["category"], "技术文档");
            assert_eq!(value["tag_count"], 2);
            assert_eq!(value["indexed"], true);
            assert_eq!(value["notified"], true);
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(*progress.lock().unwrap(), vec![10, 20, 100]);
    assert_eq!(h.repository.get("doc-001").unwrap().description, "这是文档的摘要");
}

#[tokio::test]
async fn test_handler_requires_document_id() {
    let h = harness(StubAnnotator::new("c", &[], "s"));
    let ctx = JobContext::new(Job::new(JobType::DocumentProcessing, Some(json!({}))));

    match handler(&h).execute(ctx).await {
        JobResult::Failed(message) => assert_eq!(message, "Missing document_id in job payload"),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_handler_unknown_document_is_not_retried() {
    let h = harness(StubAnnotator::new("c", &[], "s"));

    match handler(&h).execute(JobContext::new(job_for("doc-404"))).await {
        JobResult::Failed(message) => {
            assert!(message.starts_with("Failed to load document doc-404"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(h.annotator.seen().is_empty());
}

#[tokio::test]
async fn test_handler_reports_workflow_failure() {
    let h = harness(StubAnnotator::new("c", &[], "s").failing_tags("quota exceeded"));

    match handler(&h).execute(JobContext::new(job_for("doc-001"))).await {
        JobResult::Failed(message) => assert_eq!(message, "failed to process document"),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(h.repository.saves(), 0);
}
