//! Test doubles for the workflow collaborators.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use office_jobs::{
    Classifier, ContentExtractor, Document, DocumentRepository, DocumentWorkflow,
    DocumentWorkflowBuilder, Error, KnowledgeBase, Notifier, OpticalExtractor, ProcessContext,
    Result, Summarizer, TagExtractor,
};

pub fn test_document() -> Document {
    let mut doc = Document::new("doc-001", "测试文档", "/path/to/test.pdf", "application/pdf", "user-001");
    doc.description = "这是一个测试文档".to_string();
    doc.file_size = 1024;
    doc.team_id = "team-001".to_string();
    doc
}

// ─── Extraction ────────────────────────────────────────────────────────────

/// Extractor returning a fixed outcome. Serves as either extractor kind.
pub struct StubExtractor {
    outcome: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl StubExtractor {
    pub fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn run(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(Error::Extraction)
    }
}

#[async_trait]
impl ContentExtractor for StubExtractor {
    async fn extract_content(&self, _document: &Document) -> Result<String> {
        self.run()
    }
}

#[async_trait]
impl OpticalExtractor for StubExtractor {
    async fn extract_optical_content(&self, _document: &Document) -> Result<String> {
        self.run()
    }
}

// ─── Annotation ────────────────────────────────────────────────────────────

/// Classifier, tag extractor and summarizer in one, recording the text and
/// user each call received.
pub struct StubAnnotator {
    classification: std::result::Result<String, String>,
    tags: std::result::Result<Vec<String>, String>,
    summary: std::result::Result<String, String>,
    delay: Duration,
    seen: Mutex<Vec<(&'static str, String, String)>>,
}

impl StubAnnotator {
    pub fn new(classification: &str, tags: &[&str], summary: &str) -> Self {
        Self {
            classification: Ok(classification.to_string()),
            tags: Ok(tags.iter().map(|t| t.to_string()).collect()),
            summary: Ok(summary.to_string()),
            delay: Duration::ZERO,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_classify(mut self, message: &str) -> Self {
        self.classification = Err(message.to_string());
        self
    }

    pub fn failing_tags(mut self, message: &str) -> Self {
        self.tags = Err(message.to_string());
        self
    }

    pub fn failing_summary(mut self, message: &str) -> Self {
        self.summary = Err(message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// (call, text, user) triples in call order.
    pub fn seen(&self) -> Vec<(&'static str, String, String)> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self, kind: &str) -> usize {
        self.seen().iter().filter(|(k, _, _)| *k == kind).count()
    }

    async fn record(&self, kind: &'static str, ctx: &ProcessContext, text: &str) {
        self.seen
            .lock()
            .unwrap()
            .push((kind, text.to_string(), ctx.user.clone()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl Classifier for StubAnnotator {
    async fn classify(&self, ctx: &ProcessContext, text: &str, _doc: &Document) -> Result<String> {
        self.record("classify", ctx, text).await;
        self.classification.clone().map_err(Error::Inference)
    }
}

#[async_trait]
impl TagExtractor for StubAnnotator {
    async fn extract_tags(
        &self,
        ctx: &ProcessContext,
        text: &str,
        _doc: &Document,
    ) -> Result<Vec<String>> {
        self.record("tags", ctx, text).await;
        self.tags.clone().map_err(Error::Inference)
    }
}

#[async_trait]
impl Summarizer for StubAnnotator {
    async fn summarize(&self, ctx: &ProcessContext, text: &str, _doc: &Document) -> Result<String> {
        self.record("summarize", ctx, text).await;
        self.summary.clone().map_err(Error::Inference)
    }
}

// ─── Persistence ───────────────────────────────────────────────────────────

/// Whole-row in-memory store; each save replaces the row atomically.
#[derive(Default)]
pub struct InMemoryRepository {
    docs: Mutex<HashMap<String, Document>>,
    fail_saves: bool,
    saves: AtomicUsize,
}

impl InMemoryRepository {
    pub fn with(documents: &[Document]) -> Arc<Self> {
        Arc::new(Self {
            docs: Mutex::new(documents.iter().map(|d| (d.id.clone(), d.clone())).collect()),
            ..Self::default()
        })
    }

    pub fn failing_saves(documents: &[Document]) -> Arc<Self> {
        Arc::new(Self {
            docs: Mutex::new(documents.iter().map(|d| (d.id.clone(), d.clone())).collect()),
            fail_saves: true,
            saves: AtomicUsize::new(0),
        })
    }

    pub fn get(&self, id: &str) -> Option<Document> {
        self.docs.lock().unwrap().get(id).cloned()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentRepository for InMemoryRepository {
    async fn fetch(&self, id: &str) -> Result<Document> {
        self.get(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    async fn save(&self, document: &Document) -> Result<()> {
        if self.fail_saves {
            return Err(Error::Internal("connection reset".to_string()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.docs
            .lock()
            .unwrap()
            .insert(document.id.clone(), document.clone());
        Ok(())
    }
}

// ─── Knowledge base / notification ─────────────────────────────────────────

#[derive(Default)]
pub struct StubKnowledgeBase {
    fail: bool,
    ingested: Mutex<Vec<(Document, String)>>,
}

impl StubKnowledgeBase {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn ingested(&self) -> Vec<(Document, String)> {
        self.ingested.lock().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeBase for StubKnowledgeBase {
    async fn ingest(&self, _ctx: &ProcessContext, document: &Document, text: &str) -> Result<()> {
        self.ingested
            .lock()
            .unwrap()
            .push((document.clone(), text.to_string()));
        if self.fail {
            return Err(Error::Request("index unavailable".to_string()));
        }
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _ctx: &ProcessContext, _document: &Document) -> Result<()> {
        Err(Error::Request("mail relay down".to_string()))
    }
}

// ─── Assembly ──────────────────────────────────────────────────────────────

pub struct Harness {
    pub primary: Arc<StubExtractor>,
    pub optical: Arc<StubExtractor>,
    pub annotator: Arc<StubAnnotator>,
    pub repository: Arc<InMemoryRepository>,
    pub knowledge_base: Arc<StubKnowledgeBase>,
}

impl Harness {
    pub fn new(
        primary: Arc<StubExtractor>,
        optical: Arc<StubExtractor>,
        annotator: StubAnnotator,
        repository: Arc<InMemoryRepository>,
        knowledge_base: Arc<StubKnowledgeBase>,
    ) -> Self {
        Self {
            primary,
            optical,
            annotator: Arc::new(annotator),
            repository,
            knowledge_base,
        }
    }

    /// Builder with every collaborator set; callers may override any of them.
    pub fn builder(&self) -> DocumentWorkflowBuilder {
        DocumentWorkflow::builder()
            .content_extractor(self.primary.clone())
            .optical_extractor(self.optical.clone())
            .classifier(self.annotator.clone())
            .tag_extractor(self.annotator.clone())
            .summarizer(self.annotator.clone())
            .repository(self.repository.clone())
            .knowledge_base(self.knowledge_base.clone())
    }

    pub fn workflow(&self) -> DocumentWorkflow {
        self.builder().build().expect("all collaborators set")
    }
}
