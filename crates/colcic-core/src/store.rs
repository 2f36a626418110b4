//! In-memory reference implementations of the Datastore and AuthProvider
//! seams. Used by tests and the operator CLI; the production deployment
//! puts the relational database behind the same traits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::traits::{AuthProvider, Datastore};
use crate::types::{DocumentChunk, FaqEntry, QuestionSubmission, StoredQuestion};

#[derive(Default)]
struct StoreInner {
    faq: Vec<FaqEntry>,
    chunks: Vec<DocumentChunk>,
    questions: Vec<StoredQuestion>,
}

/// Thread-safe in-memory datastore over read-mostly snapshots.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
    next_question_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faq(self, faq: Vec<FaqEntry>) -> Self {
        self.inner.write().expect("store lock poisoned").faq = faq;
        self
    }

    pub fn with_chunks(self, chunks: Vec<DocumentChunk>) -> Self {
        self.inner.write().expect("store lock poisoned").chunks = chunks;
        self
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn faq_entries(&self) -> anyhow::Result<Vec<FaqEntry>> {
        Ok(self.inner.read().expect("store lock poisoned").faq.clone())
    }

    async fn document_chunks(&self) -> anyhow::Result<Vec<DocumentChunk>> {
        Ok(self.inner.read().expect("store lock poisoned").chunks.clone())
    }

    async fn insert_chunk(&self, chunk: DocumentChunk) -> anyhow::Result<()> {
        self.inner.write().expect("store lock poisoned").chunks.push(chunk);
        Ok(())
    }

    async fn document_titles(&self) -> anyhow::Result<Vec<String>> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut titles: Vec<String> = Vec::new();
        for c in &inner.chunks {
            if !titles.contains(&c.title) {
                titles.push(c.title.clone());
            }
        }
        Ok(titles)
    }

    async fn insert_question(&self, submission: QuestionSubmission) -> anyhow::Result<u64> {
        let id = self.next_question_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner
            .write()
            .expect("store lock poisoned")
            .questions
            .push(StoredQuestion { id, submission });
        Ok(id)
    }

    async fn list_questions(&self) -> anyhow::Result<Vec<StoredQuestion>> {
        Ok(self.inner.read().expect("store lock poisoned").questions.clone())
    }

    async fn delete_question(&self, id: u64) -> anyhow::Result<()> {
        self.inner
            .write()
            .expect("store lock poisoned")
            .questions
            .retain(|q| q.id != id);
        Ok(())
    }
}

/// In-memory AuthProvider with opaque sequential session tokens.
/// Credential pairs are configured up front; hashing stays behind the
/// production implementation of the same trait.
pub struct MemoryAuth {
    users: Vec<(String, String)>,
    sessions: RwLock<HashMap<String, String>>,
    counter: AtomicU64,
}

impl MemoryAuth {
    pub fn new(users: Vec<(String, String)>) -> Self {
        Self { users, sessions: RwLock::new(HashMap::new()), counter: AtomicU64::new(0) }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn verify(&self, identity: &str, secret: &str) -> anyhow::Result<bool> {
        Ok(self.users.iter().any(|(u, s)| u == identity && s == secret))
    }

    async fn create_session(&self, identity: &str) -> anyhow::Result<String> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let token = format!("sess-{n}");
        self.sessions
            .write()
            .expect("session lock poisoned")
            .insert(token.clone(), identity.to_string());
        Ok(token)
    }

    async fn session_identity(&self, token: &str) -> anyhow::Result<Option<String>> {
        Ok(self
            .sessions
            .read()
            .expect("session lock poisoned")
            .get(token)
            .cloned())
    }

    async fn destroy_session(&self, token: &str) -> anyhow::Result<()> {
        self.sessions
            .write()
            .expect("session lock poisoned")
            .remove(token);
        Ok(())
    }
}
