//! Request/response service layer over the collaborator seams. This is
//! the contract the HTTP front end consumes; routing, cookies and
//! multipart handling stay outside.

use std::path::Path;
use std::sync::Arc;

use colcic_core::config::PipelineConfig;
use colcic_core::error::{Error, Result};
use colcic_core::traits::{AuthProvider, Datastore, DocumentIngester, InferenceProvider};
use colcic_core::types::{
    ChatRequest, Credentials, QuestionSubmission, Resolution, SourceTag, StoredQuestion,
};
use colcic_retrieval::{ingest_file, IngestReport};

use crate::{messages, ResolutionPipeline};

pub struct ChatService {
    pipeline: ResolutionPipeline,
    store: Arc<dyn Datastore>,
    provider: Arc<dyn InferenceProvider>,
    auth: Arc<dyn AuthProvider>,
    config: PipelineConfig,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn Datastore>,
        provider: Arc<dyn InferenceProvider>,
        auth: Arc<dyn AuthProvider>,
        config: PipelineConfig,
    ) -> Self {
        let pipeline =
            ResolutionPipeline::new(Arc::clone(&store), Arc::clone(&provider), config.clone());
        Self { pipeline, store, provider, auth, config }
    }

    /// One chat exchange. An empty message is rejected before the
    /// pipeline runs; an unexpected pipeline error degrades to the
    /// fixed instability reply tagged `ERRO`, which the HTTP layer maps
    /// to a 500.
    pub async fn chat(&self, request: &ChatRequest) -> Result<Resolution> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        match self.pipeline.resolve(message).await {
            Ok(resolution) => Ok(resolution),
            Err(e) => {
                tracing::error!(error = %e, "resolution pipeline failed");
                Ok(Resolution::new(messages::SERVER_ERROR_REPLY, SourceTag::Error))
            }
        }
    }

    /// Intake form: persists a student question. All fields required.
    pub async fn submit_question(&self, submission: QuestionSubmission) -> Result<u64> {
        if !submission.is_complete() {
            return Err(Error::IncompleteSubmission(
                "nome, matricula, email e pergunta são obrigatórios".to_string(),
            ));
        }
        self.store
            .insert_question(submission)
            .await
            .map_err(|e| Error::Operation(e.to_string()))
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let ok = self
            .auth
            .verify(&credentials.email, &credentials.password)
            .await
            .map_err(|e| Error::Operation(e.to_string()))?;
        if !ok {
            return Err(Error::Unauthorized);
        }
        self.auth
            .create_session(&credentials.email)
            .await
            .map_err(|e| Error::Operation(e.to_string()))
    }

    pub async fn logout(&self, token: &str) -> Result<()> {
        self.auth
            .destroy_session(token)
            .await
            .map_err(|e| Error::Operation(e.to_string()))
    }

    pub async fn is_authenticated(&self, token: &str) -> Result<bool> {
        Ok(self.session_identity(token).await?.is_some())
    }

    pub async fn admin_list_questions(&self, token: &str) -> Result<Vec<StoredQuestion>> {
        self.require_session(token).await?;
        self.store
            .list_questions()
            .await
            .map_err(|e| Error::Operation(e.to_string()))
    }

    pub async fn admin_delete_question(&self, token: &str, id: u64) -> Result<()> {
        self.require_session(token).await?;
        self.store
            .delete_question(id)
            .await
            .map_err(|e| Error::Operation(e.to_string()))
    }

    pub async fn admin_document_titles(&self, token: &str) -> Result<Vec<String>> {
        self.require_session(token).await?;
        self.store
            .document_titles()
            .await
            .map_err(|e| Error::Operation(e.to_string()))
    }

    /// Session-gated upload ingestion. The uploaded file at `path` is
    /// removed on success and failure alike.
    pub async fn upload_document(
        &self,
        token: &str,
        title: &str,
        path: &Path,
        ingester: &dyn DocumentIngester,
    ) -> Result<IngestReport> {
        self.require_session(token).await?;
        ingest_file(
            path,
            title,
            ingester,
            self.provider.as_ref(),
            self.store.as_ref(),
            self.config.chunk_size,
        )
        .await
        .map_err(|e| Error::Operation(e.to_string()))
    }

    async fn require_session(&self, token: &str) -> Result<()> {
        match self.session_identity(token).await? {
            Some(_) => Ok(()),
            None => Err(Error::Unauthorized),
        }
    }

    async fn session_identity(&self, token: &str) -> Result<Option<String>> {
        self.auth
            .session_identity(token)
            .await
            .map_err(|e| Error::Operation(e.to_string()))
    }
}
