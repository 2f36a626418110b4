use colcic_core::config::PipelineConfig;
use colcic_core::store::{MemoryAuth, MemoryStore};
use colcic_core::traits::{AuthProvider, Datastore};
use colcic_core::types::{
    DocumentChunk, FaqEntry, QuestionSubmission, Resolution, SourceTag,
};

#[test]
fn source_tags_serialize_to_wire_names() {
    let cases = [
        (SourceTag::Faq, "\"FAQ\""),
        (SourceTag::Rag, "\"RAG\""),
        (SourceTag::RagFallback, "\"RAG_FALLBACK\""),
        (SourceTag::WebOfficial, "\"WEB_OFICIAL\""),
        (SourceTag::WebDefault, "\"WEB_PADRAO\""),
        (SourceTag::Ai, "\"IA\""),
        (SourceTag::Default, "\"BASE_OFICIAL\""),
        (SourceTag::Error, "\"ERRO\""),
    ];
    for (tag, wire) in cases {
        assert_eq!(serde_json::to_string(&tag).expect("serialize"), wire);
    }
}

#[test]
fn resolution_uses_fonte_field_on_the_wire() {
    let r = Resolution::new("ok", SourceTag::Faq);
    let json = serde_json::to_string(&r).expect("serialize");
    assert!(json.contains("\"fonte\":\"FAQ\""), "got {json}");
    assert!(json.contains("\"reply\":\"ok\""));
}

#[test]
fn pipeline_config_defaults_match_observed_revision() {
    let cfg = PipelineConfig::default();
    assert_eq!(cfg.chunk_size, 500);
    assert!((cfg.faq_min_score - 0.5).abs() < f32::EPSILON);
    assert!((cfg.rag_min_score - 0.45).abs() < f32::EPSILON);
    assert_eq!(cfg.top_k, 3);
    assert_eq!(cfg.context_char_budget, 1200);
    assert_eq!(cfg.lexical_limit, 3);
    assert!(cfg.allowed_domains.iter().any(|d| d == "uesc.br"));
}

#[test]
fn submission_requires_all_fields() {
    let full = QuestionSubmission {
        name: "Ana".into(),
        enrollment: "2021001".into(),
        email: "ana@uesc.br".into(),
        question: "Como trancar o semestre?".into(),
    };
    assert!(full.is_complete());

    let mut missing = full.clone();
    missing.enrollment = "  ".into();
    assert!(!missing.is_complete());
}

#[tokio::test]
async fn memory_store_question_roundtrip() {
    let store = MemoryStore::new();
    let id = store
        .insert_question(QuestionSubmission {
            name: "Ana".into(),
            enrollment: "2021001".into(),
            email: "ana@uesc.br".into(),
            question: "Qual o prazo de matricula?".into(),
        })
        .await
        .expect("insert");

    let listed = store.list_questions().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);

    store.delete_question(id).await.expect("delete");
    assert!(store.list_questions().await.expect("list").is_empty());
}

#[tokio::test]
async fn memory_store_distinct_titles() {
    let store = MemoryStore::new().with_chunks(vec![
        DocumentChunk { title: "regimento.pdf".into(), text: "a".into(), embedding: None },
        DocumentChunk { title: "regimento.pdf".into(), text: "b".into(), embedding: None },
        DocumentChunk { title: "estatuto.pdf".into(), text: "c".into(), embedding: None },
    ]);
    let titles = store.document_titles().await.expect("titles");
    assert_eq!(titles, vec!["regimento.pdf".to_string(), "estatuto.pdf".to_string()]);
}

#[tokio::test]
async fn auth_session_lifecycle() {
    let auth = MemoryAuth::new(vec![("admin@uesc.br".into(), "segredo".into())]);
    assert!(auth.verify("admin@uesc.br", "segredo").await.expect("verify"));
    assert!(!auth.verify("admin@uesc.br", "errado").await.expect("verify"));

    let token = auth.create_session("admin@uesc.br").await.expect("create");
    assert_eq!(
        auth.session_identity(&token).await.expect("check").as_deref(),
        Some("admin@uesc.br")
    );

    auth.destroy_session(&token).await.expect("destroy");
    assert!(auth.session_identity(&token).await.expect("check").is_none());
}

#[test]
fn faq_entry_uses_portuguese_wire_fields() {
    let e: FaqEntry =
        serde_json::from_str(r#"{"pergunta":"o que e o consu","resposta":"X"}"#).expect("parse");
    assert_eq!(e.question, "o que e o consu");
    assert_eq!(e.answer, "X");
}
