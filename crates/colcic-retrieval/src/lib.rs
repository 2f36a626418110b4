//! colcic-retrieval
//!
//! Document side of the resolution pipeline: fixed-size chunking, cosine
//! ranking over stored embeddings, the lexical substring fallback, and
//! the upload ingestion flow.

pub mod chunker;
pub mod ingest;
pub mod rank;
pub mod similarity;

pub use chunker::split_text;
pub use ingest::{ingest_file, ingest_text, IngestReport, PlainTextIngester};
pub use rank::{rank_by_embedding, rank_by_substring, ScoredChunk};
pub use similarity::cosine;
