//! colcic-text
//!
//! Lexical side of the resolution pipeline: text canonicalization, keyword
//! intent dispatch and FAQ matching. See the `normalize`, `intent` and
//! `faq` modules.

pub mod faq;
pub mod intent;
pub mod normalize;
pub mod score;

pub use faq::{match_exact, match_fuzzy, match_intent};
pub use intent::{IntentDef, IntentDetector};
pub use normalize::{extract_keyword, normalize};
pub use score::text_overlap;
