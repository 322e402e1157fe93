//! Lexis WordNet Store
//!
//! Loads a WordNet lexical database serialized as JSON Lines and answers
//! lookups over it:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        WordNetLoader                             │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  wordnet.jsonl ──► SynsetSource ─┬─► EagerStore (all decoded)    │
//! │                                  └─► LazyStore  (offsets + LRU)  │
//! │                         │                                        │
//! │                         ├──► LemmaIndex     (eager only)         │
//! │                         └──► RelationIndex  (eager only)         │
//! │                                                                  │
//! │  wordnet_senses.jsonl     ──► SenseIndex                         │
//! │  wordnet_exceptions.jsonl ──► ExceptionIndex                     │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Features
//!
//! - **Two modes**: decode everything up front, or index byte offsets and
//!   decode on demand through a bounded LRU cache
//! - **Tolerant**: missing files load as empty and bad lines are skipped
//! - **Bidirectional relations**: hypernymy and meronymy indexed from both ends
//! - **Shareable**: a loaded [`WordNetLoader`] is `Send + Sync`

pub mod cache;
pub mod config;
pub mod decode;
pub mod error;
pub mod exceptions;
pub mod file_index;
pub mod lemma_index;
pub mod loader;
pub mod model;
pub mod relation_index;
pub mod sense_index;
pub mod store;


pub use cache::LruCache;
pub use config::{default_data_path, LoaderConfig, DEFAULT_CACHE_SIZE};
pub use error::{DecodeError, LexisError, Result};
pub use exceptions::{ExceptionIndex, ExceptionMap};
pub use lemma_index::{LemmaEntry, LemmaIndex};
pub use loader::{load_wordnet, LoadReport, WordNetLoader};
pub use model::{
    Category, ExceptionEntry, Frame, Pointer, PointerSymbol, Sense, Synset, SynsetId, Word,
};
pub use relation_index::{Direction, Relation, RelationFamily, RelationIndex};
pub use sense_index::SenseIndex;
pub use store::{EagerStore, LazyStore, SynsetSource};
