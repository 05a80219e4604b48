/*!
# IO utilities

Reading of local JSON Lines datasets and writing of the corpus file.
!*/
mod corpus;
pub mod jsonl;

pub use corpus::{with_corpus, CorpusStats, CorpusWriter};
pub use jsonl::JsonlReader;
