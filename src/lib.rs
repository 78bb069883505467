pub mod classify;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;
pub mod tagger;

pub use classify::{classify_token, classify_tokens, extract_person, is_valid_word, resolve};
pub use io::{read_records_file, write_results_file, CorpusReport, RecordConfig, RecordSet};
pub use models::{
    ClassifiedToken, CoarseTag, Document, DocumentOutcome, Morphology, Person, SourceRecord, Token,
};
pub use pipeline::{classify_document, process_document, run_pipeline, PipelineConfig};
pub use stages::{execute_stage3, Stage3Config};
pub use tagger::{HttpTagger, PretaggedTagger, TagError, Tagger, TaggerConfig};
