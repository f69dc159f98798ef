//! # tldw
//!
//! Summarise a web page, PDF or YouTube video with a hosted LLM, optionally
//! read the summary aloud, then grade the summary for grounding against the
//! text it came from.
//!
//! ## Flow
//!
//! - **Classify**: a HEAD probe maps the declared media type to a content type
//! - **Extract**: one extractor per content type turns the URL into text
//! - **Summarise**: one completion call produces a [`SummaryResult`]
//! - **Grade**: a second completion call checks that same result for grounding

pub mod completion;
pub mod config;
pub mod content;
pub mod creativity;
pub mod extract;
pub mod grader;
pub mod input;
pub mod interactive;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod speech;
pub mod summary;
pub mod workflow;

pub use completion::{ChatCompletionsClient, CompletionClient, CompletionError};
pub use config::Config;
pub use content::{ContentClassifier, ContentType, HttpClassifier, SourceDocument};
pub use creativity::{CreativityLevel, Temperature};
pub use extract::{DocumentLoader, ExtractionError, Extractor, ExtractorSet};
pub use grader::{GradeError, GroundingGrader};
pub use pipeline::{SummarizationPipeline, SummarizeError};
pub use prompt::PromptPayload;
pub use speech::{NoSpeech, OpenAiSpeech, SpeechSynthesizer, SynthesisError, Voice};
pub use summary::{BinaryScore, GradingVerdict, SummaryResult};
pub use workflow::{
    builder::WorkflowBuilder, AudioOutcome, InteractionOptions, Report, Stage, Workflow,
    WorkflowError,
};
