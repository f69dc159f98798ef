//! Typed builder for [`Workflow`]: each collaborator slot starts as `()` and
//! `build` is only available once every slot holds a real implementation.

use crate::{
    completion::CompletionClient, content::ContentClassifier, extract::DocumentLoader,
    speech::{NoSpeech, SpeechSynthesizer}, Workflow,
};

pub const DEFAULT_MAX_SOURCE_CHARS: usize = 100_000;

pub struct WorkflowBuilder<C = (), E = (), L = (), S = NoSpeech> {
    classifier: C,
    loader: E,
    completion: L,
    speech: S,
    max_source_chars: usize,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self {
            classifier: (),
            loader: (),
            completion: (),
            speech: NoSpeech,
            max_source_chars: DEFAULT_MAX_SOURCE_CHARS,
        }
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E, L, S> WorkflowBuilder<C, E, L, S> {
    pub fn classifier<C2: ContentClassifier>(self, classifier: C2) -> WorkflowBuilder<C2, E, L, S> {
        WorkflowBuilder {
            classifier,
            loader: self.loader,
            completion: self.completion,
            speech: self.speech,
            max_source_chars: self.max_source_chars,
        }
    }

    pub fn loader<E2: DocumentLoader>(self, loader: E2) -> WorkflowBuilder<C, E2, L, S> {
        WorkflowBuilder {
            classifier: self.classifier,
            loader,
            completion: self.completion,
            speech: self.speech,
            max_source_chars: self.max_source_chars,
        }
    }

    pub fn completion<L2: CompletionClient>(self, completion: L2) -> WorkflowBuilder<C, E, L2, S> {
        WorkflowBuilder {
            classifier: self.classifier,
            loader: self.loader,
            completion,
            speech: self.speech,
            max_source_chars: self.max_source_chars,
        }
    }

    pub fn speech<S2: SpeechSynthesizer>(self, speech: S2) -> WorkflowBuilder<C, E, L, S2> {
        WorkflowBuilder {
            classifier: self.classifier,
            loader: self.loader,
            completion: self.completion,
            speech,
            max_source_chars: self.max_source_chars,
        }
    }

    pub fn max_source_chars(mut self, max_source_chars: usize) -> Self {
        self.max_source_chars = max_source_chars;
        self
    }
}

impl<C, E, L, S> WorkflowBuilder<C, E, L, S>
where
    C: ContentClassifier,
    E: DocumentLoader,
    L: CompletionClient,
    S: SpeechSynthesizer,
{
    pub fn build(self) -> Workflow<C, E, L, S> {
        Workflow {
            classifier: self.classifier,
            loader: self.loader,
            completion: self.completion,
            speech: self.speech,
            max_source_chars: self.max_source_chars,
        }
    }
}
