//! # Pipeline — Named Stages over Shared Documents
//!
//! The pipeline plays the host role: it creates documents from raw text and
//! runs an ordered list of named components over them. Each component borrows
//! the document mutably, annotates it in place and returns the same borrow, so
//! a document flows through the whole pipeline without ever being copied.
//!
//! The pipeline also owns the token-extension registry. Components declare the
//! custom attributes they intend to write at construction time (see
//! [`ConceptTagger::new`](crate::tagger::ConceptTagger::new)); `make_doc`
//! stamps the registry onto every new document, so documents created before a
//! declaration will reject writes to that attribute.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::doc::Document;
use crate::error::Result;

/// A named processing stage that annotates documents in place.
///
/// Implementors must not retain the borrowed document beyond the call; the
/// returned reference is always the one that was passed in.
pub trait PipelineComponent: Send + Sync {
    /// Identifies this stage when composed into a pipeline.
    fn name(&self) -> &str;

    /// Annotates the document and returns the same borrow.
    fn process<'d>(&self, doc: &'d mut Document) -> Result<&'d mut Document>;
}

/// An ordered pipeline of components plus the token-extension registry.
#[derive(Default)]
pub struct Pipeline {
    token_extensions: HashSet<String>,
    components: Vec<Box<dyn PipelineComponent>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a custom token attribute for all documents created from now
    /// on. Idempotent.
    pub fn register_token_extension(&mut self, name: &str) {
        self.token_extensions.insert(name.to_string());
    }

    /// Tokenizes a text and stamps the declared extensions onto the document.
    pub fn make_doc(&self, text: &str) -> Document {
        let mut doc = Document::new(text);
        for name in &self.token_extensions {
            doc.declare_attr(name);
        }
        doc
    }

    /// Appends a component to the end of the pipeline.
    pub fn add_pipe(&mut self, component: Box<dyn PipelineComponent>) {
        self.components.push(component);
    }

    /// Names of the composed stages, in execution order.
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Creates a document and runs every component over it in order.
    pub fn process(&self, text: &str) -> Result<Document> {
        let mut doc = self.make_doc(text);
        for component in &self.components {
            component.process(&mut doc)?;
        }
        Ok(doc)
    }

    /// Processes a batch of texts in parallel. Each document is still
    /// processed by a single thread; parallelism is across documents only.
    pub fn pipe(&self, texts: &[&str]) -> Result<Vec<Document>> {
        texts.par_iter().map(|text| self.process(text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upcase;

    impl PipelineComponent for Upcase {
        fn name(&self) -> &str {
            "upcase"
        }

        fn process<'d>(&self, doc: &'d mut Document) -> Result<&'d mut Document> {
            for index in 0..doc.tokens.len() {
                let value = doc.tokens[index].text.to_uppercase();
                doc.set_token_attr(index, "upper", &value)?;
            }
            Ok(doc)
        }
    }

    #[test]
    fn test_make_doc_stamps_extensions() {
        let mut pipeline = Pipeline::new();
        pipeline.register_token_extension("upper");

        let doc = pipeline.make_doc("hello");
        assert!(doc.has_attr("upper"));
    }

    #[test]
    fn test_doc_made_before_registration_rejects_writes() {
        let mut pipeline = Pipeline::new();
        let mut early = pipeline.make_doc("hello");

        pipeline.register_token_extension("upper");
        assert!(early.set_token_attr(0, "upper", "HELLO").is_err());
    }

    #[test]
    fn test_process_runs_components_in_order() {
        let mut pipeline = Pipeline::new();
        pipeline.register_token_extension("upper");
        pipeline.add_pipe(Box::new(Upcase));

        let doc = pipeline.process("hello world").unwrap();
        assert_eq!(doc.token_attr(0, "upper"), Some("HELLO"));
        assert_eq!(doc.token_attr(1, "upper"), Some("WORLD"));
        assert_eq!(pipeline.component_names(), vec!["upcase"]);
    }

    #[test]
    fn test_pipe_batch() {
        let mut pipeline = Pipeline::new();
        pipeline.register_token_extension("upper");
        pipeline.add_pipe(Box::new(Upcase));

        let docs = pipeline.pipe(&["one", "two", "three"]).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[2].token_attr(0, "upper"), Some("THREE"));
    }

    #[test]
    fn test_component_error_propagates() {
        // Upcase writes "upper", which was never registered here.
        let mut pipeline = Pipeline::new();
        pipeline.add_pipe(Box::new(Upcase));

        assert!(pipeline.process("hello").is_err());
    }
}
