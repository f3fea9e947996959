//! # Concept Tagger
//!
//! A thin pipeline stage that copies matcher results onto token attributes.
//! All matching lives behind the [`SpanMatcher`] seam; the tagger only forwards
//! rules to it, asks it for spans, and writes each span's label onto every
//! token the span covers under a configurable custom attribute.
//!
//! ## Overlap policy
//!
//! When two returned spans cover the same token, the token ends up with the
//! label of whichever span the matcher returned last. The matcher's return
//! order is an implementation detail, so this is an explicit last-write-wins
//! contract with unspecified precedence — the tagger does not re-resolve
//! overlaps and callers must not rely on which label wins.

use tracing::debug;

use crate::doc::Document;
use crate::error::Result;
use crate::matcher::{SpanMatcher, TargetMatcher};
use crate::pipeline::{Pipeline, PipelineComponent};
use crate::rule::TargetRule;

/// Attribute name used when none is configured.
pub const DEFAULT_ATTR: &str = "concept_tag";

/// Pipeline stage that tags tokens with the label of the rule span covering
/// them.
///
/// Construction registers the target attribute on the pipeline and builds an
/// internal [`TargetMatcher`] configured to keep its spans out of the
/// document's entity layer; the tagger's results live only in the custom
/// attribute.
pub struct ConceptTagger {
    attr_name: String,
    matcher: Box<dyn SpanMatcher>,
    rules: Vec<TargetRule>,
}

impl ConceptTagger {
    /// Name of this stage when composed into a pipeline.
    pub const NAME: &'static str = "concept_tagger";

    /// A tagger writing to the default `concept_tag` attribute.
    pub fn new(pipeline: &mut Pipeline) -> Self {
        Self::with_attr(pipeline, DEFAULT_ATTR)
    }

    /// A tagger writing to a custom attribute name.
    pub fn with_attr(pipeline: &mut Pipeline, attr_name: &str) -> Self {
        Self::with_matcher(pipeline, attr_name, Box::new(TargetMatcher::new(false)))
    }

    /// A tagger backed by an injected matcher instead of the built-in one.
    pub fn with_matcher(
        pipeline: &mut Pipeline,
        attr_name: &str,
        matcher: Box<dyn SpanMatcher>,
    ) -> Self {
        pipeline.register_token_extension(attr_name);
        Self {
            attr_name: attr_name.to_string(),
            matcher,
            rules: Vec::new(),
        }
    }

    /// The attribute name labels are written under.
    pub fn attr_name(&self) -> &str {
        &self.attr_name
    }

    /// Every rule added so far, in arrival order. Mirrors exactly what has
    /// been forwarded to the matcher; kept for inspection and debugging.
    pub fn rules(&self) -> &[TargetRule] {
        &self.rules
    }

    /// Registers rules with the matcher and records them in the registry.
    ///
    /// The whole slice is forwarded to the matcher first; a malformed rule
    /// (empty label, uncompilable pattern) fails there and nothing is appended
    /// to the registry. No deduplication: adding the same rule twice makes it
    /// match and be stored twice.
    pub fn add(&mut self, rules: &[TargetRule]) -> Result<()> {
        self.matcher.register_rules(rules)?;
        for rule in rules {
            self.rules.push(rule.clone());
        }
        debug!(added = rules.len(), total = self.rules.len(), "registered rules");
        Ok(())
    }

    /// Tags the document in place and returns the same borrow.
    ///
    /// For every span the matcher finds, every covered token gets the span's
    /// label under `attr_name`. The entity layer is never touched. An
    /// undeclared attribute (document created before this tagger was
    /// constructed) propagates as an error from the write.
    pub fn invoke<'d>(&self, doc: &'d mut Document) -> Result<&'d mut Document> {
        let spans = self.matcher.find_spans(doc);
        for span in &spans {
            for index in span.token_range() {
                doc.set_token_attr(index, &self.attr_name, &span.label)?;
            }
        }
        Ok(doc)
    }
}

impl PipelineComponent for ConceptTagger {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process<'d>(&self, doc: &'d mut Document) -> Result<&'d mut Document> {
        self.invoke(doc)
    }
}
