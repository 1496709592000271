//! # razbor
//!
//! Clause segmentation and semantic role labeling for dependency-parsed
//! Russian text.
//!
//! - **Feature derivation**: fixed-schema per-token feature tables over
//!   morphology, dependency context and token windows
//! - **Clause segmentation**: boundary classification plus span assembly
//! - **Semantic role labeling**: predicate/argument location and a
//!   declarative JSON rule engine
//!
//! The crate consumes already-parsed annotations (tokens with lemmas, POS
//! tags, morphology and a dependency tree); tokenization, tagging and
//! parsing stay upstream. CoNLL-style text is the interchange format with
//! that upstream.
//!
//! ## Pipeline stages
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | [`FeatureDeriver`] | sentence batch | [`FeatureTable`] (89 columns by default) |
//! | [`ClauseSegmenter`] | document + classifier | [`Clause`] spans |
//! | [`PredicateArgumentExtractor`] | document | predicate-argument pairs |
//! | [`SrlLabeler`] | pairs + rulesets | labeled arguments |
//!
//! ## Quick start
//!
//! ```rust
//! use razbor::prelude::*;
//!
//! let sentence = Sentence::new(
//!     vec![
//!         Token::new("Мама", "мама", "NOUN", 0, 8).with_feat("Case", "Nom"),
//!         Token::new("мыла", "мыть", "VERB", 9, 17),
//!         Token::new("раму", "рама", "NOUN", 18, 26).with_feat("Case", "Acc"),
//!         Token::new(".", ".", "PUNCT", 26, 27),
//!     ],
//!     vec![
//!         DependencyEdge::to_parent(1, "nsubj"),
//!         DependencyEdge::root("root"),
//!         DependencyEdge::to_parent(1, "obj"),
//!         DependencyEdge::to_parent(1, "punct"),
//!     ],
//! )?;
//! let doc = Annotation::new("example", "Мама мыла раму.", vec![sentence]);
//!
//! // Clause segmentation with the sentence-start baseline.
//! let segmenter = ClauseSegmenter::new(SentenceStartClassifier);
//! let clauses = segmenter.segment(&doc)?;
//! assert_eq!(clauses[0].text, "Мама мыла раму.");
//!
//! // Predicate-argument extraction plus rule-based roles.
//! let pairs = PredicateArgumentExtractor::new().extract(&doc);
//! let labeler = SrlLabeler::from_json(
//!     r#"[{
//!         "predicate_rule": {"pattern": {"postag": "VERB"}},
//!         "argument_rules": {
//!             "Agent": [{"pattern": {"case": "Nom"}}],
//!             "Theme": [{"pattern": {"case": "Acc"}}]
//!         }
//!     }]"#,
//! )?;
//! let labeled = labeler.label_all(&pairs);
//! assert_eq!(labeled[0].arguments[0].role.as_deref(), Some("Agent"));
//! assert_eq!(labeled[0].arguments[1].role.as_deref(), Some("Theme"));
//! # Ok::<(), razbor::Error>(())
//! ```
//!
//! ## Feature flags
//!
//! ```toml
//! [dependencies]
//! razbor = "0.1"                                        # parallel derivation on
//! razbor = { version = "0.1", default-features = false } # sequential only
//! ```
//!
//! The `parallel` feature (default) derives feature tables over balanced
//! sentence partitions with rayon; outputs are identical to the sequential
//! path.
//!
//! ## Design notes
//!
//! - **Explicit handles**: classifiers, locators and rulesets are values
//!   passed into constructors; there is no process-wide model state.
//! - **Byte offsets**: every span in the crate is a half-open byte range
//!   into the document text.
//! - **Tolerant derivation**: malformed dependency heads skip the affected
//!   record with a logged warning instead of aborting the batch.

#![warn(missing_docs)]

pub mod annotation;
pub mod cache;
pub mod conll;
mod error;
pub mod features;
pub mod pipeline;
pub mod segment;
pub mod srl;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use razbor::prelude::*;
    //!
    //! let deriver = FeatureDeriver::new();
    //! assert_eq!(deriver.schema().len(), 89);
    //! ```
    pub use crate::annotation::{Annotation, DependencyEdge, Sentence, Token};
    pub use crate::cache::{CachePolicy, Cached, TextExtractor};
    pub use crate::error::{Error, Result};
    pub use crate::features::{DeriverConfig, FeatureDeriver, FeatureTable};
    pub use crate::segment::{
        BoundaryClassifier, Clause, ClauseSegmenter, FixedClassifier, SentenceStartClassifier,
    };
    pub use crate::srl::{
        PredicateArgumentExtractor, PredicateArguments, Rule, Ruleset, SrlLabeler, WordDescriptor,
    };
}

// Re-exports
pub use annotation::{Annotation, DependencyEdge, Sentence, Token};
pub use cache::{CachePolicy, Cached, TextExtractor};
pub use conll::{parse_document, write_document};
pub use error::{Error, Result};
pub use features::{DeriverConfig, FeatureDeriver, FeatureSchema, FeatureTable, DEFAULT_SCHEMA};
pub use pipeline::{AnnotationSource, ClauseExtraction, PredicateArgumentExtraction};
pub use segment::{
    BoundaryClassifier, Clause, ClauseSegmenter, FixedClassifier, FnClassifier,
    SentenceStartClassifier,
};
pub use srl::{
    LabeledArgument, LabeledPredicateArguments, PredicateArgumentExtractor, PredicateArguments,
    Rule, Ruleset, SrlLabeler, WordDescriptor,
};
