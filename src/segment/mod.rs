//! Clause segmentation: classify clause-start tokens, then cut the text.
//!
//! A [`ClauseSegmenter`] derives features for a document, asks its
//! [`BoundaryClassifier`] for one decision per record, maps positive records
//! to document-order token indices and assembles [`Clause`] spans. The
//! classifier is injected at construction; there is no process-wide model
//! state.
//!
//! ```
//! use razbor::annotation::{Annotation, DependencyEdge, Sentence, Token};
//! use razbor::segment::{ClauseSegmenter, SentenceStartClassifier};
//!
//! let sentence = Sentence::new(
//!     vec![
//!         Token::new("Он", "он", "PRON", 0, 4),
//!         Token::new("читал", "читать", "VERB", 5, 15),
//!         Token::new(".", ".", "PUNCT", 15, 16),
//!     ],
//!     vec![
//!         DependencyEdge::to_parent(1, "nsubj"),
//!         DependencyEdge::root("root"),
//!         DependencyEdge::to_parent(1, "punct"),
//!     ],
//! )
//! .unwrap();
//! let doc = Annotation::new("d1", "Он читал.", vec![sentence]);
//!
//! let segmenter = ClauseSegmenter::new(SentenceStartClassifier);
//! let clauses = segmenter.segment(&doc).unwrap();
//! assert_eq!(clauses.len(), 1);
//! assert_eq!(clauses[0].text, "Он читал.");
//! ```

mod assemble;
mod classifier;

pub use assemble::{assemble, Clause, ELEMENTARY_RELATION, UNKNOWN_NUCLEARITY};
pub use classifier::{BoundaryClassifier, FixedClassifier, FnClassifier, SentenceStartClassifier};

use crate::annotation::Annotation;
use crate::error::{Error, Result};
use crate::features::FeatureDeriver;

/// Segments documents into clauses with an injected boundary classifier.
#[derive(Debug, Clone)]
pub struct ClauseSegmenter<C> {
    deriver: FeatureDeriver,
    classifier: C,
}

impl<C: BoundaryClassifier> ClauseSegmenter<C> {
    /// Segmenter with the default feature derivation configuration.
    pub fn new(classifier: C) -> Self {
        Self::with_deriver(classifier, FeatureDeriver::new())
    }

    /// Segmenter deriving features with an explicit configuration.
    pub fn with_deriver(classifier: C, deriver: FeatureDeriver) -> Self {
        Self {
            deriver,
            classifier,
        }
    }

    /// The classifier this segmenter consults.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Segment one document into clauses.
    ///
    /// Fails when the classifier itself fails or returns a decision vector
    /// whose length disagrees with the derived record count.
    pub fn segment(&self, annotation: &Annotation) -> Result<Vec<Clause>> {
        let table = self.deriver.derive(annotation.sentences());
        let decisions = self.classifier.predict(&table)?;
        if decisions.len() != table.len() {
            return Err(Error::classifier(format!(
                "{} returned {} decisions for {} feature records",
                self.classifier.name(),
                decisions.len(),
                table.len()
            )));
        }

        let offsets = annotation.sentence_offsets();
        let boundaries: Vec<usize> = table
            .records()
            .iter()
            .zip(&decisions)
            .filter(|(_, starts_clause)| **starts_clause)
            .map(|(record, _)| offsets[record.sentence_index] + record.token_index)
            .collect();
        log::debug!(
            "document {}: {} boundary tokens out of {} records",
            annotation.doc_id(),
            boundaries.len(),
            table.len()
        );

        let tokens = annotation.flat_tokens();
        Ok(assemble(annotation.text(), &tokens, &boundaries))
    }
}
