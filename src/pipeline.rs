//! End-to-end extraction pipelines over an annotation source.
//!
//! The core never tokenizes or parses text itself; an [`AnnotationSource`]
//! supplies the parsed [`Annotation`] for a given text (typically a closure
//! over an upstream parser, or [`parse_document`] output in tests). Both
//! pipelines implement [`TextExtractor`], so either can be wrapped in
//! [`Cached`](crate::cache::Cached).

use std::time::Instant;

use crate::annotation::Annotation;
use crate::cache::TextExtractor;
use crate::conll::parse_document;
use crate::error::Result;
use crate::segment::{BoundaryClassifier, Clause, ClauseSegmenter};
use crate::srl::{ArgumentLocator, PredicateArgumentExtractor, PredicateArguments, PredicateLocator};

/// Supplies the parsed annotation for a text.
pub trait AnnotationSource {
    /// Produce the parsed document for `text`.
    fn annotate(&mut self, text: &str) -> Result<Annotation>;
}

impl<F> AnnotationSource for F
where
    F: FnMut(&str) -> Result<Annotation>,
{
    fn annotate(&mut self, text: &str) -> Result<Annotation> {
        self(text)
    }
}

/// Clause extraction: annotate, then segment.
pub struct ClauseExtraction<S, C> {
    source: S,
    segmenter: ClauseSegmenter<C>,
}

impl<S, C> ClauseExtraction<S, C>
where
    S: AnnotationSource,
    C: BoundaryClassifier,
{
    /// Compose an annotation source with a segmenter.
    pub fn new(source: S, segmenter: ClauseSegmenter<C>) -> Self {
        Self { source, segmenter }
    }
}

impl<S, C> TextExtractor for ClauseExtraction<S, C>
where
    S: AnnotationSource,
    C: BoundaryClassifier,
{
    type Output = Vec<Clause>;

    fn extract(&mut self, text: &str) -> Result<Vec<Clause>> {
        let started = Instant::now();
        let annotation = self.source.annotate(text)?;
        let clauses = self.segmenter.segment(&annotation)?;
        log::debug!(
            "extracted {} clauses from document {} in {:?}",
            clauses.len(),
            annotation.doc_id(),
            started.elapsed()
        );
        Ok(clauses)
    }

    fn name(&self) -> &str {
        "clause-extraction"
    }
}

/// Predicate-argument extraction: annotate, then locate and describe.
pub struct PredicateArgumentExtraction<S, P, A> {
    source: S,
    extractor: PredicateArgumentExtractor<P, A>,
}

impl<S, P, A> PredicateArgumentExtraction<S, P, A>
where
    S: AnnotationSource,
    P: PredicateLocator,
    A: ArgumentLocator,
{
    /// Compose an annotation source with a predicate-argument extractor.
    pub fn new(source: S, extractor: PredicateArgumentExtractor<P, A>) -> Self {
        Self { source, extractor }
    }
}

impl<S, P, A> TextExtractor for PredicateArgumentExtraction<S, P, A>
where
    S: AnnotationSource,
    P: PredicateLocator,
    A: ArgumentLocator,
{
    type Output = Vec<PredicateArguments>;

    fn extract(&mut self, text: &str) -> Result<Vec<PredicateArguments>> {
        let started = Instant::now();
        let annotation = self.source.annotate(text)?;
        let pairs = self.extractor.extract(&annotation);
        log::debug!(
            "extracted {} predicate-argument pairs from document {} in {:?}",
            pairs.len(),
            annotation.doc_id(),
            started.elapsed()
        );
        Ok(pairs)
    }

    fn name(&self) -> &str {
        "predicate-arguments"
    }
}

/// Annotation source that parses the text itself as a CoNLL document.
///
/// Useful when the upstream parser output travels as CoNLL text rather
/// than as in-process structures.
pub fn conll_source() -> impl FnMut(&str) -> Result<Annotation> {
    |text: &str| parse_document(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{DependencyEdge, Sentence, Token};
    use crate::cache::{CachePolicy, Cached};
    use crate::segment::SentenceStartClassifier;

    fn fixture() -> Annotation {
        let sentence = Sentence::new(
            vec![
                Token::new("Мама", "мама", "NOUN", 0, 8).with_feat("Case", "Nom"),
                Token::new("мыла", "мыть", "VERB", 9, 17),
                Token::new("раму", "рама", "NOUN", 18, 26).with_feat("Case", "Acc"),
                Token::new(".", ".", "PUNCT", 26, 27),
            ],
            vec![
                DependencyEdge::to_parent(1, "nsubj"),
                DependencyEdge::root("root"),
                DependencyEdge::to_parent(1, "obj"),
                DependencyEdge::to_parent(1, "punct"),
            ],
        )
        .unwrap();
        Annotation::new("doc", "Мама мыла раму.", vec![sentence])
    }

    #[test]
    fn clause_pipeline_runs_source_then_segmenter() {
        let mut pipeline = ClauseExtraction::new(
            |_: &str| Ok(fixture()),
            ClauseSegmenter::new(SentenceStartClassifier),
        );
        let clauses = pipeline.extract("Мама мыла раму.").unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, "Мама мыла раму.");
    }

    #[test]
    fn predicate_pipeline_finds_both_arguments() {
        let mut pipeline = PredicateArgumentExtraction::new(
            |_: &str| Ok(fixture()),
            PredicateArgumentExtractor::new(),
        );
        let pairs = pipeline.extract("Мама мыла раму.").unwrap();
        assert_eq!(pairs.len(), 1);
        let texts: Vec<&str> = pairs[0]
            .arguments
            .iter()
            .map(|a| a.descriptor.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Мама", "раму"]);
    }

    #[test]
    fn pipelines_compose_with_caching() {
        let mut calls = 0usize;
        {
            let source = |_: &str| {
                calls += 1;
                Ok(fixture())
            };
            let pipeline =
                ClauseExtraction::new(source, ClauseSegmenter::new(SentenceStartClassifier));
            let mut cached = Cached::with_policy(pipeline, CachePolicy::Memoized);
            cached.extract("Мама мыла раму.").unwrap();
            cached.extract("Мама мыла раму.").unwrap();
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn source_failure_propagates() {
        let mut pipeline = ClauseExtraction::new(
            |_: &str| Err(crate::error::Error::invalid_input("no parser attached")),
            ClauseSegmenter::new(SentenceStartClassifier),
        );
        assert!(pipeline.extract("текст").is_err());
    }

    #[test]
    fn conll_source_round_trips_the_fixture() {
        let conll = crate::conll::write_document(&fixture());
        let mut pipeline = ClauseExtraction::new(
            conll_source(),
            ClauseSegmenter::new(SentenceStartClassifier),
        );
        let clauses = pipeline.extract(&conll).unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].text, "Мама мыла раму .");
    }
}
