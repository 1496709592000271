//! Semantic role labeling: locate predicates and arguments, describe them,
//! match declarative rules.
//!
//! The pipeline is locator → descriptor → rule engine. Locators walk one
//! sentence's dependency tree and return token indices; descriptors flatten
//! the chosen tokens (with preposition detection) for matching; the
//! [`SrlLabeler`] applies an ordered ruleset list to every
//! predicate-argument pair. All stages are pure, synchronous functions over
//! the in-memory annotation.
//!
//! ```
//! use razbor::annotation::{Annotation, DependencyEdge, Sentence, Token};
//! use razbor::srl::PredicateArgumentExtractor;
//!
//! let sentence = Sentence::new(
//!     vec![
//!         Token::new("Папа", "папа", "NOUN", 0, 8).with_feat("Case", "Nom"),
//!         Token::new("спал", "спать", "VERB", 9, 17),
//!     ],
//!     vec![
//!         DependencyEdge::to_parent(1, "nsubj"),
//!         DependencyEdge::root("root"),
//!     ],
//! )
//! .unwrap();
//! let doc = Annotation::new("d1", "Папа спал", vec![sentence]);
//!
//! let pairs = PredicateArgumentExtractor::new().extract(&doc);
//! assert_eq!(pairs.len(), 1);
//! assert_eq!(pairs[0].predicate.lemma, "спать");
//! assert_eq!(pairs[0].arguments[0].descriptor.attr("case"), Some("Nom"));
//! ```

mod descriptor;
mod labeler;
mod locator;
mod rules;

pub use descriptor::{
    find_preposition, Argument, LabeledArgument, LabeledPredicateArguments, PredicateArguments,
    WordDescriptor, DEFAULT_PREPOSITION_RADIUS,
};
pub use labeler::SrlLabeler;
pub use locator::{
    ArgumentLocator, DependentArgumentLocator, PosPredicateLocator, PredicateLocator,
};
pub use rules::{PatternValue, RoleRules, Rule, Ruleset};

use crate::annotation::Annotation;

/// Extracts predicate-argument pairs from every sentence of a document.
///
/// Locators are injected at construction; results concatenate in document
/// order.
#[derive(Debug, Clone)]
pub struct PredicateArgumentExtractor<P = PosPredicateLocator, A = DependentArgumentLocator> {
    predicates: P,
    arguments: A,
    preposition_radius: usize,
}

impl PredicateArgumentExtractor {
    /// Extractor with the default locators (verbal predicates, nominal
    /// dependents) and preposition radius.
    #[must_use]
    pub fn new() -> Self {
        Self::with_locators(PosPredicateLocator::new(), DependentArgumentLocator::new())
    }
}

impl Default for PredicateArgumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PredicateLocator, A: ArgumentLocator> PredicateArgumentExtractor<P, A> {
    /// Extractor with explicit locators.
    #[must_use]
    pub fn with_locators(predicates: P, arguments: A) -> Self {
        Self {
            predicates,
            arguments,
            preposition_radius: DEFAULT_PREPOSITION_RADIUS,
        }
    }

    /// Override the preposition search radius.
    #[must_use]
    pub fn with_preposition_radius(mut self, radius: usize) -> Self {
        self.preposition_radius = radius;
        self
    }

    /// Predicate-argument pairs for every sentence, in document order.
    #[must_use]
    pub fn extract(&self, annotation: &Annotation) -> Vec<PredicateArguments> {
        let mut pairs = Vec::new();
        for (sentence_index, sentence) in annotation.sentences().iter().enumerate() {
            for predicate_index in self.predicates.predicates(sentence) {
                let Some(predicate) =
                    WordDescriptor::from_token(sentence, predicate_index, self.preposition_radius)
                else {
                    log::warn!(
                        "sentence {sentence_index}: predicate locator returned index {predicate_index} outside the sentence"
                    );
                    continue;
                };
                let arguments = self
                    .arguments
                    .arguments(sentence, predicate_index)
                    .into_iter()
                    .filter_map(|token_index| {
                        let descriptor = WordDescriptor::from_token(
                            sentence,
                            token_index,
                            self.preposition_radius,
                        );
                        if descriptor.is_none() {
                            log::warn!(
                                "sentence {sentence_index}: argument locator returned index {token_index} outside the sentence"
                            );
                        }
                        descriptor.map(|descriptor| Argument {
                            token_index,
                            descriptor,
                        })
                    })
                    .collect();
                pairs.push(PredicateArguments {
                    sentence_index,
                    predicate_index,
                    predicate,
                    arguments,
                });
            }
        }
        pairs
    }
}
