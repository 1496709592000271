//! Locating predicate tokens and their argument tokens in one sentence.

use crate::annotation::Sentence;

/// Finds predicate tokens in a sentence.
///
/// Returned indices are ascending and duplicate-free.
pub trait PredicateLocator {
    /// Token indices of the predicates in `sentence`, ascending.
    fn predicates(&self, sentence: &Sentence) -> Vec<usize>;
}

/// Finds the argument tokens of one predicate.
///
/// Returned indices are ascending and duplicate-free.
pub trait ArgumentLocator {
    /// Token indices of the arguments of `predicate`, ascending.
    fn arguments(&self, sentence: &Sentence, predicate: usize) -> Vec<usize>;
}

/// Locates predicates by POS tag, `VERB` by default.
#[derive(Debug, Clone)]
pub struct PosPredicateLocator {
    tags: Vec<String>,
}

impl PosPredicateLocator {
    /// Locator for `VERB` tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tags(["VERB"])
    }

    /// Locator for an explicit tag set.
    #[must_use]
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for PosPredicateLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PredicateLocator for PosPredicateLocator {
    fn predicates(&self, sentence: &Sentence) -> Vec<usize> {
        sentence
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, token)| self.tags.iter().any(|tag| tag == token.upos()))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Locates arguments as direct dependents of the predicate carrying a
/// nominal POS tag (`NOUN`, `PROPN`, `PRON`, `NUM` by default).
#[derive(Debug, Clone)]
pub struct DependentArgumentLocator {
    tags: Vec<String>,
}

impl DependentArgumentLocator {
    /// Locator for dependents with the default nominal tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tags(["NOUN", "PROPN", "PRON", "NUM"])
    }

    /// Locator accepting dependents with an explicit tag set.
    #[must_use]
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for DependentArgumentLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentLocator for DependentArgumentLocator {
    fn arguments(&self, sentence: &Sentence, predicate: usize) -> Vec<usize> {
        sentence
            .deps()
            .iter()
            .enumerate()
            .filter(|(index, dep)| *index != predicate && dep.head() == Some(predicate))
            .filter(|(index, _)| {
                sentence
                    .token(*index)
                    .is_some_and(|token| self.tags.iter().any(|tag| tag == token.upos()))
            })
            .map(|(index, _)| index)
            .collect()
    }
}
