//! Word descriptors: the flattened token view the rule engine matches on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::annotation::Sentence;

/// How many preceding tokens the preposition search inspects.
pub const DEFAULT_PREPOSITION_RADIUS: usize = 3;

/// Flattened view of one token for rule matching.
///
/// Morphological attributes are merged under lowercased names; `text`,
/// `lemma`, `postag` and `preposition` resolve before the morphology, so a
/// morphological feature cannot shadow them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDescriptor {
    /// Surface form.
    pub text: String,
    /// Lemma.
    pub lemma: String,
    /// Part-of-speech tag.
    pub postag: String,
    /// Morphological attributes under lowercased names.
    pub morph: HashMap<String, String>,
    /// Governing preposition, when one attaches to this token nearby.
    pub preposition: Option<String>,
}

impl WordDescriptor {
    /// Build the descriptor for `sentence`'s token at `index`, searching
    /// for a preposition within `radius` preceding tokens. `None` when the
    /// index is outside the sentence.
    #[must_use]
    pub fn from_token(sentence: &Sentence, index: usize, radius: usize) -> Option<Self> {
        let token = sentence.token(index)?;
        let morph = token
            .feats()
            .iter()
            .map(|(name, value)| (name.to_lowercase(), value.clone()))
            .collect();
        Some(Self {
            text: token.form().to_string(),
            lemma: token.lemma().to_string(),
            postag: token.upos().to_string(),
            morph,
            preposition: find_preposition(sentence, index, radius),
        })
    }

    /// Resolve one attribute by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "text" => Some(&self.text),
            "lemma" => Some(&self.lemma),
            "postag" => Some(&self.postag),
            "preposition" => self.preposition.as_deref(),
            _ => self.morph.get(name).map(String::as_str),
        }
    }
}

/// Find the preposition governed by the token at `index`.
///
/// Scans the `radius` preceding tokens nearest-first and returns the
/// lowercased surface form of the first one whose dependency parent is
/// `index` and whose POS tag is `ADP`.
#[must_use]
pub fn find_preposition(sentence: &Sentence, index: usize, radius: usize) -> Option<String> {
    for offset in 1..=radius {
        let candidate = index.checked_sub(offset)?;
        let (Some(token), Some(dep)) = (sentence.token(candidate), sentence.dep(candidate)) else {
            return None;
        };
        if dep.head() == Some(index) && token.upos() == "ADP" {
            return Some(token.form().to_lowercase());
        }
    }
    None
}

/// One located argument of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Token index within its sentence.
    pub token_index: usize,
    /// The argument token's descriptor.
    pub descriptor: WordDescriptor,
}

/// A predicate with its located arguments, before role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateArguments {
    /// Index of the sentence within the document.
    pub sentence_index: usize,
    /// Predicate token index within its sentence.
    pub predicate_index: usize,
    /// The predicate token's descriptor.
    pub predicate: WordDescriptor,
    /// Located arguments in token order.
    pub arguments: Vec<Argument>,
}

/// An argument after rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledArgument {
    /// Token index within its sentence.
    pub token_index: usize,
    /// The argument token's descriptor.
    pub descriptor: WordDescriptor,
    /// Assigned role, `None` when no rule matched.
    pub role: Option<String>,
}

/// A predicate-argument pair after rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPredicateArguments {
    /// Index of the sentence within the document.
    pub sentence_index: usize,
    /// Predicate token index within its sentence.
    pub predicate_index: usize,
    /// The predicate token's descriptor.
    pub predicate: WordDescriptor,
    /// Arguments in token order, each with its assigned role.
    pub arguments: Vec<LabeledArgument>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{DependencyEdge, Token};

    // "Папа сидел на диване ." with the preposition attached to its noun
    fn sofa_sentence() -> Sentence {
        let tokens = vec![
            Token::new("Папа", "папа", "NOUN", 0, 8)
                .with_feat("Case", "Nom")
                .with_feat("Gender", "Masc"),
            Token::new("сидел", "сидеть", "VERB", 9, 19).with_feat("Tense", "Past"),
            Token::new("на", "на", "ADP", 20, 24),
            Token::new("диване", "диван", "NOUN", 25, 37).with_feat("Case", "Loc"),
            Token::new(".", ".", "PUNCT", 37, 38),
        ];
        let deps = vec![
            DependencyEdge::to_parent(1, "nsubj"),
            DependencyEdge::root("root"),
            DependencyEdge::to_parent(3, "case"),
            DependencyEdge::to_parent(1, "obl"),
            DependencyEdge::to_parent(1, "punct"),
        ];
        Sentence::new(tokens, deps).unwrap()
    }

    #[test]
    fn descriptor_flattens_token_annotation() {
        let sentence = sofa_sentence();
        let descriptor =
            WordDescriptor::from_token(&sentence, 0, DEFAULT_PREPOSITION_RADIUS).unwrap();
        assert_eq!(descriptor.attr("text"), Some("Папа"));
        assert_eq!(descriptor.attr("lemma"), Some("папа"));
        assert_eq!(descriptor.attr("postag"), Some("NOUN"));
        assert_eq!(descriptor.attr("case"), Some("Nom"));
        assert_eq!(descriptor.attr("gender"), Some("Masc"));
        assert_eq!(descriptor.attr("preposition"), None);
        assert_eq!(descriptor.attr("tense"), None);
    }

    #[test]
    fn preposition_attaches_to_its_governor() {
        let sentence = sofa_sentence();
        let object =
            WordDescriptor::from_token(&sentence, 3, DEFAULT_PREPOSITION_RADIUS).unwrap();
        assert_eq!(object.preposition.as_deref(), Some("на"));

        let predicate =
            WordDescriptor::from_token(&sentence, 1, DEFAULT_PREPOSITION_RADIUS).unwrap();
        assert_eq!(predicate.preposition, None);
    }

    #[test]
    fn preposition_search_respects_radius() {
        let sentence = sofa_sentence();
        assert_eq!(find_preposition(&sentence, 3, 1), Some("на".to_string()));
        // token 4 sits two past the preposition, which governs token 3 anyway
        assert_eq!(find_preposition(&sentence, 4, 3), None);
    }

    #[test]
    fn preposition_form_is_lowercased() {
        let tokens = vec![
            Token::new("На", "на", "ADP", 0, 4),
            Token::new("столе", "стол", "NOUN", 5, 15).with_feat("Case", "Loc"),
        ];
        let deps = vec![
            DependencyEdge::to_parent(1, "case"),
            DependencyEdge::root("root"),
        ];
        let sentence = Sentence::new(tokens, deps).unwrap();
        assert_eq!(find_preposition(&sentence, 1, 3), Some("на".to_string()));
    }

    #[test]
    fn out_of_range_token_has_no_descriptor() {
        let sentence = sofa_sentence();
        assert!(WordDescriptor::from_token(&sentence, 9, 3).is_none());
    }

    #[test]
    fn search_stops_at_sentence_start() {
        let sentence = sofa_sentence();
        // radius larger than the available prefix must not underflow
        assert_eq!(find_preposition(&sentence, 1, 5), None);
    }
}
