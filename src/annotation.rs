//! Annotated-document model: tokens, dependency edges, sentences.
//!
//! This is the immutable input representation for the whole crate. Upstream
//! taggers and parsers are external; their output arrives here either
//! directly (constructed via the builders below) or through the CoNLL reader
//! in [`crate::conll`].
//!
//! Spans are byte offsets into the document text, half-open (`start..end`).
//! Dependency heads are 0-based token indices within the sentence, `None`
//! for root; the 1-based/0/−1 conventions exist only at the CoNLL boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Universal morphological feature names recognized in FEATS columns, in
/// canonical output order.
pub const UNIVERSAL_FEATURES: [&str; 25] = [
    "Abbr",
    "Animacy",
    "Aspect",
    "Case",
    "Clusivity",
    "Definite",
    "Degree",
    "Evident",
    "Foreign",
    "Gender",
    "Mood",
    "NounClass",
    "NumType",
    "Number",
    "Person",
    "Polarity",
    "Polite",
    "Poss",
    "PronType",
    "Reflex",
    "Tense",
    "Typo",
    "VerbForm",
    "Voice",
    "Variant",
];

/// One surface token with its lexical and morphological annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    form: String,
    lemma: String,
    upos: String,
    feats: HashMap<String, String>,
    start: usize,
    end: usize,
}

impl Token {
    /// Create a token without morphological features.
    #[must_use]
    pub fn new(
        form: impl Into<String>,
        lemma: impl Into<String>,
        upos: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            form: form.into(),
            lemma: lemma.into(),
            upos: upos.into(),
            feats: HashMap::new(),
            start,
            end,
        }
    }

    /// Add one morphological feature (builder style).
    #[must_use]
    pub fn with_feat(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.feats.insert(name.into(), value.into());
        self
    }

    /// Surface form.
    #[must_use]
    pub fn form(&self) -> &str {
        &self.form
    }

    /// Lemma.
    #[must_use]
    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// Part-of-speech tag.
    #[must_use]
    pub fn upos(&self) -> &str {
        &self.upos
    }

    /// Morphological feature value by exact name.
    #[must_use]
    pub fn feat(&self, name: &str) -> Option<&str> {
        self.feats.get(name).map(String::as_str)
    }

    /// All morphological features.
    #[must_use]
    pub fn feats(&self) -> &HashMap<String, String> {
        &self.feats
    }

    /// Byte offset of the first character in the document text.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether the first character of the form is uppercase.
    #[must_use]
    pub fn is_capitalized(&self) -> bool {
        self.form.chars().next().is_some_and(char::is_uppercase)
    }

    /// Whether the form has at least one cased character and no lowercase
    /// ones.
    #[must_use]
    pub fn is_uppercase(&self) -> bool {
        let mut has_cased = false;
        for c in self.form.chars() {
            if c.is_lowercase() {
                return false;
            }
            if c.is_uppercase() {
                has_cased = true;
            }
        }
        has_cased
    }
}

/// Syntactic attachment of one token: parent index and relation label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    head: Option<usize>,
    deprel: String,
}

impl DependencyEdge {
    /// Edge to a parent token at a 0-based sentence index.
    #[must_use]
    pub fn to_parent(head: usize, deprel: impl Into<String>) -> Self {
        Self {
            head: Some(head),
            deprel: deprel.into(),
        }
    }

    /// Root edge (no parent).
    #[must_use]
    pub fn root(deprel: impl Into<String>) -> Self {
        Self {
            head: None,
            deprel: deprel.into(),
        }
    }

    /// 0-based parent index, `None` for root.
    #[must_use]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Relation label (empty when the parse did not provide one).
    #[must_use]
    pub fn deprel(&self) -> &str {
        &self.deprel
    }
}

/// One sentence: tokens plus one dependency edge per token.
///
/// Token order and membership are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    tokens: Vec<Token>,
    deps: Vec<DependencyEdge>,
}

impl Sentence {
    /// Create a sentence. Fails when the edge list does not have exactly
    /// one entry per token.
    pub fn new(tokens: Vec<Token>, deps: Vec<DependencyEdge>) -> Result<Self> {
        if tokens.len() != deps.len() {
            return Err(Error::invalid_input(format!(
                "sentence has {} tokens but {} dependency edges",
                tokens.len(),
                deps.len()
            )));
        }
        Ok(Self { tokens, deps })
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// All dependency edges, aligned with [`Self::tokens`].
    #[must_use]
    pub fn deps(&self) -> &[DependencyEdge] {
        &self.deps
    }

    /// Token at an index.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Dependency edge at an index.
    #[must_use]
    pub fn dep(&self, index: usize) -> Option<&DependencyEdge> {
        self.deps.get(index)
    }

    /// Number of dependents of each token, one counting pass over the
    /// edges. Heads pointing outside the sentence count for nobody.
    #[must_use]
    pub fn dependent_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.tokens.len()];
        for dep in &self.deps {
            if let Some(head) = dep.head() {
                if let Some(slot) = counts.get_mut(head) {
                    *slot += 1;
                }
            }
        }
        counts
    }
}

/// A parsed document: id, source text, and sentences in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    doc_id: String,
    text: String,
    sentences: Vec<Sentence>,
}

impl Annotation {
    /// Create a document annotation.
    #[must_use]
    pub fn new(
        doc_id: impl Into<String>,
        text: impl Into<String>,
        sentences: Vec<Sentence>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            text: text.into(),
            sentences,
        }
    }

    /// Document identifier.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// Source text the token spans index into.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sentences in document order.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Tokens of all sentences flattened in document order.
    #[must_use]
    pub fn flat_tokens(&self) -> Vec<&Token> {
        self.sentences
            .iter()
            .flat_map(|s| s.tokens().iter())
            .collect()
    }

    /// Document-order token index of the first token of each sentence.
    #[must_use]
    pub fn sentence_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.sentences.len());
        let mut total = 0;
        for sentence in &self.sentences {
            offsets.push(total);
            total += sentence.len();
        }
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(form: &str) -> Token {
        Token::new(form, form.to_lowercase(), "NOUN", 0, form.len())
    }

    #[test]
    fn capitalization_flags() {
        assert!(tok("Мама").is_capitalized());
        assert!(!tok("мама").is_capitalized());
        assert!(tok("ЦСКА").is_uppercase());
        assert!(!tok("Мама").is_uppercase());
        assert!(!tok(".").is_uppercase());
        assert!(!tok("").is_capitalized());
    }

    #[test]
    fn sentence_rejects_mismatched_edges() {
        let err = Sentence::new(vec![tok("а")], vec![]);
        assert!(err.is_err());
    }

    #[test]
    fn dependent_counts_ignore_out_of_range_heads() {
        let tokens = vec![tok("а"), tok("б"), tok("в")];
        let deps = vec![
            DependencyEdge::to_parent(1, "nsubj"),
            DependencyEdge::root("root"),
            DependencyEdge::to_parent(9, "obj"),
        ];
        let sentence = Sentence::new(tokens, deps).unwrap();
        assert_eq!(sentence.dependent_counts(), vec![0, 1, 0]);
    }

    #[test]
    fn flat_tokens_and_offsets_follow_document_order() {
        let s1 = Sentence::new(
            vec![tok("а"), tok("б")],
            vec![DependencyEdge::root("root"), DependencyEdge::to_parent(0, "obj")],
        )
        .unwrap();
        let s2 = Sentence::new(vec![tok("в")], vec![DependencyEdge::root("root")]).unwrap();
        let doc = Annotation::new("0", "а б в", vec![s1, s2]);
        let forms: Vec<&str> = doc.flat_tokens().iter().map(|t| t.form()).collect();
        assert_eq!(forms, vec!["а", "б", "в"]);
        assert_eq!(doc.sentence_offsets(), vec![0, 2]);
    }

    #[test]
    fn feat_lookup_is_exact() {
        let token = tok("раму").with_feat("Case", "Acc");
        assert_eq!(token.feat("Case"), Some("Acc"));
        assert_eq!(token.feat("case"), None);
    }
}
