//! Turning boundary decisions into clause spans.

use serde::{Deserialize, Serialize};

use crate::annotation::Token;

/// Relation label of a clause produced by segmentation alone.
pub const ELEMENTARY_RELATION: &str = "elementary";

/// Nuclearity placeholder when no discourse inference has run.
pub const UNKNOWN_NUCLEARITY: &str = "_";

/// A contiguous clause of the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Zero-based position among the document's clauses.
    pub id: usize,
    /// Byte offset of the clause start.
    pub start: usize,
    /// Byte offset one past the clause end.
    pub end: usize,
    /// The covered substring.
    pub text: String,
    /// Rhetorical relation label, [`ELEMENTARY_RELATION`] for fresh clauses.
    pub relation: String,
    /// Nuclearity mark, [`UNKNOWN_NUCLEARITY`] until a later stage decides.
    pub nuclearity: String,
}

impl Clause {
    fn over(id: usize, start: usize, end: usize, text: &str) -> Self {
        let covered = match text.get(start..end) {
            Some(slice) => slice.to_string(),
            None => {
                log::warn!("clause {id} span {start}..{end} does not address the text, emitting empty text");
                String::new()
            }
        };
        Self {
            id,
            start,
            end,
            text: covered,
            relation: ELEMENTARY_RELATION.to_string(),
            nuclearity: UNKNOWN_NUCLEARITY.to_string(),
        }
    }
}

/// Assemble clauses from clause-start token indices.
///
/// `boundaries` are ascending document-order token indices into `tokens`.
/// Each clause runs from its boundary token's start to the next boundary
/// token's start; the last clause runs to the end of the last token. No
/// boundaries means no clauses. Indices outside the token sequence are
/// dropped with a warning.
#[must_use]
pub fn assemble(text: &str, tokens: &[&Token], boundaries: &[usize]) -> Vec<Clause> {
    let boundaries: Vec<usize> = boundaries
        .iter()
        .copied()
        .filter(|&b| {
            let inside = b < tokens.len();
            if !inside {
                log::warn!(
                    "boundary token index {b} exceeds the {} document tokens, dropped",
                    tokens.len()
                );
            }
            inside
        })
        .collect();
    let Some(&last_boundary) = boundaries.last() else {
        return Vec::new();
    };

    let mut clauses = Vec::with_capacity(boundaries.len());
    for pair in boundaries.windows(2) {
        let start = tokens[pair[0]].start();
        let end = tokens[pair[1]].start();
        clauses.push(Clause::over(clauses.len(), start, end, text));
    }
    let start = tokens[last_boundary].start();
    let end = tokens[tokens.len() - 1].end();
    clauses.push(Clause::over(clauses.len(), start, end, text));
    clauses
}
