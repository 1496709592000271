//! Per-token feature derivation over dependency-parsed sentences.
//!
//! Every token of every sentence becomes one [`FeatureRecord`] row,
//! combining four context groups:
//!
//! | Group | Content | Missing context |
//! |-------|---------|-----------------|
//! | own token | lemma, POS, morphology, relation, flags, position | attributes default to `""` |
//! | parent | the head token's categorical attributes | `"NA"` (root) |
//! | window | full base context of the 1..=window previous tokens | `"NA"` / −1 |
//! | ancestors (optional) | LCA attributes, distances, index per pair | `"NA"` / −1 |
//!
//! Windows never cross a sentence boundary, and a record skipped as
//! malformed (head outside the sentence) is missing context for its
//! neighbors too. Derivation over a batch is per-sentence independent, so
//! the batch can be split into balanced partitions and derived
//! concurrently; partitioned and sequential runs produce identical tables.
//!
//! ```
//! use razbor::annotation::{DependencyEdge, Sentence, Token};
//! use razbor::features::FeatureDeriver;
//!
//! let sentence = Sentence::new(
//!     vec![
//!         Token::new("Мама", "мама", "NOUN", 0, 8),
//!         Token::new("мыла", "мыть", "VERB", 9, 17),
//!     ],
//!     vec![
//!         DependencyEdge::to_parent(1, "nsubj"),
//!         DependencyEdge::root("root"),
//!     ],
//! )
//! .unwrap();
//!
//! let table = FeatureDeriver::new().derive(&[sentence]);
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.schema().len(), 89);
//! ```

use std::ops::Range;

use crate::annotation::Sentence;

pub mod ancestor;
mod record;
mod schema;

pub use ancestor::{lowest_common_ancestor, Lca};
pub use record::{
    AncestorSlot, AttrBlock, FeatureRecord, FeatureTable, FeatureValue, ShapeBlock, WindowSlot,
};
pub use schema::{FeatureSchema, DEFAULT_SCHEMA, MISSING, MORPH_ATTRS, NA, SHAPE_ATTRS, TOKEN_ATTRS};

/// Configuration of a [`FeatureDeriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriverConfig {
    /// How many previous tokens contribute window slots.
    pub window: usize,
    /// Whether the lowest-common-ancestor pass runs.
    pub ancestor_features: bool,
    /// Number of balanced sentence groups for partitioned derivation;
    /// values below 2 derive sequentially.
    pub partitions: usize,
}

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            window: 2,
            ancestor_features: false,
            partitions: 8,
        }
    }
}

struct BaseRow {
    own: AttrBlock,
    parent: AttrBlock,
    shape: ShapeBlock,
}

/// Derives feature tables from sentence batches.
#[derive(Debug, Clone)]
pub struct FeatureDeriver {
    config: DeriverConfig,
    schema: FeatureSchema,
}

impl FeatureDeriver {
    /// Deriver with the default configuration (window 2, ancestors off,
    /// 8 partitions).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DeriverConfig::default())
    }

    /// Deriver with an explicit configuration.
    #[must_use]
    pub fn with_config(config: DeriverConfig) -> Self {
        let schema = FeatureSchema::new(config.window, config.ancestor_features);
        Self { config, schema }
    }

    /// The column layout tables from this deriver will have.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DeriverConfig {
        &self.config
    }

    /// Derive the feature table for a sentence batch.
    #[must_use]
    pub fn derive(&self, sentences: &[Sentence]) -> FeatureTable {
        let records = if self.config.partitions > 1 && sentences.len() > 1 {
            self.derive_partitioned(sentences)
        } else {
            self.derive_range(0..sentences.len(), sentences)
        };
        FeatureTable::new(self.schema.clone(), records)
    }

    fn derive_range(&self, range: Range<usize>, sentences: &[Sentence]) -> Vec<FeatureRecord> {
        range
            .flat_map(|i| self.derive_sentence(i, &sentences[i]))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn derive_partitioned(&self, sentences: &[Sentence]) -> Vec<FeatureRecord> {
        use rayon::prelude::*;

        let chunks = balanced_chunks(sentences.len(), self.config.partitions);
        let groups: Vec<Vec<FeatureRecord>> = chunks
            .into_par_iter()
            .map(|range| self.derive_range(range, sentences))
            .collect();
        groups.into_iter().flatten().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn derive_partitioned(&self, sentences: &[Sentence]) -> Vec<FeatureRecord> {
        balanced_chunks(sentences.len(), self.config.partitions)
            .into_iter()
            .flat_map(|range| self.derive_range(range, sentences))
            .collect()
    }

    fn derive_sentence(&self, sentence_index: usize, sentence: &Sentence) -> Vec<FeatureRecord> {
        let n = sentence.len();
        if n == 0 {
            return Vec::new();
        }
        let counts = sentence.dependent_counts();

        // Base pass; None marks a record skipped as malformed.
        let mut base: Vec<Option<BaseRow>> = Vec::with_capacity(n);
        for (i, (token, dep)) in sentence.tokens().iter().zip(sentence.deps()).enumerate() {
            let parent = match dep.head() {
                None => AttrBlock::sentinel(),
                Some(head) => match (sentence.token(head), sentence.dep(head)) {
                    (Some(parent_token), Some(parent_dep)) => {
                        AttrBlock::from_token(parent_token, parent_dep.deprel())
                    }
                    _ => {
                        log::warn!(
                            "sentence {sentence_index}: token {i} head {head} is outside the sentence, record skipped"
                        );
                        base.push(None);
                        continue;
                    }
                },
            };
            base.push(Some(BaseRow {
                own: AttrBlock::from_token(token, dep.deprel()),
                parent,
                shape: ShapeBlock {
                    is_capitalized: i64::from(token.is_capitalized()),
                    is_upper: i64::from(token.is_uppercase()),
                    n_children: counts[i] as i64,
                },
            }));
        }

        let mut records = Vec::with_capacity(n);
        for (i, row) in base.iter().enumerate() {
            let Some(row) = row else { continue };
            let window = (1..=self.config.window)
                .map(|k| {
                    i.checked_sub(k)
                        .and_then(|j| base[j].as_ref())
                        .map_or_else(WindowSlot::sentinel, |prev| WindowSlot {
                            own: prev.own.clone(),
                            parent: prev.parent.clone(),
                            shape: prev.shape,
                        })
                })
                .collect();
            let ancestors = if self.config.ancestor_features {
                self.ancestor_slots(sentence, &counts, i)
            } else {
                Vec::new()
            };
            records.push(FeatureRecord {
                sentence_index,
                token_index: i,
                own: row.own.clone(),
                parent: row.parent.clone(),
                is_capitalized: row.shape.is_capitalized,
                is_upper: row.shape.is_upper,
                position: if n > 1 {
                    i as f64 / (n - 1) as f64
                } else {
                    0.0
                },
                distance_to_end: (n - i - 1) as i64,
                n_children: row.shape.n_children,
                window,
                ancestors,
            });
        }
        records
    }

    /// One slot per pair (offset k, offset k−1), deepest first.
    fn ancestor_slots(
        &self,
        sentence: &Sentence,
        counts: &[usize],
        token_index: usize,
    ) -> Vec<AncestorSlot> {
        (1..=self.config.window)
            .rev()
            .map(|k| {
                let Some(far) = token_index.checked_sub(k) else {
                    return AncestorSlot::sentinel();
                };
                let near = token_index - (k - 1);
                match lowest_common_ancestor(sentence, far, near) {
                    Some(lca) => {
                        let token = &sentence.tokens()[lca.index];
                        let deprel = sentence.deps()[lca.index].deprel();
                        AncestorSlot {
                            attrs: AttrBlock::from_token(token, deprel),
                            shape: ShapeBlock {
                                is_capitalized: i64::from(token.is_capitalized()),
                                is_upper: i64::from(token.is_uppercase()),
                                n_children: counts[lca.index] as i64,
                            },
                            distance_far: lca.distance_a as i64,
                            distance_near: lca.distance_b as i64,
                            index: lca.index as i64,
                        }
                    }
                    None => AncestorSlot::sentinel(),
                }
            })
            .collect()
    }
}

impl Default for FeatureDeriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `0..len` into at most `parts` contiguous ranges whose sizes differ
/// by at most one, preserving order.
fn balanced_chunks(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.min(len).max(1);
    let base = len / parts;
    let extra = len % parts;
    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        chunks.push(start..start + size);
        start += size;
    }
    chunks
}
