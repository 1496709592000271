//! Boundary classifiers over derived feature tables.

use crate::error::Result;
use crate::features::FeatureTable;

/// Decides, per feature record, whether its token starts a clause.
pub trait BoundaryClassifier {
    /// One decision per record, in record order.
    fn predict(&self, table: &FeatureTable) -> Result<Vec<bool>>;

    /// Short name used in logs and error messages.
    fn name(&self) -> &str;
}

/// Adapter wrapping any scoring function as a classifier.
pub struct FnClassifier<F> {
    name: String,
    predict: F,
}

impl<F> FnClassifier<F>
where
    F: Fn(&FeatureTable) -> Result<Vec<bool>>,
{
    /// Wrap a prediction closure under the given name.
    pub fn new(name: impl Into<String>, predict: F) -> Self {
        Self {
            name: name.into(),
            predict,
        }
    }
}

impl<F> BoundaryClassifier for FnClassifier<F>
where
    F: Fn(&FeatureTable) -> Result<Vec<bool>>,
{
    fn predict(&self, table: &FeatureTable) -> Result<Vec<bool>> {
        (self.predict)(table)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Baseline that opens a clause at the first token of every sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceStartClassifier;

impl BoundaryClassifier for SentenceStartClassifier {
    fn predict(&self, table: &FeatureTable) -> Result<Vec<bool>> {
        Ok(table
            .records()
            .iter()
            .map(|record| record.token_index == 0)
            .collect())
    }

    fn name(&self) -> &str {
        "sentence-start"
    }
}

/// Stub replaying a fixed decision vector, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct FixedClassifier {
    decisions: Vec<bool>,
}

impl FixedClassifier {
    /// Classifier that replays the given decisions verbatim.
    #[must_use]
    pub fn new(decisions: Vec<bool>) -> Self {
        Self { decisions }
    }
}

impl BoundaryClassifier for FixedClassifier {
    fn predict(&self, _table: &FeatureTable) -> Result<Vec<bool>> {
        Ok(self.decisions.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
