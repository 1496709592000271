//! Applying ordered rulesets to predicate-argument pairs.

use crate::error::{Error, Result};

use super::descriptor::{LabeledArgument, LabeledPredicateArguments, PredicateArguments};
use super::rules::Ruleset;

/// Labels predicate-argument pairs with an ordered ruleset list.
#[derive(Debug, Clone, Default)]
pub struct SrlLabeler {
    rulesets: Vec<Ruleset>,
}

impl SrlLabeler {
    /// Labeler over rulesets applied in the given order.
    #[must_use]
    pub fn new(rulesets: Vec<Ruleset>) -> Self {
        Self { rulesets }
    }

    /// Parse a ruleset file: a JSON array of rulesets, applied in array
    /// order.
    pub fn from_json(json: &str) -> Result<Self> {
        let rulesets: Vec<Ruleset> = serde_json::from_str(json)?;
        if rulesets.is_empty() {
            return Err(Error::ruleset("ruleset file contains no rulesets"));
        }
        Ok(Self::new(rulesets))
    }

    /// The rulesets in application order.
    #[must_use]
    pub fn rulesets(&self) -> &[Ruleset] {
        &self.rulesets
    }

    /// Label one pair.
    ///
    /// Rulesets are tried in order and the first whose predicate gate
    /// matches decides the pair, even if none of its argument rules then
    /// fire. The returned flag reports whether any argument received a
    /// role.
    #[must_use]
    pub fn apply(&self, pair: &PredicateArguments) -> (LabeledPredicateArguments, bool) {
        let roles = self
            .rulesets
            .iter()
            .find(|ruleset| ruleset.matches_predicate(&pair.predicate))
            .map(|ruleset| ruleset.assign_roles(&pair.arguments));
        let applied = roles
            .as_ref()
            .is_some_and(|roles| roles.iter().any(Option::is_some));
        let roles = roles.unwrap_or_else(|| vec![None; pair.arguments.len()]);

        let arguments = pair
            .arguments
            .iter()
            .zip(roles)
            .map(|(argument, role)| LabeledArgument {
                token_index: argument.token_index,
                descriptor: argument.descriptor.clone(),
                role,
            })
            .collect();
        let labeled = LabeledPredicateArguments {
            sentence_index: pair.sentence_index,
            predicate_index: pair.predicate_index,
            predicate: pair.predicate.clone(),
            arguments,
        };
        (labeled, applied)
    }

    /// Label every pair of a document, preserving order.
    #[must_use]
    pub fn label_all(&self, pairs: &[PredicateArguments]) -> Vec<LabeledPredicateArguments> {
        pairs
            .iter()
            .map(|pair| {
                let (labeled, applied) = self.apply(pair);
                if !applied {
                    log::debug!(
                        "sentence {} predicate {}: no role assigned",
                        labeled.sentence_index,
                        labeled.predicate_index
                    );
                }
                labeled
            })
            .collect()
    }
}
