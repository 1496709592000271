//! Declarative role rules and their JSON representation.
//!
//! A ruleset file is a JSON array of records shaped like
//!
//! ```json
//! {
//!   "predicate_rule": {"pattern": {"postag": "VERB"}},
//!   "argument_rules": {
//!     "Loc": [{"pattern": {"case": "Loc", "preposition": "на"}}],
//!     "Agent": [{"pattern": {"case": "Nom"}}]
//!   }
//! }
//! ```
//!
//! Pattern keys are descriptor attribute names (`text`, `lemma`, `postag`,
//! `preposition`, or a lowercased morphological feature); a pattern value is
//! one expected string or an array of alternatives. Role names under
//! `argument_rules` keep their file order through a round trip, and that
//! order is the evaluation order.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::descriptor::{Argument, WordDescriptor};

/// Expected value of one pattern attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternValue {
    /// Exactly this string.
    One(String),
    /// Any string from the list.
    AnyOf(Vec<String>),
}

impl PatternValue {
    fn admits(&self, value: &str) -> bool {
        match self {
            PatternValue::One(expected) => expected == value,
            PatternValue::AnyOf(options) => options.iter().any(|option| option == value),
        }
    }
}

impl From<&str> for PatternValue {
    fn from(value: &str) -> Self {
        PatternValue::One(value.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for PatternValue {
    fn from(options: [&str; N]) -> Self {
        PatternValue::AnyOf(options.iter().map(ToString::to_string).collect())
    }
}

/// A conjunctive pattern over descriptor attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rule {
    /// Attribute name to expected value(s); all entries must hold.
    pub pattern: BTreeMap<String, PatternValue>,
}

impl Rule {
    /// Empty pattern, matches every descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one attribute expectation.
    #[must_use]
    pub fn with(mut self, attr: impl Into<String>, value: impl Into<PatternValue>) -> Self {
        self.pattern.insert(attr.into(), value.into());
        self
    }

    /// Whether every pattern entry is satisfied by `descriptor`.
    ///
    /// A descriptor missing one of the pattern's attributes never matches.
    #[must_use]
    pub fn matches(&self, descriptor: &WordDescriptor) -> bool {
        self.pattern.iter().all(|(attr, expected)| {
            descriptor
                .attr(attr)
                .is_some_and(|value| expected.admits(value))
        })
    }
}

/// Role-to-rules mapping that preserves insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoleRules {
    entries: Vec<(String, Vec<Rule>)>,
}

impl RoleRules {
    /// Empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rules for a role. A known role keeps its position, a new
    /// role goes last.
    pub fn insert(&mut self, role: impl Into<String>, rules: Vec<Rule>) {
        let role = role.into();
        match self.entries.iter_mut().find(|(name, _)| *name == role) {
            Some(entry) => entry.1 = rules,
            None => self.entries.push((role, rules)),
        }
    }

    /// The rules for a role, if present.
    #[must_use]
    pub fn get(&self, role: &str) -> Option<&[Rule]> {
        self.entries
            .iter()
            .find(|(name, _)| name == role)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Roles and their rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.entries
            .iter()
            .map(|(role, rules)| (role.as_str(), rules.as_slice()))
    }

    /// Number of roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no roles are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RoleRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (role, rules) in &self.entries {
            map.serialize_entry(role, rules)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RoleRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoleRulesVisitor;

        impl<'de> Visitor<'de> for RoleRulesVisitor {
            type Value = RoleRules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from role name to a list of rules")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((role, rules)) = access.next_entry::<String, Vec<Rule>>()? {
                    entries.push((role, rules));
                }
                Ok(RoleRules { entries })
            }
        }

        deserializer.deserialize_map(RoleRulesVisitor)
    }
}

/// One unit of role assignment: a predicate gate plus ordered role rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ruleset {
    /// Gate: the ruleset applies only to predicates this rule matches.
    pub predicate_rule: Rule,
    /// Role rules, evaluated in insertion order.
    pub argument_rules: RoleRules,
}

impl Ruleset {
    /// Whether this ruleset's predicate gate admits the pair's predicate.
    #[must_use]
    pub fn matches_predicate(&self, predicate: &WordDescriptor) -> bool {
        self.predicate_rule.matches(predicate)
    }

    /// One role per argument, in argument order.
    ///
    /// Roles are evaluated in file order and every rule is checked against
    /// every argument; a later match overwrites an earlier assignment, a
    /// non-match leaves it untouched.
    #[must_use]
    pub fn assign_roles(&self, arguments: &[Argument]) -> Vec<Option<String>> {
        let mut roles: Vec<Option<String>> = vec![None; arguments.len()];
        for (role, rules) in self.argument_rules.iter() {
            for rule in rules {
                for (slot, argument) in roles.iter_mut().zip(arguments) {
                    if rule.matches(&argument.descriptor) {
                        *slot = Some(role.to_string());
                    }
                }
            }
        }
        roles
    }
}
