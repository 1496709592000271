//! Feature records: the fixed-shape rows of a derived feature table.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::{FeatureSchema, MISSING, NA};
use crate::annotation::Token;

/// The 13 categorical attributes of one token, named per the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrBlock {
    /// Lemma.
    pub lemma: String,
    /// Part-of-speech tag.
    pub upos: String,
    /// Animacy feature value.
    pub animacy: String,
    /// Aspect feature value.
    pub aspect: String,
    /// Case feature value.
    pub case: String,
    /// Degree feature value.
    pub degree: String,
    /// Gender feature value.
    pub gender: String,
    /// Number feature value.
    pub number: String,
    /// Person feature value.
    pub person: String,
    /// Tense feature value.
    pub tense: String,
    /// VerbForm feature value.
    pub verbform: String,
    /// Voice feature value.
    pub voice: String,
    /// Dependency relation label.
    pub deprel: String,
}

impl AttrBlock {
    /// Block with every attribute empty (token present, attributes absent).
    #[must_use]
    pub fn empty() -> Self {
        Self::filled(String::new())
    }

    /// Block with every attribute set to the categorical sentinel.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::filled(NA.to_string())
    }

    fn filled(value: String) -> Self {
        Self {
            lemma: value.clone(),
            upos: value.clone(),
            animacy: value.clone(),
            aspect: value.clone(),
            case: value.clone(),
            degree: value.clone(),
            gender: value.clone(),
            number: value.clone(),
            person: value.clone(),
            tense: value.clone(),
            verbform: value.clone(),
            voice: value.clone(),
            deprel: value,
        }
    }

    /// Build from a token's annotation plus its dependency relation.
    ///
    /// Morphological keys are matched case-insensitively against the
    /// derivation attribute names; anything else the tagger emitted is
    /// ignored.
    #[must_use]
    pub fn from_token(token: &Token, deprel: &str) -> Self {
        let mut block = Self::empty();
        block.lemma = token.lemma().to_string();
        block.upos = token.upos().to_string();
        block.deprel = deprel.to_string();
        for (name, value) in token.feats() {
            block.set_morph(&name.to_ascii_lowercase(), value);
        }
        block
    }

    fn set_morph(&mut self, name: &str, value: &str) {
        let slot = match name {
            "animacy" => &mut self.animacy,
            "aspect" => &mut self.aspect,
            "case" => &mut self.case,
            "degree" => &mut self.degree,
            "gender" => &mut self.gender,
            "number" => &mut self.number,
            "person" => &mut self.person,
            "tense" => &mut self.tense,
            "verbform" => &mut self.verbform,
            "voice" => &mut self.voice,
            _ => return,
        };
        *slot = value.to_string();
    }

    /// Attribute values in schema order.
    #[must_use]
    pub fn values(&self) -> [&str; 13] {
        [
            &self.lemma,
            &self.upos,
            &self.animacy,
            &self.aspect,
            &self.case,
            &self.degree,
            &self.gender,
            &self.number,
            &self.person,
            &self.tense,
            &self.verbform,
            &self.voice,
            &self.deprel,
        ]
    }
}

/// Structural flags of one token (0/1), −1 when the slot is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeBlock {
    /// First letter uppercase.
    pub is_capitalized: i64,
    /// All letters uppercase.
    pub is_upper: i64,
    /// Number of direct dependents.
    pub n_children: i64,
}

impl ShapeBlock {
    /// Sentinel block for missing context.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            is_capitalized: MISSING,
            is_upper: MISSING,
            n_children: MISSING,
        }
    }

    /// Flag values in schema order.
    #[must_use]
    pub fn values(&self) -> [i64; 3] {
        [self.is_capitalized, self.is_upper, self.n_children]
    }
}

/// Context of the token `k` positions back in the same sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSlot {
    /// The earlier token's own attributes.
    pub own: AttrBlock,
    /// The earlier token's parent attributes.
    pub parent: AttrBlock,
    /// The earlier token's structural flags.
    pub shape: ShapeBlock,
}

impl WindowSlot {
    /// Slot for a position before the sentence start.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            own: AttrBlock::sentinel(),
            parent: AttrBlock::sentinel(),
            shape: ShapeBlock::sentinel(),
        }
    }
}

/// Lowest-common-ancestor features of one consecutive token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorSlot {
    /// The ancestor token's attributes.
    pub attrs: AttrBlock,
    /// The ancestor token's structural flags.
    pub shape: ShapeBlock,
    /// Edge distance from the earlier (farther back) pair member.
    pub distance_far: i64,
    /// Edge distance from the later pair member.
    pub distance_near: i64,
    /// 0-based token index of the ancestor.
    pub index: i64,
}

impl AncestorSlot {
    /// Slot for a missing pair member or a disconnected tree.
    #[must_use]
    pub fn sentinel() -> Self {
        Self {
            attrs: AttrBlock::sentinel(),
            shape: ShapeBlock::sentinel(),
            distance_far: MISSING,
            distance_near: MISSING,
            index: MISSING,
        }
    }
}

/// One row of the feature table, keyed by (sentence index, token index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// 0-based sentence index within the batch.
    pub sentence_index: usize,
    /// 0-based token index within the sentence.
    pub token_index: usize,
    /// The token's own attributes.
    pub own: AttrBlock,
    /// The head token's attributes, sentinel for the root.
    pub parent: AttrBlock,
    /// First letter uppercase (0/1).
    pub is_capitalized: i64,
    /// All letters uppercase (0/1).
    pub is_upper: i64,
    /// Relative position in the sentence, 0.0 to 1.0.
    pub position: f64,
    /// Tokens remaining after this one.
    pub distance_to_end: i64,
    /// Number of direct dependents.
    pub n_children: i64,
    /// Window slots for offsets 1..=window, in offset order.
    pub window: Vec<WindowSlot>,
    /// Ancestor slots for offsets window..=1 (descending), empty when the
    /// ancestor pass is disabled.
    pub ancestors: Vec<AncestorSlot>,
}

impl FeatureRecord {
    /// Whether the two deepest consecutive pairs share an ancestor index
    /// (0/1); −1 when the window is too small to form two pairs.
    #[must_use]
    pub fn same_common_ancestors(&self) -> i64 {
        match (self.ancestors.first(), self.ancestors.get(1)) {
            (Some(a), Some(b)) => i64::from(a.index == b.index),
            _ => MISSING,
        }
    }

    /// Cell values in schema order. `with_ancestors` must match the schema
    /// the record was derived under.
    #[must_use]
    pub fn values(&self, with_ancestors: bool) -> Vec<FeatureValue<'_>> {
        let ancestor_cells = if with_ancestors {
            self.ancestors.len() * 19 + 1
        } else {
            0
        };
        let mut out = Vec::with_capacity(26 + self.window.len() * 29 + 5 + ancestor_cells);
        out.extend(self.own.values().map(FeatureValue::Text));
        out.extend(self.parent.values().map(FeatureValue::Text));
        for slot in &self.window {
            out.extend(slot.own.values().map(FeatureValue::Text));
            out.extend(slot.parent.values().map(FeatureValue::Text));
        }
        out.push(FeatureValue::Int(self.is_capitalized));
        out.push(FeatureValue::Int(self.is_upper));
        out.push(FeatureValue::Float(self.position));
        out.push(FeatureValue::Int(self.distance_to_end));
        out.push(FeatureValue::Int(self.n_children));
        for slot in &self.window {
            out.extend(slot.shape.values().map(FeatureValue::Int));
        }
        if with_ancestors {
            for slot in &self.ancestors {
                out.extend(slot.attrs.values().map(FeatureValue::Text));
                out.extend(slot.shape.values().map(FeatureValue::Int));
                out.push(FeatureValue::Int(slot.distance_far));
                out.push(FeatureValue::Int(slot.distance_near));
                out.push(FeatureValue::Int(slot.index));
            }
            out.push(FeatureValue::Int(self.same_common_ancestors()));
        }
        out
    }
}

/// A single cell of the emitted feature table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    /// A categorical cell.
    Text(&'a str),
    /// An integer cell (flags, counts, distances).
    Int(i64),
    /// A float cell (relative position).
    Float(f64),
}

impl fmt::Display for FeatureValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Text(s) => f.write_str(s),
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Derived features for a sentence batch: schema plus rows in
/// (sentence, token) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    schema: FeatureSchema,
    records: Vec<FeatureRecord>,
}

impl FeatureTable {
    pub(crate) fn new(schema: FeatureSchema, records: Vec<FeatureRecord>) -> Self {
        Self { schema, records }
    }

    /// Column layout of the rows.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Rows in (sentence, token) order.
    #[must_use]
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render as CSV with `sentence_id,word_id` index columns followed by
    /// the schema columns.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("sentence_id,word_id");
        for column in self.schema.columns() {
            out.push(',');
            out.push_str(column);
        }
        out.push('\n');
        for record in &self.records {
            let values = record.values(self.schema.has_ancestors());
            debug_assert_eq!(values.len(), self.schema.len());
            out.push_str(&record.sentence_index.to_string());
            out.push(',');
            out.push_str(&record.token_index.to_string());
            for value in values {
                out.push(',');
                match value {
                    FeatureValue::Text(s) => out.push_str(&escape_csv(s)),
                    other => out.push_str(&other.to_string()),
                }
            }
            out.push('\n');
        }
        out
    }
}

fn escape_csv(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Token;

    fn empty_record(window: usize) -> FeatureRecord {
        FeatureRecord {
            sentence_index: 0,
            token_index: 0,
            own: AttrBlock::empty(),
            parent: AttrBlock::sentinel(),
            is_capitalized: 0,
            is_upper: 0,
            position: 0.0,
            distance_to_end: 0,
            n_children: 0,
            window: (0..window).map(|_| WindowSlot::sentinel()).collect(),
            ancestors: Vec::new(),
        }
    }

    #[test]
    fn value_count_matches_default_schema() {
        let record = empty_record(2);
        assert_eq!(record.values(false).len(), 89);
    }

    #[test]
    fn value_count_matches_ancestor_schema() {
        let mut record = empty_record(2);
        record.ancestors = vec![AncestorSlot::sentinel(), AncestorSlot::sentinel()];
        assert_eq!(record.values(true).len(), 89 + 2 * 19 + 1);
        assert_eq!(record.values(true).len(), FeatureSchema::new(2, true).len());
    }

    #[test]
    fn same_common_ancestors_requires_two_pairs() {
        let mut record = empty_record(2);
        assert_eq!(record.same_common_ancestors(), MISSING);
        record.ancestors = vec![AncestorSlot::sentinel(), AncestorSlot::sentinel()];
        // both sentinels carry index −1, which counts as equal
        assert_eq!(record.same_common_ancestors(), 1);
        record.ancestors[0].index = 3;
        assert_eq!(record.same_common_ancestors(), 0);
    }

    #[test]
    fn attr_block_reads_morphology_case_insensitively() {
        let token = Token::new("раму", "рама", "NOUN", 0, 8)
            .with_feat("Case", "Acc")
            .with_feat("Number", "Sing")
            .with_feat("Foreign", "Yes");
        let block = AttrBlock::from_token(&token, "obj");
        assert_eq!(block.case, "Acc");
        assert_eq!(block.number, "Sing");
        assert_eq!(block.deprel, "obj");
        // outside the derivation vocabulary
        assert_eq!(block.values().iter().filter(|v| **v == "Yes").count(), 0);
    }

    #[test]
    fn csv_escapes_commas_and_quotes() {
        assert_eq!(escape_csv("мама"), "мама");
        assert_eq!(escape_csv(","), "\",\"");
        assert_eq!(escape_csv("a\"b"), "\"a\"\"b\"");
    }
}
