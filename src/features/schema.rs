//! Static feature schema: column names in their fixed output order.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Categorical attributes taken from one token, in schema order.
pub const TOKEN_ATTRS: [&str; 13] = [
    "lemma", "upos", "animacy", "aspect", "case", "degree", "gender", "number", "person", "tense",
    "verbform", "voice", "deprel",
];

/// The morphological subset of [`TOKEN_ATTRS`] (lowercased universal
/// feature names used for derivation).
pub const MORPH_ATTRS: [&str; 10] = [
    "animacy", "aspect", "case", "degree", "gender", "number", "person", "tense", "verbform",
    "voice",
];

/// Structural attributes copied into window and ancestor slots.
pub const SHAPE_ATTRS: [&str; 3] = ["is_capitalized", "is_upper", "n_children"];

/// Categorical sentinel for missing context.
pub const NA: &str = "NA";

/// Numeric sentinel for missing context.
pub const MISSING: i64 = -1;

/// Schema for the default configuration (window 2, ancestor features off).
pub static DEFAULT_SCHEMA: Lazy<FeatureSchema> = Lazy::new(|| FeatureSchema::new(2, false));

/// Ordered column layout of a feature table.
///
/// Columns depend only on the window size and whether ancestor features are
/// enabled; for the default configuration the layout is exactly the
/// 89-column contract the boundary classifier was trained against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    window: usize,
    ancestors: bool,
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Build the schema for a window size and ancestor toggle.
    #[must_use]
    pub fn new(window: usize, ancestors: bool) -> Self {
        let mut columns = Vec::new();
        for attr in TOKEN_ATTRS {
            columns.push(attr.to_string());
        }
        for attr in TOKEN_ATTRS {
            columns.push(format!("parent_{attr}"));
        }
        for k in 1..=window {
            for attr in TOKEN_ATTRS {
                columns.push(format!("{attr}_prev_{k}"));
            }
            for attr in TOKEN_ATTRS {
                columns.push(format!("parent_{attr}_prev_{k}"));
            }
        }
        columns.push("is_capitalized".to_string());
        columns.push("is_upper".to_string());
        columns.push("position".to_string());
        columns.push("distance_to_end".to_string());
        columns.push("n_children".to_string());
        for k in 1..=window {
            for attr in SHAPE_ATTRS {
                columns.push(format!("{attr}_prev_{k}"));
            }
        }
        if ancestors {
            for k in (1..=window).rev() {
                let m = k - 1;
                for attr in TOKEN_ATTRS {
                    columns.push(format!("{attr}_ancestor_{k}_{m}"));
                }
                for attr in SHAPE_ATTRS {
                    columns.push(format!("{attr}_ancestor_{k}_{m}"));
                }
                columns.push(format!("distance{k}_ancestor_{k}_{m}"));
                columns.push(format!("distance{m}_ancestor_{k}_{m}"));
                columns.push(format!("index_ancestor_{k}_{m}"));
            }
            columns.push("same_common_ancestors".to_string());
        }
        Self {
            window,
            ancestors,
            columns,
        }
    }

    /// Window size the schema was built for.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Whether ancestor columns are present.
    #[must_use]
    pub fn has_ancestors(&self) -> bool {
        self.ancestors
    }

    /// Column names in output order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns (never true in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

mod static_checks {
    use super::{MORPH_ATTRS, SHAPE_ATTRS, TOKEN_ATTRS};

    const BASE: usize = 2 * TOKEN_ATTRS.len();
    const DEFAULT_COLUMNS: usize = BASE + 2 * BASE + 5 + 2 * SHAPE_ATTRS.len();
    const _: () = assert!(DEFAULT_COLUMNS == 89);
    const _: () = assert!(TOKEN_ATTRS.len() == MORPH_ATTRS.len() + 3);
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_COLUMNS: [&str; 89] = [
        "lemma",
        "upos",
        "animacy",
        "aspect",
        "case",
        "degree",
        "gender",
        "number",
        "person",
        "tense",
        "verbform",
        "voice",
        "deprel",
        "parent_lemma",
        "parent_upos",
        "parent_animacy",
        "parent_aspect",
        "parent_case",
        "parent_degree",
        "parent_gender",
        "parent_number",
        "parent_person",
        "parent_tense",
        "parent_verbform",
        "parent_voice",
        "parent_deprel",
        "lemma_prev_1",
        "upos_prev_1",
        "animacy_prev_1",
        "aspect_prev_1",
        "case_prev_1",
        "degree_prev_1",
        "gender_prev_1",
        "number_prev_1",
        "person_prev_1",
        "tense_prev_1",
        "verbform_prev_1",
        "voice_prev_1",
        "deprel_prev_1",
        "parent_lemma_prev_1",
        "parent_upos_prev_1",
        "parent_animacy_prev_1",
        "parent_aspect_prev_1",
        "parent_case_prev_1",
        "parent_degree_prev_1",
        "parent_gender_prev_1",
        "parent_number_prev_1",
        "parent_person_prev_1",
        "parent_tense_prev_1",
        "parent_verbform_prev_1",
        "parent_voice_prev_1",
        "parent_deprel_prev_1",
        "lemma_prev_2",
        "upos_prev_2",
        "animacy_prev_2",
        "aspect_prev_2",
        "case_prev_2",
        "degree_prev_2",
        "gender_prev_2",
        "number_prev_2",
        "person_prev_2",
        "tense_prev_2",
        "verbform_prev_2",
        "voice_prev_2",
        "deprel_prev_2",
        "parent_lemma_prev_2",
        "parent_upos_prev_2",
        "parent_animacy_prev_2",
        "parent_aspect_prev_2",
        "parent_case_prev_2",
        "parent_degree_prev_2",
        "parent_gender_prev_2",
        "parent_number_prev_2",
        "parent_person_prev_2",
        "parent_tense_prev_2",
        "parent_verbform_prev_2",
        "parent_voice_prev_2",
        "parent_deprel_prev_2",
        "is_capitalized",
        "is_upper",
        "position",
        "distance_to_end",
        "n_children",
        "is_capitalized_prev_1",
        "is_upper_prev_1",
        "n_children_prev_1",
        "is_capitalized_prev_2",
        "is_upper_prev_2",
        "n_children_prev_2",
    ];

    #[test]
    fn default_schema_matches_classifier_contract() {
        let schema = FeatureSchema::new(2, false);
        assert_eq!(schema.len(), DEFAULT_COLUMNS.len());
        for (got, want) in schema.columns().iter().zip(DEFAULT_COLUMNS) {
            assert_eq!(got, want);
        }
        assert_eq!(*DEFAULT_SCHEMA, schema);
    }

    #[test]
    fn ancestor_columns_extend_the_base_layout() {
        // 13 attrs + 3 shape + 2 distances + 1 index = 19 per offset
        let schema = FeatureSchema::new(2, true);
        assert_eq!(schema.len(), 89 + 2 * 19 + 1);
        assert_eq!(schema.columns()[89], "lemma_ancestor_2_1");
        assert_eq!(schema.columns()[102], "is_capitalized_ancestor_2_1");
        assert_eq!(schema.columns()[105], "distance2_ancestor_2_1");
        assert_eq!(schema.columns()[106], "distance1_ancestor_2_1");
        assert_eq!(schema.columns()[107], "index_ancestor_2_1");
        assert_eq!(schema.columns()[108], "lemma_ancestor_1_0");
        assert_eq!(schema.columns()[126], "index_ancestor_1_0");
        assert_eq!(schema.columns()[127], "same_common_ancestors");
        assert_eq!(schema.columns().last().unwrap(), "same_common_ancestors");
    }

    #[test]
    fn window_size_scales_prev_blocks() {
        let schema = FeatureSchema::new(3, false);
        // 26 base + 3 * 26 window + 5 + 3 * 3 window shapes
        assert_eq!(schema.len(), 26 + 78 + 5 + 9);
        assert!(schema.column_index("lemma_prev_3").is_some());
        assert!(schema.column_index("n_children_prev_3").is_some());
        assert!(schema.column_index("position_prev_1").is_none());
    }
}
