//! Lowest-common-ancestor computation over dependency parent links.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::annotation::Sentence;

/// Result of a lowest-common-ancestor walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lca {
    /// 0-based token index of the ancestor.
    pub index: usize,
    /// Edge distance from the first query token (0 when it is the ancestor
    /// itself).
    pub distance_a: usize,
    /// Edge distance from the second query token.
    pub distance_b: usize,
}

/// Parent chain of a token, starting with the token itself.
///
/// The walk ends at a root edge, at a head pointing outside the sentence,
/// or at a revisited index, so malformed (cyclic or dangling) trees
/// terminate instead of looping.
fn ancestor_chain(sentence: &Sentence, start: usize) -> Vec<usize> {
    let mut chain = vec![start];
    let mut seen: HashSet<usize> = HashSet::new();
    seen.insert(start);
    let mut current = start;
    while let Some(parent) = sentence.dep(current).and_then(|d| d.head()) {
        if parent >= sentence.len() || !seen.insert(parent) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain
}

/// Lowest common ancestor of two tokens with the edge distance from each,
/// or `None` when the tokens are out of range or share no ancestor
/// (disconnected forest).
///
/// A token counts as its own ancestor at distance 0, so when one token
/// dominates the other the dominating token is returned.
#[must_use]
pub fn lowest_common_ancestor(sentence: &Sentence, a: usize, b: usize) -> Option<Lca> {
    if a >= sentence.len() || b >= sentence.len() {
        return None;
    }
    let chain_a = ancestor_chain(sentence, a);
    let distances_b: HashMap<usize, usize> = ancestor_chain(sentence, b)
        .into_iter()
        .enumerate()
        .map(|(distance, index)| (index, distance))
        .collect();
    chain_a
        .into_iter()
        .enumerate()
        .find_map(|(distance_a, index)| {
            distances_b.get(&index).map(|&distance_b| Lca {
                index,
                distance_a,
                distance_b,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{DependencyEdge, Sentence, Token};

    fn tok(form: &str) -> Token {
        Token::new(form, form, "X", 0, form.len())
    }

    fn sentence(heads: &[Option<usize>]) -> Sentence {
        let tokens = heads.iter().map(|_| tok("w")).collect();
        let deps = heads
            .iter()
            .map(|h| match h {
                Some(parent) => DependencyEdge::to_parent(*parent, "dep"),
                None => DependencyEdge::root("root"),
            })
            .collect();
        Sentence::new(tokens, deps).unwrap()
    }

    #[test]
    fn shared_root_with_distances() {
        // 0 = root, 1 = A (child of root), 2 = B (child of A), 3 = C (child of root)
        let s = sentence(&[None, Some(0), Some(1), Some(0)]);
        let lca = lowest_common_ancestor(&s, 2, 3).unwrap();
        assert_eq!(lca.index, 0);
        assert_eq!(lca.distance_a, 2);
        assert_eq!(lca.distance_b, 1);
    }

    #[test]
    fn dominating_token_is_its_own_ancestor() {
        let s = sentence(&[None, Some(0), Some(1)]);
        let lca = lowest_common_ancestor(&s, 1, 2).unwrap();
        assert_eq!(lca.index, 1);
        assert_eq!(lca.distance_a, 0);
        assert_eq!(lca.distance_b, 1);
    }

    #[test]
    fn identical_tokens_have_zero_distances() {
        let s = sentence(&[None, Some(0)]);
        assert_eq!(
            lowest_common_ancestor(&s, 1, 1),
            Some(Lca {
                index: 1,
                distance_a: 0,
                distance_b: 0
            })
        );
    }

    #[test]
    fn root_at_index_zero_is_found() {
        let s = sentence(&[None, Some(0), Some(0)]);
        let lca = lowest_common_ancestor(&s, 1, 2).unwrap();
        assert_eq!(lca.index, 0);
    }

    #[test]
    fn disjoint_forest_has_no_ancestor() {
        // two independent roots
        let s = sentence(&[None, None]);
        assert_eq!(lowest_common_ancestor(&s, 0, 1), None);
    }

    #[test]
    fn cyclic_tree_terminates() {
        let s = sentence(&[Some(1), Some(0), Some(0)]);
        // chains stop at the revisited index, no common member survives
        // beyond the shared cycle entry
        let lca = lowest_common_ancestor(&s, 2, 0);
        assert!(lca.is_some());
        assert_eq!(lowest_common_ancestor(&s, 0, 0).unwrap().distance_a, 0);
    }

    #[test]
    fn out_of_range_queries_are_none() {
        let s = sentence(&[None]);
        assert_eq!(lowest_common_ancestor(&s, 0, 5), None);
        assert_eq!(lowest_common_ancestor(&s, 5, 0), None);
    }

    #[test]
    fn dangling_head_ends_the_chain() {
        let s = sentence(&[Some(7), Some(0)]);
        let lca = lowest_common_ancestor(&s, 1, 0).unwrap();
        assert_eq!(lca.index, 0);
        assert_eq!((lca.distance_a, lca.distance_b), (1, 0));
    }
}
