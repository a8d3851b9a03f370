//! Active-path resolution.
//!
//! Picks the entry that represents the current request path and collects its
//! ancestor chain. Entries are examined in ascending id order:
//!
//! 1. The first entry whose URL equals the path exactly wins.
//! 2. Otherwise the entry with the longest non-empty URL that is a string
//!    prefix of the path wins. Equal lengths keep the earlier entry.
//!    A [`PLACEHOLDER_URL`] entry still counts towards the best length but
//!    is never selected; the previously tracked candidate is kept instead.
//! 3. Parents of the winner are walked up to a root.

use std::collections::HashSet;

use crate::record::{ItemId, PLACEHOLDER_URL};
use crate::tree::MenuTree;

/// Result of resolving a request path against a [`MenuTree`].
///
/// Holds the per-request flags separately from the shared tree structure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivePath {
    active: Option<ItemId>,
    ancestors: Vec<ItemId>,
}

impl ActivePath {
    /// Id of the active entry.
    #[must_use]
    pub fn active_id(&self) -> Option<ItemId> {
        self.active
    }

    /// Ancestor ids, nearest parent first.
    #[must_use]
    pub fn ancestor_ids(&self) -> &[ItemId] {
        &self.ancestors
    }

    /// Whether no entry matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    /// Whether `id` is the active entry.
    #[must_use]
    pub fn is_active(&self, id: ItemId) -> bool {
        self.active == Some(id)
    }

    /// Whether `id` is an ancestor of the active entry.
    #[must_use]
    pub fn is_ancestor(&self, id: ItemId) -> bool {
        self.ancestors.contains(&id)
    }
}

impl MenuTree {
    /// Resolve `current_path` to an active entry and its ancestors.
    ///
    /// Never modifies the tree; calling it repeatedly gives the same result.
    #[must_use]
    pub fn resolve(&self, current_path: &str) -> ActivePath {
        let Some(active) = self
            .find_exact(current_path)
            .or_else(|| self.find_longest_prefix(current_path))
        else {
            tracing::debug!(path = current_path, "No menu item matches path");
            return ActivePath::default();
        };

        let ancestors = self
            .ancestor_indices(active)
            .into_iter()
            .map(|idx| self.entries[idx].id)
            .collect();

        ActivePath {
            active: Some(self.entries[active].id),
            ancestors,
        }
    }

    fn find_exact(&self, current_path: &str) -> Option<usize> {
        self.id_order
            .iter()
            .copied()
            .find(|&idx| self.entries[idx].url == current_path)
    }

    fn find_longest_prefix(&self, current_path: &str) -> Option<usize> {
        let mut best_len = None;
        let mut active = None;

        for &idx in &self.id_order {
            let url = self.entries[idx].url.as_str();
            if url.is_empty() || !current_path.starts_with(url) {
                continue;
            }
            if best_len.is_some_and(|best| url.len() <= best) {
                continue;
            }
            best_len = Some(url.len());
            if url != PLACEHOLDER_URL {
                active = Some(idx);
            }
        }

        active
    }

    /// Walk parent links from `idx`, nearest first. Stops at a root or a cycle.
    fn ancestor_indices(&self, idx: usize) -> Vec<usize> {
        let mut visited = HashSet::from([idx]);
        let mut ancestors = Vec::new();
        let mut current = self.parents[idx];

        while let Some(parent) = current {
            if !visited.insert(parent) {
                tracing::warn!(
                    id = self.entries[parent].id,
                    "Cycle in menu parent chain, stopping ancestor walk"
                );
                break;
            }
            ancestors.push(parent);
            current = self.parents[parent];
        }

        ancestors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::record;

    fn demo_tree() -> MenuTree {
        MenuTree::build(&[
            record(1, None, "/"),
            record(2, None, "/catalog/"),
            record(3, Some(2), "/catalog/pricing/"),
            record(4, Some(2), "/catalog/integrations/"),
            record(5, None, "/about/"),
            record(6, None, "#"),
        ])
    }

    #[test]
    fn test_resolve_exact_match_wins_over_prefix() {
        let tree = MenuTree::build(&[record(1, None, "/a/"), record(2, Some(1), "/a/b/")]);

        let active = tree.resolve("/a/b/");

        assert_eq!(active.active_id(), Some(2));
    }

    #[test]
    fn test_resolve_longest_prefix_fallback() {
        let tree = demo_tree();

        let active = tree.resolve("/catalog/pricing/extra");

        assert_eq!(active.active_id(), Some(3));
        assert_eq!(active.ancestor_ids(), &[2]);
    }

    #[test]
    fn test_resolve_root_url_is_prefix_of_everything() {
        let tree = demo_tree();

        let active = tree.resolve("/contact/");

        assert_eq!(active.active_id(), Some(1));
        assert!(active.ancestor_ids().is_empty());
    }

    #[test]
    fn test_resolve_no_match_returns_empty() {
        let tree = MenuTree::build(&[record(1, None, "/catalog/"), record(2, None, "/about/")]);

        let active = tree.resolve("/nonexistent/");

        assert!(active.is_empty());
        assert!(active.ancestor_ids().is_empty());
        let nodes = tree.render(&active);
        assert!(nodes.iter().all(|n| !n.is_active && !n.is_ancestor));
    }

    #[test]
    fn test_resolve_empty_tree_returns_empty() {
        let tree = MenuTree::build(&[]);

        assert!(tree.resolve("/").is_empty());
    }

    #[test]
    fn test_resolve_prefix_never_selects_placeholder() {
        let tree = MenuTree::build(&[record(1, None, "#"), record(2, None, "#setup")]);

        assert!(tree.resolve("#other").is_empty());
        assert_eq!(tree.resolve("#setup/more").active_id(), Some(2));
    }

    #[test]
    fn test_resolve_exact_match_on_placeholder_path() {
        let tree = MenuTree::build(&[record(1, None, "#")]);

        assert!(tree.resolve("#").is_active(1));
    }

    #[test]
    fn test_resolve_placeholder_counts_towards_best_length() {
        // Both "#" entries set or match the best length of 1, so neither a
        // later "#" nor anything else of that length can take over.
        let tree = MenuTree::build(&[
            record(1, None, "#"),
            record(2, None, "#x"),
            record(3, None, "#"),
        ]);

        assert_eq!(tree.resolve("#xyz").active_id(), Some(2));
        assert!(tree.resolve("#abc").is_empty());
    }

    #[test]
    fn test_resolve_empty_url_is_ignored() {
        let tree = MenuTree::build(&[record(1, None, ""), record(2, None, "/a/")]);

        assert!(tree.resolve("/zzz/").is_empty());
    }

    #[test]
    fn test_resolve_duplicate_urls_pick_lowest_id() {
        let tree = MenuTree::build(&[record(7, None, "/dup/"), record(3, None, "/dup/")]);

        assert_eq!(tree.resolve("/dup/").active_id(), Some(3));
        assert_eq!(tree.resolve("/dup/more").active_id(), Some(3));
    }

    #[test]
    fn test_resolve_marks_ancestor_chain() {
        let tree = demo_tree();

        let active = tree.resolve("/catalog/pricing/");
        let nodes = tree.render(&active);

        let catalog = &nodes[1];
        assert_eq!(catalog.id, 2);
        assert!(catalog.is_ancestor);
        assert!(!catalog.is_active);
        let pricing = &catalog.children[0];
        assert!(pricing.is_active);
        assert!(!pricing.is_ancestor);

        let flagged = nodes
            .iter()
            .flat_map(|n| std::iter::once(n).chain(n.children.iter()))
            .filter(|n| n.is_active || n.is_ancestor)
            .count();
        assert_eq!(flagged, 2);
    }

    #[test]
    fn test_resolve_deep_chain_nearest_first() {
        let tree = MenuTree::build(&[
            record(1, None, "/a/"),
            record(2, Some(1), "/a/b/"),
            record(3, Some(2), "/a/b/c/"),
        ]);

        let active = tree.resolve("/a/b/c/");

        assert_eq!(active.ancestor_ids(), &[2, 1]);
        assert!(active.is_ancestor(1));
        assert!(!active.is_ancestor(3));
    }

    #[test]
    fn test_resolve_terminates_on_parent_cycle() {
        let tree = MenuTree::build(&[
            record(1, Some(3), "/a/"),
            record(2, Some(1), "/a/b/"),
            record(3, Some(2), "/a/b/c/"),
        ]);

        let active = tree.resolve("/a/b/");

        assert_eq!(active.active_id(), Some(2));
        assert_eq!(active.ancestor_ids(), &[1, 3]);
    }

    #[test]
    fn test_resolve_self_parent_terminates() {
        let tree = MenuTree::build(&[record(1, Some(1), "/a/")]);

        let active = tree.resolve("/a/");

        assert_eq!(active.active_id(), Some(1));
        assert!(active.ancestor_ids().is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let tree = demo_tree();

        let first = tree.resolve("/catalog/integrations/");
        let second = tree.resolve("/catalog/integrations/");

        assert_eq!(first, second);
        assert_eq!(tree.render(&first), tree.render(&second));
    }

    #[test]
    fn test_resolve_does_not_leak_between_paths() {
        let tree = demo_tree();

        let _ = tree.resolve("/catalog/pricing/");
        let active = tree.resolve("/about/");
        let nodes = tree.render(&active);

        assert!(nodes[2].is_active);
        assert!(!nodes[1].is_ancestor);
        assert!(nodes[1].children.iter().all(|n| !n.is_active));
    }

    #[test]
    fn test_active_node_renders_subtree() {
        let tree = demo_tree();

        let node = tree.active_node(&tree.resolve("/catalog/")).unwrap();

        assert_eq!(node.id, 2);
        assert!(node.is_active);
        assert_eq!(node.children.len(), 2);
    }
}
