//! Menu tree structure.
//!
//! Provides [`MenuTree`], the flag-free structure of one menu, and [`Node`], the
//! owned tree handed to renderers.
//!
//! # Architecture
//!
//! Entries are stored in a flat `Vec<MenuEntry>` with parent/children
//! relationships tracked by indices. This provides:
//! - O(1) id lookups via the `id_index` `HashMap`
//! - O(n) construction from records sorted by `(order, id)`
//! - O(d) ancestor walks where d is the entry depth
//!
//! The structure never carries per-request state. Active and ancestor flags
//! live in [`ActivePath`] and are only merged in by [`MenuTree::render`], so a
//! single tree can be shared between concurrent requests.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{ItemId, MenuItemRecord};
use crate::resolve::ActivePath;

/// One menu item inside a [`MenuTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    /// Item identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Resolved link target.
    pub url: String,
    /// Declared parent id (may point outside the menu).
    pub parent_id: Option<ItemId>,
}

impl From<&MenuItemRecord> for MenuEntry {
    fn from(record: &MenuItemRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            url: record.resolved_url.clone(),
            parent_id: record.parent_id,
        }
    }
}

/// Rendered menu node with activity flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Item identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Declared parent id.
    pub parent_id: Option<ItemId>,
    /// Child nodes in sibling order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// This node represents the current page.
    pub is_active: bool,
    /// This node is on the path from the active node to its root.
    pub is_ancestor: bool,
}

/// Flag-free structure of a single menu.
#[derive(Clone, Debug, Default)]
pub struct MenuTree {
    pub(crate) entries: Vec<MenuEntry>,
    pub(crate) children: Vec<Vec<usize>>,
    pub(crate) parents: Vec<Option<usize>>,
    pub(crate) roots: Vec<usize>,
    /// Entry indices in ascending id order.
    pub(crate) id_order: Vec<usize>,
    id_index: HashMap<ItemId, usize>,
}

impl MenuTree {
    /// Build a tree from the records of one menu.
    ///
    /// Records must already be sorted by `(order, id)`; see
    /// [`sort_records`](crate::sort_records). Sibling order follows input order.
    ///
    /// A record whose parent is missing from `records` becomes a root. A
    /// duplicated id keeps its first position and takes the data of the last
    /// record with that id.
    #[must_use]
    pub fn build(records: &[MenuItemRecord]) -> Self {
        let mut entries: Vec<MenuEntry> = Vec::with_capacity(records.len());
        let mut id_index = HashMap::with_capacity(records.len());

        for record in records {
            if let Some(&idx) = id_index.get(&record.id) {
                tracing::warn!(
                    id = record.id,
                    menu = %record.menu_name,
                    "Duplicate menu item id, keeping the last record"
                );
                entries[idx] = MenuEntry::from(record);
            } else {
                id_index.insert(record.id, entries.len());
                entries.push(MenuEntry::from(record));
            }
        }

        let mut children = vec![Vec::new(); entries.len()];
        let mut parents = vec![None; entries.len()];
        let mut roots = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            match entry.parent_id.map(|pid| (pid, id_index.get(&pid))) {
                Some((_, Some(&parent))) => {
                    children[parent].push(idx);
                    parents[idx] = Some(parent);
                }
                Some((pid, None)) => {
                    tracing::debug!(
                        id = entry.id,
                        parent_id = pid,
                        "Parent not in menu, promoting to root"
                    );
                    roots.push(idx);
                }
                None => roots.push(idx),
            }
        }

        let mut id_order: Vec<usize> = (0..entries.len()).collect();
        id_order.sort_by_key(|&idx| entries[idx].id);

        let tree = Self {
            entries,
            children,
            parents,
            roots,
            id_order,
            id_index,
        };

        let unreachable = tree.len() - tree.reachable_count();
        if unreachable > 0 {
            tracing::warn!(
                unreachable,
                "Menu items form a parent cycle and are not rendered"
            );
        }

        tree
    }

    /// Number of entries in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by item id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&MenuEntry> {
        self.id_index.get(&id).map(|&idx| &self.entries[idx])
    }

    /// Ids of root entries in sibling order.
    #[must_use]
    pub fn root_ids(&self) -> Vec<ItemId> {
        self.roots.iter().map(|&idx| self.entries[idx].id).collect()
    }

    /// Ids of the direct children of `id` in sibling order.
    ///
    /// Returns an empty list for unknown ids.
    #[must_use]
    pub fn child_ids(&self, id: ItemId) -> Vec<ItemId> {
        self.id_index
            .get(&id)
            .map(|&idx| {
                self.children[idx]
                    .iter()
                    .map(|&child| self.entries[child].id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Index of an entry by id.
    pub(crate) fn index_of(&self, id: ItemId) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    /// Render the forest with the flags of `active` applied.
    ///
    /// Traversal starts at the roots, so entries caught in a parent cycle are
    /// left out.
    #[must_use]
    pub fn render(&self, active: &ActivePath) -> Vec<Node> {
        let marks = self.marks(active);
        self.roots
            .iter()
            .map(|&idx| self.build_node(idx, &marks))
            .collect()
    }

    /// Render the subtree of the active entry, if any.
    #[must_use]
    pub fn active_node(&self, active: &ActivePath) -> Option<Node> {
        let idx = self.index_of(active.active_id()?)?;
        let marks = self.marks(active);
        Some(self.build_node(idx, &marks))
    }

    /// Per-index `(is_active, is_ancestor)` flags.
    fn marks(&self, active: &ActivePath) -> Vec<(bool, bool)> {
        let mut marks = vec![(false, false); self.entries.len()];
        if let Some(idx) = active.active_id().and_then(|id| self.index_of(id)) {
            marks[idx].0 = true;
        }
        for idx in active.ancestor_ids().iter().filter_map(|&id| self.index_of(id)) {
            marks[idx].1 = true;
        }
        marks
    }

    fn build_node(&self, idx: usize, marks: &[(bool, bool)]) -> Node {
        let entry = &self.entries[idx];
        let (is_active, is_ancestor) = marks[idx];
        Node {
            id: entry.id,
            title: entry.title.clone(),
            url: entry.url.clone(),
            parent_id: entry.parent_id,
            children: self.children[idx]
                .iter()
                .map(|&child| self.build_node(child, marks))
                .collect(),
            is_active,
            is_ancestor,
        }
    }

    /// Count entries reachable from the roots.
    fn reachable_count(&self) -> usize {
        let mut stack = self.roots.clone();
        let mut count = 0;
        while let Some(idx) = stack.pop() {
            count += 1;
            stack.extend_from_slice(&self.children[idx]);
        }
        count
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: ItemId, parent_id: Option<ItemId>, url: &str) -> MenuItemRecord {
        MenuItemRecord {
            id,
            parent_id,
            title: format!("Item {id}"),
            resolved_url: url.to_owned(),
            order: 0,
            menu_name: "main_menu".to_owned(),
        }
    }

    fn collect_ids(nodes: &[Node], out: &mut Vec<ItemId>) {
        for node in nodes {
            out.push(node.id);
            collect_ids(&node.children, out);
        }
    }

    #[test]
    fn test_build_empty_returns_empty_tree() {
        let tree = MenuTree::build(&[]);

        assert!(tree.is_empty());
        assert!(tree.root_ids().is_empty());
        assert!(tree.render(&ActivePath::default()).is_empty());
    }

    #[test]
    fn test_build_nested_links_children() {
        let tree = MenuTree::build(&[
            record(1, None, "/"),
            record(2, None, "/catalog/"),
            record(3, Some(2), "/catalog/pricing/"),
            record(4, Some(2), "/catalog/integrations/"),
        ]);

        assert_eq!(tree.root_ids(), vec![1, 2]);
        assert_eq!(tree.child_ids(2), vec![3, 4]);
        assert!(tree.child_ids(1).is_empty());
        assert_eq!(tree.get(3).unwrap().url, "/catalog/pricing/");
    }

    #[test]
    fn test_build_every_entry_appears_once() {
        let records = vec![
            record(1, None, "/a/"),
            record(2, Some(1), "/a/b/"),
            record(3, Some(2), "/a/b/c/"),
            record(4, None, "/d/"),
            record(5, Some(4), "/d/e/"),
            record(6, Some(1), "/a/f/"),
        ];
        let tree = MenuTree::build(&records);

        let mut ids = Vec::new();
        collect_ids(&tree.render(&ActivePath::default()), &mut ids);
        ids.sort_unstable();

        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_build_missing_parent_promotes_to_root() {
        let tree = MenuTree::build(&[record(1, None, "/a/"), record(2, Some(99), "/b/")]);

        assert_eq!(tree.root_ids(), vec![1, 2]);
    }

    #[test]
    fn test_build_preserves_sibling_order() {
        let mut records = vec![
            MenuItemRecord {
                order: 20,
                ..record(2, Some(1), "/a/second/")
            },
            MenuItemRecord {
                order: 10,
                ..record(3, Some(1), "/a/first/")
            },
            MenuItemRecord {
                order: 10,
                ..record(4, Some(1), "/a/first-tie/")
            },
            record(1, None, "/a/"),
        ];
        crate::sort_records(&mut records);

        let tree = MenuTree::build(&records);

        assert_eq!(tree.child_ids(1), vec![3, 4, 2]);
    }

    #[test]
    fn test_build_duplicate_id_keeps_last_record_in_first_position() {
        let tree = MenuTree::build(&[
            record(1, None, "/old/"),
            record(2, None, "/b/"),
            record(1, None, "/new/"),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.root_ids(), vec![1, 2]);
        assert_eq!(tree.get(1).unwrap().url, "/new/");
    }

    #[test]
    fn test_build_parent_cycle_is_not_rendered() {
        let tree = MenuTree::build(&[
            record(1, None, "/a/"),
            record(2, Some(3), "/b/"),
            record(3, Some(2), "/c/"),
        ]);

        let nodes = tree.render(&ActivePath::default());

        assert_eq!(tree.len(), 3);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, 1);
    }

    #[test]
    fn test_render_without_active_has_no_flags() {
        let tree = MenuTree::build(&[record(1, None, "/a/"), record(2, Some(1), "/a/b/")]);

        let nodes = tree.render(&ActivePath::default());

        assert!(!nodes[0].is_active && !nodes[0].is_ancestor);
        assert!(!nodes[0].children[0].is_active && !nodes[0].children[0].is_ancestor);
    }

    #[test]
    fn test_node_serialization_skips_empty_children() {
        let tree = MenuTree::build(&[record(1, None, "/a/")]);

        let json = serde_json::to_value(&tree.render(&ActivePath::default())[0]).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["url"], "/a/");
        assert_eq!(json["is_active"], false);
        assert!(json.get("children").is_none());
    }
}
