//! Menu input records and metadata.
//!
//! [`MenuItemRecord`] is the flat, already-resolved form of a menu item that the
//! tree builder consumes. [`MenuMeta`] carries the per-menu display settings that
//! are passed through to renderers untouched.

use serde::{Deserialize, Serialize};

/// URL used for items without a real destination.
pub const PLACEHOLDER_URL: &str = "#";

/// Menu item identifier, unique within a menu.
pub type ItemId = i64;

/// A menu item with its target URL already resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemRecord {
    /// Item identifier.
    pub id: ItemId,
    /// Parent item identifier, `None` for top-level items.
    pub parent_id: Option<ItemId>,
    /// Display title.
    pub title: String,
    /// Final link target (a path, an explicit URL, or [`PLACEHOLDER_URL`]).
    pub resolved_url: String,
    /// Sort position among siblings (lower first).
    pub order: u32,
    /// Name of the menu this item belongs to.
    pub menu_name: String,
}

impl MenuItemRecord {
    /// Sibling ordering key: `(order, id)` ascending.
    #[must_use]
    pub fn sort_key(&self) -> (u32, ItemId) {
        (self.order, self.id)
    }
}

/// Sort records by their sibling ordering key.
///
/// [`MenuTree::build`](crate::MenuTree::build) expects its input in this order.
pub fn sort_records(records: &mut [MenuItemRecord]) {
    records.sort_by_key(MenuItemRecord::sort_key);
}

/// Per-menu display settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuMeta {
    /// System name used to look the menu up.
    pub name: String,
    /// Human-readable name (may be empty).
    #[serde(default)]
    pub verbose_name: String,
    /// Wrap the whole tree in a single dropdown container.
    #[serde(default)]
    pub render_as_dropdown: bool,
    /// Title of the dropdown container, used when `render_as_dropdown` is set.
    #[serde(default)]
    pub dropdown_title: String,
}

impl MenuMeta {
    /// Create metadata with only a system name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Title to show for the menu: the verbose name, or the system name if unset.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.verbose_name.is_empty() {
            &self.name
        } else {
            &self.verbose_name
        }
    }
}
