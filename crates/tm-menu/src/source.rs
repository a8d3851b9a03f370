//! Menu lookup.
//!
//! [`MenuSource`] is the seam between menu drawing and wherever menus are
//! stored. [`MenuRegistry`] is the in-memory implementation used by the CLI and
//! in tests.

use std::collections::BTreeMap;

use crate::item::{NamedUrlResolver, StoredMenuItem};
use crate::record::{MenuItemRecord, MenuMeta, sort_records};

/// Provides menu metadata and items by menu name.
pub trait MenuSource: Send + Sync {
    /// Metadata for `name`, or `None` if the menu does not exist.
    fn menu(&self, name: &str) -> Option<MenuMeta>;

    /// Items of menu `name`, sorted by `(order, id)`.
    ///
    /// Returns an empty list for unknown menus.
    fn items(&self, name: &str) -> Vec<MenuItemRecord>;
}

/// In-memory menu storage.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: BTreeMap<String, MenuMeta>,
    items: BTreeMap<String, Vec<MenuItemRecord>>,
}

impl MenuRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from stored menus and items, resolving item URLs once.
    #[must_use]
    pub fn from_stored(
        menus: impl IntoIterator<Item = MenuMeta>,
        items: &[StoredMenuItem],
        resolver: &dyn NamedUrlResolver,
    ) -> Self {
        let mut registry = Self::new();
        for menu in menus {
            registry.insert_menu(menu);
        }
        for item in items {
            let record = item.to_record(resolver);
            registry
                .items
                .entry(record.menu_name.clone())
                .or_default()
                .push(record);
        }
        for records in registry.items.values_mut() {
            sort_records(records);
        }
        registry
    }

    /// Add or replace a menu.
    pub fn insert_menu(&mut self, menu: MenuMeta) {
        self.menus.insert(menu.name.clone(), menu);
    }

    /// Add an item to the menu named by `record.menu_name`.
    ///
    /// Items stay sorted by `(order, id)`.
    pub fn insert_item(&mut self, record: MenuItemRecord) {
        let items = self.items.entry(record.menu_name.clone()).or_default();
        let key = record.sort_key();
        let at = items.partition_point(|item| item.sort_key() <= key);
        items.insert(at, record);
    }

    /// All menus, sorted by name.
    pub fn menus(&self) -> impl Iterator<Item = &MenuMeta> {
        self.menus.values()
    }

    /// Number of items in menu `name`.
    #[must_use]
    pub fn item_count(&self, name: &str) -> usize {
        self.items.get(name).map_or(0, Vec::len)
    }
}

impl MenuSource for MenuRegistry {
    fn menu(&self, name: &str) -> Option<MenuMeta> {
        self.menus.get(name).cloned()
    }

    fn items(&self, name: &str) -> Vec<MenuItemRecord> {
        self.items.get(name).cloned().unwrap_or_default()
    }
}
