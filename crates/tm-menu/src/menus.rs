//! Menu drawing.
//!
//! [`Menus`] looks a menu up in a [`MenuSource`], builds its [`MenuTree`],
//! resolves the request path and returns a [`MenuContext`] ready for rendering.
//!
//! # Caching
//!
//! With [`MenusConfig::cache_enabled`], built trees are kept per menu name as
//! `Arc<MenuTree>` and shared between calls. Only the flag-free structure is
//! cached; every `draw` resolves into its own [`ActivePath`], so concurrent
//! requests never see each other's active items. Call [`Menus::invalidate`]
//! after the items of a menu change.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::record::MenuMeta;
use crate::resolve::ActivePath;
use crate::source::MenuSource;
use crate::tree::{MenuTree, Node};

/// Path used when the caller has no request path.
pub const DEFAULT_PATH: &str = "/";

/// Configuration for [`Menus`].
#[derive(Clone, Debug, Default)]
pub struct MenusConfig {
    /// Keep built trees between calls.
    pub cache_enabled: bool,
}

/// Everything a renderer needs to draw one menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuContext {
    /// Requested menu name.
    pub menu_name: String,
    /// Menu metadata, `None` for unknown menus.
    pub menu: Option<MenuMeta>,
    /// Top-level nodes with flags applied.
    pub roots: Vec<Node>,
    /// The active node and its subtree.
    pub active_node: Option<Node>,
    /// Wrap the tree in a dropdown container.
    pub render_as_dropdown: bool,
    /// Dropdown container title.
    pub dropdown_title: String,
}

impl MenuContext {
    /// Context for a menu that does not exist.
    fn empty(menu_name: &str) -> Self {
        Self {
            menu_name: menu_name.to_owned(),
            menu: None,
            roots: Vec::new(),
            active_node: None,
            render_as_dropdown: false,
            dropdown_title: String::new(),
        }
    }
}

/// Menu drawing service.
///
/// Safe to share between threads.
pub struct Menus {
    source: Arc<dyn MenuSource>,
    cache_enabled: bool,
    trees: RwLock<HashMap<String, Arc<MenuTree>>>,
}

impl Menus {
    /// Create a menu service over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn MenuSource>, config: MenusConfig) -> Self {
        Self {
            source,
            cache_enabled: config.cache_enabled,
            trees: RwLock::new(HashMap::new()),
        }
    }

    /// Draw menu `menu_name` for `current_path` (defaults to [`DEFAULT_PATH`]).
    ///
    /// Unknown menus produce an empty context.
    #[must_use]
    pub fn draw(&self, menu_name: &str, current_path: Option<&str>) -> MenuContext {
        let Some(menu) = self.source.menu(menu_name) else {
            tracing::debug!(menu = menu_name, "Unknown menu");
            return MenuContext::empty(menu_name);
        };

        let current_path = current_path.unwrap_or(DEFAULT_PATH);
        let tree = self.tree(menu_name);
        let active = tree.resolve(current_path);

        tracing::debug!(
            menu = menu_name,
            path = current_path,
            active = ?active.active_id(),
            "Resolved menu"
        );

        MenuContext {
            menu_name: menu_name.to_owned(),
            roots: tree.render(&active),
            active_node: tree.active_node(&active),
            render_as_dropdown: menu.render_as_dropdown,
            dropdown_title: menu.dropdown_title.clone(),
            menu: Some(menu),
        }
    }

    /// Resolve `current_path` in menu `menu_name` without rendering.
    #[must_use]
    pub fn resolve(&self, menu_name: &str, current_path: &str) -> ActivePath {
        if self.source.menu(menu_name).is_none() {
            return ActivePath::default();
        }
        self.tree(menu_name).resolve(current_path)
    }

    /// Drop the cached tree of `menu_name`.
    pub fn invalidate(&self, menu_name: &str) {
        let removed = self
            .trees
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(menu_name)
            .is_some();
        if removed {
            tracing::debug!(menu = menu_name, "Invalidated menu tree");
        }
    }

    /// Drop all cached trees.
    pub fn invalidate_all(&self) {
        self.trees
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get the tree for `menu_name`, building it if it is not cached.
    fn tree(&self, menu_name: &str) -> Arc<MenuTree> {
        if !self.cache_enabled {
            return Arc::new(self.build(menu_name));
        }

        // Fast path: tree already cached
        if let Some(tree) = self
            .trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(menu_name)
        {
            return Arc::clone(tree);
        }

        let mut trees = self.trees.write().unwrap_or_else(PoisonError::into_inner);
        // Double-check after acquiring the write lock
        if let Some(tree) = trees.get(menu_name) {
            return Arc::clone(tree);
        }
        let tree = Arc::new(self.build(menu_name));
        trees.insert(menu_name.to_owned(), Arc::clone(&tree));
        tree
    }

    fn build(&self, menu_name: &str) -> MenuTree {
        let items = self.source.items(menu_name);
        tracing::debug!(menu = menu_name, items = items.len(), "Building menu tree");
        MenuTree::build(&items)
    }
}
