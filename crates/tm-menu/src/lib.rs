//! Navigation menu trees with active-path resolution.
//!
//! This crate provides:
//! - [`MenuTree`]: builds a forest from flat, pre-sorted [`MenuItemRecord`]s
//! - [`MenuTree::resolve`]: finds the item for the current request path and
//!   its ancestors, returned as an [`ActivePath`]
//! - [`Menus`]: looks menus up in a [`MenuSource`] and produces a
//!   [`MenuContext`] for rendering, with optional per-menu tree caching
//! - [`StoredMenuItem`] and [`RouteTable`]: turn route names or explicit URLs
//!   into the resolved URLs the tree works with
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tm_menu::{MenuMeta, MenuRegistry, Menus, MenusConfig, RouteTable, StoredMenuItem};
//!
//! let routes = RouteTable::new()
//!     .route("catalog", "catalog/")
//!     .route("pricing", "catalog/pricing/");
//! let item = |id, parent_id, named_url: &str| StoredMenuItem {
//!     id,
//!     menu_name: "main_menu".to_owned(),
//!     parent_id,
//!     title: named_url.to_owned(),
//!     named_url: named_url.to_owned(),
//!     url: String::new(),
//!     order: 0,
//! };
//! let registry = MenuRegistry::from_stored(
//!     [MenuMeta::new("main_menu")],
//!     &[item(1, None, "catalog"), item(2, Some(1), "pricing")],
//!     &routes,
//! );
//!
//! let menus = Menus::new(Arc::new(registry), MenusConfig::default());
//! let ctx = menus.draw("main_menu", Some("/catalog/pricing/"));
//!
//! assert!(ctx.roots[0].is_ancestor);
//! assert!(ctx.roots[0].children[0].is_active);
//! ```

mod item;
mod menus;
mod record;
mod resolve;
mod routes;
mod source;
mod tree;

pub use item::{NamedUrlResolver, StoredMenuItem};
pub use menus::{DEFAULT_PATH, MenuContext, Menus, MenusConfig};
pub use record::{ItemId, MenuItemRecord, MenuMeta, PLACEHOLDER_URL, sort_records};
pub use resolve::ActivePath;
pub use routes::{EMPTY_CHOICE_LABEL, RouteTable};
pub use source::{MenuRegistry, MenuSource};
pub use tree::{MenuEntry, MenuTree, Node};
