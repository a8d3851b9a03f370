//! Stored menu items and link target resolution.
//!
//! A [`StoredMenuItem`] points either at a named route or at an explicit URL.
//! Turning it into a [`MenuItemRecord`] resolves the target once, through an
//! injected [`NamedUrlResolver`]:
//!
//! - a named route that resolves wins;
//! - otherwise the explicit URL, if any;
//! - otherwise [`PLACEHOLDER_URL`].

use serde::{Deserialize, Serialize};

use crate::record::{ItemId, MenuItemRecord, PLACEHOLDER_URL};

/// Resolves route names to paths.
pub trait NamedUrlResolver {
    /// Return the path for `name`, or `None` if no such route exists.
    fn resolve_named_url(&self, name: &str) -> Option<String>;
}

impl<F> NamedUrlResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve_named_url(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Menu item as it is stored, before its link target is resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMenuItem {
    /// Item identifier.
    pub id: ItemId,
    /// Name of the owning menu.
    pub menu_name: String,
    /// Parent item identifier.
    pub parent_id: Option<ItemId>,
    /// Display title.
    pub title: String,
    /// Route name (e.g. `tree_menu:pricing`). Takes precedence over `url`.
    #[serde(default)]
    pub named_url: String,
    /// Explicit URL, used when `named_url` is empty or does not resolve.
    #[serde(default)]
    pub url: String,
    /// Sort position among siblings.
    #[serde(default)]
    pub order: u32,
}

impl StoredMenuItem {
    /// Resolve the link target of this item.
    pub fn target_url(&self, resolver: &dyn NamedUrlResolver) -> String {
        if !self.named_url.is_empty() {
            if let Some(path) = resolver.resolve_named_url(&self.named_url) {
                return path;
            }
            tracing::debug!(
                item = self.id,
                named_url = %self.named_url,
                "Named URL does not resolve, falling back"
            );
        }
        if self.url.is_empty() {
            PLACEHOLDER_URL.to_owned()
        } else {
            self.url.clone()
        }
    }

    /// Build the resolved record for this item.
    pub fn to_record(&self, resolver: &dyn NamedUrlResolver) -> MenuItemRecord {
        MenuItemRecord {
            id: self.id,
            parent_id: self.parent_id,
            title: self.title.clone(),
            resolved_url: self.target_url(resolver),
            order: self.order,
            menu_name: self.menu_name.clone(),
        }
    }
}
