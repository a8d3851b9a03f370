//! Named route table.
//!
//! [`RouteTable`] maps route names to paths so that menu items can refer to
//! pages by name. Tables can be mounted inside each other under a path prefix
//! and an optional namespace; nested namespaces are joined with `:`.
//!
//! ```
//! use tm_menu::RouteTable;
//!
//! let pages = RouteTable::new()
//!     .route("home", "")
//!     .route("pricing", "catalog/pricing/");
//! let root = RouteTable::new().include("", "tree_menu", pages);
//!
//! assert_eq!(root.reverse("tree_menu:pricing").as_deref(), Some("/catalog/pricing/"));
//! assert_eq!(root.reverse("tree_menu:home").as_deref(), Some("/"));
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::item::NamedUrlResolver;

/// Label of the empty entry at the top of [`RouteTable::url_choices`].
pub const EMPTY_CHOICE_LABEL: &str = "--- Select URL ---";

#[derive(Clone, Debug)]
struct Route {
    name: String,
    pattern: String,
}

#[derive(Clone, Debug)]
struct Include {
    prefix: String,
    namespace: String,
    table: RouteTable,
}

/// Table of named routes.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    includes: Vec<Include>,
    /// Qualified name to path, built on first lookup.
    index: OnceLock<HashMap<String, String>>,
}

impl RouteTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named route. `pattern` is relative, without a leading slash.
    #[must_use]
    pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes.push(Route {
            name: name.into(),
            pattern: pattern.into(),
        });
        self.index = OnceLock::new();
        self
    }

    /// Mount `table` under `prefix`, qualifying its names with `namespace`.
    ///
    /// An empty namespace mounts the routes without adding a name segment.
    #[must_use]
    pub fn include(
        mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        table: RouteTable,
    ) -> Self {
        self.includes.push(Include {
            prefix: prefix.into(),
            namespace: namespace.into(),
            table,
        });
        self.index = OnceLock::new();
        self
    }

    /// Resolve a qualified route name to an absolute path.
    ///
    /// When several routes share a name, the first registered one wins.
    #[must_use]
    pub fn reverse(&self, name: &str) -> Option<String> {
        self.index().get(name).cloned()
    }

    /// All qualified route names, sorted and deduplicated.
    #[must_use]
    pub fn named_urls(&self) -> Vec<String> {
        let mut names: Vec<String> = self.flatten().into_iter().map(|(name, _)| name).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Choice list for picking a route: an empty entry, then one
    /// `(name, name)` pair per route name.
    #[must_use]
    pub fn url_choices(&self) -> Vec<(String, String)> {
        std::iter::once((String::new(), EMPTY_CHOICE_LABEL.to_owned()))
            .chain(self.named_urls().into_iter().map(|name| (name.clone(), name)))
            .collect()
    }

    fn index(&self) -> &HashMap<String, String> {
        self.index.get_or_init(|| {
            let mut index = HashMap::new();
            for (name, path) in self.flatten() {
                index.entry(name).or_insert(path);
            }
            index
        })
    }

    /// Qualified `(name, absolute path)` pairs in registration order.
    fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_into("", "", &mut out);
        out
    }

    fn collect_into(&self, namespace: &str, prefix: &str, out: &mut Vec<(String, String)>) {
        for route in &self.routes {
            if route.name.is_empty() {
                continue;
            }
            out.push((
                qualify(namespace, &route.name),
                format!("/{prefix}{}", route.pattern),
            ));
        }
        for include in &self.includes {
            let namespace = if include.namespace.is_empty() {
                namespace.to_owned()
            } else {
                qualify(namespace, &include.namespace)
            };
            let prefix = format!("{prefix}{}", include.prefix);
            include.table.collect_into(&namespace, &prefix, out);
        }
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_owned()
    } else {
        format!("{namespace}:{name}")
    }
}

impl NamedUrlResolver for RouteTable {
    fn resolve_named_url(&self, name: &str) -> Option<String> {
        self.reverse(name)
    }
}
