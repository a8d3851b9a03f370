//! Conversion from configuration to menu structures.
//!
//! Item ids are assigned sequentially across all menus in declaration order,
//! starting at 1, the way a database would number freshly inserted rows.

use std::collections::HashMap;
use std::sync::Arc;

use tm_config::Config;
use tm_menu::{
    ItemId, MenuMeta, MenuRegistry, Menus, MenusConfig, NamedUrlResolver, RouteTable,
    StoredMenuItem,
};

/// Build the named route table from `[[routes]]` groups.
pub(crate) fn route_table(config: &Config) -> RouteTable {
    config.routes.iter().fold(RouteTable::new(), |table, group| {
        let routes = group
            .urls
            .iter()
            .fold(RouteTable::new(), |routes, route| {
                routes.route(route.name.as_str(), route.path.as_str())
            });
        table.include(group.prefix.as_str(), group.namespace.as_str(), routes)
    })
}

/// Stored items of every configured menu.
pub(crate) fn stored_items(config: &Config) -> Vec<StoredMenuItem> {
    let mut items = Vec::new();
    let mut next_id: ItemId = 1;

    for menu in &config.menus {
        let first_id = next_id;
        let ids: HashMap<&str, ItemId> = menu
            .items
            .iter()
            .zip(first_id..)
            .map(|(item, id)| (item.key.as_str(), id))
            .collect();

        for (item, id) in menu.items.iter().zip(first_id..) {
            items.push(StoredMenuItem {
                id,
                menu_name: menu.name.clone(),
                parent_id: item.parent.as_deref().and_then(|key| ids.get(key).copied()),
                title: item.title.clone(),
                named_url: item.named_url.clone(),
                url: item.url.clone(),
                order: item.order,
            });
            next_id = id + 1;
        }
    }

    items
}

/// Build the in-memory menu registry, resolving item URLs with `resolver`.
pub(crate) fn menu_registry(config: &Config, resolver: &dyn NamedUrlResolver) -> MenuRegistry {
    let metas = config.menus.iter().map(|menu| MenuMeta {
        name: menu.name.clone(),
        verbose_name: menu.verbose_name.clone(),
        render_as_dropdown: menu.render_as_dropdown,
        dropdown_title: menu.dropdown_title.clone(),
    });
    MenuRegistry::from_stored(metas, &stored_items(config), resolver)
}

/// Build the menu drawing service for `config`.
pub(crate) fn menus(config: &Config) -> Menus {
    let routes = route_table(config);
    let registry = menu_registry(config, &routes);
    Menus::new(
        Arc::new(registry),
        MenusConfig {
            cache_enabled: config.cache.enabled,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tm_menu::MenuSource;

    #[test]
    fn test_route_table_from_demo_config() {
        let config = Config::demo().unwrap();

        let routes = route_table(&config);

        assert_eq!(routes.reverse("tree_menu:home").as_deref(), Some("/"));
        assert_eq!(
            routes.reverse("tree_menu:integrations").as_deref(),
            Some("/catalog/integrations/")
        );
    }

    #[test]
    fn test_stored_items_assign_sequential_ids_across_menus() {
        let config = Config::demo().unwrap();

        let items = stored_items(&config);

        assert_eq!(items.len(), 14);
        let ids: Vec<_> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, (1..=14).collect::<Vec<_>>());
        assert_eq!(items[6].menu_name, "sidebar_menu");
    }

    #[test]
    fn test_stored_items_link_parents_by_key() {
        let config = Config::demo().unwrap();

        let items = stored_items(&config);

        let pricing = items.iter().find(|item| item.title == "Pricing").unwrap();
        let catalog = items.iter().find(|item| item.title == "Catalog").unwrap();
        assert_eq!(pricing.parent_id, Some(catalog.id));
    }

    #[test]
    fn test_menu_registry_resolves_demo_urls() {
        let config = Config::demo().unwrap();
        let routes = route_table(&config);

        let registry = menu_registry(&config, &routes);

        let urls: Vec<_> = registry
            .items("sidebar_menu")
            .into_iter()
            .map(|record| record.resolved_url)
            .collect();
        assert_eq!(urls, vec!["/", "#setup", "/about/", "#admin", "#"]);
    }

    #[test]
    fn test_menus_draw_demo_main_menu() {
        let config = Config::demo().unwrap();

        let ctx = menus(&config).draw("main_menu", Some("/catalog/pricing/"));

        let titles: Vec<_> = ctx.roots.iter().map(|node| node.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "Catalog", "About", "Contact"]);
        assert!(ctx.roots[1].is_ancestor);
        assert!(ctx.roots[1].children[0].is_active);
        assert_eq!(ctx.active_node.unwrap().title, "Pricing");
    }

    #[test]
    fn test_menus_draw_demo_sidebar_placeholder_never_active() {
        let config = Config::demo().unwrap();

        let ctx = menus(&config).draw("sidebar_menu", Some("/contact/"));

        assert_eq!(ctx.active_node.map(|node| node.title), Some("Project overview".to_owned()));
        let guides = &ctx.roots[2];
        assert_eq!(guides.url, "#");
        assert!(!guides.is_active && !guides.is_ancestor);
    }
}
