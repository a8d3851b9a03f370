//! `tm urls` command implementation.

use clap::Args;
use tm_menu::RouteTable;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::registry;

/// Arguments for the urls command.
#[derive(Args)]
pub(crate) struct UrlsArgs {
    /// Print the choice list (value, label pairs) as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl UrlsArgs {
    /// Execute the urls command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let routes = registry::route_table(&config);

        if self.json {
            output.print(&serde_json::to_string_pretty(&routes.url_choices())?)?;
            return Ok(());
        }

        for line in list_lines(&routes) {
            output.print(&line)?;
        }
        Ok(())
    }
}

/// One line per named route with the path it resolves to.
fn list_lines(routes: &RouteTable) -> Vec<String> {
    routes
        .named_urls()
        .into_iter()
        .filter_map(|name| {
            let path = routes.reverse(&name)?;
            Some(format!("{name}\t{path}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tm_config::Config;

    #[test]
    fn test_list_lines_demo_routes() {
        let config = Config::demo().unwrap();

        let lines = list_lines(&registry::route_table(&config));

        assert_eq!(
            lines,
            vec![
                "tree_menu:about\t/about/",
                "tree_menu:catalog\t/catalog/",
                "tree_menu:contact\t/contact/",
                "tree_menu:home\t/",
                "tree_menu:integrations\t/catalog/integrations/",
                "tree_menu:pricing\t/catalog/pricing/",
            ]
        );
    }

    #[test]
    fn test_choices_json_starts_with_empty_choice() {
        let routes = RouteTable::new().route("home", "");

        let json = serde_json::to_value(routes.url_choices()).unwrap();

        assert_eq!(json[0][0], "");
        assert_eq!(json[1], serde_json::json!(["home", "home"]));
    }
}
