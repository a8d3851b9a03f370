//! `tm menus` command implementation.

use clap::Args;
use tm_config::Config;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::registry;

/// Arguments for the menus command.
#[derive(Args)]
pub(crate) struct MenusArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl MenusArgs {
    /// Execute the menus command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        if config.menus.is_empty() {
            output.info("No menus configured");
            return Ok(());
        }
        for line in list_lines(&config) {
            output.print(&line)?;
        }
        Ok(())
    }
}

/// One line per menu: name, display title, dropdown flag and item count.
fn list_lines(config: &Config) -> Vec<String> {
    let routes = registry::route_table(config);
    let menus = registry::menu_registry(config, &routes);

    menus
        .menus()
        .map(|menu| {
            let dropdown = if menu.render_as_dropdown {
                format!(" [dropdown: {}]", menu.dropdown_title)
            } else {
                String::new()
            };
            format!(
                "{}\t{}\t{} items{dropdown}",
                menu.name,
                menu.display_title(),
                menus.item_count(&menu.name)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_lines_demo_config() {
        let config = Config::demo().unwrap();

        assert_eq!(
            list_lines(&config),
            vec![
                "footer_menu\tFooter menu\t3 items",
                "main_menu\tMain menu\t6 items",
                "sidebar_menu\tSection menu\t5 items",
            ]
        );
    }

    #[test]
    fn test_list_lines_shows_dropdown() {
        let toml = r#"
[[menus]]
name = "account"
render_as_dropdown = true
dropdown_title = "Profile"
"#;
        let config = Config::from_toml(toml).unwrap();

        assert_eq!(
            list_lines(&config),
            vec!["account\taccount\t0 items [dropdown: Profile]"]
        );
    }
}
