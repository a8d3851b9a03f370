//! `tm draw` command implementation.

use clap::Args;
use tm_menu::{MenuContext, MenuMeta, Node};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::registry;

/// Arguments for the draw command.
#[derive(Args)]
pub(crate) struct DrawArgs {
    /// Menu name (e.g. main_menu).
    menu: String,

    /// Current request path.
    #[arg(short, long, default_value = tm_menu::DEFAULT_PATH)]
    path: String,

    /// Print the resolved menu as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl DrawArgs {
    /// Execute the draw command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the menu does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;
        let menus = registry::menus(&config);

        let ctx = menus.draw(&self.menu, Some(&self.path));
        if ctx.menu.is_none() {
            return Err(CliError::UnknownMenu(self.menu));
        }

        if self.json {
            output.print(&serde_json::to_string_pretty(&ctx)?)?;
            return Ok(());
        }

        for line in render_lines(&ctx, &output) {
            output.print(&line)?;
        }
        if ctx.active_node.is_none() {
            output.info(&format!("No menu item matches {}", self.path));
        }
        Ok(())
    }
}

/// Format the resolved menu as indented text lines.
fn render_lines(ctx: &MenuContext, output: &Output) -> Vec<String> {
    let mut lines = Vec::new();
    let title = ctx
        .menu
        .as_ref()
        .map_or(ctx.menu_name.as_str(), MenuMeta::display_title);
    lines.push(output.heading(title));

    let depth = if ctx.render_as_dropdown {
        lines.push(format!("▾ {}", ctx.dropdown_title));
        1
    } else {
        0
    };

    for node in &ctx.roots {
        push_node(node, depth, output, &mut lines);
    }
    lines
}

fn push_node(node: &Node, depth: usize, output: &Output, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let label = if node.is_active {
        output.active(&format!("* {}", node.title))
    } else if node.is_ancestor {
        output.ancestor(&format!("> {}", node.title))
    } else {
        format!("  {}", node.title)
    };
    lines.push(format!("{indent}{label}  {}", output.dim(&node.url)));

    for child in &node.children {
        push_node(child, depth + 1, output, lines);
    }
}
