/*!
 * kubefetch CLI Style System
 *
 * Styled status messages and tables for operator-facing output.
 * Everything here writes to stderr except `print_success`,
 * so `kubefetch kubeconfig -p > file` stays clean.
 */

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use console::{style, StyledObject};

// ============================================================================
// THEME COLORS
// ============================================================================

/// Brand colors for consistent styling
pub struct Theme;

impl Theme {
    /// Success color (green)
    pub fn success<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).green()
    }

    /// Warning color (yellow)
    pub fn warning<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).yellow()
    }

    /// Error color (red)
    pub fn error<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).red()
    }

    /// Muted/secondary text (dim)
    pub fn muted<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).dim()
    }
}

/// Unicode icons for visual feedback
pub struct Icons;

impl Icons {
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const ARROW_RIGHT: &'static str = "→";
    pub const CURRENT: &'static str = "*";
}

// ============================================================================
// TABLES
// ============================================================================

/// Create a minimal table (no outer borders)
pub fn create_minimal_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_NO_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row of the kubeconfig context overview
pub struct ContextRow {
    pub current: bool,
    pub context: String,
    pub cluster: String,
    pub server: String,
    pub user: String,
}

/// Table of contexts with the current one highlighted
pub fn context_table(rows: &[ContextRow]) -> Table {
    let mut table = create_minimal_table();
    table.set_header(vec![
        Cell::new(""),
        Cell::new("CONTEXT").add_attribute(Attribute::Bold),
        Cell::new("CLUSTER").add_attribute(Attribute::Bold),
        Cell::new("SERVER").add_attribute(Attribute::Bold),
        Cell::new("USER").add_attribute(Attribute::Bold),
    ]);

    for row in rows {
        let marker = if row.current { Icons::CURRENT } else { "" };
        let name = if row.current {
            Cell::new(&row.context).fg(Color::Green)
        } else {
            Cell::new(&row.context)
        };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Green),
            name,
            Cell::new(&row.cluster).fg(Color::Cyan),
            Cell::new(&row.server),
            Cell::new(&row.user),
        ]);
    }

    table
}

// ============================================================================
// MESSAGES
// ============================================================================

/// Print a styled error message with optional suggestion
pub fn print_error(message: &str, suggestion: Option<&str>) {
    eprintln!(
        "\n{} {}",
        Theme::error(format!("{} Error:", Icons::ERROR)),
        message
    );

    if let Some(hint) = suggestion {
        eprintln!(
            "  {} {}",
            Theme::muted(Icons::ARROW_RIGHT),
            Theme::muted(hint)
        );
    }
    eprintln!();
}

/// Print a styled warning message
pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        Theme::warning(Icons::WARNING.to_string()),
        Theme::warning(message)
    );
}

/// Print a styled success message
pub fn print_success(message: &str) {
    println!(
        "{} {}",
        Theme::success(Icons::SUCCESS.to_string()),
        Theme::success(message)
    );
}
