use crate::models::{SchemaCatalog, SchemaSummaryBlock, TableSelection};

const BLOCK_SEPARATOR: &str = "--------------------------------------------------";

/// Renders a selection into the compact schema text injected into the
/// SQL-generation prompt.
///
/// Output order follows selection order exactly, and identical inputs
/// produce byte-identical output so prompts are reproducible.
pub struct SchemaSummaryRenderer;

impl SchemaSummaryRenderer {
    /// Emit one block per selected table: name, description (line kept
    /// even when empty, so the format stays uniform), then column names.
    /// Types and per-column descriptions are left out to keep the
    /// summary minimal. Tables missing from the catalog are skipped
    /// with no placeholder; the orchestrator already filters these, but
    /// the renderer can be called on its own, so it re-checks.
    pub fn render(selection: &TableSelection, catalog: &SchemaCatalog) -> SchemaSummaryBlock {
        let mut blocks: Vec<String> = Vec::with_capacity(selection.len());

        for table_name in selection.tables() {
            let Some(table) = catalog.get(table_name) else {
                tracing::warn!(table = %table_name, "selected table not in catalog, skipping render");
                continue;
            };

            let mut block = format!("TABLE: {}\n", table.name);
            block.push_str(&format!("DESCRIPTION: {}\n", table.description));
            block.push_str("COLUMNS:");
            for column in &table.columns {
                block.push_str(&format!("\n  - {}", column.name));
                // camelCase identifiers need double quotes in PostgreSQL;
                // flag them so the generator quotes correctly
                if column.name.chars().any(|c| c.is_ascii_uppercase()) {
                    block.push_str(&format!(" (quote as \"{}\")", column.name));
                }
            }
            block.push('\n');
            block.push_str(BLOCK_SEPARATOR);
            blocks.push(block);
        }

        SchemaSummaryBlock(blocks.join("\n\n"))
    }
}
