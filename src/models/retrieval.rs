use serde::{Deserialize, Serialize};

/// One indexable document derived from a catalog entry. Derived data:
/// the catalog stays the source of truth, and documents are regenerated
/// whenever their table's metadata changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexedDocument {
    pub document_id: String,
    pub table_name: String,
    pub text_body: String,
}

/// A single ranked match from the search backend, mapped back to a
/// catalog table. Scores are backend-defined; higher means more relevant.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTable {
    pub table_name: String,
    pub score: f64,
}

/// Ranked matches for one question, in backend order.
pub type RetrievalResult = Vec<ScoredTable>;

/// The final ordered, deduplicated set of table names for one question.
/// Bounded by the configured maximum; never empty for a non-empty catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSelection {
    tables: Vec<String>,
}

impl TableSelection {
    pub fn new(tables: Vec<String>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn into_tables(self) -> Vec<String> {
        self.tables
    }
}

impl From<Vec<String>> for TableSelection {
    fn from(tables: Vec<String>) -> Self {
        Self::new(tables)
    }
}

/// Rendered schema text for one selection. Ephemeral: regenerated per
/// request, never cached across selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSummaryBlock(pub String);

impl SchemaSummaryBlock {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemaSummaryBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
