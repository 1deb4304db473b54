use crate::error::SchemaContextError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Descriptive metadata for one table. Immutable within a retrieval
/// request; replaced wholesale on catalog refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub columns: Vec<ColumnMetadata>,
    /// Search keywords, kept sorted so derived documents are stable.
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            columns: Vec::new(),
            keywords: BTreeSet::new(),
            use_cases: Vec::new(),
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// On-disk shape of the catalog export: `{ "tables": { name: {...} } }`.
/// Table entries may omit their own `name`; the map key is authoritative.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    tables: BTreeMap<String, TableEntry>,
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    #[serde(default)]
    description: String,
    #[serde(default)]
    columns: Vec<ColumnMetadata>,
    #[serde(default)]
    keywords: BTreeSet<String>,
    #[serde(default)]
    use_cases: Vec<String>,
}

/// The authoritative mapping from table name to metadata.
///
/// A request sees one consistent snapshot; refreshing is a separate
/// replace operation outside request handling.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    tables: BTreeMap<String, TableMetadata>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl SchemaCatalog {
    pub fn new(tables: Vec<TableMetadata>) -> Self {
        let tables = tables.into_iter().map(|t| (t.name.clone(), t)).collect();
        Self {
            tables,
            loaded_at: chrono::Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaContextError> {
        let file: CatalogFile = serde_json::from_reader(reader)?;
        let tables = file
            .tables
            .into_iter()
            .map(|(name, entry)| TableMetadata {
                name: name.clone(),
                description: entry.description,
                columns: entry.columns,
                keywords: entry.keywords,
                use_cases: entry.use_cases,
            })
            .collect();
        Ok(Self::new(tables))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaContextError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn get(&self, table_name: &str) -> Option<&TableMetadata> {
        self.tables.get(table_name)
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    /// Tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = &TableMetadata> {
        self.tables.values()
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
