use crate::config::RetrievalConfig;
use crate::models::{SchemaCatalog, TableSelection};

/// Deterministic, keyword-driven table selection used when semantic
/// search is unavailable or inconclusive.
///
/// This is the availability backstop: it never fails, never blocks, and
/// any internal lookup miss (e.g. a configured core table absent from
/// the catalog) is skipped rather than propagated.
pub struct FallbackSelector {
    core_tables: Vec<String>,
    min_tables: usize,
    max_tables: usize,
}

impl FallbackSelector {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            core_tables: config.core_tables.clone(),
            min_tables: config.min_fallback_tables,
            max_tables: config.max_tables,
        }
    }

    /// Two-tier policy: keyword matches ranked by overlap count (ties
    /// broken by table name), then core tables appended until the
    /// configured floor is met. Capped at `max_tables` in that priority
    /// order.
    pub fn select(&self, question: &str, catalog: &SchemaCatalog) -> TableSelection {
        let question_lower = question.to_lowercase();

        let mut matches: Vec<(usize, &str)> = catalog
            .tables()
            .filter_map(|table| {
                let overlap = table
                    .keywords
                    .iter()
                    .filter(|kw| !kw.is_empty() && question_lower.contains(kw.to_lowercase().as_str()))
                    .count();
                (overlap > 0).then_some((overlap, table.name.as_str()))
            })
            .collect();

        // Highest overlap first; lexical name order breaks ties so the
        // same question always yields the same selection.
        matches.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut selected: Vec<String> = matches
            .into_iter()
            .map(|(_, name)| name.to_string())
            .collect();

        if selected.len() < self.min_tables {
            for core in &self.core_tables {
                if selected.len() >= self.min_tables {
                    break;
                }
                if !catalog.contains(core) {
                    tracing::warn!(table = %core, "configured core table not in catalog, skipping");
                    continue;
                }
                if !selected.iter().any(|t| t == core) {
                    selected.push(core.clone());
                }
            }
        }

        selected.truncate(self.max_tables);
        TableSelection::new(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableMetadata;

    fn table_with_keywords(name: &str, keywords: &[&str]) -> TableMetadata {
        TableMetadata {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..TableMetadata::new(name)
        }
    }

    fn catalog() -> SchemaCatalog {
        SchemaCatalog::new(vec![
            table_with_keywords("cooperatives", &["koperasi", "cooperative"]),
            table_with_keywords("provinces", &["provinsi", "daerah", "wilayah"]),
            table_with_keywords("users", &["user", "pengguna", "anggota"]),
        ])
    }

    fn selector(core: &[&str], min: usize, max: usize) -> FallbackSelector {
        FallbackSelector::new(&RetrievalConfig {
            max_tables: max,
            min_fallback_tables: min,
            core_tables: core.iter().map(|s| s.to_string()).collect(),
            top_k_over_fetch: 8,
        })
    }

    #[test]
    fn test_keyword_match_selects_table() {
        let selector = selector(&["cooperatives", "provinces"], 2, 5);
        let selection = selector.select("ada berapa koperasi sekarang", &catalog());
        // Keyword match first, then core-table filler up to the floor
        assert_eq!(selection.tables(), &["cooperatives", "provinces"]);
    }

    #[test]
    fn test_no_keyword_overlap_falls_back_to_core_tables() {
        let selector = selector(&["cooperatives", "provinces"], 2, 5);
        let selection = selector.select("completely unrelated text", &catalog());
        assert_eq!(selection.tables(), &["cooperatives", "provinces"]);
    }

    #[test]
    fn test_empty_question_still_meets_floor() {
        let selector = selector(&["users"], 1, 5);
        let selection = selector.select("", &catalog());
        assert_eq!(selection.tables(), &["users"]);
    }

    #[test]
    fn test_overlap_count_orders_results() {
        let cat = SchemaCatalog::new(vec![
            table_with_keywords("a_single", &["alpha"]),
            table_with_keywords("b_double", &["alpha", "beta"]),
        ]);
        let selector = selector(&[], 1, 5);
        let selection = selector.select("alpha beta", &cat);
        assert_eq!(selection.tables(), &["b_double", "a_single"]);
    }

    #[test]
    fn test_ties_break_by_table_name() {
        let cat = SchemaCatalog::new(vec![
            table_with_keywords("zebra", &["alpha"]),
            table_with_keywords("apple", &["alpha"]),
        ]);
        let selector = selector(&[], 1, 5);
        let selection = selector.select("alpha", &cat);
        assert_eq!(selection.tables(), &["apple", "zebra"]);
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let selector = selector(&["cooperatives"], 1, 5);
        let cat = catalog();
        let first = selector.select("data koperasi per provinsi", &cat);
        let second = selector.select("data koperasi per provinsi", &cat);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_core_table_skipped_silently() {
        let selector = selector(&["missing_table", "users"], 1, 5);
        let selection = selector.select("nothing matches here", &catalog());
        assert_eq!(selection.tables(), &["users"]);
    }

    #[test]
    fn test_result_capped_at_max_tables() {
        let selector = selector(&["cooperatives", "provinces", "users"], 3, 2);
        let selection = selector.select("koperasi provinsi user", &catalog());
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_core_filler_does_not_duplicate_keyword_match() {
        let selector = selector(&["cooperatives", "provinces"], 2, 5);
        let selection = selector.select("jumlah koperasi", &catalog());
        assert_eq!(selection.tables(), &["cooperatives", "provinces"]);
    }

    #[test]
    fn test_empty_catalog_yields_empty_selection() {
        let selector = selector(&["cooperatives"], 1, 5);
        let selection = selector.select("koperasi", &SchemaCatalog::empty());
        assert!(selection.is_empty());
    }
}
