use crate::catalog::types::Catalog;
use crate::index::keyword::KeywordIndex;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};

/// How many of the most duplicated names to report
const TOP_GROUPS: usize = 10;

/// Summary of one catalog generation and its index
#[derive(Debug, Clone)]
pub struct CatalogStats {
    pub records: usize,
    pub distinct_names: usize,
    /// Most repeated names with their record counts, largest first
    pub largest_groups: Vec<(String, usize)>,
}

impl CatalogStats {
    pub fn collect(catalog: &Catalog, index: &KeywordIndex) -> Self {
        let mut groups: Vec<(String, usize)> = index
            .iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(key, positions)| (key.to_string(), positions.len()))
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        groups.truncate(TOP_GROUPS);

        Self {
            records: catalog.len(),
            distinct_names: index.len(),
            largest_groups: groups,
        }
    }
}

/// Load a catalog, index it and print statistics
pub fn show_stats(source: &Path) -> Result<()> {
    let start = Instant::now();
    let catalog = Catalog::load(source)
        .with_context(|| format!("Failed to load catalog from {}", source.display()))?;
    let load_time = start.elapsed();

    let start = Instant::now();
    let index = KeywordIndex::build(&catalog);
    let index_time = start.elapsed();

    let stats = CatalogStats::collect(&catalog, &index);

    println!("Catalog Statistics");
    println!("==================");
    println!();
    println!("Source:           {}", source.display());
    println!("Records:          {}", stats.records);
    println!("Distinct names:   {}", stats.distinct_names);
    println!("Load time:        {}", format_duration(load_time));
    println!("Index time:       {}", format_duration(index_time));

    if !stats.largest_groups.is_empty() {
        println!();
        println!("Most repeated names:");
        for (name, count) in &stats.largest_groups {
            println!("  {:40} {}", name, count);
        }
    }

    Ok(())
}

fn format_duration(duration: Duration) -> String {
    let ms = duration.as_secs_f64() * 1000.0;
    if ms >= 1000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        format!("{:.2} ms", ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Record;

    fn record(name: &str) -> Record {
        Record {
            code: String::new(),
            name: name.to_string(),
            strength: String::new(),
            form: String::new(),
        }
    }

    #[test]
    fn test_collect_counts_records_and_groups() {
        let catalog = Catalog::new(vec![
            record("PARACETAMOL 500MG"),
            record("PARACETAMOL 500MG"),
            record("PARACETAMOL 500MG"),
            record("IBUPROFEN 200MG"),
            record("IBUPROFEN 200MG"),
            record("ASPIRIN 300MG TABLET"),
        ]);
        let index = KeywordIndex::build(&catalog);

        let stats = CatalogStats::collect(&catalog, &index);

        assert_eq!(stats.records, 6);
        assert_eq!(stats.distinct_names, 3);
        assert_eq!(
            stats.largest_groups,
            vec![
                ("paracetamol 500mg".to_string(), 3),
                ("ibuprofen 200mg".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(12)), "12.00 ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50 s");
    }
}
