use crate::catalog::types::{Catalog, Position};
use rustc_hash::FxHashMap;

/// Inverted index from a lower-cased product name to the catalog positions
/// holding exactly that name
///
/// Keys are whole names, not words. Position lists are never empty and are
/// ascending because they are filled in catalog order.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    entries: FxHashMap<String, Vec<Position>>,
}

impl KeywordIndex {
    /// Build the index over every record in `catalog`
    pub fn build(catalog: &Catalog) -> Self {
        let mut entries: FxHashMap<String, Vec<Position>> = FxHashMap::default();

        for (position, record) in catalog.iter() {
            entries.entry(record.index_key()).or_default().push(position);
        }

        Self { entries }
    }

    /// Number of distinct indexed names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positions listed under an exact (already lower-cased) key
    pub fn positions(&self, key: &str) -> Option<&[Position]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Position])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub(crate) fn entries(&self) -> &FxHashMap<String, Vec<Position>> {
        &self.entries
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
    fn test_every_record_is_indexed_under_its_lowercase_name() {
        let catalog = Catalog::new(vec![
            record("ASPIRIN 300MG TABLET"),
            record("Paracetamol Syrup"),
            record("IBUPROFEN 200MG"),
        ]);

        let index = KeywordIndex::build(&catalog);

        for (position, record) in catalog.iter() {
            let positions = index.positions(&record.name.to_lowercase()).unwrap();
            assert!(positions.contains(&position));
        }
    }

    #[test]
    fn test_keys_are_whole_names_not_words() {
        let catalog = Catalog::new(vec![record("ASPIRIN 300MG TABLET")]);

        let index = KeywordIndex::build(&catalog);

        assert_eq!(index.len(), 1);
        assert!(index.positions("aspirin").is_none());
        assert_eq!(index.positions("aspirin 300mg tablet"), Some(&[0][..]));
    }

    #[test]
    fn test_duplicate_names_share_one_key_in_ascending_order() {
        let catalog = Catalog::new(vec![
            record("PARACETAMOL 500MG"),
            record("IBUPROFEN 200MG"),
            record("paracetamol 500mg"),
            record("Paracetamol 500MG"),
        ]);

        let index = KeywordIndex::build(&catalog);

        assert_eq!(index.len(), 2);
        assert_eq!(index.positions("paracetamol 500mg"), Some(&[0, 2, 3][..]));
        assert_eq!(index.positions("ibuprofen 200mg"), Some(&[1][..]));
    }

    #[test]
    fn test_empty_catalog_builds_empty_index() {
        let index = KeywordIndex::build(&Catalog::default());
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
