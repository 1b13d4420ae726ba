// Dataset registry - owns imported datasets in insertion order
use crate::domain::dataset::Dataset;
use crate::domain::identity::DatasetId;

#[derive(Debug, Default)]
pub struct DatasetRegistry {
    datasets: Vec<Dataset>,
}

impl DatasetRegistry {
    /// Appends the dataset. An id already held by another dataset is replaced
    /// with a fresh one, so existing entries are never overwritten.
    pub fn register(&mut self, mut dataset: Dataset) -> DatasetId {
        while self.get(dataset.id()).is_some() {
            dataset.reassign_id();
        }

        let id = dataset.id();
        tracing::info!(
            "Registered dataset {} ({:?}, {} columns, {} rows)",
            id,
            dataset.name(),
            dataset.columns().len(),
            dataset.rows().len()
        );
        self.datasets.push(dataset);
        id
    }

    pub fn get(&self, id: DatasetId) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id() == id)
    }

    pub fn remove(&mut self, id: DatasetId) -> Option<Dataset> {
        let index = self.datasets.iter().position(|d| d.id() == id)?;
        Some(self.datasets.remove(index))
    }

    pub fn list(&self) -> &[Dataset] {
        &self.datasets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ingestion::{ingest, SourceFormat};

    fn dataset(name: &str) -> Dataset {
        ingest(name, b"a\n1", SourceFormat::Csv).unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = DatasetRegistry::default();
        let first = registry.register(dataset("one.csv"));
        let second = registry.register(dataset("two.csv"));

        assert_ne!(first, second);
        assert_eq!(registry.get(first).unwrap().name(), "one.csv");
        let names: Vec<&str> = registry.list().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["one.csv", "two.csv"]);
    }

    #[test]
    fn test_colliding_id_is_reassigned() {
        let mut registry = DatasetRegistry::default();
        let original = dataset("one.csv");
        let copy = original.clone();

        let first = registry.register(original);
        let second = registry.register(copy);

        assert_ne!(first, second);
        assert_eq!(registry.list().len(), 2);
        assert_eq!(registry.get(first).unwrap().id(), first);
    }

    #[test]
    fn test_remove() {
        let mut registry = DatasetRegistry::default();
        let id = registry.register(dataset("one.csv"));

        assert_eq!(registry.remove(id).map(|d| d.id()), Some(id));
        assert!(registry.remove(id).is_none());
        assert!(registry.list().is_empty());
    }
}
