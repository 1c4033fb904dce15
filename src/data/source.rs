use std::path::PathBuf;
use std::sync::Arc;

use super::error::LoadError;
use super::loader::load_dataset;
use super::model::SalesDataset;
use super::schema::ColumnMapping;

// ---------------------------------------------------------------------------
// Data access seam
// ---------------------------------------------------------------------------

/// Anything that can produce a [`SalesDataset`].
pub trait DataSource {
    fn load(&self) -> Result<SalesDataset, LoadError>;

    /// Short human-readable origin for status lines and logs.
    fn describe(&self) -> String;
}

/// A dataset file on disk, optionally with an explicit column mapping.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    mapping: Option<ColumnMapping>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, mapping: Option<ColumnMapping>) -> Self {
        Self {
            path: path.into(),
            mapping,
        }
    }
}

impl DataSource for FileSource {
    fn load(&self) -> Result<SalesDataset, LoadError> {
        load_dataset(&self.path, self.mapping.as_ref())
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// Populate-once cache
// ---------------------------------------------------------------------------

/// Loads from its source on first access and hands out the same dataset
/// afterwards. Failed loads are not remembered.
pub struct DatasetCache<S> {
    source: S,
    dataset: Option<Arc<SalesDataset>>,
}

impl<S: DataSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            dataset: None,
        }
    }

    pub fn get(&mut self) -> Result<Arc<SalesDataset>, LoadError> {
        if let Some(ds) = &self.dataset {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(self.source.load()?);
        self.dataset = Some(Arc::clone(&ds));
        Ok(ds)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::data::model::SalesRecord;

    struct CountingSource {
        calls: Cell<usize>,
        fail_first: bool,
    }

    impl DataSource for CountingSource {
        fn load(&self) -> Result<SalesDataset, LoadError> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if self.fail_first && n == 1 {
                return Err(LoadError::NoWorksheet);
            }
            Ok(SalesDataset::from_records(
                vec![SalesRecord::default()],
                ColumnMapping::default(),
            ))
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }

    #[test]
    fn loads_once_then_reuses() {
        let mut cache = DatasetCache::new(CountingSource {
            calls: Cell::new(0),
            fail_first: false,
        });
        assert!(cache.dataset.is_none());
        let a = cache.get().unwrap();
        let b = cache.get().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.source().calls.get(), 1);
        assert!(cache.dataset.is_some());
    }

    #[test]
    fn failed_load_is_retried() {
        let mut cache = DatasetCache::new(CountingSource {
            calls: Cell::new(0),
            fail_first: true,
        });
        assert!(cache.get().is_err());
        assert!(cache.dataset.is_none());
        assert_eq!(cache.get().unwrap().len(), 1);
        assert_eq!(cache.source().calls.get(), 2);
    }

    #[test]
    fn file_source_describes_file_name() {
        let source = FileSource::new("/data/ventas 2024.xlsx", None);
        assert_eq!(source.describe(), "ventas 2024.xlsx");
        let err = source.load().unwrap_err();
        assert!(
            matches!(err, LoadError::NotFound(p) if p == PathBuf::from("/data/ventas 2024.xlsx"))
        );
    }
}
