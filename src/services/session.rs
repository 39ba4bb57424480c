use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATA_PATH;
use crate::error::AppError;
use crate::models::{AnalysisResult, Table};
use crate::services::{analyzer, loader, sample, visualizer};

/// Holds one data source and the table loaded from it, so analysis and
/// plotting reuse the same load.
#[derive(Debug)]
pub struct AnalysisSession {
    data_path: PathBuf,
    data: Option<Table>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl AnalysisSession {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            data: None,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn data(&self) -> Option<&Table> {
        self.data.as_ref()
    }

    pub fn set_data(&mut self, table: Table) {
        self.data = Some(table);
    }

    pub fn load_data(&mut self) -> &Table {
        self.data.insert(loader::load(&self.data_path))
    }

    pub fn generate_sample_data(&mut self) -> &Table {
        self.data.insert(sample::generate_sample())
    }

    fn table(&mut self) -> &Table {
        if self.data.is_none() {
            self.load_data();
        }
        self.data.get_or_insert_with(Table::empty)
    }

    pub fn analyze(&mut self) -> AnalysisResult {
        analyzer::analyze(self.table())
    }

    pub fn create_visualizations(&mut self, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, AppError> {
        visualizer::render(self.table(), output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn starts_without_data() {
        let session = AnalysisSession::default();
        assert!(session.data().is_none());
        assert_eq!(session.data_path(), Path::new("data/sample_data.csv"));
    }

    #[test]
    fn analyze_loads_on_demand() {
        let dir = tempdir().unwrap();
        let mut session = AnalysisSession::new(dir.path().join("missing.csv"));
        let result = session.analyze();
        assert_eq!(result.shape, (1000, 5));
        assert!(session.data().is_some());
    }

    #[test]
    fn cached_table_is_reused() {
        let mut session = AnalysisSession::new("unused.csv");
        session.set_data(Table::empty());
        let result = session.analyze();
        assert_eq!(result.shape, (0, 0));
        assert!(result.columns.is_empty());
    }

    #[test]
    fn visualizations_from_generated_sample() {
        let dir = tempdir().unwrap();
        let mut session = AnalysisSession::default();
        assert_eq!(session.generate_sample_data().shape(), (1000, 5));
        let written = session.create_visualizations(dir.path().join("plots")).unwrap();
        assert_eq!(written.len(), 2);
    }
}
