use super::in_memory::newest_first;
use crate::domain::ports::PredictionStore;
use crate::domain::prediction::Prediction;
use crate::error::Result;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Append-only prediction history backed by a CSV file (`value,created`).
///
/// The file is created on first save. A single mutex serialises appends so
/// concurrent saves from clones of the same store never interleave rows.
#[derive(Clone)]
pub struct CsvPredictionStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl CsvPredictionStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Prediction>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let mut predictions = Vec::new();
        for record in reader.deserialize() {
            let prediction: Prediction = record?;
            predictions.push(prediction);
        }
        Ok(predictions)
    }
}

#[async_trait]
impl PredictionStore for CsvPredictionStore {
    async fn save(&self, prediction: Prediction) -> Result<()> {
        let _guard = self.lock.lock().await;

        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(&prediction)?;
        writer.flush()?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Prediction>> {
        let _guard = self.lock.lock().await;
        Ok(newest_first(self.read_all()?, limit))
    }
}
