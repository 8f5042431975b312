use crate::domain::ports::PredictionStoreBox;
use crate::domain::prediction::Prediction;
use crate::error::Result;

/// Number of entries shown in the recent-history view.
pub const HISTORY_PAGE_SIZE: usize = 20;

pub struct PredictionService {
    store: PredictionStoreBox,
}

impl PredictionService {
    pub fn new(store: PredictionStoreBox) -> Self {
        Self { store }
    }

    /// Generates a new prediction and records it.
    ///
    /// A failed save is logged but does not stop the caller from showing
    /// the prediction that was just drawn.
    pub async fn next_prediction(&self) -> Prediction {
        let prediction = Prediction::generate();
        if let Err(e) = self.store.save(prediction.clone()).await {
            tracing::warn!(error = %e, value = %prediction.value, "failed to save prediction");
        }
        prediction
    }

    /// The most recent page of predictions, newest first.
    pub async fn history(&self) -> Result<Vec<Prediction>> {
        self.history_with_limit(HISTORY_PAGE_SIZE).await
    }

    pub async fn history_with_limit(&self, limit: usize) -> Result<Vec<Prediction>> {
        self.store.recent(limit).await
    }
}
