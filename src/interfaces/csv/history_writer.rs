use crate::domain::prediction::Prediction;
use crate::error::Result;
use std::io::Write;

/// Writes prediction history as CSV with a `value,created` header.
pub struct HistoryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_predictions<I>(&mut self, predictions: I) -> Result<()>
    where
        I: IntoIterator<Item = Prediction>,
    {
        for prediction in predictions {
            self.writer.serialize(prediction)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
