//! Async delivery of size measurements into a shared engine.
//!
//! Hosts whose size observer runs on its own task post batches of
//! [`Measurement`]s into an unbounded channel. [`run_measurement_pump`]
//! drains that channel into the engine one batch at a time, holding the
//! engine lock for the whole batch so per-element match updates never
//! interleave.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::container_query::{ContainerQueryEngine, Measurement, SizeObserver};

/// Sender half handed to the host's observer task.
pub type MeasurementSender = mpsc::UnboundedSender<Vec<Measurement>>;

/// Creates the channel a host posts measurement batches into.
pub fn measurement_channel() -> (MeasurementSender, mpsc::UnboundedReceiver<Vec<Measurement>>) {
    mpsc::unbounded_channel()
}

/// Runs until every sender is dropped. Returns the number of notifications
/// emitted over the pump's lifetime.
pub async fn run_measurement_pump<O>(
    engine: Arc<Mutex<ContainerQueryEngine<O>>>,
    mut receiver: mpsc::UnboundedReceiver<Vec<Measurement>>,
) -> usize
where
    O: SizeObserver,
{
    let mut notified = 0;

    while let Some(batch) = receiver.recv().await {
        let size = batch.len();
        let mut engine = engine.lock().await;
        let changed = engine.on_measurements(batch);
        log::trace!("Measurement batch: {} entries, {} changes", size, changed);
        notified += changed;
    }

    log::debug!("Measurement pump stopped after {} notifications", notified);
    notified
}
