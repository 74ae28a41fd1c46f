use crossbeam::channel::Sender;
use std::sync::Arc;

mod coordinator;
mod pool;
pub use pool::Pool;

// since the task runs on many worker threads at once, it must be
// shareable and have static lifetime
pub type Task = Arc<dyn Fn() + Send + Sync + 'static>;

/// Control events handled by the coordinator, one at a time.
pub enum Message {
    /// set the wished count and spawn up to it
    Resize(usize),
    /// grow wished by one and launch one worker
    AddOne,
    /// shrink wished by one, workers are never killed
    RemoveOne,
    /// a worker execution completed, normally or by panic
    Finished,
    /// close the pool, no further spawns
    Stop,
    /// reply with a snapshot of the counters
    State(Sender<PoolState>),
}

/// Snapshot of a pool's counters at the moment the coordinator
/// served the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    /// worker executions in flight
    pub active: usize,
    /// worker executions the pool tries to keep in flight
    pub wished: usize,
}
