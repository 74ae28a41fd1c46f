//! A dynamic workers pool.
//!
//! A [`Pool`](pool::Pool) keeps a wished number of workers running, each
//! executing the same unit of work once per launch. A worker that finishes
//! is replaced while the pool is understaffed; a stopped pool drains and
//! emits a one-time end signal.
//!
//! # Example
//!
//! ```
//! use dynpool::Pool;
//!
//! let pool = Pool::new(|| {});
//! pool.set_wished(2).unwrap();
//! let end = pool.stop().unwrap();
//! end.recv().unwrap();
//! ```

pub mod error;
pub mod pool;

pub use error::{Error, ErrorKind, Result};
pub use pool::{Pool, PoolState};
