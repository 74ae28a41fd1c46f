use super::{coordinator::Coordinator, Message, PoolState, Task};
use crate::error::Result;
use crossbeam::channel::{bounded, Receiver, Sender};
use slog::{o, warn, Discard, Logger};
use std::sync::Arc;
use std::thread;

/// A dynamic workers pool.
///
/// The pool starts with zero workers and one coordinator thread. Every
/// operation is a blocking hand-off into the coordinator: the call returns
/// once the event has been accepted, not once workers are actually running.
///
/// # Example
///
/// ```
/// use dynpool::Pool;
///
/// let pool = Pool::new(|| {});
/// pool.add_workers(3).unwrap();
/// assert_eq!(pool.get().unwrap(), 3);
/// let end = pool.stop().unwrap();
/// end.recv().unwrap();
/// ```
pub struct Pool {
    events: Sender<Message>,
    end: Receiver<()>,
}

impl Pool {
    /// Creates a pool without workers running `task`.
    pub fn new<F>(task: F) -> Pool
    where
        F: Fn() + Send + Sync + 'static,
    {
        Pool::with_logger(task, Logger::root(Discard, o!()))
    }

    /// Creates a pool without workers, logging through `logger`.
    pub fn with_logger<F>(task: F, logger: Logger) -> Pool
    where
        F: Fn() + Send + Sync + 'static,
    {
        // zero capacity: clients rendezvous with the coordinator, so events
        // are accepted one at a time in the order each caller issued them
        let (event_sender, event_receiver) = bounded::<Message>(0);
        // capacity one: the end signal is latched even if nobody waits yet
        let (end_sender, end_receiver) = bounded::<()>(1);
        let finish_sender = event_sender.clone();

        thread::spawn(move || {
            let coordinator = Coordinator::new(
                Arc::new(task),
                event_receiver,
                finish_sender,
                end_sender,
                logger,
            );
            // serialize all state changes until drained
            coordinator.run();
        });

        Pool {
            events: event_sender,
            end: end_receiver,
        }
    }

    /// Sets the wished number of workers. Missing workers are launched
    /// right away; excess workers are shed as they finish.
    pub fn set_wished(&self, n: usize) -> Result<()> {
        self.send(Message::Resize(n))
    }

    /// Adds `n` workers, one hand-off each.
    pub fn add_workers(&self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.send(Message::AddOne)?;
        }
        Ok(())
    }

    /// Removes `n` workers without killing them: each finishes its current
    /// execution and is not replaced. Removing below zero is a no-op.
    pub fn remove_workers(&self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.send(Message::RemoveOne)?;
        }
        Ok(())
    }

    /// Removes all workers and returns the previous wished count so it can
    /// be restored later with [`set_wished`](Pool::set_wished).
    pub fn pause(&self) -> Result<usize> {
        let wished = self.get()?;
        self.set_wished(0)?;
        Ok(wished)
    }

    /// Stops the pool. Returns a receiver that yields `()` once the last
    /// in-flight worker has finished.
    pub fn stop(&self) -> Result<Receiver<()>> {
        self.send(Message::Stop)?;
        Ok(self.end.clone())
    }

    /// Returns the wished number of workers.
    pub fn get(&self) -> Result<usize> {
        Ok(self.state()?.wished)
    }

    /// Returns the number of workers currently in flight.
    pub fn active(&self) -> Result<usize> {
        Ok(self.state()?.active)
    }

    /// Returns a snapshot of both counters. The snapshot may be stale the
    /// moment it is read.
    pub fn state(&self) -> Result<PoolState> {
        let (reply_sender, reply_receiver) = bounded::<PoolState>(1);
        self.send(Message::State(reply_sender))?;
        Ok(reply_receiver.recv()?)
    }

    fn send(&self, message: Message) -> Result<()> {
        Ok(self.events.send(message)?)
    }
}

// close the pool when the handle goes away, so an idle coordinator
// does not outlive its pool
impl Drop for Pool {
    fn drop(&mut self) {
        let _ = self.events.send(Message::Stop);
    }
}

/// Notifies the coordinator when a worker execution ends, on every exit
/// path: the completion event must fire even when the task panics, or the
/// active count would desync for good.
pub struct FinishGuard {
    finish: Sender<Message>,
    logger: Logger,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            warn!(self.logger, "unit of work panicked");
        }
        // the coordinator keeps running while any worker is in flight,
        // so this hand-off cannot be left hanging
        let _ = self.finish.send(Message::Finished);
    }
}

/// Launches one worker execution of `task` on its own thread.
pub fn launch(task: Task, finish: Sender<Message>, logger: Logger) {
    thread::spawn(move || {
        let _guard = FinishGuard { finish, logger };
        task();
    });
}
