use crossbeam::channel::{Receiver, Sender};
use slog::{debug, info, Logger};

use super::{pool, Message, PoolState, Task};

/// It owns the pool counters and serializes every mutation.
///
/// The coordinator is the only writer of `active`, `wished` and `closed`;
/// everything else talks to it through the event channel. The rendezvous on
/// that channel is the sole synchronization primitive, there is no lock.
pub struct Coordinator {
    task: Task,
    events: Receiver<Message>,
    finish: Sender<Message>,
    end: Sender<()>,
    logger: Logger,
    active: usize,
    wished: usize,
    closed: bool,
}

impl Coordinator {
    pub fn new(
        task: Task,
        events: Receiver<Message>,
        finish: Sender<Message>,
        end: Sender<()>,
        logger: Logger,
    ) -> Self {
        Coordinator {
            task,
            events,
            finish,
            end,
            logger,
            active: 0,
            wished: 0,
            closed: false,
        }
    }

    // receive one event, process it to completion, loop; exits once the
    // pool is closed and the last worker has reported in
    pub fn run(mut self) {
        loop {
            if self.closed && self.active < 1 {
                break;
            }

            match self.events.recv() {
                Ok(message) => self.handle(message),
                Err(_) => break,
            }
        }

        info!(self.logger, "pool drained");
        let _ = self.end.send(());
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::State(reply) => {
                let _ = reply.send(PoolState {
                    active: self.active,
                    wished: self.wished,
                });
            }
            Message::Stop => {
                self.wished = 0;
                self.closed = true;
                info!(self.logger, "stop requested"; "active" => self.active);
            }
            Message::Resize(n) => {
                if !self.closed {
                    self.wished = n;
                }
                while self.active < self.wished {
                    self.spawn();
                }
                debug!(
                    self.logger, "resized";
                    "active" => self.active, "wished" => self.wished
                );
            }
            Message::AddOne => {
                if !self.closed {
                    self.wished += 1;
                }
                // an add accepted while draining still launches one
                // execution; it is simply not replaced once it finishes
                self.spawn();
            }
            Message::RemoveOne => {
                if self.wished > 0 {
                    self.wished -= 1;
                }
            }
            Message::Finished => {
                self.active -= 1;
                // self-healing: replace finished workers up to wished
                while self.active < self.wished {
                    self.spawn();
                }
            }
        }
    }

    fn spawn(&mut self) {
        pool::launch(self.task.clone(), self.finish.clone(), self.logger.clone());
        self.active += 1;
        debug!(self.logger, "worker launched"; "active" => self.active);
    }
}
