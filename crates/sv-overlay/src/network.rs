//! The in-process messaging fabric.
//!
//! A `Network` owns the registry of live overlay-node ids and a FIFO of
//! pending envelopes.  Sends are validated against the registry and
//! enqueued; the controller drains the queue to empty after each node's
//! frame step, delivering to receivers one at a time.  A receive handler
//! may send further messages (the CANCEL cascade), which land in the same
//! drain — so every cascade completes within the tick it started, before
//! the next node's frame step.
//!
//! There is no loss, no backpressure, and no cross-tick buffering.

use std::collections::VecDeque;

use sv_core::OverlayId;

use crate::{OverlayError, OverlayResult, Phase, Signal};

/// One queued message: source, destination, mode, payload.
#[derive(Copy, Clone, Debug)]
pub struct Envelope {
    pub src:    OverlayId,
    pub dst:    OverlayId,
    pub phase:  Phase,
    pub signal: Signal,
}

/// Directed message delivery between overlay nodes.
pub struct Network {
    receiver_count: usize,
    queue:          VecDeque<Envelope>,
}

impl Network {
    /// Establish a fabric over overlay nodes `0..receiver_count`.
    pub fn establish(receiver_count: usize) -> Self {
        Self {
            receiver_count,
            queue: VecDeque::new(),
        }
    }

    /// Enqueue a message for delivery within the current tick.
    ///
    /// Sending to an id outside the registry is fatal.
    pub fn send(
        &mut self,
        src:    OverlayId,
        dst:    OverlayId,
        phase:  Phase,
        signal: Signal,
    ) -> OverlayResult<()> {
        if dst.index() >= self.receiver_count {
            return Err(OverlayError::UnknownReceiver(dst));
        }
        self.queue.push_back(Envelope { src, dst, phase, signal });
        Ok(())
    }

    /// Dequeue the next pending envelope, if any.
    pub fn pop(&mut self) -> Option<Envelope> {
        self.queue.pop_front()
    }

    /// `true` when no messages are pending.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn receiver_count(&self) -> usize {
        self.receiver_count
    }
}
