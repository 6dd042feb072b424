//! One-shot shutdown signal observed by blocking ports.
//!
//! Nothing is ever sent on the channel: firing drops the sender, which every
//! receiver clone observes as a disconnect. That keeps the signal sticky.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

/// Fires the shutdown. Dropping it without firing has the same effect.
pub struct ShutdownTrigger {
    _sender: Sender<()>,
}

impl ShutdownTrigger {
    pub fn fire(self) {
        tracing::debug!("shutdown requested");
    }
}

/// Observing side, cloned into every port opened by a transport.
#[derive(Clone)]
pub struct Shutdown {
    receiver: Receiver<()>,
}

impl Shutdown {
    pub fn is_fired(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Becomes ready (with `Err`) once the trigger is gone.
    #[cfg_attr(not(feature = "midi-io"), allow(dead_code))]
    pub(crate) fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (sender, receiver) = bounded(0);
    (ShutdownTrigger { _sender: sender }, Shutdown { receiver })
}
