use async_channel::{Receiver, Sender, TryRecvError};

use crate::area::AreaId;
use crate::item::ItemId;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DragSignal {
    TransitionDone { area: AreaId, item: ItemId },
    Cancel,
}

/// Thread-safe handle for reporting events that originate outside the frame
/// loop (layout transitions finishing, gesture cancellation).
///
/// Signals are queued and applied at the start of the coordinator's next
/// [`tick`](crate::DragCoordinator::tick).
#[derive(Clone, Debug)]
pub struct DragSignals {
    tx: Sender<DragSignal>,
}

impl DragSignals {
    pub fn transition_done(&self, area: AreaId, item: impl Into<ItemId>) {
        self.send(DragSignal::TransitionDone {
            area,
            item: item.into(),
        });
    }

    pub fn cancel(&self) {
        self.send(DragSignal::Cancel);
    }

    fn send(&self, signal: DragSignal) {
        if self.tx.try_send(signal).is_err() {
            log::trace!("drag coordinator is gone, dropping signal");
        }
    }
}

pub(crate) struct SignalQueue {
    tx: Sender<DragSignal>,
    rx: Receiver<DragSignal>,
}

impl Default for SignalQueue {
    fn default() -> Self {
        let (tx, rx) = async_channel::unbounded();
        Self { tx, rx }
    }
}

impl SignalQueue {
    pub(crate) fn handle(&self) -> DragSignals {
        DragSignals {
            tx: self.tx.clone(),
        }
    }

    pub(crate) fn next(&self) -> Option<DragSignal> {
        match self.rx.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => None,
        }
    }
}
