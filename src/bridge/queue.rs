//! Single-consumer queue funnelling backend messages into the core's thread.

use std::sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError};

use super::signals::InterruptSignal;
use crate::core::{DrawableId, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    Event {
        name: String,
        target: Option<DrawableId>,
        args: Vec<Value>,
    },
    Interrupt(InterruptSignal),
}

#[derive(Clone, Debug)]
pub struct BridgeSender {
    tx: Sender<BridgeMessage>,
}

#[derive(Debug)]
pub struct BridgeReceiver {
    rx: Receiver<BridgeMessage>,
}

pub fn bridge_channel() -> (BridgeSender, BridgeReceiver) {
    let (tx, rx) = mpsc::channel();
    (BridgeSender { tx }, BridgeReceiver { rx })
}

impl BridgeSender {
    pub fn send(&self, msg: BridgeMessage) -> Result<(), SendError<BridgeMessage>> {
        self.tx.send(msg)
    }

    pub fn send_event(
        &self,
        name: &str,
        target: Option<DrawableId>,
        args: Vec<Value>,
    ) -> Result<(), SendError<BridgeMessage>> {
        self.send(BridgeMessage::Event {
            name: name.to_string(),
            target,
            args,
        })
    }

    pub fn interrupt(&self, signal: InterruptSignal) -> Result<(), SendError<BridgeMessage>> {
        self.send(BridgeMessage::Interrupt(signal))
    }
}

impl BridgeReceiver {
    pub fn try_recv(&mut self) -> Result<BridgeMessage, TryRecvError> {
        self.rx.try_recv()
    }

    /// Everything queued right now, in arrival order.
    pub fn drain(&mut self) -> Vec<BridgeMessage> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(msg) => out.push(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("bridge queue disconnected");
                    break;
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/queue.rs"]
mod tests;
