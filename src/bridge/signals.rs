use std::io;

use super::queue::BridgeSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptSignal {
    SigInt,
    SigTerm,
}

impl InterruptSignal {
    pub fn exit_code(self) -> i32 {
        match self {
            InterruptSignal::SigInt => 130,
            InterruptSignal::SigTerm => 143,
        }
    }
}

/// Forwards SIGINT/SIGTERM into the bridge queue so shutdown runs on the
/// core's thread, through the same destroy path as a normal exit.
#[cfg(unix)]
pub fn install_interrupt_signals(sender: BridgeSender) -> io::Result<std::thread::JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    Ok(std::thread::spawn(move || {
        for sig in signals.forever() {
            let signal = match sig {
                SIGINT => InterruptSignal::SigInt,
                SIGTERM => InterruptSignal::SigTerm,
                _ => continue,
            };
            tracing::info!(?signal, "interrupt received");
            if sender.interrupt(signal).is_err() {
                // The app is gone; nobody is left to shut down.
                break;
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn install_interrupt_signals(sender: BridgeSender) -> io::Result<std::thread::JoinHandle<()>> {
    let _ = sender;
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "interrupt signals are only wired up on unix",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/signals.rs"]
mod tests;
