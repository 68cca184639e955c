//! init / run / shutdown and the run-loop modes.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::App;
use crate::bridge::signals::install_interrupt_signals;
use crate::bridge::BridgeMessage;
use crate::core::{DrawError, Result};
use crate::event::names;

/// Who owns the event loop once `run` has been dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// The display library ran its own loop inside `run`; destroy when it returns.
    Displaylib,
    /// Poll heartbeats here until shutdown.
    Wait,
    /// Return right away; an outer loop keeps the app alive.
    Return,
}

impl FromStr for RunMode {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "displaylib" => Ok(RunMode::Displaylib),
            "wait" => Ok(RunMode::Wait),
            "return" => Ok(RunMode::Return),
            other => Err(DrawError::UnknownRunMode(other.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunMode::Displaylib => "displaylib",
            RunMode::Wait => "wait",
            RunMode::Return => "return",
        })
    }
}

impl App {
    pub fn init(&mut self) -> Result<()> {
        let (class, id) = (self.app.class(), self.app.id());
        self.send_event(class, names::INIT, Some(id), Vec::new())?;
        Ok(())
    }

    /// Dispatches `run`, then follows the mode the bridge picked through
    /// `custom_event_loop`.
    pub fn run(&mut self) -> Result<RunMode> {
        let (class, id) = (self.app.class(), self.app.id());
        self.send_event(class, names::RUN, Some(id), Vec::new())?;
        self.pump_events()?;

        let mode: RunMode = match self.run_mode.as_deref() {
            Some(mode) => mode.parse()?,
            None => {
                return Err(DrawError::UnknownRunMode(
                    "<none chosen by the display bridge>".to_string(),
                ))
            }
        };
        tracing::info!(%mode, "entering run loop");

        match mode {
            RunMode::Displaylib => self.destroy_app()?,
            RunMode::Wait => {
                let pause = Duration::from_millis(self.config.heartbeat_interval_ms);
                while !self.do_shutdown {
                    self.pump_events()?;
                    if self.do_shutdown {
                        break;
                    }
                    self.send_event(class, names::HEARTBEAT, Some(id), Vec::new())?;
                    if !pause.is_zero() {
                        std::thread::sleep(pause);
                    }
                }
                self.destroy_app()?;
            }
            RunMode::Return => {}
        }
        Ok(mode)
    }

    pub fn run_mode(&self) -> Option<&str> {
        self.run_mode.as_deref()
    }

    /// Shuts the app down: raises `do_shutdown`, dispatches `shutdown`, then
    /// destroys the document, any detached drawables, and finally the App
    /// drawable. Only the first call acts.
    pub fn destroy_app(&mut self) -> Result<()> {
        if self.do_shutdown {
            return Ok(());
        }
        self.do_shutdown = true;
        tracing::info!("app shutting down");

        let (class, id) = (self.app.class(), self.app.id());
        let shutdown = self.send_event(class, names::SHUTDOWN, Some(id), Vec::new());
        let mut result = shutdown.map(|_| ());
        let root = self.destroy(self.root.id());
        result = result.and(root);
        // Detached drawables (never attached, or moved out of the tree).
        for orphan in self.registry.ids() {
            if orphan != id {
                result = result.and(self.destroy(orphan));
            }
        }
        result.and(self.destroy(id))
    }

    /// Drains the bridge queue, dispatching events in arrival order. Returns
    /// how many messages were handled.
    pub fn pump_events(&mut self) -> Result<usize> {
        let messages = self.inbox.drain();
        let count = messages.len();
        for message in messages {
            match message {
                BridgeMessage::Event { name, target, args } => {
                    self.dispatch_bridge_event(&name, target, args)?;
                }
                BridgeMessage::Interrupt(signal) => {
                    tracing::info!(?signal, "interrupted, shutting down");
                    self.destroy_app()?;
                }
            }
        }
        Ok(count)
    }

    /// Routes SIGINT/SIGTERM through the normal shutdown path.
    pub fn install_interrupt_handler(&self) -> Result<std::thread::JoinHandle<()>> {
        Ok(install_interrupt_signals(self.sender.clone())?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/lifecycle.rs"]
mod tests;
