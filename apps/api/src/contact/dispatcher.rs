//! Contact dispatch status machine.
//!
//! ```text
//! idle --send--> sending --ok--> success --reset--> idle
//!                        --err-> error   --reset--> idle
//! ```
//!
//! Each send bumps a generation counter. A pending reset only fires if the
//! generation it was scheduled for is still current, so a resend from `error`
//! is never knocked back to `idle` by the earlier timer.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

use crate::contact::transport::{ContactMessage, ContactTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Idle,
    Sending,
    Success,
    Error,
}

impl DispatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Idle => "idle",
            DispatchStatus::Sending => "sending",
            DispatchStatus::Success => "success",
            DispatchStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("cannot send while a message is {}", .0.as_str())]
    Busy(DispatchStatus),
}

#[derive(Debug, Clone, Copy)]
struct DispatchState {
    status: DispatchStatus,
    generation: u64,
}

#[derive(Clone)]
pub struct ContactDispatcher {
    transport: Arc<dyn ContactTransport>,
    reset_after: Duration,
    state: Arc<watch::Sender<DispatchState>>,
}

impl ContactDispatcher {
    pub fn new(transport: Arc<dyn ContactTransport>, reset_after: Duration) -> Self {
        let (tx, _) = watch::channel(DispatchState {
            status: DispatchStatus::Idle,
            generation: 0,
        });
        Self {
            transport,
            reset_after,
            state: Arc::new(tx),
        }
    }

    pub fn status(&self) -> DispatchStatus {
        self.state.borrow().status
    }

    /// Sends one message and returns the terminal status it reached.
    ///
    /// Delivery failures are not errors here: they land in
    /// [`DispatchStatus::Error`]. Only a send that is refused outright
    /// (one already in flight, or a success still showing) returns `Err`.
    pub async fn send(&self, message: ContactMessage) -> Result<DispatchStatus, ContactError> {
        let generation = self.begin()?;
        let dispatch_id = Uuid::new_v4();
        info!("Dispatching contact message {dispatch_id} from {}", message.email);

        let terminal = match self.transport.deliver(&message).await {
            Ok(()) => {
                info!("Contact message {dispatch_id} delivered");
                DispatchStatus::Success
            }
            Err(e) => {
                error!("Contact message {dispatch_id} failed: {e}");
                DispatchStatus::Error
            }
        };

        self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.status = terminal;
            true
        });
        self.schedule_reset(generation);
        Ok(terminal)
    }

    fn begin(&self) -> Result<u64, ContactError> {
        let mut outcome = Ok(0);
        self.state.send_if_modified(|state| match state.status {
            DispatchStatus::Sending | DispatchStatus::Success => {
                outcome = Err(ContactError::Busy(state.status));
                false
            }
            DispatchStatus::Idle | DispatchStatus::Error => {
                state.generation += 1;
                state.status = DispatchStatus::Sending;
                outcome = Ok(state.generation);
                true
            }
        });
        outcome
    }

    fn schedule_reset(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let delay = self.reset_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|state| {
                if state.generation != generation || state.status == DispatchStatus::Idle {
                    return false;
                }
                state.status = DispatchStatus::Idle;
                true
            });
        });
    }
}
