//! Durable poll queue.
//!
//! [`CommandQueue`] buffers command packets for applications that cannot
//! hold a live connection. One FIFO list per allow-listed application
//! name; a producer appends, a poller drains the whole list in one atomic
//! operation. Drained packets are gone whether or not the poller survives
//! to execute them.

use std::collections::HashMap;

use tokio::sync::Mutex;

use super::CommandPacket;
use crate::error::RelayError;

/// Per-application FIFO buffers behind a fixed allow-list.
///
/// The map is keyed by exactly the allow-listed names and never gains or
/// loses a key after construction, so allow-list membership is map
/// membership. Unknown names are rejected without touching any queue.
///
/// # Concurrency
///
/// One `Mutex` guards all lists: an add cannot be lost inside a
/// concurrent drain, and two concurrent drains cannot both observe the
/// same batch.
#[derive(Debug)]
pub struct CommandQueue {
    queues: Mutex<HashMap<String, Vec<CommandPacket>>>,
}

impl CommandQueue {
    /// Creates a queue with an empty list for every allow-listed name.
    #[must_use]
    pub fn new(applications: impl IntoIterator<Item = String>) -> Self {
        let queues = applications
            .into_iter()
            .map(|name| (name, Vec::new()))
            .collect();
        Self {
            queues: Mutex::new(queues),
        }
    }

    /// Appends `packet` to its application's list.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownApplication`] when
    /// `packet.application` is not allow-listed; nothing is mutated.
    pub async fn add(&self, packet: CommandPacket) -> Result<(), RelayError> {
        let mut queues = self.queues.lock().await;
        let Some(list) = queues.get_mut(&packet.application) else {
            return Err(RelayError::UnknownApplication(packet.application));
        };
        list.push(packet);
        Ok(())
    }

    /// Atomically removes and returns everything pending for
    /// `application`, in insertion order.
    ///
    /// Returns an empty `Vec` when nothing is pending. The returned batch
    /// is the only copy: a consumer that crashes before executing it
    /// permanently loses it.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownApplication`] when `application` is
    /// not allow-listed; nothing is mutated.
    pub async fn drain(&self, application: &str) -> Result<Vec<CommandPacket>, RelayError> {
        let mut queues = self.queues.lock().await;
        let Some(list) = queues.get_mut(application) else {
            return Err(RelayError::UnknownApplication(application.to_string()));
        };
        Ok(std::mem::take(list))
    }

    /// Returns how many packets are pending for `application` without
    /// removing them.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::UnknownApplication`] when `application` is
    /// not allow-listed.
    pub async fn pending(&self, application: &str) -> Result<usize, RelayError> {
        let queues = self.queues.lock().await;
        queues
            .get(application)
            .map(Vec::len)
            .ok_or_else(|| RelayError::UnknownApplication(application.to_string()))
    }

    /// Returns the configured allow-list, sorted.
    pub async fn applications(&self) -> Vec<String> {
        let queues = self.queues.lock().await;
        let mut names: Vec<String> = queues.keys().cloned().collect();
        names.sort();
        names
    }
}
