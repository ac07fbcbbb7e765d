//! Live application registry.
//!
//! [`ClientRegistry`] is the source of truth for push routing: it maps each
//! application name to the set of currently connected clients registered
//! for it, with a reverse index enforcing that a client is bound to at most
//! one application at a time.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use super::ClientId;

#[derive(Debug, Default)]
struct Inner {
    /// Application name → clients registered for it. Only names with at
    /// least one member are present; empty sets are pruned eagerly.
    by_application: HashMap<String, HashSet<ClientId>>,
    /// Client → the one application it is currently bound to.
    by_client: HashMap<ClientId, String>,
}

/// Mapping from application names to their registered endpoint sets.
///
/// All operations are infallible: registering is last-write-wins,
/// unregistering an unknown client is a no-op, and looking up an unknown
/// application yields an empty snapshot.
///
/// # Concurrency
///
/// One `RwLock` guards both indexes, so every mutation is atomic with
/// respect to every snapshot. [`endpoints`](Self::endpoints) returns an
/// owned copy taken under a single read acquisition; fan-out iterates that
/// copy and therefore cannot race a concurrent disconnect.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    inner: RwLock<Inner>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `client` to `application`, replacing any previous binding.
    ///
    /// If the client was registered for a different application it is first
    /// removed from that set (pruning it when emptied). Re-registering for
    /// the same application is a no-op.
    pub async fn register(&self, client: ClientId, application: &str) {
        let mut inner = self.inner.write().await;

        if let Some(previous) = inner.by_client.get(&client).cloned() {
            if previous == application {
                return;
            }
            remove_member(&mut inner.by_application, &previous, client);
        }

        inner
            .by_application
            .entry(application.to_string())
            .or_default()
            .insert(client);
        inner.by_client.insert(client, application.to_string());
    }

    /// Removes `client` from whichever application set contains it.
    ///
    /// A set that becomes empty is removed from the key space entirely.
    /// Unregistering a client that was never registered is a no-op.
    pub async fn unregister(&self, client: ClientId) {
        let mut inner = self.inner.write().await;
        if let Some(application) = inner.by_client.remove(&client) {
            remove_member(&mut inner.by_application, &application, client);
        }
    }

    /// Returns a snapshot of the clients currently registered for
    /// `application`, possibly empty.
    pub async fn endpoints(&self, application: &str) -> Vec<ClientId> {
        let inner = self.inner.read().await;
        inner
            .by_application
            .get(application)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the application `client` is currently bound to, if any.
    pub async fn application_of(&self, client: ClientId) -> Option<String> {
        let inner = self.inner.read().await;
        inner.by_client.get(&client).cloned()
    }

    /// Returns the application names that currently have at least one
    /// registered client, in no particular order.
    pub async fn applications(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        inner.by_application.keys().cloned().collect()
    }

    /// Returns the number of applications with live registrations.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_application.len()
    }

    /// Returns `true` if no client is registered for anything.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.by_application.is_empty()
    }
}

/// Drops `client` from `application`'s set, pruning the set if emptied.
fn remove_member(
    by_application: &mut HashMap<String, HashSet<ClientId>>,
    application: &str,
    client: ClientId,
) {
    if let Some(set) = by_application.get_mut(application) {
        set.remove(&client);
        if set.is_empty() {
            by_application.remove(application);
        }
    }
}
