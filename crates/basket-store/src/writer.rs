//! # Single-Writer Queue
//!
//! The hardened mutation path. [`CartStore`] mutations called directly can
//! interleave (see the concurrency notes on [`store`](crate::store)); the
//! writer serializes them through one queue so no update is ever computed
//! from a stale snapshot.
//!
//! ## Writer Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CartWriter Architecture                           │
//! │                                                                         │
//! │  UI event handlers (any number, any thread)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartWriterHandle::add / increment / decrement                          │
//! │       │                                                                 │
//! │       ▼   mpsc::Sender (bounded)                                        │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │             command queue               │                            │
//! │  └────────────────────┬────────────────────┘                            │
//! │                       ▼                                                 │
//! │  CartWriter::run (one task)                                             │
//! │  └── applies commands one at a time, awaiting each                      │
//! │      persist-and-publish before taking the next                         │
//! │                                                                         │
//! │  SHUTDOWN: on CartWriterHandle::shutdown(), or when every handle        │
//! │  is dropped and the queue drains. A failed mutation is logged and       │
//! │  the loop continues - the store already refused to publish it.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use basket_core::NewItem;

use crate::error::StoreError;
use crate::store::CartStore;

/// Queue capacity. Mutations are human-paced; a small buffer is plenty
/// and keeps backpressure immediate if persistence stalls.
const COMMAND_BUFFER: usize = 64;

/// A queued cart mutation.
#[derive(Debug, Clone)]
pub enum CartCommand {
    /// Add-or-bump by descriptor.
    Add(NewItem),

    /// Increment the line with this id.
    Increment(String),

    /// Decrement the line with this id.
    Decrement(String),
}

/// What actually travels over the queue.
#[derive(Debug)]
enum Envelope {
    Apply(CartCommand),
    Shutdown,
}

/// The single-writer task owning the mutation order.
pub struct CartWriter {
    store: Arc<CartStore>,
    commands: mpsc::Receiver<Envelope>,
}

impl CartWriter {
    /// Spawns the writer task and returns the handle to enqueue mutations.
    ///
    /// The task runs until [`CartWriterHandle::shutdown`] is called or
    /// every handle clone is dropped.
    pub fn spawn(store: Arc<CartStore>) -> CartWriterHandle {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);

        let writer = CartWriter {
            store,
            commands: rx,
        };
        tokio::spawn(writer.run());

        CartWriterHandle { commands: tx }
    }

    /// Applies queued commands one at a time.
    ///
    /// Each command's full read-rebuild-persist-publish cycle completes
    /// before the next command is taken, which is what closes the
    /// lost-update window of direct mutation calls.
    async fn run(mut self) {
        info!("cart writer started");

        while let Some(envelope) = self.commands.recv().await {
            let command = match envelope {
                Envelope::Apply(command) => command,
                Envelope::Shutdown => break,
            };

            debug!(?command, "applying cart command");

            let result = match command {
                CartCommand::Add(new_item) => self.store.add(new_item).await,
                CartCommand::Increment(id) => self.store.increment(&id).await,
                CartCommand::Decrement(id) => self.store.decrement(&id).await,
            };

            if let Err(err) = result {
                // The store kept its previous state; nothing to undo here
                warn!(error = %err, "cart mutation failed");
            }
        }

        info!("cart writer stopped");
    }
}

/// Cloneable handle enqueuing mutations onto the writer.
#[derive(Debug, Clone)]
pub struct CartWriterHandle {
    commands: mpsc::Sender<Envelope>,
}

impl CartWriterHandle {
    /// Enqueues an add-or-bump.
    pub async fn add(&self, new_item: NewItem) -> Result<(), StoreError> {
        self.send(CartCommand::Add(new_item)).await
    }

    /// Enqueues an increment.
    pub async fn increment(&self, id: impl Into<String>) -> Result<(), StoreError> {
        self.send(CartCommand::Increment(id.into())).await
    }

    /// Enqueues a decrement.
    pub async fn decrement(&self, id: impl Into<String>) -> Result<(), StoreError> {
        self.send(CartCommand::Decrement(id.into())).await
    }

    /// Asks the writer to stop after the commands already queued.
    ///
    /// Idempotent; a writer that has already stopped is not an error.
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Envelope::Shutdown).await;
    }

    /// Checks whether the writer task is still accepting commands.
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    async fn send(&self, command: CartCommand) -> Result<(), StoreError> {
        self.commands
            .send(Envelope::Apply(command))
            .await
            .map_err(|_| StoreError::WriterClosed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use basket_kv::MemoryStore;

    fn desc(id: &str) -> NewItem {
        NewItem::new(id, format!("Product {}", id), format!("https://img/{}.png", id), 5.0)
    }

    async fn open_store() -> Arc<CartStore> {
        Arc::new(CartStore::open(Arc::new(MemoryStore::new())).await)
    }

    /// Waits until the published sequence satisfies the predicate.
    async fn wait_for(store: &CartStore, predicate: impl Fn(&[basket_core::Item]) -> bool) {
        let mut rx = store.subscribe();
        let deadline = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if predicate(&rx.borrow_and_update().clone()) {
                    return;
                }
                rx.changed().await.expect("store dropped");
            }
        });
        deadline.await.expect("condition not reached in time");
    }

    #[tokio::test]
    async fn test_commands_apply_in_order() {
        let store = open_store().await;
        let writer = CartWriter::spawn(store.clone());

        writer.add(desc("a")).await.unwrap();
        writer.increment("a").await.unwrap();
        writer.add(desc("b")).await.unwrap();
        writer.decrement("b").await.unwrap();

        wait_for(&store, |items| {
            items.len() == 1 && items[0].id == "a" && items[0].quantity == 2
        })
        .await;
    }

    #[tokio::test]
    async fn test_concurrent_senders_lose_no_updates() {
        let store = open_store().await;
        let writer = CartWriter::spawn(store.clone());

        writer.add(desc("a")).await.unwrap();

        // 20 increments raced from separate tasks - every one must land
        let mut tasks = Vec::new();
        for _ in 0..20 {
            let handle = writer.clone();
            tasks.push(tokio::spawn(async move {
                handle.increment("a").await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        wait_for(&store, |items| {
            items.first().is_some_and(|item| item.quantity == 21)
        })
        .await;
    }

    #[tokio::test]
    async fn test_queued_commands_apply_before_shutdown() {
        let store = open_store().await;
        let writer = CartWriter::spawn(store.clone());

        writer.add(desc("a")).await.unwrap();
        writer.increment("a").await.unwrap();
        writer.shutdown().await;

        wait_for(&store, |items| items.len() == 1 && items[0].quantity == 2).await;
    }

    #[tokio::test]
    async fn test_send_after_shutdown_errors() {
        let store = open_store().await;
        let writer = CartWriter::spawn(store);

        writer.shutdown().await;

        // Wait for the task to drop the receiver
        let deadline = tokio::time::timeout(Duration::from_secs(5), async {
            while writer.is_running() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        });
        deadline.await.expect("writer did not stop");

        let err = writer.add(desc("a")).await.unwrap_err();
        assert!(matches!(err, StoreError::WriterClosed));
    }
}
