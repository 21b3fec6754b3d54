//! Round-robin rotation over the beacon catalog.
//!
//! # Responsibilities
//! - Hand out the head server, take it back at the tail
//! - Keep exactly the catalog's members, never more or fewer
//!
//! # Design Decisions
//! - Mutex-guarded deque; concurrent probes serialize on dequeue/requeue only
//! - A caller finding the queue empty waits for a release instead of failing
//! - `ServerLease` re-enqueues on drop, so every exit path pairs next/release

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::catalog::CheckServer;
use crate::error::ProberError;

/// Server Rotation Queue.
#[derive(Debug)]
pub struct ServerQueue {
    servers: Mutex<VecDeque<CheckServer>>,
    released: Condvar,
    capacity: usize,
}

impl ServerQueue {
    /// Build a queue holding the given servers in order.
    pub fn new(servers: impl IntoIterator<Item = CheckServer>) -> Result<Self, ProberError> {
        let servers: VecDeque<CheckServer> = servers.into_iter().collect();
        if servers.is_empty() {
            return Err(ProberError::EmptyCatalog);
        }
        let capacity = servers.len();
        Ok(Self {
            servers: Mutex::new(servers),
            released: Condvar::new(),
            capacity,
        })
    }

    // Queue contents are consistent between operations, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<CheckServer>> {
        self.servers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Remove and return the head server.
    ///
    /// Blocks while every server is checked out by other callers.
    pub fn next(&self) -> CheckServer {
        let mut servers = self.lock();
        loop {
            if let Some(server) = servers.pop_front() {
                return server;
            }
            servers = self
                .released
                .wait(servers)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Append a server to the tail.
    pub fn release(&self, server: CheckServer) {
        self.lock().push_back(server);
        self.released.notify_one();
    }

    /// Take the head server; it goes back to the tail when the lease drops.
    pub fn lease(&self) -> ServerLease<'_> {
        ServerLease {
            queue: self,
            server: Some(self.next()),
        }
    }

    /// Servers currently waiting in the queue.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Catalog size the queue was built with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current rotation order, head first.
    pub fn snapshot(&self) -> Vec<CheckServer> {
        self.lock().iter().cloned().collect()
    }
}

/// A checked-out server. Returned to the queue tail on drop.
#[derive(Debug)]
pub struct ServerLease<'a> {
    queue: &'a ServerQueue,
    server: Option<CheckServer>,
}

impl Deref for ServerLease<'_> {
    type Target = CheckServer;

    fn deref(&self) -> &CheckServer {
        // `server` is only taken in drop.
        self.server.as_ref().unwrap_or_else(|| unreachable!("lease used after release"))
    }
}

impl Drop for ServerLease<'_> {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            self.queue.release(server);
        }
    }
}
