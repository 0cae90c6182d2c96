// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client pool for exclusive checkout of pre-built clients
//!
//! Each checked-out client has exactly one holder for the duration of a
//! build-and-dispatch sequence. The pool resets the configuration on
//! checkout, so leftover params, headers, cookies or files can never
//! bleed from one holder into the next.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

use super::RequestClient;
use crate::error::{Error, Result};

/// Pool of request clients with semaphore-bounded exclusive checkout
pub struct ClientPool {
    clients: Mutex<Vec<RequestClient>>,
    semaphore: Arc<Semaphore>,
    size: usize,
    stats: Arc<RwLock<PoolStats>>,
}

/// Pool statistics
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Total checkouts served
    pub acquired: u64,
    /// Total clients returned
    pub released: u64,
    /// Currently checked-out clients
    pub active: u64,
    /// Peak concurrent checkouts
    pub peak_active: u64,
}

/// A client checked out from the pool; returns itself on drop
pub struct PooledClient {
    client: Option<RequestClient>,
    pool: Arc<ClientPool>,
    _permit: OwnedSemaphorePermit,
}

impl std::ops::Deref for PooledClient {
    type Target = RequestClient;

    fn deref(&self) -> &Self::Target {
        self.client.as_ref().expect("client present until drop")
    }
}

impl std::ops::DerefMut for PooledClient {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.client.as_mut().expect("client present until drop")
    }
}

impl Drop for PooledClient {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            self.pool.clients.lock().push(client);
        }
        let mut stats = self.pool.stats.write();
        stats.released += 1;
        stats.active = stats.active.saturating_sub(1);
    }
}

impl ClientPool {
    /// Create a pool of `pool_size` default clients
    pub fn new(pool_size: usize) -> Arc<Self> {
        Self::with_clients((0..pool_size).map(|_| RequestClient::new()).collect())
    }

    /// Create a pool from pre-built clients, e.g. ones sharing a proxy
    /// or certificate configuration
    pub fn with_clients(clients: Vec<RequestClient>) -> Arc<Self> {
        let size = clients.len();
        Arc::new(Self {
            clients: Mutex::new(clients),
            semaphore: Arc::new(Semaphore::new(size)),
            size,
            stats: Arc::new(RwLock::new(PoolStats::default())),
        })
    }

    /// Check out a client, waiting until one is free.
    ///
    /// The returned client starts from a clean configuration; its
    /// connection-level settings (proxy, timeout, certificate) are as
    /// the pool was built with.
    pub async fn acquire(self: &Arc<Self>) -> Result<PooledClient> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| Error::config("pool semaphore closed"))?;

        let mut client = self
            .clients
            .lock()
            .pop()
            .ok_or_else(|| Error::config("pool exhausted"))?;

        // Reset-on-checkout contract: a client returned dirty never
        // leaks state into the next holder
        client.reset();

        {
            let mut stats = self.stats.write();
            stats.acquired += 1;
            stats.active += 1;
            if stats.active > stats.peak_active {
                stats.peak_active = stats.active;
            }
        }
        debug!(active = self.stats.read().active, "client checked out");

        Ok(PooledClient {
            client: Some(client),
            pool: Arc::clone(self),
            _permit: permit,
        })
    }

    /// Get pool statistics
    pub fn stats(&self) -> PoolStats {
        self.stats.read().clone()
    }

    /// Number of clients the pool was built with
    pub fn size(&self) -> usize {
        self.size
    }

    /// Clients currently available for checkout
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
