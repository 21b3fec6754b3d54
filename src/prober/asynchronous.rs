//! Async prober for hosts running on tokio.

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use hyper::ext::ReasonPhrase;
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::Instrument;

use super::{location_of, observe, reason_of, ClientSettings, Exchange, Transport};
use crate::catalog::CheckServer;
use crate::config::ProberConfig;
use crate::error::{describe, ProberError};
use crate::proxy::ProxySetting;
use crate::rotation::ServerQueue;
use crate::status::{NetworkReport, NetworkStatus};

/// Connectivity prober whose probes are futures.
///
/// Concurrent probes beyond the catalog size wait on a semaphore instead
/// of blocking a runtime worker on the rotation queue.
pub struct AsyncProber {
    servers: ServerQueue,
    // One permit per catalog entry, so a held permit guarantees a free server.
    available: Semaphore,
    settings: ClientSettings,
    transport: ArcSwap<Transport<Client>>,
}

impl AsyncProber {
    pub fn new(config: ProberConfig) -> Result<Self, ProberError> {
        let (settings, catalog, proxy) = ClientSettings::from_config(config)?;
        let servers = ServerQueue::new(catalog)?;
        let client = build_client(&settings, &proxy)?;

        tracing::debug!(servers = servers.capacity(), proxy = %proxy, "Async prober created");

        Ok(Self {
            available: Semaphore::new(servers.capacity()),
            servers,
            settings,
            transport: ArcSwap::new(Arc::new(Transport { proxy, client })),
        })
    }

    pub fn with_defaults() -> Result<Self, ProberError> {
        Self::new(ProberConfig::default())
    }

    /// Route subsequent probes through `proxy`.
    pub fn set_proxy(&self, proxy: ProxySetting) -> Result<(), ProberError> {
        let client = build_client(&self.settings, &proxy)?;
        tracing::info!(proxy = %proxy, "Prober proxy changed");
        self.transport.store(Arc::new(Transport { proxy, client }));
        Ok(())
    }

    pub fn proxy(&self) -> ProxySetting {
        self.transport.load().proxy.clone()
    }

    pub async fn is_online(&self) -> bool {
        self.network_status().await.is_connected()
    }

    pub async fn network_status(&self) -> NetworkStatus {
        self.network_report().await.status()
    }

    /// Probe the next server in rotation and describe the outcome.
    pub async fn network_report(&self) -> NetworkReport {
        // The semaphore is never closed.
        let _permit = self.available.acquire().await.ok();
        let server = self.servers.lease();
        let transport = self.transport.load_full();

        let span = tracing::debug_span!("probe", server = %server.name(), url = %server.url());
        async {
            let started = Instant::now();
            let exchange = match transport.client.get(server.url()).send().await {
                Ok(response) => Exchange::Response {
                    status: response.status(),
                    reason: reason_of(response.extensions().get::<ReasonPhrase>()),
                    location: location_of(response.headers()),
                },
                Err(e) => Exchange::Failed(describe(&e)),
            };
            observe(&server, exchange, started)
        }
        .instrument(span)
        .await
    }

    /// Current rotation order, head first. Servers mid-probe are absent.
    pub fn rotation(&self) -> Vec<CheckServer> {
        self.servers.snapshot()
    }

    pub fn catalog_size(&self) -> usize {
        self.servers.capacity()
    }
}

fn build_client(settings: &ClientSettings, proxy: &ProxySetting) -> Result<Client, ProberError> {
    Ok(configure_client!(Client::builder(), settings, proxy).build()?)
}
