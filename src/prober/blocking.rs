//! Blocking prober.

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use hyper::ext::ReasonPhrase;
use reqwest::blocking::Client;

use super::{location_of, observe, reason_of, ClientSettings, Exchange, Transport};
use crate::catalog::CheckServer;
use crate::config::ProberConfig;
use crate::error::{describe, ProberError};
use crate::proxy::ProxySetting;
use crate::rotation::ServerQueue;
use crate::status::{NetworkReport, NetworkStatus};

/// Connectivity prober that blocks the calling thread for each probe.
///
/// Safe to share between threads; concurrent probes each lease a different
/// server. Must not be created or used from inside an async runtime, use
/// [`AsyncProber`](super::AsyncProber) there.
pub struct Prober {
    servers: ServerQueue,
    settings: ClientSettings,
    transport: ArcSwap<Transport<Client>>,
}

impl Prober {
    pub fn new(config: ProberConfig) -> Result<Self, ProberError> {
        let (settings, catalog, proxy) = ClientSettings::from_config(config)?;
        let servers = ServerQueue::new(catalog)?;
        let client = build_client(&settings, &proxy)?;

        tracing::debug!(servers = servers.capacity(), proxy = %proxy, "Blocking prober created");

        Ok(Self {
            servers,
            settings,
            transport: ArcSwap::new(Arc::new(Transport { proxy, client })),
        })
    }

    /// Prober over the built-in catalog with default timeouts and no proxy.
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

    /// True iff the next probe classifies as `Connected`.
    pub fn is_online(&self) -> bool {
        self.network_status().is_connected()
    }

    pub fn network_status(&self) -> NetworkStatus {
        self.network_report().status()
    }

    /// Probe the next server in rotation and describe the outcome.
    pub fn network_report(&self) -> NetworkReport {
        let server = self.servers.lease();
        let transport = self.transport.load_full();

        let span = tracing::debug_span!("probe", server = %server.name(), url = %server.url());
        let _enter = span.enter();

        let started = Instant::now();
        let exchange = match transport.client.get(server.url()).send() {
            Ok(response) => Exchange::Response {
                status: response.status(),
                reason: reason_of(response.extensions().get::<ReasonPhrase>()),
                location: location_of(response.headers()),
            },
            Err(e) => Exchange::Failed(describe(&e)),
        };
        observe(&server, exchange, started)
    }

    /// Current rotation order, head first. Servers mid-probe are absent.
    pub fn rotation(&self) -> Vec<CheckServer> {
        self.servers.snapshot()
    }

    /// Number of servers in the catalog.
    pub fn catalog_size(&self) -> usize {
        self.servers.capacity()
    }
}

fn build_client(settings: &ClientSettings, proxy: &ProxySetting) -> Result<Client, ProberError> {
    Ok(configure_client!(Client::builder(), settings, proxy).build()?)
}
