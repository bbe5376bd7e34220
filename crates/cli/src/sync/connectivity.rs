// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitor.
//!
//! Publishes edge-triggered [`ConnectivityEvent`]s on a broadcast channel and
//! answers the level-triggered [`Connectivity::is_online`] query. The monitor
//! itself has no opinion about how connectivity is detected: callers feed it
//! with [`ConnectivityMonitor::set_online`], either from a test or from the
//! TCP reachability probe started by [`spawn_probe`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::http::Uri;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A connectivity transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// The remote became reachable.
    Online,
    /// The remote became unreachable.
    Offline,
}

impl ConnectivityEvent {
    fn from_online(online: bool) -> Self {
        if online {
            ConnectivityEvent::Online
        } else {
            ConnectivityEvent::Offline
        }
    }
}

/// Level-triggered connectivity query.
pub trait Connectivity: Send + Sync {
    /// Returns true if the remote is currently believed reachable.
    fn is_online(&self) -> bool;
}

impl<C: Connectivity + ?Sized> Connectivity for Arc<C> {
    fn is_online(&self) -> bool {
        (**self).is_online()
    }
}

/// Tracks the online/offline level and broadcasts transitions.
pub struct ConnectivityMonitor {
    online: AtomicBool,
    events: broadcast::Sender<ConnectivityEvent>,
}

impl ConnectivityMonitor {
    /// Create a monitor with the given initial level.
    pub fn new(initially_online: bool) -> Self {
        let (events, _) = broadcast::channel(64);
        ConnectivityMonitor {
            online: AtomicBool::new(initially_online),
            events,
        }
    }

    /// Subscribe to transition events.
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectivityEvent> {
        self.events.subscribe()
    }

    /// Record the current level, emitting an event only on a transition.
    pub fn set_online(&self, online: bool) -> Option<ConnectivityEvent> {
        let was = self.online.swap(online, Ordering::AcqRel);
        if was == online {
            return None;
        }

        let event = ConnectivityEvent::from_online(online);
        match event {
            ConnectivityEvent::Online => info!("connection restored"),
            ConnectivityEvent::Offline => {
                warn!("connection lost; transactions will be saved locally")
            }
        }
        let _ = self.events.send(event);
        Some(event)
    }

    /// Emit the current level as an event without a transition.
    ///
    /// Used as an explicit sync trigger: announcing `Online` makes listeners
    /// drain even though nothing changed.
    pub fn announce(&self) -> ConnectivityEvent {
        let event = ConnectivityEvent::from_online(self.is_online());
        let _ = self.events.send(event);
        event
    }
}

impl Connectivity for ConnectivityMonitor {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }
}

/// Host and port whose TCP reachability stands in for "online".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    host: String,
    port: u16,
}

impl ProbeTarget {
    /// Create a target from a host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        ProbeTarget {
            host: host.into(),
            port,
        }
    }

    /// Derive the target from a `ws://` or `wss://` URL.
    pub fn from_url(url: &str) -> Option<Self> {
        let uri: Uri = url.parse().ok()?;
        let host = uri.host()?.to_string();
        let port = uri.port_u16().unwrap_or(match uri.scheme_str() {
            Some("wss") | Some("https") => 443,
            _ => 80,
        });
        Some(ProbeTarget { host, port })
    }

    /// The `host:port` string to connect to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Attempt one TCP connection to the target.
pub async fn probe_once(target: &ProbeTarget, timeout: Duration) -> bool {
    let reachable = matches!(
        tokio::time::timeout(timeout, TcpStream::connect(target.addr())).await,
        Ok(Ok(_))
    );
    debug!("probe {}: reachable={}", target.addr(), reachable);
    reachable
}

/// Spawn a task that probes every `interval` and feeds the monitor.
///
/// Runs until `cancel` fires.
pub fn spawn_probe(
    monitor: Arc<ConnectivityMonitor>,
    target: ProbeTarget,
    interval: Duration,
    timeout: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let online = probe_once(&target, timeout).await;
            monitor.set_online(online);

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }
    })
}
