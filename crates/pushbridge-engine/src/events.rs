// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outward event channel.
//
// A single broadcast channel carries every `BridgeEvent`. Components publish
// through cloned `EventSink`s; the business layer holds `EventSubscription`s.
// Each component publishes from one place, so per-component order is the
// channel order. There is no ordering guarantee across components.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, warn};

use pushbridge_core::BridgeEvent;
use pushbridge_core::config::clamp_buffer;

/// Publishing side of the outward event channel.
#[derive(Clone)]
pub struct EventSink {
    tx: broadcast::Sender<BridgeEvent>,
}

impl EventSink {
    /// Create a channel retaining up to `capacity` undelivered events per
    /// subscriber, bounded to `1..=BridgeConfig::MAX_CHANNEL_BUFFER`.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(clamp_buffer(capacity));
        Self { tx }
    }

    /// Publish an event. Never blocks; with no subscribers the event is
    /// discarded.
    pub fn publish(&self, event: BridgeEvent) {
        match self.tx.send(event) {
            Ok(subscribers) => debug!(subscribers, "event published"),
            Err(_) => debug!("event published with no subscribers"),
        }
    }

    /// Register a new subscriber. It sees only events published after this call.
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A registered listener on the outward event channel.
///
/// Dropping it (or calling [`unsubscribe`](Self::unsubscribe)) deregisters.
pub struct EventSubscription {
    rx: broadcast::Receiver<BridgeEvent>,
}

impl EventSubscription {
    /// Wait for the next event. `None` once the bridge has been dropped.
    ///
    /// A subscriber that fell further behind than the channel capacity skips
    /// the events it missed and continues with the oldest one retained.
    pub async fn recv(&mut self) -> Option<BridgeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event subscriber lagged; oldest events dropped")
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published event, without waiting.
    pub fn try_recv(&mut self) -> Option<BridgeEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "event subscriber lagged; oldest events dropped")
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain everything already published.
    pub fn drain(&mut self) -> Vec<BridgeEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    pub fn unsubscribe(self) {}
}
