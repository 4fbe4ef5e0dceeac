// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Push-token broker.
//
// Holds the current push-registration token and republishes it exactly once
// per change. Two states: Unregistered (`None`) and Registered(token). A
// callback carrying the value already held is a no-op. A `None` from the OS
// (registration failed or revoked) is a valid state and is published like
// any other change.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use pushbridge_core::{BridgeEvent, PushToken};

use crate::events::EventSink;

/// Owner of the current push token.
pub struct TokenBroker {
    current: Mutex<Option<PushToken>>,
    events: EventSink,
}

impl TokenBroker {
    pub fn new(events: EventSink) -> Self {
        Self {
            current: Mutex::new(None),
            events,
        }
    }

    /// OS registration callback. `raw` is the token as the push service
    /// reported it; absent and blank both mean "no token".
    ///
    /// Returns whether a `TokenChanged` event was published.
    pub fn on_registration_callback(&self, raw: Option<&str>) -> bool {
        self.update(raw.and_then(PushToken::new))
    }

    /// Store `token` and publish it if it differs from the current value.
    ///
    /// Compare, store and publish happen under one lock so that two
    /// concurrent callbacks cannot both see the stale value and publish twice.
    pub fn update(&self, token: Option<PushToken>) -> bool {
        let mut current = self.lock();

        if *current == token {
            debug!(registered = token.is_some(), "push token unchanged");
            return false;
        }

        match &token {
            Some(t) => info!(token = %t.redacted(), "push token changed"),
            None => info!("push token cleared"),
        }

        *current = token.clone();
        self.events.publish(BridgeEvent::TokenChanged { token });
        true
    }

    /// Last stored token. `None` before the first callback.
    pub fn current_token(&self) -> Option<PushToken> {
        self.lock().clone()
    }

    // The guarded value is a plain Option, so a poisoned lock still holds a
    // valid state.
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<PushToken>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broker() -> (TokenBroker, crate::events::EventSubscription) {
        let sink = EventSink::new(64);
        let sub = sink.subscribe();
        (TokenBroker::new(sink), sub)
    }

    fn changed(raw: Option<&str>) -> BridgeEvent {
        BridgeEvent::TokenChanged {
            token: raw.and_then(PushToken::new),
        }
    }

    #[test]
    fn starts_unregistered() {
        let (broker, mut sub) = broker();
        assert_eq!(broker.current_token(), None);
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn repeated_token_is_published_once() {
        let (broker, mut sub) = broker();

        assert!(broker.on_registration_callback(Some("abc")));
        assert!(!broker.on_registration_callback(Some("abc")));

        assert_eq!(sub.drain(), vec![changed(Some("abc"))]);
        assert_eq!(broker.current_token(), PushToken::new("abc"));
    }

    #[test]
    fn every_transition_through_none_is_published() {
        let (broker, mut sub) = broker();

        for raw in [Some("abc"), None, Some("abc")] {
            broker.on_registration_callback(raw);
        }

        assert_eq!(
            sub.drain(),
            vec![changed(Some("abc")), changed(None), changed(Some("abc"))]
        );
    }

    #[test]
    fn blank_token_counts_as_none() {
        let (broker, mut sub) = broker();

        assert!(!broker.on_registration_callback(Some("")));
        broker.on_registration_callback(Some("abc"));
        assert!(broker.on_registration_callback(Some("")));

        assert_eq!(sub.drain(), vec![changed(Some("abc")), changed(None)]);
        assert_eq!(broker.current_token(), None);
    }

    #[test]
    fn concurrent_identical_callbacks_publish_once() {
        let (broker, mut sub) = broker();

        std::thread::scope(|scope| {
            for _ in 0..16 {
                scope.spawn(|| broker.on_registration_callback(Some("T1")));
            }
        });

        assert_eq!(sub.drain(), vec![changed(Some("T1"))]);
    }

    #[test]
    fn racing_distinct_tokens_leave_the_last_published_as_current() {
        let (broker, mut sub) = broker();

        std::thread::scope(|scope| {
            for i in 0..16 {
                let broker = &broker;
                scope.spawn(move || {
                    let raw = format!("T{i}");
                    broker.on_registration_callback(Some(&raw));
                    broker.on_registration_callback(Some(&raw));
                });
            }
        });

        let events = sub.drain();
        assert!(!events.is_empty());
        assert!(events.windows(2).all(|pair| pair[0] != pair[1]));
        assert_eq!(
            events.last(),
            Some(&BridgeEvent::TokenChanged {
                token: broker.current_token()
            })
        );
    }
}
