// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge dispatcher — the single boundary exposed to the business layer.
//
// Inbound: `BridgeCommand`s, each answered by exactly one `CommandReply`.
// Outbound: one broadcast channel of `BridgeEvent`s fed by the token broker
// and the notification router. The dispatcher holds no business logic; it
// routes commands to components and hands out event subscriptions.
//
// `spawn` runs a command loop on the tokio runtime. Every command is served
// on its own task so that a network query waiting on the OS never delays a
// token fetch. Commands in flight when the loop shuts down still complete.

use std::sync::Arc;

use tokio::sync::{Notify, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::{
    BridgeCommand, BridgeConfig, CommandReply, NetworkQueryResult, PermissionScope, PushToken,
};
use pushbridge_native::traits::PlatformBridge;

use crate::events::{EventSink, EventSubscription};
use crate::network::NetworkQueryAdapter;
use crate::notify::NotificationRouter;
use crate::token::TokenBroker;

/// Owner of the bridge components and the outward event channel.
///
/// Cheap to clone; all clones share the same components and channel.
pub struct BridgeDispatcher<P: ?Sized> {
    platform: Arc<P>,
    config: Arc<BridgeConfig>,
    events: EventSink,
    broker: Arc<TokenBroker>,
    router: Arc<NotificationRouter<P>>,
    network: NetworkQueryAdapter<P>,
}

impl<P: ?Sized> Clone for BridgeDispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
            config: Arc::clone(&self.config),
            events: self.events.clone(),
            broker: Arc::clone(&self.broker),
            router: Arc::clone(&self.router),
            network: self.network.clone(),
        }
    }
}

impl<P: PlatformBridge + ?Sized + 'static> BridgeDispatcher<P> {
    pub fn new(platform: Arc<P>, config: BridgeConfig) -> Self {
        let events = EventSink::new(config.event_capacity());
        let broker = Arc::new(TokenBroker::new(events.clone()));
        let router = Arc::new(NotificationRouter::new(
            Arc::clone(&platform),
            events.clone(),
        ));
        let network = NetworkQueryAdapter::new(
            Arc::clone(&platform),
            config.network_query_timeout(),
        );

        Self {
            platform,
            config: Arc::new(config),
            events,
            broker,
            router,
            network,
        }
    }

    /// Entry point for the OS push-registration callback.
    pub fn token_broker(&self) -> &TokenBroker {
        &self.broker
    }

    /// Entry points for the OS notification callbacks.
    pub fn notification_router(&self) -> &NotificationRouter<P> {
        &self.router
    }

    /// Register a business-layer listener for `TokenChanged` and
    /// notification events.
    pub fn subscribe(&self) -> EventSubscription {
        self.events.subscribe()
    }

    /// Request notification authorisation with the fixed scope, then
    /// register with the push service. The token arrives later through
    /// [`TokenBroker::on_registration_callback`].
    pub fn activate(&self) -> Result<()> {
        let scope = PermissionScope::REQUESTED;
        info!(
            platform = self.platform.platform_name(),
            alert = scope.alert,
            badge = scope.badge,
            sound = scope.sound,
            "activating push registration"
        );

        if let Err(e) = self
            .platform
            .request_authorization(scope)
            .and_then(|()| self.platform.register_for_remote_notifications())
        {
            warn!(error = %e, "push registration could not be started");
            return Err(e);
        }
        Ok(())
    }

    pub fn current_token(&self) -> Option<PushToken> {
        self.broker.current_token()
    }

    pub async fn query_current_network(&self) -> NetworkQueryResult {
        self.network.query_current_network().await
    }

    /// Answer one command.
    pub async fn handle(&self, command: BridgeCommand) -> CommandReply {
        debug!(method = command.method_name(), "routing command");
        match command {
            BridgeCommand::QueryNetwork => {
                CommandReply::Networks(self.query_current_network().await)
            }
            BridgeCommand::GetCurrentToken => CommandReply::Token(self.current_token()),
            BridgeCommand::Unrecognized(method) => {
                let err = BridgeError::UnrecognizedCommand(method.clone());
                warn!(error = %err, "replying not implemented");
                CommandReply::NotImplemented { method }
            }
        }
    }

    /// Answer a command given by its channel method name.
    pub async fn handle_method(&self, method: &str) -> CommandReply {
        self.handle(BridgeCommand::from_method(method)).await
    }

    /// Start the command loop on the current tokio runtime.
    pub fn spawn(self) -> DispatcherHandle {
        let (tx, rx) = mpsc::channel(self.config.command_capacity());
        let shutdown = Arc::new(Notify::new());

        info!(
            channel = %self.config.channel_name,
            platform = self.platform.platform_name(),
            "bridge dispatcher started"
        );

        let task = tokio::spawn(self.run(rx, Arc::clone(&shutdown)));
        DispatcherHandle {
            commands: tx,
            shutdown,
            task,
        }
    }

    async fn run(self, mut commands: mpsc::Receiver<Envelope>, shutdown: Arc<Notify>) {
        loop {
            tokio::select! {
                biased;

                _ = shutdown.notified() => {
                    info!("bridge dispatcher shutting down");
                    break;
                }

                envelope = commands.recv() => {
                    let Some(Envelope { command, reply }) = envelope else {
                        debug!("all dispatcher handles dropped");
                        break;
                    };

                    let this = self.clone();
                    tokio::spawn(async move {
                        let response = this.handle(command).await;
                        if reply.send(response).is_err() {
                            debug!("caller went away before the reply");
                        }
                    });
                }
            }
        }
    }
}

struct Envelope {
    command: BridgeCommand,
    reply: oneshot::Sender<CommandReply>,
}

/// Business-layer handle to a running dispatcher.
pub struct DispatcherHandle {
    commands: mpsc::Sender<Envelope>,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl DispatcherHandle {
    /// Send a command and wait for its reply.
    pub async fn call(&self, command: BridgeCommand) -> Result<CommandReply> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Envelope { command, reply })
            .await
            .map_err(|_| BridgeError::DispatcherClosed)?;
        rx.await.map_err(|_| BridgeError::DispatcherClosed)
    }

    /// Send a command given by its channel method name.
    pub async fn call_method(&self, method: &str) -> Result<CommandReply> {
        self.call(BridgeCommand::from_method(method)).await
    }

    /// Ask the command loop to stop. Later calls fail with
    /// `DispatcherClosed`.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Wait for the command loop to exit.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "bridge dispatcher task ended abnormally");
        }
    }
}
