// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Messages exchanged with the business layer: outward events, inbound
// commands and their replies, plus their JSON channel encoding.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::Result;
use crate::types::{NetworkQueryResult, NotificationEvent, PushToken};

/// Everything the bridge publishes on its outward event channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BridgeEvent {
    /// The current push token changed. `None` means de-registered.
    TokenChanged { token: Option<PushToken> },
    /// A notification was delivered or tapped.
    Notification(NotificationEvent),
}

impl BridgeEvent {
    /// Encode for the business-layer channel.
    pub fn to_message(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Request from the business layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    QueryNetwork,
    GetCurrentToken,
    /// A method name outside the command set. Answered with
    /// [`CommandReply::NotImplemented`], never dropped.
    Unrecognized(String),
}

impl BridgeCommand {
    /// Map a channel method name to a command.
    pub fn from_method(method: &str) -> Self {
        match method {
            "getWifiNetworks" | "queryCurrentNetwork" => Self::QueryNetwork,
            "getToken" | "getCurrentToken" => Self::GetCurrentToken,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn method_name(&self) -> &str {
        match self {
            Self::QueryNetwork => "queryCurrentNetwork",
            Self::GetCurrentToken => "getCurrentToken",
            Self::Unrecognized(method) => method,
        }
    }
}

/// Exactly one of these is produced for every [`BridgeCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    Networks(NetworkQueryResult),
    Token(Option<PushToken>),
    NotImplemented { method: String },
}

impl CommandReply {
    /// Encode for the business-layer channel.
    pub fn to_message(&self) -> Value {
        match self {
            Self::Networks(result) => json!(result.ssids()),
            Self::Token(token) => json!(token.as_ref().map(PushToken::as_str)),
            Self::NotImplemented { method } => json!({
                "error": "notImplemented",
                "method": method,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeliveryContext, Payload};

    #[test]
    fn method_names_route_to_commands() {
        assert_eq!(BridgeCommand::from_method("getWifiNetworks"), BridgeCommand::QueryNetwork);
        assert_eq!(BridgeCommand::from_method("getCurrentToken"), BridgeCommand::GetCurrentToken);
        assert_eq!(
            BridgeCommand::from_method("openSettings"),
            BridgeCommand::Unrecognized("openSettings".into())
        );
    }

    #[test]
    fn token_changed_encodes_null_for_deregistration() {
        let msg = BridgeEvent::TokenChanged { token: None }.to_message().unwrap();
        assert_eq!(msg, json!({ "event": "tokenChanged", "token": null }));

        let msg = BridgeEvent::TokenChanged { token: PushToken::new("T1") }
            .to_message()
            .unwrap();
        assert_eq!(msg, json!({ "event": "tokenChanged", "token": "T1" }));
    }

    #[test]
    fn notification_encodes_context_and_payload() {
        let mut payload = Payload::new();
        payload.insert("title".into(), json!("Door open"));
        let event = NotificationEvent::new(payload, DeliveryContext::TapActivated);

        let msg = BridgeEvent::Notification(event).to_message().unwrap();
        assert_eq!(msg["event"], "notification");
        assert_eq!(msg["context"], "tapActivated");
        assert_eq!(msg["payload"]["title"], "Door open");
        assert!(msg["receivedAt"].is_string());
    }

    #[test]
    fn replies_encode_as_plain_values() {
        let networks = CommandReply::Networks(vec!["HomeNet".to_string()].into());
        assert_eq!(networks.to_message(), json!(["HomeNet"]));
        assert_eq!(CommandReply::Token(None).to_message(), Value::Null);

        let missing = CommandReply::NotImplemented { method: "reboot".into() };
        assert_eq!(missing.to_message()["error"], "notImplemented");
    }
}
