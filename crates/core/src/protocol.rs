// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages for client-server communication.
//!
//! Every client request carries an `id` that the server echoes in its reply,
//! so a client can pair an acknowledgment with the write it sent:
//! - `add_transaction` is answered by `ack` or `rejected`
//! - `get_categories` is answered by `categories`
//! - `ping` is answered by `pong`

use serde::{Deserialize, Serialize};

use crate::category::CategorySet;
use crate::transaction::TransactionRecord;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Record one transaction on the remote store.
    AddTransaction {
        /// Client-chosen request ID echoed in the reply.
        id: u64,
        record: TransactionRecord,
    },

    /// Request the allowed category lists.
    GetCategories {
        /// Client-chosen request ID echoed in the reply.
        id: u64,
    },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The transaction was durably recorded.
    Ack { id: u64 },

    /// The transaction was refused and will not be recorded.
    Rejected { id: u64, reason: String },

    /// Response to GetCategories.
    Categories { id: u64, categories: CategorySet },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error not tied to a request (e.g. an unparseable message).
    Error {
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates an AddTransaction message.
    pub fn add_transaction(id: u64, record: TransactionRecord) -> Self {
        ClientMessage::AddTransaction { id, record }
    }

    /// Creates a GetCategories message.
    pub fn get_categories(id: u64) -> Self {
        ClientMessage::GetCategories { id }
    }

    /// Creates a Ping message.
    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Returns the request ID.
    pub fn id(&self) -> u64 {
        match self {
            ClientMessage::AddTransaction { id, .. }
            | ClientMessage::GetCategories { id }
            | ClientMessage::Ping { id } => *id,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates an Ack message.
    pub fn ack(id: u64) -> Self {
        ServerMessage::Ack { id }
    }

    /// Creates a Rejected message.
    pub fn rejected(id: u64, reason: impl Into<String>) -> Self {
        ServerMessage::Rejected {
            id,
            reason: reason.into(),
        }
    }

    /// Creates a Categories message.
    pub fn categories(id: u64, categories: CategorySet) -> Self {
        ServerMessage::Categories { id, categories }
    }

    /// Creates a Pong message.
    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    /// Creates an Error message.
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Returns the request ID this message answers, if any.
    pub fn reply_to(&self) -> Option<u64> {
        match self {
            ServerMessage::Ack { id }
            | ServerMessage::Rejected { id, .. }
            | ServerMessage::Categories { id, .. }
            | ServerMessage::Pong { id } => Some(*id),
            ServerMessage::Error { .. } => None,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
