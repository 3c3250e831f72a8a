//! Wire message model for the legacy Socket.IO 0.x framing.
//!
//! Every frame on the wire is `"{type}:{id}:{endpoint}"` with an optional
//! `":{data}"` tail. This module owns both directions of that encoding and
//! the constructors for the control frames the session loop emits.

use std::fmt;

use crate::error::ClientError;

/// Protocol message type tag.
///
/// Discriminants are the wire values; the set is closed at protocol
/// version 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Kind {
    Disconnect = 0,
    Connect = 1,
    Heartbeat = 2,
    Message = 3,
    Json = 4,
    Event = 5,
    Ack = 6,
    Error = 7,
    Noop = 8,
}

impl Kind {
    /// Convert the kind into its wire tag.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse a wire tag back into a kind. Returns `None` for tags outside
    /// the protocol's closed set.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Disconnect),
            1 => Some(Self::Connect),
            2 => Some(Self::Heartbeat),
            3 => Some(Self::Message),
            4 => Some(Self::Json),
            5 => Some(Self::Event),
            6 => Some(Self::Ack),
            7 => Some(Self::Error),
            8 => Some(Self::Noop),
            _ => None,
        }
    }
}

/// A logical sub-channel within one physical session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: String,
}

impl Endpoint {
    #[must_use]
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self { path: path.into(), query: query.into() }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// One frame of the wire protocol. Immutable after construction; identity
/// is value equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IoMessage {
    pub kind: Kind,
    /// Ack correlation id. Zero is the protocol's "no ack requested"
    /// sentinel and renders as an empty field.
    pub id: u64,
    /// Target sub-channel; `None` addresses the session root.
    pub endpoint: Option<Endpoint>,
    /// Opaque payload. Empty means the frame carries no data segment.
    pub data: String,
}

impl IoMessage {
    /// A disconnect frame: `"0::"`.
    #[must_use]
    pub fn disconnect() -> Self {
        Self { kind: Kind::Disconnect, id: 0, endpoint: None, data: String::new() }
    }

    /// A connect frame joining `path` (with optional query): `"1::/path"`.
    #[must_use]
    pub fn connect(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            kind: Kind::Connect,
            id: 0,
            endpoint: Some(Endpoint::new(path, query)),
            data: String::new(),
        }
    }

    /// A heartbeat frame: `"2::"`.
    #[must_use]
    pub fn heartbeat() -> Self {
        Self { kind: Kind::Heartbeat, id: 0, endpoint: None, data: String::new() }
    }

    /// A data-bearing message frame addressed to `path`.
    #[must_use]
    pub fn message(
        path: impl Into<String>,
        query: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            kind: Kind::Message,
            id: 0,
            endpoint: Some(Endpoint::new(path, query)),
            data: data.into(),
        }
    }

    /// Encode the message into its wire string.
    ///
    /// Always emits `type:id:endpoint`; the `:data` tail is appended only
    /// when data is non-empty (the colon is omitted with it).
    #[must_use]
    pub fn encode(&self) -> String {
        let id = if self.id == 0 { String::new() } else { self.id.to_string() };
        let endpoint = self.endpoint.as_ref().map(ToString::to_string).unwrap_or_default();

        let mut raw = format!("{}:{}:{}", self.kind.as_u8(), id, endpoint);
        if !self.data.is_empty() {
            raw.push(':');
            raw.push_str(&self.data);
        }
        raw
    }

    /// Decode one inbound frame.
    ///
    /// Anything before the first ASCII digit or `{` is transport-level
    /// lead-in and is stripped before parsing. Do not widen this: the
    /// tolerated artifacts are whatever the upstream transport prepends,
    /// nothing more.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedFrame`] for wrong field counts,
    /// non-numeric type or id fields, or type tags outside the protocol
    /// set. There is no frame-resync mechanism, so callers must treat this
    /// as fatal to the receive path.
    pub fn decode(raw: &str) -> Result<Self, ClientError> {
        let malformed = || ClientError::MalformedFrame(raw.to_owned());

        let body = raw.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '{');

        let mut fields = body.splitn(4, ':');
        let kind = fields
            .next()
            .and_then(|f| f.parse::<u8>().ok())
            .and_then(Kind::from_u8)
            .ok_or_else(malformed)?;

        let id = match fields.next().ok_or_else(malformed)? {
            "" => 0,
            field => field.parse::<u64>().map_err(|_| malformed())?,
        };

        let endpoint = match fields.next().ok_or_else(malformed)? {
            "" => None,
            field => {
                let (path, query) = field.split_once('?').unwrap_or((field, ""));
                Some(Endpoint::new(path, query))
            }
        };

        let data = fields.next().unwrap_or_default().to_owned();

        Ok(Self { kind, id, endpoint, data })
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
