//! HTTP transport
//!
//! A [`Transport`] performs a single GET request and hands back the body.
//! [`fetch`] sits on top of it and decodes the body as XML unless the request
//! asks for the raw bytes. There are no retries: a failed attempt is
//! reported to the caller as is.

mod http;

pub use http::HttpTransport;

use crate::TvdbError;
use crate::xml_tree::{DecodeError, XmlNode};
use std::future::Future;
use thiserror::Error;

/// Errors raised while talking to the service
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a status outside 100..300
    #[error("Status: {status}")]
    Status { status: u16 },

    /// The request could not be sent or the body not be received
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A single GET request against the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Host name or address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Absolute path including the query string
    pub path: String,
    /// Whether to use HTTPS instead of plain HTTP
    pub tls: bool,
    /// Whether the body is decoded as XML (`true`) or returned raw
    pub decode_as_xml: bool,
}

impl Request {
    /// Creates a plain HTTP request whose body is decoded as XML
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
            tls: false,
            decode_as_xml: true,
        }
    }

    /// Requests the body as raw bytes instead of a decoded document
    pub fn raw(mut self) -> Self {
        self.decode_as_xml = false;
        self
    }

    /// Returns the full URL of the request
    pub fn url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }
}

/// A response body, decoded or raw depending on the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Body parsed as XML
    Xml(XmlNode),
    /// Body exactly as received
    Raw(Vec<u8>),
}

impl Payload {
    /// Returns the decoded document
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::NotDecoded` for a raw payload.
    pub fn into_xml(self) -> Result<XmlNode, DecodeError> {
        match self {
            Payload::Xml(tree) => Ok(tree),
            Payload::Raw(_) => Err(DecodeError::NotDecoded),
        }
    }

    /// Returns the body bytes of a raw payload
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::AlreadyDecoded` for a decoded payload.
    pub fn into_raw(self) -> Result<Vec<u8>, DecodeError> {
        match self {
            Payload::Raw(bytes) => Ok(bytes),
            Payload::Xml(_) => Err(DecodeError::AlreadyDecoded),
        }
    }
}

/// Trait for transports that can execute a GET request
///
/// The default implementation is [`HttpTransport`]. Other implementations
/// can stand in for the network, e.g. to serve recorded responses.
pub trait Transport {
    /// Performs the request and returns the complete response body
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Status` for a status outside 100..300 and
    /// `TransportError::Request` if the connection fails.
    fn get(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Performs a request and decodes the body as the request asks
///
/// # Errors
///
/// Transport errors are returned unchanged. A body that should be decoded
/// but is not well-formed UTF-8 XML yields `TvdbError::Decode`.
pub async fn fetch<T: Transport>(transport: &T, request: &Request) -> Result<Payload, TvdbError> {
    let body = transport.get(request).await?;

    if !request.decode_as_xml {
        return Ok(Payload::Raw(body));
    }

    Ok(Payload::Xml(XmlNode::parse_bytes(body)?))
}
