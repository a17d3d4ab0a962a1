//! tvdb-xml - Client for the TheTVDB XML interface
//!
//! This library looks up TV series metadata: content languages, mirrors,
//! the server time, series searches and full series archives. Every response
//! is turned into plain records that serialize to JSON.
//!
//! # Examples
//!
//! ```no_run
//! use tvdb_xml::{Client, ClientConfig, MirrorType, select_mirror};
//!
//! # async fn example() -> Result<(), tvdb_xml::TvdbError> {
//! let client = Client::new(ClientConfig::new("YOUR_API_KEY"))?;
//!
//! let mirrors = client.get_mirrors().await?;
//! let mirror = select_mirror(&mirrors, MirrorType::Zip).map(|m| m.url.as_str());
//!
//! let info = client
//!     .get_series_info(mirror.unwrap_or("http://thetvdb.com"), "79349", None)
//!     .await?;
//! println!("{} has {} episodes", info.series.name, info.episodes.len());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod config;
pub mod models;
pub mod normalize;
pub mod paths;
pub mod transport;
pub mod xml_tree;

mod client;

pub use client::Client;
pub use config::ClientConfig;
pub use models::{
    Episode, FirstAired, Language, Mirror, MirrorType, SeriesArchive, SeriesDetail, SeriesSummary,
    select_mirror,
};
pub use transport::{HttpTransport, Request, Transport};

// Re-export error types
pub use archive::ArchiveError;
pub use config::ConfigError;
pub use transport::TransportError;
pub use xml_tree::DecodeError;

use thiserror::Error;

/// Top-level error type for client operations
///
/// Errors of the underlying layers are wrapped without alteration, so a
/// failed request can be told apart from an undecodable response.
#[derive(Debug, Error)]
pub enum TvdbError {
    /// The configuration is incomplete
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// An argument was rejected before any request was made
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request failed or the service answered with an error status
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The series archive could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),
}
