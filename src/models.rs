//! Records produced by the client
//!
//! All records are built fresh for every call and serialize to JSON with the
//! field names the service documentation uses (camelCase, optional fields
//! omitted when absent).

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A content language supported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Numeric identifier, kept as delivered
    pub id: String,
    /// Name of the language in the language itself (e.g. "Français")
    pub name: String,
    /// Abbreviation to pass to `Client::set_language` (e.g. "fr")
    pub abbreviation: String,
}

/// Kinds of content a mirror can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorType {
    /// XML documents
    Xml,
    /// Banner images
    Banner,
    /// ZIP series archives
    Zip,
}

impl MirrorType {
    /// Typemask bits in the order they are reported
    pub const FLAGS: [(MirrorType, u32); 3] = [
        (MirrorType::Xml, 1),
        (MirrorType::Banner, 2),
        (MirrorType::Zip, 4),
    ];

    /// Decodes a typemask into the advertised content kinds
    ///
    /// The result keeps the fixed order xml, banner, zip.
    ///
    /// # Examples
    ///
    /// ```
    /// use tvdb_xml::MirrorType;
    ///
    /// assert_eq!(MirrorType::from_typemask(5), vec![MirrorType::Xml, MirrorType::Zip]);
    /// assert!(MirrorType::from_typemask(0).is_empty());
    /// ```
    pub fn from_typemask(typemask: u32) -> Vec<MirrorType> {
        Self::FLAGS
            .iter()
            .filter(|(_, mask)| typemask & mask == *mask)
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Returns the label used in the service documentation
    pub const fn as_str(self) -> &'static str {
        match self {
            MirrorType::Xml => "xml",
            MirrorType::Banner => "banner",
            MirrorType::Zip => "zip",
        }
    }
}

impl fmt::Display for MirrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An alternate service endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mirror {
    /// Mirror identifier
    pub id: String,
    /// Base URL of the mirror
    pub url: String,
    /// Content kinds the mirror serves
    pub types: Vec<MirrorType>,
}

impl Mirror {
    /// Whether the mirror serves the given content kind
    pub fn supports(&self, kind: MirrorType) -> bool {
        self.types.contains(&kind)
    }
}

/// Picks the first mirror that serves the given content kind
pub fn select_mirror(mirrors: &[Mirror], kind: MirrorType) -> Option<&Mirror> {
    mirrors.iter().find(|mirror| mirror.supports(kind))
}

/// First air date of a series
///
/// The name search parses the date, the keyword search hands the value
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FirstAired {
    /// Parsed calendar date
    Date(NaiveDate),
    /// Value exactly as delivered, possibly empty
    Raw(String),
}

/// A series as returned by the search endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub id: String,
    pub language: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<FirstAired>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zap2it_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

/// Series details from a full series archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetail {
    pub id: String,
    pub name: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Genres, split from the pipe-delimited list
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

/// A single episode from a full series archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    /// Season number (0 for specials)
    pub season: u32,
    /// Episode number within the season
    pub number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

/// Decoded content of a full series archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesArchive {
    /// The series itself
    pub series: SeriesDetail,
    /// All episodes, ordered by season and episode number
    pub episodes: Vec<Episode>,
}
