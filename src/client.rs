//! Client for the XML interface
//!
//! Every operation is one round trip: resolve the path, fetch, normalize.
//! Errors from any step are handed to the caller untouched.

use crate::TvdbError;
use crate::archive;
use crate::config::ClientConfig;
use crate::models::{Language, Mirror, SeriesArchive, SeriesSummary};
use crate::normalize::{
    normalize_languages, normalize_mirrors, normalize_series_archive, normalize_series_by_name,
    normalize_server_time, normalize_tv_show_search,
};
use crate::paths::{Endpoint, resolve};
use crate::transport::{HttpTransport, Request, Transport, fetch};
use crate::xml_tree::XmlNode;

/// Client for the TheTVDB XML interface
///
/// # Examples
///
/// ```no_run
/// use tvdb_xml::{Client, ClientConfig};
///
/// # async fn example() -> Result<(), tvdb_xml::TvdbError> {
/// let mut client = Client::new(ClientConfig::new("YOUR_API_KEY"))?;
/// client.set_language("de");
///
/// for series in client.find_tv_show("Dexter").await? {
///     println!("{} ({})", series.name, series.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client talking HTTP to the configured host
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::Configuration` if the API key is missing and
    /// `TvdbError::Transport` if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, TvdbError> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client using the given transport
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::Configuration` if the API key is missing.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, TvdbError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Returns the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sets the language used by subsequent requests
    ///
    /// # Arguments
    ///
    /// * `abbreviation` - Language abbreviation as returned by
    ///   [`Client::get_languages`], e.g. "fr"
    pub fn set_language(&mut self, abbreviation: impl Into<String>) {
        self.config.language = abbreviation.into();
    }

    /// Fetches the list of content languages
    pub async fn get_languages(&self) -> Result<Vec<Language>, TvdbError> {
        let tree = self.fetch_xml(Endpoint::Languages, &[]).await?;
        Ok(normalize_languages(&tree))
    }

    /// Fetches the list of mirrors
    pub async fn get_mirrors(&self) -> Result<Vec<Mirror>, TvdbError> {
        let tree = self.fetch_xml(Endpoint::Mirrors, &[]).await?;
        Ok(normalize_mirrors(&tree))
    }

    /// Fetches the current server time as Unix seconds
    pub async fn get_server_time(&self) -> Result<i64, TvdbError> {
        let tree = self.fetch_xml(Endpoint::ServerTime, &[]).await?;
        Ok(normalize_server_time(&tree)?)
    }

    /// Searches series by name in the configured language
    ///
    /// No match is not an error; the result is simply empty.
    pub async fn find_tv_show(&self, name: &str) -> Result<Vec<SeriesSummary>, TvdbError> {
        let tree = self.fetch_xml(Endpoint::FindTvShow, &[("name", name)]).await?;
        Ok(normalize_tv_show_search(&tree))
    }

    /// Searches series by keywords
    ///
    /// The keywords are joined with spaces. Unlike [`Client::find_tv_show`],
    /// every optional field of the results is present (possibly empty) and
    /// the air date is not parsed.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::InvalidArgument` without touching the network if
    /// no non-blank keyword is given.
    pub async fn get_series_by_name<S>(&self, keywords: &[S]) -> Result<Vec<SeriesSummary>, TvdbError>
    where
        S: AsRef<str>,
    {
        let keywords = join_keywords(keywords)?;
        let tree = self
            .fetch_xml(Endpoint::SeriesByName, &[("keywords", keywords.as_str())])
            .await?;
        Ok(normalize_series_by_name(&tree))
    }

    /// Downloads the full series archive (ZIP) from a mirror
    ///
    /// # Arguments
    ///
    /// * `mirror_url` - Base URL of a mirror serving zip files. If it is not
    ///   an http(s) URL the configured host is used instead. Only scheme,
    ///   host, port and path are used; a query string or fragment on the
    ///   mirror URL is dropped.
    /// * `series_id` - Identifier of the series
    /// * `language` - Language of the archive; defaults to the client language
    ///
    /// # Returns
    ///
    /// The archive bytes, to be read with [`crate::archive::extract`]
    pub async fn get_full_series_archive(
        &self,
        mirror_url: &str,
        series_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<u8>, TvdbError> {
        let mut params = vec![("seriesId", series_id)];
        if let Some(language) = language {
            params.push(("language", language));
        }

        let path = resolve(Endpoint::GetInfo, &self.config, &params)?;
        let request = self.mirror_request(mirror_url, path).raw();

        Ok(fetch(&self.transport, &request).await?.into_raw()?)
    }

    /// Downloads a full series archive and decodes its series document
    ///
    /// Reads the `<language>.xml` member of the archive, holding the series
    /// details and all episodes.
    pub async fn get_series_info(
        &self,
        mirror_url: &str,
        series_id: &str,
        language: Option<&str>,
    ) -> Result<SeriesArchive, TvdbError> {
        let bytes = self
            .get_full_series_archive(mirror_url, series_id, language)
            .await?;

        let member = format!("{}.xml", language.unwrap_or(&self.config.language));
        let document = archive::extract_text(&bytes, &member)?;
        let tree = XmlNode::parse(&document)?;

        Ok(normalize_series_archive(&tree)?)
    }

    async fn fetch_xml(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<XmlNode, TvdbError> {
        let path = resolve(endpoint, &self.config, params)?;
        tracing::debug!(%endpoint, path = %path, "Fetching document");

        let request = Request::new(&self.config.host, self.config.port, path);
        Ok(fetch(&self.transport, &request).await?.into_xml()?)
    }

    /// Builds a request against a mirror, falling back to the configured host
    fn mirror_request(&self, mirror_url: &str, path: String) -> Request {
        let mirror = reqwest::Url::parse(mirror_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"));

        let Some(url) = mirror else {
            tracing::debug!(mirror_url, "Not an http(s) mirror, using configured host");
            return Request::new(&self.config.host, self.config.port, path);
        };

        let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
            return Request::new(&self.config.host, self.config.port, path);
        };

        let prefix = url.path().trim_end_matches('/');
        Request {
            tls: url.scheme() == "https",
            ..Request::new(host, port, format!("{prefix}{path}"))
        }
    }
}

/// Joins search keywords, rejecting lists without any usable keyword
fn join_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<String, TvdbError> {
    let words: Vec<&str> = keywords
        .iter()
        .map(|keyword| keyword.as_ref().trim())
        .filter(|keyword| !keyword.is_empty())
        .collect();

    if words.is_empty() {
        return Err(TvdbError::InvalidArgument(
            "keywords must contain at least one non-empty keyword".to_string(),
        ));
    }

    Ok(words.join(" "))
}
