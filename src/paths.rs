//! Request path templates
//!
//! Every endpoint of the XML interface is a fixed path template with
//! `#{name}` placeholders. Placeholders are filled from explicit parameters
//! first, then from the API key and language of the configuration.
//!
//! Values are percent-encoded with only the RFC 3986 unreserved characters
//! (`A-Z a-z 0-9 - _ . ~`) left literal. This is stricter than Node's
//! `querystring.escape`, which also keeps `! ' ( ) *`: `Grey's Anatomy`
//! becomes `Grey%27s%20Anatomy`. The service decodes both forms alike.

use crate::config::{ClientConfig, ConfigError};
use std::fmt;

/// Endpoints of the XML interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Mirror list
    Mirrors,
    /// Supported content languages
    Languages,
    /// Current server time
    ServerTime,
    /// Series search by name in the configured language
    FindTvShow,
    /// Full series archive (ZIP)
    GetInfo,
    /// Series search by keywords
    SeriesByName,
}

impl Endpoint {
    /// Returns the path template of this endpoint
    pub const fn template(self) -> &'static str {
        match self {
            Endpoint::Mirrors => "/api/#{apiKey}/mirrors.xml",
            Endpoint::Languages => "/api/#{apiKey}/languages.xml",
            Endpoint::ServerTime => "/api/Updates.php?type=none",
            Endpoint::FindTvShow => "/api/GetSeries.php?seriesname=#{name}&language=#{language}",
            Endpoint::GetInfo => "/api/#{apiKey}/series/#{seriesId}/all/#{language}.zip",
            Endpoint::SeriesByName => "/api/GetSeries.php?seriesname=#{keywords}",
        }
    }

    /// Returns the name the endpoint is known by
    pub const fn name(self) -> &'static str {
        match self {
            Endpoint::Mirrors => "mirrors",
            Endpoint::Languages => "languages",
            Endpoint::ServerTime => "serverTime",
            Endpoint::FindTvShow => "findTvShow",
            Endpoint::GetInfo => "getInfo",
            Endpoint::SeriesByName => "seriesByName",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves the path of an endpoint
///
/// Each `#{name}` placeholder is replaced by the percent-encoded value of
/// `name`. Values are looked up in `params` first; `apiKey` and `language`
/// fall back to the configuration.
///
/// # Arguments
///
/// * `endpoint` - The endpoint whose template is resolved
/// * `config` - Configuration supplying the implicit `apiKey` and `language`
/// * `params` - Explicit placeholder values, overriding the implicit ones
///
/// # Errors
///
/// Returns `ConfigError::UnresolvedPlaceholder` if a placeholder has no value.
///
/// # Examples
///
/// ```
/// use tvdb_xml::ClientConfig;
/// use tvdb_xml::paths::{resolve, Endpoint};
///
/// let config = ClientConfig::new("1234abc");
/// let path = resolve(Endpoint::FindTvShow, &config, &[("name", "The Wire")]).unwrap();
/// assert_eq!(path, "/api/GetSeries.php?seriesname=The%20Wire&language=en");
/// ```
pub fn resolve(
    endpoint: Endpoint,
    config: &ClientConfig,
    params: &[(&str, &str)],
) -> Result<String, ConfigError> {
    let template = endpoint.template();
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("#{") {
        let Some(length) = rest[start..].find('}') else {
            break;
        };

        let placeholder = &rest[start + 2..start + length];
        let value = lookup(placeholder, config, params).ok_or_else(|| {
            ConfigError::UnresolvedPlaceholder {
                endpoint,
                placeholder: placeholder.to_string(),
            }
        })?;

        path.push_str(&rest[..start]);
        path.push_str(&urlencoding::encode(value));
        rest = &rest[start + length + 1..];
    }

    path.push_str(rest);
    Ok(path)
}

/// Finds the value of a placeholder
fn lookup<'a>(
    placeholder: &str,
    config: &'a ClientConfig,
    params: &'a [(&'a str, &'a str)],
) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| *name == placeholder)
        .map(|(_, value)| *value)
        .or(match placeholder {
            "apiKey" => Some(config.api_key.as_str()),
            "language" => Some(config.language.as_str()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("1234abc")
    }

    #[test]
    fn test_paths_with_api_key() {
        assert_eq!(
            resolve(Endpoint::Mirrors, &config(), &[]).unwrap(),
            "/api/1234abc/mirrors.xml"
        );
        assert_eq!(
            resolve(Endpoint::Languages, &config(), &[]).unwrap(),
            "/api/1234abc/languages.xml"
        );
    }

    #[test]
    fn test_path_without_placeholders() {
        assert_eq!(
            resolve(Endpoint::ServerTime, &config(), &[]).unwrap(),
            "/api/Updates.php?type=none"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let path = resolve(Endpoint::FindTvShow, &config(), &[("name", "Law & Order/SVU")]).unwrap();
        assert_eq!(
            path,
            "/api/GetSeries.php?seriesname=Law%20%26%20Order%2FSVU&language=en"
        );
    }

    #[test]
    fn test_sub_delimiters_are_encoded() {
        let params = [("name", "Grey's Anatomy (!*)")];
        let path = resolve(Endpoint::FindTvShow, &config(), &params).unwrap();
        assert_eq!(
            path,
            "/api/GetSeries.php?seriesname=Grey%27s%20Anatomy%20%28%21%2A%29&language=en"
        );
    }

    #[test]
    fn test_explicit_params_override_configuration() {
        let path = resolve(
            Endpoint::GetInfo,
            &config(),
            &[("seriesId", "79349"), ("language", "de")],
        )
        .unwrap();
        assert_eq!(path, "/api/1234abc/series/79349/all/de.zip");
    }

    #[test]
    fn test_configured_language_is_used() {
        let config = ClientConfig {
            language: "fr".to_string(),
            ..config()
        };
        let path = resolve(Endpoint::GetInfo, &config, &[("seriesId", "79349")]).unwrap();
        assert_eq!(path, "/api/1234abc/series/79349/all/fr.zip");
    }

    #[test]
    fn test_missing_value_does_not_leak_placeholder() {
        let result = resolve(Endpoint::GetInfo, &config(), &[]);
        match result {
            Err(ConfigError::UnresolvedPlaceholder {
                endpoint,
                placeholder,
            }) => {
                assert_eq!(endpoint, Endpoint::GetInfo);
                assert_eq!(placeholder, "seriesId");
            }
            other => panic!("expected an unresolved placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_names() {
        assert_eq!(Endpoint::FindTvShow.to_string(), "findTvShow");
        assert_eq!(Endpoint::SeriesByName.name(), "seriesByName");
    }
}
