use super::parse_date;
use crate::models::{Episode, SeriesArchive, SeriesDetail};
use crate::xml_tree::{DecodeError, XmlNode};

/// Normalizes the `<language>.xml` document of a full series archive
///
/// # Errors
///
/// Returns `DecodeError::MissingField` if the document has no `<Series>`
/// element. Episodes are optional.
pub fn normalize_series_archive(tree: &XmlNode) -> Result<SeriesArchive, DecodeError> {
    let series = tree
        .children("Series")
        .first()
        .filter(|series| !series.is_empty())
        .ok_or(DecodeError::MissingField { field: "Series" })?;

    let mut episodes: Vec<Episode> = tree
        .children("Episode")
        .into_vec()
        .into_iter()
        .filter(|episode| !episode.is_empty())
        .map(convert_episode)
        .collect();
    episodes.sort_by_key(|episode| (episode.season, episode.number));

    Ok(SeriesArchive {
        series: convert_series(series),
        episodes,
    })
}

fn convert_series(series: &XmlNode) -> SeriesDetail {
    SeriesDetail {
        id: series.field_or_default("id"),
        name: series.field_or_default("SeriesName"),
        language: series.field_or_default("Language"),
        overview: optional(series, "Overview"),
        first_aired: series
            .non_empty_field("FirstAired")
            .and_then(|raw| parse_date("FirstAired", raw)),
        network: optional(series, "Network"),
        status: optional(series, "Status"),
        genres: series
            .field("Genre")
            .map(split_pipe_list)
            .unwrap_or_default(),
        imdb_id: optional(series, "IMDB_ID"),
        banner: optional(series, "banner"),
    }
}

fn convert_episode(episode: &XmlNode) -> Episode {
    Episode {
        id: episode.field_or_default("id"),
        season: number(episode, "SeasonNumber"),
        number: number(episode, "EpisodeNumber"),
        name: optional(episode, "EpisodeName"),
        first_aired: episode
            .non_empty_field("FirstAired")
            .and_then(|raw| parse_date("FirstAired", raw)),
        overview: optional(episode, "Overview"),
    }
}

fn optional(node: &XmlNode, field: &str) -> Option<String> {
    node.non_empty_field(field).map(str::to_string)
}

/// Episode and season numbers, 0 when absent or not a number
fn number(node: &XmlNode, field: &str) -> u32 {
    node.field(field)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

/// Splits lists like `|Drama|Crime|` into their entries
fn split_pipe_list(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
