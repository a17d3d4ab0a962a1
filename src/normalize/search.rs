//! Normalizers for the two series search endpoints
//!
//! Both produce [`SeriesSummary`] records but with different contracts:
//! the name search only includes optional fields that carry a value and
//! parses the air date, the keyword search always includes them and keeps
//! the air date as delivered.

use super::parse_date;
use crate::models::{FirstAired, SeriesSummary};
use crate::xml_tree::XmlNode;

/// Optional attributes shared by both searches: (source element, setter)
const OPTIONAL_FIELDS: [(&str, fn(&mut SeriesSummary, String)); 4] = [
    ("IMDB_ID", |s, v| s.imdb_id = Some(v)),
    ("zap2it_id", |s, v| s.zap2it_id = Some(v)),
    ("banner", |s, v| s.banner = Some(v)),
    ("Overview", |s, v| s.overview = Some(v)),
];

/// Normalizes the result of a series search by name
///
/// An empty document means "nothing found" and yields an empty list.
/// Optional fields are only present when the source element is non-empty;
/// `FirstAired` is parsed into a date.
pub fn normalize_tv_show_search(tree: &XmlNode) -> Vec<SeriesSummary> {
    tree.children("Series")
        .into_vec()
        .into_iter()
        .map(|series| {
            let mut summary = SeriesSummary {
                id: series.field_or_default("id"),
                language: series.field_or_default("language"),
                name: series.field_or_default("SeriesName"),
                first_aired: series
                    .non_empty_field("FirstAired")
                    .and_then(|raw| parse_date("FirstAired", raw))
                    .map(FirstAired::Date),
                imdb_id: None,
                zap2it_id: None,
                banner: None,
                overview: None,
            };

            for (source, set) in OPTIONAL_FIELDS {
                if let Some(value) = series.non_empty_field(source) {
                    set(&mut summary, value.to_string());
                }
            }

            summary
        })
        .collect()
}

/// Normalizes the result of a series search by keywords
///
/// Empty `<Series>` entries are skipped. The identifier comes from
/// `seriesid`, and every optional field is included, as an empty string when
/// the source lacks it. `FirstAired` is kept verbatim.
pub fn normalize_series_by_name(tree: &XmlNode) -> Vec<SeriesSummary> {
    tree.children("Series")
        .into_vec()
        .into_iter()
        .filter(|series| !series.is_empty())
        .map(|series| {
            let mut summary = SeriesSummary {
                id: series.field_or_default("seriesid"),
                language: series.field_or_default("language"),
                name: series.field_or_default("SeriesName"),
                first_aired: Some(FirstAired::Raw(series.field_or_default("FirstAired"))),
                imdb_id: None,
                zap2it_id: None,
                banner: None,
                overview: None,
            };

            for (source, set) in OPTIONAL_FIELDS {
                set(&mut summary, series.field_or_default(source));
            }

            summary
        })
        .collect()
}
