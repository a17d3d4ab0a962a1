//! Response normalization
//!
//! One pure function per endpoint, turning a decoded [`XmlNode`] tree into
//! the records of [`crate::models`]. All of them accept the shapes the
//! service produces for zero, one or many results and never fail on an
//! absent optional element.
//!
//! [`XmlNode`]: crate::xml_tree::XmlNode

mod languages;
mod mirrors;
mod search;
mod series_archive;
mod server_time;

pub use languages::normalize_languages;
pub use mirrors::normalize_mirrors;
pub use search::{normalize_series_by_name, normalize_tv_show_search};
pub use series_archive::normalize_series_archive;
pub use server_time::normalize_server_time;

use chrono::NaiveDate;

/// Date format used throughout the XML interface
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a service date, dropping values that are not a valid date
fn parse_date(field: &str, value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(field, value, error = %e, "Dropping unparsable date");
            None
        }
    }
}
