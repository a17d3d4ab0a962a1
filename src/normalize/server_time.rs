use crate::xml_tree::{DecodeError, XmlNode};

/// Extracts the server time (Unix seconds) from the updates document
///
/// # Errors
///
/// Returns `DecodeError::MissingField` if there is no `<Time>` element and
/// `DecodeError::InvalidNumber` if it is not a base-10 integer.
pub fn normalize_server_time(tree: &XmlNode) -> Result<i64, DecodeError> {
    let raw = tree
        .non_empty_field("Time")
        .ok_or(DecodeError::MissingField { field: "Time" })?;

    raw.parse::<i64>().map_err(|_| DecodeError::InvalidNumber {
        field: "Time",
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_time() {
        let tree = XmlNode::parse("<Items><Time>1334162822</Time></Items>").unwrap();
        assert_eq!(normalize_server_time(&tree).unwrap(), 1334162822);
    }

    #[test]
    fn test_missing_time() {
        let tree = XmlNode::parse("<Items></Items>").unwrap();
        assert!(matches!(
            normalize_server_time(&tree),
            Err(DecodeError::MissingField { field: "Time" })
        ));
    }

    #[test]
    fn test_non_numeric_time() {
        let tree = XmlNode::parse("<Items><Time>soon</Time></Items>").unwrap();
        assert!(matches!(
            normalize_server_time(&tree),
            Err(DecodeError::InvalidNumber { field: "Time", .. })
        ));
    }
}
