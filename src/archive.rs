//! Series archive extraction
//!
//! Full series data is delivered as a ZIP archive holding one XML document
//! per language plus banner and actor lists. This module pulls single
//! members out of such an archive held in memory.

use std::io::{Cursor, Read};
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

/// Errors that can occur while reading a series archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The data does not start with a ZIP signature
    #[error("Data is not a ZIP archive")]
    NotAnArchive,

    /// The ZIP container is damaged or uses an unsupported feature
    #[error("Failed to read archive: {0}")]
    Unreadable(#[from] ZipError),

    /// The requested member is not part of the archive
    #[error("File '{member}' not found in archive")]
    MemberNotFound { member: String },

    /// The member exists but could not be decompressed
    #[error("Failed to read '{member}' from archive: {source}")]
    ReadFailed {
        member: String,
        source: std::io::Error,
    },

    /// The member was requested as text but is not UTF-8
    #[error("File '{member}' is not valid UTF-8")]
    NotText { member: String },
}

/// Extracts one member of a ZIP archive
///
/// # Arguments
///
/// * `archive` - The complete archive bytes
/// * `member` - Name of the file inside the archive (e.g. "en.xml")
///
/// # Returns
///
/// The decompressed content of the member
///
/// # Errors
///
/// Returns `ArchiveError::MemberNotFound` if the archive has no such member,
/// or another `ArchiveError` if the data is not a readable ZIP archive.
pub fn extract(archive: &[u8], member: &str) -> Result<Vec<u8>, ArchiveError> {
    let mut zip = open(archive)?;

    let mut file = match zip.by_name(member) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(ArchiveError::MemberNotFound {
                member: member.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    // The declared size comes from the archive itself and is not trusted
    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .map_err(|e| ArchiveError::ReadFailed {
            member: member.to_string(),
            source: e,
        })?;

    tracing::debug!(member, bytes = content.len(), "Extracted archive member");
    Ok(content)
}

/// Extracts one member of a ZIP archive as UTF-8 text
///
/// # Errors
///
/// Same as [`extract`], plus `ArchiveError::NotText` for non-UTF-8 content.
pub fn extract_text(archive: &[u8], member: &str) -> Result<String, ArchiveError> {
    let content = extract(archive, member)?;
    String::from_utf8(content).map_err(|_| ArchiveError::NotText {
        member: member.to_string(),
    })
}

/// Lists the member names of a ZIP archive in archive order
pub fn list_members(archive: &[u8]) -> Result<Vec<String>, ArchiveError> {
    let mut zip = open(archive)?;

    let mut members = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let file = zip.by_index(index)?;
        members.push(file.name().to_string());
    }

    Ok(members)
}

fn open(archive: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, ArchiveError> {
    if !infer::archive::is_zip(archive) {
        return Err(ArchiveError::NotAnArchive);
    }

    Ok(ZipArchive::new(Cursor::new(archive))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn build_archive(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_member() {
        let archive = build_archive(&[
            ("en.xml", b"<Data><Series/></Data>".as_slice()),
            ("banners.xml", b"<Banners/>".as_slice()),
        ]);

        assert_eq!(extract(&archive, "banners.xml").unwrap(), b"<Banners/>");
        assert_eq!(
            extract_text(&archive, "en.xml").unwrap(),
            "<Data><Series/></Data>"
        );
    }

    #[test]
    fn test_missing_member() {
        let archive = build_archive(&[("en.xml", b"<Data/>".as_slice())]);

        match extract(&archive, "de.xml") {
            Err(ArchiveError::MemberNotFound { member }) => assert_eq!(member, "de.xml"),
            other => panic!("expected a missing member, got {other:?}"),
        }
    }

    #[test]
    fn test_not_an_archive() {
        assert!(matches!(
            extract(b"<Data/>", "en.xml"),
            Err(ArchiveError::NotAnArchive)
        ));
        assert!(matches!(extract(&[], "en.xml"), Err(ArchiveError::NotAnArchive)));
    }

    #[test]
    fn test_binary_member_as_text() {
        let archive = build_archive(&[("banner.jpg", [0xffu8, 0xd8, 0xff, 0xe0].as_slice())]);
        assert!(matches!(
            extract_text(&archive, "banner.jpg"),
            Err(ArchiveError::NotText { .. })
        ));
    }

    /// Stored single-member archive whose ZIP64 extra field claims an
    /// uncompressed size of `declared_size`
    fn build_zip64_archive(name: &str, content: &[u8], crc: u32, declared_size: u64) -> Vec<u8> {
        let mut extra = Vec::new();
        extra.extend_from_slice(&0x0001u16.to_le_bytes());
        extra.extend_from_slice(&8u16.to_le_bytes());
        extra.extend_from_slice(&declared_size.to_le_bytes());

        let mut zip = Vec::new();
        zip.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        zip.extend_from_slice(&45u16.to_le_bytes()); // version needed
        zip.extend_from_slice(&0u16.to_le_bytes()); // flags
        zip.extend_from_slice(&0u16.to_le_bytes()); // stored
        zip.extend_from_slice(&0u16.to_le_bytes()); // time
        zip.extend_from_slice(&0x21u16.to_le_bytes()); // 1980-01-01
        zip.extend_from_slice(&crc.to_le_bytes());
        zip.extend_from_slice(&(content.len() as u32).to_le_bytes());
        zip.extend_from_slice(&u32::MAX.to_le_bytes());
        zip.extend_from_slice(&(name.len() as u16).to_le_bytes());
        zip.extend_from_slice(&(extra.len() as u16).to_le_bytes());
        zip.extend_from_slice(name.as_bytes());
        zip.extend_from_slice(&extra);
        zip.extend_from_slice(content);

        let central_start = zip.len() as u32;
        zip.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        zip.extend_from_slice(&45u16.to_le_bytes()); // version made by
        zip.extend_from_slice(&45u16.to_le_bytes()); // version needed
        zip.extend_from_slice(&0u16.to_le_bytes());
        zip.extend_from_slice(&0u16.to_le_bytes());
        zip.extend_from_slice(&0u16.to_le_bytes());
        zip.extend_from_slice(&0x21u16.to_le_bytes());
        zip.extend_from_slice(&crc.to_le_bytes());
        zip.extend_from_slice(&(content.len() as u32).to_le_bytes());
        zip.extend_from_slice(&u32::MAX.to_le_bytes());
        zip.extend_from_slice(&(name.len() as u16).to_le_bytes());
        zip.extend_from_slice(&(extra.len() as u16).to_le_bytes());
        zip.extend_from_slice(&0u16.to_le_bytes()); // comment
        zip.extend_from_slice(&0u16.to_le_bytes()); // disk
        zip.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
        zip.extend_from_slice(&0u32.to_le_bytes()); // external attributes
        zip.extend_from_slice(&0u32.to_le_bytes()); // local header offset
        zip.extend_from_slice(name.as_bytes());
        zip.extend_from_slice(&extra);
        let central_size = zip.len() as u32 - central_start;

        zip.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
        zip.extend_from_slice(&0u16.to_le_bytes());
        zip.extend_from_slice(&0u16.to_le_bytes());
        zip.extend_from_slice(&1u16.to_le_bytes());
        zip.extend_from_slice(&1u16.to_le_bytes());
        zip.extend_from_slice(&central_size.to_le_bytes());
        zip.extend_from_slice(&central_start.to_le_bytes());
        zip.extend_from_slice(&0u16.to_le_bytes());
        zip
    }

    #[test]
    fn test_zip64_member_with_matching_size() {
        let archive = build_zip64_archive("en.xml", b"<Data/>", 0xbc01_b5c5, 7);
        assert_eq!(extract(&archive, "en.xml").unwrap(), b"<Data/>");
    }

    #[test]
    fn test_huge_declared_size_is_not_preallocated() {
        let archive = build_zip64_archive("en.xml", b"<Data/>", 0xbc01_b5c5, u64::MAX - 8);

        match extract(&archive, "en.xml") {
            Ok(content) => assert_eq!(content, b"<Data/>"),
            Err(e) => assert!(
                matches!(e, ArchiveError::ReadFailed { .. } | ArchiveError::Unreadable(_)),
                "unexpected error: {e:?}"
            ),
        }
    }

    #[test]
    fn test_list_members() {
        let archive = build_archive(&[
            ("en.xml", b"<Data/>".as_slice()),
            ("actors.xml", b"<Actors/>".as_slice()),
        ]);
        assert_eq!(list_members(&archive).unwrap(), vec!["en.xml", "actors.xml"]);
    }
}
