//! The core consumes an EXIF reader only through the [`ExifReader`] trait
//! so callers and tests can substitute their own. [`DefaultExifReader`] is
//! the production implementation, reading just the capture-time field
//! the similarity pipeline needs: DateTimeOriginal, then
//! DateTimeDigitized, then Image DateTime — first successful parse
//! wins.

use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a capture timestamp from an image file's metadata.
///
/// Any failure (missing file, no EXIF block, unparseable field) is a
/// soft failure: implementations return `None`, never an error.
pub trait ExifReader: Send + Sync {
    fn read_time(&self, path: &Path) -> Option<NaiveDateTime>;
}

/// EXIF date format used by all three consulted tags.
const EXIF_DATETIME_FMT: &str = "%Y:%m:%d %H:%M:%S";

/// Production EXIF reader backed by `kamadak-exif`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultExifReader;

impl ExifReader for DefaultExifReader {
    fn read_time(&self, path: &Path) -> Option<NaiveDateTime> {
        let file = File::open(path).ok()?;
        let mut bufreader = BufReader::new(&file);
        let exif = Reader::new().read_from_container(&mut bufreader).ok()?;

        for tag in [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime] {
            if let Some(field) = exif.get_field(tag, In::PRIMARY) {
                if let Value::Ascii(ref values) = field.value {
                    if let Some(bytes) = values.first() {
                        if let Ok(s) = std::str::from_utf8(bytes) {
                            let s = s.trim_end_matches('\0').trim();
                            if let Ok(dt) = NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FMT) {
                                return Some(dt);
                            }
                        }
                    }
                }
            }
        }
        None
    }
}
