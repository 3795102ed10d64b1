use std::{
    collections::BTreeMap,
    io::{self, BufRead, BufReader, Read, Write},
};

use crate::config::{SETTINGS_ENCODING, SettingsFormat};

/// Reads `key<sep>value` lines into `entries`.
///
/// Comment lines and lines without a separator are skipped. Keys are trimmed,
/// values are kept verbatim. Later lines win over earlier ones.
pub(super) fn read_entries(
    reader: impl Read,
    format: &SettingsFormat,
    entries: &mut BTreeMap<String, String>,
) -> io::Result<usize> {
    let mut count = 0;

    for line in BufReader::new(reader).lines() {
        let line = line?;
        if !format.comment_marker.is_empty() && line.starts_with(&format.comment_marker) {
            continue;
        }

        let Some((key, value)) = line.split_once(&format.separator) else {
            continue;
        };

        entries.insert(key.trim().to_string(), value.to_string());
        count += 1;
    }

    Ok(count)
}

/// Writes the optional comment header followed by every entry in key order.
pub(super) fn write_entries(
    mut writer: impl Write,
    format: &SettingsFormat,
    comment: Option<&str>,
    entries: &BTreeMap<String, String>,
) -> io::Result<()> {
    let eol = format.line_ending.as_str();
    let marker = &format.comment_marker;

    if let Some(comment) = comment.filter(|c| !c.is_empty()) {
        for line in comment_lines(comment) {
            write!(writer, "{marker} {}{eol}", line.trim())?;
        }
        write!(writer, "{marker} Encoding: {SETTINGS_ENCODING}{eol}")?;
        writer.write_all(eol.as_bytes())?;
    }

    for (key, value) in entries {
        write!(writer, "{key}{}{value}{eol}", format.separator)?;
    }

    writer.flush()
}

/// Splits on CRLF, LF or CR.
fn comment_lines(comment: &str) -> impl Iterator<Item = &str> {
    comment
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\n', '\r']))
}
