use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, trace};

use super::model::{CohortData, PersonRecord};
use crate::error::{Result, RosterError};

/// Fields per line: first, last, house, advisor, cohort.
pub const FIELD_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a roster file.
///
/// Layout, one person per line, no header row:
///
/// ```text
/// Harry|Potter|Gryffindor|McGonagall|Fall 2015
/// Nearly|Headless Nick||Gryffindor|G
/// ```
///
/// The house field may be empty. Only the cohort field is trimmed. Blank
/// lines are skipped; a line with fewer than five fields fails the whole
/// load with [`RosterError::MalformedRecord`].
pub fn load_file(path: &Path) -> Result<CohortData> {
    let bytes = std::fs::read(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_bytes(&bytes)?;
    debug!("loaded {} records from {}", data.len(), path.display());
    Ok(data)
}

/// Parse roster lines from any byte source.
pub fn parse_reader<R: Read>(mut source: R) -> Result<CohortData> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes).map_err(RosterError::Read)?;
    parse_bytes(&bytes)
}

/// Parse an in-memory roster.
pub fn parse_bytes(bytes: &[u8]) -> Result<CohortData> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(bytes);

    let mut people = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let offset = record.position().map_or(0, |p| p.byte());
        let line = line_at(bytes, offset);
        trace!("line {line}: {record:?}");
        people.push(person_from_record(&record, line)?);
    }

    Ok(CohortData::from_records(people))
}

// -- helpers --

/// 1-based line of the record whose scan began at byte `offset`.
///
/// The reader reports where it started scanning, which can sit before the
/// terminators of skipped blank lines or the `\n` of a CRLF pair. Step past
/// those to the record's first byte, then count `\n` up to it.
fn line_at(bytes: &[u8], offset: u64) -> u64 {
    let scan = usize::try_from(offset).map_or(bytes.len(), |o| o.min(bytes.len()));
    let start = bytes[scan..]
        .iter()
        .position(|&b| b != b'\r' && b != b'\n')
        .map_or(bytes.len(), |skip| scan + skip);
    bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}

fn person_from_record(record: &StringRecord, line: u64) -> Result<PersonRecord> {
    if record.len() < FIELD_COUNT {
        return Err(RosterError::MalformedRecord {
            line,
            found: record.len(),
        });
    }
    // Extra trailing fields are ignored.
    Ok(PersonRecord::new(
        &record[0], &record[1], &record[2], &record[3], &record[4],
    ))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_lines_in_file_order() {
        let file = write_fixture(
            "Harry|Potter|Gryffindor|McGonagall|Fall 2015\n\
             Hannah|Abbott|Hufflepuff|Sprout|Winter 2016\n",
        );
        let data = load_file(file.path()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.people[0].full_name, "Harry Potter");
        assert_eq!(data.people[0].advisor, "McGonagall");
        assert_eq!(data.people[1].full_name, "Hannah Abbott");
        assert_eq!(data.people[1].cohort, "Winter 2016");
    }

    #[test]
    fn empty_house_and_trailing_whitespace() {
        let data = parse_reader("Nearly|Headless Nick||Gryffindor|G  \r\n".as_bytes()).unwrap();
        let nick = &data.people[0];
        assert_eq!(nick.full_name, "Nearly Headless Nick");
        assert_eq!(nick.house, "");
        assert!(!nick.has_house());
        assert_eq!(nick.cohort, "G");
    }

    #[test]
    fn apostrophes_and_quotes_are_literal() {
        let data =
            parse_reader("Luna|Lovegood|Dumbledore's Army|\"Flitwick\"|Fall 2015\n".as_bytes())
                .unwrap();
        assert_eq!(data.people[0].house, "Dumbledore's Army");
        assert_eq!(data.people[0].advisor, "\"Flitwick\"");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let data = parse_reader("Ron|Weasley|Gryffindor|McGonagall|Fall 2015|extra\n".as_bytes())
            .unwrap();
        assert_eq!(data.people[0].cohort, "Fall 2015");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let data = parse_reader(
            "Ron|Weasley|Gryffindor|McGonagall|Fall 2015\n\nGinny|Weasley|Gryffindor|McGonagall|Spring 2016\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn short_line_fails_fast_with_line_number() {
        let err = parse_reader(
            "Ron|Weasley|Gryffindor|McGonagall|Fall 2015\nDraco|Malfoy|Slytherin\n".as_bytes(),
        )
        .unwrap_err();
        match err {
            RosterError::MalformedRecord { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn malformed_line(input: &str) -> (u64, usize) {
        match parse_reader(input.as_bytes()).unwrap_err() {
            RosterError::MalformedRecord { line, found } => (line, found),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn line_number_counts_skipped_blank_lines() {
        assert_eq!(malformed_line("a|b|c|d|e\n\nx|y\n"), (3, 2));
        assert_eq!(malformed_line("\n\na|b|c|d|e\n\n\nx|y|z\n"), (6, 3));
    }

    #[test]
    fn line_number_with_crlf_endings() {
        assert_eq!(malformed_line("a|b|c|d|e\r\nx|y\r\n"), (2, 2));
        assert_eq!(malformed_line("a|b|c|d|e\r\n\r\na|b|c|d|e\r\nx\r\n"), (4, 1));
    }

    #[test]
    fn line_number_on_first_line() {
        assert_eq!(malformed_line("x|y|z\na|b|c|d|e\n"), (1, 3));
    }

    /// Serves one good line, then fails.
    struct FailingReader {
        rest: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.rest.is_empty() {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"));
            }
            let n = buf.len().min(self.rest.len());
            buf[..n].copy_from_slice(&self.rest[..n]);
            self.rest = &self.rest[n..];
            Ok(n)
        }
    }

    #[test]
    fn mid_stream_read_failure_is_io_kind() {
        let reader = FailingReader {
            rest: b"Harry|Potter|Gryffindor|McGonagall|Fall 2015\n",
        };
        let err = parse_reader(reader).unwrap_err();
        match err {
            RosterError::Read(source) => assert_eq!(source.to_string(), "device gone"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreadable_path_after_open_carries_path() {
        // A directory opens on Unix but fails on read.
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path()).unwrap_err();
        match &err {
            RosterError::Io { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.txt")).unwrap_err();
        match err {
            RosterError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_yields_no_records() {
        let data = parse_reader("".as_bytes()).unwrap();
        assert!(data.is_empty());
    }
}
