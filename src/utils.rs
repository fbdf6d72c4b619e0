use crate::models::VocabEntry;
use anyhow::{anyhow, Result};
use chrono::TimeDelta;
use csv::{Reader, Writer};
use std::collections::HashMap;
use std::io;
use std::io::{BufRead, Write};
use std::path::Path;

/// Reads one line without its line ending. Fails on end of input.
pub fn read_line<R: BufRead>(mut stdin: R) -> Result<String> {
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Err(anyhow!("Unexpected end of input. Aborting."));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

pub fn clear<W: Write>(lock: &mut W) -> io::Result<()> {
    write!(lock, "{esc}[2J{esc}[1;1H", esc = 27 as char)
}

pub fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Coarse human-readable interval: minutes below an hour, hours below a day, days otherwise.
pub fn format_interval(interval: TimeDelta) -> String {
    let (n, unit) = if interval < TimeDelta::hours(1) {
        (interval.num_minutes(), "minute")
    } else if interval < TimeDelta::days(1) {
        (interval.num_hours(), "hour")
    } else {
        (interval.num_days(), "day")
    };
    format!("{} {}{}", n, unit, plural(n))
}

pub fn create_reader<P: AsRef<Path>>(path: P) -> csv::Result<Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .delimiter(b'|')
        .quote(b'#')
        .has_headers(true)
        .from_path(path)
}

pub fn create_writer<W: Write>(writer: W) -> Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'|')
        .quote(b'#')
        .has_headers(false)
        .from_writer(writer)
}

/// Normalized key for duplicate detection.
pub fn word_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Reads all entries of a vocabulary file, rejecting duplicate words.
pub fn load_vocabulary(path: &Path) -> Result<Vec<VocabEntry>> {
    let (entries, _) = read_vocabulary(path)?;
    Ok(entries)
}

/// Reads all entries together with a lookup table from word to line number.
pub fn read_vocabulary(path: &Path) -> Result<(Vec<VocabEntry>, HashMap<String, usize>)> {
    let mut reader = create_reader(path)?;
    let mut entries = Vec::new();
    let mut lines = HashMap::<String, usize>::new();
    for (i, record) in reader.records().enumerate() {
        let line = i + 2;
        let entry = record?.deserialize::<VocabEntry>(None)?;
        let key = word_key(&entry.word);
        if let Some(j) = lines.get(&key) {
            return Err(anyhow!(
                "The word {} in line {} is a duplicate! Please check line {} of your vocabulary file!",
                &entry.word,
                line,
                j,
            ));
        }
        lines.insert(key, line);
        entries.push(entry);
    }
    Ok((entries, lines))
}

#[test]
fn test_format_interval() {
    assert_eq!(format_interval(TimeDelta::minutes(5)), "5 minutes");
    assert_eq!(format_interval(TimeDelta::minutes(1)), "1 minute");
    assert_eq!(format_interval(TimeDelta::minutes(150)), "2 hours");
    assert_eq!(format_interval(TimeDelta::days(1)), "1 day");
    assert_eq!(
        format_interval(TimeDelta::milliseconds(120_960_000)),
        "1 day"
    );
    assert_eq!(format_interval(TimeDelta::days(3)), "3 days");
}

#[test]
fn test_read_line() {
    use std::io::Cursor;

    let mut stdin = Cursor::new(b"good\r\n\nlast");
    assert_eq!(read_line(&mut stdin).unwrap(), "good");
    assert_eq!(read_line(&mut stdin).unwrap(), "");
    assert_eq!(read_line(&mut stdin).unwrap(), "last");
    assert!(read_line(&mut stdin).is_err());
}

#[test]
fn test_load_vocabulary() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        "word|meaning|ipa|example|collocations\n\
        decision|a choice that you make|/dɪˈsɪʒ.ən/|I made a decision to study daily.|make a decision;tough decision\n\
        coffee|a hot drink made from roasted beans|||\n"
            .as_bytes(),
    )
    .unwrap();

    let entries = load_vocabulary(file.path()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].word, "decision");
    assert_eq!(entries[0].ipa.as_deref(), Some("/dɪˈsɪʒ.ən/"));
    assert_eq!(
        entries[0].collocation_list(),
        vec!["make a decision", "tough decision"]
    );
    assert_eq!(entries[1].word, "coffee");
    assert_eq!(entries[1].ipa, None);
    assert_eq!(entries[1].example, None);
    assert!(entries[1].collocation_list().is_empty());
}

#[test]
fn test_load_vocabulary_rejects_duplicates() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        b"word|meaning|ipa|example|collocations\n\
        huge|very big|||\n\
        coffee|a hot drink|||\n\
        Huge|enormous|||\n",
    )
    .unwrap();

    let result = load_vocabulary(file.path());
    assert_eq!(
        result.unwrap_err().to_string(),
        "The word Huge in line 4 is a duplicate! Please check line 2 of your vocabulary file!"
    );
}
