use crate::add::add;
use crate::models::VocabEntry;
use anyhow::{anyhow, Result};
use std::path::Path;
use struct_field_names_as_array::FieldNamesAsArray;
use tracing::info;

/// Initializes a new vocabulary file and lets the user fill it.
pub fn init(path: &Path) -> Result<()> {
    create(path)?;
    println!("Created new vocabulary file {:?}\n", path);
    add(path)
}

/// Writes an empty vocabulary file containing only the header row.
pub fn create(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(anyhow!(
            "File {:?} already exists! Use `ulang add` to add new words. Aborting.",
            path
        ));
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .quote(b'#')
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(VocabEntry::FIELD_NAMES_AS_ARRAY)?;
    writer.flush()?;
    info!(?path, "created vocabulary file");
    Ok(())
}

#[test]
fn test_create_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.csv");

    create(&path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "word|meaning|ipa|example|collocations\n"
    );
    assert!(crate::utils::load_vocabulary(&path).unwrap().is_empty());
}

#[test]
fn test_create_refuses_existing_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let result = create(file.path());
    assert!(result
        .unwrap_err()
        .to_string()
        .ends_with("already exists! Use `ulang add` to add new words. Aborting."));
}
