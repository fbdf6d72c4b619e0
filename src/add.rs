use crate::models::VocabEntry;
use crate::utils::{create_writer, read_line, read_vocabulary, word_key};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::Path;
use tracing::info;

/// Lets the user add as many new words as they want to a given vocabulary file.
pub fn add(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!(
            "File {:?} doesn't exist. Use `ulang init` to create it. Aborting.",
            path
        ));
    }
    let (entries, lines) = read_vocabulary(path)?;
    let file = OpenOptions::new().append(true).open(path)?;
    let added = add_entries(
        file,
        &mut stdin().lock(),
        &mut stdout().lock(),
        lines,
        entries.len(),
    )?;
    info!(?path, added, "added words");
    Ok(())
}

fn prompt<R, W>(label: &str, stdin: &mut R, stdout: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;
    Ok(read_line(stdin)?.trim().to_string())
}

fn optional(s: String) -> Option<String> {
    Some(s).filter(|s| !s.is_empty())
}

// Returns the number of words written.
fn add_entries<F, R, W>(
    file: F,
    mut stdin: R,
    mut stdout: W,
    mut lines: HashMap<String, usize>,
    existing: usize,
) -> Result<usize>
where
    F: Write,
    R: BufRead,
    W: Write,
{
    let mut writer = create_writer(file);
    let mut added = 0;

    loop {
        let word = prompt("Word: ", &mut stdin, &mut stdout)?;
        // Exit on empty input
        if word.is_empty() {
            return Ok(added);
        }
        let key = word_key(&word);
        if let Some(i) = lines.get(&key) {
            return Err(anyhow!(
                "The word {} already exists. Please check line {} of your vocabulary file!",
                word,
                i
            ));
        }

        let meaning = prompt("Meaning: ", &mut stdin, &mut stdout)?;
        let ipa = prompt("IPA: ", &mut stdin, &mut stdout)?;
        let example = prompt("Example: ", &mut stdin, &mut stdout)?;
        let collocations = prompt("Collocations (;-separated): ", &mut stdin, &mut stdout)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;

        writer.serialize(VocabEntry {
            word,
            meaning,
            ipa: optional(ipa),
            example: optional(example),
            collocations: optional(collocations),
        })?;
        writer.flush()?;
        added += 1;
        lines.insert(key, existing + added + 1);
    }
}

#[test]
fn test_add_entries() {
    use std::io::Cursor;

    let mut file = Cursor::new(Vec::new());
    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(
        "decision\na choice that you make\n/dɪˈsɪʒ.ən/\nI made a decision to study daily.\nmake a decision;tough decision\n\
        coffee\na hot drink\n\n\n\n\
        \n"
        .as_bytes(),
    );
    let result = add_entries(&mut file, &mut stdin, &mut stdout, HashMap::new(), 0);
    assert_eq!(result.unwrap(), 2);

    let output_vec = file.into_inner();
    let output = String::from_utf8_lossy(&output_vec);
    assert_eq!(
        output,
        "decision|a choice that you make|/dɪˈsɪʒ.ən/|I made a decision to study daily.|make a decision;tough decision\n\
        coffee|a hot drink|||\n"
    );
}

#[test]
fn test_cannot_add_duplicate_word_in_same_session() {
    use std::io::Cursor;

    let mut file = Cursor::new(Vec::new());
    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(
        b"huge\nvery big\n\n\n\n\
    Huge\n",
    );
    let result = add_entries(&mut file, &mut stdin, &mut stdout, HashMap::new(), 0);

    // Check prompts
    let stdout_vec = stdout.into_inner();
    assert_eq!(
        String::from_utf8_lossy(&stdout_vec),
        "Word: Meaning: IPA: Example: Collocations (;-separated): \nWord: "
    );

    // Check result: error message with line number
    assert_eq!(
        result.unwrap_err().to_string(),
        "The word Huge already exists. Please check line 2 of your vocabulary file!"
    );

    // Check output written to vocabulary file
    let output_vec = file.into_inner();
    let output = String::from_utf8_lossy(&output_vec);
    assert_eq!(output, "huge|very big|||\n");
}

#[test]
fn test_cannot_add_word_already_in_file() {
    use std::io::Cursor;

    let mut file = Cursor::new(Vec::new());
    let mut stdout = Cursor::new(Vec::new());
    let mut stdin = Cursor::new(b"coffee\n");
    let lines = HashMap::from([(String::from("coffee"), 3)]);
    let result = add_entries(&mut file, &mut stdin, &mut stdout, lines, 2);

    assert_eq!(
        result.unwrap_err().to_string(),
        "The word coffee already exists. Please check line 3 of your vocabulary file!"
    );
    assert!(file.into_inner().is_empty());
}
