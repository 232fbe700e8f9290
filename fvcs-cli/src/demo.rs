//! Scripted walkthrough of commit, log and revert on one file

use anyhow::{Context, Result};
use fvcs_core::{Clock, FileIo, Repository};
use std::io::Write;

const INITIAL: &str = "This is the initial content.";
const APPENDED: &str = " Additional content.";

/// Snapshot `file` twice, list the log, then restore the first snapshot
pub fn run_demo<F: FileIo, C: Clock, W: Write>(
    repo: &Repository<F, C>,
    file: &str,
    out: &mut W,
) -> Result<()> {
    repo.initialize();
    writeln!(out, "Repository initialized.")?;

    repo.fs()
        .write_all(file, INITIAL.as_bytes())
        .with_context(|| format!("Failed to write {}", file))?;
    let first = repo.commit(file, "Initial commit")?;
    writeln!(out, "Changes committed to '{}'.", file)?;

    let mut content = repo.fs().read_all(file)?.to_vec();
    content.extend_from_slice(APPENDED.as_bytes());
    repo.fs()
        .write_all(file, &content)
        .with_context(|| format!("Failed to write {}", file))?;
    repo.commit(file, "Second commit")?;
    writeln!(out, "Changes committed to '{}'.", file)?;

    for revision in repo.log() {
        writeln!(out, "{}", revision)?;
    }

    let outcome = repo.revert(file, &first.to_hex())?;
    writeln!(
        out,
        "File '{}' reverted to the state at revision {}.",
        outcome.filename, outcome.identifier
    )?;

    let restored = repo.fs().read_all(file)?;
    writeln!(out, "Content: {}", String::from_utf8_lossy(&restored))?;
    Ok(())
}
