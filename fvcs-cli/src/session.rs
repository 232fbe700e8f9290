//! Line-oriented interactive session
//!
//! History exists only while the session runs. Each input line is one
//! command; domain errors are printed and the session carries on.

use anyhow::{Result, anyhow};
use fvcs_core::{Clock, FileIo, Repository, Revision};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  init                         announce the repository
  commit <file> [message...]   snapshot <file>
  log [--json]                 list every revision
  history <file>               list revisions of <file> and its latest
  revert <file> <identifier>   restore <file> to a revision
  help                         show this help
  quit                         end the session (history is discarded)";

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init,
    Commit { file: String, message: String },
    Log { json: bool },
    History { file: String },
    Revert { file: String, identifier: String },
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for blank lines and `#` comments
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "init" => Command::Init,
            "commit" => {
                let (file, message) = match rest.split_once(char::is_whitespace) {
                    Some((file, message)) => (file, message.trim()),
                    None => (rest, ""),
                };
                if file.is_empty() {
                    return Err(anyhow!("usage: commit <file> [message...]"));
                }
                Command::Commit {
                    file: file.to_string(),
                    message: message.to_string(),
                }
            }
            "log" => match rest {
                "" => Command::Log { json: false },
                "--json" => Command::Log { json: true },
                other => return Err(anyhow!("unexpected argument to log: {}", other)),
            },
            "history" => {
                if rest.is_empty() || rest.contains(char::is_whitespace) {
                    return Err(anyhow!("usage: history <file>"));
                }
                Command::History {
                    file: rest.to_string(),
                }
            }
            "revert" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                match args.as_slice() {
                    [file, identifier] => Command::Revert {
                        file: file.to_string(),
                        identifier: identifier.to_string(),
                    },
                    _ => return Err(anyhow!("usage: revert <file> <identifier>")),
                }
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("unknown command: {} (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Session<F: FileIo, C: Clock> {
    repo: Repository<F, C>,
}

impl<F: FileIo, C: Clock> Session<F, C> {
    pub fn new(repo: Repository<F, C>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Repository<F, C> {
        &self.repo
    }

    /// Read commands until EOF or `quit`
    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let flow = match Command::parse(&line) {
                Ok(Some(command)) => self.execute(command, out)?,
                Ok(None) => Flow::Continue,
                Err(e) => {
                    writeln!(out, "Error: {}", e)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Run one command, writing its report to `out`
    ///
    /// Only output failures are returned as errors; repository failures are
    /// reported inline.
    pub fn execute<W: Write>(&self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Init => {
                self.repo.initialize();
                writeln!(out, "Repository initialized.")?;
            }
            Command::Commit { file, message } => match self.repo.commit(&file, &message) {
                Ok(id) => writeln!(out, "Changes committed to '{}' ({}).", file, id)?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            Command::Log { json: true } => {
                let summaries = self.repo.summaries();
                writeln!(out, "{}", serde_json::to_string_pretty(&summaries)?)?;
            }
            Command::Log { json: false } => write_revisions(out, &self.repo.log())?,
            Command::History { file } => {
                write_revisions(out, &self.repo.history(&file))?;
                if let Some(latest) = self.repo.latest(&file) {
                    writeln!(out, "Latest: {}", latest.identifier())?;
                }
            }
            Command::Revert { file, identifier } => match self.repo.revert(&file, &identifier) {
                Ok(outcome) => writeln!(
                    out,
                    "File '{}' reverted to the state at revision {}.",
                    outcome.filename, outcome.identifier
                )?,
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }
}

fn write_revisions<W: Write>(out: &mut W, revisions: &[Revision]) -> Result<()> {
    if revisions.is_empty() {
        writeln!(out, "No revisions.")?;
    }
    for revision in revisions {
        writeln!(out, "{}", revision)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fvcs_core::{FixedClock, MemoryFs, RepositoryConfig};

    fn session() -> (Session<MemoryFs, FixedClock>, MemoryFs) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let fs = MemoryFs::new();
        let repo = Repository::with_clock(
            fs.clone(),
            FixedClock::new(start),
            RepositoryConfig::default(),
        );
        (Session::new(repo), fs)
    }

    fn run(session: &Session<MemoryFs, FixedClock>, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("# note").unwrap(), None);
        assert_eq!(Command::parse("init").unwrap(), Some(Command::Init));
        assert_eq!(
            Command::parse("commit a.txt first  draft").unwrap(),
            Some(Command::Commit {
                file: "a.txt".to_string(),
                message: "first  draft".to_string(),
            })
        );
        assert_eq!(
            Command::parse("commit a.txt").unwrap(),
            Some(Command::Commit {
                file: "a.txt".to_string(),
                message: String::new(),
            })
        );
        assert_eq!(
            Command::parse("log --json").unwrap(),
            Some(Command::Log { json: true })
        );
        assert_eq!(
            Command::parse("revert a.txt abc").unwrap(),
            Some(Command::Revert {
                file: "a.txt".to_string(),
                identifier: "abc".to_string(),
            })
        );
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("commit").is_err());
        assert!(Command::parse("revert a.txt").is_err());
        assert!(Command::parse("history").is_err());
        assert!(Command::parse("log -v").is_err());
        assert!(Command::parse("push").is_err());
    }

    #[test]
    fn test_session_commit_and_revert() {
        let (session, fs) = session();
        fs.write_all("a.txt", b"hello").unwrap();
        let out = run(&session, "init\ncommit a.txt init\n");
        assert!(out.contains("Repository initialized."));
        assert!(out.contains("Changes committed to 'a.txt'"));

        let id = session.repository().log()[0].identifier();
        fs.write_all("a.txt", b"hello world").unwrap();

        let out = run(&session, &format!("revert a.txt {}\nlog\n", id));
        assert!(out.contains(&format!("reverted to the state at revision {}", id)));
        assert!(out.contains("| Message: init | File: a.txt"));
        assert_eq!(fs.read_all("a.txt").unwrap().as_ref(), b"hello");
    }

    #[test]
    fn test_session_reports_not_found_and_continues() {
        let (session, _fs) = session();
        let out = run(&session, "revert missing.txt deadbeef\nbogus\nlog\n");
        assert!(out.contains(
            "Error: Revision with identifier 'deadbeef' for file 'missing.txt' not found"
        ));
        assert!(out.contains("Error: unknown command: bogus"));
        assert!(out.contains("No revisions."));
    }

    #[test]
    fn test_session_history_reports_latest() {
        let (session, fs) = session();
        fs.write_all("a.txt", b"one").unwrap();
        fs.write_all("b.txt", b"other").unwrap();
        run(&session, "commit a.txt first\ncommit b.txt unrelated\n");
        session.repository().clock().advance(1);
        fs.write_all("a.txt", b"two").unwrap();
        run(&session, "commit a.txt second\n");

        let latest = session.repository().log()[2].identifier();
        let out = run(&session, "history a.txt\nhistory c.txt\n");
        assert_eq!(out.matches("| File: a.txt").count(), 2);
        assert!(!out.contains("b.txt"));
        assert!(out.contains(&format!("Latest: {}", latest)));
        assert_eq!(out.matches("Latest: ").count(), 1);
        assert!(out.contains("No revisions."));
    }

    #[test]
    fn test_session_stops_at_quit() {
        let (session, fs) = session();
        fs.write_all("a.txt", b"x").unwrap();
        run(&session, "quit\ncommit a.txt never\n");
        assert!(session.repository().is_empty());
    }

    #[test]
    fn test_session_json_log() {
        let (session, fs) = session();
        fs.write_all("a.txt", b"abc").unwrap();
        let out = run(&session, "commit a.txt one\nlog --json\n");
        let json_start = out.find('[').unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out[json_start..]).unwrap();
        assert_eq!(parsed[0]["filename"], "a.txt");
        assert_eq!(parsed[0]["message"], "one");
        assert_eq!(parsed[0]["size"], 3);
    }
}
