//! Keeps the project's `.gitignore` in shape so the `.env` file holding the
//! API key is never committed.

use anyhow::{Context, Result, bail};
use std::{
    fmt, fs,
    io::Write,
    path::{Path, PathBuf},
};

pub const IGNORE_FILE: &str = ".gitignore";
/// Name editors on Windows tend to produce by accident.
pub const MISNAMED_IGNORE_FILE: &str = ".gitignore.txt";
pub const DEFAULT_IGNORE_CONTENT: &str = ".env\n__pycache__/\n*.log\n";

const ENV_ENTRY: &str = ".env";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreFix {
    Renamed { from: PathBuf, to: PathBuf },
    Created(PathBuf),
    AppendedEnv(PathBuf),
    AlreadyCorrect(PathBuf),
}

impl IgnoreFix {
    pub fn changed(&self) -> bool {
        !matches!(self, IgnoreFix::AlreadyCorrect(_))
    }
}

impl fmt::Display for IgnoreFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreFix::Renamed { from, to } => {
                write!(f, "Renamed '{}' to '{}'", from.display(), to.display())
            }
            IgnoreFix::Created(path) => write!(f, "Created a fresh '{}'", path.display()),
            IgnoreFix::AppendedEnv(path) => {
                write!(f, "Added '{ENV_ENTRY}' to '{}'", path.display())
            }
            IgnoreFix::AlreadyCorrect(path) => {
                write!(f, "'{}' is correctly named and includes '{ENV_ENTRY}'", path.display())
            }
        }
    }
}

/// Check `dir` for a usable ignore file and repair it.
///
/// At most one repair is applied per call, in this order: rename a
/// misnamed file, create a missing one, append a missing `.env` entry.
pub fn fix_ignore_file(dir: &Path) -> Result<IgnoreFix> {
    let wrong = dir.join(MISNAMED_IGNORE_FILE);
    let right = dir.join(IGNORE_FILE);

    if wrong.exists() {
        if right.exists() {
            bail!(
                "Both '{}' and '{}' exist; merge them by hand.",
                wrong.display(),
                right.display()
            );
        }
        fs::rename(&wrong, &right)
            .with_context(|| format!("Could not rename '{}'", wrong.display()))?;
        tracing::info!(from = %wrong.display(), to = %right.display(), "renamed ignore file");
        return Ok(IgnoreFix::Renamed { from: wrong, to: right });
    }

    if !right.exists() {
        fs::write(&right, DEFAULT_IGNORE_CONTENT)
            .with_context(|| format!("Could not create '{}'", right.display()))?;
        tracing::info!(path = %right.display(), "created ignore file");
        return Ok(IgnoreFix::Created(right));
    }

    let content = fs::read_to_string(&right)
        .with_context(|| format!("Could not read '{}'", right.display()))?;

    if content.contains(ENV_ENTRY) {
        return Ok(IgnoreFix::AlreadyCorrect(right));
    }

    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(&right)
        .with_context(|| format!("Could not open '{}' for appending", right.display()))?;

    let separator = if content.is_empty() || content.ends_with('\n') { "" } else { "\n" };
    writeln!(file, "{separator}{ENV_ENTRY}")
        .with_context(|| format!("Could not append to '{}'", right.display()))?;

    tracing::info!(path = %right.display(), "added .env to ignore file");
    Ok(IgnoreFix::AppendedEnv(right))
}
