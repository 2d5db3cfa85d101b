use crate::directive::Directive;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directives in load order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub directives: Vec<Directive>,
}

impl Ledger {
    pub fn new(directives: Vec<Directive>) -> Self {
        Self { directives }
    }

    /// Load a `.json` / `.jsonl` file, or every such file below a directory in path order.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let input_path = path.as_ref();
        let mut files: Vec<PathBuf> = Vec::new();
        if input_path.is_dir() {
            for entry in WalkDir::new(input_path).sort_by_file_name() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unreadable ledger path");
                        continue;
                    }
                };
                let p = entry.path();
                if p.is_file() && is_ledger_file(p) {
                    files.push(p.to_path_buf());
                }
            }
        } else if input_path.is_file() {
            files.push(input_path.to_path_buf());
        } else {
            anyhow::bail!("ledger path not found: {}", input_path.display());
        }

        let mut directives = Vec::new();
        for file in &files {
            if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                load_jsonl(file, &mut directives)?;
            } else {
                load_json(file, &mut directives)?;
            }
        }
        tracing::info!(files = files.len(), directives = directives.len(), "loaded ledger");
        Ok(Self { directives })
    }

    /// Unique account names in first-seen order.
    pub fn accounts(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut accounts = Vec::new();
        for account in self.directives.iter().flat_map(Directive::accounts) {
            if seen.insert(account) {
                accounts.push(account.to_string());
            }
        }
        accounts
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

fn is_ledger_file(p: &Path) -> bool {
    matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl"))
}

fn load_jsonl(file: &Path, out: &mut Vec<Directive>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("{}:{}: read failed", file.display(), lineno + 1))?;
        if line.trim().is_empty() { continue; }
        let directive: Directive = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid directive", file.display(), lineno + 1))?;
        out.push(directive);
    }
    Ok(())
}

fn load_json(file: &Path, out: &mut Vec<Directive>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("{}: invalid JSON", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let directive: Directive = serde_json::from_value(v)
                    .with_context(|| format!("{}: invalid directive", file.display()))?;
                out.push(directive);
            }
        }
        serde_json::Value::Object(_) => {
            let directive: Directive = serde_json::from_value(json)
                .with_context(|| format!("{}: invalid directive", file.display()))?;
            out.push(directive);
        }
        _ => anyhow::bail!("{}: expected a directive object or an array of directives", file.display()),
    }
    Ok(())
}
