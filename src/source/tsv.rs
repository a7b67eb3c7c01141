use crate::record::Record;
use crate::source::DataSource;
use crate::source::clean::{clean_field, is_placeholder_name};
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;
use std::path::PathBuf;

/// Directory extract stored as tab-separated `name<TAB>role` lines.
#[derive(Debug, Clone)]
pub struct TsvSource {
    pub path: PathBuf,
}

impl TsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for TsvSource {
    fn fetch(&self) -> anyhow::Result<Vec<Record>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read records file {}", self.path.display()))?;
        parse_records(&text, &self.path.display().to_string())
    }
}

/// Parse `name<TAB>role` lines.
///
/// Blank lines, `#` comments and a `name<TAB>role` header are skipped. Extra
/// columns after the role are ignored. Rows whose cleaned name is empty or a
/// placeholder such as `TBD` are dropped with a warning.
///
/// Example:
/// Alice Doe	Founder
pub fn parse_records(text: &str, origin: &str) -> anyhow::Result<Vec<Record>> {
    // 1) name: everything up to the first tab
    // 2) role: up to the next tab or end of line
    let re = Regex::new(r"^([^\t]*)\t([^\t]*)")?;

    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;

        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let Some(caps) = re.captures(line) else {
            bail!("records parse error at {}:{}: expected name<TAB>role, got {:?}", origin, lno, line);
        };

        let name = clean_field(&caps[1]);
        let role = clean_field(&caps[2]);

        if lno == 1 && name.eq_ignore_ascii_case("name") && role.eq_ignore_ascii_case("role") {
            continue;
        }
        if is_placeholder_name(&name) {
            tracing::warn!("{}:{}: skipping placeholder name {:?}", origin, lno, name);
            continue;
        }
        if role.is_empty() {
            bail!("records parse error at {}:{}: empty role for {}", origin, lno, name);
        }

        out.push(Record::new(name, role));
    }

    tracing::debug!(records = out.len(), "read records from {}", origin);
    Ok(out)
}
