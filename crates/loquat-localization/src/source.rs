//! Bundle data sources
//!
//! Loading and parsing bundle files is plain I/O kept behind a trait so the
//! store never cares where key→text data comes from, and so tests can plug
//! in counting doubles.

use crate::error::LocalizationResult;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Supplies raw key→text data for one (bundle name, language) pair.
pub trait BundleSource {
    /// `Ok(None)` means the partition does not exist for this source; real
    /// read or parse failures come back as errors.
    fn read(
        &self,
        name: &str,
        language: &str,
    ) -> LocalizationResult<Option<HashMap<String, String>>>;
}

/// Reads Java-style `.properties` files from an ordered search path.
///
/// A bundle named `i18n/day` in language `fr` is looked up as
/// `<root>/i18n/day_fr.properties`, first root wins.
#[derive(Debug, Clone)]
pub struct PropertiesSource {
    roots: Vec<PathBuf>,
}

impl PropertiesSource {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn single(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl BundleSource for PropertiesSource {
    fn read(
        &self,
        name: &str,
        language: &str,
    ) -> LocalizationResult<Option<HashMap<String, String>>> {
        let file_name = format!("{name}_{language}.properties");
        for root in &self.roots {
            let path = root.join(&file_name);
            if !path.is_file() {
                continue;
            }
            debug!(path = %path.display(), "reading bundle file");
            let content = std::fs::read_to_string(&path)?;
            return Ok(Some(parse_properties(&content)));
        }
        Ok(None)
    }
}

/// Parse `.properties` content: `key=value` or `key:value` pairs, `#`/`!`
/// comments, backslash line continuations.
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    let mut pending = String::new();

    for raw_line in content.lines() {
        let line = raw_line.trim_start();
        if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        if let Some(stripped) = line.strip_suffix('\\') {
            pending.push_str(stripped);
            continue;
        }
        pending.push_str(line);

        let logical = std::mem::take(&mut pending);
        match split_pair(&logical) {
            Some((key, value)) => {
                entries.insert(unescape(key), unescape(value));
            }
            None => warn!(line = logical.as_str(), "skipping malformed property line"),
        }
    }

    entries
}

/// Split at the first unescaped `=` or `:` separator
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (index, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                let key = line[..index].trim();
                let value = line[index + ch.len_utf8()..].trim_start();
                if key.is_empty() {
                    return None;
                }
                return Some((key, value));
            }
            _ => {}
        }
    }
    None
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let code: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&code, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&code);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
