use std::collections::BTreeMap;
use std::path::Path;

use aarpub_util::errors::AarpubError;

/// File name of the project-local secrets file.
pub const ENV_FILE: &str = ".aarpub.env";

/// Loads a `.aarpub.env` file (shell-style `KEY=value` format).
///
/// `.aarpub.env` holds signing material and portal credentials for local
/// runs, so they do not have to be exported in the shell. A quoted value may
/// span several lines up to its closing quote, which is how an ASCII-armored
/// `GPG_PRIVATE_KEY` is stored. A missing file yields an empty map.
pub fn load_env_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path).map_err(AarpubError::Io)?;
    let mut lines = content.lines().enumerate();
    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = value.trim();

        let value = match open_quote(value) {
            Some(quote) => {
                let mut buf = value[1..].to_string();
                let mut closed = false;
                for (_, next) in lines.by_ref() {
                    buf.push('\n');
                    let next = next.trim_end();
                    if let Some(last) = next.strip_suffix(quote) {
                        buf.push_str(last);
                        closed = true;
                        break;
                    }
                    buf.push_str(next);
                }
                if !closed {
                    return Err(AarpubError::Generic {
                        message: format!(
                            "{}:{}: unterminated quoted value for {key}",
                            path.display(),
                            index + 1
                        ),
                    }
                    .into());
                }
                buf
            }
            None => unquote(value).to_string(),
        };
        map.insert(key, value);
    }
    Ok(map)
}

/// The quote character of a value that opens a quote without closing it on
/// the same line.
fn open_quote(value: &str) -> Option<char> {
    ['"', '\''].into_iter().find(|&quote| {
        value.starts_with(quote) && (value.len() == 1 || !value.ends_with(quote))
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// A point-in-time view of the variables aarpub reads.
///
/// Values from `.aarpub.env` take precedence over the process environment.
/// Absent variables read as the empty string.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture `keys` from the process environment, overlaid with `overrides`.
    pub fn capture(keys: &[&str], overrides: &BTreeMap<String, String>) -> Self {
        let mut vars = BTreeMap::new();
        for key in keys {
            let value = overrides
                .get(*key)
                .cloned()
                .or_else(|| std::env::var(key).ok());
            if let Some(value) = value {
                vars.insert(key.to_string(), value);
            }
        }
        Self { vars }
    }

    /// Build a snapshot from explicit pairs, bypassing the process environment.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Value of `key`, or `""` when unset.
    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).map(String::as_str).unwrap_or("")
    }
}
