//! Archive option model and command-line parser
//!
//! Parses the flag sequence of an `archive` invocation into a structured
//! [`ArchiveOptions`] value. The structure serializes field by field; there
//! is no textual round-trip of the parsed options.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::variables::VALID_VARIABLE_NAME;

#[cfg(feature = "logging")]
use tracing::debug;

/// Environment variable that flips the `ignore_broken_items` default.
pub const IGNORE_BROKEN_ITEMS_ENV: &str = "ISOLATE_IGNORE_BROKEN_ITEMS";

static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{VALID_VARIABLE_NAME}$")).unwrap());

/// A variable value as carried by config variables and evaluation scopes.
///
/// Config variable values that parse as decimal integers are kept as
/// integers so they serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    /// Integer-valued variable
    Int(i64),
    /// String-valued variable
    Str(String),
}

impl VariableValue {
    /// Coerce a raw token: decimal integers become [`VariableValue::Int`],
    /// everything else stays a string.
    pub fn coerce(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(i) => VariableValue::Int(i),
            Err(_) => VariableValue::Str(raw.to_owned()),
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Int(i) => write!(f, "{i}"),
            VariableValue::Str(s) => f.write_str(s),
        }
    }
}

/// Parsed options of an `archive` command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveOptions {
    /// `.isolate` file to load dependency data from, resolved against the root
    pub isolate: Option<PathBuf>,

    /// `.isolated` file to generate, resolved against the root
    pub isolated: Option<PathBuf>,

    /// Subdirectory filter, stored verbatim; may itself contain `<(VAR)` references
    pub subdir: Option<String>,

    /// Log invalid entries instead of aborting on them
    pub ignore_broken_items: bool,

    /// File patterns excluded from archiving, in the order given
    pub blacklist: Vec<String>,

    /// Variables replaced in command and paths and treated as relative directories
    pub path_variables: BTreeMap<String, String>,

    /// Variables replaced in command and paths but never treated as directories
    pub extra_variables: BTreeMap<String, String>,

    /// Variables used to evaluate conditions, e.g. `OS`
    pub config_variables: BTreeMap<String, VariableValue>,
}

/// Parse the flag sequence of an `archive` invocation.
///
/// `root` is the directory relative option paths resolve against. The
/// `ignore_broken_items` default comes from the `ISOLATE_IGNORE_BROKEN_ITEMS`
/// environment variable.
pub fn parse_archive_command_line(
    args: &[String],
    root: &Path,
) -> Result<ArchiveOptions, OptionsError> {
    let ignore_default = env::var_os(IGNORE_BROKEN_ITEMS_ENV).is_some_and(|v| !v.is_empty());
    parse_archive_command_line_with(args, root, ignore_default)
}

/// Like [`parse_archive_command_line`] but with an explicit
/// `ignore_broken_items` default instead of consulting the environment.
pub fn parse_archive_command_line_with(
    args: &[String],
    root: &Path,
    ignore_broken_default: bool,
) -> Result<ArchiveOptions, OptionsError> {
    let mut opts = ArchiveOptions {
        ignore_broken_items: ignore_broken_default,
        extra_variables: default_extra_variables(),
        ..ArchiveOptions::default()
    };

    let mut cursor = Cursor::new(args);
    while let Some(token) = cursor.take() {
        let (flag, inline) = split_inline(&token);
        match flag.as_str() {
            "-i" | "--isolate" => {
                opts.isolate = Some(PathBuf::from(cursor.value(&flag, inline)?));
            }
            "-s" | "--isolated" => {
                opts.isolated = Some(PathBuf::from(cursor.value(&flag, inline)?));
            }
            "--subdir" => {
                opts.subdir = Some(cursor.value(&flag, inline)?);
            }
            "--ignore_broken_items" => {
                if inline.is_some() {
                    return Err(OptionsError::UnexpectedValue(flag));
                }
                opts.ignore_broken_items = true;
            }
            "--blacklist" => {
                opts.blacklist.push(cursor.value(&flag, inline)?);
            }
            "--config-variable" => {
                let (key, value) = cursor.variable(&flag, inline)?;
                opts.config_variables.insert(key, VariableValue::coerce(&value));
            }
            "--path-variable" => {
                let (key, value) = cursor.variable(&flag, inline)?;
                opts.path_variables.insert(key, value);
            }
            "--extra-variable" => {
                let (key, value) = cursor.variable(&flag, inline)?;
                opts.extra_variables.insert(key, value);
            }
            _ if flag.starts_with('-') && flag != "-" => {
                return Err(OptionsError::UnknownOption(flag));
            }
            _ => {
                return Err(OptionsError::UnsupportedArgument(token));
            }
        }
    }

    finalize(&mut opts, root)?;

    #[cfg(feature = "logging")]
    debug!(
        "Parsed archive command line: isolated={:?}, {} config / {} path / {} extra variables",
        opts.isolated,
        opts.config_variables.len(),
        opts.path_variables.len(),
        opts.extra_variables.len()
    );

    Ok(opts)
}

/// Resolve paths and enforce the invariants the archive flow relies on.
fn finalize(opts: &mut ArchiveOptions, root: &Path) -> Result<(), OptionsError> {
    let isolated = opts.isolated.as_ref().ok_or(OptionsError::IsolatedRequired)?;
    if !isolated.to_string_lossy().ends_with(".isolated") {
        return Err(OptionsError::BadIsolatedExtension(
            isolated.to_string_lossy().into_owned(),
        ));
    }

    opts.isolated = opts.isolated.take().map(|p| normalize_path(&root.join(p)));
    opts.isolate = opts.isolate.take().map(|p| normalize_path(&root.join(p)));
    Ok(())
}

fn default_extra_variables() -> BTreeMap<String, String> {
    let suffix = if cfg!(windows) { ".exe" } else { "" };
    BTreeMap::from([("EXECUTABLE_SUFFIX".to_owned(), suffix.to_owned())])
}

/// Split `--flag=value` into the flag and its inline value.
fn split_inline(token: &str) -> (String, Option<String>) {
    if token.starts_with("--") {
        if let Some((flag, value)) = token.split_once('=') {
            return (flag.to_owned(), Some(value.to_owned()));
        }
    }
    (token.to_owned(), None)
}

/// Forward walk over the argument tokens.
struct Cursor<'a> {
    args: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(args: &'a [String]) -> Self {
        Self { args, pos: 0 }
    }

    fn take(&mut self) -> Option<String> {
        let token = self.args.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// The value of a single-value flag: inline if present, else the next token.
    fn value(&mut self, flag: &str, inline: Option<String>) -> Result<String, OptionsError> {
        match inline {
            Some(v) => Ok(v),
            None => self
                .take()
                .ok_or_else(|| OptionsError::MissingValue(flag.to_owned())),
        }
    }

    /// A `KEY=VALUE` or `KEY VALUE` variable binding. The key must match
    /// [`VALID_VARIABLE_NAME`]; the value keeps any further `=` verbatim.
    fn variable(
        &mut self,
        flag: &str,
        inline: Option<String>,
    ) -> Result<(String, String), OptionsError> {
        let first = self.value(flag, inline)?;
        let (key, value) = match first.split_once('=') {
            Some((key, value)) => (key.to_owned(), value.to_owned()),
            None => {
                let value = self
                    .take()
                    .ok_or_else(|| OptionsError::MissingValue(flag.to_owned()))?;
                (first, value)
            }
        };

        if !VARIABLE_NAME.is_match(&key) {
            return Err(OptionsError::BadVariableName(key));
        }
        Ok((key, value))
    }
}

/// Lexically normalize a path: drop `.` components and resolve `..` against
/// preceding normal components, without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // ".." never climbs above the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}
