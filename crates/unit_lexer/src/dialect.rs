//! Grammar dialects.
//!
//! systemd unit files continue a value onto the next line with a trailing
//! backslash. mkosi configuration shares the section/key/value grammar but
//! also continues a value onto any following indented line.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which continuation rules the scanner applies.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// systemd unit files: backslash continuation only.
    #[default]
    Systemd,
    /// mkosi configuration: backslash and indentation continuation.
    Mkosi,
}

/// Directories whose `*.conf` entries are read by mkosi.
const MKOSI_DROP_IN_DIRS: &[&str] = &["mkosi.conf.d", "mkosi.images", "mkosi.profiles"];

impl Dialect {
    /// Whether indented lines after a value continue it.
    #[inline]
    pub const fn continues_on_indent(self) -> bool {
        matches!(self, Dialect::Mkosi)
    }

    /// Pick a dialect from a file path.
    ///
    /// Only the path is inspected; the file is never opened.
    pub fn for_path(path: &Path) -> Dialect {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Dialect::Systemd;
        };
        if name == "mkosi.conf" || name == "mkosi.local.conf" {
            return Dialect::Mkosi;
        }
        let is_conf = path.extension().is_some_and(|ext| ext == "conf");
        let in_drop_in = path
            .ancestors()
            .skip(1)
            .filter_map(|dir| dir.file_name().and_then(|n| n.to_str()))
            .any(|dir| MKOSI_DROP_IN_DIRS.contains(&dir));
        if is_conf && in_drop_in {
            Dialect::Mkosi
        } else {
            Dialect::Systemd
        }
    }

    /// Name used on the command line and in serialized options.
    pub const fn as_str(self) -> &'static str {
        match self {
            Dialect::Systemd => "systemd",
            Dialect::Mkosi => "mkosi",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown dialect `{0}` (expected `systemd` or `mkosi`)")]
pub struct DialectError(pub String);

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "systemd" => Ok(Dialect::Systemd),
            "mkosi" => Ok(Dialect::Mkosi),
            _ => Err(DialectError(s.to_string())),
        }
    }
}
