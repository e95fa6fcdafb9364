//! Construction of the `dmrconfig` flashing command.
//!
//! The library only builds and resolves the command line; running it is
//! left to the caller.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default name of the flashing binary.
pub const DEFAULT_BINARY: &str = "dmrconfig";

/// A `dmrconfig -c [-t] <config>` invocation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use codeplug::FlashCommand;
///
/// let command = FlashCommand::new(Path::new("out/radio.conf")).with_trace(true);
/// assert_eq!(command.argv(), vec!["dmrconfig", "-c", "-t", "out/radio.conf"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashCommand {
    /// Binary name or path.
    pub binary: String,
    /// Pass `-t` to trace the serial protocol.
    pub trace: bool,
    /// Config file to write to the radio.
    pub config: PathBuf,
}

impl FlashCommand {
    /// Command for `config` using the default binary.
    #[must_use]
    pub fn new(config: &Path) -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            trace: false,
            config: config.to_path_buf(),
        }
    }

    /// Use a different binary name or path.
    #[must_use]
    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    /// Enable or disable protocol tracing.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Arguments after the binary.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-c".to_string()];
        if self.trace {
            args.push("-t".to_string());
        }
        args.push(self.config.display().to_string());
        args
    }

    /// The full command line, binary first.
    #[must_use]
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![self.binary.clone()];
        argv.extend(self.args());
        argv
    }

    /// Replace the binary with its resolved location on `PATH`.
    ///
    /// A binary given as a path (containing a separator) is checked in
    /// place instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BinaryNotFound`] if no executable is found.
    pub fn resolve(mut self) -> Result<Self> {
        let resolved = find_executable(&self.binary).ok_or_else(|| Error::BinaryNotFound {
            name: self.binary.clone(),
        })?;
        log::debug!("Resolved {} to {}", self.binary, resolved.display());
        self.binary = resolved.display().to_string();
        Ok(self)
    }
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Find `name` the way a shell would.
fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|full| is_executable(full))
}
