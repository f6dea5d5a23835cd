use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use quizmath::MathDisplay;
use serde::Deserialize;

/// Settings read from the `--config` file.
///
/// ```toml
/// display = "block"
///
/// [converter]
/// pretty-print = "auto"
/// xml-namespace = "http://www.w3.org/1998/Math/MathML"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Display mode used unless `--inline` or `--block` is given.
    pub display: DisplayMode,
    pub converter: quizmath::Config,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    #[default]
    Inline,
    Block,
}

impl From<DisplayMode> for MathDisplay {
    fn from(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Inline => MathDisplay::Inline,
            DisplayMode::Block => MathDisplay::Block,
        }
    }
}

/// A config file that could not be loaded, together with its path.
#[derive(Debug)]
pub struct ConfigError {
    path: PathBuf,
    cause: Cause,
}

#[derive(Debug)]
enum Cause {
    Read(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.cause {
            Cause::Read(err) => write!(f, "cannot read config file '{path}': {err}"),
            Cause::Parse(err) => write!(f, "invalid config file '{path}':\n{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Cause::Read(err) => Some(err),
            Cause::Parse(err) => Some(err),
        }
    }
}

pub fn load_config_file(path: &Path) -> Result<CliConfig, ConfigError> {
    let error = |cause| ConfigError {
        path: path.to_path_buf(),
        cause,
    };
    let content = fs::read_to_string(path).map_err(|err| error(Cause::Read(err)))?;
    toml::from_str(&content).map_err(|err| error(Cause::Parse(err)))
}
