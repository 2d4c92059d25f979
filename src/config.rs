//! Generation options
//!
//! Options can be built in code or loaded from TOML:
//!
//! ```toml
//! [output]
//! svgo = false
//!
//! [output.svg]
//! sizes = true
//!
//! [sprite]
//! prefix = "icon-"
//!
//! [sprite.generate]
//! use = true
//! view = "-fragment"
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::optimize::MinifyOptions;
use crate::sprite::LayoutPolicy;

/// Suffix appended to a symbol id for its `view` element
pub const DEFAULT_VIEW_SUFFIX: &str = "-view";

/// Attributes copied from a source onto its `view` element by default
pub const DEFAULT_VIEW_ATTRIBUTES: [&str; 1] = ["preserveAspectRatio"];

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Complete configuration for one generation call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpriteConfig {
    pub output: OutputConfig,
    pub sprite: SpriteOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Final optimization pass
    pub svgo: OptimizerSetting,
    pub svg: SvgOutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvgOutputConfig {
    /// Write `width`/`height` on the root element
    pub sizes: bool,
    pub layout: LayoutPolicy,
}

/// `{ command = [...] }`, the program and its arguments
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSetting {
    pub command: Vec<String>,
}

/// Which optimizer, if any, runs over the assembled document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptimizerSetting {
    /// `true` runs the built-in minifier with default options
    Enabled(bool),
    /// Pipe the document through an external program
    Command(CommandSetting),
    /// Built-in minifier with explicit options
    Minify(MinifyOptions),
}

impl Default for OptimizerSetting {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpriteOptions {
    pub prefix: Prefix,
    /// Vertical spacing between slots in the stacked layout
    pub gutter: f64,
    /// Fail on duplicate ids instead of keeping the last source
    pub strict_ids: bool,
    pub generate: GenerateOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateOptions {
    pub title: bool,
    #[serde(rename = "use")]
    pub use_: bool,
    pub view: ViewSetting,
    pub symbol: bool,
    pub view_attributes: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            title: true,
            use_: false,
            view: ViewSetting::default(),
            symbol: true,
            view_attributes: DEFAULT_VIEW_ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `view` emission: a switch, or a switch-on with a custom id suffix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ViewSetting {
    Enabled(bool),
    Suffix(String),
}

impl Default for ViewSetting {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl ViewSetting {
    /// Suffix for view ids, or `None` when views are disabled
    pub fn suffix(&self) -> Option<&str> {
        match self {
            ViewSetting::Enabled(false) => None,
            ViewSetting::Enabled(true) => Some(DEFAULT_VIEW_SUFFIX),
            ViewSetting::Suffix(s) if s.is_empty() => Some(DEFAULT_VIEW_SUFFIX),
            ViewSetting::Suffix(s) => Some(s),
        }
    }
}

/// Identifier transformation applied to each file stem
#[derive(Clone)]
pub enum Prefix {
    /// Prepended verbatim
    Literal(String),
    /// Maps the base id to the final id; the result is used as-is
    Transform(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Prefix {
    pub fn transform(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Transform(Arc::new(f))
    }

    pub fn apply(&self, base: &str) -> String {
        match self {
            Prefix::Literal(prefix) => format!("{prefix}{base}"),
            Prefix::Transform(f) => f(base),
        }
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self::Literal(String::new())
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::Literal(prefix) => f.debug_tuple("Literal").field(prefix).finish(),
            Prefix::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Prefix::Literal)
    }
}

impl SpriteConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_optimizer(mut self, setting: OptimizerSetting) -> Self {
        self.output.svgo = setting;
        self
    }

    /// Return the assembled markup without optimization
    pub fn without_optimizer(self) -> Self {
        self.with_optimizer(OptimizerSetting::Enabled(false))
    }

    pub fn with_sizes(mut self, sizes: bool) -> Self {
        self.output.svg.sizes = sizes;
        self
    }

    pub fn with_layout(mut self, layout: LayoutPolicy) -> Self {
        self.output.svg.layout = layout;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sprite.prefix = Prefix::Literal(prefix.into());
        self
    }

    pub fn with_prefix_fn(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.sprite.prefix = Prefix::transform(f);
        self
    }

    pub fn with_gutter(mut self, gutter: f64) -> Self {
        self.sprite.gutter = gutter;
        self
    }

    pub fn with_strict_ids(mut self, strict: bool) -> Self {
        self.sprite.strict_ids = strict;
        self
    }

    pub fn with_title(mut self, title: bool) -> Self {
        self.sprite.generate.title = title;
        self
    }

    pub fn with_use(mut self, use_: bool) -> Self {
        self.sprite.generate.use_ = use_;
        self
    }

    pub fn with_view(mut self, view: bool) -> Self {
        self.sprite.generate.view = ViewSetting::Enabled(view);
        self
    }

    pub fn with_view_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.sprite.generate.view = ViewSetting::Suffix(suffix.into());
        self
    }

    pub fn with_symbol(mut self, symbol: bool) -> Self {
        self.sprite.generate.symbol = symbol;
        self
    }
}
