//! SVG Spritemap CLI
//!
//! Usage:
//!   svg-spritemap [OPTIONS] [FILES]...
//!
//! Options:
//!   -c, --config <FILE>  Configuration file (TOML format)
//!   -o, --output <FILE>  Write the sprite to a file instead of stdout
//!   --use, --view[=SUFFIX], --sizes, --prefix <PREFIX>, ...
//!   -h, --help           Print help

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use svg_spritemap::{generate, LayoutPolicy, SpriteConfig};

#[derive(Parser)]
#[command(name = "svg-spritemap")]
#[command(about = "Merge SVG icons into a single spritemap")]
struct Cli {
    /// Source SVG files, in output order
    files: Vec<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prefix prepended to every symbol id
    #[arg(long)]
    prefix: Option<String>,

    /// Write width/height on the root element
    #[arg(long)]
    sizes: bool,

    /// Root sizing policy: max or stack
    #[arg(long)]
    layout: Option<LayoutPolicy>,

    /// Spacing between stacked symbols
    #[arg(long)]
    gutter: Option<f64>,

    /// Emit a <use> element per symbol
    #[arg(long = "use")]
    use_: bool,

    /// Emit a <view> element per symbol, optionally with a custom id suffix
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "-view")]
    view: Option<String>,

    /// Do not generate <title> elements
    #[arg(long)]
    no_title: bool,

    /// Write sources inline instead of as <symbol> definitions
    #[arg(long)]
    no_symbol: bool,

    /// Skip the optimization pass
    #[arg(long)]
    no_optimize: bool,

    /// Fail when two files map to the same id
    #[arg(long)]
    strict_ids: bool,
}

impl Cli {
    /// Load the config file, then apply flags on top
    fn sprite_config(&self) -> Result<SpriteConfig> {
        let mut config = match &self.config {
            Some(path) => SpriteConfig::from_file(path)
                .with_context(|| format!("loading config '{}'", path.display()))?,
            None => SpriteConfig::default(),
        };

        if let Some(prefix) = &self.prefix {
            config = config.with_prefix(prefix.clone());
        }
        if self.sizes {
            config = config.with_sizes(true);
        }
        if let Some(layout) = self.layout {
            config = config.with_layout(layout);
        }
        if let Some(gutter) = self.gutter {
            config = config.with_gutter(gutter);
        }
        if self.use_ {
            config = config.with_use(true);
        }
        if let Some(suffix) = &self.view {
            config = config.with_view_suffix(suffix.clone());
        }
        if self.no_title {
            config = config.with_title(false);
        }
        if self.no_symbol {
            config = config.with_symbol(false);
        }
        if self.no_optimize {
            config = config.without_optimizer();
        }
        if self.strict_ids {
            config = config.with_strict_ids(true);
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Filter from `RUST_LOG` directives, `warn` when unset or invalid
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.sprite_config()?;

    let Some(svg) = generate(&cli.files, &config)? else {
        warn!("no input files, nothing written");
        return Ok(());
    };

    match &cli.output {
        Some(path) => fs::write(path, svg)
            .with_context(|| format!("writing sprite to '{}'", path.display()))?,
        None => println!("{}", svg),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg_spritemap::{OptimizerSetting, ViewSetting};

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "svg-spritemap",
            "--prefix",
            "ico-",
            "--use",
            "--view",
            "--layout",
            "stack",
            "--no-optimize",
            "a.svg",
            "b.svg",
        ]);
        let config = cli.sprite_config().unwrap();

        assert_eq!(cli.files, [PathBuf::from("a.svg"), PathBuf::from("b.svg")]);
        assert_eq!(config.sprite.prefix.apply("x"), "ico-x");
        assert!(config.sprite.generate.use_);
        assert_eq!(config.sprite.generate.view, ViewSetting::Suffix("-view".into()));
        assert_eq!(config.output.svg.layout, LayoutPolicy::Stack);
        assert_eq!(config.output.svgo, OptimizerSetting::Enabled(false));
    }

    #[test]
    fn test_log_filter_follows_rust_log() {
        use tracing::level_filters::LevelFilter;

        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_view_suffix_requires_equals() {
        let cli = Cli::parse_from(["svg-spritemap", "--view=-frame", "icon.svg"]);
        assert_eq!(cli.view.as_deref(), Some("-frame"));
        assert_eq!(cli.files, [PathBuf::from("icon.svg")]);
    }
}
