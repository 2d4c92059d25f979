//! SVG Spritemap - merge independent SVG icons into one addressable sprite
//!
//! Every source becomes a `<symbol>` whose id is derived from its file name.
//! Optional `use` and `view` elements, generated titles and a root size can
//! be added, and the result is passed through an optimizer.
//!
//! # Example
//!
//! ```rust
//! use svg_spritemap::{generate_from_sources, SourceFile, SpriteConfig};
//!
//! let sources = vec![SourceFile::new(
//!     "icons/home.svg",
//!     r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M0 0h24v24H0z"/></svg>"#,
//! )];
//!
//! let svg = generate_from_sources(sources, &SpriteConfig::default())
//!     .unwrap()
//!     .unwrap();
//! assert!(svg.contains(r#"<symbol id="home" viewBox="0 0 24 24">"#));
//! assert!(svg.contains("<title>home</title>"));
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod optimize;
pub mod source;
pub mod sprite;

pub use config::{CommandSetting, ConfigError, OptimizerSetting, Prefix, SpriteConfig, ViewSetting};
pub use error::SpriteError;
pub use geometry::ViewBox;
pub use optimize::{CommandOptimizer, Minifier, MinifyOptions, OptimizeError, Optimizer};
pub use source::{SourceDocument, SourceFile};
pub use sprite::{LayoutPolicy, SpriteDocument, Symbol};

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

/// Runs the sprite pipeline with a fixed configuration and optimizer
pub struct Generator {
    config: SpriteConfig,
    optimizer: Option<Box<dyn Optimizer>>,
}

impl Generator {
    /// Create a generator using the optimizer the configuration selects
    pub fn new(config: SpriteConfig) -> Result<Self, SpriteError> {
        let optimizer = optimize::from_setting(&config.output.svgo)?;
        Ok(Self { config, optimizer })
    }

    /// Replace the configured optimizer
    pub fn with_optimizer(mut self, optimizer: impl Optimizer + 'static) -> Self {
        self.optimizer = Some(Box::new(optimizer));
        self
    }

    /// Skip the optimization pass
    pub fn without_optimizer(mut self) -> Self {
        self.optimizer = None;
        self
    }

    pub fn config(&self) -> &SpriteConfig {
        &self.config
    }

    /// Read, parse and merge the files at `paths`
    ///
    /// Returns `Ok(None)` for an empty path list.
    pub fn generate<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<Option<String>, SpriteError> {
        let documents = paths
            .par_iter()
            .map(|path| SourceFile::read(path.as_ref()).and_then(|source| prepare(&source)))
            .collect::<Result<Vec<_>, _>>()?;
        self.assemble(documents)
    }

    /// Merge in-memory sources
    ///
    /// Returns `Ok(None)` when `sources` is empty.
    pub fn generate_from_sources(&self, sources: &[SourceFile]) -> Result<Option<String>, SpriteError> {
        let documents = sources
            .par_iter()
            .map(prepare)
            .collect::<Result<Vec<_>, _>>()?;
        self.assemble(documents)
    }

    fn assemble(&self, documents: Vec<(SourceDocument, ViewBox)>) -> Result<Option<String>, SpriteError> {
        if documents.is_empty() {
            return Ok(None);
        }

        let options = &self.config.sprite;
        let mut sprite = documents.into_iter().try_fold(
            SpriteDocument::new(),
            |mut sprite, (document, view_box)| {
                let symbol = Symbol::build(document, view_box, options, &mut sprite.root_attributes)?;
                debug!(id = %symbol.id, view_box = %symbol.view_box, "built symbol");
                sprite.add_symbol(symbol, options.strict_ids)?;
                Ok::<_, SpriteError>(sprite)
            },
        )?;

        sprite.emit_references(&self.config)?;
        sprite.inject_titles(options.generate.title);

        let svg = sprite.to_svg(options.generate.symbol);
        let svg = match &self.optimizer {
            Some(optimizer) => optimizer.optimize(&svg)?,
            None => svg,
        };

        info!(
            symbols = sprite.entries().len(),
            bytes = svg.len(),
            "generated spritemap"
        );
        Ok(Some(svg))
    }
}

/// Parse one source and resolve its geometry
fn prepare(source: &SourceFile) -> Result<(SourceDocument, ViewBox), SpriteError> {
    let document = SourceDocument::parse(source)?;
    let view_box = geometry::resolve_view_box(&document)?;
    debug!(path = %source.path.display(), %view_box, "parsed source");
    Ok((document, view_box))
}

/// Merge the SVG files at `paths` into a spritemap
///
/// # Example
///
/// ```rust
/// use svg_spritemap::{generate, SpriteConfig};
///
/// let paths: [&str; 0] = [];
/// assert_eq!(generate(&paths, &SpriteConfig::default()).unwrap(), None);
/// ```
pub fn generate<P: AsRef<Path> + Sync>(
    paths: &[P],
    config: &SpriteConfig,
) -> Result<Option<String>, SpriteError> {
    Generator::new(config.clone())?.generate(paths)
}

/// Merge in-memory sources into a spritemap
pub fn generate_from_sources(
    sources: Vec<SourceFile>,
    config: &SpriteConfig,
) -> Result<Option<String>, SpriteError> {
    Generator::new(config.clone())?.generate_from_sources(&sources)
}
