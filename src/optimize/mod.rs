//! Final optimization pass over the assembled sprite
//!
//! The engine treats optimization as an opaque text-to-text transform. Any
//! [`Optimizer`] can be plugged in; the configuration selects the built-in
//! [`Minifier`] or a [`CommandOptimizer`] piping through an external tool.

mod command;
mod minify;

pub use command::CommandOptimizer;
pub use minify::{Minifier, MinifyOptions};

use thiserror::Error;

use crate::config::OptimizerSetting;

/// Errors raised by an optimizer
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The document could not be read or rewritten
    #[error("malformed markup: {0}")]
    Markup(String),

    /// The external program could not be started or fed
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program exited unsuccessfully
    #[error("'{program}' exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },

    /// The external program wrote something other than UTF-8
    #[error("'{program}' produced non-UTF-8 output")]
    Encoding { program: String },

    #[error("optimizer command is empty")]
    EmptyCommand,
}

/// A text-to-text SVG transform
pub trait Optimizer: Send + Sync {
    fn optimize(&self, svg: &str) -> Result<String, OptimizeError>;
}

impl<F> Optimizer for F
where
    F: Fn(&str) -> Result<String, OptimizeError> + Send + Sync,
{
    fn optimize(&self, svg: &str) -> Result<String, OptimizeError> {
        self(svg)
    }
}

/// Build the optimizer a setting asks for, `None` when disabled
pub fn from_setting(setting: &OptimizerSetting) -> Result<Option<Box<dyn Optimizer>>, OptimizeError> {
    Ok(match setting {
        OptimizerSetting::Enabled(false) => None,
        OptimizerSetting::Enabled(true) => Some(Box::new(Minifier::default())),
        OptimizerSetting::Minify(options) => Some(Box::new(Minifier::new(options.clone()))),
        OptimizerSetting::Command(setting) => {
            Some(Box::new(CommandOptimizer::from_slice(&setting.command)?))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandSetting;

    #[test]
    fn test_disabled_setting_has_no_optimizer() {
        assert!(from_setting(&OptimizerSetting::Enabled(false)).unwrap().is_none());
        assert!(from_setting(&OptimizerSetting::Enabled(true)).unwrap().is_some());
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let result = from_setting(&OptimizerSetting::Command(CommandSetting { command: vec![] }));
        assert!(matches!(result, Err(OptimizeError::EmptyCommand)));
    }

    #[test]
    fn test_closures_are_optimizers() {
        let upper = |svg: &str| Ok::<_, OptimizeError>(svg.to_uppercase());
        assert_eq!(upper.optimize("<svg/>").unwrap(), "<SVG/>");
    }
}
