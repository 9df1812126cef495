/*!

  Errors raised while laying out or loading a netlist.

*/

use thiserror::Error;

/// Everything that can stop the layout pipeline
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A wire transitively depends on itself
    #[error("cyclic dependency through wire `{wire}`")]
    CyclicDependency {
        /// The wire at which the cycle was closed
        wire: String,
    },
    /// The configured palette has no colors to hand out
    #[error("the wire palette is empty")]
    EmptyPalette,
    /// The simulator reported a failure instead of a netlist
    #[error("simulator error: {0}")]
    Simulator(String),
    /// The netlist document is not valid JSON
    #[cfg(feature = "serde")]
    #[error("failed to parse netlist JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a [crate::config::RenderConfig]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for a render config
    #[cfg(feature = "serde")]
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The config names no wire colors
    #[error("config palette must name at least one color")]
    EmptyPalette,
}
