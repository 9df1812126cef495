/*!

  Render configuration: the wire palette, accent colors and the gate style table.

  Everything here is presentation. Swapping a [RenderConfig] never moves a
  single coordinate of the layout.

*/

use crate::circuit::GateType;
use crate::error::ConfigError;
use std::collections::BTreeMap;
#[cfg(feature = "serde")]
use std::path::Path;

/// The wire palette used when none is configured
pub const DEFAULT_PALETTE: [&str; 18] = [
    "#6a1b9a", "#00897b", "#f57c00", "#43a047", "#1e88e5", "#fb8c00", "#8e24aa", "#e53935",
    "#c62828", "#00695c", "#bf360c", "#1b5e20", "#ad1457", "#00838f", "#e65100", "#2e7d32",
    "#283593", "#f57f17",
];

/// Fill color and glyph of one gate kind
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct GateStyle {
    /// Body fill color
    pub fill: String,
    /// The short text drawn on the body
    pub glyph: String,
}

impl GateStyle {
    /// Creates a style from a fill color and a glyph
    pub fn new(fill: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            glyph: glyph.into(),
        }
    }
}

/// Maps gate kinds to their [GateStyle], with a fallback for anything unlisted
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SymbolTable {
    /// Styles keyed by canonical gate name
    pub styles: BTreeMap<String, GateStyle>,
    /// The style of every gate kind missing from `styles`
    pub fallback: GateStyle,
}

impl Default for SymbolTable {
    fn default() -> Self {
        let styles = [
            (GateType::And, "#4CAF50", "AND"),
            (GateType::Or, "#2196F3", "OR"),
            (GateType::Xor, "#FF9800", "XOR"),
            (GateType::Xnor, "#FFC107", "XNOR"),
            (GateType::Not, "#F44336", "NOT"),
            (GateType::Nand, "#9C27B0", "NAND"),
            (GateType::Nor, "#00BCD4", "NOR"),
            (GateType::Identity, "#607D8B", "="),
            (GateType::Constant, "#795548", "C"),
        ]
        .into_iter()
        .map(|(t, fill, glyph)| (t.get_name().to_string(), GateStyle::new(fill, glyph)))
        .collect();

        Self {
            styles,
            fallback: GateStyle::new("#2a5298", "?"),
        }
    }
}

impl SymbolTable {
    /// Returns the style for `gate_type`, or the fallback
    pub fn style_for(&self, gate_type: &GateType) -> &GateStyle {
        self.styles
            .get(gate_type.get_name())
            .unwrap_or(&self.fallback)
    }

    /// Sets the style of `gate_type`
    pub fn set_style(&mut self, gate_type: &GateType, style: GateStyle) {
        self.styles.insert(gate_type.get_name().to_string(), style);
    }
}

/// Presentation settings for a render
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Wire colors, handed out cyclically
    pub palette: Vec<String>,
    /// Canvas background
    pub background: String,
    /// Color of primary input labels
    pub input_label_color: String,
    /// Fill of output pins
    pub output_fill: String,
    /// Outline of output pins and color of their labels
    pub output_stroke: String,
    /// Outline of gate bodies and bubbles
    pub gate_stroke: String,
    /// Color of the glyph drawn on gate bodies
    pub glyph_color: String,
    /// Gate fill colors and glyphs
    pub symbols: SymbolTable,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            background: "#ffffff".to_string(),
            input_label_color: "#1976d2".to_string(),
            output_fill: "#66bb6a".to_string(),
            output_stroke: "#2e7d32".to_string(),
            gate_stroke: "#333".to_string(),
            glyph_color: "white".to_string(),
            symbols: SymbolTable::default(),
        }
    }
}

impl RenderConfig {
    /// Returns the color of the wire with the given ordinal.
    ///
    /// Returns [None] only if the palette is empty.
    pub fn color_at(&self, ordinal: usize) -> Option<&str> {
        if self.palette.is_empty() {
            return None;
        }
        Some(&self.palette[ordinal % self.palette.len()])
    }

    /// Checks that the config can be rendered with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    /// Parses a config from JSON. Fields left out keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config from a JSON file
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        clilog::debug!(
            "loaded render config from {} ({} colors)",
            path.display(),
            config.palette.len()
        );
        Ok(config)
    }
}
