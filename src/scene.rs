/*!

  Drawing primitives and the surfaces that paint them.

  A [Scene] is the complete output of a layout: canvas extents plus an
  ordered list of layered [Primitive]s. It holds no references to the netlist
  and can be painted on any [Surface] or serialized for a host that draws
  by itself.

*/

use crate::symbol::PathCmd;

/// Drawing order of scene items. Earlier layers are painted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layer {
    /// Horizontal wire rails
    Rails,
    /// Taps and drop lines into gate inputs
    Wires,
    /// Gate bodies and glyphs
    Gates,
    /// Input and output pins with their labels
    Ports,
}

impl Layer {
    /// Every layer in painting order
    pub const ALL: [Layer; 4] = [Layer::Rails, Layer::Wires, Layer::Gates, Layer::Ports];

    /// Returns a short name for the layer
    pub fn get_name(&self) -> &'static str {
        match self {
            Layer::Rails => "rails",
            Layer::Wires => "wires",
            Layer::Gates => "gates",
            Layer::Ports => "ports",
        }
    }
}

/// Horizontal alignment of a [Primitive::Text] relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Anchor {
    /// Text begins at the anchor
    Start,
    /// Text is centered on the anchor
    Middle,
    /// Text ends at the anchor
    End,
}

/// One thing to draw
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Primitive {
    /// A straight segment with round caps
    Line {
        /// Start x
        x1: f32,
        /// Start y
        y1: f32,
        /// End x
        x2: f32,
        /// End y
        y2: f32,
        /// Stroke color
        stroke: String,
        /// Stroke width
        width: f32,
        /// The wire this segment belongs to, if any
        wire: Option<String>,
    },
    /// A filled circle with an outline
    Circle {
        /// Center x
        cx: f32,
        /// Center y
        cy: f32,
        /// Radius
        r: f32,
        /// Fill color
        fill: String,
        /// Outline color
        stroke: String,
        /// Outline width
        stroke_width: f32,
    },
    /// A vector path, filled when `fill` is set
    Path {
        /// The path commands in canvas coordinates
        commands: Vec<PathCmd>,
        /// Fill color, [None] for an open stroke
        fill: Option<String>,
        /// Stroke color
        stroke: String,
        /// Stroke width
        stroke_width: f32,
    },
    /// A text label
    Text {
        /// Anchor x
        x: f32,
        /// Baseline y
        y: f32,
        /// The text itself
        content: String,
        /// Horizontal alignment
        anchor: Anchor,
        /// Font size
        size: f32,
        /// Bold weight
        bold: bool,
        /// Fill color
        fill: String,
    },
}

impl Primitive {
    /// Returns the wire tag of a line
    pub fn get_wire(&self) -> Option<&str> {
        match self {
            Primitive::Line { wire, .. } => wire.as_deref(),
            _ => None,
        }
    }
}

/// A host canvas that scene primitives can be painted on.
///
/// [Scene::paint] always clears and resizes the surface before drawing, so a
/// surface only ever shows one complete scene.
pub trait Surface {
    /// Removes everything drawn so far
    fn clear(&mut self);

    /// Sets the drawable extents
    fn resize(&mut self, width: f32, height: f32);

    /// Draws one primitive on `layer`
    fn draw(&mut self, layer: Layer, primitive: &Primitive);
}

/// A finished layout
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Scene {
    width: f32,
    height: f32,
    items: Vec<(Layer, Primitive)>,
}

impl Scene {
    /// Creates a scene with the given extents and no primitives
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    /// The scene of an empty netlist: zero extents, nothing to draw
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends `primitive` to `layer`
    pub fn push(&mut self, layer: Layer, primitive: Primitive) {
        self.items.push((layer, primitive));
    }

    /// Returns the canvas width
    pub fn get_width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height
    pub fn get_height(&self) -> f32 {
        self.height
    }

    /// Returns every item in insertion order
    pub fn items(&self) -> &[(Layer, Primitive)] {
        &self.items
    }

    /// Returns the number of primitives
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the primitives on `layer` in insertion order
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Primitive> {
        self.items
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, p)| p)
    }

    /// Returns every item in painter's order. Items within a layer keep their insertion order.
    pub fn layered(&self) -> Vec<&(Layer, Primitive)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by_key(|(layer, _)| *layer);
        items
    }

    /// Clears `surface` and paints the whole scene on it
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        surface.resize(self.width, self.height);
        for (layer, primitive) in self.layered() {
            surface.draw(*layer, primitive);
        }
    }

    /// Serializes the scene to pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, crate::error::LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
