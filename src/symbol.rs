/*!

  Gate symbol silhouettes.

  Each gate kind maps to a [Symbol]: a body outline plus optional
  decorations (the second input curve of XOR, the inversion bubble). Outlines
  are path commands in a local frame whose origin is the top-left corner of a
  [SYMBOL_WIDTH] x [SYMBOL_HEIGHT] box. The renderer translates them onto the
  gate's column and lane.

*/

use crate::circuit::GateType;

/// Width of the symbol frame
pub const SYMBOL_WIDTH: f32 = 60.0;
/// Height of the symbol frame
pub const SYMBOL_HEIGHT: f32 = 50.0;
/// Distance from the gate's column back to the left edge of the frame
pub const SYMBOL_INSET_X: f32 = 22.0;
/// Radius of the inversion bubble
pub const BUBBLE_RADIUS: f32 = 6.0;

/// A path command for vector symbol rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub enum PathCmd {
    /// Move to (x, y) without drawing.
    MoveTo(f32, f32),
    /// Draw a line to (x, y).
    LineTo(f32, f32),
    /// Draw a quadratic curve with control point (cx, cy) ending at (x, y).
    QuadTo(f32, f32, f32, f32),
    /// Close the current sub-path.
    Close,
}

impl PathCmd {
    /// Returns the command shifted by (dx, dy)
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        match self {
            PathCmd::MoveTo(x, y) => PathCmd::MoveTo(x + dx, y + dy),
            PathCmd::LineTo(x, y) => PathCmd::LineTo(x + dx, y + dy),
            PathCmd::QuadTo(cx, cy, x, y) => PathCmd::QuadTo(cx + dx, cy + dy, x + dx, y + dy),
            PathCmd::Close => PathCmd::Close,
        }
    }
}

/// The outline family of a gate body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    /// Flat back, rounded front (AND family)
    FlatBack,
    /// Curved back, pointed front (OR family)
    CurvedBack,
    /// Buffer triangle
    Triangle,
    /// Rounded rectangle for anything without a dedicated shape
    Block,
}

/// The silhouette of one gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// The body outline
    pub body: Body,
    /// A second curve ahead of the body's back (XOR family)
    pub leading_curve: bool,
    /// An inversion bubble at the output
    pub bubble: bool,
}

impl Symbol {
    const fn new(body: Body, leading_curve: bool, bubble: bool) -> Self {
        Self {
            body,
            leading_curve,
            bubble,
        }
    }

    /// The closed body outline in the local frame.
    pub fn outline(&self) -> Vec<PathCmd> {
        match self.body {
            Body::FlatBack => flat_back_path(),
            Body::CurvedBack => curved_back_path(),
            Body::Triangle => triangle_path(),
            Body::Block => block_path(),
        }
    }

    /// The open second input curve, if the symbol has one.
    pub fn leading_curve_path(&self) -> Option<Vec<PathCmd>> {
        self.leading_curve.then(|| {
            vec![
                PathCmd::MoveTo(2.0, 0.0),
                PathCmd::QuadTo(8.0, SYMBOL_HEIGHT / 2.0, 2.0, SYMBOL_HEIGHT),
            ]
        })
    }

    /// The x where the body's output side is furthest right
    pub fn tip_x(&self) -> f32 {
        match self.body {
            Body::FlatBack | Body::CurvedBack => 60.0,
            Body::Triangle => 50.0,
            Body::Block => SYMBOL_WIDTH,
        }
    }

    /// Center of the inversion bubble in the local frame, if the symbol has one.
    pub fn bubble_center(&self) -> Option<(f32, f32)> {
        self.bubble
            .then(|| (self.tip_x() + BUBBLE_RADIUS, SYMBOL_HEIGHT / 2.0))
    }
}

/// Returns the silhouette for a gate kind.
pub fn symbol_for(gate_type: &GateType) -> Symbol {
    match gate_type {
        GateType::And => Symbol::new(Body::FlatBack, false, false),
        GateType::Nand => Symbol::new(Body::FlatBack, false, true),
        GateType::Or => Symbol::new(Body::CurvedBack, false, false),
        GateType::Nor => Symbol::new(Body::CurvedBack, false, true),
        GateType::Xor => Symbol::new(Body::CurvedBack, true, false),
        GateType::Xnor => Symbol::new(Body::CurvedBack, true, true),
        GateType::Not => Symbol::new(Body::Triangle, false, true),
        _ => Symbol::new(Body::Block, false, false),
    }
}

// ---------------------------------------------------------------------------
// Outlines
// ---------------------------------------------------------------------------

fn flat_back_path() -> Vec<PathCmd> {
    vec![
        PathCmd::MoveTo(0.0, 0.0),
        PathCmd::LineTo(50.0, 0.0),
        PathCmd::QuadTo(70.0, 25.0, 50.0, 50.0),
        PathCmd::LineTo(0.0, 50.0),
        PathCmd::Close,
    ]
}

fn curved_back_path() -> Vec<PathCmd> {
    vec![
        PathCmd::MoveTo(5.0, 0.0),
        PathCmd::QuadTo(15.0, 25.0, 5.0, 50.0),
        PathCmd::LineTo(50.0, 50.0),
        PathCmd::QuadTo(70.0, 25.0, 50.0, 0.0),
        PathCmd::Close,
    ]
}

fn triangle_path() -> Vec<PathCmd> {
    vec![
        PathCmd::MoveTo(0.0, 0.0),
        PathCmd::LineTo(0.0, 50.0),
        PathCmd::LineTo(50.0, 25.0),
        PathCmd::Close,
    ]
}

fn block_path() -> Vec<PathCmd> {
    let (w, h, r) = (SYMBOL_WIDTH, SYMBOL_HEIGHT, 5.0);
    vec![
        PathCmd::MoveTo(r, 0.0),
        PathCmd::LineTo(w - r, 0.0),
        PathCmd::QuadTo(w, 0.0, w, r),
        PathCmd::LineTo(w, h - r),
        PathCmd::QuadTo(w, h, w - r, h),
        PathCmd::LineTo(r, h),
        PathCmd::QuadTo(0.0, h, 0.0, h - r),
        PathCmd::LineTo(0.0, r),
        PathCmd::QuadTo(0.0, 0.0, r, 0.0),
        PathCmd::Close,
    ]
}
