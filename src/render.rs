/*!

  Turns a planned and routed netlist into a [Scene].

  Drawing happens in one walk over the netlist that replays the routing
  pass: the [LaneTracker](crate::routing::LaneTracker) is reset and every
  `(gate, input)` pair takes its lane again in the same order, so each drop
  line lands exactly on the tap the rail was extended to.

*/

use crate::config::RenderConfig;
use crate::error::LayoutError;
use crate::geometry::Geometry;
use crate::graph::Analyzed;
use crate::netlist::Gate;
use crate::routing::{self, Routing};
use crate::scene::{Anchor, Layer, Primitive, Scene};
use crate::symbol::{self, BUBBLE_RADIUS, PathCmd, SYMBOL_HEIGHT, SYMBOL_INSET_X};
use std::collections::HashMap;

/// Stroke width of rails and connectors
pub const WIRE_WIDTH: f32 = 3.0;
/// Radius of a tap dot
pub const TAP_RADIUS: f32 = 4.0;
/// Where input connectors end, left of the gate's column
pub const INPUT_PIN_GAP: f32 = 18.0;
/// Vertical spread of a gate's input pins around its lane
pub const INPUT_PIN_SPREAD: f32 = 20.0;
/// Start of the output stub, right of the gate's column
pub const OUTPUT_STUB_START: f32 = 25.0;
/// End of the output stub, right of the gate's column
pub const OUTPUT_STUB_END: f32 = 40.0;
/// The x of input labels, which are right-aligned
pub const INPUT_LABEL_X: f32 = 50.0;
/// The x of input pins
pub const INPUT_PIN_X: f32 = 55.0;
/// Gap between the output pins and their labels
pub const OUTPUT_LABEL_GAP: f32 = 14.0;

const LABEL_SIZE: f32 = 13.0;
const GLYPH_SIZE: f32 = 12.0;
const GATE_STROKE_WIDTH: f32 = 2.0;
const DOT_OUTLINE: &str = "#fff";

/// The y where input `index` of `count` meets a gate on lane `gate_y`
pub fn input_pin_y(gate_y: f32, index: usize, count: usize) -> f32 {
    if count <= 1 {
        return gate_y;
    }
    let step = INPUT_PIN_SPREAD / (count - 1) as f32;
    gate_y - INPUT_PIN_SPREAD / 2.0 + index as f32 * step
}

/// Gives every wire a palette color: primary inputs by name, then each gate's output in netlist order
fn assign_colors<'a, 'c>(
    analyzed: &Analyzed<'a>,
    config: &'c RenderConfig,
) -> Result<HashMap<&'a str, &'c str>, LayoutError> {
    let outputs = analyzed.get_netlist().iter().map(Gate::get_output);
    let mut colors = HashMap::new();
    for (ordinal, wire) in analyzed
        .primary_inputs()
        .iter()
        .copied()
        .chain(outputs)
        .enumerate()
    {
        let color = config.color_at(ordinal).ok_or(LayoutError::EmptyPalette)?;
        colors.insert(wire, color);
    }
    Ok(colors)
}

fn wire_line(x1: f32, y1: f32, x2: f32, y2: f32, color: &str, wire: &str) -> Primitive {
    Primitive::Line {
        x1,
        y1,
        x2,
        y2,
        stroke: color.to_string(),
        width: WIRE_WIDTH,
        wire: Some(wire.to_string()),
    }
}

fn label(x: f32, y: f32, text: &str, anchor: Anchor, fill: &str) -> Primitive {
    Primitive::Text {
        x,
        y: y + 5.0,
        content: text.to_string(),
        anchor,
        size: LABEL_SIZE,
        bold: true,
        fill: fill.to_string(),
    }
}

/// State shared by the drawing steps of one render
struct Painter<'r, 'a> {
    analyzed: &'r Analyzed<'a>,
    geometry: &'r Geometry<'a>,
    config: &'r RenderConfig,
    colors: HashMap<&'a str, &'r str>,
    scene: Scene,
}

impl<'r, 'a> Painter<'r, 'a> {
    fn color(&self, wire: &str) -> &'r str {
        // Every wire is colored, but keep drawing if one slipped through
        self.colors.get(wire).copied().unwrap_or("#999")
    }

    fn lane(&self, wire: &str) -> f32 {
        self.geometry.lane_of(wire).unwrap_or(0.0)
    }

    fn draw_rails(&mut self, routing: &Routing<'a>) {
        let mut drawn = 0;
        for wire in self.analyzed.wires() {
            let Some((start, end)) = routing.rail(wire) else {
                continue;
            };
            let y = self.lane(wire);
            let line = wire_line(start, y, end, y, self.color(wire), wire);
            self.scene.push(Layer::Rails, line);
            drawn += 1;
        }
        clilog::debug!("drew {} rails", drawn);
    }

    fn draw_connector(&mut self, wire: &str, tap_x: f32, pin_x: f32, pin_y: f32) {
        let color = self.color(wire);
        let rail_y = self.lane(wire);
        self.scene
            .push(Layer::Wires, wire_line(tap_x, rail_y, tap_x, pin_y, color, wire));
        self.scene
            .push(Layer::Wires, wire_line(tap_x, pin_y, pin_x, pin_y, color, wire));
        self.scene.push(
            Layer::Wires,
            Primitive::Circle {
                cx: tap_x,
                cy: rail_y,
                r: TAP_RADIUS,
                fill: color.to_string(),
                stroke: DOT_OUTLINE.to_string(),
                stroke_width: 1.5,
            },
        );
    }

    fn draw_symbol(&mut self, gate: &Gate, gate_x: f32, gate_y: f32) {
        let shape = symbol::symbol_for(gate.get_type());
        let style = self.config.symbols.style_for(gate.get_type());
        let (ox, oy) = (gate_x - SYMBOL_INSET_X, gate_y - SYMBOL_HEIGHT / 2.0);
        let place = |path: Vec<PathCmd>| -> Vec<PathCmd> {
            path.into_iter().map(|cmd| cmd.translate(ox, oy)).collect()
        };
        let stroke = &self.config.gate_stroke;

        self.scene.push(
            Layer::Gates,
            Primitive::Path {
                commands: place(shape.outline()),
                fill: Some(style.fill.clone()),
                stroke: stroke.clone(),
                stroke_width: GATE_STROKE_WIDTH,
            },
        );
        if let Some(curve) = shape.leading_curve_path() {
            self.scene.push(
                Layer::Gates,
                Primitive::Path {
                    commands: place(curve),
                    fill: None,
                    stroke: stroke.clone(),
                    stroke_width: GATE_STROKE_WIDTH,
                },
            );
        }
        if let Some((bx, by)) = shape.bubble_center() {
            self.scene.push(
                Layer::Gates,
                Primitive::Circle {
                    cx: ox + bx,
                    cy: oy + by,
                    r: BUBBLE_RADIUS,
                    fill: "none".to_string(),
                    stroke: stroke.clone(),
                    stroke_width: GATE_STROKE_WIDTH,
                },
            );
        }
        self.scene.push(
            Layer::Gates,
            Primitive::Text {
                x: ox + symbol::SYMBOL_WIDTH / 2.0,
                y: oy + 30.0,
                content: style.glyph.clone(),
                anchor: Anchor::Middle,
                size: GLYPH_SIZE,
                bold: true,
                fill: self.config.glyph_color.clone(),
            },
        );
    }

    fn draw_gates(&mut self, routing: &mut Routing<'a>) {
        let tracker = routing.tracker_mut();
        tracker.reset();

        for gate in self.analyzed.get_netlist() {
            if gate.is_identity() {
                continue;
            }
            if gate.get_type().is_unknown() {
                clilog::warn!(
                    "no symbol for gate type `{}` driving `{}`, drawing the fallback",
                    gate.get_type(),
                    gate.get_output()
                );
            }
            let depth = self.analyzed.depth_of(gate.get_output());
            let gate_x = self.geometry.depth_x(depth);
            let gate_y = self.lane(gate.get_output());
            let count = gate.get_inputs().len();

            for (index, wire) in gate.get_inputs().iter().enumerate() {
                let lane = tracker.next_lane(depth);
                let tap_x = routing::tap_x(gate_x, lane);
                let pin_y = input_pin_y(gate_y, index, count);
                self.draw_connector(wire, tap_x, gate_x - INPUT_PIN_GAP, pin_y);
            }

            self.draw_symbol(gate, gate_x, gate_y);

            let output = gate.get_output();
            let stub = wire_line(
                gate_x + OUTPUT_STUB_START,
                gate_y,
                gate_x + OUTPUT_STUB_END,
                gate_y,
                self.color(output),
                output,
            );
            self.scene.push(Layer::Wires, stub);
        }
    }

    fn draw_ports(&mut self) {
        for &input in self.analyzed.primary_inputs() {
            let y = self.lane(input);
            let color = self.color(input);
            self.scene.push(
                Layer::Ports,
                label(
                    INPUT_LABEL_X,
                    y,
                    input,
                    Anchor::End,
                    &self.config.input_label_color,
                ),
            );
            self.scene.push(
                Layer::Ports,
                Primitive::Circle {
                    cx: INPUT_PIN_X,
                    cy: y,
                    r: TAP_RADIUS,
                    fill: color.to_string(),
                    stroke: DOT_OUTLINE.to_string(),
                    stroke_width: 1.5,
                },
            );
        }

        let last_x = self.geometry.last_column_x();
        for output in self.analyzed.gate_outputs_sorted() {
            let y = self.lane(output);
            self.scene.push(
                Layer::Ports,
                Primitive::Circle {
                    cx: last_x,
                    cy: y,
                    r: 6.0,
                    fill: self.config.output_fill.clone(),
                    stroke: self.config.output_stroke.clone(),
                    stroke_width: 2.0,
                },
            );
            self.scene.push(
                Layer::Ports,
                label(
                    last_x + OUTPUT_LABEL_GAP,
                    y,
                    output,
                    Anchor::Start,
                    &self.config.output_stroke,
                ),
            );
        }
    }
}

/// Draws the analyzed netlist using the planned geometry and routing.
///
/// The routing's lane tracker is reset and replayed, so `routing` is left
/// holding the same lane counts it was computed with.
pub fn render<'a>(
    analyzed: &Analyzed<'a>,
    geometry: &Geometry<'a>,
    routing: &mut Routing<'a>,
    config: &RenderConfig,
) -> Result<Scene, LayoutError> {
    if analyzed.get_netlist().is_empty() {
        return Ok(Scene::empty());
    }
    let colors = assign_colors(analyzed, config)?;
    let mut painter = Painter {
        analyzed,
        geometry,
        config,
        colors,
        scene: Scene::new(geometry.get_width(), geometry.get_height()),
    };

    painter.draw_rails(routing);
    painter.draw_gates(routing);
    painter.draw_ports();

    clilog::debug!("scene has {} primitives", painter.scene.len());
    Ok(painter.scene)
}
