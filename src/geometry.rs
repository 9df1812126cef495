/*!

  Canvas extents, columns and lanes.

  Columns are indexed by logic depth: column 0 holds the primary inputs and
  one trailing column past the deepest gate holds the output pins. Lanes are
  y-coordinates spread evenly across a common vertical band, once for the
  primary inputs and once per depth for the gate outputs.

*/

use crate::graph::Analyzed;
use std::collections::HashMap;

/// The narrowest canvas ever produced
pub const MIN_WIDTH: f32 = 1400.0;
/// The shortest canvas ever produced
pub const MIN_HEIGHT: f32 = 800.0;
/// Horizontal room reserved per gate
pub const GATE_PITCH_X: f32 = 200.0;
/// Vertical room reserved per gate or input
pub const LANE_PITCH_Y: f32 = 120.0;
/// The x of column 0
pub const LEFT_MARGIN: f32 = 60.0;
/// Space kept free to the right of the last column, for output labels
pub const RIGHT_RESERVE: f32 = 140.0;
/// Top edge of the lane band
pub const TOP_MARGIN: f32 = 60.0;
/// Space below the lane band
pub const BOTTOM_MARGIN: f32 = 60.0;
/// Gap between the lane band and the first fallback lane
pub const FALLBACK_GAP: f32 = 20.0;
/// Distance between consecutive fallback lanes
pub const FALLBACK_STEP: f32 = 24.0;

/// Where every wire of a netlist sits on the canvas.
#[derive(Debug, Clone)]
pub struct Geometry<'a> {
    columns: Vec<f32>,
    column_of: HashMap<&'a str, usize>,
    lane_y: HashMap<&'a str, f32>,
    width: f32,
    height: f32,
}

impl<'a> Geometry<'a> {
    /// Returns the x of every column, left to right
    pub fn get_columns(&self) -> &[f32] {
        &self.columns
    }

    /// Returns the canvas width
    pub fn get_width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height
    pub fn get_height(&self) -> f32 {
        self.height
    }

    /// Returns the x of the rightmost column, where output pins sit
    pub fn last_column_x(&self) -> f32 {
        self.columns.last().copied().unwrap_or(LEFT_MARGIN)
    }

    /// Returns the column index of `wire`
    pub fn column_index_of(&self, wire: &str) -> Option<usize> {
        self.column_of.get(wire).copied()
    }

    /// Returns the x of the column that produces `wire`
    pub fn column_x(&self, wire: &str) -> Option<f32> {
        self.column_index_of(wire)
            .and_then(|c| self.columns.get(c))
            .copied()
    }

    /// Returns the x of the column for logic depth `depth`, clamped to the last column
    pub fn depth_x(&self, depth: usize) -> f32 {
        let last = self.columns.len().saturating_sub(1);
        self.columns
            .get(depth.min(last))
            .copied()
            .unwrap_or(LEFT_MARGIN)
    }

    /// Returns the lane (y) of `wire`
    pub fn lane_of(&self, wire: &str) -> Option<f32> {
        self.lane_y.get(wire).copied()
    }
}

/// The canvas size for a netlist with `gate_count` gates and `input_count` primary inputs.
///
/// The extents depend on the counts only, so very wide but shallow netlists can
/// still overflow vertically.
pub fn canvas_size(gate_count: usize, input_count: usize) -> (f32, f32) {
    let width = MIN_WIDTH.max(gate_count as f32 * GATE_PITCH_X + 400.0);
    let height = MIN_HEIGHT.max(gate_count.max(input_count) as f32 * LANE_PITCH_Y + 200.0);
    (width, height)
}

/// The x of every column for a canvas `width` wide and a netlist `max_depth` deep.
pub fn column_positions(width: f32, max_depth: usize) -> Vec<f32> {
    let total = (max_depth + 2).max(1);
    let spacing = (width - RIGHT_RESERVE) / (total - 1).max(1) as f32;
    (0..total)
        .map(|c| LEFT_MARGIN + c as f32 * spacing)
        .collect()
}

/// A vertical band that spreads `n` lanes evenly between its edges
struct Band {
    top: f32,
    height: f32,
}

impl Band {
    fn for_canvas(height: f32) -> Self {
        Self {
            top: TOP_MARGIN,
            height: (height - TOP_MARGIN - BOTTOM_MARGIN).max(200.0),
        }
    }

    fn lane(&self, index: usize, count: usize) -> f32 {
        let spacing = self.height / (count.max(1) + 1) as f32;
        self.top + (index + 1) as f32 * spacing
    }

    fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Places every wire of the analyzed netlist.
pub fn plan<'a>(analyzed: &Analyzed<'a>) -> Geometry<'a> {
    let netlist = analyzed.get_netlist();
    let inputs = analyzed.primary_inputs();
    let max_depth = analyzed.get_max_depth();

    let (width, height) = canvas_size(netlist.len(), inputs.len());
    let columns = column_positions(width, max_depth);
    let last_column = columns.len() - 1;
    let band = Band::for_canvas(height);

    let mut column_of: HashMap<&'a str, usize> = HashMap::new();
    let mut lane_y: HashMap<&'a str, f32> = HashMap::new();

    for (i, &input) in inputs.iter().enumerate() {
        column_of.insert(input, 0);
        lane_y.insert(input, band.lane(i, inputs.len()));
    }

    // Gate outputs, grouped by depth in netlist order
    let mut by_depth: Vec<Vec<&'a str>> = vec![Vec::new(); max_depth + 1];
    for gate in netlist {
        let output = gate.get_output();
        let depth = analyzed.depth_of(output);
        column_of.insert(output, depth.min(last_column));
        if let Some(group) = by_depth.get_mut(depth) {
            group.push(output);
        }
    }
    for group in by_depth.iter().skip(1) {
        for (i, &output) in group.iter().enumerate() {
            lane_y.insert(output, band.lane(i, group.len()));
        }
    }

    // Pass-through gates continue their input's rail. A chain resolves from its
    // shallowest link, whatever order the netlist lists it in.
    let mut identities: Vec<_> = netlist.iter().filter(|g| g.is_identity()).collect();
    identities.sort_by_key(|g| analyzed.depth_of(g.get_output()));
    for gate in identities {
        let [input] = gate.get_inputs() else {
            continue;
        };
        if let (Some(y), Some(column)) = (
            lane_y.get(input.as_str()).copied(),
            column_of.get(input.as_str()).copied(),
        ) {
            lane_y.insert(gate.get_output(), y);
            column_of.insert(gate.get_output(), column);
        }
    }

    let mut fallback = band.bottom() + FALLBACK_GAP;
    for wire in analyzed.wires() {
        column_of
            .entry(wire)
            .or_insert_with(|| analyzed.depth_of(wire).min(last_column));
        if !lane_y.contains_key(wire) {
            clilog::debug!("wire `{}` has no lane, stacking it below the band", wire);
            lane_y.insert(wire, fallback);
            fallback += FALLBACK_STEP;
        }
    }

    clilog::debug!(
        "planned a {}x{} canvas with {} columns",
        width,
        height,
        columns.len()
    );

    Geometry {
        columns,
        column_of,
        lane_y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::{Gate, Netlist};

    #[test]
    fn canvas_has_a_floor() {
        assert_eq!(canvas_size(0, 0), (1400.0, 800.0));
        assert_eq!(canvas_size(1, 2), (1400.0, 800.0));
        assert_eq!(canvas_size(10, 3), (2400.0, 1400.0));
        assert_eq!(canvas_size(2, 9), (1400.0, 1280.0));
    }

    #[test]
    fn columns_are_evenly_spaced() {
        let columns = column_positions(1400.0, 1);
        assert_eq!(columns, vec![60.0, 690.0, 1320.0]);
        let columns = column_positions(1400.0, 0);
        assert_eq!(columns, vec![60.0, 1320.0]);
    }

    #[test]
    fn inputs_share_the_band() {
        let netlist = Netlist::new().with_gate(Gate::of("AND", &["b", "a", "c"], "y"));
        let analyzed = netlist.get_analysis::<Analyzed>().unwrap();
        let geometry = plan(&analyzed);

        // band is 60..740, four slots
        assert_eq!(geometry.lane_of("a"), Some(230.0));
        assert_eq!(geometry.lane_of("b"), Some(400.0));
        assert_eq!(geometry.lane_of("c"), Some(570.0));
        assert_eq!(geometry.lane_of("y"), Some(400.0));
        assert_eq!(geometry.column_index_of("a"), Some(0));
        assert_eq!(geometry.column_index_of("y"), Some(1));
        assert_eq!(geometry.column_x("y"), Some(690.0));
    }

    #[test]
    fn gates_at_the_same_depth_stack() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("AND", &["a", "b"], "x"))
            .with_gate(Gate::of("OR", &["a", "b"], "z"))
            .with_gate(Gate::of("XOR", &["x", "z"], "w"));
        let analyzed = netlist.get_analysis::<Analyzed>().unwrap();
        let geometry = plan(&analyzed);
        let x = geometry.lane_of("x").unwrap();
        let z = geometry.lane_of("z").unwrap();
        assert!(x < z);
        assert_eq!(geometry.column_index_of("x"), geometry.column_index_of("z"));
        assert_eq!(geometry.column_index_of("w"), Some(2));
        assert_eq!(geometry.get_columns().len(), 4);
    }

    #[test]
    fn identity_continues_its_input() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("NOT", &["a"], "n"))
            .with_gate(Gate::of("IDENTITY", &["n"], "m"))
            .with_gate(Gate::of("ID", &["m"], "k"));
        let analyzed = netlist.get_analysis::<Analyzed>().unwrap();
        let geometry = plan(&analyzed);
        for wire in ["m", "k"] {
            assert_eq!(geometry.lane_of(wire), geometry.lane_of("n"));
            assert_eq!(geometry.column_index_of(wire), geometry.column_index_of("n"));
        }
        // Depth still advances through pass-through gates
        assert_eq!(analyzed.depth_of("k"), 3);
        assert_eq!(geometry.get_columns().len(), 5);
    }

    #[test]
    fn identity_chain_listed_backwards() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("NOT", &["a"], "n"))
            .with_gate(Gate::of("AND", &["a", "b"], "z"))
            .with_gate(Gate::of("ID", &["m"], "k"))
            .with_gate(Gate::of("ID", &["n"], "m"));
        let analyzed = netlist.get_analysis::<Analyzed>().unwrap();
        let geometry = plan(&analyzed);
        for wire in ["m", "k"] {
            assert_eq!(geometry.lane_of(wire), geometry.lane_of("n"));
            assert_eq!(geometry.column_index_of(wire), Some(1));
        }
    }

    #[test]
    fn every_wire_gets_a_lane() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("AND", &["a", "b"], "x"))
            .with_gate(Gate::of("NOT", &["x"], "y"))
            .with_gate(Gate::of("MUX", &["x", "s", "y"], "q"));
        let analyzed = netlist.get_analysis::<Analyzed>().unwrap();
        let geometry = plan(&analyzed);
        for wire in analyzed.wires() {
            let y = geometry.lane_of(wire).unwrap();
            assert!((TOP_MARGIN..=geometry.get_height() - BOTTOM_MARGIN).contains(&y));
            assert!(geometry.column_x(wire).is_some());
        }
    }
}
