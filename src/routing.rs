/*!

  Tap points and rail extents.

  Every gate input drops off its producer's rail at a tap point left of the
  gate's column. Taps are staggered per depth: each `(gate, input)` pair takes
  the next lane of its gate's depth, in netlist order, so two drop lines at the
  same depth never share an x position.

*/

use crate::geometry::Geometry;
use crate::graph::Analyzed;
use std::collections::HashMap;

/// Offset of the first tap lane
pub const TAP_BASE_OFFSET: f32 = 20.0;
/// Distance between consecutive tap lanes of one depth
pub const TAP_LANE_SPACING: f32 = 30.0;
/// Distance kept between a gate's column and its nearest tap lane
pub const TAP_CLEARANCE: f32 = 40.0;
/// Rail start of a primary input, right of its label
pub const INPUT_RAIL_START: f32 = 55.0;
/// Gap between a producing column and the start of its rail
pub const RAIL_START_GAP: f32 = 12.0;

/// Hands out tap lanes, one counter per depth.
///
/// The counters are never reset per wire, only as a whole with
/// [LaneTracker::reset], so a second walk over the netlist in the same order
/// hands out exactly the same lanes.
#[derive(Debug, Clone, Default)]
pub struct LaneTracker {
    next: HashMap<usize, usize>,
}

impl LaneTracker {
    /// Creates a tracker with every counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next lane at `depth`
    pub fn next_lane(&mut self, depth: usize) -> usize {
        let counter = self.next.entry(depth).or_insert(0);
        let lane = *counter;
        *counter += 1;
        lane
    }

    /// Returns how many lanes have been handed out at `depth`
    pub fn used_at(&self, depth: usize) -> usize {
        self.next.get(&depth).copied().unwrap_or(0)
    }

    /// Puts every counter back to zero
    pub fn reset(&mut self) {
        self.next.clear();
    }
}

/// The lateral offset of tap lane `lane`
pub fn tap_offset(lane: usize) -> f32 {
    TAP_BASE_OFFSET + lane as f32 * TAP_LANE_SPACING
}

/// The x of tap lane `lane` for a gate in the column at `gate_x`
pub fn tap_x(gate_x: f32, lane: usize) -> f32 {
    gate_x - TAP_CLEARANCE - tap_offset(lane)
}

/// Where one gate input leaves its producer's rail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapPoint<'a> {
    /// The wire being tapped
    pub wire: &'a str,
    /// Index of the consuming gate in the netlist
    pub gate: usize,
    /// Index of the input on the consuming gate
    pub input: usize,
    /// Logic depth of the consuming gate
    pub depth: usize,
    /// Tap lane taken at that depth
    pub lane: usize,
    /// The x of the drop line
    pub x: f32,
}

/// Tap points and rail extents for every wire.
#[derive(Debug, Clone)]
pub struct Routing<'a> {
    points: Vec<TapPoint<'a>>,
    taps: HashMap<&'a str, Vec<f32>>,
    rail_start: HashMap<&'a str, f32>,
    rail_end: HashMap<&'a str, f32>,
    tracker: LaneTracker,
}

impl<'a> Routing<'a> {
    /// Returns the tap x of every gate input reading `wire`, in routing order
    pub fn get_taps(&self, wire: &str) -> &[f32] {
        self.taps.get(wire).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns every tap point in routing order
    pub fn get_tap_points(&self) -> &[TapPoint<'a>] {
        &self.points
    }

    /// Returns where the rail of `wire` starts
    pub fn get_rail_start(&self, wire: &str) -> Option<f32> {
        self.rail_start.get(wire).copied()
    }

    /// Returns where the rail of `wire` ends
    pub fn get_rail_end(&self, wire: &str) -> Option<f32> {
        self.rail_end.get(wire).copied()
    }

    /// Returns the `(start, end)` of the rail of `wire`, or [None] if it would not be visible
    pub fn rail(&self, wire: &str) -> Option<(f32, f32)> {
        let start = self.get_rail_start(wire)?;
        let end = self.get_rail_end(wire)?;
        (end > start).then_some((start, end))
    }

    /// Returns the lane tracker used to compute the taps.
    ///
    /// Reset it before walking the netlist again to reproduce the same lanes.
    pub fn tracker_mut(&mut self) -> &mut LaneTracker {
        &mut self.tracker
    }
}

/// Computes tap points and rail extents.
pub fn route<'a>(analyzed: &Analyzed<'a>, geometry: &Geometry<'a>) -> Routing<'a> {
    let netlist = analyzed.get_netlist();
    let mut tracker = LaneTracker::new();
    let mut points = Vec::new();
    let mut taps: HashMap<&'a str, Vec<f32>> = HashMap::new();

    for (index, gate) in netlist.iter().enumerate() {
        if gate.is_identity() {
            continue;
        }
        let depth = analyzed.depth_of(gate.get_output());
        let gate_x = geometry.depth_x(depth);
        for (input, wire) in gate.get_inputs().iter().enumerate() {
            let lane = tracker.next_lane(depth);
            let x = tap_x(gate_x, lane);
            taps.entry(wire.as_str()).or_default().push(x);
            points.push(TapPoint {
                wire: wire.as_str(),
                gate: index,
                input,
                depth,
                lane,
                x,
            });
        }
    }

    let mut rail_start = HashMap::new();
    let mut rail_end = HashMap::new();
    let last_x = geometry.last_column_x();

    for wire in analyzed.wires() {
        let producer_x = geometry.column_x(wire).unwrap_or(last_x);
        let start = if analyzed.drivers().is_gate_output(wire) {
            producer_x + RAIL_START_GAP
        } else {
            INPUT_RAIL_START
        };

        let end = if analyzed.drivers().is_gate_output(wire) || !analyzed.has_consumers(wire) {
            last_x
        } else {
            taps.get(wire)
                .and_then(|xs| xs.iter().copied().reduce(f32::max))
                .unwrap_or(producer_x)
        };

        rail_start.insert(wire, start);
        rail_end.insert(wire, end);
    }

    Routing {
        points,
        taps,
        rail_start,
        rail_end,
        tracker,
    }
}
