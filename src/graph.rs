/*!

  Analyses over a netlist: drivers, fan-out and logic depth.

*/

use crate::circuit::WireClass;
use crate::error::LayoutError;
use crate::netlist::{Gate, Netlist};
use bitvec::prelude::*;
#[cfg(feature = "graph")]
use crate::circuit::GateType;
#[cfg(feature = "graph")]
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
#[cfg(feature = "graph")]
use std::collections::HashSet;

/// A common trait of analyses that can be performed on a netlist.
/// Analyses borrow the netlist and are rebuilt for every layout.
pub trait Analysis<'a>
where
    Self: Sized + 'a,
{
    /// Construct the analysis to the current state of the netlist.
    fn build(netlist: &'a Netlist) -> Result<Self, LayoutError>;
}

impl Netlist {
    /// Builds the analysis `A` over this netlist.
    pub fn get_analysis<'a, A: Analysis<'a>>(&'a self) -> Result<A, LayoutError> {
        A::build(self)
    }
}

/// Maps every wire to the gate driving it and classifies the wires.
pub struct DriverTable<'a> {
    netlist: &'a Netlist,
    // Last writer wins on duplicate outputs
    producer_of: HashMap<&'a str, usize>,
    // Sorted by name
    primary_inputs: Vec<&'a str>,
    // Distinct, in order of first appearance
    gate_outputs: Vec<&'a str>,
}

impl<'a> DriverTable<'a> {
    /// Returns the index of the gate driving `wire`
    pub fn get_producer_index(&self, wire: &str) -> Option<usize> {
        self.producer_of.get(wire).copied()
    }

    /// Returns the gate driving `wire`
    pub fn get_producer(&self, wire: &str) -> Option<&'a Gate> {
        self.get_producer_index(wire)
            .and_then(|index| self.netlist.get_gate(index))
    }

    /// Returns `true` if no gate drives `wire` but some gate reads it
    pub fn is_primary_input(&self, wire: &str) -> bool {
        self.primary_inputs
            .binary_search_by(|probe| (*probe).cmp(wire))
            .is_ok()
    }

    /// Returns `true` if some gate drives `wire`
    pub fn is_gate_output(&self, wire: &str) -> bool {
        self.producer_of.contains_key(wire)
    }

    /// Returns the primary inputs, sorted by name
    pub fn primary_inputs(&self) -> &[&'a str] {
        &self.primary_inputs
    }

    /// Returns every distinct gate output in order of first appearance.
    /// This includes outputs that other gates consume.
    pub fn gate_outputs(&self) -> &[&'a str] {
        &self.gate_outputs
    }
}

impl<'a> Analysis<'a> for DriverTable<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self, LayoutError> {
        let mut producer_of: HashMap<&'a str, usize> = HashMap::new();
        let mut gate_outputs = Vec::new();

        for (index, gate) in netlist.iter().enumerate() {
            let output = gate.get_output();
            if let Some(previous) = producer_of.insert(output, index) {
                clilog::debug!(
                    "wire `{}` is driven by gates {} and {}, keeping the later one",
                    output,
                    previous,
                    index
                );
            } else {
                gate_outputs.push(output);
            }
        }

        let mut primary_inputs: Vec<&'a str> = netlist
            .iter()
            .flat_map(|gate| gate.get_inputs().iter().map(String::as_str))
            .filter(|wire| !producer_of.contains_key(wire))
            .collect();
        primary_inputs.sort_unstable();
        primary_inputs.dedup();

        Ok(DriverTable {
            netlist,
            producer_of,
            primary_inputs,
            gate_outputs,
        })
    }
}

/// A table that maps wires to the gate inputs they feed
pub struct FanOutTable<'a> {
    // A reference to the underlying netlist
    _netlist: &'a Netlist,
    // Maps a wire to (gate index, input index) pairs in netlist order
    wire_fan_out: HashMap<&'a str, Vec<(usize, usize)>>,
}

impl FanOutTable<'_> {
    /// Returns an iterator to the `(gate index, input index)` pairs that read `wire`.
    pub fn get_wire_users(&self, wire: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.wire_fan_out
            .get(wire)
            .into_iter()
            .flat_map(|users| users.iter().copied())
    }

    /// Returns `true` if any gate reads `wire`
    pub fn wire_has_uses(&self, wire: &str) -> bool {
        self.wire_fan_out
            .get(wire)
            .is_some_and(|users| !users.is_empty())
    }
}

impl<'a> Analysis<'a> for FanOutTable<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self, LayoutError> {
        let mut wire_fan_out: HashMap<&'a str, Vec<(usize, usize)>> = HashMap::new();

        for (gate_index, gate) in netlist.iter().enumerate() {
            for (input_index, wire) in gate.get_inputs().iter().enumerate() {
                wire_fan_out
                    .entry(wire.as_str())
                    .or_default()
                    .push((gate_index, input_index));
            }
        }

        Ok(FanOutTable {
            _netlist: netlist,
            wire_fan_out,
        })
    }
}

/// The logic depth of every wire.
/// Primary inputs sit at depth 0 and a gate output sits one level past its deepest input.
/// This analysis checks for cycles.
pub struct CombDepth<'a> {
    // A reference to the underlying netlist
    _netlist: &'a Netlist,
    // Maps a wire to its logic level as a DAG
    comb_depth: HashMap<&'a str, usize>,
    /// The maximum depth of the circuit
    max_depth: usize,
}

impl<'a> CombDepth<'a> {
    /// Returns the logic level of a wire in the circuit.
    pub fn get_comb_depth(&self, wire: &str) -> Option<usize> {
        self.comb_depth.get(wire).copied()
    }

    /// Returns the maximum logic level of the circuit.
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    /// Computes depths using an already built driver table.
    ///
    /// The traversal keeps its own stack, so deep netlists cannot exhaust the
    /// call stack. A gate that is reached again while one of its inputs is
    /// still being resolved closes a cycle.
    pub fn from_drivers(netlist: &'a Netlist, drivers: &DriverTable<'a>) -> Result<Self, LayoutError> {
        let gates = netlist.gates();
        let mut comb_depth: HashMap<&'a str, usize> = HashMap::new();
        let mut visiting = bitvec![0; gates.len()];

        for &root in drivers.gate_outputs() {
            let mut stack: Vec<(&'a str, bool)> = vec![(root, false)];
            while let Some((wire, expanded)) = stack.pop() {
                if comb_depth.contains_key(wire) {
                    continue;
                }

                let Some(index) = drivers.get_producer_index(wire) else {
                    comb_depth.insert(wire, 0);
                    continue;
                };
                let gate = &gates[index];

                if expanded {
                    let deepest = gate
                        .get_inputs()
                        .iter()
                        .filter_map(|input| comb_depth.get(input.as_str()))
                        .max()
                        .copied()
                        .unwrap_or(0);
                    comb_depth.insert(wire, deepest + 1);
                    visiting.set(index, false);
                    continue;
                }

                if visiting[index] {
                    return Err(LayoutError::CyclicDependency {
                        wire: wire.to_string(),
                    });
                }
                visiting.set(index, true);
                stack.push((wire, true));
                for input in gate.get_inputs().iter().rev() {
                    if !comb_depth.contains_key(input.as_str()) {
                        stack.push((input.as_str(), false));
                    }
                }
            }
        }

        for &input in drivers.primary_inputs() {
            comb_depth.entry(input).or_insert(0);
        }

        let max_depth = drivers
            .gate_outputs()
            .iter()
            .filter_map(|wire| comb_depth.get(wire))
            .max()
            .copied()
            .unwrap_or(0);

        Ok(CombDepth {
            _netlist: netlist,
            comb_depth,
            max_depth,
        })
    }
}

impl<'a> Analysis<'a> for CombDepth<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self, LayoutError> {
        let drivers = DriverTable::build(netlist)?;
        Self::from_drivers(netlist, &drivers)
    }
}

/// Everything the layout stages need to know about a netlist's structure.
pub struct Analyzed<'a> {
    netlist: &'a Netlist,
    drivers: DriverTable<'a>,
    fan_out: FanOutTable<'a>,
    depth: CombDepth<'a>,
}

impl<'a> Analyzed<'a> {
    /// Returns the netlist this analysis was built from
    pub fn get_netlist(&self) -> &'a Netlist {
        self.netlist
    }

    /// Returns the driver table
    pub fn drivers(&self) -> &DriverTable<'a> {
        &self.drivers
    }

    /// Returns the fan-out table
    pub fn fan_out(&self) -> &FanOutTable<'a> {
        &self.fan_out
    }

    /// Returns the logic depth of `wire`. Wires the netlist never mentions sit at depth 0.
    pub fn depth_of(&self, wire: &str) -> usize {
        self.depth.get_comb_depth(wire).unwrap_or(0)
    }

    /// Returns the deepest logic level of any gate output
    pub fn get_max_depth(&self) -> usize {
        self.depth.get_max_depth()
    }

    /// Returns the primary inputs, sorted by name
    pub fn primary_inputs(&self) -> &[&'a str] {
        self.drivers.primary_inputs()
    }

    /// Returns every distinct gate output in order of first appearance
    pub fn gate_outputs(&self) -> &[&'a str] {
        self.drivers.gate_outputs()
    }

    /// Returns every gate output sorted by name, the order output ports are listed in
    pub fn gate_outputs_sorted(&self) -> Vec<&'a str> {
        let mut outputs = self.gate_outputs().to_vec();
        outputs.sort_unstable();
        outputs
    }

    /// Returns every wire once: the primary inputs by name, then the gate outputs in order of first appearance
    pub fn wires(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.primary_inputs()
            .iter()
            .chain(self.gate_outputs().iter())
            .copied()
    }

    /// Returns `true` if some gate reads `wire`
    pub fn has_consumers(&self, wire: &str) -> bool {
        self.fan_out.wire_has_uses(wire)
    }

    /// Classifies `wire` by how the netlist drives and reads it
    pub fn classify(&self, wire: &str) -> WireClass {
        match (self.drivers.is_gate_output(wire), self.has_consumers(wire)) {
            (true, true) => WireClass::InternalNet,
            (true, false) => WireClass::GateOutput,
            (false, true) => WireClass::PrimaryInput,
            (false, false) => WireClass::Unconnected,
        }
    }
}

impl<'a> Analysis<'a> for Analyzed<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self, LayoutError> {
        let drivers = DriverTable::build(netlist)?;
        let fan_out = FanOutTable::build(netlist)?;
        let depth = CombDepth::from_drivers(netlist, &drivers)?;

        clilog::debug!(
            "analyzed {} gates: {} primary inputs, {} gate outputs, max depth {}",
            netlist.len(),
            drivers.primary_inputs().len(),
            drivers.gate_outputs().len(),
            depth.get_max_depth()
        );

        Ok(Analyzed {
            netlist,
            drivers,
            fan_out,
            depth,
        })
    }
}

/// A petgraph view of the netlist with one node per wire and one edge per gate input.
#[cfg(feature = "graph")]
pub struct WireGraph<'a> {
    _netlist: &'a Netlist,
    graph: DiGraph<&'a str, GateType>,
}

#[cfg(feature = "graph")]
impl<'a> WireGraph<'a> {
    /// Return a reference to the graph constructed by this analysis
    pub fn get_graph(&self) -> &DiGraph<&'a str, GateType> {
        &self.graph
    }

    /// Returns `true` if some wire depends on itself
    pub fn is_cyclic(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.graph)
    }
}

#[cfg(feature = "graph")]
impl<'a> Analysis<'a> for WireGraph<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self, LayoutError> {
        let drivers = DriverTable::build(netlist)?;
        let mut mapping: HashMap<&'a str, NodeIndex> = HashMap::new();
        let mut graph = DiGraph::new();

        for &wire in drivers.primary_inputs().iter().chain(drivers.gate_outputs()) {
            mapping.insert(wire, graph.add_node(wire));
        }

        let mut seen = HashSet::new();
        for gate in netlist {
            let target = mapping[gate.get_output()];
            for input in gate.get_inputs() {
                let source = mapping[input.as_str()];
                if seen.insert((source, target)) {
                    graph.add_edge(source, target, gate.get_type().clone());
                }
            }
        }

        Ok(Self {
            _netlist: netlist,
            graph,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::Gate;

    fn ripple_carry() -> Netlist {
        let mut netlist = Netlist::new();
        let mut carry = "cin".to_string();
        for i in 0..4 {
            let (a, b) = (format!("a{i}"), format!("b{i}"));
            let (p, g) = (format!("p{i}"), format!("g{i}"));
            let (t, c) = (format!("t{i}"), format!("c{i}"));
            netlist.push(Gate::of("XOR", &[a.as_str(), b.as_str()], p.as_str()));
            netlist.push(Gate::of("AND", &[a.as_str(), b.as_str()], g.as_str()));
            netlist.push(Gate::of("XOR", &[p.as_str(), carry.as_str()], format!("s{i}").as_str()));
            netlist.push(Gate::of("AND", &[p.as_str(), carry.as_str()], t.as_str()));
            netlist.push(Gate::of("OR", &[g.as_str(), t.as_str()], c.as_str()));
            carry = c;
        }
        netlist
    }

    #[test]
    fn fanout_table() {
        let netlist = ripple_carry();
        let analysis = FanOutTable::build(&netlist);
        assert!(analysis.is_ok());
        let analysis = analysis.unwrap();

        // Propagate bits feed the sum and the carry AND
        let users: Vec<_> = analysis.get_wire_users("p0").collect();
        assert_eq!(users, vec![(2, 0), (3, 0)]);

        // Sum bits are direct outputs
        for i in 0..4 {
            assert!(!analysis.wire_has_uses(&format!("s{i}")));
        }
        assert!(!analysis.wire_has_uses("c3"));
        assert!(analysis.wire_has_uses("c2"));
    }

    #[test]
    fn driver_table_classes() {
        let netlist = ripple_carry();
        let drivers = DriverTable::build(&netlist).unwrap();
        assert_eq!(drivers.primary_inputs().len(), 9);
        assert_eq!(drivers.primary_inputs()[0], "a0");
        assert!(drivers.is_primary_input("cin"));
        assert!(!drivers.is_primary_input("c0"));
        assert_eq!(drivers.gate_outputs().len(), netlist.len());
        assert_eq!(drivers.get_producer("g1").unwrap().get_type().get_name(), "AND");
    }

    #[test]
    fn comb_depth_follows_the_carry_chain() {
        let netlist = ripple_carry();
        let depth = netlist.get_analysis::<CombDepth>().unwrap();
        assert_eq!(depth.get_comb_depth("cin"), Some(0));
        assert_eq!(depth.get_comb_depth("p0"), Some(1));
        assert_eq!(depth.get_comb_depth("t0"), Some(2));
        assert_eq!(depth.get_comb_depth("c0"), Some(3));
        assert_eq!(depth.get_comb_depth("c3"), Some(9));
        assert_eq!(depth.get_comb_depth("s3"), Some(8));
        assert_eq!(depth.get_max_depth(), 9);
    }

    #[test]
    fn depth_law_holds_for_every_gate() {
        let netlist = ripple_carry();
        let depth = netlist.get_analysis::<CombDepth>().unwrap();
        for gate in &netlist {
            let deepest = gate
                .get_inputs()
                .iter()
                .map(|i| depth.get_comb_depth(i).unwrap())
                .max()
                .unwrap();
            assert_eq!(depth.get_comb_depth(gate.get_output()), Some(deepest + 1));
        }
    }

    #[test]
    fn constant_without_inputs_sits_at_depth_one() {
        let netlist = Netlist::new().with_gate(Gate::of("CONSTANT", &[] as &[&str], "k"));
        let depth = netlist.get_analysis::<CombDepth>().unwrap();
        assert_eq!(depth.get_comb_depth("k"), Some(1));
    }

    #[test]
    fn detect_cycles() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("AND", &["a", "q"], "p"))
            .with_gate(Gate::of("NOT", &["p"], "q"));
        let err = netlist.get_analysis::<CombDepth>().err().unwrap();
        assert!(matches!(err, LayoutError::CyclicDependency { .. }));
    }

    #[test]
    fn detect_self_loop() {
        let netlist = Netlist::new().with_gate(Gate::of("OR", &["a", "y"], "y"));
        let err = netlist.get_analysis::<Analyzed>().err().unwrap();
        assert!(matches!(err, LayoutError::CyclicDependency { wire } if wire == "y"));
    }

    #[test]
    fn shared_inputs_are_not_cycles() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("AND", &["a", "b"], "x"))
            .with_gate(Gate::of("OR", &["x", "x"], "y"))
            .with_gate(Gate::of("XOR", &["x", "y"], "z"));
        let depth = netlist.get_analysis::<CombDepth>().unwrap();
        assert_eq!(depth.get_comb_depth("z"), Some(3));
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let mut netlist = Netlist::new();
        let mut prev = "x0".to_string();
        for i in 1..=20_000 {
            let next = format!("x{i}");
            netlist.push(Gate::of("NOT", &[prev.as_str()], next.as_str()));
            prev = next;
        }
        let depth = netlist.get_analysis::<CombDepth>().unwrap();
        assert_eq!(depth.get_max_depth(), 20_000);
    }

    #[test]
    fn last_writer_wins() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("AND", &["a", "b"], "y"))
            .with_gate(Gate::of("NOT", &["c"], "y"));
        let drivers = DriverTable::build(&netlist).unwrap();
        assert_eq!(drivers.get_producer_index("y"), Some(1));
        assert_eq!(drivers.gate_outputs(), ["y"]);
        // `a` and `b` are still read by the shadowed gate
        assert_eq!(drivers.primary_inputs(), ["a", "b", "c"]);
    }

    #[test]
    fn classify_wires() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("AND", &["a", "b"], "x"))
            .with_gate(Gate::of("NOT", &["x"], "y"));
        let analyzed = netlist.get_analysis::<Analyzed>().unwrap();
        assert_eq!(analyzed.classify("a"), WireClass::PrimaryInput);
        assert_eq!(analyzed.classify("x"), WireClass::InternalNet);
        assert_eq!(analyzed.classify("y"), WireClass::GateOutput);
        assert_eq!(analyzed.classify("nope"), WireClass::Unconnected);
        let wires: Vec<_> = analyzed.wires().collect();
        assert_eq!(wires, vec!["a", "b", "x", "y"]);
    }
}
