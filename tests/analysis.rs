use gate_schematic::circuit::WireClass;
use gate_schematic::error::LayoutError;
use gate_schematic::geometry;
use gate_schematic::graph::{Analyzed, CombDepth, DriverTable, FanOutTable};
use gate_schematic::netlist::{Gate, Netlist};

fn get_simple_example() -> Netlist {
    Netlist::new().with_gate(Gate::of("AND", &["a", "b"], "y"))
}

fn get_two_level_example() -> Netlist {
    Netlist::new()
        .with_gate(Gate::of("AND", &["a", "b"], "x"))
        .with_gate(Gate::of("OR", &["c", "d"], "z"))
        .with_gate(Gate::of("XOR", &["x", "z"], "w"))
}

fn full_adder_chain(bits: usize) -> Netlist {
    let mut netlist = Netlist::new();
    let mut carry = "cin".to_string();
    for i in 0..bits {
        let (a, b) = (format!("a{i}"), format!("b{i}"));
        let p = format!("p{i}");
        let g = format!("g{i}");
        let t = format!("t{i}");
        netlist.push(Gate::of("XOR", &[a.as_str(), b.as_str()], p.as_str()));
        netlist.push(Gate::of("AND", &[a.as_str(), b.as_str()], g.as_str()));
        netlist.push(Gate::of("XOR", &[p.as_str(), carry.as_str()], format!("s{i}").as_str()));
        netlist.push(Gate::of("AND", &[p.as_str(), carry.as_str()], t.as_str()));
        let next = format!("c{}", i + 1);
        netlist.push(Gate::of("OR", &[g.as_str(), t.as_str()], next.as_str()));
        carry = next;
    }
    netlist
}

#[test]
fn test_simple_depths() {
    let netlist = get_simple_example();
    let analyzed = netlist.get_analysis::<Analyzed>().unwrap();

    assert_eq!(analyzed.primary_inputs(), ["a", "b"]);
    assert_eq!(analyzed.gate_outputs(), ["y"]);
    assert_eq!(analyzed.depth_of("a"), 0);
    assert_eq!(analyzed.depth_of("b"), 0);
    assert_eq!(analyzed.depth_of("y"), 1);
    assert_eq!(analyzed.get_max_depth(), 1);
}

#[test]
fn test_two_level_depths() {
    let netlist = get_two_level_example();
    let analyzed = netlist.get_analysis::<Analyzed>().unwrap();

    for wire in ["a", "b", "c", "d"] {
        assert_eq!(analyzed.depth_of(wire), 0);
    }
    assert_eq!(analyzed.depth_of("x"), 1);
    assert_eq!(analyzed.depth_of("z"), 1);
    assert_eq!(analyzed.depth_of("w"), 2);
    assert_eq!(analyzed.get_max_depth(), 2);

    let geometry = geometry::plan(&analyzed);
    assert_eq!(geometry.get_columns(), [60.0, 480.0, 900.0, 1320.0]);
}

#[test]
fn test_depth_law() {
    let netlist = full_adder_chain(6);
    let analyzed = netlist.get_analysis::<Analyzed>().unwrap();
    let depths = netlist.get_analysis::<CombDepth>().unwrap();

    for gate in &netlist {
        let expected = gate
            .get_inputs()
            .iter()
            .map(|i| analyzed.depth_of(i))
            .max()
            .map_or(1, |d| d + 1);
        assert_eq!(analyzed.depth_of(gate.get_output()), expected);
        assert_eq!(depths.get_comb_depth(gate.get_output()), Some(expected));
    }
    // The carry gains two levels per bit
    assert_eq!(analyzed.depth_of("c6"), 13);
}

#[test]
fn test_detect_cycles() {
    let netlist = Netlist::new()
        .with_gate(Gate::of("AND", &["a", "q"], "p"))
        .with_gate(Gate::of("NOT", &["p"], "q"));

    let result = netlist.get_analysis::<Analyzed>();
    assert!(matches!(
        result,
        Err(LayoutError::CyclicDependency { .. })
    ));

    // The driver and fan-out tables do not care about cycles
    assert!(netlist.get_analysis::<DriverTable>().is_ok());
    assert!(netlist.get_analysis::<FanOutTable>().is_ok());
}

#[test]
fn test_wire_classes() {
    let netlist = get_two_level_example();
    let analyzed = netlist.get_analysis::<Analyzed>().unwrap();

    assert_eq!(analyzed.classify("a"), WireClass::PrimaryInput);
    assert_eq!(analyzed.classify("x"), WireClass::InternalNet);
    assert_eq!(analyzed.classify("w"), WireClass::GateOutput);
    assert_eq!(analyzed.classify("nowhere"), WireClass::Unconnected);

    // Internal nets are listed with the outputs
    assert_eq!(analyzed.gate_outputs_sorted(), ["w", "x", "z"]);
}

#[test]
fn test_fan_out() {
    let netlist = full_adder_chain(2);
    let fan_out = netlist.get_analysis::<FanOutTable>().unwrap();

    let users: Vec<_> = fan_out.get_wire_users("p0").collect();
    assert_eq!(users, [(2, 0), (3, 0)]);
    assert!(fan_out.wire_has_uses("c1"));
    assert!(!fan_out.wire_has_uses("c2"));
}

#[test]
fn test_duplicate_driver_last_writer_wins() {
    let netlist = Netlist::new()
        .with_gate(Gate::of("AND", &["a", "b"], "y"))
        .with_gate(Gate::of("NOT", &["y"], "n"))
        .with_gate(Gate::of("OR", &["n", "c"], "y"));
    let drivers = netlist.get_analysis::<DriverTable>().unwrap();
    assert_eq!(drivers.get_producer_index("y"), Some(2));
}

#[test]
#[cfg(feature = "graph")]
fn test_wire_graph() {
    use gate_schematic::graph::WireGraph;

    let netlist = get_two_level_example();
    let graph = netlist.get_analysis::<WireGraph>().unwrap();
    assert_eq!(graph.get_graph().node_count(), 7);
    assert_eq!(graph.get_graph().edge_count(), 6);
    assert!(!graph.is_cyclic());

    let cyclic = Netlist::new()
        .with_gate(Gate::of("AND", &["a", "q"], "p"))
        .with_gate(Gate::of("NOT", &["p"], "q"));
    assert!(cyclic.get_analysis::<WireGraph>().unwrap().is_cyclic());
}
