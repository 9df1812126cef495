use gate_schematic::config::RenderConfig;
use gate_schematic::netlist::{Gate, Netlist};
use gate_schematic::scene::Layer;

fn main() {
    // A half adder: sum = a ^ b, carry = a & b
    let netlist = Netlist::new()
        .with_gate(Gate::of("XOR", &["a", "b"], "sum"))
        .with_gate(Gate::of("AND", &["a", "b"], "carry"));

    let config = RenderConfig::default();
    let scene = gate_schematic::layout(&netlist, &config).unwrap();

    // XOR body, its leading curve and glyph, then the AND body and glyph
    assert_eq!(scene.on_layer(Layer::Gates).count(), 5);
    assert_eq!(scene.get_width(), 1400.0);

    let svg = gate_schematic::render_svg(&netlist, &config).unwrap();
    println!("{svg}");
}
