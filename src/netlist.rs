/*!

  API for a flat, ordered gate-level netlist.

*/

use crate::circuit::GateType;
#[cfg(feature = "serde")]
use crate::error::LayoutError;

/// A primitive gate in a digital circuit, such as AND, OR, NOT, etc.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Gate {
    /// The logic function of the gate
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    gate_type: GateType,
    /// Input wires, order matters
    inputs: Vec<String>,
    /// The single output wire
    output: String,
}

impl Gate {
    /// Creates a new gate of kind `gate_type` reading `inputs` and driving `output`
    pub fn new(gate_type: GateType, inputs: Vec<String>, output: String) -> Self {
        Self {
            gate_type,
            inputs,
            output,
        }
    }

    /// Creates a new gate, converting the kind and wire names from anything string-like
    pub fn of<T, S>(gate_type: T, inputs: &[S], output: S) -> Self
    where
        T: Into<GateType>,
        S: AsRef<str>,
    {
        Self::new(
            gate_type.into(),
            inputs.iter().map(|s| s.as_ref().to_string()).collect(),
            output.as_ref().to_string(),
        )
    }

    /// Returns the logic function of the gate
    pub fn get_type(&self) -> &GateType {
        &self.gate_type
    }

    /// Returns the input wires in declaration order
    pub fn get_inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Returns the input wire at index `index`
    pub fn get_input_at(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(String::as_str)
    }

    /// Returns the output wire
    pub fn get_output(&self) -> &str {
        &self.output
    }

    /// Returns `true` if the gate is a pass-through
    pub fn is_identity(&self) -> bool {
        self.gate_type.is_identity()
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {}({})",
            self.output,
            self.gate_type,
            self.inputs.join(", ")
        )
    }
}

/// An ordered list of gates.
///
/// The order is significant: it breaks ties when gates share a depth and it
/// fixes the stagger of tap points during routing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(transparent)
)]
pub struct Netlist {
    gates: Vec<Gate>,
}

impl Netlist {
    /// Creates an empty netlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a gate to the end of the netlist
    pub fn push(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    /// Appends a gate and returns the netlist, for building netlists inline
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.push(gate);
        self
    }

    /// Returns the gates in netlist order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Returns the gate at position `index`
    pub fn get_gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Returns the number of gates
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the netlist has no gates
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Returns an iterator over the gates in netlist order
    pub fn iter(&self) -> std::slice::Iter<'_, Gate> {
        self.gates.iter()
    }

    #[cfg(feature = "serde")]
    /// Parses a netlist from JSON.
    ///
    /// Accepts either a bare array of gate records or the simulator envelope
    /// `{"success": true, "netlist": [...]}`. An envelope carrying an `"error"`
    /// is reported as [LayoutError::Simulator].
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let document: serde::Document = serde_json::from_str(json)?;
        document.into_netlist()
    }

    #[cfg(feature = "serde")]
    /// Parses a netlist from a JSON reader. See [Netlist::from_json].
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, LayoutError> {
        let document: serde::Document = serde_json::from_reader(reader)?;
        document.into_netlist()
    }

    #[cfg(feature = "serde")]
    /// Serializes the netlist as a bare JSON array of gate records.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<Gate> for Netlist {
    fn from_iter<T: IntoIterator<Item = Gate>>(iter: T) -> Self {
        Self {
            gates: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Gate>> for Netlist {
    fn from(gates: Vec<Gate>) -> Self {
        Self { gates }
    }
}

impl<'a> IntoIterator for &'a Netlist {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}

impl std::fmt::Display for Netlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{gate}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
/// The JSON documents a netlist can arrive in.
pub mod serde {
    use super::{Gate, Netlist};
    use crate::error::LayoutError;
    use serde::Deserialize;

    /// Either a bare gate list or the envelope the simulator bindings produce
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub(crate) enum Document {
        Bare(Vec<Gate>),
        Envelope {
            #[serde(default)]
            netlist: Option<Vec<Gate>>,
            #[serde(default)]
            error: Option<String>,
        },
    }

    impl Document {
        pub(crate) fn into_netlist(self) -> Result<Netlist, LayoutError> {
            match self {
                Document::Bare(gates) => Ok(gates.into()),
                Document::Envelope {
                    error: Some(message),
                    ..
                } => Err(LayoutError::Simulator(message)),
                Document::Envelope {
                    netlist: Some(gates),
                    ..
                } => Ok(gates.into()),
                Document::Envelope { .. } => Ok(Netlist::new()),
            }
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_array() {
        let netlist =
            Netlist::from_json(r#"[{"type": "AND", "inputs": ["a", "b"], "output": "y"}]"#)
                .unwrap();
        assert_eq!(netlist.len(), 1);
        let gate = netlist.get_gate(0).unwrap();
        assert_eq!(gate.get_type(), &GateType::And);
        assert_eq!(gate.get_inputs(), ["a", "b"]);
        assert_eq!(gate.get_output(), "y");
    }

    #[test]
    fn parse_simulator_envelope() {
        let json = r#"{"success": true, "netlist": [
            {"output": "n", "type": "ID", "inputs": ["a"]},
            {"output": "k", "type": "CONST", "inputs": []}
        ]}"#;
        let netlist = Netlist::from_json(json).unwrap();
        assert_eq!(netlist.len(), 2);
        assert!(netlist.get_gate(0).unwrap().is_identity());
        assert_eq!(netlist.get_gate(1).unwrap().get_type(), &GateType::Constant);
    }

    #[test]
    fn simulator_error_is_reported() {
        let err = Netlist::from_json(r#"{"error": "Empty Verilog source"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Simulator(m) if m == "Empty Verilog source"));
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let netlist = Netlist::new()
            .with_gate(Gate::of("XOR", &["a", "b"], "s"))
            .with_gate(Gate::of("AND", &["a", "b"], "c"));
        let json = netlist.to_json().unwrap();
        assert_eq!(Netlist::from_json(&json).unwrap(), netlist);
    }
}
