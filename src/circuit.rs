/*!

  Gate kinds and wire classes of a gate-level circuit.

*/

use std::str::FromStr;

/// The logic function of a gate.
///
/// The set of known kinds is closed. Anything else the simulator emits is
/// carried through as [GateType::Unknown] and drawn with the fallback symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(::serde::Serialize, ::serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum GateType {
    /// Logical conjunction
    And,
    /// Logical disjunction
    Or,
    /// Exclusive or
    Xor,
    /// Inverted exclusive or
    Xnor,
    /// Inverter
    Not,
    /// Inverted conjunction
    Nand,
    /// Inverted disjunction
    Nor,
    /// A pass-through buffer that only renames a wire
    Identity,
    /// A constant driver
    Constant,
    /// A gate kind this crate has no symbol for
    Unknown(String),
}

impl GateType {
    /// Returns the canonical upper-case name of the gate kind
    pub fn get_name(&self) -> &str {
        match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Xor => "XOR",
            GateType::Xnor => "XNOR",
            GateType::Not => "NOT",
            GateType::Nand => "NAND",
            GateType::Nor => "NOR",
            GateType::Identity => "IDENTITY",
            GateType::Constant => "CONSTANT",
            GateType::Unknown(name) => name,
        }
    }

    /// Returns `true` for pass-through gates, which are drawn as a straight continuation of their input
    pub fn is_identity(&self) -> bool {
        matches!(self, GateType::Identity)
    }

    /// Returns `true` if the gate kind is one this crate does not recognize
    pub fn is_unknown(&self) -> bool {
        matches!(self, GateType::Unknown(_))
    }
}

impl FromStr for GateType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "AND" => GateType::And,
            "OR" => GateType::Or,
            "XOR" => GateType::Xor,
            "XNOR" => GateType::Xnor,
            "NOT" | "INV" => GateType::Not,
            "NAND" => GateType::Nand,
            "NOR" => GateType::Nor,
            "IDENTITY" | "ID" | "BUF" => GateType::Identity,
            "CONSTANT" | "CONST" => GateType::Constant,
            _ => GateType::Unknown(s.to_string()),
        })
    }
}

impl From<String> for GateType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for GateType {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<GateType> for String {
    fn from(value: GateType) -> Self {
        value.get_name().to_string()
    }
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_name())
    }
}

/// How a wire relates to the gates of the netlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireClass {
    /// Consumed by some gate but never driven by one
    PrimaryInput,
    /// Driven by a gate and consumed by none
    GateOutput,
    /// Driven by a gate and consumed by at least one other gate
    InternalNet,
    /// Not mentioned by the netlist at all
    Unconnected,
}
