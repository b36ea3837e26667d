//! Backend handle and its descriptive properties.
//!
//! A backend is an opaque device handle handed out by a [`Provider`].
//! Everything the tools need from it is read-only: the descriptive
//! attributes in [`BackendProperties`] and the [`CouplingMap`].
//!
//! ## Attribute table
//!
//! | Attribute | Type | Always present |
//! |-----------|------|----------------|
//! | `backend_version` | text | yes |
//! | `coupling_map` | list of pairs | yes (may be empty) |
//! | `description` | text | yes |
//! | `dt` | float | no |
//! | `dtm` | float | no |
//! | `max_circuits` | int | no |
//! | `name` | text | yes |
//! | `num_qubits` | int | yes |
//! | `online_date` | text | yes |
//! | `version` | int | yes |
//!
//! [`Provider`]: crate::provider::Provider

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Public, non-callable attributes a backend exposes for inspection.
pub const BACKEND_ATTRIBUTES: &[&str] = &[
    "backend_version",
    "coupling_map",
    "description",
    "dt",
    "dtm",
    "max_circuits",
    "name",
    "num_qubits",
    "online_date",
    "version",
];

/// Permitted two-qubit interactions as `(source, target)` pairs.
///
/// Each direction is normally listed separately, so `(0, 1)` and `(1, 0)`
/// both appear. Order and duplicates are preserved exactly as reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouplingMap(Vec<(u32, u32)>);

impl CouplingMap {
    /// Create a coupling map from pairs.
    pub fn new(edges: Vec<(u32, u32)>) -> Self {
        Self(edges)
    }

    /// The pairs, in reported order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.0
    }

    /// Number of pairs, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no pairs were reported.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs referencing a qubit index outside `[0, num_qubits)`.
    pub fn out_of_range(&self, num_qubits: u32) -> Vec<(u32, u32)> {
        self.0
            .iter()
            .copied()
            .filter(|&(a, b)| a >= num_qubits || b >= num_qubits)
            .collect()
    }
}

impl From<Vec<(u32, u32)>> for CouplingMap {
    fn from(edges: Vec<(u32, u32)>) -> Self {
        Self(edges)
    }
}

/// Read-only descriptive attributes of a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProperties {
    /// Device name (e.g. `scarlet_quantum_rings`).
    pub name: String,
    /// Firmware/software version string.
    pub backend_version: String,
    /// Interface version number.
    #[serde(default)]
    pub version: i64,
    /// Date the device came online, as reported.
    #[serde(default)]
    pub online_date: String,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// System time resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    /// Measurement time resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtm: Option<f64>,
    /// Maximum circuits per job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_circuits: Option<i64>,
    /// Qubit connectivity.
    #[serde(default)]
    pub coupling_map: CouplingMap,
}

impl BackendProperties {
    /// Minimal properties for a named device.
    pub fn new(name: impl Into<String>, backend_version: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            backend_version: backend_version.into(),
            version: 1,
            online_date: String::new(),
            num_qubits,
            description: String::new(),
            dt: None,
            dtm: None,
            max_circuits: None,
            coupling_map: CouplingMap::default(),
        }
    }

    /// Set the coupling map.
    pub fn with_coupling_map(mut self, coupling_map: impl Into<CouplingMap>) -> Self {
        self.coupling_map = coupling_map.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the online date.
    pub fn with_online_date(mut self, online_date: impl Into<String>) -> Self {
        self.online_date = online_date.into();
        self
    }

    /// Look up an attribute by name.
    ///
    /// # Errors
    ///
    /// [`HalError::AttributeUnavailable`] for optional attributes the
    /// service did not report, [`HalError::UnknownAttribute`] otherwise.
    pub fn attribute(&self, name: &str) -> HalResult<AttributeValue> {
        let unavailable = || HalError::AttributeUnavailable(name.to_string());
        Ok(match name {
            "backend_version" => AttributeValue::Text(self.backend_version.clone()),
            "coupling_map" => AttributeValue::List(
                self.coupling_map
                    .edges()
                    .iter()
                    .map(|&(a, b)| {
                        AttributeValue::List(vec![
                            AttributeValue::Int(i64::from(a)),
                            AttributeValue::Int(i64::from(b)),
                        ])
                    })
                    .collect(),
            ),
            "description" => AttributeValue::Text(self.description.clone()),
            "dt" => AttributeValue::Float(self.dt.ok_or_else(unavailable)?),
            "dtm" => AttributeValue::Float(self.dtm.ok_or_else(unavailable)?),
            "max_circuits" => AttributeValue::Int(self.max_circuits.ok_or_else(unavailable)?),
            "name" => AttributeValue::Text(self.name.clone()),
            "num_qubits" => AttributeValue::Int(i64::from(self.num_qubits)),
            "online_date" => AttributeValue::Text(self.online_date.clone()),
            "version" => AttributeValue::Int(self.version),
            other => return Err(HalError::UnknownAttribute(other.to_string())),
        })
    }
}

/// Value of a backend attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Text.
    Text(String),
    /// Ordered sequence.
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Length of a sequence value (characters for text). Scalars have none.
    pub fn seq_len(&self) -> Option<usize> {
        match self {
            AttributeValue::Int(_) | AttributeValue::Float(_) => None,
            AttributeValue::Text(s) => Some(s.chars().count()),
            AttributeValue::List(items) => Some(items.len()),
        }
    }

    /// Elements `start..end` of a sequence value; scalars are returned whole.
    pub fn slice(&self, start: usize, end: usize) -> AttributeValue {
        match self {
            AttributeValue::Text(s) => {
                AttributeValue::Text(s.chars().skip(start).take(end.saturating_sub(start)).collect())
            }
            AttributeValue::List(items) => {
                let end = end.min(items.len());
                let start = start.min(end);
                AttributeValue::List(items[start..end].to_vec())
            }
            scalar => scalar.clone(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Text(s) => write!(f, "{s}"),
            AttributeValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A named quantum device obtained from a provider.
///
/// Properties MUST be cached when the handle is created; reading them
/// performs no I/O.
pub trait Backend: Send + Sync + fmt::Display {
    /// Descriptive attributes of this backend.
    fn properties(&self) -> &BackendProperties;

    /// Device name.
    fn name(&self) -> &str {
        &self.properties().name
    }

    /// Number of qubits.
    fn num_qubits(&self) -> u32 {
        self.properties().num_qubits
    }

    /// Firmware/software version string.
    fn backend_version(&self) -> &str {
        &self.properties().backend_version
    }

    /// Qubit connectivity.
    fn coupling_map(&self) -> &CouplingMap {
        &self.properties().coupling_map
    }

    /// Read one attribute for reflective enumeration.
    fn attribute(&self, name: &str) -> HalResult<AttributeValue> {
        self.properties().attribute(name)
    }
}
