//! Typed backend and job payload models.
//!
//! These mirror the JSON documents the remote service returns. Required
//! fields are required here too, so a malformed payload fails to
//! deserialize instead of producing a half-filled struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Static configuration of a backend, as advertised by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfiguration {
    /// Backend name (e.g. `ibmq_16_melbourne`).
    pub backend_name: String,
    /// Backend version string.
    #[serde(default)]
    pub backend_version: Option<String>,
    /// Number of qubits.
    pub n_qubits: u32,
    /// Basis gates.
    #[serde(default)]
    pub basis_gates: Vec<String>,
    /// Whether this is a simulator.
    #[serde(default)]
    pub simulator: bool,
    /// Whether the backend runs locally.
    #[serde(default)]
    pub local: bool,
    /// Whether conditional operations are supported.
    #[serde(default)]
    pub conditional: bool,
    /// Whether pulse-level jobs are accepted.
    #[serde(default)]
    pub open_pulse: bool,
    /// Whether per-shot memory is supported.
    #[serde(default)]
    pub memory: bool,
    /// Maximum number of shots.
    #[serde(default)]
    pub max_shots: Option<u32>,
    /// Coupling map (pairs of connected qubits).
    #[serde(default)]
    pub coupling_map: Option<Vec<[u32; 2]>>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackendConfiguration {
    /// Create a minimal configuration for a device.
    pub fn new(backend_name: impl Into<String>, n_qubits: u32) -> Self {
        Self {
            backend_name: backend_name.into(),
            backend_version: None,
            n_qubits,
            basis_gates: Vec::new(),
            simulator: false,
            local: false,
            conditional: false,
            open_pulse: false,
            memory: false,
            max_shots: None,
            coupling_map: None,
            extra: Map::new(),
        }
    }

    /// Mark the configuration as a simulator.
    pub fn with_simulator(mut self, simulator: bool) -> Self {
        self.simulator = simulator;
        self
    }
}

/// Live operational status of a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendStatus {
    /// Backend name.
    pub backend_name: String,
    /// Backend version.
    pub backend_version: String,
    /// Whether the backend accepts jobs.
    pub operational: bool,
    /// Jobs waiting in the backend queue.
    pub pending_jobs: u32,
    /// Human-readable status message.
    pub status_msg: String,
}

/// A named, dated, unit-carrying value (a calibration data point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nduv {
    /// When the value was measured.
    pub date: DateTime<Utc>,
    /// Quantity name (e.g. `T1`, `readout_error`).
    pub name: String,
    /// Unit (e.g. `µs`, `GHz`, or empty).
    pub unit: String,
    /// Measured value.
    pub value: f64,
}

/// Calibration data for one gate on specific qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateProperties {
    /// Gate name.
    pub gate: String,
    /// Qubits the gate acts on.
    pub qubits: Vec<u32>,
    /// Gate calibration values.
    pub parameters: Vec<Nduv>,
}

/// Calibration properties of a device backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProperties {
    /// Backend name.
    pub backend_name: String,
    /// Backend version.
    pub backend_version: String,
    /// Time of the last calibration.
    pub last_update_date: DateTime<Utc>,
    /// Per-qubit calibration values, indexed by qubit.
    pub qubits: Vec<Vec<Nduv>>,
    /// Per-gate calibration values.
    pub gates: Vec<GateProperties>,
    /// Device-wide values.
    #[serde(default)]
    pub general: Vec<Nduv>,
}

impl BackendProperties {
    /// Look up a named calibration value for a qubit.
    pub fn qubit_property(&self, qubit: usize, name: &str) -> Option<&Nduv> {
        self.qubits.get(qubit)?.iter().find(|p| p.name == name)
    }

    /// Look up a named calibration value for a gate on the given qubits.
    pub fn gate_property(&self, gate: &str, qubits: &[u32], name: &str) -> Option<&Nduv> {
        self.gates
            .iter()
            .find(|g| g.gate == gate && g.qubits == qubits)?
            .parameters
            .iter()
            .find(|p| p.name == name)
    }
}

/// A sampled pulse shape in the pulse library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseLibraryItem {
    /// Pulse name.
    pub name: String,
    /// Complex samples as `[re, im]` pairs.
    pub samples: Vec<[f64; 2]>,
}

/// A gate-to-pulse-schedule definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Gate name.
    pub name: String,
    /// Qubits the definition applies to.
    pub qubits: Vec<u32>,
    /// Pulse instructions, kept as raw JSON.
    #[serde(default)]
    pub sequence: Vec<Value>,
}

/// Default pulse calibrations of an open-pulse backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseDefaults {
    /// Estimated qubit frequencies in GHz.
    pub qubit_freq_est: Vec<f64>,
    /// Estimated measurement frequencies in GHz.
    pub meas_freq_est: Vec<f64>,
    /// Default buffer between pulses, in samples.
    pub buffer: u32,
    /// Pulse shapes.
    pub pulse_library: Vec<PulseLibraryItem>,
    /// Gate definitions in terms of pulses.
    pub cmd_def: Vec<CommandDefinition>,
}

/// Kind of experiments carried by a [`Qobj`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QobjType {
    /// Gate-level circuits.
    Qasm,
    /// Pulse schedules.
    Pulse,
}

/// Serialized description of a job to execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qobj {
    /// Client-assigned identifier.
    pub qobj_id: String,
    /// Experiment kind.
    #[serde(rename = "type")]
    pub kind: QobjType,
    /// Qobj schema version.
    pub schema_version: String,
    /// Run configuration (shots, memory slots, ...).
    #[serde(default)]
    pub config: Map<String, Value>,
    /// Experiments, kept as raw JSON.
    pub experiments: Vec<Value>,
    /// Optional user header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Value>,
}

impl Qobj {
    /// Create a gate-level Qobj.
    pub fn qasm(qobj_id: impl Into<String>, experiments: Vec<Value>) -> Self {
        Self {
            qobj_id: qobj_id.into(),
            kind: QobjType::Qasm,
            schema_version: "1.0.0".to_string(),
            config: Map::new(),
            experiments,
            header: None,
        }
    }

    /// Set the number of shots in the run configuration.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.config.insert("shots".to_string(), Value::from(shots));
        self
    }

    /// Number of shots requested, if configured.
    pub fn shots(&self) -> Option<u64> {
        self.config.get("shots").and_then(Value::as_u64)
    }
}
