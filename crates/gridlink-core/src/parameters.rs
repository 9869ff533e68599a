//! Parameter structs passed through to the engine.
//!
//! These mirror the engine's load-flow parameter set. The binding does not
//! interpret them; they are serialized across the boundary as-is. Defaults
//! match the engine's own defaults so `..Default::default()` configuration
//! reads naturally.

use serde::{Deserialize, Serialize};

/// How the engine seeds bus voltages before iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoltageInitMode {
    /// Flat start: 1 pu magnitude, 0 angle
    UniformValues,
    /// Start from the values stored in the network
    PreviousValues,
    /// DC load flow for angles, uniform magnitudes
    DcValues,
}

/// How the slack is distributed across generators or loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceType {
    ProportionalToGenerationP,
    ProportionalToGenerationPMax,
    ProportionalToLoad,
}

/// Load-flow solver options forwarded to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadFlowParameters {
    pub voltage_init_mode: VoltageInitMode,
    pub transformer_voltage_control_on: bool,
    pub no_generator_reactive_limits: bool,
    pub phase_shifter_regulation_on: bool,
    pub twt_split_shunt_admittance: bool,
    pub simul_shunt: bool,
    pub read_slack_bus: bool,
    pub write_slack_bus: bool,
    pub distributed_slack: bool,
    pub balance_type: BalanceType,
}

impl Default for LoadFlowParameters {
    fn default() -> Self {
        Self {
            voltage_init_mode: VoltageInitMode::UniformValues,
            transformer_voltage_control_on: false,
            no_generator_reactive_limits: false,
            phase_shifter_regulation_on: false,
            twt_split_shunt_admittance: false,
            simul_shunt: false,
            read_slack_bus: false,
            write_slack_bus: false,
            distributed_slack: true,
            balance_type: BalanceType::ProportionalToGenerationPMax,
        }
    }
}

/// Security-analysis options: the load-flow settings used for the base case
/// and every post-contingency run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityAnalysisParameters {
    pub load_flow_parameters: LoadFlowParameters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let p = LoadFlowParameters::default();
        assert_eq!(p.voltage_init_mode, VoltageInitMode::UniformValues);
        assert!(p.distributed_slack);
        assert_eq!(p.balance_type, BalanceType::ProportionalToGenerationPMax);
    }

    #[test]
    fn test_serde_round_trip() {
        let p = SecurityAnalysisParameters {
            load_flow_parameters: LoadFlowParameters {
                voltage_init_mode: VoltageInitMode::DcValues,
                distributed_slack: false,
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: SecurityAnalysisParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
