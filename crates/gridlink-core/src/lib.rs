//! # gridlink-core: Shared Types for the Gridlink Binding
//!
//! Gridlink is a host-side binding over an external power-grid modeling and
//! simulation engine. The numerical work (load flow, contingency
//! simulation, topology processing) happens inside the engine; this
//! workspace marshals calls and results across that boundary.
//!
//! This crate holds what every layer of the binding shares:
//!
//! - [`GridError`] / [`GridResult`]: the unified error type
//! - [`AnalysisResult`], [`LimitViolation`] and their enums: the owned
//!   security-analysis data model
//! - [`Contingency`]: a simulated outage scenario
//! - [`LoadFlowParameters`], [`SecurityAnalysisParameters`]: engine options
//!
//! Higher layers live in their own crates: `gridlink-engine` (the call
//! boundary), `gridlink-network` (topology views, extensions) and
//! `gridlink-security` (analysis sessions and result aggregation).

pub mod analysis;
pub mod error;
pub mod parameters;

pub use analysis::{
    AnalysisResult, AnalysisStatus, BranchSide, Contingency, LimitType, LimitViolation,
};
pub use error::{GridError, GridResult};
pub use parameters::{
    BalanceType, LoadFlowParameters, SecurityAnalysisParameters, VoltageInitMode,
};
