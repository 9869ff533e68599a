//! The call boundary to the external engine.
//!
//! Every interaction with the engine goes through [`EngineBackend`]: a set
//! of named, RPC-like calls taking opaque handles and identifiers and
//! returning either tabular payloads ([`Table`]) or already-typed analysis
//! records. The trait is the seam between this binding and whatever
//! transport actually reaches the engine (FFI, IPC, an in-memory fixture).
//!
//! ## Resource model
//!
//! [`NetworkHandle`] and [`SessionHandle`] are opaque ids naming engine-side
//! state. They are plain copyable tokens; ownership and release semantics
//! live in the facade objects (`Network`, `SecurityAnalysis`) which call
//! [`EngineBackend::release_network`] / [`EngineBackend::close_security_analysis`]
//! explicitly. No finalizer-based cleanup is assumed.
//!
//! ## Threading contract
//!
//! Backends must be `Send + Sync` so one backend can serve several facade
//! objects, but a given session handle is driven from one logical thread of
//! control at a time; the binding never issues concurrent calls against the
//! same handle.

use crate::extension::ExtensionSchema;
use crate::table::Table;
use gridlink_core::{AnalysisResult, Contingency, GridResult, SecurityAnalysisParameters};

/// Opaque id of an engine-side network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkHandle(pub u64);

/// Opaque id of an engine-side security-analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(pub u64);

/// Black-box call surface of the external engine.
pub trait EngineBackend: Send + Sync {
    // --- topology views, per voltage level ---

    /// Elements of a voltage level with the bus-breaker bus each connects to.
    fn bus_breaker_view_elements(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table>;

    /// Switches of the bus-breaker view: endpoints `bus1_id`/`bus2_id` plus
    /// an `open` status.
    fn bus_breaker_view_switches(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table>;

    /// Buses of the bus-breaker view; the index is the vertex set.
    fn bus_breaker_view_buses(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table>;

    /// Nodes of the node-breaker view with their connected element (if any).
    fn node_breaker_view_nodes(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table>;

    /// Switches of the node-breaker view: endpoints `node1`/`node2`.
    fn node_breaker_view_switches(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table>;

    /// Fixed internal connections of the node-breaker view: `node1`/`node2`.
    fn node_breaker_view_internal_connections(
        &self,
        network: NetworkHandle,
        voltage_level_id: &str,
    ) -> GridResult<Table>;

    /// Release the engine-side network state.
    fn release_network(&self, network: NetworkHandle) -> GridResult<()>;

    // --- security analysis ---

    /// Open a security-analysis session.
    fn create_security_analysis(&self) -> GridResult<SessionHandle>;

    /// Register one contingency with the session. Identifier collisions are
    /// the engine's concern; they are not validated here.
    fn add_contingency(
        &self,
        session: SessionHandle,
        contingency: &Contingency,
    ) -> GridResult<()>;

    /// Run the analysis: the base case plus every registered contingency.
    /// Returns one record per scenario, base case with `contingency_id = None`.
    fn run_security_analysis(
        &self,
        session: SessionHandle,
        network: NetworkHandle,
        parameters: &SecurityAnalysisParameters,
    ) -> GridResult<Vec<AnalysisResult>>;

    /// Close the session and release its engine-side state.
    fn close_security_analysis(&self, session: SessionHandle) -> GridResult<()>;

    // --- extension store ---

    /// The engine's extension-type registry.
    fn extension_schemas(&self) -> GridResult<Vec<ExtensionSchema>>;

    /// All rows of one extension type, keyed by element id.
    fn get_extensions(&self, network: NetworkHandle, name: &str) -> GridResult<Table>;

    /// Create rows; the table index is the element ids.
    fn create_extensions(
        &self,
        network: NetworkHandle,
        name: &str,
        rows: &Table,
    ) -> GridResult<()>;

    /// Update existing rows; a row whose element id is absent is an error.
    fn update_extensions(
        &self,
        network: NetworkHandle,
        name: &str,
        rows: &Table,
    ) -> GridResult<()>;

    /// Remove rows by element id; ids without a row are ignored.
    fn remove_extensions(
        &self,
        network: NetworkHandle,
        name: &str,
        element_ids: &[String],
    ) -> GridResult<()>;
}
