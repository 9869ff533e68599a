//! # gridlink-security: Security-Analysis Sessions
//!
//! A [`SecurityAnalysis`] is a handle-backed engine session that
//! accumulates contingency definitions and triggers a run; the raw engine
//! output is wrapped into a [`SecurityAnalysisResult`] for structured
//! access (base case, per-contingency lookup, tabular summary).
//!
//! The session owns its engine-side state: release it with
//! [`SecurityAnalysis::close`], there is no finalizer. Contingency-id
//! collisions across `add_*` calls are the engine's concern and are not
//! validated here.

pub mod result;

pub use result::SecurityAnalysisResult;

use gridlink_core::{Contingency, GridResult, SecurityAnalysisParameters};
use gridlink_engine::{EngineBackend, SessionHandle};
use gridlink_network::Network;
use std::sync::Arc;
use tracing::info;

/// An accumulating security-analysis session.
pub struct SecurityAnalysis {
    handle: SessionHandle,
    backend: Arc<dyn EngineBackend>,
}

impl SecurityAnalysis {
    /// Open a new engine-side session.
    pub fn create(backend: Arc<dyn EngineBackend>) -> GridResult<Self> {
        let handle = backend.create_security_analysis()?;
        Ok(Self { handle, backend })
    }

    /// The opaque engine-side id of this session.
    pub fn handle(&self) -> SessionHandle {
        self.handle
    }

    /// Register a contingency removing one element. Without an explicit id
    /// the contingency is named after the element.
    pub fn add_single_element_contingency(
        &mut self,
        element_id: &str,
        contingency_id: Option<&str>,
    ) -> GridResult<()> {
        let contingency =
            Contingency::single(element_id, contingency_id.map(str::to_string));
        self.backend.add_contingency(self.handle, &contingency)
    }

    /// Register a contingency removing several elements at once; the id is
    /// required and the element list must be non-empty.
    pub fn add_multiple_elements_contingency(
        &mut self,
        element_ids: Vec<String>,
        contingency_id: &str,
    ) -> GridResult<()> {
        let contingency = Contingency::multiple(contingency_id, element_ids)?;
        self.backend.add_contingency(self.handle, &contingency)
    }

    /// Register one single-element contingency per element, each named
    /// after its element.
    pub fn add_single_element_contingencies(&mut self, element_ids: &[String]) -> GridResult<()> {
        self.add_single_element_contingencies_with(element_ids, |id| id.to_string())
    }

    /// Register one single-element contingency per element, naming each via
    /// the supplied function.
    pub fn add_single_element_contingencies_with<F>(
        &mut self,
        element_ids: &[String],
        naming: F,
    ) -> GridResult<()>
    where
        F: Fn(&str) -> String,
    {
        for element_id in element_ids {
            let contingency = Contingency::single(element_id.clone(), Some(naming(element_id)));
            self.backend.add_contingency(self.handle, &contingency)?;
        }
        Ok(())
    }

    /// Run the AC security analysis on the given network and aggregate the
    /// raw engine results.
    pub fn run_ac(
        &self,
        network: &Network,
        parameters: &SecurityAnalysisParameters,
    ) -> GridResult<SecurityAnalysisResult> {
        let results =
            self.backend
                .run_security_analysis(self.handle, network.handle(), parameters)?;
        info!(scenarios = results.len(), "security analysis completed");
        Ok(SecurityAnalysisResult::new(results))
    }

    /// Close the engine-side session. The handle is invalid afterwards.
    pub fn close(self) -> GridResult<()> {
        self.backend.close_security_analysis(self.handle)
    }
}
