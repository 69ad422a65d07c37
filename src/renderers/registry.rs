//! Rendering backend registry
//!
//! Binds one implementation to each `RenderingCapability`. Bindings are made
//! during bootstrap, after which the registry is sealed and only read.

use super::{RenderingCapability, ScoreRenderer, SingleRenderer};
use crate::errors::BackendError;
use std::collections::HashMap;
use std::sync::Arc;

/// An implementation bound to a capability
#[derive(Clone)]
pub enum RenderingBackend {
    Score(Arc<dyn ScoreRenderer>),
    Single(Arc<dyn SingleRenderer>),
}

impl RenderingBackend {
    /// The capability this implementation answers
    pub fn capability(&self) -> RenderingCapability {
        match self {
            RenderingBackend::Score(_) => RenderingCapability::FullScoreRender,
            RenderingBackend::Single(_) => RenderingCapability::SingleElementRender,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderingBackend::Score(r) => r.name(),
            RenderingBackend::Single(r) => r.name(),
        }
    }
}

impl std::fmt::Debug for RenderingBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RenderingBackend({}: {})", self.capability(), self.name())
    }
}

/// Capability-indexed registry of rendering implementations
#[derive(Debug, Default)]
pub struct RenderingBackendRegistry {
    bindings: HashMap<RenderingCapability, RenderingBackend>,
    sealed: bool,
}

impl RenderingBackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `backend` to its capability, replacing any previous binding
    ///
    /// Refused once the registry is sealed.
    pub fn register_implementation(&mut self, backend: RenderingBackend) -> Result<(), BackendError> {
        let capability = backend.capability();
        if self.sealed {
            log::error!("refusing to rebind {} to '{}' after bootstrap", capability, backend.name());
            return Err(BackendError::RegistrySealed(capability));
        }

        log::info!("{} -> {}", capability, backend.name());
        if let Some(previous) = self.bindings.insert(capability, backend) {
            log::debug!("{} was bound to '{}', replaced", capability, previous.name());
        }
        Ok(())
    }

    /// Stop accepting registrations
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn is_bound(&self, capability: RenderingCapability) -> bool {
        self.bindings.contains_key(&capability)
    }

    /// The implementation bound to `capability`
    pub fn try_resolve(&self, capability: RenderingCapability) -> Result<&RenderingBackend, BackendError> {
        self.bindings
            .get(&capability)
            .ok_or(BackendError::CapabilityUnbound(capability))
    }

    /// The implementation bound to `capability`
    ///
    /// # Panics
    /// If nothing is bound. Bootstrap binds every capability, so this only
    /// happens when bootstrap was skipped or incomplete.
    pub fn resolve(&self, capability: RenderingCapability) -> &RenderingBackend {
        match self.try_resolve(capability) {
            Ok(backend) => backend,
            Err(e) => panic!("{}", e),
        }
    }

    /// The active full-score renderer
    pub fn score_renderer(&self) -> Arc<dyn ScoreRenderer> {
        match self.resolve(RenderingCapability::FullScoreRender) {
            RenderingBackend::Score(r) => r.clone(),
            RenderingBackend::Single(_) => unreachable!("bindings are keyed by capability"),
        }
    }

    /// The active single-element renderer
    pub fn single_renderer(&self) -> Arc<dyn SingleRenderer> {
        match self.resolve(RenderingCapability::SingleElementRender) {
            RenderingBackend::Single(r) => r.clone(),
            RenderingBackend::Score(_) => unreachable!("bindings are keyed by capability"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::dev::DevScoreRenderer;
    use crate::renderers::single::SingleElementRenderer;
    use crate::renderers::stable::StableScoreRenderer;

    #[test]
    fn test_last_registration_wins() {
        let mut registry = RenderingBackendRegistry::new();
        registry
            .register_implementation(RenderingBackend::Score(Arc::new(DevScoreRenderer::new())))
            .unwrap();
        registry
            .register_implementation(RenderingBackend::Score(Arc::new(StableScoreRenderer::new())))
            .unwrap();

        assert_eq!(registry.score_renderer().name(), "stable");
    }

    #[test]
    fn test_unbound_capability_is_detectable() {
        let registry = RenderingBackendRegistry::new();
        assert_eq!(
            registry.try_resolve(RenderingCapability::SingleElementRender).unwrap_err(),
            BackendError::CapabilityUnbound(RenderingCapability::SingleElementRender)
        );
        assert!(!registry.is_bound(RenderingCapability::FullScoreRender));
    }

    #[test]
    #[should_panic(expected = "no rendering implementation bound for full_score_render")]
    fn test_resolving_unbound_capability_panics() {
        let registry = RenderingBackendRegistry::new();
        let _ = registry.score_renderer();
    }

    #[test]
    fn test_capabilities_are_independent() {
        let mut registry = RenderingBackendRegistry::new();
        registry
            .register_implementation(RenderingBackend::Single(Arc::new(SingleElementRenderer::new())))
            .unwrap();

        assert_eq!(registry.single_renderer().name(), "single");
        assert!(registry.try_resolve(RenderingCapability::FullScoreRender).is_err());
    }

    #[test]
    fn test_sealed_registry_refuses_rebinding() {
        let mut registry = RenderingBackendRegistry::new();
        registry
            .register_implementation(RenderingBackend::Score(Arc::new(DevScoreRenderer::new())))
            .unwrap();
        registry.seal();

        let result = registry
            .register_implementation(RenderingBackend::Score(Arc::new(StableScoreRenderer::new())));
        assert_eq!(
            result.unwrap_err(),
            BackendError::RegistrySealed(RenderingCapability::FullScoreRender)
        );
        assert_eq!(registry.score_renderer().name(), "dev");
    }
}
