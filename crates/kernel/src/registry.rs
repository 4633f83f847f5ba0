use anyhow::{anyhow, Context};
use std::sync::Arc;

use crate::view::View;

/// View registry backing shell navigation.
///
/// Views are kept in registration order, which is also the order they are
/// listed in by `names`.
pub struct ViewRegistry {
    views: Vec<Arc<dyn View>>,
}

impl ViewRegistry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self { views: Vec::new() }
    }

    /// Register a view with the registry
    pub fn register(&mut self, view: Arc<dyn View>) {
        self.views.push(view);
    }

    /// Get all registered views in registration order
    pub fn views(&self) -> &[Arc<dyn View>] {
        &self.views
    }

    /// Get a view by its navigation name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn View>> {
        self.views.iter().find(|view| view.name() == name)
    }

    /// Navigation names of all registered views
    pub fn names(&self) -> Vec<&'static str> {
        self.views.iter().map(|view| view.name()).collect()
    }

    /// Get the number of registered views
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Activate a view by name and return its rendered lines.
    ///
    /// Activation re-fetches the view's caches before rendering; on failure
    /// the error is propagated and the view's previous state stands.
    pub async fn activate(&self, name: &str) -> anyhow::Result<Vec<String>> {
        let view = self
            .get(name)
            .ok_or_else(|| anyhow!("unknown view '{}'", name))?;

        tracing::debug!(view = view.name(), "activating view");

        view.activate()
            .await
            .with_context(|| format!("failed to activate view '{}'", view.name()))?;

        Ok(view.render())
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}
