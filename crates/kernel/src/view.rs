use async_trait::async_trait;

/// A storefront view: one entity collection rendered as cards or a list.
///
/// Each view owns its caches exclusively; nothing is shared across view
/// boundaries. Activation re-fetches those caches, and a failed activation
/// must leave the previously rendered state untouched.
#[async_trait]
pub trait View: Send + Sync {
    /// Unique name used for navigation
    fn name(&self) -> &'static str;

    /// Heading printed above the rendered lines
    fn title(&self) -> &'static str;

    /// Re-fetch this view's caches from its backing service(s)
    async fn activate(&self) -> anyhow::Result<()>;

    /// Render the current caches as display lines
    fn render(&self) -> Vec<String>;
}

/// Blocking yes/no decision required before destructive actions.
///
/// Views never issue a delete without an affirmative answer from this seam.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}
