//! Template rendering

use tracing::debug;

use crate::interpolate::interpolate;
use crate::preprocess::preprocess;
use crate::substitute::{PlaceholderSubstituter, Substitute};
use crate::variable::Scope;

/// Renders query templates against a scope of variables.
///
/// Rendering is a pure function of the template and the scope: the scope is
/// preprocessed into a fresh copy, then every bound placeholder is replaced
/// with its interpolated value.
#[derive(Debug, Clone, Default)]
pub struct Renderer<S = PlaceholderSubstituter> {
    substituter: S,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Substitute> Renderer<S> {
    /// Use a different placeholder facility
    pub fn with_substituter(substituter: S) -> Self {
        Self { substituter }
    }

    pub fn render(&self, template: &str, scope: &Scope) -> String {
        debug!(template_len = template.len(), vars = scope.len(), "Renderer::render: called");
        let scope = preprocess(scope);
        self.substituter.substitute(template, &scope, &interpolate)
    }
}

/// Render `template` with the default placeholder conventions
pub fn render(template: &str, scope: &Scope) -> String {
    Renderer::new().render(template, scope)
}
