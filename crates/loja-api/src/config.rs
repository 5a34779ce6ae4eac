//! API layer configuration.

/// Configuration for the REST handler layer.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Path prefix stripped before routing, e.g. `/api`.
    pub base_path: String,
    /// Include error detail in 500 bodies. Off in production; the detail is
    /// always logged regardless.
    pub expose_error_detail: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            expose_error_detail: false,
        }
    }
}

impl ApiConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path prefix.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Include error detail in 500 bodies.
    pub fn with_error_detail(mut self, expose: bool) -> Self {
        self.expose_error_detail = expose;
        self
    }
}
