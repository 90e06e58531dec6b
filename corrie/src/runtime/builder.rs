use super::Runtime;

/// Builder for configuring and creating a runtime.
///
/// There is nothing to configure yet beyond the default single-threaded
/// reactor — `RuntimeBuilder` exists mainly to give `#[corrie::main]` and
/// `#[corrie::test]` a stable entry point (`RuntimeBuilder::new().build()`)
/// that can grow options later without breaking callers.
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new().build();
/// ```
pub struct RuntimeBuilder {
    _private: (),
}

impl RuntimeBuilder {
    /// Creates a new `RuntimeBuilder` with default configuration.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Builds the runtime, starting its reactor.
    pub fn build(self) -> Runtime {
        Runtime::new()
    }
}

impl Default for RuntimeBuilder {
    /// Creates a default `RuntimeBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
