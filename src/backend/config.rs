//! Output configuration for the batch generators.

/// Marker guarding the class declarations/definitions block.
pub const DEFAULT_CLASSES_GUARD: &str = "GET_OP_CLASSES";
/// Marker guarding the comma-separated op list.
pub const DEFAULT_LIST_GUARD: &str = "GET_OP_LIST";

/// Emission configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Emit the op list block in definitions mode
    pub emit_op_list: bool,
    /// Emit the generated-file banner at the top of the output
    pub emit_file_header: bool,
    /// `#ifdef` name wrapping the class block
    pub classes_guard: String,
    /// `#ifdef` name wrapping the op list
    pub list_guard: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            emit_op_list: true,
            emit_file_header: true,
            classes_guard: DEFAULT_CLASSES_GUARD.to_string(),
            list_guard: DEFAULT_LIST_GUARD.to_string(),
        }
    }
}

impl EmitConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the op list in definitions mode
    pub fn with_op_list(mut self, emit: bool) -> Self {
        self.emit_op_list = emit;
        self
    }

    /// Toggle the generated-file banner
    pub fn with_file_header(mut self, emit: bool) -> Self {
        self.emit_file_header = emit;
        self
    }

    /// Set the class block marker
    pub fn with_classes_guard(mut self, guard: impl Into<String>) -> Self {
        self.classes_guard = guard.into();
        self
    }

    /// Set the op list marker
    pub fn with_list_guard(mut self, guard: impl Into<String>) -> Self {
        self.list_guard = guard.into();
        self
    }
}
