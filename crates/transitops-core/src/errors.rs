use transitops_core_types::{RequestId, TraceId};

/// Result type alias using OpsError
pub type Result<T> = std::result::Result<T, OpsError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the TransitOps console core. Each kind maps to a stable error code
/// that can be used for programmatic handling, testing, and display routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpsErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    /// A record handed to the diff engine is not a flat JSON object
    NotARecord,
    /// A record contains a non-scalar (object/array) top-level field
    NonScalarField,
    /// A comparison was indeterminate and must not be trusted as "no changes"
    IndeterminateComparison,

    // Query cycles
    /// A query cycle's response arrived after a newer cycle started
    QuerySuperseded,
    /// A page beyond the last page was requested
    PageOutOfRange,

    // Integration/IO
    Serialization,
    ExternalService,
    Timeout,

    // Auth (surfaced from the backend, never handled here)
    Unauthorised,
    Forbidden,

    // Internal
    Internal,
}

impl OpsErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            OpsErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            OpsErrorKind::NotFound => "ERR_NOT_FOUND",
            OpsErrorKind::NotARecord => "ERR_NOT_A_RECORD",
            OpsErrorKind::NonScalarField => "ERR_NON_SCALAR_FIELD",
            OpsErrorKind::IndeterminateComparison => "ERR_INDETERMINATE_COMPARISON",
            OpsErrorKind::QuerySuperseded => "ERR_QUERY_SUPERSEDED",
            OpsErrorKind::PageOutOfRange => "ERR_PAGE_OUT_OF_RANGE",
            OpsErrorKind::Serialization => "ERR_SERIALIZATION",
            OpsErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            OpsErrorKind::Timeout => "ERR_TIMEOUT",
            OpsErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            OpsErrorKind::Forbidden => "ERR_FORBIDDEN",
            OpsErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Provides a structured representation of errors with classification fields
/// for programmatic handling and rich context for debugging. Failures are
/// terminal at the component boundary: they are surfaced to the user and
/// logged, never retried automatically.
#[derive(Debug, Clone)]
pub struct OpsError {
    kind: OpsErrorKind,
    op: Option<String>,
    entity_kind: Option<String>,
    entity_id: Option<String>,
    field: Option<String>,
    status: Option<u16>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<OpsError>>,
}

impl OpsError {
    /// Create a new error with the specified kind
    pub fn new(kind: OpsErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_kind: None,
            entity_id: None,
            field: None,
            status: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity kind context (e.g. "bus", "driver")
    pub fn with_entity_kind(mut self, kind: impl Into<String>) -> Self {
        self.entity_kind = Some(kind.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add field-name context (used by the diff engine's scalar guard)
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add HTTP status context
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: OpsError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> OpsErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity kind context, if any
    pub fn entity_kind(&self) -> Option<&str> {
        self.entity_kind.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the field-name context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the HTTP status context, if any
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&OpsError> {
        self.source.as_deref()
    }

    /// Render the message users see in toasts/inline banners.
    ///
    /// The error message if one was set, else a generic fallback.
    pub fn display_message(&self) -> String {
        if self.message.is_empty() {
            "Something went wrong. Please try again.".to_string()
        } else {
            self.message.clone()
        }
    }
}

impl std::fmt::Display for OpsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_kind) = &self.entity_kind {
            write!(f, " (entity_kind: {})", entity_kind)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for OpsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for OpsError {
    fn from(err: serde_json::Error) -> Self {
        OpsError::new(OpsErrorKind::Serialization).with_message(err.to_string())
    }
}

// ========== End Error Facility ==========
