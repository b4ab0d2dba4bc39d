/// Result type alias using RecallError
pub type Result<T> = std::result::Result<T, RecallError>;

/// Canonical error kind taxonomy
///
/// Provides a stable, structured classification of all errors in the Recall
/// system. Each kind maps to a stable error code usable for programmatic
/// handling, testing, and user-facing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallErrorKind {
    /// Lookup by key matched no row where presence was required
    NotFound,
    /// Mutation attempted on a record without an identity, or malformed input
    InvalidArgument,
    /// NOT NULL or foreign-key violation surfaced by the store
    ConstraintViolation,
    /// Statement- or handle-level store failure
    Persistence,
    /// File-level I/O failure
    Io,
    /// Row or JSON decode failure
    Serialization,
    /// Failure at the deck-generation boundary
    ExternalService,
    /// Invariant breach inside this layer
    Internal,
}

impl RecallErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            RecallErrorKind::NotFound => "ERR_NOT_FOUND",
            RecallErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            RecallErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            RecallErrorKind::Persistence => "ERR_PERSISTENCE",
            RecallErrorKind::Io => "ERR_IO",
            RecallErrorKind::Serialization => "ERR_SERIALIZATION",
            RecallErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            RecallErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for classification plus optional context fields for
/// debugging: the operation that failed and the entity key involved.
#[derive(Debug, Clone)]
pub struct RecallError {
    kind: RecallErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl RecallError {
    /// Create a new error with the specified kind
    pub fn new(kind: RecallErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity key context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> RecallErrorKind {
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

    /// Get the entity key context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RecallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RecallError {}
