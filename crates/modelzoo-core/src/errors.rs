use modelzoo_core_types::RequestId;
use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on and that
/// the logging facility records as `err_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidField,
    InvalidRelationType,
    SelfRelation,

    // Lookup
    NotFound,

    // Integrity
    AlreadyExists,
    /// A unique or foreign-key constraint rejected a write
    IntegrityViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidField => "ERR_INVALID_FIELD",
            ExErrorKind::InvalidRelationType => "ERR_INVALID_RELATION_TYPE",
            ExErrorKind::SelfRelation => "ERR_SELF_RELATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::IntegrityViolation => "ERR_INTEGRITY_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, entity, request) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
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

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by model validation and the edge manager
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Twitter user does not exist
    #[error("Twitter user not found: {user_id}")]
    UserNotFound { user_id: i64 },

    /// Any other row lookup miss
    #[error("{model} not found: {id}")]
    NotFound { model: String, id: i64 },

    /// Follow/block where actor and target are the same user
    #[error("User {user_id} cannot follow or block itself")]
    SelfRelation { user_id: i64 },

    /// Field failed validation (blank, too long)
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Relation type code is not one of the declared choices
    #[error("Invalid relation type: {code}")]
    InvalidRelationType { code: String },

    /// Unique or foreign-key constraint rejected a write
    #[error("Integrity violation on {table}: {detail}")]
    IntegrityViolation { table: String, detail: String },

    /// Backend failure that is not an integrity violation
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<ModelError> for ExError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UserNotFound { user_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(user_id.to_string())
                .with_message("Twitter user not found"),

            ModelError::NotFound { model, id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message(format!("{} not found", model)),

            ModelError::SelfRelation { user_id } => ExError::new(ExErrorKind::SelfRelation)
                .with_entity_id(user_id.to_string())
                .with_message("A user cannot follow or block itself"),

            ModelError::InvalidField { field, reason } => ExError::new(ExErrorKind::InvalidField)
                .with_entity_id(field.clone())
                .with_message(format!("Invalid field {}: {}", field, reason)),

            ModelError::InvalidRelationType { code } => {
                ExError::new(ExErrorKind::InvalidRelationType)
                    .with_message(format!("Invalid relation type: {}", code))
            }

            ModelError::IntegrityViolation { table, detail } => {
                ExError::new(ExErrorKind::IntegrityViolation)
                    .with_entity_id(table)
                    .with_message(detail)
            }

            ModelError::Persistence { message } => {
                ExError::new(ExErrorKind::Persistence).with_message(message)
            }

            ModelError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization {
            message: err.to_string(),
        }
    }
}
