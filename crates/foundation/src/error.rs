/// Recoverable failure of a planner command.
///
/// Every variant means the command was rejected and no state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Bad coordinate range, malformed permutation, out-of-range preference.
    Validation(String),
    /// The command referenced an identifier that does not exist.
    NotFound(String),
    /// The command would introduce a second entry with an existing identifier.
    Duplicate(String),
}

impl PlannerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PlannerError::Validation(msg.into())
    }

    pub fn not_found(id: impl std::fmt::Display) -> Self {
        PlannerError::NotFound(id.to_string())
    }

    pub fn duplicate(id: impl std::fmt::Display) -> Self {
        PlannerError::Duplicate(id.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PlannerError::Validation(_) => "validation",
            PlannerError::NotFound(_) => "not_found",
            PlannerError::Duplicate(_) => "duplicate",
        }
    }
}

impl std::fmt::Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerError::Validation(msg) => write!(f, "invalid input: {msg}"),
            PlannerError::NotFound(id) => write!(f, "unknown id: {id}"),
            PlannerError::Duplicate(id) => write!(f, "id already present: {id}"),
        }
    }
}

impl std::error::Error for PlannerError {}

pub type PlannerResult<T> = Result<T, PlannerError>;
