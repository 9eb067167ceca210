//! Structured business failures.
//!
//! An [`Error`] is the payload of a failed [`Outcome`]. It is a plain value:
//! a machine-readable code, a human description and an [`ErrorKind`] that a
//! transport layer maps onto its own status vocabulary.
//!
//! [`ValidationError`] aggregates several field-level errors into one.

use crate::outcome::AsFailure;
#[cfg(doc)]
use crate::outcome::Outcome;
use std::{borrow::Cow, fmt};

/// The closed category of a business failure.
///
/// The set is fixed at five variants so that any mapping over it is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A general operation failure.
    #[default]
    Failure,
    /// Invalid input, such as a rejected field.
    Validation,
    /// A problem not covered by the other categories.
    Problem,
    /// The addressed resource does not exist.
    NotFound,
    /// The operation collides with current state (duplicate, stale version).
    Conflict,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::Failure,
        ErrorKind::Validation,
        ErrorKind::Problem,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
    ];

    /// A stable lowercase name for logs and wire formats.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Failure => "failure",
            ErrorKind::Validation => "validation",
            ErrorKind::Problem => "problem",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured business failure.
///
/// Errors are immutable values. Codes and descriptions are usually string
/// literals, so they are held as `Cow<'static, str>` and cost nothing to
/// build from constants.
///
/// An error produced from a [`ValidationError`] keeps its component errors,
/// reachable through [`Error::validation_errors`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{code}: {description}")]
pub struct Error {
    code: Cow<'static, str>,
    description: Cow<'static, str>,
    kind: ErrorKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    errors: Vec<Error>,
}

static NONE: Error = Error::NONE;

impl Error {
    /// The absence of an error. Only ever held by a successful outcome.
    pub const NONE: Error = Error {
        code: Cow::Borrowed(""),
        description: Cow::Borrowed(""),
        kind: ErrorKind::Failure,
        errors: Vec::new(),
    };

    /// A required value was absent.
    pub const NULL_VALUE: Error = Error {
        code: Cow::Borrowed("General.Null"),
        description: Cow::Borrowed("Null value was provided"),
        kind: ErrorKind::Failure,
        errors: Vec::new(),
    };

    /// Create an error of the given kind.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        kind: ErrorKind,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            kind,
            errors: Vec::new(),
        }
    }

    /// A general failure.
    pub fn failure(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::Failure)
    }

    /// A single validation failure.
    pub fn validation(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::Validation)
    }

    /// A general problem.
    pub fn problem(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::Problem)
    }

    /// A missing resource.
    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::NotFound)
    }

    /// A state conflict.
    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::Conflict)
    }

    /// A `'static` reference to [`Error::NONE`].
    pub fn none() -> &'static Error {
        &NONE
    }

    /// The machine-readable code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this is the distinguished "no error" value.
    pub fn is_none(&self) -> bool {
        *self == Error::NONE
    }

    /// Component errors when this error came from a [`ValidationError`].
    pub fn validation_errors(&self) -> Option<&[Error]> {
        if self.kind == ErrorKind::Validation && !self.errors.is_empty() {
            Some(&self.errors)
        } else {
            None
        }
    }
}

/// An aggregate of validation failures.
///
/// The aggregate's own code and description are fixed; the interesting
/// content is the ordered list of component [`Error`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationError {
    errors: Vec<Error>,
}

impl ValidationError {
    /// Code carried by every aggregate validation error.
    pub const CODE: &'static str = "Validation.General";

    /// Description carried by every aggregate validation error.
    pub const DESCRIPTION: &'static str = "One or more validation errors occurred";

    /// Wrap an ordered list of component errors.
    pub fn new(errors: Vec<Error>) -> Self {
        Self { errors }
    }

    /// Collect the errors of every failed outcome, keeping input order.
    ///
    /// Successful outcomes are skipped. Heterogeneous collections can be
    /// passed as `&dyn AsFailure`.
    ///
    /// ```rust,ignore
    /// let aggregate = ValidationError::from_outcomes([
    ///     &name_check as &dyn AsFailure,
    ///     &age_check,
    /// ]);
    /// ```
    pub fn from_outcomes<'a, I, O>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a O>,
        O: AsFailure + ?Sized + 'a,
    {
        Self::new(
            outcomes
                .into_iter()
                .filter_map(AsFailure::as_failure)
                .cloned()
                .collect(),
        )
    }

    /// The component errors, in collection order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Whether no component error was collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Always [`ValidationError::CODE`].
    pub fn code(&self) -> &'static str {
        Self::CODE
    }

    /// Always [`ValidationError::DESCRIPTION`].
    pub fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    /// Always [`ErrorKind::Validation`].
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    /// Consume the aggregate and return its component errors.
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", Self::CODE, Self::DESCRIPTION)?;
        for error in &self.errors {
            write!(f, "; {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(aggregate: ValidationError) -> Self {
        Error {
            code: Cow::Borrowed(ValidationError::CODE),
            description: Cow::Borrowed(ValidationError::DESCRIPTION),
            kind: ErrorKind::Validation,
            errors: aggregate.errors,
        }
    }
}
