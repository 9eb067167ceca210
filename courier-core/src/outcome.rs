//! The universal return contract of request handlers.
//!
//! Handlers never throw business failures; they return an [`Outcome`]:
//! either `Success(value)` or `Failure(error)`. A success never carries an
//! error and a failure never carries [`Error::NONE`].
//!
//! Misusing an outcome (reading the value of a failure, building a failure
//! from the "no error" value) is a programming error and panics. The
//! `try_*` variants report the same conditions as [`OutcomeError`].

use crate::{error::OutcomeError, failure::Error};

/// Success with a value, or failure with a structured [`Error`].
///
/// The representation is private: every outcome is built through a checked
/// constructor, so a failure can never carry [`Error::NONE`]. Match on
/// [`Outcome::as_view`] or convert with [`Outcome::into_result`].
///
/// ```compile_fail
/// use courier_core::{Error, Outcome};
///
/// let _ = Outcome::<u8>::Failure(Error::NONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an outcome may be a failure that should be inspected"]
pub struct Outcome<T>(Repr<T>);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr<T> {
    Success(T),
    Failure(Error),
}

/// A borrowed view of an [`Outcome`], for pattern matching.
#[derive(Debug, PartialEq, Eq)]
pub enum OutcomeRef<'a, T> {
    /// The operation succeeded with this value.
    Success(&'a T),
    /// The operation failed with this error.
    Failure(&'a Error),
}

impl<T> Clone for OutcomeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OutcomeRef<'_, T> {}

impl<T> Outcome<T> {
    /// A successful outcome carrying `value`.
    pub fn success(value: T) -> Self {
        Outcome(Repr::Success(value))
    }

    /// A failed outcome.
    ///
    /// # Panics
    ///
    /// Panics if `error` is [`Error::NONE`]; a failure must say what failed.
    #[track_caller]
    pub fn failure(error: impl Into<Error>) -> Self {
        match Self::try_failure(error) {
            Ok(outcome) => outcome,
            Err(err) => panic!("{err}"),
        }
    }

    /// A failed outcome, rejecting [`Error::NONE`].
    pub fn try_failure(error: impl Into<Error>) -> Result<Self, OutcomeError> {
        let error = error.into();
        if error.is_none() {
            return Err(OutcomeError::FailureWithoutError);
        }
        Ok(Outcome(Repr::Failure(error)))
    }

    /// `Success(value)` when a value is present, otherwise a failure with
    /// [`Error::NULL_VALUE`].
    pub fn create(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome(Repr::Success(value)),
            None => Outcome(Repr::Failure(Error::NULL_VALUE)),
        }
    }

    /// Checked construction from a success flag, an optional value and an
    /// error.
    ///
    /// Rejects a success that carries a real error, a failure that carries
    /// [`Error::NONE`], and a success without a value.
    pub fn from_parts(is_success: bool, value: Option<T>, error: Error) -> Result<Self, OutcomeError> {
        match (is_success, error.is_none()) {
            (true, false) => Err(OutcomeError::SuccessWithError(error)),
            (false, true) => Err(OutcomeError::FailureWithoutError),
            (true, true) => value
                .map(Outcome::success)
                .ok_or(OutcomeError::SuccessWithoutValue),
            (false, false) => Ok(Outcome(Repr::Failure(error))),
        }
    }

    /// Whether the outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self.0, Repr::Success(_))
    }

    /// Whether the outcome is a failure.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrow the outcome as a matchable view.
    ///
    /// ```rust,ignore
    /// match outcome.as_view() {
    ///     OutcomeRef::Success(user) => render(user),
    ///     OutcomeRef::Failure(error) => report(error),
    /// }
    /// ```
    pub fn as_view(&self) -> OutcomeRef<'_, T> {
        match &self.0 {
            Repr::Success(value) => OutcomeRef::Success(value),
            Repr::Failure(error) => OutcomeRef::Failure(error),
        }
    }

    /// The error of a failure, or [`Error::NONE`] for a success.
    pub fn error(&self) -> &Error {
        match &self.0 {
            Repr::Success(_) => Error::none(),
            Repr::Failure(error) => error,
        }
    }

    /// The success value.
    ///
    /// # Panics
    ///
    /// Panics on a failure. Check [`Outcome::is_success`] first, or use
    /// [`Outcome::try_value`].
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.try_value() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// The success value, or [`OutcomeError::ValueOfFailure`].
    pub fn try_value(&self) -> Result<&T, OutcomeError> {
        match &self.0 {
            Repr::Success(value) => Ok(value),
            Repr::Failure(error) => Err(OutcomeError::ValueOfFailure(error.clone())),
        }
    }

    /// Consume the outcome and return the success value.
    ///
    /// # Panics
    ///
    /// Panics on a failure.
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.0 {
            Repr::Success(value) => value,
            Repr::Failure(error) => panic!("{}", OutcomeError::ValueOfFailure(error)),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, Error> {
        match self.0 {
            Repr::Success(value) => Ok(value),
            Repr::Failure(error) => Err(error),
        }
    }

    /// Borrow the success value, if any.
    pub fn ok(&self) -> Option<&T> {
        match &self.0 {
            Repr::Success(value) => Some(value),
            Repr::Failure(_) => None,
        }
    }

    /// Transform the success value, keeping a failure unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self.0 {
            Repr::Success(value) => Outcome(Repr::Success(f(value))),
            Repr::Failure(error) => Outcome(Repr::Failure(error)),
        }
    }

    /// Chain another fallible step on success.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self.0 {
            Repr::Success(value) => f(value),
            Repr::Failure(error) => Outcome(Repr::Failure(error)),
        }
    }

    /// Drop the value, keeping only success or the error.
    pub fn discard(self) -> Outcome<()> {
        self.map(|_| ())
    }

    /// Fold both branches into one value.
    pub fn match_with<R>(self, on_success: impl FnOnce(T) -> R, on_failure: impl FnOnce(Error) -> R) -> R {
        match self.0 {
            Repr::Success(value) => on_success(value),
            Repr::Failure(error) => on_failure(error),
        }
    }
}

impl Outcome<()> {
    /// A successful outcome without a value.
    pub fn completed() -> Self {
        Outcome(Repr::Success(()))
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        Outcome::create(value)
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

/// Type-erased view of an outcome's failure.
///
/// Implemented by every `Outcome<T>`, so outcomes of different value types
/// can be inspected together (see
/// [`ValidationError::from_outcomes`](crate::ValidationError::from_outcomes)).
pub trait AsFailure {
    /// The error when the outcome is a failure.
    fn as_failure(&self) -> Option<&Error>;
}

impl<T> AsFailure for Outcome<T> {
    fn as_failure(&self) -> Option<&Error> {
        match &self.0 {
            Repr::Success(_) => None,
            Repr::Failure(error) => Some(error),
        }
    }
}

impl<A: AsFailure + ?Sized> AsFailure for &A {
    fn as_failure(&self) -> Option<&Error> {
        (**self).as_failure()
    }
}
