use std::fmt;

use super::{Error, ErrorKind, Formats, Result, ValidationContext};

/// A single failing field
///
/// The path is dotted and relative to the model that was validated,
/// e.g. `securityContext.runAsUser` when validating a `PrometheusConfiguration`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    path: String,
    reason: String,
}

impl FieldError {
    pub fn new<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        FieldError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Error for a required field that was not set
    pub fn required(path: &str) -> Self {
        FieldError::new(path, "is required")
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Relabel the error under an enclosing field name
    pub fn prefixed(self, name: &str) -> Self {
        let path = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", name, self.path)
        };
        FieldError { path, ..self }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in body {}", self.path, self.reason)
    }
}

pub(crate) fn format_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Structured field failures carried by a `Validation` error
    ///
    /// Empty for every other kind of error.
    pub fn field_errors(&self) -> &[FieldError] {
        match self.kind() {
            ErrorKind::Validation(errs) => &errs[..],
            _ => &[],
        }
    }
}

/// Validation contract shared by all models
///
/// Implementors provide `validate_with`; the two other entry points are
/// conveniences for validating with or without an ambient context.
pub trait Validate {
    /// Validate against the format registry and an optional context
    ///
    /// Every failure is reported in one composite `ErrorKind::Validation`.
    fn validate_with(&self, ctx: Option<&ValidationContext>, formats: &Formats) -> Result<()>;

    fn validate(&self, formats: &Formats) -> Result<()> {
        self.validate_with(None, formats)
    }

    fn validate_in_context(&self, ctx: &ValidationContext, formats: &Formats) -> Result<()> {
        self.validate_with(Some(ctx), formats)
    }
}

/// Turn collected failures into a result
pub fn composite(res: Vec<FieldError>) -> Result<()> {
    if res.is_empty() {
        return Ok(());
    }
    debug!("validation found {} failure(s)", res.len());
    Err(ErrorKind::Validation(res).into())
}

/// Delegate validation to an optional sub-model
///
/// Nothing is checked when the sub-model is unset. Failures of the sub-model
/// are appended to `res` with `name` prefixed to their paths. Errors that are
/// not validation failures are propagated as is.
pub fn nested<T: Validate>(
    name: &str,
    value: Option<&T>,
    ctx: Option<&ValidationContext>,
    formats: &Formats,
    res: &mut Vec<FieldError>,
) -> Result<()> {
    let value = match value {
        Some(v) => v,
        None => return Ok(()),
    };
    trace!("validating nested {}", name);
    match value.validate_with(ctx, formats) {
        Ok(()) => Ok(()),
        Err(Error(ErrorKind::Validation(errs), _)) => {
            res.extend(errs.into_iter().map(|e| e.prefixed(name)));
            Ok(())
        }
        Err(e) => Err(e),
    }
}
