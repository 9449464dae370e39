use arith_error::Error as ArithError;
use std::io;

/// Utility enum to package errors that can occur while analyzing an expression.
#[derive(Debug)]
pub enum Error {
    /// Errors found while tokenizing, validating or parsing.
    Syntax(Vec<ArithError>),

    /// An error that occurred while enumerating equivalent forms.
    Enumeration(ArithError),
}

impl Error {
    /// The errors in this [`Error`].
    pub fn errors(&self) -> &[ArithError] {
        match self {
            Self::Syntax(errs) => errs,
            Self::Enumeration(err) => std::slice::from_ref(err),
        }
    }

    /// Report the errors in this [`Error`] to stderr.
    pub fn report_to_stderr(&self, input: &str) -> io::Result<()> {
        for err in self.errors() {
            err.report_to_stderr("input", input)?;
        }
        Ok(())
    }
}

impl From<Vec<ArithError>> for Error {
    fn from(errs: Vec<ArithError>) -> Self {
        Self::Syntax(errs)
    }
}

impl From<ArithError> for Error {
    fn from(err: ArithError) -> Self {
        Self::Enumeration(err)
    }
}
