use std::fmt;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

// Error type alias used throughout the crate.
pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Invalid ASN Error
--------------------------------------------------------------------------------------*/

/// Returned when an Autonomous System Number is not numeric once the optional `AS` prefix and
/// surrounding whitespace have been removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidAsnError {
    input: String,
}

impl InvalidAsnError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The raw value that failed validation.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for InvalidAsnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid ASN {:?}: expected a number (e.g., 33353 or AS33353)",
            self.input
        )
    }
}

impl std::error::Error for InvalidAsnError {}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
