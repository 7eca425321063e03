use crate::core::errors::InvalidAsnError;
use log::debug;
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Autonomous System Number
-------------------------------------------------------------------------------------------------*/

/// A validated Autonomous System Number.
///
/// Parsing accepts the bare number or the number with an `AS` prefix in any letter case, with
/// surrounding whitespace. The digits are kept exactly as entered, including leading zeros.
///
/// ```
/// use asn2cidr::Asn;
///
/// let asn: Asn = "as33353".parse()?;
/// assert_eq!(asn.number(), "33353");
/// assert_eq!(asn.to_string(), "AS33353");
/// assert_eq!(asn.output_file_name(), "AS33353.txt");
/// # Ok::<(), asn2cidr::Error>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Asn {
    number: String,
}

impl Asn {
    /// The ASN digits without the `AS` prefix.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Name of the file the CIDR ranges for this ASN are saved to: `AS<number>.txt`.
    pub fn output_file_name(&self) -> String {
        format!("{self}.txt")
    }
}

impl FromStr for Asn {
    type Err = InvalidAsnError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_uppercase();
        let normalized = normalized.trim();
        let number = normalized.strip_prefix("AS").unwrap_or(normalized);

        if number.is_empty() || !number.bytes().all(|byte| byte.is_ascii_digit()) {
            debug!("Rejected ASN input: {:?}", value);
            return Err(InvalidAsnError::new(value));
        }

        Ok(Asn {
            number: number.to_string(),
        })
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{}", self.number)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
