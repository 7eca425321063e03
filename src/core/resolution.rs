use crate::core::cidr::CidrSet;

/*-------------------------------------------------------------------------------------------------
  Resolution
-------------------------------------------------------------------------------------------------*/

/// Outcome of asking the scanner for the networks announced by an ASN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The scanner exited successfully; the set may be empty.
    Found(CidrSet),

    /// The scanner program was not found on the executable search path.
    ToolNotFound,

    /// The scanner exited with a non-zero status (carries its stderr), or could not be started
    /// (carries the I/O error).
    ToolFailed(String),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// CIDRs found by the scanner; empty when the scanner is missing or failed.
    pub fn cidrs(&self) -> CidrSet {
        match self {
            Resolution::Found(cidrs) => cidrs.clone(),
            Resolution::ToolNotFound | Resolution::ToolFailed(_) => CidrSet::new(),
        }
    }

    pub fn into_cidrs(self) -> CidrSet {
        match self {
            Resolution::Found(cidrs) => cidrs,
            Resolution::ToolNotFound | Resolution::ToolFailed(_) => CidrSet::new(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
