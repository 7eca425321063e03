//! Retrieve the IP address ranges (CIDR blocks) announced by an Autonomous System.
//!
//! The lookup is delegated to [Nmap](https://nmap.org)'s `targets-asn` NSE script, which must be
//! installed and on the `PATH` (or configured with `ASN2CIDR_SCANNER`). CIDR-shaped text in the
//! scanner output is collected into a [CidrSet]: unique entries in lexicographic order.
//!
//! ```no_run
//! let asn: asn2cidr::Asn = "AS33353".parse()?;
//! let cidrs = asn2cidr::get_cidrs(&asn);
//! if !cidrs.is_empty() {
//!     cidrs.save(asn.output_file_name())?;
//! }
//! # Ok::<(), asn2cidr::Error>(())
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::asn::Asn;
pub use crate::core::cidr::CidrSet;
pub use crate::core::errors::{Error, InvalidAsnError, Result};
pub use crate::core::resolution::Resolution;
pub use crate::core::resolver::{get_cidrs, Resolver, ResolverBuilder};
