/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod asn;
pub mod cidr;
pub mod errors;
pub mod resolution;
pub mod resolver;
