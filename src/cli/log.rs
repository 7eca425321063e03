use asn2cidr::Result;
use clap_verbosity_flag::Verbosity;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Initialize the stderr Logger
--------------------------------------------------------------------------------------*/

// Library and binary share the crate name, so one module filter covers both.
pub fn init(verbose: &Verbosity) -> Result<()> {
    stderrlog::new()
        .module(env!("CARGO_CRATE_NAME"))
        .verbosity(verbose.log_level_filter())
        .init()?;

    Ok(())
}
