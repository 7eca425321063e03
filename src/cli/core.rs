use crate::cli;
use asn2cidr::{Asn, Error, Resolution, Resolver, Result};
use log::{error, info};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/// Resolve the ASN named on the command line and save its CIDR ranges to `AS<number>.txt` in the
/// current directory. Invalid input, scanner problems, and empty results are reported on stdout
/// and are not errors; only a failed file write is.
pub fn run(args: &cli::Args) -> Result<()> {
    let asn: Asn = match args.asn.parse() {
        Ok(asn) => asn,
        Err(error) => {
            error!("{}", error);
            cli::output::invalid_asn();
            return Ok(());
        }
    };

    let resolution = Resolver::new().resolve(&asn);
    match &resolution {
        Resolution::Found(cidrs) => info!("Found {} CIDR(s) for {}", cidrs.len(), asn),
        Resolution::ToolNotFound => cli::output::tool_not_found(),
        Resolution::ToolFailed(stderr) => cli::output::tool_failed(stderr),
    }

    let cidrs = resolution.into_cidrs();
    if cidrs.is_empty() {
        cli::output::no_results(&asn);
        return Ok(());
    }

    let output_file = asn.output_file_name();
    cidrs.save(&output_file).map_err(|error| {
        Error::from(format!(
            "failed to save CIDR ranges to {output_file}: {error}"
        ))
    })?;
    cli::output::saved(&output_file, cidrs.len());

    Ok(())
}
