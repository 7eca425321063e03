use clap::Parser;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Retrieve CIDR ranges for a given ASN using Nmap.", long_about = None)]
pub struct Args {
    /// Autonomous System Number (e.g., 33353 or AS33353)
    #[arg(long)]
    pub asn: String,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
