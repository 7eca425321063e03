use asn2cidr::{Asn, Resolution, ResolverBuilder, Result};

fn main() -> Result<()> {
    let asn: Asn = "AS33353".parse()?;

    // Resolve with an explicit scanner configuration
    let resolver = ResolverBuilder::new().scanner("nmap").build();
    println!("{:?}", resolver.args(&asn));

    match resolver.resolve(&asn) {
        Resolution::Found(cidrs) => {
            for cidr in cidrs.iter() {
                println!("{cidr}");
            }
            println!("{} CIDR(s) announced by {asn}", cidrs.len());
        }
        Resolution::ToolNotFound => println!("Nmap is not installed or not in PATH."),
        Resolution::ToolFailed(stderr) => println!("Nmap Error: {stderr}"),
    }

    // Extract CIDRs from text you already have
    let cidrs = asn2cidr::CidrSet::extract("2.0.0.0/8 10.0.0.0/8 2.0.0.0/8");
    println!("{}", cidrs.to_text());

    Ok(())
}
