use asn2cidr::Asn;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

pub fn invalid_asn() {
    println!("Error: ASN must be a number (e.g., 33353 or AS33353).");
}

pub fn tool_not_found() {
    println!("Nmap is not installed or not in PATH.");
}

pub fn tool_failed(stderr: &str) {
    println!("Nmap Error: {stderr}");
}

pub fn no_results(asn: &Asn) {
    println!("No CIDR ranges found for {asn}.");
}

pub fn saved(output_file: &str, count: usize) {
    println!("CIDR ranges saved to {output_file}");
    println!("Total CIDRs found: {count}");
}
