use crate::core::asn::Asn;
use crate::core::cidr::CidrSet;
use crate::core::resolution::Resolution;
use log::{debug, info, warn};
use std::env::{self, VarError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ runs the scanner with the default resolver configuration and
/// returns the CIDR ranges announced by `asn`. Returns an empty set when the scanner is missing,
/// fails, or reports no ranges; use [Resolver::resolve] to tell those cases apart.
///
/// ```no_run
/// let asn: asn2cidr::Asn = "AS33353".parse()?;
/// for cidr in asn2cidr::get_cidrs(&asn).iter() {
///     println!("{cidr}");
/// }
/// # Ok::<(), asn2cidr::Error>(())
/// ```
pub fn get_cidrs(asn: &Asn) -> CidrSet {
    Resolver::new().resolve(asn).into_cidrs()
}

/*-------------------------------------------------------------------------------------------------
  Resolver Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Resolver] struct.
///
/// ```
/// let resolver = asn2cidr::ResolverBuilder::new()
///     .scanner("/usr/local/bin/nmap")
///     .script("targets-asn")
///     .build();
///
/// assert_eq!(resolver.scanner(), std::path::Path::new("/usr/local/bin/nmap"));
/// ```
///
/// [ResolverBuilder::new] sources initial values from environment variables when they are set;
/// [ResolverBuilder::default] ignores the environment.
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    scanner: PathBuf,
    script: String,
}

/*--------------------------------------------------------------------------------------
  Resolver Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ResolverBuilder {
    /// Create a new [ResolverBuilder] with default configuration values.
    ///
    /// ```
    /// let resolver = asn2cidr::ResolverBuilder::default().build();
    ///
    /// assert_eq!(resolver.scanner(), std::path::Path::new("nmap"));
    /// assert_eq!(resolver.script(), "targets-asn");
    /// ```
    fn default() -> Self {
        Self {
            scanner: PathBuf::from("nmap"),
            script: "targets-asn".to_string(),
        }
    }
}

impl ResolverBuilder {
    /// Create a new [ResolverBuilder] reading initial configuration values from environment
    /// variables when set and default values otherwise:
    /// - `ASN2CIDR_SCANNER`
    /// - `ASN2CIDR_SCRIPT`
    pub fn new() -> Self {
        let default = ResolverBuilder::default();

        Self {
            scanner: get_env_path("ASN2CIDR_SCANNER", default.scanner),
            script: get_env_var("ASN2CIDR_SCRIPT", default.script),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the scanner program, either a name looked up on the `PATH` or a path to the
    /// executable; defaults to `nmap`.
    pub fn scanner<P: AsRef<Path>>(&mut self, scanner: P) -> &mut Self {
        self.scanner = scanner.as_ref().to_path_buf();
        self
    }

    /// Set the NSE script that maps an ASN to its networks; defaults to `targets-asn`.
    pub fn script(&mut self, script: &str) -> &mut Self {
        self.script = script.to_string();
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Resolver {
        Resolver {
            scanner: self.scanner.clone(),
            script: self.script.clone(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Resolver
-------------------------------------------------------------------------------------------------*/

/// Resolves an ASN to the CIDR ranges it announces by running the scanner as a blocking
/// subprocess and matching CIDR-shaped text in its standard output.
///
/// ```no_run
/// use asn2cidr::{Asn, Resolution, Resolver};
///
/// let asn: Asn = "33353".parse()?;
/// match Resolver::new().resolve(&asn) {
///     Resolution::Found(cidrs) => println!("{} CIDR(s)", cidrs.len()),
///     Resolution::ToolNotFound => println!("scanner not installed"),
///     Resolution::ToolFailed(stderr) => println!("scanner failed: {stderr}"),
/// }
/// # Ok::<(), asn2cidr::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    scanner: PathBuf,
    script: String,
}

/*--------------------------------------------------------------------------------------
  Resolver Implementation
--------------------------------------------------------------------------------------*/

impl Default for Resolver {
    fn default() -> Self {
        ResolverBuilder::default().build()
    }
}

impl Resolver {
    pub fn new() -> Self {
        ResolverBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn scanner(&self) -> &Path {
        &self.scanner
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    /// Arguments passed to the scanner for `asn`.
    ///
    /// ```
    /// let asn: asn2cidr::Asn = "AS33353".parse()?;
    /// let resolver = asn2cidr::Resolver::default();
    /// assert_eq!(
    ///     resolver.args(&asn),
    ///     ["--script", "targets-asn", "--script-args=targets-asn.asn=33353"]
    /// );
    /// # Ok::<(), asn2cidr::Error>(())
    /// ```
    pub fn args(&self, asn: &Asn) -> [String; 3] {
        [
            "--script".to_string(),
            self.script.clone(),
            format!("--script-args={}.asn={}", self.script, asn.number()),
        ]
    }

    /*-------------------------------------------------------------------------
      Resolve
    -------------------------------------------------------------------------*/

    /// Run the scanner for `asn` and wait for it to exit.
    pub fn resolve(&self, asn: &Asn) -> Resolution {
        let args = self.args(asn);
        info!("Resolve {}: {:?} {}", asn, self.scanner, args.join(" "));

        let output = match Command::new(&self.scanner).args(&args).output() {
            Ok(output) => output,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                warn!("Scanner not found: {:?}", self.scanner);
                return Resolution::ToolNotFound;
            }
            Err(error) => {
                warn!("Failed to start scanner {:?}: {}", self.scanner, error);
                return Resolution::ToolFailed(error.to_string());
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            warn!("Scanner exited with {}: {}", output.status, stderr.trim_end());
            return Resolution::ToolFailed(stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let cidrs = CidrSet::extract(&stdout);
        debug!(
            "Scanner wrote {} byte(s); matched {} unique CIDR(s)",
            output.stdout.len(),
            cidrs.len()
        );

        Resolution::Found(cidrs)
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value. Empty, blank, and
/// non-Unicode values are invalid.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    match env::var(env_var) {
        Ok(value) if value.trim().is_empty() => {
            warn!("Invalid {}: empty value", env_var);
            default
        }
        Ok(value) => value
            .parse::<T>()
            .inspect(|_| info!("Using {}: {}", env_var, value))
            .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
            .unwrap_or(default),
        Err(VarError::NotUnicode(value)) => {
            warn!("Invalid {}: not valid Unicode: {:?}", env_var, value);
            default
        }
        Err(VarError::NotPresent) => default,
    }
}

/// Get a path from an environment variable or return a default path. Non-Unicode paths are
/// accepted; empty and blank values are invalid.
fn get_env_path(env_var: &str, default: PathBuf) -> PathBuf {
    match env::var_os(env_var) {
        Some(value) if value.to_string_lossy().trim().is_empty() => {
            warn!("Invalid {}: empty value", env_var);
            default
        }
        Some(value) => {
            info!("Using {}: {:?}", env_var, value);
            PathBuf::from(value)
        }
        None => default,
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{OsStr, OsString};
    use std::sync::Mutex;
    use test_log::test;

    fn test_asn() -> Asn {
        "AS33353".parse().unwrap()
    }

    /*-------------------------------------------------------------------------
      Test Environment Variable Configuration
    -------------------------------------------------------------------------*/

    // Tests in this module share the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Run `test` with the scanner environment variables set to `values` (`None` unsets), then
    /// restore the previous values.
    fn with_env_vars(values: [(&str, Option<&OsStr>); 2], test: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        // Store environment variable values
        let stored_env_vars: Vec<(&str, Option<OsString>)> = values
            .iter()
            .map(|(env_var, _)| (*env_var, env::var_os(env_var)))
            .collect();

        for (env_var, value) in values.iter() {
            match value {
                Some(value) => env::set_var(env_var, value),
                None => env::remove_var(env_var),
            }
        }

        test();

        // Reset environment variables
        for (env_var, value) in stored_env_vars {
            match value {
                Some(value) => env::set_var(env_var, value),
                None => env::remove_var(env_var),
            }
        }
    }

    /// ENV_VAR: ASN2CIDR_SCANNER
    /// ENV_VAR: ASN2CIDR_SCRIPT
    #[test]
    fn test_environment_variable_configuration() {
        let default = Resolver::default();

        // Test default cases
        with_env_vars([("ASN2CIDR_SCANNER", None), ("ASN2CIDR_SCRIPT", None)], || {
            let new = Resolver::new();
            assert_eq!(new.scanner(), default.scanner());
            assert_eq!(new.script(), default.script());
        });

        // Test environment variable configuration
        with_env_vars(
            [
                ("ASN2CIDR_SCANNER", Some(OsStr::new("/opt/nmap/bin/nmap"))),
                ("ASN2CIDR_SCRIPT", Some(OsStr::new("my-targets-asn"))),
            ],
            || {
                let env_config = Resolver::new();
                assert_eq!(env_config.scanner(), Path::new("/opt/nmap/bin/nmap"));
                assert_eq!(env_config.script(), "my-targets-asn");
                assert_eq!(
                    env_config.args(&test_asn())[2],
                    "--script-args=my-targets-asn.asn=33353"
                );
            },
        );
    }

    /// ENV_VAR: ASN2CIDR_SCANNER
    /// ENV_VAR: ASN2CIDR_SCRIPT
    #[test]
    fn test_empty_environment_variables_use_defaults() {
        for blank in ["", "  ", "\t\n"] {
            with_env_vars(
                [
                    ("ASN2CIDR_SCANNER", Some(OsStr::new(blank))),
                    ("ASN2CIDR_SCRIPT", Some(OsStr::new(blank))),
                ],
                || {
                    let resolver = Resolver::new();
                    assert_eq!(resolver.scanner(), Path::new("nmap"), "value: {blank:?}");
                    assert_eq!(resolver.script(), "targets-asn", "value: {blank:?}");
                    assert_eq!(
                        resolver.args(&test_asn())[2],
                        "--script-args=targets-asn.asn=33353"
                    );
                },
            );
        }
    }

    /// ENV_VAR: ASN2CIDR_SCANNER
    /// ENV_VAR: ASN2CIDR_SCRIPT
    #[cfg(unix)]
    #[test]
    fn test_non_unicode_environment_variables() {
        use std::os::unix::ffi::OsStrExt;

        let non_unicode = OsStr::from_bytes(b"/opt/nm\xffap/nmap");
        with_env_vars(
            [
                ("ASN2CIDR_SCANNER", Some(non_unicode)),
                ("ASN2CIDR_SCRIPT", Some(non_unicode)),
            ],
            || {
                let resolver = Resolver::new();
                assert_eq!(resolver.scanner(), Path::new(non_unicode));
                assert_eq!(resolver.script(), "targets-asn");
            },
        );
    }

    /*-------------------------------------------------------------------------
      Test Getter and Setter Methods
    -------------------------------------------------------------------------*/

    #[test]
    fn test_getter_and_setter_methods() {
        let resolver = ResolverBuilder::default()
            .scanner("./scratch/nmap")
            .script("other-script")
            .build();

        assert_eq!(resolver.scanner(), Path::new("./scratch/nmap"));
        assert_eq!(resolver.script(), "other-script");
    }

    #[test]
    fn test_argument_template() {
        let resolver = Resolver::default();
        assert_eq!(
            resolver.args(&test_asn()),
            [
                "--script",
                "targets-asn",
                "--script-args=targets-asn.asn=33353"
            ]
        );
    }

    /*-------------------------------------------------------------------------
      Test Resolve
    -------------------------------------------------------------------------*/

    #[test]
    fn test_resolve_scanner_not_found() {
        let resolver = ResolverBuilder::default()
            .scanner("asn2cidr-test-scanner-that-does-not-exist")
            .build();

        let resolution = resolver.resolve(&test_asn());
        assert_eq!(resolution, Resolution::ToolNotFound);
        assert!(resolution.into_cidrs().is_empty());
    }

    #[cfg(unix)]
    mod fake_scanner {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use test_log::test;

        /// Write an executable shell script to `./scratch/<name>.sh`.
        fn fake_scanner(name: &str, body: &str, mode: u32) -> PathBuf {
            let path: PathBuf = [".", "scratch", &format!("{name}.sh")].iter().collect();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
            path
        }

        /// FILE: ./scratch/test_resolve_found.sh
        #[test]
        fn test_resolve_found() {
            let scanner = fake_scanner(
                "test_resolve_found",
                "printf '| targets-asn:\\n|   AS33353\\n|     192.168.1.0/24\\n|     10.0.0.0/8\\n|_    192.168.1.0/24\\n'",
                0o755,
            );
            let resolver = ResolverBuilder::default().scanner(&scanner).build();

            let cidrs = resolver.resolve(&test_asn()).into_cidrs();
            assert_eq!(cidrs.iter().collect::<Vec<_>>(), ["10.0.0.0/8", "192.168.1.0/24"]);
        }

        /// FILE: ./scratch/test_resolve_receives_asn.sh
        #[test]
        fn test_resolve_receives_asn() {
            // Echo the arguments back as an address so the match shows what was passed.
            let scanner = fake_scanner(
                "test_resolve_receives_asn",
                "[ \"$1\" = --script ] && [ \"$2\" = targets-asn ] && [ \"$3\" = --script-args=targets-asn.asn=33353 ] && echo 1.2.3.4/32",
                0o755,
            );
            let resolver = ResolverBuilder::default().scanner(&scanner).build();

            let cidrs = resolver.resolve(&test_asn()).into_cidrs();
            assert_eq!(cidrs.to_text(), "1.2.3.4/32");
        }

        /// FILE: ./scratch/test_resolve_no_matches.sh
        #[test]
        fn test_resolve_no_matches() {
            let scanner = fake_scanner(
                "test_resolve_no_matches",
                "echo 'Nmap done: 0 IP addresses (0 hosts up) scanned'",
                0o755,
            );
            let resolver = ResolverBuilder::default().scanner(&scanner).build();

            assert_eq!(
                resolver.resolve(&test_asn()),
                Resolution::Found(CidrSet::new())
            );
        }

        /// FILE: ./scratch/test_resolve_non_utf8_output.sh
        #[test]
        fn test_resolve_non_utf8_output() {
            let scanner = fake_scanner(
                "test_resolve_non_utf8_output",
                "printf '\\377\\376 10.0.0.0/8 \\377'",
                0o755,
            );
            let resolver = ResolverBuilder::default().scanner(&scanner).build();

            let resolution = resolver.resolve(&test_asn());
            assert_eq!(
                resolution,
                Resolution::Found(CidrSet::extract("10.0.0.0/8"))
            );
        }

        /// FILE: ./scratch/test_resolve_tool_failed.sh
        #[test]
        fn test_resolve_tool_failed() {
            let scanner = fake_scanner(
                "test_resolve_tool_failed",
                "echo 10.0.0.0/8; echo 'NSE: failed to initialize the script engine' >&2; exit 1",
                0o755,
            );
            let resolver = ResolverBuilder::default().scanner(&scanner).build();

            let resolution = resolver.resolve(&test_asn());
            assert_eq!(
                resolution,
                Resolution::ToolFailed("NSE: failed to initialize the script engine\n".to_string())
            );
            assert!(resolution.cidrs().is_empty());
        }

        /// FILE: ./scratch/test_resolve_not_executable.sh
        #[test]
        fn test_resolve_not_executable() {
            let scanner = fake_scanner("test_resolve_not_executable", "echo 10.0.0.0/8", 0o644);
            let resolver = ResolverBuilder::default().scanner(&scanner).build();

            let resolution = resolver.resolve(&test_asn());
            assert!(matches!(resolution, Resolution::ToolFailed(_)));
            assert!(resolution.into_cidrs().is_empty());
        }
    }
}
