use crate::core::errors::Result;
use lazy_static::lazy_static;
use log::info;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  CIDR Pattern
-------------------------------------------------------------------------------------------------*/

lazy_static! {
    // Dotted-quad address with a one or two digit prefix length. Octet and prefix values are not
    // range checked.
    static ref CIDR_PATTERN: Regex =
        Regex::new(r"[0-9]{1,3}(?:\.[0-9]{1,3}){3}/[0-9]{1,2}").unwrap();
}

/*-------------------------------------------------------------------------------------------------
  CIDR Set
-------------------------------------------------------------------------------------------------*/

/// Unique CIDR strings in lexicographic (string) order.
///
/// Ordering compares the text, not the address, so `10.0.0.0/8` sorts before `2.0.0.0/8`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CidrSet {
    cidrs: BTreeSet<String>,
}

impl CidrSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every non-overlapping CIDR-shaped substring of `text`.
    ///
    /// ```
    /// let cidrs = asn2cidr::CidrSet::extract("| 192.0.2.0/24\n| 10.0.0.0/8\n| 192.0.2.0/24");
    /// assert_eq!(cidrs.iter().collect::<Vec<_>>(), ["10.0.0.0/8", "192.0.2.0/24"]);
    /// ```
    pub fn extract(text: &str) -> Self {
        CIDR_PATTERN
            .find_iter(text)
            .map(|found| found.as_str())
            .collect()
    }

    pub fn insert(&mut self, cidr: &str) -> bool {
        self.cidrs.insert(cidr.to_string())
    }

    pub fn len(&self) -> usize {
        self.cidrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cidrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cidrs.iter().map(String::as_str)
    }

    /// One CIDR per line, without a trailing newline.
    pub fn to_text(&self) -> String {
        self.iter().collect::<Vec<&str>>().join("\n")
    }

    /// Write the set to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_text())?;
        info!("Saved {} CIDR(s) to {:?}", self.len(), path);
        Ok(())
    }
}

impl<'s> FromIterator<&'s str> for CidrSet {
    fn from_iter<I: IntoIterator<Item = &'s str>>(iter: I) -> Self {
        Self {
            cidrs: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

impl IntoIterator for CidrSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.cidrs.into_iter()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
