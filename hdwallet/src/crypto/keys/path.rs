//! Textual derivation paths such as `m/44'/0'/0'/0/7`

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use super::extended::HARDENED_OFFSET;

/// An ordered list of child indices starting at the master key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// The empty path (`m`)
    pub fn master() -> Self {
        Self::default()
    }

    /// This path extended by one index
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        let rest = match path.strip_prefix('m') {
            Some("") => return Ok(Self::master()),
            Some(rest) => rest
                .strip_prefix('/')
                .ok_or_else(|| Error::InvalidPath(path.to_string()))?,
            None => return Err(Error::InvalidPath(path.to_string())),
        };

        let mut indices = Vec::new();
        for component in rest.split('/') {
            if component.is_empty() {
                continue;
            }

            let (digits, hardened) = match component.strip_suffix(&['\'', 'h', 'H'][..]) {
                Some(digits) => (digits, true),
                None => (component, false),
            };

            let index = digits.parse::<u32>().map_err(|_| {
                Error::InvalidPath(format!("Invalid derivation path component: {}", component))
            })?;
            if index >= HARDENED_OFFSET {
                return Err(Error::InvalidPath(format!(
                    "Index out of range in component: {}",
                    component
                )));
            }

            indices.push(if hardened { index + HARDENED_OFFSET } else { index });
        }

        Ok(Self(indices))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            if *index >= HARDENED_OFFSET {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bip44_path() {
        let path: DerivationPath = "m/44'/0'/0'/0/7".parse().unwrap();
        assert_eq!(
            path.as_slice(),
            &[
                HARDENED_OFFSET + 44,
                HARDENED_OFFSET,
                HARDENED_OFFSET,
                0,
                7
            ]
        );
        assert_eq!(path.to_string(), "m/44'/0'/0'/0/7");
    }

    #[test]
    fn test_parse_h_suffix_and_trailing_slash() {
        let path: DerivationPath = "m/0h/1H/".parse().unwrap();
        assert_eq!(path, DerivationPath::master().child(HARDENED_OFFSET).child(HARDENED_OFFSET + 1));
    }

    #[test]
    fn test_master_path() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "m");
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["", "44'/0'", "m44", "m/x", "m/2147483648", "m/-1", "m/1''"] {
            assert!(
                matches!(path.parse::<DerivationPath>(), Err(Error::InvalidPath(_))),
                "{} should be rejected",
                path
            );
        }
    }
}
