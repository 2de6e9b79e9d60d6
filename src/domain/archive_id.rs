use std::fmt;
use std::str::FromStr;

use rand::Rng;

/// Opaque, URL-safe identifier of one archive job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveId(String);

impl ArchiveId {
    pub const LENGTH: usize = 32;
    pub const ALPHABET: &'static [u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";

    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..Self::LENGTH)
            .map(|_| Self::ALPHABET[rng.random_range(0..Self::ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.0)
    }
}

impl FromStr for ArchiveId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::LENGTH {
            return Err(format!(
                "Invalid archive id length: expected {}, got {}",
                Self::LENGTH,
                s.len()
            ));
        }
        if let Some(c) = s.bytes().find(|b| !Self::ALPHABET.contains(b)) {
            return Err(format!("Invalid character in archive id: {:?}", c as char));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
