use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Describes the git object type named in an object's header.
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
///
/// Only blobs carry meaning in this crate. The other kinds are opaque tags:
/// their content is stored and retrieved but never interpreted.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl Kind {
    /// The name used for this kind in an object header.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
            Kind::Tag => "tag",
        }
    }
}

impl Default for Kind {
    fn default() -> Self {
        Kind::Blob
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string doesn't name a known object kind.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown object type `{0}`")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(Kind::Blob),
            "tree" => Ok(Kind::Tree),
            "commit" => Ok(Kind::Commit),
            "tag" => Ok(Kind::Tag),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_string() {
        assert_eq!(Kind::Blob.to_string(), "blob");
        assert_eq!(Kind::Commit.to_string(), "commit");
        assert_eq!(Kind::Tree.to_string(), "tree");
        assert_eq!(Kind::Tag.to_string(), "tag");
    }

    #[test]
    fn from_str() {
        for kind in &[Kind::Blob, Kind::Tree, Kind::Commit, Kind::Tag] {
            assert_eq!(kind.name().parse::<Kind>().unwrap(), *kind);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "Blob".parse::<Kind>().unwrap_err();
        assert_eq!(err, ParseKindError("Blob".to_string()));
        assert_eq!(err.to_string(), "unknown object type `Blob`");

        assert!("".parse::<Kind>().is_err());
    }

    #[test]
    fn default_is_blob() {
        assert_eq!(Kind::default(), Kind::Blob);
    }
}
