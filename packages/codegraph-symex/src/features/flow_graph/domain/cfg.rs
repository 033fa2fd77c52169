//! Control flow edges

use serde::{Deserialize, Serialize};
use std::fmt;

/// Successor relation kinds.
///
/// A well-formed block has either exactly one `Unconditional` successor or
/// exactly one `True` and one `False` successor, never a mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeKind {
    True,
    False,
    Unconditional,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::True => "TRUE",
            EdgeKind::False => "FALSE",
            EdgeKind::Unconditional => "UNCONDITIONAL",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
