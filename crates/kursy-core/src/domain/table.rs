use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Partition of the upstream rate tables. Each currency is published in
/// exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateTable {
    A,
    B,
}

impl RateTable {
    /// Order in which tables are tried when the owning table is unknown.
    pub const SEARCH_ORDER: [Self; 2] = [Self::A, Self::B];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl Display for RateTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
