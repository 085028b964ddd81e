use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

/// Which log field(s) each clause matches against.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FieldMode {
    Source,
    Destination,
    Both,
    /// Anything not recognised as a mode. Clauses for it are empty.
    Invalid,
}

impl From<&str> for FieldMode {
    fn from(s: &str) -> Self {
        match s {
            "src" => FieldMode::Source,
            "dest" | "dst" => FieldMode::Destination,
            "both" => FieldMode::Both,
            _ => FieldMode::Invalid,
        }
    }
}

impl FromStr for FieldMode {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldMode::from(s))
    }
}

impl Display for FieldMode {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let s = match self {
            FieldMode::Source => "src",
            FieldMode::Destination => "dest",
            FieldMode::Both => "both",
            FieldMode::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

impl FieldMode {
    fn write_clause(&self, out: &mut String, addr: &str) {
        match self {
            FieldMode::Source => {
                out.push_str("src_ip=");
                out.push_str(addr);
            }
            FieldMode::Destination => {
                out.push_str("dest_ip=");
                out.push_str(addr);
            }
            FieldMode::Both => {
                out.push_str("(src_ip=");
                out.push_str(addr);
                out.push_str(" OR dest_ip=");
                out.push_str(addr);
                out.push(')');
            }
            FieldMode::Invalid => {}
        }
    }
}

const PREFIX: &str = "index=firewall (";

/// Accumulates addresses into `index=firewall (<clause> OR <clause> ...)`.
///
/// Clauses keep insertion order. Addresses are not deduplicated, escaped or
/// checked, so an empty address produces a clause like `src_ip=`. The builder
/// is consumed by [`QueryBuilder::finish`].
#[derive(Debug)]
pub struct QueryBuilder {
    mode: FieldMode,
    spl: String,
    count: usize,
}

impl QueryBuilder {
    pub fn new(mode: FieldMode) -> Self {
        QueryBuilder {
            mode,
            spl: PREFIX.to_owned(),
            count: 0,
        }
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    pub fn push(&mut self, addr: String) {
        if self.count > 0 {
            self.spl.push_str(" OR ");
        }
        self.mode.write_clause(&mut self.spl, &addr);
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn finish(mut self) -> String {
        self.spl.push(')');
        self.spl
    }
}

impl Extend<String> for QueryBuilder {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for addr in iter {
            self.push(addr);
        }
    }
}
