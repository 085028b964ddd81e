pub mod error;
pub mod normalize;
pub mod query;

pub use error::{Error, Result};
pub use normalize::{normalize, Normalizer};
pub use query::{FieldMode, QueryBuilder};

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads the whole file and splits it into lines.
///
/// Invalid UTF-8 is replaced rather than rejected; `\r\n` endings are
/// stripped along with `\n`.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_owned)
        .collect())
}

/// Normalizes every line and assembles the query for `mode`.
///
/// Lines that normalize to nothing are skipped so they do not turn into
/// `src_ip=` clauses.
pub fn build_query<I, S>(lines: I, mode: FieldMode) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalizer = Normalizer::new();
    let mut query = QueryBuilder::new(mode);
    for (n, line) in lines.into_iter().enumerate() {
        let addr = normalizer.normalize(line.as_ref());
        if addr.is_empty() {
            debug!(line = n + 1, "skipping blank line");
            continue;
        }
        query.push(addr);
    }
    if query.is_empty() {
        warn!(mode = %query.mode(), "no addresses in input");
    } else {
        info!(clauses = query.len(), mode = %query.mode(), "built query");
    }
    query.finish()
}
