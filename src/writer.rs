use std::io::{self, BufWriter, Write};

use crate::line_source::CHUNK_SIZE;
use crate::store::AggregateStore;

/// Writes `key;mean;min;max` for every observed key, numbers fixed-point
/// with `precision` decimals. Returns the number of lines written.
pub fn write_results<W: Write>(store: &AggregateStore, out: W, precision: usize) -> io::Result<usize> {
    let mut w = BufWriter::with_capacity(CHUNK_SIZE, out);
    let mut written = 0;
    for (key, stat) in store.iter() {
        w.write_all(key)?;
        writeln!(
            w,
            ";{:.p$};{:.p$};{:.p$}",
            stat.mean(),
            stat.min(),
            stat.max(),
            p = precision
        )?;
        written += 1;
    }
    w.flush()?;
    Ok(written)
}
