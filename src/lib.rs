//! Single-pass `key;value` aggregation.
//!
//! Lines flow from a [`LineSource`] through [`parse_record`] into an
//! [`AggregateStore`], and the store is written once with [`write_results`].
//!
//! ```no_run
//! use brc_stats::{run, AggregateConfig};
//!
//! let config = AggregateConfig::new("measurements.txt", "results.txt");
//! let keys = run(&config).unwrap();
//! println!("{keys} keys");
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};

pub mod config;
pub mod error;
pub mod evaluate;
pub mod line_source;
pub mod record;
pub mod sample;
pub mod statistic;
pub mod store;
pub mod writer;

pub use config::{AggregateConfig, InputMode};
pub use error::{Error, Result};
pub use line_source::LineSource;
pub use record::parse_record;
pub use statistic::RunningStatistic;
pub use store::AggregateStore;
pub use writer::write_results;

/// Folds every well-formed line of `reader` into a new store.
pub fn aggregate_reader<R: BufRead>(reader: R, initial_capacity: usize) -> io::Result<AggregateStore> {
    let mut store = AggregateStore::with_capacity(initial_capacity);
    let mut lines = LineSource::new(reader);
    while let Some(line) = lines.next_line()? {
        if let Some((key, value)) = parse_record(line) {
            store.get_or_create(key).update(value);
        }
    }
    Ok(store)
}

/// Opens `config.input` in the configured mode and aggregates it.
pub fn aggregate_file(config: &AggregateConfig) -> Result<AggregateStore> {
    let path = &config.input;
    let file = File::open(path).map_err(|source| Error::OpenInput {
        path: path.clone(),
        source,
    })?;
    let read_error = |source| Error::ReadInput {
        path: path.clone(),
        source,
    };
    match config.input_mode {
        InputMode::Buffered => {
            let reader = BufReader::with_capacity(line_source::CHUNK_SIZE, file);
            aggregate_reader(reader, config.initial_capacity).map_err(read_error)
        }
        InputMode::Mapped => {
            let len = file.metadata().map_err(read_error)?.len();
            if len == 0 {
                return Ok(AggregateStore::with_capacity(config.initial_capacity));
            }
            // SAFETY: the mapping is read-only and dropped before returning;
            // the input must not be truncated by another process meanwhile.
            let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(|source| Error::MapInput {
                path: path.clone(),
                source,
            })?;
            aggregate_reader(&mmap[..], config.initial_capacity).map_err(read_error)
        }
    }
}

/// Aggregates `config.input` into `config.output`. Returns the number of keys written.
pub fn run(config: &AggregateConfig) -> Result<usize> {
    let store = aggregate_file(config)?;
    let path = &config.output;
    let out = File::create(path).map_err(|source| Error::CreateOutput {
        path: path.clone(),
        source,
    })?;
    write_results(&store, out, config.precision).map_err(|source| Error::WriteOutput {
        path: path.clone(),
        source,
    })
}
