use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "test_sample.txt";
pub const DEFAULT_OUTPUT: &str = "test_sample_results_calculated.txt";
pub const DEFAULT_PRECISION: usize = 6;

/// How the input file is turned into bytes for the line source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Read through a large `BufReader`.
    #[default]
    Buffered,
    /// Memory-map the whole file and scan the mapping.
    Mapped,
}

#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Decimal digits for mean, min and max in the output.
    pub precision: usize,
    /// Starting bucket count of the store, rounded up to a power of two.
    pub initial_capacity: usize,
    pub input_mode: InputMode,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        AggregateConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            precision: DEFAULT_PRECISION,
            initial_capacity: crate::store::DEFAULT_CAPACITY,
            input_mode: InputMode::Buffered,
        }
    }
}

impl AggregateConfig {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        AggregateConfig {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }
}
