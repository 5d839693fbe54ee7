//! Synthetic input plus an exact truth file, for checking a run end to end.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error as ThisError;

use crate::error::{Error, Result};
use crate::line_source::CHUNK_SIZE;

pub const DEFAULT_SAMPLE: &str = "test_sample.txt";
pub const DEFAULT_TRUTH: &str = "test_sample_results_truth.txt";

pub const CITIES: [&str; 100] = [
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "London", "Manchester",
    "Birmingham", "Liverpool", "Edinburgh", "Paris", "Marseille", "Lyon", "Toulouse", "Nice",
    "Berlin", "Munich", "Frankfurt", "Hamburg", "Cologne", "Rome", "Milan", "Naples", "Turin",
    "Florence", "Madrid", "Barcelona", "Valencia", "Seville", "Bilbao", "Lisbon", "Porto",
    "Braga", "Faro", "Coimbra", "Tokyo", "Osaka", "Kyoto", "Nagoya", "Fukuoka", "Beijing",
    "Shanghai", "Shenzhen", "Guangzhou", "Chengdu", "Seoul", "Busan", "Incheon", "Daegu",
    "Daejeon", "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Cairo", "Alexandria",
    "Giza", "Luxor", "Aswan", "Johannesburg", "Cape Town", "Durban", "Pretoria",
    "Port Elizabeth", "Sydney", "Melbourne", "Brisbane", "Perth", "Adelaide", "Toronto",
    "Vancouver", "Montreal", "Calgary", "Ottawa", "Mexico City", "Guadalajara", "Monterrey",
    "Puebla", "Cancún", "Buenos Aires", "Córdoba", "Rosario", "Mendoza", "La Plata",
    "São Paulo", "Rio de Janeiro", "Brasília", "Salvador", "Recife", "Moscow",
    "Saint Petersburg", "Novosibirsk", "Yekaterinburg", "Kazan", "Istanbul", "Ankara", "Izmir",
    "Antalya", "Bursa",
];

/// Which of the two outputs of [`generate`] failed.
#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("writing sample: {0}")]
    Sample(#[source] io::Error),
    #[error("writing truth: {0}")]
    Truth(#[source] io::Error),
}

#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub cities: Vec<String>,
    pub per_city: usize,
    pub low: f64,
    pub high: f64,
    pub seed: u64,
}

impl Default for SampleSpec {
    fn default() -> Self {
        SampleSpec {
            cities: CITIES.iter().map(|c| c.to_string()).collect(),
            per_city: 1_000_000,
            low: -10.0,
            high: 50.0,
            seed: 42,
        }
    }
}

impl SampleSpec {
    pub fn with_per_city(mut self, per_city: usize) -> Self {
        self.per_city = per_city;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Writes `city;value` lines to `sample` and `city;mean;min;max` to `truth`.
///
/// Values are uniform in `[low, high)`; a degenerate range yields `low`.
/// Numbers use the shortest exact decimal form so they read back unchanged.
pub fn generate<S: Write, T: Write>(
    spec: &SampleSpec,
    sample: S,
    truth: T,
) -> std::result::Result<(), GenerateError> {
    let mut sample = BufWriter::with_capacity(CHUNK_SIZE, sample);
    let mut truth = BufWriter::new(truth);
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let dist = (spec.low < spec.high).then(|| Uniform::new(spec.low, spec.high));

    for city in &spec.cities {
        if spec.per_city == 0 {
            continue;
        }
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for _ in 0..spec.per_city {
            let v = match &dist {
                Some(dist) => rng.sample(dist),
                None => spec.low,
            };
            sum += v;
            min = min.min(v);
            max = max.max(v);
            writeln!(sample, "{city};{v}").map_err(GenerateError::Sample)?;
        }
        let mean = sum / spec.per_city as f64;
        writeln!(truth, "{city};{mean};{min};{max}").map_err(GenerateError::Truth)?;
    }
    sample.flush().map_err(GenerateError::Sample)?;
    truth.flush().map_err(GenerateError::Truth)
}

/// [`generate`] into files.
pub fn generate_files(spec: &SampleSpec, sample: &Path, truth: &Path) -> Result<()> {
    let create = |path: &Path| {
        File::create(path).map_err(|source| Error::CreateOutput {
            path: path.to_path_buf(),
            source,
        })
    };
    let sample_file = create(sample)?;
    let truth_file = create(truth)?;
    generate(spec, sample_file, truth_file).map_err(|err| match err {
        GenerateError::Sample(source) => Error::WriteOutput {
            path: sample.to_path_buf(),
            source,
        },
        GenerateError::Truth(source) => Error::WriteOutput {
            path: truth.to_path_buf(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_spec() -> SampleSpec {
        SampleSpec {
            cities: vec!["A".into(), "B b".into()],
            per_city: 50,
            ..Default::default()
        }
    }

    #[test]
    fn writes_every_value_and_one_truth_line_per_city() {
        let (mut sample, mut truth) = (Vec::new(), Vec::new());
        generate(&small_spec(), &mut sample, &mut truth).unwrap();

        let sample = String::from_utf8(sample).unwrap();
        assert_eq!(sample.lines().count(), 100);
        assert_eq!(sample.lines().filter(|l| l.starts_with("B b;")).count(), 50);
        for line in sample.lines() {
            let (_, v) = line.split_once(';').unwrap();
            let v: f64 = v.parse().unwrap();
            assert!((-10.0..50.0).contains(&v));
        }

        let truth = String::from_utf8(truth).unwrap();
        let keys: Vec<&str> = truth.lines().map(|l| l.split(';').next().unwrap()).collect();
        assert_eq!(keys, vec!["A", "B b"]);
    }

    #[test]
    fn same_seed_same_output() {
        let run = |spec: &SampleSpec| {
            let mut sample = Vec::new();
            generate(spec, &mut sample, io::sink()).unwrap();
            sample
        };
        assert_eq!(run(&small_spec()), run(&small_spec()));
        assert_ne!(run(&small_spec()), run(&small_spec().with_seed(7)));
    }

    #[test]
    fn degenerate_range_repeats_low() {
        let spec = SampleSpec {
            low: 3.0,
            high: 3.0,
            ..small_spec()
        };
        let mut truth = Vec::new();
        generate(&spec, io::sink(), &mut truth).unwrap();
        assert_eq!(String::from_utf8(truth).unwrap(), "A;3;3;3\nB b;3;3;3\n");
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "broken"))
        }
    }

    #[test]
    fn failing_writer_is_named() {
        let err = generate(&small_spec(), io::sink(), BrokenWriter).unwrap_err();
        assert!(matches!(err, GenerateError::Truth(_)));

        let err = generate(&small_spec(), BrokenWriter, io::sink()).unwrap_err();
        assert!(matches!(err, GenerateError::Sample(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn truth_write_error_reports_truth_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let sample_path = dir.path().join("sample.txt");
        let truth_path = Path::new("/dev/full");
        let err = generate_files(&small_spec(), &sample_path, truth_path).unwrap_err();
        match err {
            Error::WriteOutput { path, .. } => assert_eq!(path, truth_path),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn default_spec_covers_all_cities() {
        let spec = SampleSpec::default();
        assert_eq!(spec.cities.len(), 100);
        assert_eq!(spec.per_city, 1_000_000);
        assert_eq!(spec.seed, 42);
    }
}
