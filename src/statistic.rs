/// Running `(count, sum, min, max)` of the observations of one key.
///
/// A fresh statistic has `count == 0`; the first [`update`](Self::update)
/// initializes every field from that observation. The mean is derived on
/// read and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningStatistic {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningStatistic {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn update(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
            self.sum = value;
            self.count = 1;
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// Folds another statistic of the same key into this one.
    pub fn merge(&mut self, other: &RunningStatistic) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `sum / count`; only meaningful once the key has been observed.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}
