//! The benchmark itself.
//!
//! Two batches of plates are generated: one to fill a container with and another to look up in
//! it. The same is then done with the [`HashTrieSet`] and with a [`BTreeSet`] and both are timed.
//! As both contain the very same plates, they must find the same number of them.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::generator::{PlateGenerator, DEFAULT_SEED};
use crate::hashing::{KeyHasher, Strategy};
use crate::plate::VehiclePlate;
use crate::set::HashTrieSet;

/// How many plates go into each batch by default.
pub const PLATE_COUNT: usize = 1_000_000;

/// Parameters of a benchmark run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BenchConfig {
    /// Size of both the fill and the find batch.
    pub count: usize,
    /// Seed of the plate generator.
    pub seed: u64,
    /// Hash strategy used by the hash set phase.
    pub strategy: Strategy,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            count: PLATE_COUNT,
            seed: DEFAULT_SEED,
            strategy: Strategy::Polynomial,
        }
    }
}

/// Logs how long it lived when dropped.
///
/// ```rust
/// use platebench::benchmark::LogDuration;
///
/// let guard = LogDuration::new("sleeping");
/// std::thread::sleep(std::time::Duration::from_millis(1));
/// assert!(guard.elapsed().as_millis() >= 1);
/// ```
#[derive(Debug)]
pub struct LogDuration {
    name: String,
    start: Instant,
}

impl LogDuration {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        info!("{}: {} ms", self.name, self.elapsed().as_millis());
    }
}

/// The fill and find batches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Batches {
    /// Plates to put into the container.
    pub fill: Vec<VehiclePlate>,
    /// Plates to look up in the container.
    pub find: Vec<VehiclePlate>,
}

impl Batches {
    /// Generates `count` fill plates, followed by `count` find plates.
    pub fn generate(generator: &mut PlateGenerator, count: usize) -> Self {
        let fill = generator.batch(count);
        let find = generator.batch(count);
        Self { fill, find }
    }
}

/// Result of one timed phase.
#[derive(Clone, Debug)]
pub struct PhaseReport {
    pub name: String,
    /// How many of the find plates were present.
    pub found: usize,
    /// How long building the container and looking up everything took.
    pub elapsed: Duration,
}

/// Results of the whole run.
#[derive(Clone, Debug)]
pub struct Report {
    pub hashed: PhaseReport,
    pub ordered: PhaseReport,
}

/// Runs and times one phase.
///
/// The phase is expected to return the number of found plates.
pub fn run_phase<N, F>(name: N, phase: F) -> PhaseReport
where
    N: Into<String>,
    F: FnOnce() -> usize,
{
    let guard = LogDuration::new(name);
    let found = phase();
    let elapsed = guard.elapsed();
    let name = guard.name.clone();
    drop(guard);
    PhaseReport {
        name,
        found,
        elapsed,
    }
}

fn hashed_set<S>(batches: &Batches, hasher: S) -> HashTrieSet<VehiclePlate, S>
where
    S: KeyHasher<VehiclePlate>,
{
    let mut set = HashTrieSet::with_hasher(hasher);
    set.extend(batches.fill.iter().cloned());
    set
}

fn count_found<F: Fn(&VehiclePlate) -> bool>(batches: &Batches, contains: F) -> usize {
    batches.find.iter().filter(|plate| contains(plate)).count()
}

/// Fills a [`HashTrieSet`] using the given hasher and counts how many of the find plates are in.
pub fn count_hashed<S>(batches: &Batches, hasher: S) -> usize
where
    S: KeyHasher<VehiclePlate>,
{
    let set = hashed_set(batches, hasher);
    count_found(batches, |plate| set.contains(plate))
}

/// Fills a [`BTreeSet`] and counts how many of the find plates are in.
pub fn count_ordered(batches: &Batches) -> usize {
    let set = batches.fill.iter().cloned().collect::<BTreeSet<_>>();
    count_found(batches, |plate| set.contains(plate))
}

/// The timed hash set phase, logging the shape of the trie at the debug level.
fn hashed_phase(batches: &Batches, strategy: Strategy) -> PhaseReport {
    run_phase(format!("hash trie ({})", strategy), || {
        let set = hashed_set(batches, strategy);
        debug!("{} hasher: {:?}", strategy, set.shape());
        count_found(batches, |plate| set.contains(plate))
    })
}

/// Runs the hash set phase with every [`Strategy`], from the worst to the best one.
pub fn compare_strategies(batches: &Batches) -> Vec<PhaseReport> {
    Strategy::ALL
        .iter()
        .map(|&strategy| hashed_phase(batches, strategy))
        .collect()
}

/// Runs the whole benchmark: generates the batches, then the hash set phase and the tree phase.
pub fn run(config: &BenchConfig) -> Report {
    let mut generator = PlateGenerator::with_seed(config.seed);
    let batches = Batches::generate(&mut generator, config.count);
    debug!(
        "Generated {} fill and {} find plates",
        batches.fill.len(),
        batches.find.len()
    );

    let hashed = hashed_phase(&batches, config.strategy);
    let ordered = run_phase("btree", || count_ordered(&batches));
    Report { hashed, ordered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::PolynomialHasher;

    #[test]
    fn default_config() {
        let config = BenchConfig::default();
        assert_eq!(1_000_000, config.count);
        assert_eq!(DEFAULT_SEED, config.seed);
        assert_eq!(Strategy::Polynomial, config.strategy);
    }

    #[test]
    fn batches_independent() {
        let mut generator = PlateGenerator::new();
        let batches = Batches::generate(&mut generator, 100);
        assert_eq!(100, batches.fill.len());
        assert_eq!(100, batches.find.len());
        assert_ne!(batches.fill, batches.find);
        // Both come from the same sequence, one after another.
        let all = PlateGenerator::new().batch(200);
        assert_eq!(&all[..100], &batches.fill[..]);
        assert_eq!(&all[100..], &batches.find[..]);
    }

    #[test]
    fn finds_own_plates() {
        let mut generator = PlateGenerator::new();
        let fill = generator.batch(500);
        let batches = Batches {
            find: fill.clone(),
            fill,
        };
        assert_eq!(500, count_hashed(&batches, PolynomialHasher));
        assert_eq!(500, count_ordered(&batches));
    }

    #[test]
    fn phase_report() {
        let report = run_phase("answer", || 42);
        assert_eq!("answer", report.name);
        assert_eq!(42, report.found);
    }

    #[test]
    fn small_run() {
        let config = BenchConfig {
            count: 2000,
            ..BenchConfig::default()
        };
        let report = run(&config);
        assert_eq!(report.hashed.found, report.ordered.found);
        assert_eq!("hash trie (polynomial)", report.hashed.name);
        assert_eq!("btree", report.ordered.name);
    }
}
