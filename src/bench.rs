use crate::error::ArcbenchError;
use crate::record::{Record, Variant};
use crate::HEADER;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rayon::ThreadPoolBuilder;
use std::borrow::Borrow;
use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread::available_parallelism;
use std::time::Instant;
use tracing::{debug, info};

pub const STR_SIZE_MAX: usize = 1024;
pub const ITERATIONS: u64 = 1 << 20;
pub const LOCAL_SCRATCH_SIZE: usize = 100 << 20;

/// Parameters of one benchmark matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub set_sizes: Vec<usize>,
    pub string_lengths: Vec<usize>,
    /// Picks per thread.
    pub iterations: u64,
    pub threads: NonZeroUsize,
    /// Strings kept in each thread's scratch ring.
    pub scratch_slots: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            set_sizes: vec![1, 8, 128],
            string_lengths: vec![16, 32, 64, 512, STR_SIZE_MAX],
            iterations: ITERATIONS,
            threads: hw_threads(),
            scratch_slots: LOCAL_SCRATCH_SIZE / STR_SIZE_MAX,
        }
    }
}

/// Number of hardware threads, one if it cannot be determined.
pub fn hw_threads() -> NonZeroUsize {
    available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ExperimentResult {
    pub operations: u64,
    pub elapsed_seconds: f64,
}

impl ExperimentResult {
    /// Operations and elapsed seconds are both summed over the threads.
    pub fn merge(&mut self, other: ExperimentResult) {
        self.operations += other.operations;
        self.elapsed_seconds += other.elapsed_seconds;
    }

    pub fn throughput(&self) -> f64 {
        if self.elapsed_seconds > 0. {
            self.operations as f64 / self.elapsed_seconds
        } else {
            0.
        }
    }
}

/// A pool of strings that hands out one of them at random on every pick.
pub trait StringSource: Sync {
    type Item: Borrow<String>;

    fn variant(&self) -> Variant;

    fn len(&self) -> usize;

    fn pick<R: Rng>(&self, rng: &mut R) -> Self::Item;
}

#[derive(Debug)]
pub struct ArcSource {
    pool: Vec<Arc<String>>,
}

impl ArcSource {
    pub fn new(strlen: usize, num_strs: usize) -> Result<ArcSource, ArcbenchError> {
        if num_strs == 0 {
            return Err(ArcbenchError::EmptyPool);
        }
        let pool = (0..num_strs)
            .map(|_| Arc::new(random_string(strlen)))
            .collect();
        Ok(ArcSource { pool })
    }
}

impl StringSource for ArcSource {
    type Item = Arc<String>;

    fn variant(&self) -> Variant {
        Variant::Arc
    }

    fn len(&self) -> usize {
        self.pool.len()
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> Arc<String> {
        Arc::clone(&self.pool[rng.gen_range(0..self.pool.len())])
    }
}

#[derive(Debug)]
pub struct CloneSource {
    pool: Vec<String>,
}

impl CloneSource {
    pub fn new(strlen: usize, num_strs: usize) -> Result<CloneSource, ArcbenchError> {
        if num_strs == 0 {
            return Err(ArcbenchError::EmptyPool);
        }
        let pool = (0..num_strs).map(|_| random_string(strlen)).collect();
        Ok(CloneSource { pool })
    }
}

impl StringSource for CloneSource {
    type Item = String;

    fn variant(&self) -> Variant {
        Variant::Clone
    }

    fn len(&self) -> usize {
        self.pool.len()
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> String {
        self.pool[rng.gen_range(0..self.pool.len())].clone()
    }
}

pub fn random_string(n: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(n)
        .map(char::from)
        .collect()
}

/// Stand-in for real work on the picked string.
pub fn string_calculation(s: &str) -> Option<&str> {
    if s.chars().all(char::is_alphanumeric) {
        Some(s)
    } else {
        None
    }
}

/// Pick, compute and write to the scratch ring, `iterations` times.
pub fn thread_loop<S: StringSource>(source: &S, config: &BenchConfig) -> ExperimentResult {
    let slots = config.scratch_slots.max(1);
    let mut scratch: Vec<String> = vec![String::new(); slots];
    let mut rng = rand::thread_rng();
    let mut i = 0usize;
    let now = Instant::now();
    for _ in 0..config.iterations {
        let item = source.pick(&mut rng);
        let s: &String = item.borrow();
        if let Some(out) = string_calculation(s) {
            scratch[i % slots] = out.to_owned();
            i += 1;
        }
    }
    ExperimentResult {
        operations: config.iterations,
        elapsed_seconds: now.elapsed().as_secs_f64(),
    }
}

/// Run `thread_loop` once on every thread of a fresh pool and merge the results.
pub fn experiment<S: StringSource>(
    source: &S,
    config: &BenchConfig,
) -> Result<ExperimentResult, ArcbenchError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.threads.get())
        .build()?;
    let per_thread = pool.broadcast(|_| thread_loop(source, config));
    let mut result = ExperimentResult::default();
    for r in per_thread {
        result.merge(r);
    }
    Ok(result)
}

fn measure<S: StringSource>(
    source: &S,
    strlen: usize,
    config: &BenchConfig,
) -> Result<Record, ArcbenchError> {
    let res = experiment(source, config)?;
    debug!(
        "{} pool of {} strings of length {}: {:?}",
        source.variant().label(),
        source.len(),
        strlen,
        res
    );
    Ok(Record {
        variant: source.variant(),
        set_size: source.len(),
        item_length: strlen,
        thread_count: config.threads,
        operation_count: res.operations,
        elapsed_seconds: res.elapsed_seconds,
        throughput: res.throughput(),
    })
}

/// Write the header and one line per variant, set size and string length.
/// Each line is flushed as soon as it is measured.
pub fn run_matrix<W: Write>(config: &BenchConfig, out: &mut W) -> Result<Vec<Record>, ArcbenchError> {
    writeln!(out, "{}", HEADER)?;
    let mut records = Vec::new();
    for &n in config.set_sizes.iter() {
        info!("set of {} strings", n);
        for &strlen in config.string_lengths.iter() {
            let arc = measure(&ArcSource::new(strlen, n)?, strlen, config)?;
            writeln!(out, "{}", arc)?;
            let clone = measure(&CloneSource::new(strlen, n)?, strlen, config)?;
            writeln!(out, "{}", clone)?;
            out.flush()?;
            records.push(arc);
            records.push(clone);
        }
    }
    Ok(records)
}
