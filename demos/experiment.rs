//! False-positive/false-negative experiment driver.
//!
//! Reads a parameter file and four line-oriented text corpora, runs ten
//! insert/search/remove phases against one filter, and prints observed
//! accuracy per phase plus totals.
//!
//! Parameter file: four lines — false positive rate `p`, expected element
//! count `n`, size scale `c`, hash-count scale `d`.
//!
//! Run with:
//!
//! ```text
//! cargo run --example experiment --features metrics -- \
//!     setup.txt insert.txt successful.txt failed.txt remove.txt
//! ```

use softbloom::metrics::AccuracyTracker;
use softbloom::SoftDeleteBloomFilter;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::process::ExitCode;

const PHASES: usize = 10;
const INSERTS_PER_PHASE: usize = 1000;
const SEARCHES_PER_PHASE: usize = 100;
const REMOVES_PER_PHASE: usize = 100;

struct Corpus {
    lines: Lines<BufReader<File>>,
}

impl Corpus {
    fn open(path: &str) -> Result<Self, String> {
        let file = File::open(path).map_err(|e| format!("cannot open {path}: {e}"))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    /// Next `count` lines; stops early at end of file.
    fn take(&mut self, count: usize) -> Vec<String> {
        self.lines
            .by_ref()
            .take(count)
            .filter_map(std::result::Result::ok)
            .collect()
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 6 {
        return Err(format!(
            "usage: {} <setup> <insert> <successful> <failed> <remove>",
            args[0]
        ));
    }

    let setup = std::fs::read_to_string(&args[1])
        .map_err(|e| format!("cannot open {}: {e}", args[1]))?;
    let mut params = setup.lines();
    let mut next_param = |name: &str| {
        params
            .next()
            .ok_or_else(|| format!("setup file missing {name}"))
    };
    let p: f64 = next_param("p")?.trim().parse().map_err(|e| format!("p: {e}"))?;
    let n: usize = next_param("n")?.trim().parse().map_err(|e| format!("n: {e}"))?;
    let c: f64 = next_param("c")?.trim().parse().map_err(|e| format!("c: {e}"))?;
    let d: f64 = next_param("d")?.trim().parse().map_err(|e| format!("d: {e}"))?;

    let mut filter =
        SoftDeleteBloomFilter::new(n, p, c, d).map_err(|e| format!("construction: {e}"))?;

    println!("Experiment for values of:");
    println!("p = {p}");
    println!("n = {n}");
    println!("c = {c}");
    println!("d = {d}");
    println!("bit array size = {}", filter.bit_count());
    println!("hash functions = {}", filter.hash_count());
    println!("removal buckets = {}", filter.removal_bucket_count());

    let mut inserts = Corpus::open(&args[2])?;
    let mut successful = Corpus::open(&args[3])?;
    let mut failed = Corpus::open(&args[4])?;
    let mut removes = Corpus::open(&args[5])?;

    let mut totals = AccuracyTracker::new();

    for phase in 1..=PHASES {
        let mut tracker = AccuracyTracker::new();
        let mut false_positive_elements = Vec::new();

        for line in inserts.take(INSERTS_PER_PHASE) {
            filter.insert(&line);
        }

        // Known members: any "absent" verdict is a false negative.
        for line in successful.take(SEARCHES_PER_PHASE) {
            let present = filter.contains(&line);
            tracker.record_positive_query(present);
            totals.record_positive_query(present);
        }

        // Known non-members: any "present" verdict is a false positive.
        for line in failed.take(SEARCHES_PER_PHASE) {
            let present = filter.contains(&line);
            tracker.record_negative_query(present);
            totals.record_negative_query(present);
            if present {
                false_positive_elements.push(line);
            }
        }

        for line in removes.take(REMOVES_PER_PHASE) {
            filter.remove(&line);
        }

        println!("Phase {phase}");
        println!("  false negatives: {}", tracker.false_negatives());
        println!("  false positives: {}", tracker.false_positives());
        println!(
            "  observed false positive rate: {:.4}",
            tracker.false_positive_rate()
        );
        println!("  fill ratio: {:.4}", filter.fill_ratio());
        if !false_positive_elements.is_empty() {
            println!("  false positive elements: {false_positive_elements:?}");
        }
    }

    println!("Totals over {PHASES} phases:");
    println!("  false negatives: {}", totals.false_negatives());
    println!("  false positives: {}", totals.false_positives());
    println!(
        "  observed false positive rate: {:.4}",
        totals.false_positive_rate()
    );
    println!("  soft-deleted elements: {}", filter.soft_deleted_count());

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
