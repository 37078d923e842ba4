//! Per-generation summary fitness statistics and the append-only
//! learning-curve log they are written to.

use crate::agent::Agent;
use core::{cmp::Ordering, fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::Path,
};

/// Best, worst, and average fitness over one generation's survivors. One
/// record is appended to the log per generation and never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningRecord {
    pub best: f64,
    pub worst: f64,
    pub average: f64,
}

impl LearningRecord {
    /// Summarize one generation of survivors. None for an empty slice.
    pub fn over(players: &[Agent]) -> Option<Self> {
        let mut fits: Vec<f64> = players.iter().map(Agent::fitness).collect();
        fits.sort_by(|l, r| r.partial_cmp(l).unwrap_or(Ordering::Equal));

        let (best, worst) = (*fits.first()?, *fits.last()?);
        let average = fits.iter().sum::<f64>() / fits.len() as f64;
        Some(Self {
            best,
            worst,
            average,
        })
    }
}

/// One log line: `best,worst,average`. Integral values keep a trailing
/// `.0` so every column always reads as a float.
impl fmt::Display for LearningRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?},{:?}", self.best, self.worst, self.average)
    }
}

impl FromStr for LearningRecord {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cols = s.trim_end().split(',');
        let mut next = || -> Result<f64, Box<dyn Error>> {
            Ok(cols
                .next()
                .ok_or("expected 3 comma-separated columns")?
                .parse()?)
        };

        let record = Self {
            best: next()?,
            worst: next()?,
            average: next()?,
        };
        if cols.next().is_some() {
            return Err("expected 3 comma-separated columns".into());
        }
        Ok(record)
    }
}

/// Append one record as a single line. The file is created on first use and
/// only ever grows; rotating it is the operator's concern, not the engine's.
pub fn append_record<P: AsRef<Path>>(path: P, record: &LearningRecord) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(file, "{record}")
}

/// Parse every record in a log, in generation order. This is the read side
/// of the log contract, for plotting learning curves downstream.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<LearningRecord>, Box<dyn Error>> {
    fs::read_to_string(path)?
        .lines()
        .map(LearningRecord::from_str)
        .collect()
}
