//! Per-generation statistics of a run.

use std::io::Write;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Summary of the fitness values of one population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl FitnessStats {
    pub fn compute(fitness: &Array1<f64>) -> Self {
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            min,
            max,
            mean: fitness.mean().unwrap_or(f64::NAN),
            std: fitness.std(0.0),
        }
    }
}

/// One logbook line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    /// Cumulative number of objective evaluations at the end of `generation`
    pub nfev: usize,
    pub stats: FitnessStats,
}

/// Append-only sequence of generation records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logbook {
    records: Vec<GenerationRecord>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, generation: usize, nfev: usize, stats: FitnessStats) {
        self.records.push(GenerationRecord { generation, nfev, stats });
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the logbook as CSV with header `gen,nfev,min,max,mean,std`.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["gen", "nfev", "min", "max", "mean", "std"])?;
        for r in &self.records {
            wtr.write_record(&[
                r.generation.to_string(),
                r.nfev.to_string(),
                r.stats.min.to_string(),
                r.stats.max.to_string(),
                r.stats.mean.to_string(),
                r.stats.std.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
