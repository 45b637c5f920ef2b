use crate::observer::{SwarmObserver, SwarmSnapshot};
use log::warn;
use std::error::Error;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Rows buffered in memory before a CSV block is written.
pub const DEFAULT_BLOCK_ROWS: usize = 10_000;

/// State of one particle at one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRow {
    /// Iteration number (0 = initial population)
    pub iteration: usize,
    /// Particle index
    pub particle: usize,
    /// Position
    pub position: [f64; 2],
    /// Velocity
    pub velocity: [f64; 2],
    /// Cost at the position
    pub value: f64,
    /// Personal best cost
    pub best_value: f64,
    /// Swarm best cost
    pub global_best_value: f64,
}

/// Records every particle state of a search into CSV blocks
#[derive(Debug)]
pub struct TrajectoryRecorder {
    /// Run name (used for CSV filenames)
    name: String,
    /// Output directory for CSV files
    output_dir: PathBuf,
    /// Rows not yet written
    rows: Vec<TrajectoryRow>,
    /// Rows per block
    block_rows: usize,
    /// Rows recorded so far
    total_rows: usize,
    /// Best global value seen so far
    best_value: Option<f64>,
    /// Blocks written so far
    block_counter: usize,
    /// First write failure, reported by `finalize`
    first_error: Option<Box<dyn Error>>,
}

impl TrajectoryRecorder {
    /// Create a recorder writing `<output_dir>/<name>_block_NNNN.csv`
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            output_dir: output_dir.into(),
            rows: Vec::new(),
            block_rows: DEFAULT_BLOCK_ROWS,
            total_rows: 0,
            best_value: None,
            block_counter: 0,
            first_error: None,
        }
    }

    /// Change how many rows go into one CSV block
    pub fn with_block_rows(mut self, block_rows: usize) -> Self {
        self.block_rows = block_rows.max(1);
        self
    }

    /// Directory the blocks are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Record every particle of one snapshot
    pub fn record(&mut self, snapshot: &SwarmSnapshot<'_>) {
        for (i, p) in snapshot.particles.iter().enumerate() {
            self.rows.push(TrajectoryRow {
                iteration: snapshot.iteration,
                particle: i,
                position: p.position,
                velocity: p.velocity,
                value: p.value,
                best_value: p.best_value,
                global_best_value: snapshot.global_best_value,
            });
            self.total_rows += 1;
            if self.rows.len() >= self.block_rows {
                self.flush_block();
            }
        }
        self.best_value = Some(match self.best_value {
            Some(best) if best <= snapshot.global_best_value => best,
            _ => snapshot.global_best_value,
        });
    }

    fn block_path(&self, block_id: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_block_{:04}.csv", self.name, block_id))
    }

    fn flush_block(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.rows);
        self.block_counter += 1;
        let block_id = self.block_counter;
        if let Err(e) = self.save_block_to_csv(&rows, block_id) {
            warn!("Failed to save trajectory block {}: {}", block_id, e);
            if self.first_error.is_none() {
                self.first_error = Some(e);
            }
        }
    }

    /// Save a block of rows to CSV file
    fn save_block_to_csv(
        &self,
        rows: &[TrajectoryRow],
        block_id: usize,
    ) -> Result<(), Box<dyn Error>> {
        create_dir_all(&self.output_dir)?;

        let mut file = BufWriter::new(File::create(self.block_path(block_id))?);
        writeln!(
            file,
            "iteration,particle,x,y,vx,vy,value,best_value,global_best_value"
        )?;
        for r in rows {
            writeln!(
                file,
                "{},{},{:.16},{:.16},{:.16},{:.16},{:.16},{:.16},{:.16}",
                r.iteration,
                r.particle,
                r.position[0],
                r.position[1],
                r.velocity[0],
                r.velocity[1],
                r.value,
                r.best_value,
                r.global_best_value
            )?;
        }
        file.flush()?;
        Ok(())
    }

    /// Save remaining rows and the summary, returning every block path
    ///
    /// # Errors
    ///
    /// The first write failure seen during the run, or a failure while
    /// writing the last block or the summary.
    pub fn finalize(&mut self) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        self.flush_block();
        if let Some(e) = self.first_error.take() {
            return Err(e);
        }
        self.save_summary()?;
        Ok((1..=self.block_counter)
            .map(|id| self.block_path(id))
            .collect())
    }

    /// Save summary file with metadata
    fn save_summary(&self) -> Result<(), Box<dyn Error>> {
        create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}_summary.txt", self.name));
        let mut file = File::create(path)?;

        writeln!(file, "Run: {}", self.name)?;
        writeln!(file, "Total rows: {}", self.total_rows)?;
        writeln!(file, "Total blocks: {}", self.block_counter)?;
        writeln!(file, "Best value found: {:?}", self.best_value)?;
        writeln!(file, "Block files:")?;
        for block_id in 1..=self.block_counter {
            writeln!(file, "  {}_block_{:04}.csv", self.name, block_id)?;
        }
        Ok(())
    }

    /// Rows recorded, best global value and blocks written so far
    pub fn stats(&self) -> (usize, Option<f64>, usize) {
        (self.total_rows, self.best_value, self.block_counter)
    }

    /// Rows still buffered in memory
    #[cfg(test)]
    pub(crate) fn pending_rows(&self) -> &[TrajectoryRow] {
        &self.rows
    }
}

impl SwarmObserver for TrajectoryRecorder {
    fn on_iteration(&mut self, snapshot: &SwarmSnapshot<'_>) {
        self.record(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pso_recorder_{}_{}", tag, std::process::id()))
    }

    fn snapshot(particles: &[Particle], iteration: usize, best: f64) -> SwarmSnapshot<'_> {
        SwarmSnapshot {
            iteration,
            particles,
            global_best_value: best,
            global_best_position: [0.0, 0.0],
        }
    }

    #[test]
    fn test_record_rows() {
        let mut recorder = TrajectoryRecorder::new("unit", temp_dir("rows"));
        let particles = vec![
            Particle::new([1.0, 2.0], [0.1, 0.2], 5.0),
            Particle::new([0.5, 1.0], [0.0, 0.0], 1.25),
        ];
        recorder.record(&snapshot(&particles, 0, 1.25));

        let rows = recorder.pending_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].particle, 0);
        assert_eq!(rows[0].position, [1.0, 2.0]);
        assert_eq!(rows[1].value, 1.25);
        assert_eq!(rows[1].global_best_value, 1.25);
        assert_eq!(recorder.stats(), (2, Some(1.25), 0));
    }

    #[test]
    fn test_blocks_and_summary() {
        let dir = temp_dir("blocks");
        let _ = std::fs::remove_dir_all(&dir);
        let mut recorder = TrajectoryRecorder::new("blocks", &dir).with_block_rows(4);
        let particles = vec![Particle::new([0.0, 0.0], [0.0, 0.0], 3.0); 3];

        for it in 0..3 {
            recorder.on_iteration(&snapshot(&particles, it, 3.0 - it as f64));
        }
        // 9 rows: two full blocks written, one row pending
        assert_eq!(recorder.stats(), (9, Some(1.0), 2));

        let files = recorder.finalize().unwrap();
        assert_eq!(files.len(), 3);
        assert!(files[2].ends_with("blocks_block_0003.csv"));

        let first = std::fs::read_to_string(&files[0]).unwrap();
        let lines: Vec<&str> = first.trim().lines().collect();
        assert_eq!(
            lines[0],
            "iteration,particle,x,y,vx,vy,value,best_value,global_best_value"
        );
        assert_eq!(lines.len(), 5);

        let summary = std::fs::read_to_string(dir.join("blocks_summary.txt")).unwrap();
        assert!(summary.contains("Total rows: 9"));
        assert!(summary.contains("Total blocks: 3"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_failure_is_reported_by_finalize() {
        // A regular file where the directory should be
        let blocker = temp_dir("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let mut recorder = TrajectoryRecorder::new("fail", &blocker).with_block_rows(1);
        let particles = vec![Particle::new([0.0, 0.0], [0.0, 0.0], 1.0)];
        recorder.on_iteration(&snapshot(&particles, 0, 1.0));
        assert!(recorder.finalize().is_err());

        let _ = std::fs::remove_file(&blocker);
    }
}
