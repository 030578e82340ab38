use std::time::{Duration, Instant};

use tracing::info;

/// Wall-clock time spent in one pipeline stage.
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Stage timings of one evaluation run, in execution order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `stage` and records how long it took under `name`.
    pub fn time<T>(&mut self, name: &'static str, stage: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let output = stage();
        self.steps.push(StepTiming {
            name,
            duration: start.elapsed(),
        });
        output
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn step(&self, name: &str) -> Option<Duration> {
        self.steps.iter().find(|s| s.name == name).map(|s| s.duration)
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total_ms = self.total_duration().as_secs_f64() * 1000.0;
        for step in &self.steps {
            let ms = step.duration.as_secs_f64() * 1000.0;
            let share = if total_ms > 0.0 { ms / total_ms * 100.0 } else { 0.0 };
            info!(step = step.name, ms, share, "stage timing");
        }
        info!(total_ms, "evaluation timing");
    }
}
