use serde::Serialize;
use std::time::Instant;

/// Timing information for a single processing step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Records how long each named step of a pipeline takes
#[derive(Debug)]
pub struct StepTimer {
    start: Instant,
    steps: Vec<StepTiming>,
}

impl Default for StepTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StepTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            steps: Vec::new(),
        }
    }

    /// Run `step_fn`, logging and recording its duration under `name`
    pub fn run_step<T, F>(&mut self, name: &str, step_fn: F) -> T
    where
        F: FnOnce() -> T,
    {
        let step_start = Instant::now();
        let result = step_fn();
        let time_ms = step_start.elapsed().as_millis() as u64;
        tracing::debug!("step {} took {}ms", name, time_ms);
        self.steps.push(StepTiming {
            name: name.to_string(),
            time_ms,
        });
        result
    }

    pub fn total_time_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn into_steps(self) -> Vec<StepTiming> {
        self.steps
    }
}
