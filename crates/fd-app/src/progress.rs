/// Phase of a run reported to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Simulating,
    PairFinished,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            RunStage::Simulating => "simulating",
            RunStage::PairFinished => "pair finished",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PairProgress {
    /// Zero-based position in flow-major order
    pub index: usize,
    pub total: usize,
    pub flow_rate_ml_per_s: f64,
    pub foam_volume_ml: f64,
    pub succeeded: bool,
    pub wall_time_s: f64,
}

impl PairProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.index + 1) as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub pair: Option<PairProgress>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            pair: None,
        }
    }
}
