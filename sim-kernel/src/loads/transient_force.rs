//! Sampled force histories for time-domain analysis

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

/// A force history acting on one mass node
///
/// Between samples the force is interpolated linearly; outside
/// `[time[0], time[last]]` it is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientForce {
    pub node_id: String,
    /// Sample times, strictly increasing
    pub time: Vec<f64>,
    /// Force value at each sample time
    pub values: Vec<f64>,
}

impl TransientForce {
    pub fn new(node_id: &str, time: Vec<f64>, values: Vec<f64>) -> Self {
        Self {
            node_id: node_id.to_string(),
            time,
            values,
        }
    }

    /// Constant force `value` applied over `[t_start, t_end]`, sampled every `dt`
    pub fn step(node_id: &str, value: f64, t_start: f64, t_end: f64, dt: f64) -> Self {
        Self::sampled(node_id, t_start, t_end, dt, |_| value)
    }

    /// Sinusoid `amplitude · sin(ω t)` over `[t_start, t_end]`, sampled every `dt`
    pub fn sine(node_id: &str, amplitude: f64, omega: f64, t_start: f64, t_end: f64, dt: f64) -> Self {
        Self::sampled(node_id, t_start, t_end, dt, |t| amplitude * (omega * t).sin())
    }

    fn sampled(node_id: &str, t_start: f64, t_end: f64, dt: f64, f: impl Fn(f64) -> f64) -> Self {
        let steps = if dt > 0.0 && t_end > t_start {
            ((t_end - t_start) / dt).round() as usize
        } else {
            0
        };
        let time: Vec<f64> = (0..=steps).map(|i| t_start + i as f64 * dt).collect();
        let values = time.iter().map(|&t| f(t)).collect();
        Self::new(node_id, time, values)
    }

    pub(crate) fn validate(&self) -> KernelResult<()> {
        if self.time.is_empty() || self.time.len() != self.values.len() {
            return Err(KernelError::Validation(format!(
                "Force history on '{}' needs matching, non-empty time and value samples ({} vs {})",
                self.node_id,
                self.time.len(),
                self.values.len()
            )));
        }
        if self.time.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(KernelError::Validation(format!(
                "Force history on '{}' has non-increasing sample times",
                self.node_id
            )));
        }
        Ok(())
    }

    /// Force value at time `t`
    pub fn value_at(&self, t: f64) -> f64 {
        let (first, last) = match (self.time.first(), self.time.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return 0.0,
        };
        if t < first || t > last {
            return 0.0;
        }

        // First sample at or after t
        let idx = self.time.partition_point(|&s| s < t);
        if idx == 0 || self.time[idx] == t {
            return self.values[idx];
        }

        let (t0, t1) = (self.time[idx - 1], self.time[idx]);
        let (f0, f1) = (self.values[idx - 1], self.values[idx]);
        f0 + (f1 - f0) * (t - t0) / (t1 - t0)
    }
}
