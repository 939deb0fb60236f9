//! Result types for the dynamics and section analyses

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisType;

/// Natural frequencies, damping ratios and mode shapes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModeResult {
    /// Natural frequencies in Hz, ascending
    pub frequencies: Vec<f64>,
    /// Modal damping ratio of each mode
    pub damping_ratios: Vec<f64>,
    /// Mass-normalised shape of each mode, one entry per node
    pub mode_shapes: Vec<Vec<f64>>,
    /// Mass id of each mode-shape entry
    pub nodes: Vec<String>,
}

impl ModeResult {
    pub fn num_modes(&self) -> usize {
        self.frequencies.len()
    }

    /// Natural circular frequencies in rad/s
    pub fn angular_frequencies(&self) -> Vec<f64> {
        self.frequencies
            .iter()
            .map(|f| 2.0 * std::f64::consts::PI * f)
            .collect()
    }
}

/// One (force, observed node) pair of a harmonic response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseChannel {
    /// Id of the exciting force
    pub force: String,
    /// Id of the observed mass
    pub node: String,
}

/// Frequency response over a sweep
///
/// Row `r` of `magnitude_db` and `phase_deg` belongs to `channels[r]`; rows
/// are grouped by force, then by node in degree-of-freedom order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarmonicResult {
    /// Angular frequency samples in rad/s
    pub frequency: Vec<f64>,
    /// `20 log10 |X|`, one row per channel
    pub magnitude_db: Vec<Vec<f64>>,
    /// `atan2(Im X, Re X)` in degrees, one row per channel
    pub phase_deg: Vec<Vec<f64>>,
    pub channels: Vec<ResponseChannel>,
}

impl HarmonicResult {
    /// Row index of the response of `node` to `force`
    pub fn channel(&self, force: &str, node: &str) -> Option<usize> {
        self.channels
            .iter()
            .position(|c| c.force == force && c.node == node)
    }

    /// Magnitude row of the response of `node` to `force`
    pub fn magnitude(&self, force: &str, node: &str) -> Option<&[f64]> {
        self.channel(force, node)
            .map(|row| self.magnitude_db[row].as_slice())
    }

    /// Phase row of the response of `node` to `force`
    pub fn phase(&self, force: &str, node: &str) -> Option<&[f64]> {
        self.channel(force, node).map(|row| self.phase_deg[row].as_slice())
    }
}

/// Time history of every node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransientResult {
    pub time: Vec<f64>,
    /// One row per node, one column per time sample
    pub displacement: Vec<Vec<f64>>,
    pub velocity: Vec<Vec<f64>>,
    pub acceleration: Vec<Vec<f64>>,
    /// Mass id of each row
    pub nodes: Vec<String>,
}

impl TransientResult {
    pub fn num_steps(&self) -> usize {
        self.time.len()
    }

    /// Displacement history of a node
    pub fn node_history(&self, node: &str) -> Option<&[f64]> {
        self.nodes
            .iter()
            .position(|n| n == node)
            .map(|row| self.displacement[row].as_slice())
    }

    /// Largest absolute displacement of a node and the time it occurs
    pub fn peak_displacement(&self, node: &str) -> Option<(f64, f64)> {
        let history = self.node_history(node)?;
        history
            .iter()
            .zip(&self.time)
            .map(|(&x, &t)| (t, x))
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    }
}

/// Any result the kernel can hand back to a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum AnalysisOutput {
    Modal(ModeResult),
    Harmonic(HarmonicResult),
    Transient(TransientResult),
    Moment(f64),
}

impl AnalysisOutput {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            Self::Modal(_) => AnalysisType::Modal,
            Self::Harmonic(_) => AnalysisType::Harmonic,
            Self::Transient(_) => AnalysisType::Transient,
            Self::Moment(_) => AnalysisType::Section,
        }
    }
}

impl From<ModeResult> for AnalysisOutput {
    fn from(result: ModeResult) -> Self {
        Self::Modal(result)
    }
}

impl From<HarmonicResult> for AnalysisOutput {
    fn from(result: HarmonicResult) -> Self {
        Self::Harmonic(result)
    }
}

impl From<TransientResult> for AnalysisOutput {
    fn from(result: TransientResult) -> Self {
        Self::Transient(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_displacement() {
        let result = TransientResult {
            time: vec![0.0, 0.1, 0.2, 0.3],
            displacement: vec![vec![0.0, 0.4, -0.7, 0.2]],
            velocity: vec![vec![0.0; 4]],
            acceleration: vec![vec![0.0; 4]],
            nodes: vec!["m1".to_string()],
        };
        assert_eq!(result.peak_displacement("m1"), Some((0.2, -0.7)));
        assert_eq!(result.peak_displacement("m2"), None);
    }

    #[test]
    fn test_channel_lookup() {
        let result = HarmonicResult {
            frequency: vec![1.0],
            magnitude_db: vec![vec![-20.0], vec![-40.0]],
            phase_deg: vec![vec![0.0], vec![-180.0]],
            channels: vec![
                ResponseChannel { force: "f1".into(), node: "m1".into() },
                ResponseChannel { force: "f1".into(), node: "m2".into() },
            ],
        };
        assert_eq!(result.channel("f1", "m2"), Some(1));
        assert_eq!(result.magnitude("f1", "m2"), Some(&[-40.0][..]));
        assert_eq!(result.phase("f2", "m1"), None);
    }

    #[test]
    fn test_output_tagging() {
        let out: AnalysisOutput = ModeResult::default().into();
        assert_eq!(out.analysis_type(), AnalysisType::Modal);
        assert_eq!(AnalysisOutput::Moment(1.0).analysis_type(), AnalysisType::Section);

        let json = serde_json::to_string(&AnalysisOutput::Moment(2.5)).unwrap();
        assert_eq!(json, r#"{"type":"moment","result":2.5}"#);
    }

    #[test]
    fn test_angular_frequencies() {
        let modes = ModeResult {
            frequencies: vec![1.0],
            ..ModeResult::default()
        };
        assert!((modes.angular_frequencies()[0] - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}
