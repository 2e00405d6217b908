// acts.rs - Act segmentation
//
// One boundary table shared by every entity, effect and the camera.
// Acts are half-open [start, end); the last act is closed at 1.

use crate::error::{ConfigError, ensure_finite};
use crate::scene::ACT_COUNT;
use super::{clamp01, map_range};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Act {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActTable {
    bounds: Vec<f64>,
}

impl ActTable {
    /// Validate `ACT_COUNT + 1` boundaries: finite, strictly increasing,
    /// starting at exactly 0 and ending at exactly 1.
    pub fn new(bounds: &[f64]) -> Result<Self, ConfigError> {
        if bounds.len() != ACT_COUNT + 1 {
            return Err(ConfigError::ActCount { expected: ACT_COUNT + 1, got: bounds.len() });
        }
        for &b in bounds {
            ensure_finite("act boundary", b)?;
        }

        let (first, last) = (bounds[0], bounds[bounds.len() - 1]);
        if first != 0.0 || last != 1.0 {
            return Err(ConfigError::ActCoverage { first, last });
        }
        for i in 1..bounds.len() {
            if bounds[i] <= bounds[i - 1] {
                return Err(ConfigError::ActOrder { index: i, value: bounds[i] });
            }
        }

        Ok(Self { bounds: bounds.to_vec() })
    }

    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn act(&self, index: usize) -> Act {
        let index = index.min(self.len() - 1);
        Act { index, start: self.bounds[index], end: self.bounds[index + 1] }
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.bounds
    }

    /// Active act and local progress for global progress `p`.
    /// On an exact shared boundary the later act wins.
    pub fn locate(&self, p: f64) -> (Act, f64) {
        let p = clamp01(p);
        let mut index = 0;
        for i in (0..self.len()).rev() {
            if p >= self.bounds[i] {
                index = i;
                break;
            }
        }
        let act = self.act(index);
        (act, map_range(p, act.start, act.end))
    }
}
