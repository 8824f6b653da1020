//! Configuration for a pull-to-refresh instance.
//! Everything here is read-only once a `PullToRefresh` has been built from it.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::refresh::Completion;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold distance must be a positive finite number, got {0}")]
    Threshold(f64),
    #[error("maximum distance {max} must be finite and at least the threshold distance {threshold}")]
    Maximum { max: f64, threshold: f64 },
    #[error("reload distance must be a non-negative finite number, got {0}")]
    Reload(f64),
    #[error("malformed tunables: {0}")]
    Json(#[from] serde_json::Error),
}

/// Numeric knobs. Missing fields in JSON fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tunables {
    /// Resisted distance past which a release triggers a refresh.
    pub threshold_distance: f64,
    /// Ceiling for the resisted distance.
    pub maximum_distance: f64,
    /// Resting extent held while the refresh runs.
    pub reload_distance: f64,
    /// Delay between entering `refreshing` and invoking the refresh operation.
    pub refresh_delay_ms: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            threshold_distance: 60.0,
            maximum_distance: 80.0,
            reload_distance: 50.0,
            refresh_delay_ms: 500,
        }
    }
}

impl Tunables {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let tunables: Tunables = serde_json::from_str(raw)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.threshold_distance;
        if !threshold.is_finite() || threshold <= 0.0 {
            warn!(threshold, "rejecting threshold distance");
            return Err(ConfigError::Threshold(threshold));
        }
        let max = self.maximum_distance;
        if !max.is_finite() || max < threshold {
            warn!(max, threshold, "rejecting maximum distance");
            return Err(ConfigError::Maximum { max, threshold });
        }
        let reload = self.reload_distance;
        if !reload.is_finite() || reload < 0.0 {
            warn!(reload, "rejecting reload distance");
            return Err(ConfigError::Reload(reload));
        }
        Ok(())
    }
}

/// Which of the three display strings is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKind {
    Pull,
    Release,
    Refreshing,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub pull: String,
    pub release: String,
    pub refreshing: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            pull: "Pull down to refresh".to_owned(),
            release: "Release to refresh".to_owned(),
            refreshing: "Refreshing".to_owned(),
        }
    }
}

impl Labels {
    pub fn text(&self, kind: LabelKind) -> &str {
        match kind {
            LabelKind::Pull => &self.pull,
            LabelKind::Release => &self.release,
            LabelKind::Refreshing => &self.refreshing,
        }
    }
}

/// Damping applied to a pull. Maps `raw / threshold` to a factor in `[0, 1]`.
#[derive(Clone)]
pub struct Resistance(Rc<dyn Fn(f64) -> f64>);

impl Resistance {
    /// Ratio at which the default curve stops damping.
    pub const DEFAULT_SATURATION: f64 = 2.5;

    pub fn new(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// `min(1, ratio / saturation)`
    pub fn linear(saturation: f64) -> Self {
        Self::new(move |ratio| (ratio / saturation).min(1.0))
    }

    /// The damping factor for `ratio`, forced into `[0, 1]`.
    pub fn factor(&self, ratio: f64) -> f64 {
        let f = (self.0)(ratio);
        if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
    }
}

impl Default for Resistance {
    fn default() -> Self {
        Self::linear(Self::DEFAULT_SATURATION)
    }
}

impl fmt::Debug for Resistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resistance(..)")
    }
}

pub type RefreshFn = Rc<dyn Fn(Completion)>;

/// Everything a `PullToRefresh` needs besides its host.
///
/// The refresh operation receives a [`Completion`] and settles the gesture by
/// calling [`Completion::finish`] or by dropping it.
#[derive(Clone)]
pub struct Config {
    pub tunables: Tunables,
    pub labels: Labels,
    pub resistance: Resistance,
    refresh: RefreshFn,
}

impl Config {
    pub fn new(refresh: impl Fn(Completion) + 'static) -> Self {
        Self {
            tunables: Tunables::default(),
            labels: Labels::default(),
            resistance: Resistance::default(),
            refresh: Rc::new(refresh),
        }
    }

    pub fn with_tunables(mut self, tunables: Tunables) -> Self {
        self.tunables = tunables;
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_resistance(mut self, resistance: Resistance) -> Self {
        self.resistance = resistance;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tunables.validate()
    }

    /// Resisted distance for a raw downward pull: the raw distance is clamped
    /// to the maximum first, then damped.
    pub fn resisted(&self, raw: f64) -> f64 {
        let t = &self.tunables;
        let factor = self.resistance.factor(raw / t.threshold_distance);
        raw.min(t.maximum_distance) * factor
    }

    pub(crate) fn refresh(&self, completion: Completion) {
        (self.refresh)(completion)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("tunables", &self.tunables)
            .field("labels", &self.labels)
            .field("resistance", &self.resistance)
            .finish_non_exhaustive()
    }
}
