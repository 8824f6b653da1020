//! The pull-to-refresh gesture state machine.
//!
//! ```text
//! pending          -> scrolling         (touch start inside a scrolled region)
//! pending          -> pulling           (first move of an enabled touch)
//! pulling          -> releaseToRefresh  (resisted distance > threshold)
//! releaseToRefresh -> pulling           (resisted distance < threshold)
//! releaseToRefresh -> refreshing        (touch end)
//! refreshing       -> pending           (refresh operation settled)
//! any other        -> pending           (touch end / cancel)
//! ```
//!
//! `Gesture` only tracks state and talks to a [`Presenter`]. Timers and the
//! refresh operation itself are driven by [`crate::refresh::PullToRefresh`].

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::scroll::{ScrollNode, is_scroll_active};
use super::touch::{TouchInput, TouchOrigin};
use crate::config::{Config, LabelKind};

/// Samples closer than this to the last processed distance are dropped.
const JITTER: f64 = 1.0;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureState {
    #[default]
    Pending,
    Pulling,
    ReleaseToRefresh,
    Refreshing,
    Scrolling,
}

impl GestureState {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureState::Pending => "pending",
            GestureState::Pulling => "pulling",
            GestureState::ReleaseToRefresh => "releaseToRefresh",
            GestureState::Refreshing => "refreshing",
            GestureState::Scrolling => "scrolling",
        }
    }

    /// Display string shown in this state.
    pub fn label(self) -> Option<LabelKind> {
        match self {
            GestureState::Pending | GestureState::Pulling => Some(LabelKind::Pull),
            GestureState::ReleaseToRefresh => Some(LabelKind::Release),
            GestureState::Refreshing => Some(LabelKind::Refreshing),
            GestureState::Scrolling => None,
        }
    }
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the presentation layer is told on every visible change.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub state: GestureState,
    /// Visual pull extent.
    pub extent: f64,
    pub label: Option<LabelKind>,
    pub text: Option<String>,
}

/// Receives [`Indicator`] updates. Must not call back into the machine.
pub trait Presenter {
    fn present(&mut self, indicator: &Indicator);
}

impl<F: FnMut(&Indicator)> Presenter for F {
    fn present(&mut self, indicator: &Indicator) {
        self(indicator)
    }
}

/// Outcome of a touch start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    /// Not in `pending`; nothing happened.
    Ignored,
    /// The sequence belongs to native scrolling.
    Scrolling,
    /// A new sequence has been armed.
    Armed,
}

/// Outcome of a touch end or cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Ignored,
    Reset,
    /// Now `refreshing`; the driver must schedule the refresh operation.
    Refresh,
}

/// Read-only copy of the mutable gesture fields.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GestureSnapshot {
    pub state: GestureState,
    pub origin: TouchOrigin,
    pub distance: f64,
    pub resisted: f64,
    pub extent: f64,
    pub enabled: bool,
}

pub struct Gesture<N> {
    config: Rc<Config>,
    trigger: N,
    state: GestureState,
    origin: TouchOrigin,
    distance: f64,
    last_distance: f64,
    resisted: f64,
    extent: f64,
    enabled: bool,
}

impl<N: ScrollNode> Gesture<N> {
    /// `trigger` is the region touches must start in to enable a pull.
    pub fn new(config: Rc<Config>, trigger: N) -> Self {
        Self {
            config,
            trigger,
            state: GestureState::Pending,
            origin: TouchOrigin::default(),
            distance: 0.0,
            last_distance: 0.0,
            resisted: 0.0,
            extent: 0.0,
            enabled: false,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        GestureSnapshot {
            state: self.state,
            origin: self.origin,
            distance: self.distance,
            resisted: self.resisted,
            extent: self.extent,
            enabled: self.enabled,
        }
    }

    pub fn touch_start<E>(&mut self, event: &E, presenter: &mut dyn Presenter) -> Start
    where
        E: TouchInput<Node = N> + ?Sized,
    {
        if self.state != GestureState::Pending {
            return Start::Ignored;
        }
        let target = event.target();
        if is_scroll_active(target.as_ref()) {
            self.transition(GestureState::Scrolling, presenter);
            return Start::Scrolling;
        }

        match event.first_point() {
            Some((x, y)) => {
                self.origin = TouchOrigin { x, y };
                self.enabled = target.is_some_and(|t| self.trigger.contains(&t));
            }
            None => {
                self.origin = TouchOrigin::default();
                self.enabled = false;
            }
        }
        self.distance = 0.0;
        self.last_distance = 0.0;
        self.resisted = 0.0;
        self.extent = 0.0;
        trace!(x = self.origin.x, y = self.origin.y, enabled = self.enabled, "touch armed");
        // always re-sync the idle display, even though the state is unchanged
        self.present(presenter);
        Start::Armed
    }

    pub fn touch_move<E>(&mut self, event: &E, presenter: &mut dyn Presenter)
    where
        E: TouchInput<Node = N> + ?Sized,
    {
        if !self.enabled || matches!(self.state, GestureState::Refreshing | GestureState::Scrolling) {
            return;
        }
        if self.state == GestureState::Pending {
            self.transition(GestureState::Pulling, presenter);
        }
        let Some((_, y)) = event.first_point() else {
            return;
        };

        self.distance = y - self.origin.y;
        // at or above the origin the last resisted distance stands
        if self.distance > 0.0 && (self.distance - self.last_distance).abs() > JITTER {
            self.last_distance = self.distance;
            self.resisted = self.config.resisted(self.distance);
            event.prevent_default();
            self.set_extent(self.resisted, presenter);
        }

        let threshold = self.config.tunables.threshold_distance;
        match self.state {
            GestureState::Pulling if self.resisted > threshold => {
                self.transition(GestureState::ReleaseToRefresh, presenter)
            }
            GestureState::ReleaseToRefresh if self.resisted < threshold => {
                self.transition(GestureState::Pulling, presenter)
            }
            _ => {}
        }
    }

    pub fn touch_end(&mut self, presenter: &mut dyn Presenter) -> Release {
        match self.state {
            GestureState::ReleaseToRefresh => {
                self.extent = self.config.tunables.reload_distance;
                self.transition(GestureState::Refreshing, presenter);
                Release::Refresh
            }
            GestureState::Refreshing => Release::Ignored,
            _ => {
                self.reset(presenter);
                Release::Reset
            }
        }
    }

    /// Like a release, but never starts a refresh.
    pub fn touch_cancel(&mut self, presenter: &mut dyn Presenter) -> Release {
        match self.state {
            GestureState::Refreshing => Release::Ignored,
            _ => {
                self.reset(presenter);
                Release::Reset
            }
        }
    }

    /// Full reset: back to `pending` with every mutable field zeroed.
    pub fn reset(&mut self, presenter: &mut dyn Presenter) {
        let dirty = self.state != GestureState::Pending || self.extent != 0.0;
        let from = self.state;
        self.state = GestureState::Pending;
        self.origin = TouchOrigin::default();
        self.distance = 0.0;
        self.last_distance = 0.0;
        self.resisted = 0.0;
        self.extent = 0.0;
        self.enabled = false;
        if dirty {
            debug!(%from, "gesture reset");
            self.present(presenter);
        }
    }

    fn transition(&mut self, next: GestureState, presenter: &mut dyn Presenter) {
        if next == self.state {
            return;
        }
        debug!(from = %self.state, to = %next, "gesture state changed");
        self.state = next;
        self.present(presenter);
    }

    fn set_extent(&mut self, extent: f64, presenter: &mut dyn Presenter) {
        if extent == self.extent {
            return;
        }
        trace!(extent, distance = self.distance, "pull extent changed");
        self.extent = extent;
        self.present(presenter);
    }

    fn present(&self, presenter: &mut dyn Presenter) {
        let label = self.state.label();
        presenter.present(&Indicator {
            state: self.state,
            extent: self.extent,
            label,
            text: label.map(|kind| self.config.labels.text(kind).to_owned()),
        });
    }
}
