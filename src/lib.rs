//! Pull-to-refresh gesture recognition for touch surfaces.
//!
//! [`state`] holds the host-independent machine, [`refresh`] binds it to a
//! [`refresh::Host`], and [`web`] provides that host for the browser.

pub mod config;
pub mod refresh;
pub mod state;
pub mod util;
pub mod web;

pub use config::{Config, ConfigError, LabelKind, Labels, Resistance, Tunables};
pub use refresh::{Completion, Handler, Host, PullToRefresh};
pub use state::{GestureSnapshot, GestureState, Indicator, Presenter, ScrollNode, TouchInput, TouchKind};
