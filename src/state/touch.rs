// Touch sample plumbing shared by the gesture machine and host adapters
use serde::Serialize;

use super::scroll::ScrollNode;

/// Screen position of the first touch point when the sequence started.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TouchOrigin {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

impl TouchKind {
    pub const ALL: [TouchKind; 4] = [TouchKind::Start, TouchKind::Move, TouchKind::End, TouchKind::Cancel];

    /// DOM event name.
    pub fn event_name(self) -> &'static str {
        match self {
            TouchKind::Start => "touchstart",
            TouchKind::Move => "touchmove",
            TouchKind::End => "touchend",
            TouchKind::Cancel => "touchcancel",
        }
    }

    /// Whether the listener has to be able to suppress default scrolling.
    pub fn needs_active_listener(self) -> bool {
        matches!(self, TouchKind::Move)
    }
}

/// One touch event as seen by the gesture machine. Only the first touch point is used.
pub trait TouchInput {
    type Node: ScrollNode;

    /// Screen coordinates of the first active touch point, if any.
    fn first_point(&self) -> Option<(f64, f64)>;
    /// The node the touch originated on.
    fn target(&self) -> Option<Self::Node>;
    fn prevent_default(&self);
}
