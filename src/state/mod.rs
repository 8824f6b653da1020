pub mod gesture;
pub mod scroll;
pub mod touch;

pub use gesture::{Gesture, GestureSnapshot, GestureState, Indicator, Presenter, Release, Start};
pub use scroll::{SCROLL_EPSILON, ScrollNode, is_scroll_active};
pub use touch::{TouchInput, TouchKind, TouchOrigin};
