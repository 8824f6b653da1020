// Scroll ownership: a touch that lands inside an already scrolled region belongs to native scrolling

/// Scroll offsets at or below this are treated as sub-pixel jitter.
pub const SCROLL_EPSILON: f64 = 5.0;

/// A node in a tree of possibly scrollable regions.
pub trait ScrollNode: Clone + PartialEq {
    /// Current vertical scroll offset.
    fn scroll_top(&self) -> f64;
    fn parent(&self) -> Option<Self>;

    /// Whether `other` is this node or one of its descendants.
    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }
}

/// True if `node` or any of its ancestors is scrolled past [`SCROLL_EPSILON`].
pub fn is_scroll_active<N: ScrollNode>(node: Option<&N>) -> bool {
    let mut current = node.cloned();
    while let Some(node) = current {
        if node.scroll_top() > SCROLL_EPSILON {
            return true;
        }
        current = node.parent();
    }
    false
}
