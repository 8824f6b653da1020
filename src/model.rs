//! Demo feed shown under the pull indicator.

use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedItem {
    pub id: u32,
    pub title: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feed {
    pub items: Vec<FeedItem>,
    pub next_id: u32,
    pub refreshes: u32,
}

impl Feed {
    pub fn with_items(count: u32) -> Self {
        let mut feed = Feed::default();
        for _ in 0..count {
            feed.push_front();
        }
        feed
    }

    fn push_front(&mut self) {
        let id = self.next_id;
        self.next_id += 1;
        self.items.insert(0, FeedItem { id, title: format!("Item #{}", id + 1) });
    }
}

pub enum FeedAction {
    /// A refresh brought in one new item.
    Refreshed,
    Clear,
}

impl Reducible for Feed {
    type Action = FeedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            FeedAction::Refreshed => {
                new.refreshes = new.refreshes.saturating_add(1);
                new.push_front();
            }
            FeedAction::Clear => {
                new.items.clear();
            }
        }
        Rc::new(new)
    }
}
