use js_sys::{Function, Promise};
use pull_refresh::util::clog;
use pull_refresh::web::{WebHost, promise_refresh};
use pull_refresh::{Config, Indicator, Labels, PullToRefresh, Tunables};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;
use yew::prelude::*;

use super::{feed_list::FeedList, pull_indicator::PullIndicator};
use crate::model::{Feed, FeedAction};

// JSON overrides for the gesture tunables, e.g. {"thresholdDistance":70}
const TUNABLES_KEY: &str = "ptr_tunables";
const FAKE_LATENCY_MS: i32 = 800;

fn load_tunables() -> Tunables {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(TUNABLES_KEY) {
                match Tunables::from_json(&raw) {
                    Ok(t) => return t,
                    Err(err) => clog(&format!("ignoring stored tunables: {}", err)),
                }
            }
        }
    }
    Tunables::default()
}

// Pretend to fetch: resolves after a delay and adds one item to the feed
fn fetch_latest(feed: UseReducerHandle<Feed>) -> Promise {
    Promise::new(&mut |resolve: Function, _reject: Function| {
        let feed = feed.clone();
        let done = Closure::once_into_js(move || {
            feed.dispatch(FeedAction::Refreshed);
            let _ = resolve.call0(&JsValue::UNDEFINED);
        });
        let scheduled = web_sys::window()
            .map(|win| {
                win.set_timeout_with_callback_and_timeout_and_arguments_0(done.unchecked_ref(), FAKE_LATENCY_MS)
                    .is_ok()
            })
            .unwrap_or(false);
        if !scheduled {
            let _ = done.unchecked_ref::<Function>().call0(&JsValue::UNDEFINED);
        }
    })
}

fn mount(
    trigger: Element,
    feed: UseReducerHandle<Feed>,
    indicator: UseStateHandle<Indicator>,
) -> Option<PullToRefresh<WebHost>> {
    let host = match WebHost::for_window() {
        Ok(host) => host,
        Err(err) => {
            clog(&err.to_string());
            return None;
        }
    };
    let labels = Labels {
        pull: "Pull to load newer items".to_owned(),
        release: "Let go to load".to_owned(),
        refreshing: "Loading".to_owned(),
    };
    let config = Config::new(promise_refresh(move || fetch_latest(feed.clone())))
        .with_tunables(load_tunables())
        .with_labels(labels);
    let ptr = match PullToRefresh::new(config, host, trigger, move |ind: &Indicator| indicator.set(ind.clone())) {
        Ok(ptr) => ptr,
        Err(err) => {
            clog(&format!("pull-to-refresh disabled: {}", err));
            return None;
        }
    };
    if let Err(err) = ptr.attach() {
        clog(&format!("pull-to-refresh disabled: {}", err));
        return None;
    }
    Some(ptr)
}

#[function_component(App)]
pub fn app() -> Html {
    let feed_ref = use_node_ref();
    let feed = use_reducer(|| Feed::with_items(12));
    let indicator = use_state(Indicator::default);

    // Attach once the feed element exists, detach on unmount
    {
        let feed_ref = feed_ref.clone();
        let feed = feed.clone();
        let indicator = indicator.clone();
        use_effect_with((), move |_| {
            let ptr = feed_ref
                .cast::<Element>()
                .and_then(|trigger| mount(trigger, feed, indicator));
            move || {
                if let Some(ptr) = ptr {
                    ptr.detach();
                }
            }
        });
    }

    let clear_cb = {
        let feed = feed.clone();
        Callback::from(move |_| feed.dispatch(FeedAction::Clear))
    };

    html! {
        <div id="root" style="display:flex; flex-direction:column; height:100vh; background:#0e1116; color:#c9d1d9; font-family:sans-serif;">
            <div id="top-bar" style="display:flex; justify-content:space-between; align-items:center; padding:10px 16px; border-bottom:1px solid #30363d;">
                <span style="font-weight:600;">{"Feed"}</span>
                <span style="font-size:12px; opacity:0.7;">{ format!("{} refreshes", feed.refreshes) }</span>
                <button onclick={clear_cb} style="padding:4px 10px; font-size:12px;">{"Clear"}</button>
            </div>
            <PullIndicator indicator={(*indicator).clone()} />
            <div ref={feed_ref} style="flex:1; overflow-y:auto;">
                <FeedList items={feed.items.clone()} />
            </div>
        </div>
    }
}
