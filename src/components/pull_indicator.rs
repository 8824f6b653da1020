use pull_refresh::{GestureState, Indicator};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PullIndicatorProps {
    pub indicator: Indicator,
}

#[function_component(PullIndicator)]
pub fn pull_indicator(props: &PullIndicatorProps) -> Html {
    let ind = &props.indicator;
    let icon = match ind.state {
        GestureState::ReleaseToRefresh => "⤒",
        GestureState::Refreshing => "⟳",
        _ => "⤓",
    };
    // snap back smoothly once the finger is gone
    let transition = match ind.state {
        GestureState::Pulling | GestureState::ReleaseToRefresh => "none",
        _ => "height 0.2s ease-out",
    };
    let style = format!(
        "height:{}px; overflow:hidden; display:flex; align-items:flex-end; justify-content:center; gap:8px; padding-bottom:4px; color:#8b949e; font-size:13px; transition:{};",
        ind.extent.max(0.0),
        transition
    );
    html! {
        <div class={classes!("ptr", format!("ptr--{}", ind.state))} style={style}>
            if ind.extent > 0.0 {
                <span style="font-size:16px;">{ icon }</span>
                <span>{ ind.text.clone().unwrap_or_default() }</span>
            }
        </div>
    }
}
