use crate::model::FeedItem;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FeedListProps {
    pub items: Vec<FeedItem>,
}

#[function_component]
pub fn FeedList(props: &FeedListProps) -> Html {
    if props.items.is_empty() {
        return html! {<div style="padding:24px; text-align:center; opacity:0.6;">{"Nothing here yet. Pull down to refresh."}</div>};
    }
    html! {
        <ul style="list-style:none; margin:0; padding:0;">
            { for props.items.iter().map(|item| html! {
                <li key={item.id} style="padding:14px 16px; border-bottom:1px solid #30363d;">{ item.title.clone() }</li>
            }) }
        </ul>
    }
}
