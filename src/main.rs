mod components;
mod model;

use components::app::App;
use pull_refresh::util::init_console_logging;

fn main() {
    init_console_logging(tracing::Level::DEBUG);
    yew::Renderer::<App>::new().render();
}
