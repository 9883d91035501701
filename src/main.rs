use giftbook::app::AppProps;
use giftbook::config::AppConfig;
use giftbook::{logging, App};

fn main() {
    let filter = logging::init_logging();
    let config = AppConfig::load();
    logging::apply_directive(&filter, &config.log_level);
    tracing::info!(api_base = %config.api_base, "starting");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
