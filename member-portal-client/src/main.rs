use leptos::*;
use member_portal_client::{App, AppConfig};

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    if let Err(error) = console_log::init_with_level(config.log_level) {
        leptos::error!("Could not initialize console logging. {error}");
    }
    mount_to_body(move |cx| view! { cx, <App config=config/> })
}
