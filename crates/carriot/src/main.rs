use carriot::config;
use carriot::gui::app::AppModel;
use carriot::sys::runtime;
use carriot_link::ApiClient;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = config::load_or_setup()?;
    let menu = config::build_wheel(&mut config)?;
    let client = ApiClient::new(config.api.base_url.clone());

    let (tx, rx) = async_channel::bounded(32);
    let (job_tx, job_rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, job_rx, client);

    let app = RelmApp::new("online.carriot.dashboard");

    app.run::<AppModel>((menu, config, job_tx, rx));
    Ok(())
}
