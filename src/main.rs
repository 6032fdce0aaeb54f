use chessview::{ViewerApp, ViewerConfig};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::from_args(std::env::args());
    info!("Opening {}", config.asset_path.display());

    ViewerApp::new(config).run()
}
