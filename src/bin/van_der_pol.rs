use sciplot_demos::{logging, run_demo, DemoConfig, VanDerPolConfig, VanDerPolPanel};
use tracing::error;

fn main() -> eframe::Result<()> {
    logging::init();
    let panel = match VanDerPolPanel::new(&VanDerPolConfig::default()) {
        Ok(panel) => panel,
        Err(e) => {
            error!(error = %e, "initial Van der Pol solve failed");
            std::process::exit(1);
        }
    };
    let cfg = DemoConfig {
        icon_path: Some(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/van_der_pol.svg").into()),
        maximized: true,
        ..Default::default()
    };
    run_demo(panel, cfg)
}
