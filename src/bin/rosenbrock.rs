use sciplot_demos::{logging, run_demo, DemoConfig, RosenbrockConfig, RosenbrockPanel};

fn main() -> eframe::Result<()> {
    logging::init();
    let panel = RosenbrockPanel::new(&RosenbrockConfig::default());
    let cfg = DemoConfig {
        icon_path: Some(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/rosenbrock.svg").into()),
        ..Default::default()
    };
    run_demo(panel, cfg)
}
