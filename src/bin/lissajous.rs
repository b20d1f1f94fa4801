use sciplot_demos::{logging, run_demo, DemoConfig, LissajousConfig, LissajousPanel};

fn main() -> eframe::Result<()> {
    logging::init();
    let panel = LissajousPanel::new(&LissajousConfig::default());
    let cfg = DemoConfig {
        icon_path: Some(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/lissajous.svg").into()),
        maximized: true,
        ..Default::default()
    };
    run_demo(panel, cfg)
}
