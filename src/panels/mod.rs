pub mod controls;
pub mod lissajous_ui;
pub mod panel_trait;
pub mod plot_frame;
pub mod rosenbrock_ui;
pub mod van_der_pol_ui;

pub use lissajous_ui::LissajousPanel;
pub use panel_trait::DemoPanel;
pub use rosenbrock_ui::RosenbrockPanel;
pub use van_der_pol_ui::VanDerPolPanel;
