//! Entry point for running a demo as a native window.

use std::path::Path;

use eframe::egui;
use tracing::{info, warn};

use crate::config::DemoConfig;
use crate::panels::DemoPanel;

use super::DemoApp;

/// Open a native window hosting `panel` and block until it is closed.
pub fn run_demo<P: DemoPanel + 'static>(panel: P, mut cfg: DemoConfig) -> eframe::Result<()> {
    let title = if cfg.title.is_empty() {
        panel.title().to_owned()
    } else {
        cfg.title.clone()
    };
    let opts = native_options(&mut cfg);

    info!(title = %title, "starting demo window");
    let app = DemoApp::new(panel, &cfg);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Window options from `cfg`, filling in icon, size and maximized state
/// wherever the caller's own `native_options` leave them unset.
fn native_options(cfg: &mut DemoConfig) -> eframe::NativeOptions {
    let mut opts = cfg.native_options.take().unwrap_or_default();
    let mut viewport = opts.viewport.clone();

    if viewport.icon.is_none() {
        if let Some(icon) = cfg.icon_path.as_deref().and_then(load_icon_svg) {
            viewport = viewport.with_icon(icon);
        }
    }
    if viewport.inner_size.is_none() {
        viewport = viewport.with_inner_size(egui::vec2(cfg.inner_size[0], cfg.inner_size[1]));
    }
    if cfg.maximized && viewport.maximized.is_none() {
        viewport = viewport.with_maximized(true);
    }

    opts.viewport = viewport;
    opts
}

/// Render an SVG file into an [`egui::IconData`].
///
/// Returns `None` if the file does not exist or cannot be parsed/rendered.
pub(crate) fn load_icon_svg(path: &Path) -> Option<egui::IconData> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "window icon not loaded");
            return None;
        }
    };

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
