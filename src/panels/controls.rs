use egui::Ui;

use crate::data::parameter::{format_value, SliderParam};

/// Integer slider bound to `param`. Returns the new raw position when the
/// user moved it this frame.
pub fn param_slider(ui: &mut Ui, param: &SliderParam) -> Option<i32> {
    let mut raw = param.raw();
    let resp = ui
        .horizontal(|ui| {
            ui.label(format!("{} = {}", param.name, format_value(param.value())));
            ui.add(
                egui::Slider::new(&mut raw, param.range.clone())
                    .show_value(false)
                    .integer(),
            )
        })
        .inner;
    (resp.changed() && raw != param.raw()).then_some(raw)
}
