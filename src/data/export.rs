//! PNG export of viewport screenshots.

use std::path::Path;

use eframe::egui;
use image::{Rgba, RgbaImage};
use tracing::info;

use crate::error::{DemoError, Result};

/// Copy an egui screenshot into an `image` buffer.
pub fn color_image_to_rgba(img: &egui::ColorImage) -> RgbaImage {
    let [w, h] = img.size;
    let mut out = RgbaImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let p = img.pixels[y * w + x];
            out.put_pixel(x as u32, y as u32, Rgba([p.r(), p.g(), p.b(), p.a()]));
        }
    }
    out
}

/// Crop `image` to `rect` (in points) and save it as PNG at `path`.
///
/// `ppp` is the pixels-per-point factor of the screenshot.
pub fn save_png_region(
    image: &egui::ColorImage,
    rect: egui::Rect,
    ppp: f32,
    path: &Path,
) -> Result<()> {
    let cropped = image.region(&rect, Some(ppp));
    if cropped.size[0] == 0 || cropped.size[1] == 0 {
        return Err(DemoError::EmptyCapture);
    }
    let out = color_image_to_rgba(&cropped);
    out.save_with_format(path, image::ImageFormat::Png)?;
    info!(path = %path.display(), width = out.width(), height = out.height(), "saved plot image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_keeps_pixel_layout() {
        let mut rgba = vec![255u8; 3 * 2 * 4];
        rgba[16..20].copy_from_slice(&[255, 0, 0, 255]);
        let img = egui::ColorImage::from_rgba_unmultiplied([3, 2], &rgba);
        let out = color_image_to_rgba(&img);
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(*out.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }
}
