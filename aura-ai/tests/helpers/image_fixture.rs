//! In-memory image and landmark fixtures

use aura_ai::types::Landmark;
use aura_ai::utils::ImagePayload;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Small PNG with a flat skin-tone fill
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([224, 172, 105]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("PNG encode");
    buf.into_inner()
}

pub fn png_payload() -> ImagePayload {
    ImagePayload::from_bytes(png_bytes(16, 16)).expect("payload")
}

pub fn png_data_url() -> String {
    png_payload().to_data_url()
}

/// 468-point mesh filling `[left, left + width] x [top, top + height]`
///
/// Points lie on a regular grid; the reference points used by the
/// measurements are then pinned to face-like positions.
pub fn synthetic_face_mesh(left: f64, top: f64, width: f64, height: f64) -> Vec<Landmark> {
    let cols = 18;
    let rows = 26;
    let mut points: Vec<Landmark> = (0..468)
        .map(|i| {
            let col = (i % cols) as f64 / (cols - 1) as f64;
            let row = (i / cols) as f64 / (rows - 1) as f64;
            Landmark::new(left + col * width, top + row * height, 0.0)
        })
        .collect();

    let mid = left + width / 2.0;
    let at = |fx: f64, fy: f64| Landmark::new(left + fx * width, top + fy * height, 0.0);

    // Nose center and symmetric pairs about it
    points[1] = Landmark::new(mid, top + 0.55 * height, 0.0);
    for (l, r, fx, fy) in [
        (33, 362, 0.30, 0.40),
        (70, 300, 0.25, 0.30),
        (116, 345, 0.20, 0.55),
        (33, 263, 0.30, 0.40),
    ] {
        points[l] = at(fx, fy);
        points[r] = at(1.0 - fx, fy);
    }

    // Face outline: width and height references
    points[234] = at(0.0, 0.5);
    points[454] = at(1.0, 0.5);
    points[10] = at(0.5, 0.0);
    points[152] = at(0.5, 1.0);
    points
}
