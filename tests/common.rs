use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Hash-mixed pixels. Effectively incompressible, so the PNG encoding of a
/// WxH noise image weighs close to 3 bytes per pixel and JPEG stays far
/// above the byte budget at these dimensions.
pub fn noise_image(width: u32, height: u32) -> DynamicImage {
    let buf = RgbImage::from_fn(width, height, |x, y| {
        let mut v = x
            .wrapping_mul(0x9E37_79B9)
            .wrapping_add(y.wrapping_mul(0x85EB_CA6B));
        v ^= v >> 15;
        v = v.wrapping_mul(0x2C1B_3C6D);
        v ^= v >> 12;
        Rgb([(v & 0xFF) as u8, ((v >> 8) & 0xFF) as u8, ((v >> 16) & 0xFF) as u8])
    });
    DynamicImage::ImageRgb8(buf)
}

pub fn flat_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([60, 140, 220])))
}

pub fn write_png(path: &Path, img: &DynamicImage) {
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

pub fn write_jpeg(path: &Path, img: &DynamicImage) {
    img.save_with_format(path, ImageFormat::Jpeg).unwrap();
}
