#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use img_shrink::{encode_jpeg, load_jpeg, prepare_for_jpeg};
use std::fs;
use std::path::{Path, PathBuf};

/// Deterministic RGB noise. Noise compresses badly, so quality changes show
/// up clearly in file size.
pub fn noise_image(width: u32, height: u32, seed: u32) -> DynamicImage {
    let mut state = seed | 1;
    let img = RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgb([r, g, b])
    });
    DynamicImage::ImageRgb8(img)
}

/// Writes a quality-100 noise JPEG and returns its path and size.
pub fn write_noise_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> (PathBuf, u64) {
    let path = dir.join(name);
    let bytes = encode_jpeg(&noise_image(width, height, 0xC0FF_EE11), 100).unwrap();
    fs::write(&path, &bytes).unwrap();
    (path, bytes.len() as u64)
}

/// Size the compression loop will produce for `path` at `quality`.
pub fn size_at_quality(path: &Path, quality: u8) -> u64 {
    let img = prepare_for_jpeg(load_jpeg(path).unwrap());
    encode_jpeg(&img, quality).unwrap().len() as u64
}

pub fn write_broken_jpeg(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![0u8; len]).unwrap();
    path
}
