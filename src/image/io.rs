//! I/O helpers for the driver programs.
//!
//! - `load_gray_png` / `save_gray8_png` / `save_gray16_png`: 2-D grayscale
//!   images through the `image` crate.
//! - `save_vol` / `load_vol`: the `.vol` volume format for N-D data, a JSON
//!   header describing shape, spacing and element type, with the raw
//!   little-endian pixel data in a sibling `.vol.raw` file.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! All functions report failures as formatted strings with the offending
//! path; the binaries surface them on stderr and exit non-zero.

use super::ImageNd;
use image::{GrayImage, ImageBuffer, Luma};
use nalgebra::SVector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a PNG (or any format the `image` crate detects) as an 8-bit
/// grayscale image of shape `[width, height]`.
pub fn load_gray_png(path: &Path) -> Result<ImageNd<u8>, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(ImageNd::from_raw(&[width, height], img.into_raw()))
}

/// Save an 8-bit image as a grayscale PNG. The image must be 2-D.
pub fn save_gray8_png(image: &ImageNd<u8>, path: &Path) -> Result<(), String> {
    let [w, h] = dims_2d(image.shape(), path)?;
    ensure_parent_dir(path)?;
    let buffer: GrayImage = ImageBuffer::from_raw(w as u32, h as u32, image.data().to_vec())
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a float image as a 16-bit grayscale PNG, rounding and clamping each
/// value into `[0, 65535]`. The image must be 2-D.
pub fn save_gray16_png(image: &ImageNd<f32>, path: &Path) -> Result<(), String> {
    let [w, h] = dims_2d(image.shape(), path)?;
    ensure_parent_dir(path)?;
    let pixels: Vec<u16> = image
        .data()
        .iter()
        .map(|&v| v.round().clamp(0.0, u16::MAX as f32) as u16)
        .collect();
    let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

fn dims_2d(shape: &[usize], path: &Path) -> Result<[usize; 2], String> {
    match shape {
        [w, h] => Ok([*w, *h]),
        other => Err(format!(
            "{} requires a 2-D image, got shape {:?}",
            path.display(),
            other
        )),
    }
}

/// Element of a `.vol` volume: scalars and fixed-size float vectors.
pub trait VolPixel: Copy {
    /// Element type name recorded in the header.
    const DTYPE: &'static str;
    /// Elements per pixel, 1 for scalars.
    const CHANNELS: usize;
    /// Bytes per pixel.
    const BYTES: usize;

    fn write_le(&self, out: &mut Vec<u8>);
    fn read_le(chunk: &[u8]) -> Self;
}

impl VolPixel for u8 {
    const DTYPE: &'static str = "u8";
    const CHANNELS: usize = 1;
    const BYTES: usize = 1;

    fn write_le(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }

    fn read_le(chunk: &[u8]) -> Self {
        chunk[0]
    }
}

impl VolPixel for i32 {
    const DTYPE: &'static str = "i32";
    const CHANNELS: usize = 1;
    const BYTES: usize = 4;

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(chunk: &[u8]) -> Self {
        i32::from_le_bytes(chunk.try_into().expect("chunk sized by BYTES"))
    }
}

impl VolPixel for f32 {
    const DTYPE: &'static str = "f32";
    const CHANNELS: usize = 1;
    const BYTES: usize = 4;

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn read_le(chunk: &[u8]) -> Self {
        f32::from_le_bytes(chunk.try_into().expect("chunk sized by BYTES"))
    }
}

impl<const N: usize> VolPixel for SVector<f32, N> {
    const DTYPE: &'static str = "f32";
    const CHANNELS: usize = N;
    const BYTES: usize = 4 * N;

    fn write_le(&self, out: &mut Vec<u8>) {
        for v in self.iter() {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn read_le(chunk: &[u8]) -> Self {
        SVector::from_fn(|k, _| {
            let bytes = &chunk[4 * k..4 * k + 4];
            f32::from_le_bytes(bytes.try_into().expect("chunk sized by BYTES"))
        })
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolHeader {
    shape: Vec<usize>,
    spacing: Vec<f64>,
    dtype: String,
    channels: usize,
}

/// Write an N-D volume: JSON header at `path`, raw data at `path + ".raw"`.
pub fn save_vol<T: VolPixel>(image: &ImageNd<T>, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let header = VolHeader {
        shape: image.shape().to_vec(),
        spacing: image.spacing().to_vec(),
        dtype: T::DTYPE.to_string(),
        channels: T::CHANNELS,
    };
    let json = serde_json::to_string_pretty(&header)
        .map_err(|e| format!("Failed to serialize header for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

    let mut bytes = Vec::with_capacity(image.len() * T::BYTES);
    for px in image.data() {
        px.write_le(&mut bytes);
    }
    let raw = raw_path(path);
    fs::write(&raw, bytes).map_err(|e| format!("Failed to write {}: {e}", raw.display()))
}

/// Read a volume written by [`save_vol`]. The stored element type must match
/// the requested pixel type.
pub fn load_vol<T: VolPixel>(path: &Path) -> Result<ImageNd<T>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let header: VolHeader = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse header {}: {e}", path.display()))?;
    if header.spacing.len() != header.shape.len() {
        return Err(format!(
            "{}: header spacing {:?} does not match shape {:?}",
            path.display(),
            header.spacing,
            header.shape
        ));
    }
    if header.dtype != T::DTYPE || header.channels != T::CHANNELS {
        return Err(format!(
            "{}: stored element type {}x{} does not match the requested {}x{}",
            path.display(),
            header.dtype,
            header.channels,
            T::DTYPE,
            T::CHANNELS
        ));
    }
    let raw = raw_path(path);
    let bytes = fs::read(&raw).map_err(|e| format!("Failed to read {}: {e}", raw.display()))?;
    let voxels: usize = header.shape.iter().product();
    if bytes.len() != voxels * T::BYTES {
        return Err(format!(
            "{}: expected {} bytes for shape {:?}, found {}",
            raw.display(),
            voxels * T::BYTES,
            header.shape,
            bytes.len()
        ));
    }
    let data: Vec<T> = bytes.chunks_exact(T::BYTES).map(T::read_le).collect();
    Ok(ImageNd::from_raw(&header.shape, data).with_spacing(&header.spacing))
}

fn raw_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".raw");
    PathBuf::from(os)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
