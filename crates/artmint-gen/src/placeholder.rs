//! Local placeholder image synthesis
//!
//! When every model candidate fails, the resolver substitutes a locally
//! rendered PNG so the minting pipeline downstream always receives valid
//! bytes. The prompt, style, and failure summary are folded into the
//! pixel content, so distinct prompts still produce distinct content
//! hashes even under a total upstream outage.

use std::io::Cursor;

use artmint_core::{ArtmintError, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use sha2::{Digest, Sha256};

/// Placeholder dimensions
pub const PLACEHOLDER_SIZE: u32 = 512;

// Background gradient endpoints (dark teal ramp)
const GRADIENT_TOP: [u8; 3] = [0x0f, 0x20, 0x27];
const GRADIENT_BOTTOM: [u8; 3] = [0x2c, 0x53, 0x64];

const GRID_CELLS: u32 = 12;
const GRID_CELL_PX: u32 = 32;
const GRID_ORIGIN: u32 = 64;

/// Render a deterministic placeholder PNG for a failed generation.
///
/// Pure function of its three inputs: identical (prompt, style, reason)
/// always encode to identical bytes.
pub fn synthesize(prompt: &str, style: &str, reason: &str) -> Result<Vec<u8>> {
    let seed = seed_from(prompt, style, reason);
    let size = PLACEHOLDER_SIZE;

    let mut img = RgbaImage::new(size, size);

    // Vertical gradient background
    for y in 0..size {
        let t = y as f32 / (size - 1) as f32;
        let px = Rgba([
            lerp(GRADIENT_TOP[0], GRADIENT_BOTTOM[0], t),
            lerp(GRADIENT_TOP[1], GRADIENT_BOTTOM[1], t),
            lerp(GRADIENT_TOP[2], GRADIENT_BOTTOM[2], t),
            255,
        ]);
        for x in 0..size {
            img.put_pixel(x, y, px);
        }
    }

    // Seeded glyph grid: this is where the inputs reach the pixels
    for gy in 0..GRID_CELLS {
        for gx in 0..GRID_CELLS {
            let idx = (gy * GRID_CELLS + gx) as usize;
            let a = seed[idx % 32];
            let b = seed[(idx * 7 + 3) % 32];
            if a & 1 == 0 {
                continue; // leave gradient showing through
            }
            let cell = Rgba([
                a,
                a.wrapping_add(b),
                b | 0x40,
                200,
            ]);
            fill_rect(
                &mut img,
                GRID_ORIGIN + gx * GRID_CELL_PX,
                GRID_ORIGIN + gy * GRID_CELL_PX,
                GRID_CELL_PX - 4,
                GRID_CELL_PX - 4,
                cell,
            );
        }
    }

    // Thin frame so the placeholder is visually recognizable
    let frame = Rgba([0x9b, 0xb1, 0xbd, 255]);
    fill_rect(&mut img, 16, 16, size - 32, 2, frame);
    fill_rect(&mut img, 16, size - 18, size - 32, 2, frame);
    fill_rect(&mut img, 16, 16, 2, size - 32, frame);
    fill_rect(&mut img, size - 18, 16, 2, size - 32, frame);

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| ArtmintError::GenerationError(format!("Failed to encode placeholder: {}", e)))?;

    Ok(buf)
}

fn seed_from(prompt: &str, style: &str, reason: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hasher.update(b"\x00");
    hasher.update(style.as_bytes());
    hasher.update(b"\x00");
    hasher.update(reason.as_bytes());
    hasher.finalize().into()
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let (width, height) = img.dimensions();
    for yy in y..(y + h).min(height) {
        for xx in x..(x + w).min(width) {
            img.put_pixel(xx, yy, color);
        }
    }
}
