//! RGB ↔ HSV conversion over whole image buffers.
//!
//! Hue and saturation are kept in `[0, 1]`, but the value channel keeps the
//! `0..=255` range of the source samples instead of being normalized. Any
//! channel past the third (alpha) is carried through untouched in both
//! directions.

use image::{ImageBuffer, Pixel};

use crate::error::{Error, Result};

// ============================================================================
// HsvBuffer
// ============================================================================

/// An image in HSV space, laid out like the RGB buffer it came from.
///
/// Each pixel holds `[h, s, v, extra...]` where `extra` are the original
/// samples beyond the color channels (typically alpha).
#[derive(Debug, Clone, PartialEq)]
pub struct HsvBuffer {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<f64>,
}

impl HsvBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of samples per pixel, including pass-through channels.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Returns the samples of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[f64] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let ch = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * ch;
        &self.samples[start..start + ch]
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &[f64]> {
        self.samples.chunks_exact(self.channels as usize)
    }

    /// Overwrites the hue of every pixel, leaving saturation and value alone.
    pub fn set_hue(&mut self, hue: f64) {
        for px in self.samples.chunks_exact_mut(self.channels as usize) {
            px[0] = hue;
        }
    }
}

// ============================================================================
// Per-pixel conversion
// ============================================================================

/// Converts one RGB triple (each in `0..=255`) to `[h, s, v]`.
///
/// Achromatic pixels (`max == min`) yield hue 0 and saturation 0. When several
/// channels share the maximum, red wins over green, and green over blue.
pub fn rgb_to_hsv_pixel(r: f64, g: f64, b: f64) -> [f64; 3] {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if maxc == minc {
        return [0.0, 0.0, v];
    }

    let range = maxc - minc;
    let s = range / maxc;
    let rc = (maxc - r) / range;
    let gc = (maxc - g) / range;
    let bc = (maxc - b) / range;

    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    [(h / 6.0).rem_euclid(1.0), s, v]
}

/// Converts `[h, s, v]` back to an RGB triple, truncating to `u8`.
pub fn hsv_to_rgb_pixel(h: f64, s: f64, v: f64) -> [u8; 3] {
    let h6 = h * 6.0;
    let i = h6.trunc();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        match (i as i64).rem_euclid(6) {
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            5 => (v, p, q),
            _ => (v, t, p),
        }
    };

    [r as u8, g as u8, b as u8]
}

// ============================================================================
// Buffer conversion
// ============================================================================

/// Converts an 8-bit RGB or RGBA image into an [`HsvBuffer`].
///
/// Fails with [`Error::ChannelMismatch`] for pixel types with fewer than
/// three channels.
pub fn rgb_to_hsv<P>(image: &ImageBuffer<P, Vec<u8>>) -> Result<HsvBuffer>
where
    P: Pixel<Subpixel = u8>,
{
    let channels = P::CHANNEL_COUNT;
    if channels < 3 {
        return Err(Error::ChannelMismatch {
            expected: 3,
            actual: channels,
        });
    }

    let mut samples = Vec::with_capacity(image.width() as usize * image.height() as usize * channels as usize);
    for px in image.pixels() {
        let c = px.channels();
        samples.extend(rgb_to_hsv_pixel(f64::from(c[0]), f64::from(c[1]), f64::from(c[2])));
        samples.extend(c[3..].iter().copied().map(f64::from));
    }

    Ok(HsvBuffer {
        width: image.width(),
        height: image.height(),
        channels,
        samples,
    })
}

/// Converts an [`HsvBuffer`] back into an 8-bit image of pixel type `P`.
///
/// `P` must have the same channel count as the buffer.
pub fn hsv_to_rgb<P>(hsv: &HsvBuffer) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    if P::CHANNEL_COUNT != hsv.channels {
        return Err(Error::ChannelMismatch {
            expected: hsv.channels,
            actual: P::CHANNEL_COUNT,
        });
    }

    let mut out: ImageBuffer<P, Vec<u8>> = ImageBuffer::new(hsv.width, hsv.height);
    for (dst, src) in out.pixels_mut().zip(hsv.pixels()) {
        let dst = dst.channels_mut();
        dst[..3].copy_from_slice(&hsv_to_rgb_pixel(src[0], src[1], src[2]));
        for (d, s) in dst[3..].iter_mut().zip(&src[3..]) {
            *d = *s as u8;
        }
    }

    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn pure_red_to_hsv() {
        let [h, s, v] = rgb_to_hsv_pixel(255.0, 0.0, 0.0);
        assert_close(h, 0.0);
        assert_close(s, 1.0);
        assert_close(v, 255.0);
    }

    #[test]
    fn gray_to_hsv_is_achromatic() {
        let [h, s, v] = rgb_to_hsv_pixel(128.0, 128.0, 128.0);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 128.0);
    }

    #[test]
    fn black_does_not_divide_by_zero() {
        assert_eq!(rgb_to_hsv_pixel(0.0, 0.0, 0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn primary_hues() {
        assert_close(rgb_to_hsv_pixel(0.0, 255.0, 0.0)[0], 1.0 / 3.0);
        assert_close(rgb_to_hsv_pixel(0.0, 0.0, 255.0)[0], 2.0 / 3.0);
    }

    #[test]
    fn red_wins_ties_for_maximum() {
        // Yellow: red and green share the max, so the red branch computes the hue.
        let [h, s, _] = rgb_to_hsv_pixel(255.0, 255.0, 0.0);
        assert_close(h, 1.0 / 6.0);
        assert_close(s, 1.0);

        // Cyan: green and blue tie, green branch.
        assert_close(rgb_to_hsv_pixel(0.0, 255.0, 255.0)[0], 0.5);
    }

    #[test]
    fn negative_hue_wraps_into_unit_range() {
        // Magenta-ish red: red is max and g > b, giving a negative raw hue.
        let [h, _, _] = rgb_to_hsv_pixel(255.0, 0.0, 128.0);
        assert!((0.0..1.0).contains(&h), "hue {h} should wrap into [0, 1)");
        assert!(h > 0.9);
    }

    #[test]
    fn zero_saturation_ignores_hue() {
        for hue in [0.0, 0.1, 0.5, 0.83, 0.99] {
            assert_eq!(hsv_to_rgb_pixel(hue, 0.0, 77.0), [77, 77, 77]);
        }
    }

    #[test]
    fn sextant_table() {
        let v = 200.0;
        assert_eq!(hsv_to_rgb_pixel(0.0, 1.0, v), [200, 0, 0]);
        assert_eq!(hsv_to_rgb_pixel(1.0 / 3.0, 1.0, v), [0, 200, 0]);
        assert_eq!(hsv_to_rgb_pixel(2.0 / 3.0, 1.0, v), [0, 0, 200]);
        // A hue of exactly 1.0 lands in sextant 6, which wraps to red.
        assert_eq!(hsv_to_rgb_pixel(1.0, 1.0, v), [200, 0, 0]);
    }

    #[test]
    fn round_trip_within_one() {
        let mut img = RgbaImage::new(16, 256);
        for (i, pixel) in img.pixels_mut().enumerate() {
            let r = (i * 37 % 256) as u8;
            let g = (i * 101 % 256) as u8;
            let b = (i * 173 % 256) as u8;
            pixel.0 = [r, g, b, (i % 256) as u8];
        }

        let hsv = rgb_to_hsv(&img).unwrap();
        let back: RgbaImage = hsv_to_rgb(&hsv).unwrap();

        for (orig, out) in img.pixels().zip(back.pixels()) {
            for c in 0..3 {
                let diff = (orig[c] as i16 - out[c] as i16).abs();
                assert!(diff <= 1, "{:?} -> {:?}", orig.0, out.0);
            }
        }
    }

    #[test]
    fn alpha_is_bit_identical_after_round_trip() {
        let mut img = RgbaImage::new(4, 4);
        for (i, pixel) in img.pixels_mut().enumerate() {
            pixel.0 = [200, (i * 16) as u8, 30, (i * 17) as u8];
        }

        let hsv = rgb_to_hsv(&img).unwrap();
        assert_eq!(hsv.pixel(1, 0)[3], 17.0);

        let back: RgbaImage = hsv_to_rgb(&hsv).unwrap();
        for (orig, out) in img.pixels().zip(back.pixels()) {
            assert_eq!(orig[3], out[3]);
        }
    }

    #[test]
    fn achromatic_buffer_round_trips_exactly() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([90, 90, 90, 255]));
        let hsv = rgb_to_hsv(&img).unwrap();
        assert!(hsv.pixels().all(|px| px[1] == 0.0));

        let back: RgbaImage = hsv_to_rgb(&hsv).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn three_channel_images_are_supported() {
        let img = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        let hsv = rgb_to_hsv(&img).unwrap();
        assert_eq!(hsv.channels(), 3);
        assert_eq!(hsv.pixel(1, 1), &[0.0, 1.0, 255.0]);

        let back: RgbImage = hsv_to_rgb(&hsv).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn set_hue_replaces_only_hue() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 40]));
        let mut hsv = rgb_to_hsv(&img).unwrap();
        hsv.set_hue(1.0 / 3.0);

        let px = hsv.pixel(0, 0);
        assert_close(px[0], 1.0 / 3.0);
        assert_close(px[1], 1.0);
        assert_close(px[2], 255.0);
        assert_eq!(px[3], 40.0);
    }

    #[test]
    fn channel_mismatch_is_reported() {
        let img = RgbaImage::new(1, 1);
        let hsv = rgb_to_hsv(&img).unwrap();
        let err = hsv_to_rgb::<Rgb<u8>>(&hsv).unwrap_err();
        assert!(matches!(
            err,
            Error::ChannelMismatch {
                expected: 4,
                actual: 3
            }
        ));

        let gray = image::GrayImage::new(1, 1);
        assert!(rgb_to_hsv(&gray).is_err());
    }
}
