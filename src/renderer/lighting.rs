//! Additive dynamic lighting
//!
//! A radial falloff texture is precomputed once, before the frame loop, and
//! never mutated again. Each frame the overlay is reset to opaque black, the
//! texture is stamped additively at every light source (saturating per
//! channel, so overlapping lights brighten toward white), and the result is
//! multiplied onto the scene, darkening unlit regions toward black.

use glam::Vec2;

use super::frame::Frame;
use crate::Color;

/// Precomputed radial falloff intensity map, side length 2 × radius.
/// Intensity is 255·(1 − d/R), clamped to [0, 255]: full at the center,
/// fading to zero at the rim and beyond.
pub struct FalloffTexture {
    radius: i32,
    intensity: Vec<u8>,
}

impl FalloffTexture {
    pub fn new(radius: u32) -> Self {
        let r = radius as i32;
        let side = 2 * r;
        let rf = radius as f32;
        let mut intensity = vec![0u8; (side * side) as usize];
        for y in 0..side {
            for x in 0..side {
                let dx = (x - r) as f32;
                let dy = (y - r) as f32;
                let d = (dx * dx + dy * dy).sqrt();
                let v = 255.0 * (1.0 - d / rf);
                intensity[(y * side + x) as usize] = v.clamp(0.0, 255.0) as u8;
            }
        }
        Self { radius: r, intensity }
    }

    pub fn side(&self) -> i32 {
        2 * self.radius
    }

    #[inline]
    fn at(&self, x: i32, y: i32) -> u8 {
        self.intensity[(y * self.side() + x) as usize]
    }
}

/// Reusable scratch layer for the per-frame lighting pass; allocated once so
/// the hot loop never reallocates
pub struct LightOverlay {
    mask: Frame,
}

impl LightOverlay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mask: Frame::new(width, height),
        }
    }

    /// Reset to opaque black, then stamp each light additively
    pub fn accumulate(&mut self, falloff: &FalloffTexture, lights: &[Vec2]) {
        self.mask.clear(Color::new(0, 0, 0));
        for light in lights {
            self.stamp(falloff, *light);
        }
    }

    /// Saturating additive blit of the falloff texture centered at `center`
    fn stamp(&mut self, falloff: &FalloffTexture, center: Vec2) {
        let side = falloff.side();
        let ox = center.x as i32 - side / 2;
        let oy = center.y as i32 - side / 2;
        let w = self.mask.width() as i32;
        let h = self.mask.height() as i32;

        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + side).min(w);
        let y1 = (oy + side).min(h);

        let bytes = self.mask.as_bytes_mut();
        for y in y0..y1 {
            let ty = y - oy;
            let row = (y * w) as usize * 4;
            for x in x0..x1 {
                let v = falloff.at(x - ox, ty);
                if v == 0 {
                    continue;
                }
                let i = row + x as usize * 4;
                bytes[i] = bytes[i].saturating_add(v);
                bytes[i + 1] = bytes[i + 1].saturating_add(v);
                bytes[i + 2] = bytes[i + 2].saturating_add(v);
            }
        }
    }

    /// Multiply the accumulated mask onto the scene buffer
    pub fn apply(&self, scene: &mut Frame) {
        scene.multiply(&self.mask);
    }

    #[cfg(test)]
    fn mask_pixel(&self, x: i32, y: i32) -> (u8, u8, u8) {
        self.mask.get_pixel(x, y).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falloff_full_at_center_zero_at_rim() {
        let tex = FalloffTexture::new(100);
        assert_eq!(tex.at(100, 100), 255);
        // On the rim (distance == R) and in the corner (distance > R): dark
        assert_eq!(tex.at(0, 100), 0);
        assert_eq!(tex.at(0, 0), 0);
        // Halfway out: about half intensity
        let mid = tex.at(150, 100);
        assert!((126..=129).contains(&mid), "mid = {mid}");
    }

    #[test]
    fn test_falloff_monotonic_along_axis() {
        let tex = FalloffTexture::new(50);
        let mut prev = tex.at(50, 50);
        for x in 51..100 {
            let v = tex.at(x, 50);
            assert!(v <= prev);
            prev = v;
        }
    }

    #[test]
    fn test_single_light_peaks_at_source() {
        let tex = FalloffTexture::new(20);
        let mut overlay = LightOverlay::new(100, 100);
        overlay.accumulate(&tex, &[Vec2::new(50.0, 50.0)]);
        assert_eq!(overlay.mask_pixel(50, 50), (255, 255, 255));
        // Outside the light radius the mask stays black
        assert_eq!(overlay.mask_pixel(90, 90), (0, 0, 0));
    }

    #[test]
    fn test_overlapping_lights_saturate() {
        let tex = FalloffTexture::new(20);
        let mut overlay = LightOverlay::new(100, 100);
        // Two coincident lights: additive, but capped at full intensity
        overlay.accumulate(&tex, &[Vec2::new(50.0, 50.0), Vec2::new(50.0, 50.0)]);
        assert_eq!(overlay.mask_pixel(50, 50), (255, 255, 255));
        let (near, _, _) = overlay.mask_pixel(60, 50);
        let single = {
            let mut one = LightOverlay::new(100, 100);
            one.accumulate(&tex, &[Vec2::new(50.0, 50.0)]);
            one.mask_pixel(60, 50).0
        };
        assert!(near >= single);
    }

    #[test]
    fn test_offscreen_light_clips() {
        let tex = FalloffTexture::new(20);
        let mut overlay = LightOverlay::new(100, 100);
        overlay.accumulate(&tex, &[Vec2::new(-5.0, 50.0), Vec2::new(105.0, 120.0)]);
        // Edge pixels near the first light still receive some light
        let (v, _, _) = overlay.mask_pixel(0, 50);
        assert!(v > 0);
    }

    #[test]
    fn test_accumulate_resets_between_frames() {
        let tex = FalloffTexture::new(20);
        let mut overlay = LightOverlay::new(100, 100);
        overlay.accumulate(&tex, &[Vec2::new(50.0, 50.0)]);
        overlay.accumulate(&tex, &[Vec2::new(10.0, 10.0)]);
        // The old light position no longer glows
        assert_eq!(overlay.mask_pixel(50, 50), (0, 0, 0));
    }

    #[test]
    fn test_apply_darkens_unlit_scene() {
        let tex = FalloffTexture::new(10);
        let mut overlay = LightOverlay::new(64, 64);
        overlay.accumulate(&tex, &[Vec2::new(32.0, 32.0)]);

        let mut scene = Frame::new(64, 64);
        scene.clear(Color::new(200, 200, 200));
        overlay.apply(&mut scene);

        // Fully lit at the source, untouched value
        assert_eq!(scene.get_pixel(32, 32), Some((200, 200, 200)));
        // Far from any light: black
        assert_eq!(scene.get_pixel(2, 2), Some((0, 0, 0)));
    }
}
