//! # Software rasterization
//!
//! Sprites are drawn axis-aligned with nearest-neighbor sampling: a destination pixel is covered by a sprite iff
//! the pixel's center lies within the sprite's bounds (top and left edges inclusive), and it takes the color of
//! the source texel under that center. Both the [renderer](crate::render) and the [hit tester](crate::hit_test)
//! draw through here, so what you click is exactly what you see.

use std::ops::Range;

use image::{Rgba, RgbaImage};

use crate::state::Sprite;

/// Destination pixel ranges a sprite covers on a `width` x `height` surface, or None if it covers nothing.
#[must_use]
pub fn covered_pixels(sprite: &Sprite, width: u32, height: u32) -> Option<(Range<u32>, Range<u32>)> {
    let bounds = sprite.bounds();
    let finite = [bounds.origin.x, bounds.origin.y, bounds.width, bounds.height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    // Pixel p is covered iff origin <= p + 0.5 < origin + size.
    let first = |origin: f32, limit: u32| clamp_to(origin - 0.5, limit);
    let end = |origin: f32, size: f32, limit: u32| clamp_to(origin + size - 0.5, limit);

    let xs = first(bounds.origin.x, width)..end(bounds.origin.x, bounds.width, width);
    let ys = first(bounds.origin.y, height)..end(bounds.origin.y, bounds.height, height);
    (!xs.is_empty() && !ys.is_empty()).then_some((xs, ys))
}

/// The source texel of `sprite` shown at destination pixel `x, y`, if it covers that pixel at all.
#[must_use]
pub fn sample(sprite: &Sprite, x: u32, y: u32) -> Option<Rgba<u8>> {
    let bounds = sprite.bounds();
    let center = crate::state::transform::Point::new(x as f32 + 0.5, y as f32 + 0.5);
    if !bounds.contains(center) {
        return None;
    }
    let pixels = sprite.image.pixels();
    let u = (center.x - bounds.origin.x) / bounds.width;
    let v = (center.y - bounds.origin.y) / bounds.height;
    // Rounding can push a texel index one past the edge, pull it back.
    let texel_x = texel_index(u, pixels.width());
    let texel_y = texel_index(v, pixels.height());
    Some(*pixels.get_pixel(texel_x, texel_y))
}

/// Draw `sprite` onto `surface` with source-over blending.
pub fn draw_sprite(surface: &mut RgbaImage, sprite: &Sprite) {
    let Some((xs, ys)) = covered_pixels(sprite, surface.width(), surface.height()) else {
        return;
    };
    for y in ys {
        for x in xs.clone() {
            let Some(src) = sample(sprite, x, y) else {
                continue;
            };
            // Fully transparent source, skip
            if src[3] == 0 {
                continue;
            }
            let dst = surface.get_pixel_mut(x, y);
            *dst = source_over(src, *dst);
        }
    }
}

/// Porter-Duff "source over" for straight alpha.
#[must_use]
pub fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_alpha = f32::from(src[3]) / 255.0;
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |idx: usize| -> u8 {
        let src = f32::from(src[idx]) / 255.0;
        let dst = f32::from(dst[idx]) / 255.0;
        let out = (src * src_alpha + dst * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        az::saturating_cast((out * 255.0).round())
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        az::saturating_cast((out_alpha * 255.0).round()),
    ])
}

/// Draw a 1px rectangle outline around the pixels `sprite` covers.
pub fn outline_sprite(surface: &mut RgbaImage, sprite: &Sprite, color: Rgba<u8>) {
    let Some((xs, ys)) = covered_pixels(sprite, surface.width(), surface.height()) else {
        return;
    };
    let (right, bottom) = (xs.end - 1, ys.end - 1);
    for x in xs.clone() {
        surface.put_pixel(x, ys.start, color);
        surface.put_pixel(x, bottom, color);
    }
    for y in ys {
        surface.put_pixel(xs.start, y, color);
        surface.put_pixel(right, y, color);
    }
}

/// Round up and clamp into `0..=limit`. `v` must not be NaN.
fn clamp_to(v: f32, limit: u32) -> u32 {
    let clamped = v.ceil().clamp(0.0, limit as f32);
    az::saturating_cast::<f32, u32>(clamped).min(limit)
}

fn texel_index(fraction: f32, size: u32) -> u32 {
    let idx: u32 = az::saturating_cast((fraction * size as f32).floor().max(0.0));
    idx.min(size - 1)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        actions::Action,
        state::test::replay,
        SpriteID,
    };
    use std::sync::Arc;

    fn checker() -> Arc<crate::asset::ImageAsset> {
        // 2x2: red, green / blue, transparent
        let mut pixels = RgbaImage::new(2, 2);
        pixels.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        pixels.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        pixels.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        Arc::new(crate::asset::ImageAsset::new("checker.png", pixels).unwrap())
    }

    #[test]
    fn coverage_uses_pixel_centers() {
        let sprites = replay(&[
            Action::Create { image: checker() },
            Action::Translate {
                target: SpriteID(0),
                x: 1.4,
                y: 1.6,
            },
        ]);
        let sprite = &sprites.as_slice()[0];
        // x: centers 1.5, 2.5 lie in [1.4, 3.4). y: centers 2.5 (and 3.5) lie in [1.6, 3.6).
        assert_eq!(covered_pixels(sprite, 10, 10), Some((1..3, 2..4)));
        // Clipped by the surface.
        assert_eq!(covered_pixels(sprite, 2, 3), Some((1..2, 2..3)));
        assert_eq!(covered_pixels(sprite, 1, 10), None);
    }
    #[test]
    fn scaled_sampling() {
        let sprites = replay(&[
            Action::Create { image: checker() },
            Action::Scale {
                target: SpriteID(0),
                width: 4.0,
            },
        ]);
        let sprite = &sprites.as_slice()[0];
        // Scaled about center: now covers -1..3 on both axes.
        let mut surface = RgbaImage::new(4, 4);
        draw_sprite(&mut surface, sprite);
        assert_eq!(surface.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(surface.get_pixel(1, 0).0, [0, 255, 0, 255]);
        assert_eq!(surface.get_pixel(0, 1).0, [0, 0, 255, 255]);
        assert_eq!(surface.get_pixel(2, 2).0, [0, 0, 0, 0]);
        assert_eq!(surface.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }
    #[test]
    fn blending() {
        let opaque = Rgba([10, 20, 30, 255]);
        assert_eq!(source_over(opaque, Rgba([200, 200, 200, 255])), opaque);
        assert_eq!(source_over(Rgba([0, 0, 0, 0]), opaque), opaque);
        let half = source_over(Rgba([255, 255, 255, 128]), Rgba([0, 0, 0, 255]));
        assert_eq!(half[3], 255);
        assert!((127..=129).contains(&half[0]));
    }
    #[test]
    fn degenerate_sprites_draw_nothing() {
        let sprites = replay(&[
            Action::Create { image: checker() },
            Action::Scale {
                target: SpriteID(0),
                width: 0.0,
            },
        ]);
        let mut surface = RgbaImage::new(4, 4);
        draw_sprite(&mut surface, &sprites.as_slice()[0]);
        assert!(surface.pixels().all(|pixel| pixel[3] == 0));
    }
}
