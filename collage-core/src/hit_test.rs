//! # Picking
//!
//! Which sprite is under the pointer is decided by drawing, not by geometry: transparent parts of an image are
//! click-through, so a bounding box test would pick wrong.
//!
//! The tester owns a scratch surface the size of the canvas. Each query clears it and draws sprites front to
//! back, checking after each draw whether the pixel under the pointer became visible. Nothing carries over
//! between queries, as sprites may have moved since the last one.

use image::{Rgba, RgbaImage};

use crate::{
    raster,
    state::{transform::Point, Sprite, SpriteList},
};

pub struct HitTester {
    surface: RgbaImage,
}
impl HitTester {
    /// A tester for a canvas of the given size, in canvas pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: RgbaImage::new(width, height),
        }
    }
    #[must_use]
    pub fn size(&self) -> [u32; 2] {
        [self.surface.width(), self.surface.height()]
    }
    /// Match a resized canvas. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() != [width, height] {
            self.surface = RgbaImage::new(width, height);
        }
    }
    /// The frontmost sprite with a visible pixel under `pointer`, if any.
    ///
    /// Points outside the canvas never hit.
    pub fn hit_test<'s>(&mut self, pointer: Point, sprites: &'s SpriteList) -> Option<&'s Sprite> {
        let (x, y) = self.pixel_at(pointer)?;

        self.surface
            .pixels_mut()
            .for_each(|pixel| *pixel = Rgba([0; 4]));
        for sprite in sprites.iter_front_to_back() {
            raster::draw_sprite(&mut self.surface, sprite);
            if self.surface.get_pixel(x, y)[3] != 0 {
                return Some(sprite);
            }
        }
        None
    }
    fn pixel_at(&self, pointer: Point) -> Option<(u32, u32)> {
        let [width, height] = self.size();
        if !(pointer.x >= 0.0 && pointer.y >= 0.0) {
            return None;
        }
        // Both non-negative and not NaN from here.
        let x: u32 = az::checked_cast(pointer.x.floor())?;
        let y: u32 = az::checked_cast(pointer.y.floor())?;
        (x < width && y < height).then_some((x, y))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        actions::Action,
        asset::ImageAsset,
        state::test::{image, replay},
        SpriteID,
    };
    use std::sync::Arc;

    fn opaque(name: &str, width: u32, height: u32) -> Arc<ImageAsset> {
        let pixels = RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]));
        Arc::new(ImageAsset::new(name, pixels).unwrap())
    }
    /// 10x10 with only the middle 4x4 opaque.
    fn padded(name: &str) -> Arc<ImageAsset> {
        let pixels = RgbaImage::from_fn(10, 10, |x, y| {
            if (3..7).contains(&x) && (3..7).contains(&y) {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        Arc::new(ImageAsset::new(name, pixels).unwrap())
    }

    #[test]
    fn transparent_padding_is_click_through() {
        // A below, B above with B's transparent border over A.
        let sprites = replay(&[
            Action::Create {
                image: opaque("a.png", 10, 10),
            },
            Action::Create {
                image: padded("b.png"),
            },
        ]);
        let mut tester = HitTester::new(32, 32);

        let hit = tester.hit_test(Point::new(1.5, 1.5), &sprites);
        assert_eq!(hit.map(|sprite| sprite.id), Some(SpriteID(0)));

        let hit = tester.hit_test(Point::new(5.0, 5.0), &sprites);
        assert_eq!(hit.map(|sprite| sprite.id), Some(SpriteID(1)));
    }
    #[test]
    fn misses() {
        let sprites = replay(&[Action::Create {
            image: opaque("a.png", 10, 10),
        }]);
        let mut tester = HitTester::new(32, 32);
        assert!(tester.hit_test(Point::new(20.0, 20.0), &sprites).is_none());
        assert!(tester.hit_test(Point::new(-1.0, 2.0), &sprites).is_none());
        assert!(tester.hit_test(Point::new(2.0, 40.0), &sprites).is_none());
        assert!(tester.hit_test(Point::new(f32::NAN, 2.0), &sprites).is_none());
        assert!(tester
            .hit_test(Point::new(1.0, 1.0), &SpriteList::new())
            .is_none());
        // Fully transparent image.
        let ghosts = replay(&[Action::Create {
            image: image("ghost.png", 10, 10),
        }]);
        assert!(tester.hit_test(Point::new(1.0, 1.0), &ghosts).is_none());
    }
    #[test]
    fn frontmost_wins_and_follows_edits() {
        let mut sprites = replay(&[
            Action::Create {
                image: opaque("a.png", 10, 10),
            },
            Action::Create {
                image: opaque("b.png", 10, 10),
            },
        ]);
        let mut tester = HitTester::new(32, 32);
        let pick = |tester: &mut HitTester, sprites: &SpriteList, x, y| {
            tester.hit_test(Point::new(x, y), sprites).map(|s| s.id)
        };
        assert_eq!(pick(&mut tester, &sprites, 5.0, 5.0), Some(SpriteID(1)));

        // Same tester, moved sprite. Nothing stale may remain.
        sprites = replay(&[
            Action::Create {
                image: opaque("a.png", 10, 10),
            },
            Action::Create {
                image: opaque("b.png", 10, 10),
            },
            Action::Translate {
                target: SpriteID(1),
                x: 15.0,
                y: 0.0,
            },
        ]);
        assert_eq!(pick(&mut tester, &sprites, 5.0, 5.0), Some(SpriteID(0)));
        assert_eq!(pick(&mut tester, &sprites, 16.0, 5.0), Some(SpriteID(1)));
    }
    #[test]
    fn resize() {
        let mut tester = HitTester::new(4, 4);
        tester.resize(8, 2);
        assert_eq!(tester.size(), [8, 2]);
    }
}
