//! Paints a projected sprite list onto a canvas-sized image, back to front.

use image::{Rgba, RgbaImage};

use crate::{raster, state::SpriteList, SpriteID};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub background: Rgba<u8>,
    /// Color of the outline drawn around the selected sprite, or None for no outline.
    pub selection_outline: Option<Rgba<u8>>,
}
impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgba([0, 0, 0, 0]),
            selection_outline: Some(Rgba([0, 170, 255, 255])),
        }
    }
}

pub struct Renderer {
    canvas: RgbaImage,
    pub settings: RenderSettings,
}
impl Renderer {
    #[must_use]
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            settings,
        }
    }
    /// The last painted frame.
    #[must_use]
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }
    #[must_use]
    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }
    /// Repaint from scratch.
    pub fn paint(&mut self, sprites: &SpriteList, selected: Option<SpriteID>) -> &RgbaImage {
        let background = self.settings.background;
        self.canvas
            .pixels_mut()
            .for_each(|pixel| *pixel = background);
        for sprite in sprites {
            raster::draw_sprite(&mut self.canvas, sprite);
        }
        let outlined = selected.and_then(|id| sprites.get(id));
        if let (Some(sprite), Some(color)) = (outlined, self.settings.selection_outline) {
            raster::outline_sprite(&mut self.canvas, sprite, color);
        }
        log::trace!(
            "Painted {} sprites onto {}x{}",
            sprites.len(),
            self.canvas.width(),
            self.canvas.height()
        );
        &self.canvas
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{actions::Action, asset::ImageAsset, state::test::replay};
    use std::sync::Arc;

    fn solid(name: &str, color: [u8; 4]) -> Arc<ImageAsset> {
        Arc::new(ImageAsset::new(name, RgbaImage::from_pixel(4, 4, Rgba(color))).unwrap())
    }

    #[test]
    fn back_to_front() {
        let sprites = replay(&[
            Action::Create {
                image: solid("red.png", [255, 0, 0, 255]),
            },
            Action::Create {
                image: solid("blue.png", [0, 0, 255, 255]),
            },
            Action::Translate {
                target: SpriteID(1),
                x: 2.0,
                y: 0.0,
            },
        ]);
        let settings = RenderSettings {
            background: Rgba([255, 255, 255, 255]),
            selection_outline: None,
        };
        let mut renderer = Renderer::new(8, 4, settings);
        let canvas = renderer.paint(&sprites, None);
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(2, 0).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(7, 0).0, [255, 255, 255, 255]);
    }
    #[test]
    fn selection_outline() {
        let sprites = replay(&[Action::Create {
            image: solid("red.png", [255, 0, 0, 255]),
        }]);
        let outline = Rgba([1, 2, 3, 255]);
        let mut renderer = Renderer::new(
            8,
            8,
            RenderSettings {
                background: Rgba([0, 0, 0, 0]),
                selection_outline: Some(outline),
            },
        );
        let canvas = renderer.paint(&sprites, Some(SpriteID(0)));
        assert_eq!(*canvas.get_pixel(0, 0), outline);
        assert_eq!(*canvas.get_pixel(3, 3), outline);
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 0, 0, 255]);

        // Unknown selection draws no outline.
        let canvas = renderer.paint(&sprites, Some(SpriteID(5)));
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
