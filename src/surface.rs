use crate::Pixel;
use crate::color::Rgba;
use crate::heatmap::BASELINE;

/// A straight segment between two points, in pixel space. Coordinates may be fractional: a line of
/// thickness `t` centered on `x = 0.5` covers the pixel column `0` when `t = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: Pixel,
    pub y: Pixel,
    pub w: Pixel,
    pub h: Pixel,
}

/// Something we can draw a frame onto.
pub trait Surface {
    /// `(width, height)` in pixels
    fn size(&self) -> (Pixel, Pixel);

    /// Change the size of the surface. Contents are discarded.
    fn resize(&mut self, width: Pixel, height: Pixel);

    /// Draw every line in `lines` with the same stroke
    fn stroke(&mut self, lines: &[Line], thickness: Pixel, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);
}

/// An in-memory RGBA framebuffer.
///
/// Pixels that were never drawn have zero alpha.
#[derive(Debug, Default, Clone)]
pub struct Raster {
    /// The frame buffer, row-major
    fb: Vec<[u8; 4]>,

    /// Width of the framebuffer
    w: Pixel,

    /// Height of the framebuffer
    h: Pixel,
}

impl Raster {
    pub fn new(w: Pixel, h: Pixel) -> Self {
        Self {
            fb: vec![[0; 4]; w as usize * h as usize],
            w,
            h,
        }
    }

    /// Read back a pixel. Pixels outside the raster, or not drawn yet, read as [`BASELINE`].
    pub fn pixel(&self, x: Pixel, y: Pixel) -> Rgba {
        if x >= self.w || y >= self.h {
            return BASELINE;
        }

        match self.fb[self.xy_from(x, y)] {
            [_, _, _, 0] => BASELINE,
            px => Rgba::from_bytes(px),
        }
    }

    /// Whether anything has been drawn since the last resize
    pub fn is_blank(&self) -> bool {
        self.fb.iter().all(|px| px[3] == 0)
    }

    fn xy_from(&self, x: Pixel, y: Pixel) -> usize {
        y as usize * self.w as usize + x as usize
    }

    /// Fill the half-open pixel range `[x0, x1) x [y0, y1)`, clipped to the raster
    fn fill_span(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, px: [u8; 4]) {
        let x0 = x0.clamp(0, self.w as i64) as Pixel;
        let x1 = x1.clamp(0, self.w as i64) as Pixel;
        let y0 = y0.clamp(0, self.h as i64) as Pixel;
        let y1 = y1.clamp(0, self.h as i64) as Pixel;

        for y in y0..y1 {
            let row = self.xy_from(0, y);
            self.fb[row + x0 as usize..row + x1 as usize].fill(px);
        }
    }
}

impl Surface for Raster {
    fn size(&self) -> (Pixel, Pixel) {
        (self.w, self.h)
    }

    fn resize(&mut self, width: Pixel, height: Pixel) {
        *self = Self::new(width, height);
    }

    /// Only axis-aligned lines are drawn; anything else is skipped.
    fn stroke(&mut self, lines: &[Line], thickness: Pixel, color: Rgba) {
        let px = color.to_bytes();
        let half = thickness as f32 / 2.0;

        // the band covered by a stroke centered on `c`
        let band = |c: f32| ((c - half).floor() as i64, (c + half).floor() as i64);

        for line in lines {
            let ((fx, fy), (tx, ty)) = (line.from, line.to);

            if fx == tx {
                let (x0, x1) = band(fx);
                let (y0, y1) = (fy.min(ty).floor() as i64, fy.max(ty).ceil() as i64);
                self.fill_span(x0, y0, x1, y1, px);
            } else if fy == ty {
                let (y0, y1) = band(fy);
                let (x0, x1) = (fx.min(tx).floor() as i64, fx.max(tx).ceil() as i64);
                self.fill_span(x0, y0, x1, y1, px);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Rect { x, y, w, h } = rect;
        let (x, y) = (x as i64, y as i64);

        self.fill_span(x, y, x + w as i64, y + h as i64, color.to_bytes());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn readback_before_draw() {
        let raster = Raster::new(4, 4);

        assert!(raster.is_blank());
        assert_eq!(raster.pixel(1, 1), BASELINE);
        assert_eq!(raster.pixel(40, 1), BASELINE);
    }

    #[test]
    fn fill_is_clipped() {
        let mut raster = Raster::new(4, 4);
        raster.fill_rect(Rect { x: 2, y: 2, w: 10, h: 10 }, Rgba::BLACK);

        assert_eq!(raster.pixel(3, 3), Rgba::BLACK);
        assert_eq!(raster.pixel(1, 1), BASELINE);
    }

    #[test]
    fn stroke_covers_thickness() {
        let mut raster = Raster::new(6, 6);
        let lines = [Line {
            from: (2.5, 0.0),
            to: (2.5, 6.0),
        }];
        raster.stroke(&lines, 1, Rgba::WHITE);

        for y in 0..6 {
            assert_eq!(raster.pixel(2, y), Rgba::WHITE);
            assert_eq!(raster.pixel(1, y), BASELINE);
            assert_eq!(raster.pixel(3, y), BASELINE);
        }
    }

    #[test]
    fn thick_horizontal_stroke() {
        let mut raster = Raster::new(6, 6);
        let lines = [Line {
            from: (0.0, 1.0),
            to: (6.0, 1.0),
        }];
        raster.stroke(&lines, 2, Rgba::BLACK);

        assert_eq!(raster.pixel(5, 0), Rgba::BLACK);
        assert_eq!(raster.pixel(5, 1), Rgba::BLACK);
        assert_eq!(raster.pixel(5, 2), BASELINE);
    }
}
