/// 2D drawing surfaces and source-over compositing
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::projection::Viewport;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Source-over blend of `self` onto `dst` with opacity `alpha`
    pub fn over(self, dst: Rgb, alpha: f32) -> Rgb {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| -> u8 {
            (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
        };
        Rgb::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parse `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Something figures can draw on
///
/// Implementors provide the size, an opaque fill and a per-pixel blend;
/// lines and rectangles are built on top and skip off-surface pixels.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Overwrite every pixel with an opaque color
    fn fill(&mut self, color: Rgb);

    /// Composite `color` over the pixel at `(x, y)`; out-of-range is a no-op
    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb, alpha: f32);

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width(), self.height())
    }

    /// Draws a line between two pixels using Bresenham's algorithm,
    /// touching each covered pixel once
    ///
    /// The segment is clipped to the surface first, so only on-surface
    /// pixels are stepped.
    fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), color: Rgb, alpha: f32) {
        let Some(((mut x0, mut y0), (x1, y1))) = clip_line(from, to, self.width(), self.height())
        else {
            return;
        };
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.blend_pixel(x0, y0, color, alpha);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Composite a `w`×`h` rectangle whose top-left corner is `(x, y)`
    fn fill_rect(&mut self, x: i64, y: i64, w: usize, h: usize, color: Rgb, alpha: f32) {
        for row in 0..h as i64 {
            for col in 0..w as i64 {
                self.blend_pixel(x + col, y + row, color, alpha);
            }
        }
    }
}

/// Clip a segment to the `width`×`height` pixel grid (Liang-Barsky)
///
/// Returns the clipped endpoints, or `None` when the segment misses the grid.
pub fn clip_line(
    from: (i64, i64),
    to: (i64, i64),
    width: usize,
    height: usize,
) -> Option<((i64, i64), (i64, i64))> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let (x_max, y_max) = ((width - 1) as f64, (height - 1) as f64);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        (
            (x0 + t * dx).round().clamp(0.0, x_max) as i64,
            (y0 + t * dy).round().clamp(0.0, y_max) as i64,
        )
    };
    Some((at(t0), at(t1)))
}

/// RGBA8 software framebuffer, row-major, always fully opaque
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        };
        canvas.fill(Rgb::BLACK);
        canvas
    }

    /// Resize, discarding contents when the size changes
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Raw RGBA bytes, suitable for image upload
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        Some(Rgb::new(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ))
    }

    /// True when every pixel has `color`
    pub fn is_filled_with(&self, color: Rgb) -> bool {
        self.pixels
            .chunks_exact(4)
            .all(|p| p[0] == color.r && p[1] == color.g && p[2] == color.b)
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize * self.width + x as usize) * 4)
    }
}

impl Surface for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn fill(&mut self, color: Rgb) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        let Some(offset) = self.offset(x, y) else {
            return;
        };
        let dst = Rgb::new(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        );
        let out = color.over(dst, alpha);
        self.pixels[offset] = out.r;
        self.pixels[offset + 1] = out.g;
        self.pixels[offset + 2] = out.b;
        self.pixels[offset + 3] = 255;
    }
}
