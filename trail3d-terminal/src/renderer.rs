/// Terminal rasterizer: copies a pixel canvas into character cells
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use trail3d_core::{Canvas, Rgb, Surface};

/// Character luminosity ramp for monochrome output (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Upper half block; foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// How canvas pixels map onto character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellMode {
    /// Two truecolor pixels per cell
    #[default]
    HalfBlock,
    /// One pixel per cell, shaded through the luminosity ramp
    Ascii,
}

impl CellMode {
    /// Pixel rows covered by one terminal row
    pub fn rows_per_cell(self) -> usize {
        match self {
            CellMode::HalfBlock => 2,
            CellMode::Ascii => 1,
        }
    }
}

/// Writes a [`Canvas`] to a terminal, starting at a given screen row
pub struct CellRenderer {
    mode: CellMode,
    top: u16,
}

impl CellRenderer {
    pub fn new(mode: CellMode, top: u16) -> Self {
        Self { mode, top }
    }

    /// Canvas size in pixels for a terminal of `cols` × `rows` cells
    pub fn canvas_size(&self, cols: u16, rows: u16) -> (usize, usize) {
        let rows = rows.saturating_sub(self.top) as usize;
        (cols as usize, rows * self.mode.rows_per_cell())
    }

    pub fn draw<W: Write>(&self, canvas: &Canvas, writer: &mut W) -> std::io::Result<()> {
        let cell_rows = canvas.height() / self.mode.rows_per_cell();
        for row in 0..cell_rows {
            writer.queue(cursor::MoveTo(0, self.top + row as u16))?;
            match self.mode {
                CellMode::HalfBlock => self.draw_half_block_row(canvas, row, writer)?,
                CellMode::Ascii => self.draw_ascii_row(canvas, row, writer)?,
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    fn draw_half_block_row<W: Write>(
        &self,
        canvas: &Canvas,
        row: usize,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        for x in 0..canvas.width() {
            let top = canvas.pixel(x, row * 2).unwrap_or(Rgb::BLACK);
            let bottom = canvas.pixel(x, row * 2 + 1).unwrap_or(Rgb::BLACK);
            if current != Some((top, bottom)) {
                writer.queue(SetForegroundColor(color(top)))?;
                writer.queue(SetBackgroundColor(color(bottom)))?;
                current = Some((top, bottom));
            }
            writer.queue(Print(HALF_BLOCK))?;
        }
        Ok(())
    }

    fn draw_ascii_row<W: Write>(
        &self,
        canvas: &Canvas,
        row: usize,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(Color::Reset))?;
        let mut current = None;
        for x in 0..canvas.width() {
            let pixel = canvas.pixel(x, row).unwrap_or(Rgb::BLACK);
            if current != Some(pixel) {
                writer.queue(SetForegroundColor(color(pixel)))?;
                current = Some(pixel);
            }
            writer.queue(Print(shade(pixel)))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Ramp character for a pixel's perceived brightness
fn shade(rgb: Rgb) -> char {
    let luma = 0.299 * rgb.r as f32 + 0.587 * rgb.g as f32 + 0.114 * rgb.b as f32;
    let index = (luma / 255.0 * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_reserves_status_row() {
        let blocks = CellRenderer::new(CellMode::HalfBlock, 1);
        assert_eq!(blocks.canvas_size(80, 25), (80, 48));
        let ascii = CellRenderer::new(CellMode::Ascii, 1);
        assert_eq!(ascii.canvas_size(80, 25), (80, 24));
        assert_eq!(ascii.canvas_size(80, 0), (80, 0));
    }

    #[test]
    fn test_half_block_emits_one_glyph_per_cell() {
        let mut canvas = Canvas::new(6, 4);
        canvas.fill(Rgb::BLUE);
        let mut out = Vec::new();
        CellRenderer::new(CellMode::HalfBlock, 1)
            .draw(&canvas, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 12);
    }

    #[test]
    fn test_shade_ramp_ends() {
        assert_eq!(shade(Rgb::BLACK), ' ');
        assert_eq!(shade(Rgb::WHITE), '@');
    }
}
