/// Example: render a few frames of a figure without taking over the terminal
///
/// Usage: cargo run --example snapshot -- [figure] [frames]

use std::env;
use std::io::{stdout, Write};
use trail3d_core::{Canvas, FigureKind, RenderConfig};
use trail3d_terminal::{CellMode, CellRenderer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let kind = args
        .get(1)
        .map(|s| s.parse::<FigureKind>())
        .transpose()?
        .unwrap_or(FigureKind::Cube);
    let frames = args
        .get(2)
        .map(|s| s.parse::<usize>())
        .transpose()?
        .unwrap_or(5);

    let mut figure = kind.build();
    RenderConfig {
        trail_length: 4,
        ..RenderConfig::default()
    }
    .apply(figure.as_mut());

    let renderer = CellRenderer::new(CellMode::Ascii, 0);
    let (width, height) = renderer.canvas_size(72, 30);
    let mut canvas = Canvas::new(width, height);
    for _ in 0..frames {
        figure.update();
        figure.render(&mut canvas);
    }

    let mut out = stdout();
    crossterm::execute!(out, crossterm::terminal::Clear(crossterm::terminal::ClearType::All))?;
    renderer.draw(&canvas, &mut out)?;
    writeln!(out)?;
    out.flush()?;
    println!("{} after {frames} frames ({} trail poses)", kind.label(), figure.trail_len());
    Ok(())
}
