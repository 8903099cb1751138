/// Terminal frontend: animates a figure in truecolor character cells
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use trail3d_core::{Canvas, Command, FpsCounter, Session};

pub mod input;
pub mod renderer;

pub use input::Action;
pub use renderer::{CellMode, CellRenderer};

/// Tick interval, roughly 60 Hz
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Main application struct for terminal rendering
pub struct TerminalApp {
    session: Session,
    renderer: CellRenderer,
    canvas: Canvas,
    cols: u16,
    fps: FpsCounter,
    started: Instant,
    running: bool,
    figure_color: usize,
    background: usize,
}

impl TerminalApp {
    pub fn new(session: Session, mode: CellMode) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        // Row 0 holds the status line
        let renderer = CellRenderer::new(mode, 1);
        let (width, height) = renderer.canvas_size(cols, rows);
        log::info!("terminal {cols}x{rows}, canvas {width}x{height} ({mode:?})");
        let config = *session.config();

        Ok(Self {
            session,
            renderer,
            canvas: Canvas::new(width, height),
            cols,
            fps: FpsCounter::new(),
            started: Instant::now(),
            running: true,
            figure_color: input::palette_index(&input::FIGURE_PALETTE, config.figure_color),
            background: input::palette_index(&input::BACKGROUND_PALETTE, config.background_color),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut next_tick = Instant::now();

        while self.running {
            // Handle input until the next tick is due
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                let event = event::read()?;
                self.handle_event(&event);
                continue;
            }

            self.session.tick(&mut self.canvas);
            self.render()?;
            self.fps.tick(self.started.elapsed().as_secs_f64() * 1000.0);

            next_tick += FRAME_TIME;
            let now = Instant::now();
            if next_tick < now {
                next_tick = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Resize(cols, rows) = *event {
            let (width, height) = self.renderer.canvas_size(cols, rows);
            log::debug!("resize to {cols}x{rows}, canvas {width}x{height}");
            self.canvas.resize(width, height);
            self.cols = cols;
            return;
        }
        let Some(action) = input::action_for(event) else {
            return;
        };
        log::trace!("action {action:?}");
        match action {
            Action::Quit => self.running = false,
            Action::CycleFigureColor => {
                self.figure_color = (self.figure_color + 1) % input::FIGURE_PALETTE.len();
                let color = input::FIGURE_PALETTE[self.figure_color];
                self.session.handle(Command::FigureColor(color));
            }
            Action::CycleBackground => {
                self.background = (self.background + 1) % input::BACKGROUND_PALETTE.len();
                let color = input::BACKGROUND_PALETTE[self.background];
                self.session.handle(Command::BackgroundColor(color));
            }
            Action::Session(command) => self.session.handle(command),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.renderer.draw(&self.canvas, &mut stdout)?;

        // Draw UI overlay
        let fps = self.session.config().show_fps.then(|| self.fps.fps());
        let line = self.session.status_line(fps);
        let status = fit_to_width(&line, self.cols);
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Cut `line` to at most `cols` characters so it never wraps into the canvas
fn fit_to_width(line: &str, cols: u16) -> &str {
    match line.char_indices().nth(cols as usize) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_cut_to_terminal_width() {
        let line = "Donut | speed 1.0 | trail 1";
        assert_eq!(fit_to_width(line, 5), "Donut");
        assert_eq!(fit_to_width(line, 0), "");
        assert_eq!(fit_to_width(line, 80), line);
        assert_eq!(fit_to_width("zoom \u{d7}2", 6), "zoom \u{d7}");
    }
}
