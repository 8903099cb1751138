/// Keyboard and mouse bindings
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use trail3d_core::{Axis, Command, FigureKind, Rgb, Slider};

/// Zoom slider units moved by `<` and `>`
const ZOOM_SLIDER_STEP: i32 = 25;
/// Gamma slider units moved by `g` and `G`
const GAMMA_STEP: i32 = 5;

/// Figure colors cycled with `c`
pub const FIGURE_PALETTE: [Rgb; 6] = [
    Rgb::WHITE,
    Rgb::RED,
    Rgb::GREEN,
    Rgb::new(80, 160, 255),
    Rgb::new(255, 220, 0),
    Rgb::new(0, 230, 230),
];

/// Background colors cycled with `b`
pub const BACKGROUND_PALETTE: [Rgb; 4] = [
    Rgb::BLACK,
    Rgb::new(30, 30, 30),
    Rgb::new(0, 0, 60),
    Rgb::WHITE,
];

/// Key help shown after `--help`
pub const KEY_HELP: &str = "Keys: space pause | 1-4 figure | +/- or wheel zoom | </> zoom slider | \
s/S speed | t/T trail | g/G gamma | x/X y/Y z/Z axis speed | c/b colors | f fps | q quit";

/// What a bound input asks the terminal app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    CycleFigureColor,
    CycleBackground,
    Session(Command),
}

/// Translate a terminal event into an action, if it is bound to one
pub fn action_for(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_action(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::Session(Command::Wheel(-1.0))),
            MouseEventKind::ScrollDown => Some(Action::Session(Command::Wheel(1.0))),
            _ => None,
        },
        _ => None,
    }
}

fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let KeyCode::Char(c) = key.code else {
        return (key.code == KeyCode::Esc).then_some(Action::Quit);
    };
    let command = match c {
        'q' => return Some(Action::Quit),
        'c' => return Some(Action::CycleFigureColor),
        'b' => return Some(Action::CycleBackground),
        ' ' => Command::TogglePause,
        'f' => Command::ToggleFps,
        '1' => Command::Select(FigureKind::Donut),
        '2' => Command::Select(FigureKind::Cube),
        '3' => Command::Select(FigureKind::Bridge),
        '4' => Command::Select(FigureKind::TorusCube),
        '+' | '=' => Command::Wheel(-1.0),
        '-' => Command::Wheel(1.0),
        '>' => Command::Nudge(Slider::Zoom, ZOOM_SLIDER_STEP),
        '<' => Command::Nudge(Slider::Zoom, -ZOOM_SLIDER_STEP),
        'S' => Command::Nudge(Slider::Speed, 1),
        's' => Command::Nudge(Slider::Speed, -1),
        'T' => Command::Nudge(Slider::Trail, 1),
        't' => Command::Nudge(Slider::Trail, -1),
        'G' => Command::Nudge(Slider::Gamma, GAMMA_STEP),
        'g' => Command::Nudge(Slider::Gamma, -GAMMA_STEP),
        'X' => Command::Nudge(Slider::Axis(Axis::X), 1),
        'x' => Command::Nudge(Slider::Axis(Axis::X), -1),
        'Y' => Command::Nudge(Slider::Axis(Axis::Y), 1),
        'y' => Command::Nudge(Slider::Axis(Axis::Y), -1),
        'Z' => Command::Nudge(Slider::Axis(Axis::Z), 1),
        'z' => Command::Nudge(Slider::Axis(Axis::Z), -1),
        _ => return None,
    };
    Some(Action::Session(command))
}

/// Position of `color` in `palette`, or the first entry
pub fn palette_index(palette: &[Rgb], color: Rgb) -> usize {
    palette.iter().position(|&c| c == color).unwrap_or(0)
}
