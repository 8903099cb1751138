/// Trail3D Core Library - figure geometry, animation and software rendering
///
/// Builds the figure topologies, advances their rotation every tick, projects
/// them with a perspective divide and composites a fading trail of recent
/// poses onto any [`Surface`]. Host shells (terminal, web) own the window and
/// input and drive figures through the [`Figure`] trait.

pub mod controls;
pub mod error;
pub mod figure;
pub mod geometry;
pub mod projection;
pub mod render;
pub mod session;
pub mod surface;
pub mod trail;
pub mod transform;

// Re-export commonly used types
pub use controls::{FpsCounter, RenderConfig, ZoomControl};
pub use error::{Error, Result};
pub use figure::{Figure, FigureKind, FigureSettings};
pub use geometry::{Edge, TorusSampler, Vertex, WireShape};
pub use projection::{Projector, Viewport, Zoom};
pub use session::{Command, Session, Slider, Sliders};
pub use surface::{Canvas, Rgb, Surface};
pub use trail::{FadeCurve, TrailBuffer};
pub use transform::{Axis, AxisSpeeds, RotationOrder, RotationState, Spin};
