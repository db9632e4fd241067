use rustray::math::{Degrees, Line, Radians, Vec3};
use rustray::window::{FrameLimiter, InputState, Window, WindowEvent};
use rustray::{Cube, Engine, Frame};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const WINDOW_WIDTH: u32 = 512;
const ASPECT_RATIO: f64 = 1.0;
const FRAME_TARGET_MS: u64 = 30;
/// Orbit speed while a key is held.
const DEGREES_PER_SECOND: f64 = 33.0;
const CAMERA_DISTANCE: f64 = 5.0;
const USAGE: &str = "usage: rustray [--snapshot <path>]";

/// Orbits the camera around the world origin by `step` per held key: W/S
/// pitch around the camera's own left axis, A/D yaw around global up.
fn orbit(frame: Frame, input: InputState, step: Radians) -> Frame {
    let pitch_axis = Line::new(Vec3::ZERO, frame.j);
    let yaw_axis = Line::new(Vec3::ZERO, Vec3::K);

    let mut frame = frame;
    if input.pitch_up {
        frame = frame.rotate(&pitch_axis, step);
    }
    if input.pitch_down {
        frame = frame.rotate(&pitch_axis, -step);
    }
    if input.yaw_left {
        frame = frame.rotate(&yaw_axis, -step);
    }
    if input.yaw_right {
        frame = frame.rotate(&yaw_axis, step);
    }
    frame
}

#[derive(Debug, PartialEq)]
enum Mode {
    Interactive,
    /// Render one frame to a PNG at this path and exit.
    Snapshot(String),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Mode, String> {
    let mode = match args.next().as_deref() {
        None => Mode::Interactive,
        Some("--snapshot") => {
            let path = args.next().ok_or(format!("--snapshot needs a path\n{USAGE}"))?;
            Mode::Snapshot(path)
        }
        Some(other) => return Err(format!("unknown argument `{other}`\n{USAGE}")),
    };
    match args.next() {
        Some(extra) => Err(format!("unexpected argument `{extra}`\n{USAGE}")),
        None => Ok(mode),
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let engine = Engine::new();
    engine.add(Cube::new(2.0, 1.0, 3.0).map_err(|e| e.to_string())?);
    engine.reposition_camera(|frame| frame.translate(Vec3::I * -CAMERA_DISTANCE));

    // `--snapshot <path>` renders a single frame to a PNG and exits.
    if let Mode::Snapshot(path) = parse_args(std::env::args().skip(1))? {
        let frame = engine
            .render(WINDOW_WIDTH, ASPECT_RATIO)
            .map_err(|e| e.to_string())?;
        frame.save(&path).map_err(|e| e.to_string())?;
        info!(%path, "snapshot written");
        return Ok(());
    }

    let window_height = (WINDOW_WIDTH as f64 / ASPECT_RATIO) as u32;
    let mut window = Window::new("Rustray", WINDOW_WIDTH, window_height)?;
    info!(entities = engine.len(), "scene ready, WASD to orbit, Esc to quit");

    let mut limiter = FrameLimiter::new(&window, FRAME_TARGET_MS);
    let mut delta_ms = FRAME_TARGET_MS;
    loop {
        if window.poll_events() == WindowEvent::Quit {
            break;
        }

        let input = window.input();
        if input != InputState::default() {
            let step: Radians = Degrees(DEGREES_PER_SECOND * delta_ms as f64 / 1000.0).into();
            engine.reposition_camera(|frame| orbit(frame, input, step));
        }

        match engine.render(window.width(), ASPECT_RATIO) {
            Ok(frame) => window.present(&frame)?,
            Err(err) => {
                error!(%err, "render failed");
                return Err(err.to_string());
            }
        }

        delta_ms = limiter.wait_and_get_delta(&window);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|arg| arg.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn no_arguments_opens_the_window() {
        assert_eq!(parse_args(args(&[])), Ok(Mode::Interactive));
    }

    #[test]
    fn snapshot_takes_a_path() {
        assert_eq!(
            parse_args(args(&["--snapshot", "out.png"])),
            Ok(Mode::Snapshot("out.png".to_string()))
        );
    }

    #[test]
    fn snapshot_without_path_is_an_error() {
        let err = parse_args(args(&["--snapshot"])).unwrap_err();
        assert!(err.contains("needs a path"), "{err}");
    }

    #[test]
    fn unknown_or_extra_arguments_are_errors() {
        assert!(parse_args(args(&["out.png"])).is_err());
        assert!(parse_args(args(&["--snapshot", "out.png", "again"])).is_err());
    }

    #[test]
    fn orbit_turns_by_the_given_step() {
        let start = Frame::ZERO.translate(Vec3::I * -CAMERA_DISTANCE);
        let input = InputState {
            yaw_right: true,
            ..InputState::default()
        };

        let quarter = orbit(start, input, Degrees(90.0).into());
        assert_abs_diff_eq!(quarter.origin, Vec3::J * -CAMERA_DISTANCE, epsilon = 1e-9);

        // Half the elapsed time turns half as far.
        let eighth = orbit(start, input, Degrees(45.0).into());
        let twice = orbit(eighth, input, Degrees(45.0).into());
        assert_abs_diff_eq!(twice.origin, quarter.origin, epsilon = 1e-9);
    }

    #[test]
    fn idle_input_leaves_the_frame_alone() {
        let start = Frame::ZERO.translate(Vec3::I * -CAMERA_DISTANCE);
        assert_eq!(orbit(start, InputState::default(), Degrees(10.0).into()), start);
    }
}
