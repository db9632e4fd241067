//! SDL2 window for the interactive viewer.
//!
//! Only compiled with the `viewer` feature. The renderer itself never
//! touches SDL: the window receives finished [`RgbaImage`] frames and
//! reports which orbit keys are held.

use image::RgbaImage;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
}

/// Orbit keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// W
    pub pitch_up: bool,
    /// S
    pub pitch_down: bool,
    /// A
    pub yaw_left: bool,
    /// D
    pub yaw_right: bool,
}

impl InputState {
    fn set(&mut self, keycode: Keycode, pressed: bool) {
        match keycode {
            Keycode::W => self.pitch_up = pressed,
            Keycode::S => self.pitch_down = pressed,
            Keycode::A => self.yaw_left = pressed,
            Keycode::D => self.yaw_right = pressed,
            _ => {}
        }
    }
}

pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_target_ms: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, frame_target_ms: u64) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_target_ms,
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < self.frame_target_ms {
            let time_to_wait = self.frame_target_ms - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before `texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    input: InputState,
    argb: Vec<u8>,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped before its creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            input: InputState::default(),
            argb: vec![0; (width * height * 4) as usize],
            width,
            height,
        })
    }

    /// Drains pending events, updating the held keys.
    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => self.input.set(keycode, true),
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => self.input.set(keycode, false),
                _ => {}
            }
        }
        WindowEvent::None
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    /// Shows a frame, stretched to the window. Transparent pixels show
    /// as black.
    pub fn present(&mut self, frame: &RgbaImage) -> Result<(), String> {
        let (width, height) = frame.dimensions();
        if (width, height) != (self.width, self.height) {
            return Err(format!(
                "frame is {width}x{height}, window expects {}x{}",
                self.width, self.height
            ));
        }

        // ARGB8888 is a packed native-endian u32 per pixel.
        for (dst, pixel) in self.argb.chunks_exact_mut(4).zip(frame.pixels()) {
            let [r, g, b, a] = pixel.0;
            let argb = ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
            dst.copy_from_slice(&argb.to_ne_bytes());
        }

        self.texture
            .update(None, &self.argb, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.set_draw_color(sdl2::pixels::Color::RGB(0, 0, 0));
        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
