use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use keysprite::{AssetLoader, LoaderConfig, SdlBackend};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::rect::Rect;

/// Per-frame delta time plus a frame rate averaged over a fixed window.
struct FrameClock {
    last_frame: Instant,
    window_start: Instant,
    window_frames: u32,
    fps: f32,
}

impl FrameClock {
    const FPS_WINDOW: Duration = Duration::from_secs(3);

    fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            window_start: now,
            window_frames: 0,
            fps: 0.0,
        }
    }

    /// Marks a frame at `now` and returns the seconds since the previous one.
    fn tick(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.window_frames += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window >= Self::FPS_WINDOW {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            self.window_start = now;
            self.window_frames = 0;
        }

        delta
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}

fn run(config: LoaderConfig) -> Result<(), String> {
    let sdl = sdl2::init()?;
    let video = sdl.video()?;
    let mut event_pump = sdl.event_pump()?;

    let viewer = &config.viewer;
    let window = video
        .window(&viewer.title, viewer.width, viewer.height)
        .resizable()
        .build()
        .map_err(|err| err.to_string())?;

    let loader = AssetLoader::new(config.asset_root(), SdlBackend::new(&window));
    println!("loading assets from {}", loader.root().path().display());

    let sprite = loader.load(&viewer.sprite).map_err(|err| err.to_string())?;
    let background = match &viewer.background {
        Some(name) => Some(loader.load_image(name, false).map_err(|err| err.to_string())?),
        None => None,
    };

    let mut clock = FrameClock::new(Instant::now());
    let mut frame = 0u64;
    let (mut x, mut y) = (0.0f32, 0.0f32);

    'main_loop: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Window { window_id, win_event: WindowEvent::Close, .. } if window_id == window.id() => break 'main_loop,
                Event::Quit { .. } => break 'main_loop,
                _ => {}
            }
        }

        let delta = clock.tick(Instant::now());

        {
            let state = event_pump.keyboard_state();
            let dx = state.is_scancode_pressed(Scancode::Right) as i32 - state.is_scancode_pressed(Scancode::Left) as i32;
            let dy = state.is_scancode_pressed(Scancode::Down) as i32 - state.is_scancode_pressed(Scancode::Up) as i32;

            x += dx as f32 * delta * 200.0;
            y += dy as f32 * delta * 200.0;
        }

        let mut screen = window.surface(&event_pump)?;
        let (width, height) = screen.size();

        match &background {
            Some(background) => {
                background.blit(None, &mut screen, Rect::new(0, 0, width, height))?;
            }
            None => screen.fill_rect(None, sdl2::pixels::Color::RGB(32, 32, 48))?,
        }
        sprite.blit(None, &mut screen, Rect::new(x as i32, y as i32, sprite.width(), sprite.height()))?;
        screen.update_window()?;

        if frame % 1000 == 0 {
            println!("{:.1} fps", clock.fps());
        }
        frame += 1;
    }

    Ok(())
}

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match LoaderConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => LoaderConfig::default(),
    };

    if let Err(err) = run(config) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
