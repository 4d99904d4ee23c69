//! Plasma Pong entry point
//!
//! Native bootstrap around the simulation core: window creation, keyboard
//! state, frame pacing, and the menu / match / winner screen flow. The
//! simulation itself never touches the platform; everything here is glue.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use plasma_pong::Color;
use plasma_pong::consts::*;
use plasma_pong::renderer::{Frame, SceneRenderer, text};
use plasma_pong::sim::{MatchState, Side, TickInput, tick};
use plasma_pong::ui::{Menu, MenuAction, MenuKey, OPTIONS};

/// How long the winner banner stays up, in frames
const WINNER_FRAMES: u32 = 2 * FPS;

/// Sleep-based frame limiter; the only suspension point in the loop
struct FrameLimiter {
    target: Duration,
    next: Instant,
}

impl FrameLimiter {
    fn new(fps: u32) -> Self {
        let target = Duration::from_secs(1) / fps;
        Self {
            target,
            next: Instant::now() + target,
        }
    }

    /// Block until the next frame deadline. Missed deadlines are dropped
    /// rather than repaid in a burst.
    fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        self.next = self.next.max(now) + self.target;
    }
}

/// Held directional keys, polled once per frame
#[derive(Default)]
struct HeldKeys {
    w: bool,
    s: bool,
    up: bool,
    down: bool,
}

impl HeldKeys {
    fn tick_input(&self) -> TickInput {
        TickInput {
            player_up: self.w,
            player_down: self.s,
            opponent_up: self.up,
            opponent_down: self.down,
        }
    }
}

/// Which screen owns the frame
enum Screen {
    Menu(Menu),
    Playing(MatchState),
    Winner { winner: Side, frames_left: u32 },
}

struct App {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    frame: Frame,
    scene: SceneRenderer,
    screen: Screen,
    held: HeldKeys,
    limiter: FrameLimiter,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            pixels: None,
            frame: Frame::new(WIDTH, HEIGHT),
            scene: SceneRenderer::new(WIDTH, HEIGHT),
            screen: Screen::Menu(Menu::new()),
            held: HeldKeys::default(),
            limiter: FrameLimiter::new(FPS),
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;
        match code {
            KeyCode::KeyW => self.held.w = pressed,
            KeyCode::KeyS => self.held.s = pressed,
            KeyCode::ArrowUp => self.held.up = pressed,
            KeyCode::ArrowDown => self.held.down = pressed,
            _ => {}
        }

        if pressed && !event.repeat {
            if let Some(key) = menu_key(code) {
                let action = if let Screen::Menu(menu) = &mut self.screen {
                    menu.handle_key(key)
                } else {
                    MenuAction::None
                };
                if let MenuAction::Start { mode, target_score } = action {
                    let seed: u64 = rand::random();
                    log::info!("starting match: mode={mode:?} target={target_score} seed={seed}");
                    self.screen = Screen::Playing(MatchState::new(mode, target_score, seed));
                }
            }
        }
    }

    /// Advance and draw the current screen, then present it
    fn redraw(&mut self) {
        let next = match &mut self.screen {
            Screen::Menu(menu) => {
                draw_menu(&mut self.frame, menu);
                None
            }
            Screen::Playing(state) => {
                tick(state, &self.held.tick_input());
                self.scene.render(&mut self.frame, state);
                // The finishing frame still gets drawn; the banner starts next
                state.winner.map(|winner| Screen::Winner {
                    winner,
                    frames_left: WINNER_FRAMES,
                })
            }
            Screen::Winner { winner, frames_left } => {
                draw_winner(&mut self.frame, *winner);
                *frames_left -= 1;
                (*frames_left == 0).then(|| Screen::Menu(Menu::new()))
            }
        };
        if let Some(next) = next {
            self.screen = next;
        }

        if let Some(pixels) = &mut self.pixels {
            pixels.frame_mut().copy_from_slice(self.frame.as_bytes());
            if let Err(err) = pixels.render() {
                log::error!("surface render failed: {err}");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("Plasma Pong - Quantum Edition")
            .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(WIDTH, HEIGHT, surface).expect("failed to create pixel surface");
        log::info!("window up: {}x{}", size.width, size.height);

        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                // Quit short-circuits before any further draw work
                log::info!("quit requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            self.limiter.wait();
            window.request_redraw();
        }
    }
}

fn menu_key(code: KeyCode) -> Option<MenuKey> {
    let key = match code {
        KeyCode::ArrowUp => MenuKey::Up,
        KeyCode::ArrowDown => MenuKey::Down,
        KeyCode::Enter | KeyCode::NumpadEnter => MenuKey::Enter,
        KeyCode::Escape => MenuKey::Escape,
        KeyCode::Backspace => MenuKey::Backspace,
        KeyCode::Digit0 | KeyCode::Numpad0 => MenuKey::Digit(0),
        KeyCode::Digit1 | KeyCode::Numpad1 => MenuKey::Digit(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => MenuKey::Digit(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => MenuKey::Digit(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => MenuKey::Digit(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => MenuKey::Digit(5),
        KeyCode::Digit6 | KeyCode::Numpad6 => MenuKey::Digit(6),
        KeyCode::Digit7 | KeyCode::Numpad7 => MenuKey::Digit(7),
        KeyCode::Digit8 | KeyCode::Numpad8 => MenuKey::Digit(8),
        KeyCode::Digit9 | KeyCode::Numpad9 => MenuKey::Digit(9),
        _ => return None,
    };
    Some(key)
}

fn draw_menu(frame: &mut Frame, menu: &Menu) {
    let cx = WIDTH as i32 / 2;

    if let Some(buffer) = &menu.score_entry {
        frame.clear(Color::new(50, 50, 80));
        text::draw_text_centered(frame, "ENTER TARGET SCORE:", cx, 200, 5, Color::WHITE);
        text::draw_text_centered(frame, buffer, cx, 400, 7, Color::new(255, 255, 0));
        return;
    }

    frame.clear(Color::new(30, 30, 60));
    text::draw_text_centered(
        frame,
        "PLASMA PONG - QUANTUM EDITION",
        cx,
        100,
        5,
        Color::new(255, 200, 50),
    );
    for (i, option) in OPTIONS.iter().enumerate() {
        let color = if i == menu.selected {
            Color::new(255, 0, 0)
        } else {
            Color::WHITE
        };
        text::draw_text_centered(frame, option, cx, 300 + i as i32 * 70, 4, color);
    }
    let mode = format!("MODE: {}", menu.mode_label());
    text::draw_text_centered(frame, &mode, cx, 620, 3, Color::new(200, 200, 200));
    let target = format!("TARGET SCORE: {}", menu.target_score);
    text::draw_text_centered(frame, &target, cx, 670, 3, Color::new(200, 200, 200));
}

fn draw_winner(frame: &mut Frame, winner: Side) {
    frame.clear(Color::new(20, 20, 50));
    let banner = format!("PLAYER {} WINS!", winner.index() + 1);
    text::draw_text_centered(
        frame,
        &banner,
        WIDTH as i32 / 2,
        HEIGHT as i32 / 2 - 28,
        8,
        Color::new(255, 255, 100),
    );
}

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::init();
    log::info!("Plasma Pong starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new();
    event_loop.run_app(&mut app)
}
