//! Window, event loop and frame pacing.

use glium::glutin::dpi::LogicalSize;
use glium::glutin::event::{Event, StartCause, WindowEvent};
use glium::glutin::event_loop::{ControlFlow, EventLoop};
use glium::glutin::window::WindowBuilder;
use glium::glutin::ContextBuilder;
use glium::{Display, Surface};
use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::audio;
use crate::board::Board;
use crate::game::Game;
use crate::render::{self, CellRenderer};
use crate::{AppError, RenderError};

/// Opens the game window and runs until it is closed or the game ends.
///
/// `make_renderer` is called once the GL context exists. Errors during
/// startup are returned; errors while running are logged and stop the loop.
pub fn run<R, F>(make_renderer: F) -> Result<(), AppError>
where
    R: CellRenderer + 'static,
    F: FnOnce(&Display) -> Result<R, RenderError>,
{
    let ev_loop = EventLoop::new();
    let wb = WindowBuilder::new()
        .with_title(crate::TITLE.to_owned())
        .with_inner_size(LogicalSize::new(crate::WINDOW_WIDTH, crate::WINDOW_HEIGHT))
        .with_resizable(false);
    let cb = ContextBuilder::new().with_vsync(true);
    let display = Display::new(wb, cb, &ev_loop)?;

    log::info!("Renderer: {}", display.get_opengl_renderer_string());
    log::info!("OpenGL version: {}", display.get_opengl_version_string());

    let mut renderer = make_renderer(&display)?;

    // Initialize runtime data.
    let board = Board::new(crate::GRID_WIDTH, crate::GRID_HEIGHT, crate::MINES);
    log::info!(
        "New game: {}x{} cells, {} mines",
        board.width(),
        board.height(),
        board.mine_count(),
    );
    let sounds = audio::open_or_silent(Path::new(crate::SFX_DIR));
    let mut game = Game::with_sounds(board, sounds);
    let mut events_buffer = VecDeque::new();
    let projection = render::projection_matrix();

    // Main loop.
    let mut next_frame_time = Instant::now();
    ev_loop.run(move |event, _ev_loop, control_flow| {
        // Handle events.
        let mut now = Instant::now();
        let mut do_frame = false;
        match event.to_static() {
            Some(Event::NewEvents(cause)) => match cause {
                StartCause::ResumeTimeReached {
                    start: _,
                    requested_resume,
                } => {
                    now = requested_resume;
                    do_frame = true;
                }
                StartCause::Init => {
                    next_frame_time = now;
                    do_frame = true;
                }
                _ => (),
            },

            // The program is about to exit.
            Some(Event::LoopDestroyed) => log::info!("Exiting"),

            // Queue the event to be handled next time we render
            // everything.
            Some(ev) => events_buffer.push_back(ev),

            // Ignore this event.
            None => (),
        }

        if do_frame && next_frame_time <= now {
            let frame_duration = Duration::from_secs_f64(1.0 / 60.0);

            next_frame_time = now + frame_duration;
            if next_frame_time < Instant::now() {
                // Skip a frame (or several).
                next_frame_time = Instant::now() + frame_duration;
            }
            *control_flow = ControlFlow::WaitUntil(next_frame_time);

            game.set_scale_factor(display.gl_window().window().scale_factor());
            for ev in events_buffer.drain(..) {
                if let Event::WindowEvent { event, .. } = ev {
                    match event {
                        // Handle window close event.
                        WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                        event => game.handle_event(&event, now),
                    }
                }
            }

            // Draw everything.
            if let Err(e) = draw_frame(&display, &mut renderer, game.board(), projection) {
                log::error!("{}", e);
                *control_flow = ControlFlow::Exit;
            }

            if game.should_close(now) {
                *control_flow = ControlFlow::Exit;
            }
        }
    })
}

fn draw_frame<R: CellRenderer>(
    display: &Display,
    renderer: &mut R,
    board: &Board,
    projection: [[f32; 4]; 4],
) -> Result<(), AppError> {
    let mut target = display.draw();
    let (r, g, b, a) = crate::CLEAR_COLOR;
    target.clear_color_srgb(r, g, b, a);

    render::draw_board(renderer, board);
    let drawn = renderer.flush(display, &mut target, projection);
    // The frame must be finished even if drawing failed.
    let swapped = target.finish();
    drawn?;
    swapped?;
    Ok(())
}
