//! Pogo Stickman entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use glam::Vec2;
    use pogo_stickman::consts::{MAX_DPR, VIEW_HEIGHT, VIEW_WIDTH};
    use pogo_stickman::render::{DrawCommand, compose};
    use pogo_stickman::{GameSession, TickInput, Tuning};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        input: TickInput,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        dpr: f64,
    }

    impl Game {
        /// One animation frame: a single fixed simulation step, then a
        /// full redraw.
        fn frame(&mut self) {
            let input = self.input;
            self.session.advance(&input);
            // Restart is an edge, not a held key.
            self.input.restart = false;
            self.draw();
        }

        /// Matches the backing store to the displayed size, capped at
        /// [`MAX_DPR`].
        fn fit_canvas(&mut self) {
            let window = web_sys::window().unwrap();
            self.dpr = window.device_pixel_ratio().min(MAX_DPR);
            let (w, h) = client_size(&self.canvas);
            self.canvas.set_width((w * self.dpr) as u32);
            self.canvas.set_height((h * self.dpr) as u32);
            self.session.set_view(Vec2::new(w as f32, h as f32));
        }

        fn draw(&self) {
            let ctx = &self.ctx;
            ctx.save();
            let _ = ctx.scale(self.dpr, self.dpr);

            for command in compose(&self.session) {
                match command {
                    DrawCommand::Clear { width, height } => {
                        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
                    }
                    DrawCommand::Fill {
                        points,
                        color,
                        alpha,
                    } => {
                        ctx.set_global_alpha(alpha as f64);
                        ctx.set_fill_style_str(color);
                        trace_path(ctx, &points);
                        ctx.fill();
                        ctx.set_global_alpha(1.0);
                    }
                    DrawCommand::Body {
                        points,
                        color,
                        alpha,
                    } => {
                        ctx.set_global_alpha(alpha as f64);
                        ctx.set_fill_style_str(color);
                        trace_path(ctx, &points);
                        ctx.fill();
                        ctx.set_line_width(1.2);
                        ctx.set_stroke_style_str("rgba(255,255,255,0.12)");
                        ctx.stroke();
                        ctx.set_global_alpha(1.0);
                    }
                    DrawCommand::Text {
                        pos,
                        angle,
                        text,
                        color,
                        font,
                    } => {
                        ctx.save();
                        let _ = ctx.translate(pos.x as f64, pos.y as f64);
                        let _ = ctx.rotate(angle as f64);
                        ctx.set_fill_style_str(color);
                        ctx.set_font(font);
                        ctx.set_text_align("center");
                        let _ = ctx.fill_text(text, 0.0, 0.0);
                        ctx.restore();
                    }
                }
            }

            ctx.restore();
        }
    }

    fn trace_path(ctx: &CanvasRenderingContext2d, points: &[Vec2]) {
        let Some(first) = points.first() else {
            return;
        };
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in &points[1..] {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.close_path();
    }

    /// Reads an optional tuning override from the canvas `data-tuning`
    /// attribute. Malformed JSON keeps the defaults.
    fn load_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        let Some(json) = canvas.get_attribute("data-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override from the page");
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring malformed tuning override: {err}");
                Tuning::default()
            }
        }
    }

    /// Displayed canvas size, falling back to the logical viewport when
    /// layout hasn't sized it yet.
    fn client_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let w = canvas.client_width();
        let h = canvas.client_height();
        if w > 0 && h > 0 {
            (w as f64, h as f64)
        } else {
            (VIEW_WIDTH as f64, VIEW_HEIGHT as f64)
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pogo Stickman starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context error")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        // The level is laid out against the displayed height, so measure
        // before building the session.
        let (client_w, client_h) = client_size(&canvas);
        let session = GameSession::new(
            load_tuning(&canvas),
            Vec2::new(client_w as f32, client_h as f32),
        );
        let game = Rc::new(RefCell::new(Game {
            session,
            input: TickInput::default(),
            canvas: canvas.clone(),
            ctx,
            dpr: 1.0,
        }));
        game.borrow_mut().fit_canvas();

        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Pogo Stickman running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => {
                        g.input.left = true;
                        event.prevent_default();
                    }
                    "ArrowRight" => {
                        g.input.right = true;
                        event.prevent_default();
                    }
                    "ArrowUp" => {
                        g.input.jump = true;
                        event.prevent_default();
                    }
                    "r" | "R" => {
                        g.input.restart = true;
                        event.prevent_default();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicking the end-of-run card restarts too.
        {
            let game = game.clone();
            let canvas = game.borrow().canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.session.phase().is_terminal() {
                    g.input.restart = true;
                }
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "ArrowUp" => g.input.jump = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use pogo_stickman::consts::{VIEW_HEIGHT, VIEW_WIDTH};
    use pogo_stickman::{GamePhase, GameSession, TickInput, Tuning};

    env_logger::init();
    log::info!("Pogo Stickman (native) starting...");
    log::info!("Headless demo: holding right and hopping toward the finish");

    let mut session = GameSession::new(Tuning::default(), Vec2::new(VIEW_WIDTH, VIEW_HEIGHT));
    let held = TickInput {
        right: true,
        jump: true,
        ..TickInput::default()
    };

    // Two simulated minutes, tops.
    for step in 0..7200 {
        session.advance(&held);
        if step % 300 == 0 {
            log::info!(
                "t={:.0}s torso at x={:.0} ({})",
                session.sim_time(),
                session.torso_position().x,
                if session.can_jump() {
                    "grounded"
                } else {
                    "airborne"
                },
            );
        }
        if session.phase() != GamePhase::Playing {
            break;
        }
    }

    match session.phase() {
        GamePhase::Won => log::info!("Demo reached the finish after {:.1}s", session.sim_time()),
        GamePhase::Dead => log::info!("Demo died after {:.1}s", session.sim_time()),
        GamePhase::Playing => log::info!(
            "Demo timed out mid-level at x={:.0}",
            session.torso_position().x
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
