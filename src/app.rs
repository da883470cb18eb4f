use crate::drag::{Button, PointerEvent};
use crate::error::{Result, SlideError};
use crate::game::{Game, GameConfig};
use crate::layout::Point;
use crate::shuffle::ShuffleMode;
use crate::terminal::{self, Input, Renderer, ScreenLayout, TerminalSession};
use crossterm::event;
use std::time::{Duration, Instant};
use tracing::info;

const FRAME: Duration = Duration::from_millis(16);

/// Play in the terminal until the user quits.
pub fn run(config: &GameConfig) -> Result<()> {
    let mut game = Game::new(config)?;
    let layout = ScreenLayout::new(game.board().geometry());

    let needed = layout.required_size();
    let actual = crossterm::terminal::size()?;
    if actual.0 < needed.0 || actual.1 < needed.1 {
        return Err(SlideError::TerminalTooSmall { needed, actual });
    }

    let mut session = TerminalSession::enter()?;
    let mut renderer = Renderer::new(layout);
    info!("terminal ready");

    loop {
        if event::poll(FRAME)? {
            loop {
                let now = Instant::now();
                match terminal::translate(event::read()?) {
                    Some(Input::Quit) => {
                        info!("quit");
                        return Ok(());
                    }
                    Some(Input::Shuffle) => {
                        game.request_shuffle(now);
                    }
                    Some(Input::Redraw) => renderer.invalidate(),
                    Some(Input::Pointer(pointer)) => dispatch_pointer(&mut game, &layout, pointer, now),
                    None => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        game.tick(Instant::now());
        renderer.draw(session.out(), &game)?;
    }
}

fn dispatch_pointer(game: &mut Game, layout: &ScreenLayout, pointer: PointerEvent, now: Instant) {
    if let PointerEvent::Down {
        button: Button::Primary,
        x,
        y,
    } = pointer
    {
        if layout.shuffle_button.contains(Point::new(x, y)) {
            game.request_shuffle(now);
            return;
        }
    }
    game.handle_pointer(pointer, now);
}

/// Text dump of the solved board and one instant shuffle of it.
pub fn describe(config: &GameConfig) -> Result<String> {
    let config = GameConfig {
        mode: ShuffleMode::Instant,
        ..config.clone()
    };
    let mut game = Game::new(&config)?;
    let solved = game.board().to_string();
    game.request_shuffle(Instant::now());
    Ok(format!(
        "Solved board:\n{}\nShuffled board ({} shifts):\n{}\nsolved: {}\n",
        solved,
        config.shuffles,
        game.board(),
        game.board().is_solved()
    ))
}
