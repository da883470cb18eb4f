//! Crossterm front end: terminal setup, drawing and input translation.

use crate::drag::{Button, PointerEvent};
use crate::error::Result;
use crate::game::Game;
use crate::layout::{BoardGeometry, Point, Rect, Rgb};
use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

const SHUFFLE_LABEL: &str = "[ shuffle ]";
const HINTS: &str = "drag tiles to rotate rows and columns | s shuffle | q quit";
const HUD_GAP: i32 = 4;
const HUD_WIDTH: i32 = 16;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut session = Self { out: io::stdout() };
        execute!(session.out, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        Ok(session)
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Pointer(PointerEvent),
    Shuffle,
    Quit,
    Redraw,
}

pub fn translate(event: Event) -> Option<Input> {
    match event {
        Event::Mouse(mouse) => translate_mouse(mouse).map(Input::Pointer),
        Event::Key(KeyEvent {
            code, modifiers, ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('s') => Some(Input::Shuffle),
            _ => None,
        },
        Event::Resize(..) => Some(Input::Redraw),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<PointerEvent> {
    let x = i32::from(mouse.column);
    let y = i32::from(mouse.row);
    match mouse.kind {
        MouseEventKind::Down(button) => Some(PointerEvent::Down {
            button: button_of(button),
            x,
            y,
        }),
        MouseEventKind::Up(button) => Some(PointerEvent::Up {
            button: button_of(button),
            x,
            y,
        }),
        MouseEventKind::Drag(button) => Some(PointerEvent::Move {
            button: Some(button_of(button)),
            x,
            y,
        }),
        MouseEventKind::Moved => Some(PointerEvent::Move { button: None, x, y }),
        _ => None,
    }
}

fn button_of(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Primary,
        MouseButton::Right => Button::Secondary,
        MouseButton::Middle => Button::Middle,
    }
}

/// Where everything besides the tiles goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub time_label: Point,
    pub moves_label: Point,
    pub shuffle_button: Rect,
    pub hints: Point,
}

impl ScreenLayout {
    pub fn new(geometry: &BoardGeometry) -> Self {
        let board = geometry.extent();
        let hud_x = board.right() + HUD_GAP;
        Self {
            time_label: Point::new(hud_x, board.y + 1),
            moves_label: Point::new(hud_x, board.y + 3),
            shuffle_button: Rect {
                x: board.x,
                y: board.bottom() + 1,
                width: SHUFFLE_LABEL.len() as i32,
                height: 1,
            },
            hints: Point::new(board.x, board.bottom() + 3),
        }
    }

    /// Smallest terminal (columns, rows) that shows everything.
    pub fn required_size(&self) -> (u16, u16) {
        let width = (self.time_label.x + HUD_WIDTH).max(self.hints.x + HINTS.len() as i32);
        let height = self.hints.y + 1;
        (clamp_u16(width), clamp_u16(height))
    }
}

pub struct Renderer {
    layout: ScreenLayout,
    needs_clear: bool,
}

impl Renderer {
    pub fn new(layout: ScreenLayout) -> Self {
        Self {
            layout,
            needs_clear: true,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_clear = true;
    }

    pub fn draw<W: Write>(&mut self, out: &mut W, game: &Game) -> io::Result<()> {
        if self.needs_clear {
            queue!(out, ResetColor, Clear(ClearType::All))?;
            self.needs_clear = false;
        }

        for tile in game.board().tiles() {
            let rect = tile.rect();
            let bg = color_of(tile.color());
            queue!(out, SetBackgroundColor(bg))?;
            let blank = " ".repeat(rect.width.max(0) as usize);
            for y in rect.y..rect.bottom() {
                queue!(out, move_to(Point::new(rect.x, y)), Print(&blank))?;
            }
            let label = tile.label();
            let label_at = Point::new(
                rect.x + (rect.width - label.len() as i32).max(0) / 2,
                rect.y + rect.height / 2,
            );
            queue!(
                out,
                SetForegroundColor(label_color(tile.color())),
                move_to(label_at),
                Print(label)
            )?;
        }
        queue!(out, ResetColor)?;

        let time = format!("time  {}", game.stopwatch());
        let moves = format!("moves {}", game.moves());
        let time_color = if game.is_won() { Color::Green } else { Color::Reset };
        queue!(
            out,
            move_to(self.layout.time_label),
            SetForegroundColor(time_color),
            Print(format!("{:<width$}", time, width = HUD_WIDTH as usize)),
            ResetColor,
            move_to(self.layout.moves_label),
            Print(format!("{:<width$}", moves, width = HUD_WIDTH as usize))
        )?;

        let button = self.layout.shuffle_button;
        let button_color = if game.shuffler().is_running() {
            Color::DarkGrey
        } else {
            Color::White
        };
        queue!(
            out,
            move_to(Point::new(button.x, button.y)),
            SetForegroundColor(button_color),
            Print(SHUFFLE_LABEL),
            ResetColor,
            move_to(self.layout.hints),
            SetForegroundColor(Color::DarkGrey),
            Print(HINTS),
            ResetColor
        )?;

        out.flush()
    }
}

fn move_to(point: Point) -> MoveTo {
    MoveTo(clamp_u16(point.x), clamp_u16(point.y))
}

fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

fn color_of(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn label_color(bg: Rgb) -> Color {
    let luma = 0.299 * f32::from(bg.r) + 0.587 * f32::from(bg.g) + 0.114 * f32::from(bg.b);
    if luma > 140.0 {
        Color::Black
    } else {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn mouse_events_become_pointer_events() {
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 4, 7)),
            Some(Input::Pointer(PointerEvent::Down {
                button: Button::Primary,
                x: 4,
                y: 7
            }))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 7)),
            Some(Input::Pointer(PointerEvent::Move {
                button: Some(Button::Primary),
                x: 5,
                y: 7
            }))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Moved, 6, 7)),
            Some(Input::Pointer(PointerEvent::Move {
                button: None,
                x: 6,
                y: 7
            }))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Up(MouseButton::Right), 5, 7)),
            Some(Input::Pointer(PointerEvent::Up {
                button: Button::Secondary,
                x: 5,
                y: 7
            }))
        );
        assert_eq!(translate(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(translate(key(KeyCode::Char('s'), KeyModifiers::NONE)), Some(Input::Shuffle));
        assert_eq!(translate(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Input::Quit));
        assert_eq!(translate(key(KeyCode::Esc, KeyModifiers::NONE)), Some(Input::Quit));
        assert_eq!(translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Input::Quit));
        assert_eq!(translate(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        assert_eq!(translate(Event::Resize(80, 24)), Some(Input::Redraw));
    }

    #[test]
    fn layout_places_hud_beside_and_button_below() {
        let geometry = BoardGeometry::new(5, Point::new(2, 1), 30, 15);
        let layout = ScreenLayout::new(&geometry);
        assert_eq!(layout.time_label, Point::new(36, 2));
        assert_eq!(layout.shuffle_button.y, 17);
        assert!(layout.shuffle_button.contains(Point::new(2, 17)));
        assert!(!geometry.contains(Point::new(2, 17)));
        let (cols, rows) = layout.required_size();
        assert_eq!(rows, 20);
        assert!(cols >= 52);
    }

    #[test]
    fn labels_stay_readable() {
        assert_eq!(label_color(Rgb { r: 255, g: 255, b: 255 }), Color::Black);
        assert_eq!(label_color(Rgb { r: 20, g: 20, b: 60 }), Color::White);
    }
}
