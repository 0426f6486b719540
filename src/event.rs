use crossterm::event::{
  self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug)]
pub enum Event {
  /// Terminal key press
  Key(KeyEvent),
  /// Mouse button or scroll event (motion is dropped)
  Mouse(MouseEvent),
  /// Terminal was resized; the next draw picks up the new size
  Resize,
  /// Periodic tick for UI refresh and query polling
  Tick,
}

/// Event handler that produces events from terminal input and a tick timer
pub struct EventHandler {
  rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
  /// Create a new event handler with the given tick rate
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();

    // crossterm's poll/read block, so keep them off the async workers
    tokio::task::spawn_blocking(move || {
      let mut last_tick = Instant::now();
      loop {
        // Ticks keep their cadence however busy the input is
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).unwrap_or(false) {
          let event = match event::read() {
            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            Ok(CrosstermEvent::Mouse(mouse)) if !is_motion(&mouse) => Some(Event::Mouse(mouse)),
            Ok(CrosstermEvent::Resize(_, _)) => Some(Event::Resize),
            _ => None,
          };
          if let Some(event) = event {
            if tx.send(event).is_err() {
              break;
            }
          }
        }

        if last_tick.elapsed() >= tick_rate {
          if tx.send(Event::Tick).is_err() {
            break;
          }
          last_tick = Instant::now();
        }
      }
    });

    Self { rx }
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}

fn is_motion(mouse: &MouseEvent) -> bool {
  matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_))
}
