//! Input handling for the churn form.
//!
//! Terminal events are read on a blocking thread and forwarded over a bounded
//! channel; [`handle_events`] drains a frame's worth of them and maps keys to
//! form actions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

use churn_engine::{App, Focus};
use churn_types::{StepSize, Widget};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a backpressured send in the input thread unblocks.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Bounded queue: apply backpressure instead of dropping events.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input for this frame. Returns `true` when the app should exit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event to the app. Returns `app.should_quit()`.
pub fn apply_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            // Handle press + repeat events (ignore releases)
            if !matches!(key.kind, KeyEventKind::Release) {
                apply_key(app, key);
            }
        }
        Event::Paste(text) => {
            // Pasting a number into a numeric field types it in; anything else is dropped.
            let mut typed = 0usize;
            for ch in text.trim().chars() {
                if app.type_char(ch) {
                    typed += 1;
                }
            }
            debug!(typed, "Pasted into field");
        }
        _ => {}
    }
    app.should_quit()
}

fn apply_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        match key.code {
            KeyCode::Char('c') => app.request_quit(),
            KeyCode::Char('p') => {
                app.submit();
            }
            _ => {}
        }
        return;
    }

    let step = if shift { StepSize::Coarse } else { StepSize::Fine };

    match key.code {
        KeyCode::Esc => {
            if !app.cancel_edit() {
                app.request_quit();
            }
        }
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Up | KeyCode::BackTab => app.focus_prev(),
        KeyCode::Down | KeyCode::Tab => app.focus_next(),
        KeyCode::Left => app.adjust(false, step),
        KeyCode::Right => app.adjust(true, step),
        KeyCode::PageUp => app.adjust(true, StepSize::Coarse),
        KeyCode::PageDown => app.adjust(false, StepSize::Coarse),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => match app.focus() {
            Focus::Predict => {
                app.submit();
            }
            Focus::Field(_) => app.commit_edit(),
        },
        KeyCode::Char(' ') => match app.focus() {
            Focus::Predict => {
                app.submit();
            }
            Focus::Field(field) if field.spec().widget == Widget::Select => {
                app.adjust(true, StepSize::Fine);
            }
            Focus::Field(_) => {}
        },
        KeyCode::Char('p') => {
            app.submit();
        }
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char(ch) => {
            app.type_char(ch);
        }
        _ => {}
    }
}
