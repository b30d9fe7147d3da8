use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Wait up to `timeout` for terminal input. Key releases and repeats are
/// dropped; an expired timeout becomes a tick.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(Some(AppEvent::KeyPress(key.code)));
        }
    }
    Ok(Some(AppEvent::Tick))
}

/// Draw/poll/update loop. Returns when the app flips `running` off.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        if let Some(event) = poll(TICK_RATE)? {
            app.update(event);
        }
    }
    Ok(())
}
