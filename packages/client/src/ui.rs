//! Terminal input helpers for the client.

use std::{io::Write, sync::Mutex};

use rustyline::{
    Context, Helper, completion::Completer, highlight::Highlighter, hint::Hinter,
    validate::Validator,
};
use tokio::sync::mpsc;

/// Events produced by the input thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A complete line was entered
    Line(String),
    /// The line being edited changed
    Typing,
}

/// Redisplay the prompt after printing a message
pub fn redisplay_prompt(name: &str) {
    print!("{}> ", name);
    std::io::stdout().flush().ok();
}

/// rustyline helper that reports every edit of a non-empty line.
///
/// rustyline asks the hinter for a hint after each keystroke, cursor moves
/// included, so only calls where the text differs from the last one count
/// as edits.
pub struct TypingHelper {
    events: mpsc::UnboundedSender<InputEvent>,
    last_line: Mutex<String>,
}

impl TypingHelper {
    pub fn new(events: mpsc::UnboundedSender<InputEvent>) -> Self {
        Self {
            events,
            last_line: Mutex::new(String::new()),
        }
    }

    fn observe(&self, line: &str) {
        let mut last_line = match self.last_line.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *last_line == line {
            return;
        }
        line.clone_into(&mut *last_line);

        if !line.trim().is_empty() {
            // the session may already be gone; nothing to report then
            let _ = self.events.send(InputEvent::Typing);
        }
    }
}

impl Hinter for TypingHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.observe(line);
        None
    }
}

impl Completer for TypingHelper {
    type Candidate = String;
}

impl Highlighter for TypingHelper {}

impl Validator for TypingHelper {}

impl Helper for TypingHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing_events(rx: &mut mpsc::UnboundedReceiver<InputEvent>) -> usize {
        let mut count = 0;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event, InputEvent::Typing);
            count += 1;
        }
        count
    }

    #[test]
    fn test_each_edit_reports_typing() {
        // given:
        let (tx, mut rx) = mpsc::unbounded_channel();
        let helper = TypingHelper::new(tx);

        // when:
        helper.observe("h");
        helper.observe("hi");

        // then:
        assert_eq!(typing_events(&mut rx), 2);
    }

    #[test]
    fn test_cursor_move_is_not_an_edit() {
        // given:
        let (tx, mut rx) = mpsc::unbounded_channel();
        let helper = TypingHelper::new(tx);
        helper.observe("hi");
        typing_events(&mut rx);

        // when: the hinter is asked again with the same text
        helper.observe("hi");
        helper.observe("hi");

        // then:
        assert_eq!(typing_events(&mut rx), 0);
    }

    #[test]
    fn test_clearing_the_line_is_silent() {
        // given:
        let (tx, mut rx) = mpsc::unbounded_channel();
        let helper = TypingHelper::new(tx);
        helper.observe("hi");
        typing_events(&mut rx);

        // when:
        helper.observe("");
        helper.observe("  ");

        // then:
        assert_eq!(typing_events(&mut rx), 0);
    }
}
