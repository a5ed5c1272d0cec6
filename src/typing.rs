//! Terminal typewriter for the hero section.
//!
//! A script of shell lines is typed one character per timer firing. When a
//! line is complete a fixed pause elapses, a newline is appended and the
//! next line starts. Nothing happens after the last line. The cursor blinks
//! on its own independent interval.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timer::Timer;

/// Pause between finishing a line and starting the next one.
pub const DEFAULT_LINE_PAUSE: Duration = Duration::from_millis(400);
/// Cursor visibility toggle interval.
pub const DEFAULT_CURSOR_INTERVAL: Duration = Duration::from_millis(530);

/// One scripted terminal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// Prompt shown before the text, e.g. `~$` or `>`.
    pub prefix: String,
    pub text: String,
    /// Delay before each character, in milliseconds.
    pub delay_ms: u64,
    /// Output lines are styled differently from commands.
    #[serde(default)]
    pub is_output: bool,
}

impl ScriptLine {
    pub fn command(text: &str, delay_ms: u64) -> Self {
        Self {
            prefix: "~$".into(),
            text: text.into(),
            delay_ms,
            is_output: false,
        }
    }

    pub fn output(text: &str, delay_ms: u64) -> Self {
        Self {
            prefix: ">".into(),
            text: text.into(),
            delay_ms,
            is_output: true,
        }
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Timing knobs for the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub line_pause_ms: u64,
    pub cursor_interval_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            line_pause_ms: DEFAULT_LINE_PAUSE.as_millis() as u64,
            cursor_interval_ms: DEFAULT_CURSOR_INTERVAL.as_millis() as u64,
        }
    }
}

/// What a single timer firing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingEvent {
    /// A character of the current line was revealed.
    Char(char),
    /// The pause after `line` elapsed and a newline was appended.
    LineEnd { line: usize },
}

/// A rendered terminal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub prefix: String,
    pub text: String,
    pub is_output: bool,
    /// The row still being typed; the cursor sits at its end.
    pub is_current: bool,
}

/// Types a script into a text buffer, one timer firing at a time.
#[derive(Debug, Clone)]
pub struct Typewriter {
    script: Vec<ScriptLine>,
    line: usize,
    char_idx: usize,
    typed: String,
    timer: Timer,
    line_pause: Duration,
}

impl Typewriter {
    pub fn new(script: Vec<ScriptLine>, config: TypingConfig) -> Self {
        let line_pause = Duration::from_millis(config.line_pause_ms);
        let mut tw = Self {
            script,
            line: 0,
            char_idx: 0,
            typed: String::new(),
            timer: Timer::once(Duration::ZERO),
            line_pause,
        };
        tw.timer.reset_to(tw.start_delay(0));
        tw
    }

    /// Delay before the first firing of `line`: its character delay, or
    /// straight to the pause for an empty line.
    fn start_delay(&self, line: usize) -> Duration {
        match self.script.get(line) {
            Some(l) if !l.text.is_empty() => l.delay(),
            Some(_) => self.line_pause,
            None => Duration::ZERO,
        }
    }

    /// The hero's `whoami` session.
    pub fn default_script() -> Vec<ScriptLine> {
        vec![
            ScriptLine::command(" whoami", 60),
            ScriptLine::output(" aman kumar — Full Stack Developer", 30),
            ScriptLine::command(" cat skills.txt", 60),
            ScriptLine::output(" React • Javascript • Node.js • MongoDB", 20),
            ScriptLine::command(" echo \"Open to opportunities!\"", 50),
            ScriptLine::output(" Open to opportunities!", 25),
        ]
    }

    #[inline]
    pub fn script(&self) -> &[ScriptLine] {
        &self.script
    }

    /// Everything typed so far, newlines included.
    #[inline]
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Index of the line being typed.
    #[inline]
    pub fn line_index(&self) -> usize {
        self.line
    }

    /// Whether the whole script has been typed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.line >= self.script.len()
    }

    /// Advance by `dt`, returning every firing that happened in order.
    ///
    /// Time left over after a firing carries into the next timer, so one
    /// long tick produces the same result as many short ones.
    pub fn tick(&mut self, dt: Duration) -> Vec<TypingEvent> {
        let mut events = Vec::new();
        let mut left = dt;

        while !self.is_done() {
            let remaining = self.timer.remaining();
            if left < remaining {
                self.timer.tick(left);
                break;
            }
            left -= remaining;
            self.timer.tick(remaining);
            events.push(self.fire());
        }
        events
    }

    fn fire(&mut self) -> TypingEvent {
        let line = &self.script[self.line];
        match line.text.chars().nth(self.char_idx) {
            Some(ch) => {
                self.typed.push(ch);
                self.char_idx += 1;
                let next = if self.char_idx < line.text.chars().count() {
                    line.delay()
                } else {
                    self.line_pause
                };
                self.timer.reset_to(next);
                TypingEvent::Char(ch)
            }
            None => {
                let finished = self.line;
                self.typed.push('\n');
                self.line += 1;
                self.char_idx = 0;
                let next = self.start_delay(self.line);
                self.timer.reset_to(next);
                TypingEvent::LineEnd { line: finished }
            }
        }
    }

    /// Split the typed buffer into terminal rows.
    pub fn display_lines(&self) -> Vec<DisplayLine> {
        let mut rows = Vec::new();
        let mut parts = self.typed.split('\n');
        let completed = self.typed.matches('\n').count();

        for (idx, text) in parts.by_ref().take(completed).enumerate() {
            let meta = self.script.get(idx);
            rows.push(DisplayLine {
                prefix: meta.map(|m| m.prefix.clone()).unwrap_or_default(),
                text: text.to_string(),
                is_output: meta.map(|m| m.is_output).unwrap_or(false),
                is_current: false,
            });
        }

        if let Some(meta) = self.script.get(completed) {
            rows.push(DisplayLine {
                prefix: meta.prefix.clone(),
                text: parts.next().unwrap_or_default().to_string(),
                is_output: meta.is_output,
                is_current: true,
            });
        }
        rows
    }
}

/// A cursor that toggles visibility on a fixed interval.
#[derive(Debug, Clone)]
pub struct CursorBlink {
    visible: bool,
    timer: Timer,
}

impl CursorBlink {
    pub fn new(interval: Duration) -> Self {
        Self {
            visible: true,
            timer: Timer::repeating(interval),
        }
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Advance by `dt`; returns whether visibility changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let fired = self.timer.tick(dt);
        if fired % 2 == 1 {
            self.visible = !self.visible;
            true
        } else {
            false
        }
    }
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new(DEFAULT_CURSOR_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn two_lines() -> Vec<ScriptLine> {
        vec![ScriptLine::command(" ls", 10), ScriptLine::output(" a.txt", 5)]
    }

    #[test]
    fn test_first_char_after_delay() {
        let mut tw = Typewriter::new(two_lines(), TypingConfig::default());
        assert!(tw.tick(9 * MS).is_empty());
        assert_eq!(tw.tick(MS), vec![TypingEvent::Char(' ')]);
        assert_eq!(tw.typed(), " ");
    }

    #[test]
    fn test_pause_then_next_line() {
        let mut tw = Typewriter::new(two_lines(), TypingConfig::default());
        let events = tw.tick(30 * MS);
        assert_eq!(events.len(), 3);
        assert_eq!(tw.typed(), " ls");

        assert!(tw.tick(399 * MS).is_empty());
        assert_eq!(tw.tick(MS), vec![TypingEvent::LineEnd { line: 0 }]);
        assert_eq!(tw.line_index(), 1);
        assert_eq!(tw.typed(), " ls\n");
    }

    #[test]
    fn test_long_tick_equals_short_ticks() {
        let mut a = Typewriter::new(two_lines(), TypingConfig::default());
        let mut b = Typewriter::new(two_lines(), TypingConfig::default());

        let big = a.tick(2_000 * MS);
        let mut small = Vec::new();
        for _ in 0..2_000 {
            small.extend(b.tick(MS));
        }
        assert_eq!(big, small);
        assert_eq!(a.typed(), b.typed());
        assert!(a.is_done());
    }

    #[test]
    fn test_display_lines() {
        let mut tw = Typewriter::new(two_lines(), TypingConfig::default());
        tw.tick(30 * MS + 400 * MS + 10 * MS);

        let rows = tw.display_lines();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, " ls");
        assert_eq!(rows[0].prefix, "~$");
        assert!(!rows[0].is_current);
        assert_eq!(rows[1].text, " a");
        assert!(rows[1].is_output);
        assert!(rows[1].is_current);
    }

    #[test]
    fn test_done_has_no_current_row() {
        let mut tw = Typewriter::new(two_lines(), TypingConfig::default());
        tw.tick(Duration::from_secs(5));
        let rows = tw.display_lines();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| !r.is_current));
    }

    #[test]
    fn test_empty_line_waits_for_pause() {
        let script = vec![ScriptLine::command("", 10), ScriptLine::output("x", 10)];
        let mut tw = Typewriter::new(script, TypingConfig::default());
        assert!(tw.tick(399 * MS).is_empty());
        assert_eq!(tw.tick(MS), vec![TypingEvent::LineEnd { line: 0 }]);
    }

    #[test]
    fn test_empty_script() {
        let mut tw = Typewriter::new(Vec::new(), TypingConfig::default());
        assert!(tw.is_done());
        assert!(tw.tick(Duration::from_secs(1)).is_empty());
        assert!(tw.display_lines().is_empty());
    }

    #[test]
    fn test_cursor_blink() {
        let mut cursor = CursorBlink::default();
        assert!(cursor.visible());
        assert!(!cursor.tick(529 * MS));
        assert!(cursor.tick(MS));
        assert!(!cursor.visible());
        // two toggles in one tick cancel out
        assert!(!cursor.tick(1060 * MS));
        assert!(!cursor.visible());
    }
}
