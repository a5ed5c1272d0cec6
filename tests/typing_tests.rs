//! Integration tests for the terminal typewriter.

use std::time::Duration;

use folio::typing::TypingEvent;
use folio::{CursorBlink, ScriptLine, Typewriter, TypingConfig};

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn test_default_script_types_fully() {
    let script = Typewriter::default_script();
    let expected: String = script.iter().map(|l| format!("{}\n", l.text)).collect();

    let mut tw = Typewriter::new(script, TypingConfig::default());
    for _ in 0..2000 {
        tw.tick(FRAME);
    }
    assert!(tw.is_done());
    assert_eq!(tw.typed(), expected);
}

#[test]
fn test_events_in_order() {
    let script = vec![ScriptLine::command("ab", 10), ScriptLine::output("c", 10)];
    let mut tw = Typewriter::new(script, TypingConfig::default());
    let events = tw.tick(Duration::from_secs(10));
    assert_eq!(
        events,
        vec![
            TypingEvent::Char('a'),
            TypingEvent::Char('b'),
            TypingEvent::LineEnd { line: 0 },
            TypingEvent::Char('c'),
            TypingEvent::LineEnd { line: 1 },
        ]
    );
    assert!(tw.tick(Duration::from_secs(10)).is_empty());
}

#[test]
fn test_custom_line_pause() {
    let config = TypingConfig {
        line_pause_ms: 50,
        ..TypingConfig::default()
    };
    let mut tw = Typewriter::new(vec![ScriptLine::command("x", 10), ScriptLine::command("y", 10)], config);
    tw.tick(Duration::from_millis(10));
    assert_eq!(tw.tick(Duration::from_millis(50)), vec![TypingEvent::LineEnd { line: 0 }]);
}

#[test]
fn test_multibyte_text() {
    let mut tw = Typewriter::new(vec![ScriptLine::output("a • b", 5)], TypingConfig::default());
    tw.tick(Duration::from_millis(25));
    assert_eq!(tw.typed(), "a • b");
}

#[test]
fn test_cursor_blinks_independently() {
    let mut cursor = CursorBlink::new(Duration::from_millis(530));
    let mut toggles = 0;
    for _ in 0..(5300 / 10) {
        if cursor.tick(Duration::from_millis(10)) {
            toggles += 1;
        }
    }
    assert_eq!(toggles, 10);
    assert!(cursor.visible());
}
