//! # Terminal Hero
//!
//! Plays the hero terminal script in your shell at the page's own pace,
//! one 16 ms frame at a time.
//!
//! Run with: `cargo run --example terminal_hero`

use std::io::Write;
use std::time::Duration;

use folio::typing::TypingEvent;
use folio::{Content, Typewriter, TypingConfig};

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    let content = Content::embedded().expect("embedded content parses");
    let mut typewriter = Typewriter::new(content.terminal.clone(), TypingConfig::default());
    let mut stdout = std::io::stdout();

    println!("=== {} ===", content.profile.terminal_title);

    let mut at_line_start = true;
    while !typewriter.is_done() {
        for event in typewriter.tick(FRAME) {
            match event {
                TypingEvent::Char(ch) => {
                    if at_line_start {
                        let line = &typewriter.script()[typewriter.line_index()];
                        print!("{}", line.prefix);
                        at_line_start = false;
                    }
                    print!("{ch}");
                }
                TypingEvent::LineEnd { .. } => {
                    println!();
                    at_line_start = true;
                }
            }
        }
        let _ = stdout.flush();
        std::thread::sleep(FRAME);
    }
}
