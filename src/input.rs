//! Single-keypress terminal input.
//!
//! Raw mode is enabled only for the duration of one key read, so
//! normal printing works everywhere else.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, Write};

/// Prints a prompt, reads one key press and echoes it.
pub fn prompt_key(prompt: &str) -> Result<char> {
    print!("{prompt}");
    io::stdout().flush()?;

    let key = read_key();
    match &key {
        Ok(c) => println!("{c}"),
        Err(_) => println!(),
    }
    key
}

/// Keeps prompting until the pressed key is one of `accepted`.
pub fn prompt_choice(prompt: &str, accepted: &[char]) -> Result<char> {
    let mut key = prompt_key(prompt)?;
    while !accepted.contains(&key) {
        key = prompt_key("Invalid input, please try again: ")?;
    }
    Ok(key)
}

fn read_key() -> Result<char> {
    terminal::enable_raw_mode()?;
    let key = loop {
        match event::read() {
            Ok(Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    break Err(anyhow!("interrupted"));
                }
                KeyCode::Esc => break Err(anyhow!("interrupted")),
                KeyCode::Char(c) => break Ok(c),
                _ => {}
            },
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };
    terminal::disable_raw_mode()?;
    key
}
