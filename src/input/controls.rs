//! Routing of keystrokes between the prompt, shortcuts and presets

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use tracing::debug;

use super::{
    keys::{Focus, Key, KeyDispatcher},
    prompt::TimePrompt,
};
use crate::{
    commands::{CommandEmitter, CommandSink, Preset},
    state::TimerStatus,
};

/// Seconds moved by the bracket keys
pub const MINUTE_STEP_SECONDS: u32 = 60;

/// Whether the UI loop keeps going after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct Controls {
    dispatcher: KeyDispatcher,
    prompt: TimePrompt,
    presets: Vec<Preset>,
}

impl Controls {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self {
            dispatcher: KeyDispatcher,
            prompt: TimePrompt::default(),
            presets,
        }
    }

    pub fn focus(&self) -> Focus {
        if self.prompt.is_open() {
            Focus::TextInput
        } else {
            Focus::Display
        }
    }

    pub fn prompt(&self) -> &TimePrompt {
        &self.prompt
    }

    pub fn handle_key<S: CommandSink>(
        &mut self,
        key: Key,
        status: TimerStatus,
        emitter: &CommandEmitter<S>,
    ) -> Flow {
        if key == Key::Interrupt {
            return Flow::Quit;
        }

        if self.focus() == Focus::TextInput {
            self.handle_prompt_key(key, emitter);
            return Flow::Continue;
        }

        if let Some(command) = self.dispatcher.dispatch(key, self.focus(), status) {
            emitter.emit(command);
            return Flow::Continue;
        }

        match key {
            Key::Char('q') | Key::Char('Q') | Key::Esc => return Flow::Quit,
            Key::Char('t') | Key::Char('T') => self.prompt.open(),
            Key::Char(']') => emitter.add_time(MINUTE_STEP_SECONDS),
            Key::Char('[') => emitter.subtract_time(MINUTE_STEP_SECONDS),
            Key::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                match self.presets.get(index) {
                    Some(preset) => emitter.select_preset(*preset),
                    None => debug!(key = %c, "No preset bound"),
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_prompt_key<S: CommandSink>(&mut self, key: Key, emitter: &CommandEmitter<S>) {
        match key {
            Key::Enter => match emitter.submit_custom_time(self.prompt.input()) {
                Ok(_) => self.prompt.close(),
                Err(e) => self.prompt.reject(e.to_string()),
            },
            Key::Esc => self.prompt.close(),
            Key::Backspace => self.prompt.backspace(),
            Key::Space => self.prompt.push(' '),
            Key::Char(c) => self.prompt.push(c),
            _ => {}
        }
    }

    /// Two footer lines: key hints or the prompt, then presets or the prompt error
    pub fn footer_lines(&self) -> Vec<Line<'static>> {
        let hint = Style::default().fg(Color::DarkGray);

        if self.prompt.is_open() {
            let second = match self.prompt.error() {
                Some(error) => Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))),
                None => Line::from(Span::styled("Enter to set · Esc to cancel", hint)),
            };
            return vec![
                Line::from(vec![
                    Span::raw("Set time (MM:SS): "),
                    Span::styled(format!("{}_", self.prompt.input()), Style::default().fg(Color::White)),
                ]),
                second,
            ];
        }

        let presets = self
            .presets
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {}m", i + 1, p.minutes))
            .collect::<Vec<_>>()
            .join("  ");

        vec![
            Line::from(Span::styled(
                "Space start/stop · R reset · ↑/↓ ±10s · [/] ±1m · T custom · Q quit",
                hint,
            )),
            Line::from(Span::styled(presets, hint)),
        ]
    }
}
