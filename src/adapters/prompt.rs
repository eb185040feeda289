use crate::core::Prompter;
use crate::utils::error::{Result, SetupError};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// 以 rustyline 行編輯器讀取一行回答
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl StdinPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for StdinPrompter {
    fn prompt(&self, message: &str) -> Result<String> {
        // 每次詢問各自建立行編輯器, StdinPrompter 本身不持有終端狀態
        let mut rl = DefaultEditor::new().map_err(terminal_error)?;
        answer_from(rl.readline(message))
    }
}

fn answer_from(line: std::result::Result<String, ReadlineError>) -> Result<String> {
    match line {
        Ok(answer) => Ok(answer),
        Err(ReadlineError::Eof) => Err(no_answer("Input closed before an answer was given")),
        Err(ReadlineError::Interrupted) => Err(no_answer("Prompt interrupted")),
        Err(ReadlineError::Io(e)) => Err(SetupError::IoError(e)),
        Err(e) => Err(terminal_error(e)),
    }
}

fn no_answer(reason: &str) -> SetupError {
    SetupError::InvalidInputError {
        input: String::new(),
        reason: reason.to_string(),
    }
}

fn terminal_error(e: ReadlineError) -> SetupError {
    SetupError::IoError(std::io::Error::other(e.to_string()))
}
