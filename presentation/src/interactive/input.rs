//! Line input for the interactive session

use reedline::{
    FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal,
};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

/// Entries kept in the history file.
const HISTORY_SIZE: usize = 500;

/// Source of user input lines.
pub trait LineSource {
    /// Read one line. `None` means the user asked to leave (Ctrl-C, Ctrl-D).
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Plain left-hand prompt without an edit-mode indicator.
struct LinePrompt<'a>(&'a str);

impl Prompt for LinePrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Terminal input through reedline, with optional file-backed history.
pub struct ReedlineSource {
    editor: Reedline,
}

impl ReedlineSource {
    pub fn new(history: Option<PathBuf>) -> io::Result<Self> {
        let mut editor = Reedline::create();
        if let Some(path) = history {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let history = FileBackedHistory::with_file(HISTORY_SIZE, path)
                .map_err(|e| io::Error::other(e.to_string()))?;
            editor = editor.with_history(Box::new(history));
        }
        Ok(Self { editor })
    }
}

impl LineSource for ReedlineSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.read_line(&LinePrompt(prompt))? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC | Signal::CtrlD => Ok(None),
        }
    }
}
