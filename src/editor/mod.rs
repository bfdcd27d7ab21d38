//! Editor core
//! Main editor logic that ties everything together

/// ## editor/ Invariants
///
/// - One step is: read one key, process it fully, render one frame.
/// - A prompt runs its own read/render sub-loop to completion before the next step.
/// - Non-fatal failures become status messages; only fatal ones end the loop.
/// - The terminal is restored when the editor is dropped.
use crate::command::{translate_key, Command};
use crate::constants::{messages, prompts, ui};
use crate::cursor::Motion;
use crate::document::Document;
use crate::edit;
use crate::error::Result;
use crate::key::Key;
use crate::render;
use crate::search::IncrementalSearch;
use crate::selection;
use crate::settings::EditorOptions;
use crate::state::EditorState;
use crate::term::TerminalBackend;
use std::path::Path;
use std::time::Instant;

/// Per-keystroke hook for a prompt
pub trait PromptHandler {
    /// Called after every key read by the prompt, including the accepting
    /// Enter and the cancelling ESC, with the current input
    fn on_update(&mut self, state: &mut EditorState, query: &str, key: Key);
}

/// A prompt without a hook
impl PromptHandler for () {
    fn on_update(&mut self, _state: &mut EditorState, _query: &str, _key: Key) {}
}

/// Main editor struct
pub struct Editor<T: TerminalBackend> {
    /// Terminal backend
    pub term: T,
    pub state: EditorState,
    /// Ctrl-Q presses still needed to leave a dirty document
    quit_times: usize,
    should_quit: bool,
}

impl<T: TerminalBackend> Editor<T> {
    /// Create a new editor instance with an empty document
    pub fn new(terminal: T, options: EditorOptions) -> Result<Self> {
        Self::with_file(terminal, None::<&Path>, options)
    }

    /// Create a new editor instance with an optional file to load
    pub fn with_file(
        mut terminal: T,
        file_path: Option<impl AsRef<Path>>,
        options: EditorOptions,
    ) -> Result<Self> {
        // Load before touching the terminal so a failed open leaves it untouched
        let document = match file_path {
            Some(path) => Document::open(path, &options)?,
            None => Document::new(&options),
        };

        terminal.init()?;
        let size = terminal.get_size()?;

        let quit_times = options.quit_times;
        let mut state = EditorState::new(
            document,
            options,
            usize::from(size.rows),
            usize::from(size.cols),
        );
        state.set_message(ui::HELP);

        Ok(Self {
            term: terminal,
            state,
            quit_times,
            should_quit: false,
        })
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the editor main loop
    pub fn run(&mut self) -> Result<()> {
        while !self.should_quit {
            self.refresh_screen()?;
            // A timeout still redraws so an expired message disappears
            if let Some(key) = self.term.read_key()? {
                self.handle_key(key)?;
            }
        }
        self.term.clear_screen()
    }

    /// Scroll and draw one frame in a single write
    pub fn refresh_screen(&mut self) -> Result<()> {
        self.state.scroll();
        let frame = render::draw_frame(&self.state, Instant::now());
        self.term.write(&frame)
    }

    /// Process one key, showing non-fatal failures on the message bar
    ///
    /// Only fatal errors are returned.
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        match self.process_key(key) {
            Err(e) if !e.is_fatal() => {
                self.state.report(&e);
                Ok(())
            }
            result => result,
        }
    }

    /// Execute the command bound to `key`
    pub fn process_key(&mut self, key: Key) -> Result<()> {
        let command = translate_key(key);

        if command == Command::Quit {
            if self.state.document.is_dirty() && self.quit_times > 0 {
                self.state.set_message(messages::unsaved_quit(self.quit_times));
                self.quit_times -= 1;
            } else {
                self.should_quit = true;
            }
            return Ok(());
        }
        self.quit_times = self.state.options.quit_times;

        match command {
            Command::MoveLeft => self.move_cursor(Motion::Left),
            Command::MoveRight => self.move_cursor(Motion::Right),
            Command::MoveUp => self.move_cursor(Motion::Up),
            Command::MoveDown => self.move_cursor(Motion::Down),
            Command::MoveToLineStart => self.move_cursor(Motion::Home),
            Command::MoveToLineEnd => self.move_cursor(Motion::End),
            Command::PageUp => self.move_cursor(Motion::PageUp {
                row_offset: self.state.viewport.row_offset(),
                screen_rows: self.state.viewport.screen_rows(),
            }),
            Command::PageDown => self.move_cursor(Motion::PageDown {
                row_offset: self.state.viewport.row_offset(),
                screen_rows: self.state.viewport.screen_rows(),
            }),

            Command::InsertChar(ch) => {
                let EditorState { document, cursor, selection, .. } = &mut self.state;
                selection.clear();
                edit::insert_char(document, cursor, ch);
            }
            Command::InsertNewline => {
                let EditorState { document, cursor, selection, .. } = &mut self.state;
                selection.clear();
                edit::insert_newline(document, cursor);
            }
            Command::Backspace => {
                let EditorState { document, cursor, selection, .. } = &mut self.state;
                if selection.is_active() {
                    selection::delete_selection(document, cursor, selection);
                } else {
                    edit::delete_char(document, cursor);
                }
            }
            Command::DeleteForward => {
                let EditorState { document, cursor, selection, .. } = &mut self.state;
                if selection.is_active() {
                    selection::delete_selection(document, cursor, selection);
                } else {
                    edit::delete_forward(document, cursor);
                }
            }
            Command::Tab => {
                let EditorState { document, cursor, selection, .. } = &mut self.state;
                if selection.is_active() {
                    selection::indent(document, cursor, selection)?;
                } else {
                    edit::insert_char(document, cursor, b'\t');
                }
            }
            Command::Unindent => {
                let EditorState { document, cursor, selection, .. } = &mut self.state;
                selection::unindent(document, cursor, selection)?;
            }

            Command::ToggleSelection => {
                let at = self.state.cursor.position();
                let text = if self.state.selection.toggle(at) {
                    messages::SELECTION_STARTED
                } else {
                    messages::SELECTION_CLEARED
                };
                self.state.set_message(text);
            }
            Command::CancelSelection => self.state.selection.clear(),
            Command::Copy => {
                let EditorState { document, cursor, selection, clipboard, .. } = &mut self.state;
                let n = selection::copy(document, cursor, selection, clipboard)?;
                self.state.set_message(messages::copied(n));
            }
            Command::Cut => {
                let EditorState { document, cursor, selection, clipboard, .. } = &mut self.state;
                let n = selection::cut(document, cursor, selection, clipboard)?;
                self.state.set_message(messages::cut(n));
            }
            Command::Paste => {
                let EditorState { document, cursor, selection, clipboard, .. } = &mut self.state;
                let n = selection::paste(document, cursor, selection, clipboard)?;
                self.state.set_message(messages::pasted(n));
            }

            Command::Save => self.save()?,
            Command::Find => self.find()?,
            Command::Redraw => {
                let size = self.term.get_size()?;
                self.state.resize(usize::from(size.rows), usize::from(size.cols));
                self.term.clear_screen()?;
            }
            Command::Quit | Command::Noop => {}
        }
        Ok(())
    }

    fn move_cursor(&mut self, motion: Motion) {
        self.state.cursor.apply(&self.state.document, motion);
    }

    /// Save to the current path, asking for one first if there is none
    pub fn save(&mut self) -> Result<()> {
        let written = if self.state.document.path().is_some() {
            self.state.document.save()?
        } else {
            let Some(name) = self.prompt(prompts::SAVE_AS, &mut ())? else {
                self.state.set_message(messages::SAVE_ABORTED);
                return Ok(());
            };
            self.state.document.save_as(name)?
        };
        self.state.set_message(messages::bytes_written(written));
        Ok(())
    }

    /// Run the incremental search prompt
    pub fn find(&mut self) -> Result<()> {
        let mut search = IncrementalSearch::new(&self.state);
        match self.prompt(prompts::SEARCH, &mut search)? {
            None => search.restore(&mut self.state),
            Some(query) if !search.matched() => {
                self.state.set_message(messages::no_match(&query));
            }
            Some(_) => {}
        }
        Ok(())
    }

    /// Read a line of input on the message bar
    ///
    /// `template` contains `{}` where the input is shown. Returns `None` when
    /// the user presses ESC.
    pub fn prompt<H: PromptHandler + ?Sized>(
        &mut self,
        template: &str,
        handler: &mut H,
    ) -> Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.state.set_message(template.replace(prompts::INPUT, &input));
            self.refresh_screen()?;

            let Some(key) = self.term.read_key()? else {
                continue;
            };
            match key {
                Key::Backspace | Key::Delete | Key::Ctrl(b'h') => {
                    input.pop();
                }
                Key::Escape => {
                    self.state.set_message("");
                    handler.on_update(&mut self.state, &input, key);
                    return Ok(None);
                }
                Key::Enter if !input.is_empty() => {
                    self.state.set_message("");
                    handler.on_update(&mut self.state, &input, key);
                    return Ok(Some(input));
                }
                Key::Char(ch) if key.is_printable() && ch.is_ascii() => input.push(char::from(ch)),
                _ => {}
            }
            handler.on_update(&mut self.state, &input, key);
        }
    }
}

impl<T: TerminalBackend> Drop for Editor<T> {
    fn drop(&mut self) {
        self.term.deinit();
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
