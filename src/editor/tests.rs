use super::*;
use crate::cursor::Position;
use crate::test_utils::MockTerminal;

fn create_editor() -> Editor<MockTerminal> {
    let term = MockTerminal::new(24, 80);
    Editor::new(term, EditorOptions::default()).unwrap()
}

fn editor_with(text: &str) -> Editor<MockTerminal> {
    let mut editor = create_editor();
    editor.state.document = Document::from_bytes(text.as_bytes(), &EditorOptions::default());
    editor
}

fn press(editor: &mut Editor<MockTerminal>, keys: &[Key]) {
    for &key in keys {
        editor.handle_key(key).unwrap();
    }
}

fn type_str(editor: &mut Editor<MockTerminal>, text: &str) {
    for b in text.bytes() {
        editor.handle_key(Key::from_byte(b)).unwrap();
    }
}

fn text(editor: &Editor<MockTerminal>) -> String {
    String::from_utf8_lossy(&editor.state.document.to_bytes()).into_owned()
}

fn message(editor: &Editor<MockTerminal>) -> String {
    editor
        .state
        .message()
        .map(|m| m.text.clone())
        .unwrap_or_default()
}

#[test]
fn test_editor_initial_state() {
    let editor = create_editor();
    assert_eq!(editor.term.init_calls, 1);
    assert_eq!(editor.state.document.num_rows(), 0);
    assert_eq!(editor.state.viewport.screen_rows(), 22);
    assert_eq!(message(&editor), ui::HELP);
    assert!(!editor.should_quit());
}

#[test]
fn test_open_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = Editor::with_file(
        MockTerminal::new(24, 80),
        Some(dir.path().join("missing.txt")),
        EditorOptions::default(),
    );
    assert!(result.err().unwrap().is_fatal());
}

#[test]
fn test_typing_and_newlines() {
    let mut editor = create_editor();
    type_str(&mut editor, "ab\rc");
    assert_eq!(text(&editor), "ab\nc\n");
    assert_eq!(editor.state.cursor.position(), Position::new(1, 1));

    press(&mut editor, &[Key::Backspace, Key::Backspace]);
    assert_eq!(text(&editor), "ab\n");
    press(&mut editor, &[Key::Home, Key::Delete]);
    assert_eq!(text(&editor), "b\n");
}

#[test]
fn test_ctrl_h_deletes_back() {
    let mut editor = editor_with("xyz");
    press(&mut editor, &[Key::End, Key::Ctrl(b'h')]);
    assert_eq!(text(&editor), "xy\n");
}

#[test]
fn test_clean_document_quits_immediately() {
    let mut editor = editor_with("x");
    press(&mut editor, &[Key::Ctrl(b'q')]);
    assert!(editor.should_quit());
}

#[test]
fn test_quit_protection() {
    let mut editor = create_editor();
    type_str(&mut editor, "x");

    press(&mut editor, &[Key::Ctrl(b'q')]);
    assert!(!editor.should_quit());
    assert_eq!(
        message(&editor),
        "WARNING!!! File has unsaved changes. Press Ctrl-Q 3 more times to quit."
    );
    press(&mut editor, &[Key::Ctrl(b'q'), Key::Ctrl(b'q')]);
    assert!(message(&editor).contains("1 more times"));
    assert!(!editor.should_quit());

    // Any other key starts the count over
    press(&mut editor, &[Key::ArrowLeft, Key::Ctrl(b'q')]);
    assert!(message(&editor).contains("3 more times"));

    press(&mut editor, &[Key::Ctrl(b'q'), Key::Ctrl(b'q'), Key::Ctrl(b'q')]);
    assert!(editor.should_quit());
}

#[test]
fn test_save_to_existing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "hello\n").unwrap();

    let mut editor =
        Editor::with_file(MockTerminal::new(24, 80), Some(&path), EditorOptions::default()).unwrap();
    press(&mut editor, &[Key::End]);
    type_str(&mut editor, "!");
    press(&mut editor, &[Key::Ctrl(b's')]);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello!\n");
    assert_eq!(message(&editor), "7 bytes written to disk");
    assert!(!editor.state.document.is_dirty());
}

#[test]
fn test_save_as_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.py");

    let mut editor = create_editor();
    type_str(&mut editor, "pass");
    editor.term.push_str(&format!("{}x", path.display()));
    editor.term.push_keys(&[Key::Backspace, Key::Enter]);
    press(&mut editor, &[Key::Ctrl(b's')]);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "pass\n");
    assert_eq!(editor.state.document.path(), Some(path.as_path()));
    assert_eq!(editor.state.document.syntax().map(|r| r.name), Some("python"));
    assert!(editor.term.keys.is_empty());
}

#[test]
fn test_save_as_prompt_shows_input() {
    let mut editor = create_editor();
    editor.term.push_str("ab");
    editor.term.push_keys(&[Key::Escape]);
    press(&mut editor, &[Key::Ctrl(b's')]);
    assert!(editor
        .term
        .get_written_string()
        .contains("Save as: ab (ESC to cancel)"));
}

#[test]
fn test_save_as_cancelled() {
    let mut editor = create_editor();
    type_str(&mut editor, "x");
    editor.term.push_str("name");
    editor.term.push_keys(&[Key::Escape]);
    press(&mut editor, &[Key::Ctrl(b's')]);
    assert_eq!(message(&editor), "Save aborted");
    assert!(editor.state.document.path().is_none());
    assert!(editor.state.document.is_dirty());
}

#[test]
fn test_prompt_ignores_empty_enter_and_timeouts() {
    let mut editor = create_editor();
    editor.term.push_keys(&[Key::Enter]);
    editor.term.push_timeout();
    editor.term.push_str("ok");
    editor.term.push_keys(&[Key::Enter]);
    let input = editor.prompt("Name: {}", &mut ()).unwrap();
    assert_eq!(input.as_deref(), Some("ok"));
    assert_eq!(message(&editor), "");
}

#[test]
fn test_save_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = create_editor();
    type_str(&mut editor, "x");
    editor
        .term
        .push_str(&dir.path().join("no").join("such").display().to_string());
    editor.term.push_keys(&[Key::Enter]);
    press(&mut editor, &[Key::Ctrl(b's')]);
    assert!(message(&editor).starts_with("Can't save! I/O error:"));
    assert!(editor.state.document.is_dirty());
    assert!(!editor.should_quit());
}

#[test]
fn test_find_accepts_match() {
    let mut editor = editor_with("bar\nxfoox");
    editor.term.push_str("foo");
    editor.term.push_keys(&[Key::Enter]);
    press(&mut editor, &[Key::Ctrl(b'f')]);
    assert_eq!(editor.state.cursor.position(), Position::new(1, 1));
    assert_eq!(message(&editor), "");
    // The match overlay is gone once the prompt closes
    let hl = editor.state.document.row(1).unwrap().highlight();
    assert!(hl.iter().all(|h| *h == crate::syntax::Highlight::Normal));
}

#[test]
fn test_find_arrow_keys_cycle_matches() {
    let mut editor = editor_with("a1\nb\na2");
    editor.term.push_str("a");
    editor.term.push_keys(&[Key::ArrowDown, Key::Enter]);
    press(&mut editor, &[Key::Ctrl(b'f')]);
    assert_eq!(editor.state.cursor.cy, 2);
}

#[test]
fn test_find_cancel_restores_cursor() {
    let mut editor = editor_with("one\ntwo\nthree");
    press(&mut editor, &[Key::ArrowDown, Key::ArrowRight]);
    editor.term.push_str("thr");
    editor.term.push_keys(&[Key::Escape]);
    press(&mut editor, &[Key::Ctrl(b'f')]);
    assert_eq!(editor.state.cursor.position(), Position::new(1, 1));
}

#[test]
fn test_find_without_match_reports() {
    let mut editor = editor_with("abc");
    editor.term.push_str("zzz");
    editor.term.push_keys(&[Key::Enter]);
    press(&mut editor, &[Key::Ctrl(b'f')]);
    assert_eq!(message(&editor), "No match for: zzz");
}

#[test]
fn test_copy_and_paste_with_keys() {
    let mut editor = editor_with("abcdef");
    press(&mut editor, &[Key::Ctrl(b'b')]);
    assert_eq!(message(&editor), "Selection started");
    press(&mut editor, &[Key::ArrowRight, Key::ArrowRight, Key::ArrowRight, Key::Ctrl(b'c')]);
    assert_eq!(message(&editor), "Copied 3 bytes");
    assert_eq!(editor.state.clipboard.contents(), b"abc");
    assert!(!editor.state.selection.is_active());

    press(&mut editor, &[Key::End, Key::Ctrl(b'v')]);
    assert_eq!(text(&editor), "abcdefabc\n");
    assert_eq!(message(&editor), "Pasted 3 bytes");
}

#[test]
fn test_cut_with_keys() {
    let mut editor = editor_with("abc\ndef");
    press(&mut editor, &[Key::ArrowRight, Key::Ctrl(b'b'), Key::ArrowDown, Key::Ctrl(b'x')]);
    assert_eq!(text(&editor), "aef\n");
    assert_eq!(editor.state.clipboard.contents(), b"bc\nd");
    assert_eq!(message(&editor), "Cut 4 bytes");
}

#[test]
fn test_clipboard_errors_are_reported() {
    let mut editor = editor_with("abc");
    press(&mut editor, &[Key::Ctrl(b'c')]);
    assert_eq!(message(&editor), "No active selection");
    press(&mut editor, &[Key::Ctrl(b'v')]);
    assert_eq!(message(&editor), "Clipboard is empty");
    assert!(!editor.state.document.is_dirty());
}

#[test]
fn test_toggle_selection_off() {
    let mut editor = editor_with("abc");
    press(&mut editor, &[Key::Ctrl(b'b'), Key::Ctrl(b'b')]);
    assert!(!editor.state.selection.is_active());
    assert_eq!(message(&editor), "Selection cleared");

    press(&mut editor, &[Key::Ctrl(b'b'), Key::Escape]);
    assert!(!editor.state.selection.is_active());
}

#[test]
fn test_tab_indents_selection() {
    let mut editor = editor_with("a\nb");
    press(&mut editor, &[Key::Ctrl(b'b'), Key::ArrowDown, Key::Tab]);
    assert_eq!(text(&editor), "\ta\n\tb\n");
    assert!(editor.state.selection.is_active());
    press(&mut editor, &[Key::BackTab]);
    assert_eq!(text(&editor), "a\nb\n");

    press(&mut editor, &[Key::Escape, Key::Tab]);
    assert_eq!(text(&editor), "a\n\tb\n");
}

#[test]
fn test_unindent_without_selection_reports() {
    let mut editor = editor_with("\ta");
    press(&mut editor, &[Key::BackTab]);
    assert_eq!(message(&editor), "No active selection");
    assert_eq!(text(&editor), "\ta\n");
}

#[test]
fn test_backspace_deletes_selection() {
    let mut editor = editor_with("hello world");
    press(&mut editor, &[Key::Ctrl(b'b'), Key::End, Key::Backspace]);
    assert_eq!(text(&editor), "\n");
    assert!(editor.state.clipboard.is_empty());
}

#[test]
fn test_typing_cancels_selection() {
    let mut editor = editor_with("abc");
    press(&mut editor, &[Key::Ctrl(b'b'), Key::ArrowRight]);
    type_str(&mut editor, "x");
    assert!(!editor.state.selection.is_active());
    assert_eq!(text(&editor), "axbc\n");
}

#[test]
fn test_page_down_moves_a_screen() {
    let rows: Vec<String> = (0..100).map(|i| i.to_string()).collect();
    let mut editor = editor_with(&rows.join("\n"));
    press(&mut editor, &[Key::PageDown]);
    assert_eq!(editor.state.cursor.cy, 43);
    press(&mut editor, &[Key::PageUp]);
    assert_eq!(editor.state.cursor.cy, 0);
}

#[test]
fn test_redraw_resamples_size() {
    let mut editor = create_editor();
    editor.term.size = (40, 100);
    press(&mut editor, &[Key::Ctrl(b'l')]);
    assert_eq!(editor.term.clear_screen_calls, 1);
    assert_eq!(editor.state.viewport.screen_rows(), 38);
    assert_eq!(editor.state.viewport.screen_cols(), 100);
}

#[test]
fn test_run_loop_until_quit() {
    let mut editor = create_editor();
    editor.term.push_str("hi");
    editor.term.push_timeout();
    editor.term.push_keys(&[Key::Ctrl(b'q'); 4]);
    editor.run().unwrap();

    assert!(editor.should_quit());
    assert_eq!(text(&editor), "hi\n");
    assert_eq!(editor.term.clear_screen_calls, 1);
    // One frame per key read, timeout included
    assert_eq!(editor.term.writes.len(), 7);
    assert!(editor.term.writes[0].starts_with(b"\x1b[?25l"));
}

#[test]
fn test_run_propagates_terminal_errors() {
    let mut editor = create_editor();
    editor.term.push_str("a");
    let err = editor.run().unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(text(&editor), "a\n");
}

#[test]
fn test_first_frame_shows_welcome_and_help() {
    let mut editor = create_editor();
    editor.refresh_screen().unwrap();
    let frame = editor.term.last_frame();
    assert!(frame.contains(&ui::welcome()));
    assert!(frame.contains(ui::HELP));
}

#[test]
fn test_non_fatal_errors_become_messages() {
    let mut editor = editor_with("abc");
    let err = editor.process_key(Key::Ctrl(b'c')).unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(err.code, crate::constants::errors::NO_SELECTION);

    editor.handle_key(Key::Ctrl(b'c')).unwrap();
    let msg = editor.state.message().unwrap();
    assert_eq!(msg.text, "No active selection");
    assert_eq!(msg.kind, crate::status::MessageKind::Warning);
}

#[test]
fn test_run_continues_after_non_fatal_error() {
    let mut editor = editor_with("abc");
    editor.term.push_keys(&[Key::Ctrl(b'v'), Key::Ctrl(b'q')]);
    editor.run().unwrap();
    assert!(editor.should_quit());
    assert_eq!(message(&editor), "Clipboard is empty");
}
