use super::*;
use proptest::prelude::*;

fn opts() -> EditorOptions {
    EditorOptions::default()
}

fn doc_from(text: &str) -> Document {
    Document::from_bytes(text.as_bytes(), &opts())
}

fn lines(doc: &Document) -> Vec<String> {
    doc.rows()
        .iter()
        .map(|r| String::from_utf8_lossy(r.raw()).into_owned())
        .collect()
}

fn assert_indices(doc: &Document) {
    for (i, row) in doc.rows().iter().enumerate() {
        assert_eq!(row.idx, i);
        assert_eq!(row.highlight().len(), row.rsize());
    }
}

#[test]
fn test_new_document_is_empty() {
    let doc = Document::new(&opts());
    assert_eq!(doc.num_rows(), 0);
    assert!(!doc.is_dirty());
    assert_eq!(doc.display_name(), "[No Name]");
    assert!(doc.path().is_none());
    assert!(doc.syntax().is_none());
}

#[test]
fn test_from_bytes_splits_lines() {
    let doc = doc_from("one\ntwo\r\n\nfour");
    assert_eq!(lines(&doc), vec!["one", "two", "", "four"]);
    assert_eq!(doc.dirty(), 0);
    assert_indices(&doc);
}

#[test]
fn test_from_bytes_trailing_newline() {
    assert_eq!(lines(&doc_from("a\nb\n")), vec!["a", "b"]);
    assert_eq!(doc_from("").num_rows(), 0);
    assert_eq!(lines(&doc_from("\n")), vec![""]);
}

#[test]
fn test_to_bytes_terminates_every_row() {
    let doc = doc_from("a\nb");
    assert_eq!(doc.to_bytes(), b"a\nb\n");
    assert!(Document::new(&opts()).to_bytes().is_empty());
}

#[test]
fn test_insert_row() {
    let mut doc = doc_from("a\nc");
    assert!(doc.insert_row(1, b"b"));
    assert!(doc.insert_row(3, b"d"));
    assert!(!doc.insert_row(9, b"x"));
    assert_eq!(lines(&doc), vec!["a", "b", "c", "d"]);
    assert_eq!(doc.dirty(), 2);
    assert_indices(&doc);
}

#[test]
fn test_delete_row() {
    let mut doc = doc_from("a\nb\nc");
    assert!(doc.delete_row(1));
    assert!(!doc.delete_row(5));
    assert_eq!(lines(&doc), vec!["a", "c"]);
    assert_eq!(doc.dirty(), 1);
    assert_indices(&doc);
}

#[test]
fn test_insert_and_delete_char() {
    let mut doc = doc_from("hllo");
    assert!(doc.insert_char(0, 1, b'e'));
    assert_eq!(lines(&doc), vec!["hello"]);

    // Past the end appends
    assert!(doc.insert_char(0, 99, b'!'));
    assert_eq!(lines(&doc), vec!["hello!"]);

    assert!(doc.delete_char(0, 5));
    assert!(!doc.delete_char(0, 5));
    assert!(!doc.insert_char(3, 0, b'x'));
    assert_eq!(lines(&doc), vec!["hello"]);
    assert_eq!(doc.dirty(), 3);
}

#[test]
fn test_insert_and_append_string() {
    let mut doc = doc_from("ad");
    assert!(doc.insert_string(0, 1, b"bc"));
    assert!(doc.append_string(0, b"ef"));
    assert!(!doc.append_string(1, b"zz"));
    assert_eq!(lines(&doc), vec!["abcdef"]);
}

#[test]
fn test_split_and_join() {
    let mut doc = doc_from("hello world");
    assert!(doc.split_row(0, 5));
    assert_eq!(lines(&doc), vec!["hello", " world"]);
    assert!(doc.join_with_next(0));
    assert_eq!(lines(&doc), vec!["hello world"]);
    assert!(!doc.join_with_next(0));
    assert_indices(&doc);
}

#[test]
fn test_split_clamps_column() {
    let mut doc = doc_from("abc");
    assert!(doc.split_row(0, 10));
    assert_eq!(lines(&doc), vec!["abc", ""]);
    assert!(!doc.split_row(5, 0));
}

#[test]
fn test_tab_rendering_follows_tab_stop() {
    let doc = doc_from("\tx");
    assert_eq!(doc.row(0).unwrap().rendered(), b"        x");

    let options = EditorOptions {
        tab_stop: 4,
        ..EditorOptions::default()
    };
    let doc = Document::from_bytes(b"\tx", &options);
    assert_eq!(doc.row(0).unwrap().rendered(), b"    x");

    let options = EditorOptions {
        tab_stop: 0,
        ..EditorOptions::default()
    };
    let doc = Document::from_bytes(b"\tx", &options);
    assert_eq!(doc.tab_stop(), 1);
    assert_eq!(doc.row(0).unwrap().rendered(), b" x");
}

#[test]
fn test_select_syntax_from_path() {
    let mut doc = doc_from("int x = 1;");
    doc.set_path("main.c");
    assert_eq!(doc.syntax().map(|r| r.name), Some("c"));
    assert_eq!(doc.row(0).unwrap().highlight()[0], Highlight::KeywordSecondary);
    assert_eq!(doc.display_name(), "main.c");

    doc.set_path("notes.txt");
    assert!(doc.syntax().is_none());
    assert!(doc.row(0).unwrap().highlight().iter().all(|h| *h == Highlight::Normal));
}

#[test]
fn test_syntax_disabled_by_option() {
    let options = EditorOptions {
        syntax: false,
        ..EditorOptions::default()
    };
    let mut doc = Document::from_bytes(b"int x;", &options);
    doc.set_path("main.c");
    assert!(doc.syntax().is_none());
}

#[test]
fn test_block_comment_propagates_forward() {
    let mut doc = doc_from("a\nb\nc");
    doc.set_path("x.c");
    assert!(doc.rows().iter().all(|r| !r.continues_block_comment()));

    // Opening a comment on the first row reaches every following row
    doc.insert_string(0, 0, b"/* ");
    assert!(doc.rows().iter().all(|r| r.continues_block_comment()));
    assert_eq!(doc.row(2).unwrap().highlight()[0], Highlight::BlockComment);

    // Closing it on the middle row releases the last one
    doc.append_string(1, b" */");
    assert!(!doc.row(1).unwrap().continues_block_comment());
    assert_eq!(doc.row(2).unwrap().highlight()[0], Highlight::Normal);
}

#[test]
fn test_inserted_row_breaks_open_comment() {
    let mut doc = doc_from("/* open\nstill");
    doc.set_path("x.c");
    assert_eq!(doc.row(1).unwrap().highlight()[0], Highlight::BlockComment);

    // A closing row inserted between them ends the comment for the row below
    doc.insert_row(1, b"*/");
    assert!(!doc.row(1).unwrap().continues_block_comment());
    assert_eq!(doc.row(2).unwrap().highlight()[0], Highlight::Normal);
}

#[test]
fn test_deleting_opener_releases_comment() {
    let mut doc = doc_from("/*\nx\ny");
    doc.set_path("x.c");
    assert!(doc.row(2).unwrap().continues_block_comment());
    doc.delete_row(0);
    assert!(doc.rows().iter().all(|r| !r.continues_block_comment()));
    assert_eq!(doc.row(1).unwrap().highlight()[0], Highlight::Normal);
}

#[test]
fn test_overlay_and_restore_match() {
    let mut doc = doc_from("find me");
    let saved = doc.overlay_match(0, 5, 2).unwrap();
    assert_eq!(doc.row(0).unwrap().highlight()[5], Highlight::Match);
    assert_eq!(doc.row(0).unwrap().highlight()[4], Highlight::Normal);
    doc.restore_highlight(0, saved);
    assert!(doc.row(0).unwrap().highlight().iter().all(|h| *h == Highlight::Normal));
    assert!(doc.overlay_match(3, 0, 1).is_none());
}

#[test]
fn test_save_and_open_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut doc = doc_from("alpha\n\tbeta");
    doc.insert_char(0, 0, b'>');
    assert!(doc.is_dirty());
    assert!(doc.save().is_err(), "no path yet");
    assert!(doc.is_dirty());

    let written = doc.save_as(&path).unwrap();
    assert_eq!(written, 13);
    assert!(!doc.is_dirty());

    let loaded = Document::open(&path, &opts()).unwrap();
    assert_eq!(lines(&loaded), vec![">alpha", "\tbeta"]);
    assert_eq!(loaded.display_name(), "out.txt");
}

#[test]
fn test_save_truncates_longer_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shrink.txt");
    std::fs::write(&path, "a much longer previous content\n").unwrap();

    let mut doc = Document::open(&path, &opts()).unwrap();
    doc.delete_row(0);
    doc.insert_row(0, b"short");
    doc.save().unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"short\n");
}

#[test]
fn test_save_failure_keeps_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = doc_from("x");
    doc.insert_char(0, 0, b'y');
    let err = doc.save_as(dir.path().join("missing").join("f.txt")).unwrap_err();
    assert_eq!(err.code, crate::constants::errors::SAVE_FAILED);
    assert!(err.message.contains("Can't save!"));
    assert!(doc.is_dirty());
    assert!(doc.path().is_none());
}

#[test]
fn test_open_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = Document::open(dir.path().join("nope"), &opts()).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.code, crate::constants::errors::LOAD_FAILED);
}

proptest! {
    #[test]
    fn prop_bytes_round_trip(rows in prop::collection::vec("[^\r\n]{0,12}", 0..8)) {
        let mut doc = Document::new(&opts());
        for (i, row) in rows.iter().enumerate() {
            doc.insert_row(i, row.as_bytes());
        }
        let reloaded = Document::from_bytes(&doc.to_bytes(), &opts());
        prop_assert_eq!(lines(&reloaded), lines(&doc));
    }

    #[test]
    fn prop_split_then_join_restores(text in "[a-z \t]{0,20}", at in 0usize..25) {
        let mut doc = doc_from(&text);
        if doc.num_rows() == 0 {
            doc.insert_row(0, b"");
        }
        let before = lines(&doc);
        doc.split_row(0, at);
        doc.join_with_next(0);
        prop_assert_eq!(lines(&doc), before);
        assert_indices(&doc);
    }
}
