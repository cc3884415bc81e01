use pretty_assertions::assert_eq;
use scribe_primitives::Cursor;

use crate::common::{document, document_with_view, marks};

#[test]
fn reload_of_unchanged_content_keeps_history() {
	let mut doc = document("abc");
	doc.insert_text(Cursor::new(0, 0), "x").unwrap();
	let written = doc.save();
	assert_eq!(written, "xabc");
	let saved = doc.checksum().cloned();

	assert!(doc.reload(&written));
	assert_eq!(doc.checksum().cloned(), saved);
	assert_eq!(doc.undo_count(), 1);
	assert!(!doc.is_modified());

	doc.undo();
	assert_eq!(doc.text(), "abc");
	assert!(doc.is_modified());
}

#[test]
fn reload_of_changed_content_drops_history() {
	let mut doc = document("abc");
	doc.insert_text(Cursor::new(0, 0), "x").unwrap();
	doc.save();

	assert!(!doc.reload("something else"));
	assert_eq!(doc.text(), "something else");
	assert_eq!(doc.undo_count(), 0);
	assert_eq!(doc.redo_count(), 0);
	assert_eq!(marks(&doc, 1), ".");
	assert!(!doc.is_modified());
}

#[test]
fn reload_with_unsaved_changes_drops_history() {
	let mut doc = document("abc");
	doc.insert_text(Cursor::new(0, 0), "x").unwrap();
	assert!(doc.is_modified());

	// Same bytes as the original file, but the edit was never saved.
	assert!(!doc.reload("abc"));
	assert_eq!(doc.undo_count(), 0);
	assert!(!doc.is_modified());
}

#[test]
fn reload_of_loaded_content_keeps_redo() {
	let mut doc = document("abc");
	doc.insert_text(Cursor::new(0, 3), "d").unwrap();
	doc.undo();
	assert!(!doc.is_modified());

	assert!(doc.reload("abc"));
	assert_eq!(doc.redo_count(), 1);
	doc.redo();
	assert_eq!(doc.text(), "abcd");
}

#[test]
fn reload_clamps_the_view() {
	let mut doc = document_with_view("first\nsecond line");
	doc.set_cursor_position(Cursor::new(1, 8)).unwrap();

	doc.reload("one");
	assert_eq!(doc.cursor(), Some(Cursor::new(0, 3)));
}

#[test]
fn reload_inside_a_session_is_refused() {
	let mut doc = document("abc");
	doc.edit_start();
	assert!(!doc.reload("abc"));
	doc.edit_end();
	assert_eq!(doc.text(), "abc");
}
