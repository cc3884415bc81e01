use pretty_assertions::assert_eq;
use scribe_primitives::{Cursor, Range};

use crate::common::{document, marks};

#[test]
fn insert_text_flags_follow_undo_and_save() {
	let mut doc = document("first line\n");
	doc.insert_text(Cursor::new(0, 2), "_").unwrap();
	assert_eq!(marks(&doc, 1), "m");

	doc.undo();
	assert_eq!(marks(&doc, 1), "s");
	doc.redo();
	assert_eq!(marks(&doc, 1), "m");

	doc.save();
	assert_eq!(marks(&doc, 1), "s");

	doc.undo();
	assert_eq!(marks(&doc, 1), "m");
	doc.redo();
	assert_eq!(marks(&doc, 1), "s");
}

#[test]
fn remove_text_flags_follow_undo_and_save() {
	let mut doc = document("first line\n");
	doc.remove_text(Range::new(Cursor::new(0, 1), Cursor::new(0, 2)))
		.unwrap();
	assert_eq!(doc.line(0), Some("frst line"));
	assert_eq!(marks(&doc, 1), "m");

	doc.undo();
	assert_eq!(doc.line(0), Some("first line"));
	assert_eq!(marks(&doc, 1), "s");
	doc.redo();
	assert_eq!(marks(&doc, 1), "m");

	doc.save();
	assert_eq!(marks(&doc, 1), "s");

	doc.undo();
	assert_eq!(marks(&doc, 1), "m");
	doc.redo();
	assert_eq!(marks(&doc, 1), "s");
}

#[test]
fn insert_line_flags() {
	let mut doc = document("0\n2");
	doc.insert_line(1, "1").unwrap();
	assert_eq!(doc.text(), "0\n1\n2");
	assert_eq!(marks(&doc, 3), ".m.");

	doc.undo();
	assert_eq!(doc.text(), "0\n2");
	assert_eq!(marks(&doc, 3), "...");
	doc.redo();
	assert_eq!(marks(&doc, 3), ".m.");

	doc.save();
	assert_eq!(marks(&doc, 3), ".s.");

	doc.undo();
	assert_eq!(marks(&doc, 3), "...");
	doc.redo();
	assert_eq!(marks(&doc, 3), ".s.");
}

#[test]
fn remove_line_flags() {
	let mut doc = document("0\n1\n2");
	doc.remove_line(1).unwrap();
	assert_eq!(doc.text(), "0\n2");
	assert_eq!(marks(&doc, 2), "..");

	doc.undo();
	assert_eq!(doc.text(), "0\n1\n2");
	assert_eq!(marks(&doc, 3), ".s.");
	doc.redo();
	assert_eq!(marks(&doc, 2), "..");

	doc.save();
	assert_eq!(marks(&doc, 2), "..");

	doc.undo();
	assert_eq!(marks(&doc, 3), ".m.");
	doc.redo();
	assert_eq!(marks(&doc, 2), "..");
}

#[test]
fn wrap_line_in_the_middle() {
	for new_line in [false, true] {
		let mut doc = document("aaaa\nbbbb\ncccc");
		doc.edit_wrap_line(1, 2, new_line).unwrap();
		assert_eq!(marks(&doc, 3), ".mm", "new_line = {new_line}");

		doc.undo();
		assert_eq!(doc.text(), "aaaa\nbbbb\ncccc");
		assert_eq!(marks(&doc, 2), ".s", "new_line = {new_line}");
		doc.redo();
		assert_eq!(marks(&doc, 3), ".mm", "new_line = {new_line}");

		doc.save();
		assert_eq!(marks(&doc, 3), ".ss", "new_line = {new_line}");

		doc.undo();
		assert_eq!(marks(&doc, 2), ".m", "new_line = {new_line}");
		doc.redo();
		assert_eq!(marks(&doc, 3), ".ss", "new_line = {new_line}");
	}
}

#[test]
fn wrap_line_at_end() {
	let mut doc = document("aaaa\nbbbb");
	doc.edit_wrap_line(0, 4, true).unwrap();
	assert_eq!(doc.text(), "aaaa\n\nbbbb");
	assert_eq!(marks(&doc, 3), ".m.");

	doc.undo();
	assert_eq!(marks(&doc, 3), "...");
	doc.redo();
	assert_eq!(marks(&doc, 3), ".m.");

	doc.save();
	assert_eq!(marks(&doc, 3), ".s.");

	doc.undo();
	assert_eq!(marks(&doc, 3), "...");
	doc.redo();
	assert_eq!(marks(&doc, 3), ".s.");
}

#[test]
fn wrap_line_at_start() {
	let mut doc = document("aaaa\nbbbb");
	doc.edit_wrap_line(0, 0, true).unwrap();
	assert_eq!(doc.text(), "\naaaa\nbbbb");
	assert_eq!(marks(&doc, 3), "m..");

	doc.undo();
	assert_eq!(marks(&doc, 3), "...");
	doc.redo();
	assert_eq!(marks(&doc, 3), "m..");

	doc.save();
	assert_eq!(marks(&doc, 3), "s..");

	doc.undo();
	assert_eq!(marks(&doc, 3), "...");
	doc.redo();
	assert_eq!(marks(&doc, 3), "s..");
}

#[test]
fn unwrap_line() {
	let mut doc = document("aaaa\nbbbb\ncccc");
	doc.edit_unwrap_line(0).unwrap();
	assert_eq!(doc.text(), "aaaabbbb\ncccc");
	assert_eq!(marks(&doc, 3), "m..");

	doc.undo();
	assert_eq!(doc.text(), "aaaa\nbbbb\ncccc");
	assert_eq!(marks(&doc, 3), "ss.");
	doc.redo();
	assert_eq!(marks(&doc, 3), "m..");

	doc.save();
	assert_eq!(marks(&doc, 3), "s..");

	doc.undo();
	assert_eq!(marks(&doc, 3), "mm.");
	doc.redo();
	assert_eq!(marks(&doc, 3), "s..");
}

#[test]
fn unwrap_onto_empty_line() {
	let mut doc = document("aaaa\n\nbbbb");
	doc.edit_unwrap_line(1).unwrap();
	assert_eq!(doc.text(), "aaaa\nbbbb");
	assert_eq!(marks(&doc, 3), "...");

	doc.undo();
	assert_eq!(marks(&doc, 3), ".s.");
	doc.redo();
	assert_eq!(marks(&doc, 3), "...");

	doc.save();
	assert_eq!(marks(&doc, 3), "...");

	doc.undo();
	assert_eq!(marks(&doc, 3), ".m.");
	doc.redo();
	assert_eq!(marks(&doc, 3), "...");
}

#[test]
fn unwrap_empty_line_up() {
	let mut doc = document("aaaa\n\nbbbb");
	doc.edit_unwrap_line(0).unwrap();
	assert_eq!(doc.text(), "aaaa\nbbbb");
	assert_eq!(marks(&doc, 3), "...");

	doc.undo();
	assert_eq!(marks(&doc, 3), ".s.");
	doc.redo();
	assert_eq!(marks(&doc, 3), "...");

	doc.save();
	assert_eq!(marks(&doc, 3), "...");

	doc.undo();
	assert_eq!(marks(&doc, 3), ".m.");
	doc.redo();
	assert_eq!(marks(&doc, 3), "...");
}

#[test]
fn touched_line_navigation() {
	let mut doc = document("0\n1\n2");
	doc.insert_text(Cursor::new(0, 1), "-").unwrap();
	doc.insert_text(Cursor::new(2, 1), "-").unwrap();

	assert_eq!(doc.find_touched_line(0, true), Some(0));
	assert_eq!(doc.find_touched_line(1, true), Some(2));
	assert_eq!(doc.find_touched_line(2, true), Some(2));
	assert_eq!(doc.find_touched_line(3, true), None);

	assert_eq!(doc.find_touched_line(0, false), Some(0));
	assert_eq!(doc.find_touched_line(1, false), Some(0));
	assert_eq!(doc.find_touched_line(2, false), Some(2));
	assert_eq!(doc.find_touched_line(3, false), None);
}

#[test]
fn multi_line_insert_marks_every_new_line() {
	let mut doc = document("ab");
	let end = doc.insert_text(Cursor::new(0, 1), "x\ny\nz").unwrap();
	assert_eq!(end, Cursor::new(2, 1));
	assert_eq!(doc.text(), "ax\ny\nzb");
	assert_eq!(marks(&doc, 3), "mmm");
	assert_eq!(doc.undo_count(), 1);

	doc.undo();
	assert_eq!(doc.text(), "ab");
	assert_eq!(marks(&doc, 1), "s");
	assert!(!doc.is_modified());
}
