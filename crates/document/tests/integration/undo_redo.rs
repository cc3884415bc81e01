use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scribe_document::Document;
use scribe_primitives::{Cursor, EditError, LineFlags, Range, SecondaryCursor};
use scribe_undo::{NeverMerge, UndoConfig, UndoEvent};

use crate::common::{document, document_with_view};

#[test]
fn typing_merges_until_the_cursor_moves() {
	let mut doc = document_with_view("");
	doc.insert_text(Cursor::new(0, 0), "a").unwrap();
	doc.insert_text(Cursor::new(0, 1), "b").unwrap();
	assert_eq!(doc.undo_count(), 1);

	doc.set_cursor_position(Cursor::new(0, 0)).unwrap();
	doc.insert_text(Cursor::new(0, 0), "c").unwrap();
	assert_eq!(doc.undo_count(), 2);
	assert_eq!(doc.text(), "cab");

	doc.undo();
	assert_eq!(doc.text(), "ab");
	doc.undo();
	assert_eq!(doc.text(), "");
	assert!(!doc.is_modified());
}

#[test]
fn never_merge_keeps_every_keystroke() {
	let mut doc = document("");
	doc.undo_manager_mut().set_merge_policy(NeverMerge);
	for (column, ch) in ["a", "b", "c"].into_iter().enumerate() {
		doc.insert_text(Cursor::new(0, column), ch).unwrap();
	}
	assert_eq!(doc.undo_count(), 3);
}

#[test]
fn complex_merge_joins_mixed_steps() {
	let config = UndoConfig::from_toml_str("allow_complex_merge = true").unwrap();
	let mut doc = document("ab").with_config(&config);
	doc.insert_text(Cursor::new(0, 2), "c").unwrap();
	doc.edit_wrap_line(0, 1, true).unwrap();
	assert_eq!(doc.undo_count(), 1);

	doc.undo();
	assert_eq!(doc.text(), "ab");
}

#[test]
fn save_stops_merging() {
	let mut doc = document("");
	doc.insert_text(Cursor::new(0, 0), "a").unwrap();
	doc.save();
	doc.insert_text(Cursor::new(0, 1), "b").unwrap();
	assert_eq!(doc.undo_count(), 2);

	doc.undo();
	assert_eq!(doc.text(), "a");
	assert!(!doc.is_modified());
	doc.undo();
	assert!(doc.is_modified());
	doc.redo();
	assert!(!doc.is_modified());
}

#[test]
fn marking_saved_stops_merging() {
	let mut doc = document("");
	doc.insert_text(Cursor::new(0, 0), "a").unwrap();
	doc.set_modified(false);
	doc.insert_text(Cursor::new(0, 1), "b").unwrap();
	assert_eq!(doc.undo_count(), 2);

	doc.undo();
	assert_eq!(doc.text(), "a");
	assert!(!doc.is_modified());
	doc.redo();
	assert_eq!(doc.text(), "ab");
	assert!(doc.is_modified());
}

#[test]
fn new_edit_discards_redo() {
	let mut doc = document("x");
	doc.insert_text(Cursor::new(0, 1), "y").unwrap();
	doc.undo();
	assert_eq!(doc.redo_count(), 1);

	doc.insert_text(Cursor::new(0, 0), "z").unwrap();
	assert_eq!(doc.redo_count(), 0);
	doc.redo();
	assert_eq!(doc.text(), "zx");
}

#[test]
fn undo_restores_cursor_and_selection() {
	let mut doc = document_with_view("hello world");
	let selection = Range::new(Cursor::new(0, 0), Cursor::new(0, 5));
	doc.set_cursor_position(Cursor::new(0, 5)).unwrap();
	doc.set_selection(Some(selection)).unwrap();

	doc.remove_text(selection).unwrap();
	doc.set_selection(None).unwrap();
	assert_eq!(doc.text(), " world");
	assert_eq!(doc.cursor(), Some(Cursor::new(0, 0)));

	doc.undo();
	assert_eq!(doc.text(), "hello world");
	assert_eq!(doc.cursor(), Some(Cursor::new(0, 5)));
	assert_eq!(doc.view().unwrap().selection(), Some(selection));

	doc.redo();
	assert_eq!(doc.cursor(), Some(Cursor::new(0, 0)));
	assert_eq!(doc.view().unwrap().selection(), None);
}

#[test]
fn secondary_cursors_come_back_with_undo() {
	let mut doc = document_with_view("ab\ncd");
	let cursors = [SecondaryCursor::at(Cursor::new(1, 2))].into_iter().collect();
	doc.set_secondary_cursors(cursors);
	doc.insert_line(0, "new").unwrap();
	assert_eq!(
		doc.view().unwrap().secondary_cursors(),
		[SecondaryCursor::at(Cursor::new(2, 2))]
	);

	doc.undo();
	assert_eq!(
		doc.view().unwrap().secondary_cursors(),
		[SecondaryCursor::at(Cursor::new(1, 2))]
	);
}

#[test]
fn cursor_override_applies_to_the_last_step() {
	let mut doc = document_with_view("abc");
	doc.insert_text(Cursor::new(0, 3), "d").unwrap();
	doc.undo_manager_mut()
		.set_undo_redo_cursors_of_last_group(Cursor::new(0, 1), Cursor::new(0, 2));
	assert_eq!(doc.undo_manager().last_redo_cursor(), Some(Cursor::new(0, 2)));

	doc.undo();
	assert_eq!(doc.cursor(), Some(Cursor::new(0, 1)));
	doc.redo();
	assert_eq!(doc.cursor(), Some(Cursor::new(0, 2)));
}

#[test]
fn undo_without_a_view_skips_cursor_restore() {
	let mut doc = document_with_view("abc");
	doc.set_cursor_position(Cursor::new(0, 3)).unwrap();
	doc.insert_text(Cursor::new(0, 3), "d").unwrap();
	doc.close_view();
	assert_eq!(doc.cursor(), None);

	doc.undo();
	assert_eq!(doc.text(), "abc");
	assert_eq!(doc.cursor(), None);

	doc.create_view();
	doc.redo();
	assert_eq!(doc.cursor(), Some(Cursor::new(0, 4)));
}

#[test]
fn nested_sessions_form_one_step() {
	let mut doc = document("one");
	doc.edit_start();
	doc.insert_text(Cursor::new(0, 3), "\ntwo").unwrap();
	doc.edit_start();
	doc.edit_remove_text(0, 0, 1).unwrap();
	doc.edit_end();
	assert!(doc.is_editing());
	doc.edit_end();
	assert!(!doc.is_editing());

	assert_eq!(doc.text(), "ne\ntwo");
	assert_eq!(doc.undo_count(), 1);
	assert!(doc.is_modified());

	doc.undo();
	assert_eq!(doc.text(), "one");
}

#[test]
fn undo_inside_a_session_is_ignored() {
	let mut doc = document("a");
	doc.insert_text(Cursor::new(0, 1), "b").unwrap();
	doc.edit_start();
	doc.undo();
	doc.edit_end();
	assert_eq!(doc.text(), "ab");
	assert_eq!(doc.undo_count(), 1);
}

#[test]
fn set_text_is_one_step() {
	let mut doc = document("one\ntwo");
	doc.set_text("three\nfour\nfive").unwrap();
	assert_eq!(doc.text(), "three\nfour\nfive");
	assert_eq!(doc.undo_count(), 1);

	doc.undo();
	assert_eq!(doc.text(), "one\ntwo");
	doc.redo();
	assert_eq!(doc.text(), "three\nfour\nfive");
}

#[test]
fn invalid_positions_are_errors() {
	let mut doc = document("abc\nd");
	assert_eq!(
		doc.insert_text(Cursor::new(5, 0), "x"),
		Err(EditError::LineOutOfRange { line: 5, lines: 2 })
	);
	assert_eq!(
		doc.edit_remove_text(1, 0, 3),
		Err(EditError::ColumnOutOfRange {
			line: 1,
			column: 3,
			len: 1
		})
	);
	assert_eq!(
		doc.edit_insert_text(0, 0, "a\nb"),
		Err(EditError::LineBreak { line: 0 })
	);
	assert_eq!(doc.edit_unwrap_line(1), Err(EditError::NoNextLine { line: 1 }));
	assert_eq!(doc.undo_count(), 0);
	assert!(!doc.is_modified());
}

#[test]
fn oversized_removal_is_an_error() {
	let mut doc = document("abc");
	assert_eq!(
		doc.edit_remove_text(0, 1, usize::MAX),
		Err(EditError::ColumnOutOfRange {
			line: 0,
			column: 1,
			len: 3
		})
	);
	assert_eq!(doc.text(), "abc");
	assert_eq!(doc.undo_count(), 0);
	assert!(!doc.is_modified());
}

#[test]
fn autowrap_hint_is_undoable() {
	let mut doc = document("a\nb");
	doc.edit_mark_line_autowrapped(1, true).unwrap();
	assert!(doc.is_line_autowrapped(1));

	doc.undo();
	assert!(!doc.is_line_autowrapped(1));
	doc.redo();
	assert!(doc.is_line_autowrapped(1));
}

#[test]
fn input_method_composition_is_not_recorded() {
	let mut doc = document("ab");
	doc.input_method_start();
	assert!(!doc.undo_manager().is_active());
	doc.insert_text(Cursor::new(0, 2), "c").unwrap();
	doc.input_method_end();

	assert!(doc.undo_manager().is_active());
	assert_eq!(doc.text(), "abc");
	assert_eq!(doc.undo_count(), 0);
	assert!(doc.is_modified());
}

#[test]
fn listeners_see_the_undo_lifecycle() {
	let mut doc = document("x");
	let events = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&events);
	let id = doc.subscribe(move |event| sink.borrow_mut().push(event));

	doc.insert_text(Cursor::new(0, 1), "y").unwrap();
	doc.undo();
	assert_eq!(
		*events.borrow(),
		[
			UndoEvent::Changed,
			UndoEvent::UndoStarted,
			UndoEvent::ActiveChanged(false),
			UndoEvent::ActiveChanged(true),
			UndoEvent::UndoFinished,
			UndoEvent::Changed,
		]
	);

	assert!(doc.unsubscribe(id));
	doc.redo();
	assert_eq!(events.borrow().len(), 6);
}

#[derive(Debug, Clone)]
enum Op {
	Insert(usize, usize, String),
	Remove(usize, usize, usize, usize),
	InsertLine(usize, String),
	RemoveLine(usize),
	Wrap(usize, usize, bool),
	Unwrap(usize),
}

fn op() -> impl Strategy<Value = Op> {
	let n = any::<usize>;
	prop_oneof![
		(n(), n(), "[a-c\n]{0,4}").prop_map(|(l, c, t)| Op::Insert(l, c, t)),
		(n(), n(), n(), n()).prop_map(|(a, b, c, d)| Op::Remove(a, b, c, d)),
		(n(), "[x-z]{0,3}").prop_map(|(l, t)| Op::InsertLine(l, t)),
		n().prop_map(Op::RemoveLine),
		(n(), n(), any::<bool>()).prop_map(|(l, c, nl)| Op::Wrap(l, c, nl)),
		n().prop_map(Op::Unwrap),
	]
}

/// A user-level action interleaving edits with saves and history moves.
#[derive(Debug, Clone)]
enum Step {
	Type(usize, usize, String),
	Wrap(usize, usize),
	Move(usize, usize),
	Save,
	MarkSaved,
	Undo,
	Redo,
}

fn step() -> impl Strategy<Value = Step> {
	let n = any::<usize>;
	prop_oneof![
		3 => (n(), n(), "[a-c]{1,2}").prop_map(|(l, c, t)| Step::Type(l, c, t)),
		1 => (n(), n()).prop_map(|(l, c)| Step::Wrap(l, c)),
		1 => (n(), n()).prop_map(|(l, c)| Step::Move(l, c)),
		1 => Just(Step::Save),
		1 => Just(Step::MarkSaved),
		2 => Just(Step::Undo),
		2 => Just(Step::Redo),
	]
}

fn flags(doc: &Document) -> Vec<Option<LineFlags>> {
	(0..doc.line_count()).map(|line| doc.line_flags(line)).collect()
}

fn len(doc: &Document, line: usize) -> usize {
	doc.line_len(line).unwrap_or(0)
}

/// Applies `op` with its numbers folded into valid positions.
fn apply(doc: &mut Document, op: &Op) {
	let lines = doc.line_count();
	match op {
		Op::Insert(l, c, text) => {
			let line = l % lines;
			let column = c % (len(doc, line) + 1);
			doc.insert_text(Cursor::new(line, column), text).unwrap();
		}
		Op::Remove(l, c, l2, c2) => {
			let start_line = l % lines;
			let start_col = c % (len(doc, start_line) + 1);
			let end_line = start_line + l2 % (lines - start_line);
			let end_col = if end_line == start_line {
				start_col + c2 % (len(doc, end_line) - start_col + 1)
			} else {
				c2 % (len(doc, end_line) + 1)
			};
			let range = Range::new(
				Cursor::new(start_line, start_col),
				Cursor::new(end_line, end_col),
			);
			doc.remove_text(range).unwrap();
		}
		Op::InsertLine(l, text) => doc.insert_line(l % (lines + 1), text).unwrap(),
		Op::RemoveLine(l) => doc.remove_line(l % lines).unwrap(),
		Op::Wrap(l, c, new_line) => {
			let line = l % lines;
			let column = c % (len(doc, line) + 1);
			doc.edit_wrap_line(line, column, *new_line).unwrap();
		}
		Op::Unwrap(l) => {
			if lines > 1 {
				doc.edit_unwrap_line(l % (lines - 1)).unwrap();
			}
		}
	}
}

proptest! {
	#[test]
	fn undo_all_restores_the_original(
		initial in "[a-c\n]{0,12}",
		ops in prop::collection::vec(op(), 1..16),
		never_merge in any::<bool>(),
	) {
		let mut doc = document(&initial);
		if never_merge {
			doc.undo_manager_mut().set_merge_policy(NeverMerge);
		}
		for op in &ops {
			apply(&mut doc, op);
		}
		let edited = doc.text();
		let edited_flags = flags(&doc);
		let steps = doc.undo_count();

		while doc.undo_manager().can_undo() {
			doc.undo();
		}
		prop_assert_eq!(doc.text(), initial);
		prop_assert!(!doc.is_modified());
		prop_assert_eq!(doc.redo_count(), steps);

		while doc.undo_manager().can_redo() {
			doc.redo();
		}
		prop_assert_eq!(doc.text(), edited);
		prop_assert_eq!(flags(&doc), edited_flags);
		prop_assert_eq!(doc.undo_count(), steps);
	}

	#[test]
	fn unmodified_means_last_saved_text(
		initial in "[a-c\n]{0,8}",
		steps in prop::collection::vec(step(), 1..24),
	) {
		let mut doc = document_with_view(&initial);
		let mut last_saved = initial;
		for step in &steps {
			match step {
				Step::Type(l, c, text) => {
					let line = l % doc.line_count();
					let column = c % (len(&doc, line) + 1);
					doc.insert_text(Cursor::new(line, column), text).unwrap();
				}
				Step::Wrap(l, c) => {
					let line = l % doc.line_count();
					let column = c % (len(&doc, line) + 1);
					doc.edit_wrap_line(line, column, true).unwrap();
				}
				Step::Move(l, c) => {
					let line = l % doc.line_count();
					let column = c % (len(&doc, line) + 1);
					doc.set_cursor_position(Cursor::new(line, column)).unwrap();
				}
				Step::Save => last_saved = doc.save(),
				Step::MarkSaved => {
					doc.set_modified(false);
					last_saved = doc.text();
				}
				Step::Undo => doc.undo(),
				Step::Redo => doc.redo(),
			}
			if !doc.is_modified() {
				prop_assert_eq!(doc.text(), last_saved.clone(), "after {:?}", step);
			}
		}
	}
}
