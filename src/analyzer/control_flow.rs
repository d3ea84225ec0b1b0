//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! Jump code for branches, loops and switches. No control flow graph is
//! built: every construct is lowered to labels and jumps in program order.

use super::{Analyzer, JumpTargets};

use crate::actions::*;
use crate::error::Error;
use crate::generator::IF_FALSE;
use crate::lexer::Location;

impl Analyzer
{
	pub(super) fn analyze_begin_if(&mut self, condition: ExprResult) -> Branch
	{
		let else_label = self.generator.new_label();
		self.generator
			.emit(IF_FALSE, Some(&condition.place), None, &else_label);
		Branch {
			else_label,
			end_label: None,
		}
	}

	pub(super) fn analyze_begin_else(&mut self, branch: &mut Branch)
	{
		let end_label = self.generator.new_label();
		self.generator.emit_goto(&end_label);
		self.generator.emit_label(&branch.else_label);
		branch.end_label = Some(end_label);
	}

	pub(super) fn analyze_end_if(&mut self, branch: Branch)
	{
		match branch.end_label
		{
			Some(end_label) => self.generator.emit_label(&end_label),
			None => self.generator.emit_label(&branch.else_label),
		}
	}

	pub(super) fn analyze_begin_while(&mut self) -> Loop
	{
		let top_label = self.generator.new_label();
		let end_label = self.generator.new_label();
		self.generator.emit_label(&top_label);
		self.jump_targets.push(JumpTargets {
			break_label: end_label.clone(),
			continue_label: Some(top_label.clone()),
		});
		Loop {
			top_label,
			end_label,
		}
	}

	pub(super) fn analyze_while_condition(
		&mut self,
		while_loop: &Loop,
		condition: ExprResult,
	)
	{
		self.generator.emit(
			IF_FALSE,
			Some(&condition.place),
			None,
			&while_loop.end_label,
		);
	}

	pub(super) fn analyze_end_while(&mut self, while_loop: Loop)
	{
		self.generator.emit_goto(&while_loop.top_label);
		self.generator.emit_label(&while_loop.end_label);
		self.jump_targets.pop();
	}

	pub(super) fn analyze_begin_for(&mut self) -> ForLoop
	{
		let top_label = self.generator.new_label();
		let step_label = self.generator.new_label();
		let body_label = self.generator.new_label();
		let end_label = self.generator.new_label();
		self.generator.emit_label(&top_label);
		self.jump_targets.push(JumpTargets {
			break_label: end_label.clone(),
			continue_label: Some(step_label.clone()),
		});
		ForLoop {
			top_label,
			step_label,
			body_label,
			end_label,
		}
	}

	/// The update clause is parsed before the body but runs after it, so it
	/// is placed behind its own label and jumped over on the way in.
	pub(super) fn analyze_for_condition(
		&mut self,
		for_loop: &ForLoop,
		condition: Option<ExprResult>,
	)
	{
		if let Some(condition) = condition
		{
			self.generator.emit(
				IF_FALSE,
				Some(&condition.place),
				None,
				&for_loop.end_label,
			);
		}
		self.generator.emit_goto(&for_loop.body_label);
		self.generator.emit_label(&for_loop.step_label);
	}

	pub(super) fn analyze_for_step(&mut self, for_loop: &ForLoop)
	{
		self.generator.emit_goto(&for_loop.top_label);
		self.generator.emit_label(&for_loop.body_label);
	}

	pub(super) fn analyze_end_for(&mut self, for_loop: ForLoop)
	{
		self.generator.emit_goto(&for_loop.step_label);
		self.generator.emit_label(&for_loop.end_label);
		self.jump_targets.pop();
	}

	pub(super) fn analyze_begin_switch(&mut self, scrutinee: ExprResult)
		-> Switch
	{
		let end_label = self.generator.new_label();
		// A `continue` inside a switch belongs to the enclosing loop.
		let continue_label = self
			.jump_targets
			.last()
			.and_then(|targets| targets.continue_label.clone());
		self.jump_targets.push(JumpTargets {
			break_label: end_label.clone(),
			continue_label,
		});
		// Statements before the first label are unreachable.
		let first_test_label = self.generator.new_label();
		self.generator.emit_goto(&first_test_label);
		Switch {
			scrutinee,
			end_label,
			pending_test_label: first_test_label,
			default_label: None,
			has_body: false,
		}
	}

	pub(super) fn analyze_case_label(
		&mut self,
		switch: &mut Switch,
		value: ExprResult,
	)
	{
		let body_label = self.generator.new_label();
		if switch.has_body
		{
			// Fall through into this case without running its test.
			self.generator.emit_goto(&body_label);
		}
		self.generator.emit_label(&switch.pending_test_label);
		let is_equal = self.generator.new_temporary();
		self.generator.emit(
			"==",
			Some(&switch.scrutinee.place),
			Some(&value.place),
			&is_equal,
		);
		let next_label = self.generator.new_label();
		self.generator
			.emit(IF_FALSE, Some(&is_equal), None, &next_label);
		self.generator.emit_label(&body_label);
		switch.pending_test_label = next_label;
		switch.has_body = true;
	}

	/// The default body is placed inline so that cases fall through into
	/// and out of it; it is entered from the test chain only after every
	/// case test has failed.
	pub(super) fn analyze_default_label(&mut self, switch: &mut Switch)
	{
		let default_label = self.generator.new_label();
		self.generator.emit_label(&default_label);
		switch.default_label = Some(default_label);
		switch.has_body = true;
	}

	pub(super) fn analyze_end_switch(&mut self, switch: Switch)
	{
		match &switch.default_label
		{
			Some(default_label) =>
			{
				self.generator.emit_goto(&switch.end_label);
				self.generator.emit_label(&switch.pending_test_label);
				self.generator.emit_goto(default_label);
			}
			None => self.generator.emit_label(&switch.pending_test_label),
		}
		self.generator.emit_label(&switch.end_label);
		self.jump_targets.pop();
	}

	pub(super) fn analyze_break(&mut self, location: Location)
	{
		match self.jump_targets.last()
		{
			Some(targets) =>
			{
				let label = targets.break_label.clone();
				self.generator.emit_goto(&label);
			}
			None => self.report(Error::MisplacedBreak { location }),
		}
	}

	pub(super) fn analyze_continue(&mut self, location: Location)
	{
		let label = self
			.jump_targets
			.last()
			.and_then(|targets| targets.continue_label.clone());
		match label
		{
			Some(label) => self.generator.emit_goto(&label),
			None => self.report(Error::MisplacedContinue { location }),
		}
	}
}
