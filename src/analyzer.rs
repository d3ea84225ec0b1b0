//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! The analyzer implements the semantic actions. It owns all state of a
//! single run: the scope stack, the generated code and the diagnostics.

mod control_flow;
mod declarations;
mod expressions;

use crate::actions::*;
use crate::error::Error;
use crate::generator::{Generator, Quadruple};
use crate::lexer::Location;
use crate::scoper::ScopeStack;
use crate::value_type::{BinaryOp, ValueType};

use std::collections::HashMap;

/// Everything a finished run produced.
#[derive(Debug)]
pub struct Analysis
{
	pub instructions: Vec<Quadruple>,
	pub diagnostics: crate::error::Errors,
	/// The scope stack as it was left, which is just the global scope.
	pub symbols: ScopeStack,
}

impl Analysis
{
	pub fn is_clean(&self) -> bool
	{
		self.diagnostics.is_empty()
	}
}

#[derive(Debug, Default)]
pub struct Analyzer
{
	symbols: ScopeStack,
	generator: Generator,
	functions: HashMap<String, Function>,
	current_function: Option<Function>,
	jump_targets: Vec<JumpTargets>,
	diagnostics: Vec<Error>,
}

#[derive(Debug, Clone)]
struct Function
{
	name: Identifier,
	return_type: ValueType,
	parameters: Vec<Parameter>,
}

/// Where `break` and `continue` jump to from inside a loop or switch.
#[derive(Debug)]
struct JumpTargets
{
	break_label: String,
	continue_label: Option<String>,
}

impl Analyzer
{
	pub fn new() -> Analyzer
	{
		Analyzer::default()
	}

	/// Prepare for a new run, forgetting everything about the previous one.
	pub fn reset(&mut self)
	{
		self.symbols.reset();
		self.generator.reset();
		self.functions.clear();
		self.current_function = None;
		self.jump_targets.clear();
		self.diagnostics.clear();
	}

	pub fn symbols(&self) -> &ScopeStack
	{
		&self.symbols
	}

	pub fn generator(&self) -> &Generator
	{
		&self.generator
	}

	pub fn diagnostics(&self) -> &[Error]
	{
		&self.diagnostics
	}

	pub fn take_diagnostics(&mut self) -> Vec<Error>
	{
		std::mem::take(&mut self.diagnostics)
	}

	pub fn finish(self) -> Analysis
	{
		Analysis {
			instructions: self.generator.into_instructions(),
			diagnostics: self.diagnostics.into(),
			symbols: self.symbols,
		}
	}

	fn report(&mut self, error: Error)
	{
		log::debug!("{}", error);
		self.diagnostics.push(error);
	}

	fn pop_scope(&mut self, location: &Location) -> Result<(), Error>
	{
		match self.symbols.pop_scope()
		{
			Ok(()) =>
			{
				log::debug!("exited scope, depth {}", self.symbols.depth());
				Ok(())
			}
			Err(_underflow) => Err(Error::ScopeUnderflow {
				location: location.clone(),
			}),
		}
	}
}

impl SemanticActions for Analyzer
{
	fn diagnose(&mut self, error: Error)
	{
		self.report(error);
	}

	fn enter_block(&mut self, _location: &Location)
	{
		self.symbols.push_scope();
		log::debug!("entered scope, depth {}", self.symbols.depth());
	}

	fn exit_block(&mut self, location: &Location) -> Result<(), Error>
	{
		self.pop_scope(location)
	}

	fn declare(&mut self, base_type: &ValueType, declarator: Declarator)
	{
		self.declare_variable(base_type, declarator)
	}

	fn assign(
		&mut self,
		target: Identifier,
		value: ExprResult,
		location: Location,
	)
	{
		self.assign_variable(target, value, location)
	}

	fn binary(
		&mut self,
		op: BinaryOp,
		left: ExprResult,
		right: ExprResult,
	) -> ExprResult
	{
		self.analyze_binary(op, left, right)
	}

	fn unary(&mut self, op: UnaryOp, operand: ExprResult) -> ExprResult
	{
		self.analyze_unary(op, operand)
	}

	fn address_of(&mut self, name: Identifier) -> ExprResult
	{
		self.analyze_address_of(name)
	}

	fn dereference(&mut self, name: Identifier) -> ExprResult
	{
		self.analyze_dereference(name)
	}

	fn increment(&mut self, op: IncrementOp, name: Identifier) -> ExprResult
	{
		self.analyze_increment(op, name)
	}

	fn identifier(&mut self, name: Identifier) -> ExprResult
	{
		self.analyze_identifier(name)
	}

	fn literal(&mut self, literal: Literal) -> ExprResult
	{
		ExprResult {
			value_type: literal.value_type(),
			place: literal.text(),
		}
	}

	fn call(&mut self, name: Identifier, arguments: Vec<Argument>)
		-> ExprResult
	{
		self.analyze_call(name, arguments)
	}

	fn enter_function(
		&mut self,
		return_type: ValueType,
		name: Identifier,
		parameters: Vec<Parameter>,
	)
	{
		self.declare_function(return_type, name, parameters)
	}

	fn exit_function(&mut self, location: &Location) -> Result<(), Error>
	{
		self.finish_function(location)
	}

	fn return_statement(&mut self, value: Option<ExprResult>, location: Location)
	{
		self.analyze_return(value, location)
	}

	fn begin_if(&mut self, condition: ExprResult) -> Branch
	{
		self.analyze_begin_if(condition)
	}

	fn begin_else(&mut self, branch: &mut Branch)
	{
		self.analyze_begin_else(branch)
	}

	fn end_if(&mut self, branch: Branch)
	{
		self.analyze_end_if(branch)
	}

	fn begin_while(&mut self) -> Loop
	{
		self.analyze_begin_while()
	}

	fn while_condition(&mut self, while_loop: &Loop, condition: ExprResult)
	{
		self.analyze_while_condition(while_loop, condition)
	}

	fn end_while(&mut self, while_loop: Loop)
	{
		self.analyze_end_while(while_loop)
	}

	fn begin_for(&mut self) -> ForLoop
	{
		self.analyze_begin_for()
	}

	fn for_condition(&mut self, for_loop: &ForLoop, condition: Option<ExprResult>)
	{
		self.analyze_for_condition(for_loop, condition)
	}

	fn for_step(&mut self, for_loop: &ForLoop)
	{
		self.analyze_for_step(for_loop)
	}

	fn end_for(&mut self, for_loop: ForLoop)
	{
		self.analyze_end_for(for_loop)
	}

	fn begin_switch(&mut self, scrutinee: ExprResult) -> Switch
	{
		self.analyze_begin_switch(scrutinee)
	}

	fn case_label(&mut self, switch: &mut Switch, value: ExprResult)
	{
		self.analyze_case_label(switch, value)
	}

	fn default_label(&mut self, switch: &mut Switch)
	{
		self.analyze_default_label(switch)
	}

	fn end_switch(&mut self, switch: Switch)
	{
		self.analyze_end_switch(switch)
	}

	fn break_statement(&mut self, location: Location)
	{
		self.analyze_break(location)
	}

	fn continue_statement(&mut self, location: Location)
	{
		self.analyze_continue(location)
	}
}
