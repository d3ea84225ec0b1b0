//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! The interface between a parser and the semantic analyzer.
//!
//! A parser calls exactly one of these handlers each time it reduces a
//! grammar production, in the order the reductions happen. Attributes
//! synthesized by earlier handlers are passed back in as arguments.
//! Apart from closing scopes, handlers never fail: problems are recorded
//! as diagnostics and an `Error`-typed result is synthesized instead.

use crate::error::Error;
use crate::lexer::{escape, Location};
use crate::value_type::{BinaryOp, ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier
{
	pub name: String,
	pub location: Location,
}

/// The attribute synthesized by every expression production.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprResult
{
	pub value_type: ValueType,
	/// A temporary, the text of a literal or the name of a variable.
	pub place: String,
}

impl ExprResult
{
	/// The result of an expression that could not be analyzed.
	pub fn error() -> ExprResult
	{
		ExprResult {
			value_type: ValueType::Error,
			place: "ERROR".to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal
{
	Integer(String),
	Float(String),
	Char(char),
	String(String),
	Bool(bool),
}

impl Literal
{
	pub fn value_type(&self) -> ValueType
	{
		match self
		{
			Literal::Integer(_) => ValueType::Int,
			Literal::Float(_) => ValueType::Float,
			Literal::Char(_) => ValueType::Char,
			Literal::String(_) => ValueType::pointer_to(ValueType::Char),
			Literal::Bool(_) => ValueType::Bool,
		}
	}

	/// How the literal appears as an operand in three-address code.
	pub fn text(&self) -> String
	{
		match self
		{
			Literal::Integer(text) => text.clone(),
			Literal::Float(text) => text.clone(),
			Literal::Char(value) => format!("'{}'", escape(*value, '\'')),
			Literal::String(value) =>
			{
				let body: String = value.chars().map(|x| escape(x, '"')).collect();
				format!("\"{}\"", body)
			}
			Literal::Bool(value) => value.to_string(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp
{
	Negate,
	Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementOp
{
	PreIncrement,
	PreDecrement,
	PostIncrement,
	PostDecrement,
}

/// One name in a declaration such as `int p, *q, r = 100;`.
#[derive(Debug, Clone)]
pub struct Declarator
{
	pub name: Identifier,
	pub pointer_depth: usize,
	pub initializer: Option<ExprResult>,
}

#[derive(Debug, Clone)]
pub struct Parameter
{
	pub name: Identifier,
	pub value_type: ValueType,
}

#[derive(Debug, Clone)]
pub struct Argument
{
	pub value: ExprResult,
	pub location: Location,
}

/// Labels of an `if` statement that is being parsed.
#[derive(Debug)]
pub struct Branch
{
	pub else_label: String,
	pub end_label: Option<String>,
}

/// Labels of a `while` loop that is being parsed.
#[derive(Debug)]
pub struct Loop
{
	pub top_label: String,
	pub end_label: String,
}

/// Labels of a `for` loop that is being parsed.
#[derive(Debug)]
pub struct ForLoop
{
	pub top_label: String,
	pub step_label: String,
	pub body_label: String,
	pub end_label: String,
}

/// State of a `switch` statement that is being parsed.
#[derive(Debug)]
pub struct Switch
{
	pub scrutinee: ExprResult,
	pub end_label: String,
	/// Where control goes when the most recent case test fails.
	pub pending_test_label: String,
	pub default_label: Option<String>,
	pub has_body: bool,
}

pub trait SemanticActions
{
	/// Record a diagnostic raised before analysis, such as a lexical error.
	fn diagnose(&mut self, error: Error);

	fn enter_block(&mut self, location: &Location);

	/// Closing a block that was never opened is a bug in the caller.
	fn exit_block(&mut self, location: &Location) -> Result<(), Error>;

	fn declare(&mut self, base_type: &ValueType, declarator: Declarator);

	fn assign(
		&mut self,
		target: Identifier,
		value: ExprResult,
		location: Location,
	);

	fn binary(
		&mut self,
		op: BinaryOp,
		left: ExprResult,
		right: ExprResult,
	) -> ExprResult;

	fn unary(&mut self, op: UnaryOp, operand: ExprResult) -> ExprResult;

	fn address_of(&mut self, name: Identifier) -> ExprResult;

	fn dereference(&mut self, name: Identifier) -> ExprResult;

	fn increment(&mut self, op: IncrementOp, name: Identifier) -> ExprResult;

	fn identifier(&mut self, name: Identifier) -> ExprResult;

	fn literal(&mut self, literal: Literal) -> ExprResult;

	fn call(&mut self, name: Identifier, arguments: Vec<Argument>)
		-> ExprResult;

	/// An expression evaluated only for its side effects.
	fn expression_statement(&mut self, _value: ExprResult)
	{
	}

	fn enter_function(
		&mut self,
		return_type: ValueType,
		name: Identifier,
		parameters: Vec<Parameter>,
	);

	fn exit_function(&mut self, location: &Location) -> Result<(), Error>;

	fn return_statement(&mut self, value: Option<ExprResult>, location: Location);

	fn begin_if(&mut self, condition: ExprResult) -> Branch;

	fn begin_else(&mut self, branch: &mut Branch);

	fn end_if(&mut self, branch: Branch);

	fn begin_while(&mut self) -> Loop;

	fn while_condition(&mut self, while_loop: &Loop, condition: ExprResult);

	fn end_while(&mut self, while_loop: Loop);

	fn begin_for(&mut self) -> ForLoop;

	fn for_condition(&mut self, for_loop: &ForLoop, condition: Option<ExprResult>);

	fn for_step(&mut self, for_loop: &ForLoop);

	fn end_for(&mut self, for_loop: ForLoop);

	fn begin_switch(&mut self, scrutinee: ExprResult) -> Switch;

	fn case_label(&mut self, switch: &mut Switch, value: ExprResult);

	fn default_label(&mut self, switch: &mut Switch);

	fn end_switch(&mut self, switch: Switch);

	fn break_statement(&mut self, location: Location);

	fn continue_statement(&mut self, location: Location);
}
