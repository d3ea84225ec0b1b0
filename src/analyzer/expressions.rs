//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

use super::Analyzer;

use crate::actions::*;
use crate::error::Error;
use crate::generator::{ASSIGN, CALL, PARAM};
use crate::scoper::Symbol;
use crate::value_type::{BinaryOp, ValueType};

impl Analyzer
{
	pub(super) fn analyze_binary(
		&mut self,
		op: BinaryOp,
		left: ExprResult,
		right: ExprResult,
	) -> ExprResult
	{
		let value_type =
			ValueType::binary_result(op, &left.value_type, &right.value_type);
		let place = self.generator.new_temporary();
		self.generator.emit(
			op.symbol(),
			Some(&left.place),
			Some(&right.place),
			&place,
		);
		ExprResult { value_type, place }
	}

	pub(super) fn analyze_unary(
		&mut self,
		op: UnaryOp,
		operand: ExprResult,
	) -> ExprResult
	{
		let (operator, value_type) = match op
		{
			UnaryOp::Negate => ("minus", operand.value_type.negated()),
			UnaryOp::Not => ("!", ValueType::Bool),
		};
		let place = self.generator.new_temporary();
		self.generator.emit(operator, Some(&operand.place), None, &place);
		ExprResult { value_type, place }
	}

	pub(super) fn analyze_address_of(&mut self, name: Identifier)
		-> ExprResult
	{
		// Taking the address of an unknown name is not reported here; the
		// pointer it produces is simply a pointer to an unknown type.
		let pointee = match self.symbols.lookup(&name.name)
		{
			Ok(symbol) => symbol.value_type.clone(),
			Err(_) => ValueType::Error,
		};
		let place = self.generator.new_temporary();
		self.generator.emit("&", Some(&name.name), None, &place);
		ExprResult {
			value_type: ValueType::pointer_to(pointee),
			place,
		}
	}

	pub(super) fn analyze_dereference(&mut self, name: Identifier)
		-> ExprResult
	{
		let symbol = match self.lookup_variable(&name)
		{
			Some(symbol) => symbol,
			None => return ExprResult::error(),
		};
		match symbol.value_type.get_pointee_type()
		{
			Some(value_type) =>
			{
				let place = self.generator.new_temporary();
				self.generator.emit("*", Some(&name.name), None, &place);
				ExprResult { value_type, place }
			}
			None if symbol.value_type.is_error() => ExprResult::error(),
			None =>
			{
				self.report(Error::NotAPointer {
					name: name.name,
					value_type: symbol.value_type,
					location: name.location,
					location_of_declaration: symbol.location,
				});
				ExprResult::error()
			}
		}
	}

	pub(super) fn analyze_increment(
		&mut self,
		op: IncrementOp,
		name: Identifier,
	) -> ExprResult
	{
		let symbol = match self.lookup_variable(&name)
		{
			Some(symbol) => symbol,
			None => return ExprResult::error(),
		};
		let operator = match op
		{
			IncrementOp::PreIncrement | IncrementOp::PostIncrement => "+",
			IncrementOp::PreDecrement | IncrementOp::PostDecrement => "-",
		};
		match op
		{
			IncrementOp::PreIncrement | IncrementOp::PreDecrement =>
			{
				self.generator.emit(
					operator,
					Some(&name.name),
					Some("1"),
					&name.name,
				);
				ExprResult {
					value_type: symbol.value_type,
					place: name.name,
				}
			}
			IncrementOp::PostIncrement | IncrementOp::PostDecrement =>
			{
				let place = self.generator.new_temporary();
				self.generator.emit(ASSIGN, Some(&name.name), None, &place);
				self.generator.emit(
					operator,
					Some(&name.name),
					Some("1"),
					&name.name,
				);
				ExprResult {
					value_type: symbol.value_type,
					place,
				}
			}
		}
	}

	pub(super) fn analyze_identifier(&mut self, name: Identifier)
		-> ExprResult
	{
		match self.lookup_variable(&name)
		{
			Some(symbol) => ExprResult {
				value_type: symbol.value_type,
				place: name.name,
			},
			None => ExprResult::error(),
		}
	}

	pub(super) fn analyze_call(
		&mut self,
		name: Identifier,
		arguments: Vec<Argument>,
	) -> ExprResult
	{
		let function = match self.functions.get(&name.name)
		{
			Some(function) => function.clone(),
			None =>
			{
				self.report(Error::UndefinedFunction {
					name: name.name,
					location: name.location,
				});
				return ExprResult::error();
			}
		};

		if arguments.len() != function.parameters.len()
		{
			self.report(Error::ArgumentCountMismatch {
				name: name.name.clone(),
				expected: function.parameters.len(),
				found: arguments.len(),
				location: name.location.clone(),
				location_of_declaration: function.name.location.clone(),
			});
		}
		for (argument, parameter) in
			arguments.iter().zip(function.parameters.iter())
		{
			let argument_type = &argument.value.value_type;
			if !parameter.value_type.can_be_assigned_from(argument_type)
			{
				self.report(Error::ArgumentTypeMismatch {
					parameter_type: parameter.value_type.clone(),
					argument_type: argument_type.clone(),
					location: argument.location.clone(),
					location_of_declaration: parameter.name.location.clone(),
				});
			}
		}

		for argument in &arguments
		{
			self.generator
				.emit(PARAM, Some(&argument.value.place), None, &name.name);
		}
		let place = self.generator.new_temporary();
		let count = arguments.len().to_string();
		self.generator
			.emit(CALL, Some(&name.name), Some(&count), &place);
		ExprResult {
			value_type: function.return_type,
			place,
		}
	}

	/// Look up a variable, reporting it if it was never declared.
	fn lookup_variable(&mut self, name: &Identifier) -> Option<Symbol>
	{
		match self.symbols.lookup(&name.name)
		{
			Ok(symbol) => Some(symbol.clone()),
			Err(_) =>
			{
				self.report(Error::UndefinedVariable {
					name: name.name.clone(),
					location: name.location.clone(),
				});
				None
			}
		}
	}
}
