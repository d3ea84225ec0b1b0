//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! Declarations, assignments and function definitions.

use super::{Analyzer, Function};

use crate::actions::*;
use crate::error::Error;
use crate::generator::{ASSIGN, END_FUNCTION, FUNCTION, RETURN};
use crate::lexer::Location;
use crate::scoper;
use crate::scoper::Symbol;
use crate::value_type::ValueType;

impl Analyzer
{
	pub(super) fn declare_variable(
		&mut self,
		base_type: &ValueType,
		declarator: Declarator,
	)
	{
		let Declarator {
			name,
			pointer_depth,
			initializer,
		} = declarator;
		let value_type = base_type.clone().with_pointer_depth(pointer_depth);
		if !self.declare_symbol(&name, value_type.clone())
		{
			// The first declaration stays in effect, so an initializer
			// for the duplicate would not be assigning to this name.
			return;
		}

		if let Some(value) = initializer
		{
			if !value_type.can_be_assigned_from(&value.value_type)
			{
				self.report(Error::IncompatibleAssignment {
					name: name.name.clone(),
					target_type: value_type,
					source_type: value.value_type.clone(),
					location: name.location.clone(),
					location_of_declaration: name.location.clone(),
				});
			}
			self.generator
				.emit(ASSIGN, Some(&value.place), None, &name.name);
		}
	}

	fn declare_symbol(
		&mut self,
		name: &Identifier,
		value_type: ValueType,
	) -> bool
	{
		let symbol = Symbol {
			name: name.name.clone(),
			value_type,
			location: name.location.clone(),
		};
		match self.symbols.declare(symbol)
		{
			Ok(()) =>
			{
				log::debug!(
					"declared '{}' in scope at depth {}",
					name.name,
					self.symbols.depth()
				);
				true
			}
			Err(scoper::Error::DuplicateSymbol { previous }) =>
			{
				self.report(Error::DuplicateDeclarationVariable {
					name: name.name.clone(),
					location: name.location.clone(),
					previous: previous.location,
				});
				false
			}
			Err(_) => unreachable!(),
		}
	}

	pub(super) fn assign_variable(
		&mut self,
		target: Identifier,
		value: ExprResult,
		location: Location,
	)
	{
		let symbol = match self.symbols.lookup(&target.name)
		{
			Ok(symbol) => symbol.clone(),
			Err(_) =>
			{
				self.report(Error::UndefinedVariable {
					name: target.name,
					location: target.location,
				});
				return;
			}
		};

		if !symbol.value_type.can_be_assigned_from(&value.value_type)
		{
			self.report(Error::IncompatibleAssignment {
				name: target.name.clone(),
				target_type: symbol.value_type.clone(),
				source_type: value.value_type.clone(),
				location,
				location_of_declaration: symbol.location.clone(),
			});
		}
		// Even an incompatible assignment is kept in the generated code.
		self.generator
			.emit(ASSIGN, Some(&value.place), None, &target.name);
	}

	pub(super) fn declare_function(
		&mut self,
		return_type: ValueType,
		name: Identifier,
		parameters: Vec<Parameter>,
	)
	{
		let function = Function {
			name: name.clone(),
			return_type,
			parameters,
		};

		// Declare the function before its body, so that it can recurse.
		if let Some(previous) = self.functions.get(&name.name)
		{
			let previous = previous.name.location.clone();
			self.report(Error::DuplicateDeclarationFunction {
				name: name.name.clone(),
				location: name.location.clone(),
				previous,
			});
		}
		else
		{
			self.functions.insert(name.name.clone(), function.clone());
		}

		self.generator.emit(FUNCTION, None, None, &name.name);
		self.symbols.push_scope();
		log::debug!("entered function '{}'", name.name);
		for parameter in &function.parameters
		{
			self.declare_symbol(&parameter.name, parameter.value_type.clone());
		}
		self.current_function = Some(function);
	}

	pub(super) fn finish_function(
		&mut self,
		location: &Location,
	) -> Result<(), Error>
	{
		self.pop_scope(location)?;
		if let Some(function) = self.current_function.take()
		{
			self.generator
				.emit(END_FUNCTION, None, None, &function.name.name);
		}
		Ok(())
	}

	pub(super) fn analyze_return(
		&mut self,
		value: Option<ExprResult>,
		location: Location,
	)
	{
		let function = match &self.current_function
		{
			Some(function) => function.clone(),
			None =>
			{
				self.report(Error::MisplacedReturn { location });
				return;
			}
		};
		let declared_type = function.return_type;
		let function_name = function.name.name;
		let location_of_declaration = function.name.location;

		match value
		{
			Some(value) =>
			{
				let is_compatible = match declared_type
				{
					ValueType::Void => value.value_type.is_error(),
					_ => declared_type.can_be_assigned_from(&value.value_type),
				};
				if !is_compatible
				{
					self.report(Error::ConflictingReturnValue {
						declared_type,
						inferred_type: value.value_type.clone(),
						location_of_return_value: location,
						location_of_declaration,
					});
				}
				self.generator.emit(
					RETURN,
					Some(&value.place),
					None,
					&function_name,
				);
			}
			None =>
			{
				match declared_type
				{
					ValueType::Void | ValueType::Error => (),
					declared_type =>
					{
						self.report(Error::MissingReturnValue {
							declared_type,
							location,
							location_of_declaration,
						});
					}
				}
				self.generator.emit(RETURN, None, None, &function_name);
			}
		}
	}
}
