//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! The scope stack maps identifiers to their declared types. The bottom of
//! the stack is the global scope, which is never popped.

use crate::lexer::Location;
use crate::value_type::ValueType;

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol
{
	pub name: String,
	pub value_type: ValueType,
	pub location: Location,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error
{
	#[error("symbol '{}' already declared in the current scope", .previous.name)]
	DuplicateSymbol
	{
		previous: Symbol
	},
	#[error("symbol '{name}' is not declared")]
	UndeclaredSymbol
	{
		name: String
	},
	#[error("cannot pop the global scope")]
	ScopeUnderflow,
}

#[derive(Debug, Default, Clone)]
pub struct Scope
{
	symbols: HashMap<String, Symbol>,
}

impl Scope
{
	pub fn get(&self, name: &str) -> Option<&Symbol>
	{
		self.symbols.get(name)
	}

	pub fn len(&self) -> usize
	{
		self.symbols.len()
	}

	pub fn is_empty(&self) -> bool
	{
		self.symbols.is_empty()
	}

	/// The symbols in this scope, sorted by their position in the source.
	pub fn symbols(&self) -> Vec<&Symbol>
	{
		let mut symbols: Vec<&Symbol> = self.symbols.values().collect();
		symbols.sort_by_key(|symbol| symbol.location.span.start);
		symbols
	}
}

#[derive(Debug, Clone)]
pub struct ScopeStack
{
	scopes: Vec<Scope>,
}

impl Default for ScopeStack
{
	fn default() -> ScopeStack
	{
		ScopeStack::new()
	}
}

impl ScopeStack
{
	pub fn new() -> ScopeStack
	{
		ScopeStack {
			scopes: vec![Scope::default()],
		}
	}

	pub fn push_scope(&mut self)
	{
		self.scopes.push(Scope::default());
	}

	pub fn pop_scope(&mut self) -> Result<(), Error>
	{
		if self.scopes.len() > 1
		{
			self.scopes.pop();
			Ok(())
		}
		else
		{
			Err(Error::ScopeUnderflow)
		}
	}

	/// Add a symbol to the innermost scope. Shadowing a symbol from an
	/// enclosing scope is allowed, redeclaring one in the same scope is not.
	pub fn declare(&mut self, symbol: Symbol) -> Result<(), Error>
	{
		let scope = self.current_mut();
		if let Some(previous) = scope.symbols.get(&symbol.name)
		{
			return Err(Error::DuplicateSymbol {
				previous: previous.clone(),
			});
		}
		scope.symbols.insert(symbol.name.clone(), symbol);
		Ok(())
	}

	/// Find a symbol by name, searching from the innermost scope outwards.
	pub fn lookup(&self, name: &str) -> Result<&Symbol, Error>
	{
		self.scopes
			.iter()
			.rev()
			.find_map(|scope| scope.get(name))
			.ok_or_else(|| Error::UndeclaredSymbol {
				name: name.to_string(),
			})
	}

	pub fn depth(&self) -> usize
	{
		self.scopes.len()
	}

	pub fn current(&self) -> &Scope
	{
		match self.scopes.last()
		{
			Some(scope) => scope,
			None => unreachable!(),
		}
	}

	fn current_mut(&mut self) -> &mut Scope
	{
		match self.scopes.last_mut()
		{
			Some(scope) => scope,
			None => unreachable!(),
		}
	}

	pub fn global_scope(&self) -> &Scope
	{
		&self.scopes[0]
	}

	/// Discard every scope except a fresh, empty global scope.
	pub fn reset(&mut self)
	{
		self.scopes.clear();
		self.scopes.push(Scope::default());
	}
}
