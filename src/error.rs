//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! Diagnostics raised while lexing, parsing and analyzing a program.
//! Most of them are recoverable: the analyzer records them and moves on.
//! Fatal errors end the run.

pub use crate::lexer;
pub use crate::lexer::Location;
pub use crate::value_type::ValueType;

use ariadne::{Fmt, Report, ReportKind};

#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Error
{
	Lexical
	{
		error: lexer::Error,
		location: Location,
	},
	UnexpectedEndOfFile
	{
		last_location: Location,
		expectation: String,
	},
	UnexpectedToken
	{
		location: Location,
		expectation: String,
	},
	DuplicateDeclarationVariable
	{
		name: String,
		location: Location,
		previous: Location,
	},
	DuplicateDeclarationFunction
	{
		name: String,
		location: Location,
		previous: Location,
	},
	UndefinedVariable
	{
		name: String, location: Location
	},
	UndefinedFunction
	{
		name: String, location: Location
	},
	IncompatibleAssignment
	{
		name: String,
		target_type: ValueType,
		source_type: ValueType,
		location: Location,
		location_of_declaration: Location,
	},
	NotAPointer
	{
		name: String,
		value_type: ValueType,
		location: Location,
		location_of_declaration: Location,
	},
	ConflictingReturnValue
	{
		declared_type: ValueType,
		inferred_type: ValueType,
		location_of_return_value: Location,
		location_of_declaration: Location,
	},
	MissingReturnValue
	{
		declared_type: ValueType,
		location: Location,
		location_of_declaration: Location,
	},
	ArgumentCountMismatch
	{
		name: String,
		expected: usize,
		found: usize,
		location: Location,
		location_of_declaration: Location,
	},
	ArgumentTypeMismatch
	{
		parameter_type: ValueType,
		argument_type: ValueType,
		location: Location,
		location_of_declaration: Location,
	},
	MisplacedBreak
	{
		location: Location
	},
	MisplacedContinue
	{
		location: Location
	},
	MisplacedReturn
	{
		location: Location
	},
	ScopeUnderflow
	{
		location: Location
	},
}

impl Error
{
	pub fn code(&self) -> u16
	{
		match self
		{
			Error::Lexical { error, .. } => match error
			{
				lexer::Error::UnexpectedCharacter => 100,
				lexer::Error::InvalidIntegerLiteral(_) => 101,
				lexer::Error::InvalidFloatLiteral(_) => 102,
				lexer::Error::MissingClosingQuote => 103,
				lexer::Error::InvalidCharacterLiteral => 104,
				lexer::Error::UnterminatedComment => 105,
			},
			Error::UnexpectedToken { .. } => 300,
			Error::UnexpectedEndOfFile { .. } => 301,
			Error::DuplicateDeclarationVariable { .. } => 400,
			Error::DuplicateDeclarationFunction { .. } => 401,
			Error::UndefinedVariable { .. } => 402,
			Error::UndefinedFunction { .. } => 403,
			Error::IncompatibleAssignment { .. } => 500,
			Error::NotAPointer { .. } => 501,
			Error::ConflictingReturnValue { .. } => 502,
			Error::MissingReturnValue { .. } => 503,
			Error::ArgumentCountMismatch { .. } => 504,
			Error::ArgumentTypeMismatch { .. } => 505,
			Error::MisplacedBreak { .. } => 600,
			Error::MisplacedContinue { .. } => 601,
			Error::MisplacedReturn { .. } => 602,
			Error::ScopeUnderflow { .. } => 900,
		}
	}

	/// Fatal errors abort the run; all others are collected.
	pub fn is_fatal(&self) -> bool
	{
		match self
		{
			Error::UnexpectedToken { .. } => true,
			Error::UnexpectedEndOfFile { .. } => true,
			Error::ScopeUnderflow { .. } => true,
			_ => false,
		}
	}

	pub fn location(&self) -> &Location
	{
		match self
		{
			Error::Lexical { location, .. } => location,
			Error::UnexpectedEndOfFile { last_location, .. } => last_location,
			Error::UnexpectedToken { location, .. } => location,
			Error::DuplicateDeclarationVariable { location, .. } => location,
			Error::DuplicateDeclarationFunction { location, .. } => location,
			Error::UndefinedVariable { location, .. } => location,
			Error::UndefinedFunction { location, .. } => location,
			Error::IncompatibleAssignment { location, .. } => location,
			Error::NotAPointer { location, .. } => location,
			Error::ConflictingReturnValue {
				location_of_return_value,
				..
			} => location_of_return_value,
			Error::MissingReturnValue { location, .. } => location,
			Error::ArgumentCountMismatch { location, .. } => location,
			Error::ArgumentTypeMismatch { location, .. } => location,
			Error::MisplacedBreak { location } => location,
			Error::MisplacedContinue { location } => location,
			Error::MisplacedReturn { location } => location,
			Error::ScopeUnderflow { location } => location,
		}
	}

	/// A one-line description, used when a full report is not wanted.
	pub fn describe(&self) -> String
	{
		match self
		{
			Error::Lexical { error, .. } => error.to_string(),
			Error::UnexpectedEndOfFile { expectation, .. } =>
			{
				format!("unexpected end of file, {}", expectation)
			}
			Error::UnexpectedToken { expectation, .. } =>
			{
				format!("unexpected token, {}", expectation)
			}
			Error::DuplicateDeclarationVariable { name, .. } =>
			{
				format!("symbol '{}' already declared in this scope", name)
			}
			Error::DuplicateDeclarationFunction { name, .. } =>
			{
				format!("function '{}' already defined", name)
			}
			Error::UndefinedVariable { name, .. } =>
			{
				format!("variable '{}' is not declared", name)
			}
			Error::UndefinedFunction { name, .. } =>
			{
				format!("function '{}' is not defined", name)
			}
			Error::IncompatibleAssignment {
				name,
				target_type,
				source_type,
				..
			} => format!(
				"cannot assign a value of type {} to '{}' of type {}",
				show_type(source_type),
				name,
				show_type(target_type)
			),
			Error::NotAPointer {
				name, value_type, ..
			} => format!(
				"cannot dereference '{}' of non-pointer type {}",
				name,
				show_type(value_type)
			),
			Error::ConflictingReturnValue {
				declared_type,
				inferred_type,
				..
			} => format!(
				"returning {} from a function declared to return {}",
				show_type(inferred_type),
				show_type(declared_type)
			),
			Error::MissingReturnValue { declared_type, .. } => format!(
				"missing return value of type {}",
				show_type(declared_type)
			),
			Error::ArgumentCountMismatch {
				name,
				expected,
				found,
				..
			} => format!(
				"'{}' takes {} argument(s) but {} were supplied",
				name, expected, found
			),
			Error::ArgumentTypeMismatch {
				parameter_type,
				argument_type,
				..
			} => format!(
				"cannot pass {} as a parameter of type {}",
				show_type(argument_type),
				show_type(parameter_type)
			),
			Error::MisplacedBreak { .. } =>
			{
				"break statement outside of a loop or switch".to_string()
			}
			Error::MisplacedContinue { .. } =>
			{
				"continue statement outside of a loop".to_string()
			}
			Error::MisplacedReturn { .. } =>
			{
				"return statement outside of a function".to_string()
			}
			Error::ScopeUnderflow { .. } =>
			{
				"cannot pop the global scope".to_string()
			}
		}
	}

	pub fn report(&self) -> Report<(String, std::ops::Range<usize>)>
	{
		self.build_report(ariadne::Config::default())
	}

	pub fn build_report(
		&self,
		config: ariadne::Config,
	) -> Report<(String, std::ops::Range<usize>)>
	{
		let mut colors = ariadne::ColorGenerator::new();
		let a = colors.next();
		let b = colors.next();

		let location = self.location();
		let report = Report::build(
			ReportKind::Error,
			&location.source_filename,
			location.span.start,
		)
		.with_code(format!("E{}", self.code()))
		.with_config(config);

		match self
		{
			Error::Lexical { error, location } =>
			{
				let report = report
					.with_message(capitalize(&error.to_string()))
					.with_label(
						location
							.label()
							.with_message("Skipped this.")
							.with_color(a),
					);
				match error
				{
					lexer::Error::InvalidIntegerLiteral(inner_error) =>
					{
						report.with_note(format!("{}", inner_error)).finish()
					}
					lexer::Error::InvalidFloatLiteral(inner_error) =>
					{
						report.with_note(format!("{}", inner_error)).finish()
					}
					lexer::Error::MissingClosingQuote => report
						.with_note("Literals cannot span multiple lines.")
						.finish(),
					_ => report.finish(),
				}
			}

			Error::UnexpectedEndOfFile {
				expectation,
				last_location,
			} => report
				.with_message("Unexpected end of file")
				.with_label(
					last_location
						.label_after_end()
						.with_message(capitalize(expectation))
						.with_order(1)
						.with_color(a),
				)
				.with_label(
					last_location
						.label()
						.with_message("Expected more after this.")
						.with_order(2)
						.with_color(b),
				)
				.finish(),

			Error::UnexpectedToken {
				expectation,
				location,
			} => report
				.with_message("Unexpected token")
				.with_label(
					location
						.label()
						.with_message(capitalize(expectation))
						.with_color(a),
				)
				.finish(),

			Error::DuplicateDeclarationVariable {
				name,
				location,
				previous,
			} => report
				.with_message("Duplicate variable")
				.with_label(
					location
						.label()
						.with_message(format!(
							"A variable named '{}' is already declared in \
							 this scope.",
							name.fg(a)
						))
						.with_color(a),
				)
				.with_label(
					previous
						.label()
						.with_message("Previously declared here.")
						.with_color(b),
				)
				.finish(),

			Error::DuplicateDeclarationFunction {
				name,
				location,
				previous,
			} => report
				.with_message("Duplicate function")
				.with_label(
					location
						.label()
						.with_message(format!(
							"A function named '{}' is already defined.",
							name.fg(a)
						))
						.with_color(a),
				)
				.with_label(
					previous
						.label()
						.with_message("Previously defined here.")
						.with_color(b),
				)
				.finish(),

			Error::UndefinedVariable { name, location } => report
				.with_message("Undeclared variable")
				.with_label(
					location
						.label()
						.with_message(format!(
							"The variable '{}' is not declared in any \
							 enclosing scope.",
							name.fg(a)
						))
						.with_color(a),
				)
				.finish(),

			Error::UndefinedFunction { name, location } => report
				.with_message("Undefined function")
				.with_label(
					location
						.label()
						.with_message(format!(
							"Call to undefined function '{}'.",
							name.fg(a)
						))
						.with_color(a),
				)
				.finish(),

			Error::IncompatibleAssignment {
				name,
				target_type,
				source_type,
				location,
				location_of_declaration,
			} => report
				.with_message("Incompatible assignment")
				.with_label(
					location
						.label()
						.with_message(format!(
							"Value of type {} assigned here.",
							show_type(source_type).fg(a)
						))
						.with_color(a),
				)
				.with_label(
					location_of_declaration
						.label()
						.with_message(format!(
							"'{}' is declared as {} here.",
							name,
							show_type(target_type).fg(b)
						))
						.with_color(b),
				)
				.with_note("The assignment is kept, but the value may lose precision.")
				.finish(),

			Error::NotAPointer {
				name,
				value_type,
				location,
				location_of_declaration,
			} => report
				.with_message("Invalid dereference")
				.with_label(
					location
						.label()
						.with_message(format!(
							"Cannot dereference '{}'.",
							name.fg(a)
						))
						.with_color(a),
				)
				.with_label(
					location_of_declaration
						.label()
						.with_message(format!(
							"Declared with non-pointer type {} here.",
							show_type(value_type).fg(b)
						))
						.with_color(b),
				)
				.finish(),

			Error::ConflictingReturnValue {
				declared_type,
				inferred_type,
				location_of_return_value,
				location_of_declaration,
			} => report
				.with_message("Conflicting return value")
				.with_label(
					location_of_return_value
						.label()
						.with_message(format!(
							"Value of type {} returned here.",
							show_type(inferred_type).fg(a)
						))
						.with_color(a),
				)
				.with_label(
					location_of_declaration
						.label()
						.with_message(format!(
							"Expected {} based on this declaration.",
							show_type(declared_type).fg(b)
						))
						.with_color(b),
				)
				.finish(),

			Error::MissingReturnValue {
				declared_type,
				location,
				location_of_declaration,
			} => report
				.with_message("Missing return value")
				.with_label(
					location
						.label()
						.with_message("No return value.")
						.with_color(a),
				)
				.with_label(
					location_of_declaration
						.label()
						.with_message(format!(
							"Expected {} based on this declaration.",
							show_type(declared_type).fg(b)
						))
						.with_color(b),
				)
				.finish(),

			Error::ArgumentCountMismatch {
				name,
				expected,
				found,
				location,
				location_of_declaration,
			} => report
				.with_message("Argument count mismatch")
				.with_label(
					location
						.label()
						.with_message(format!(
							"{} argument(s) supplied to '{}'.",
							found.fg(a),
							name
						))
						.with_color(a),
				)
				.with_label(
					location_of_declaration
						.label()
						.with_message(format!(
							"Expected {} based on this declaration.",
							expected.fg(b)
						))
						.with_color(b),
				)
				.finish(),

			Error::ArgumentTypeMismatch {
				parameter_type,
				argument_type,
				location,
				location_of_declaration,
			} => report
				.with_message("Argument type mismatch")
				.with_label(
					location
						.label()
						.with_message(format!(
							"Argument of type {} passed here.",
							show_type(argument_type).fg(a)
						))
						.with_color(a),
				)
				.with_label(
					location_of_declaration
						.label()
						.with_message(format!(
							"Parameter declared as {} here.",
							show_type(parameter_type).fg(b)
						))
						.with_color(b),
				)
				.finish(),

			Error::MisplacedBreak { location } => report
				.with_message("Misplaced break statement")
				.with_label(
					location
						.label()
						.with_message(
							"There is no loop or switch to break out of.",
						)
						.with_color(a),
				)
				.finish(),

			Error::MisplacedContinue { location } => report
				.with_message("Misplaced continue statement")
				.with_label(
					location
						.label()
						.with_message("There is no loop to continue.")
						.with_color(a),
				)
				.finish(),

			Error::MisplacedReturn { location } => report
				.with_message("Misplaced return statement")
				.with_label(
					location
						.label()
						.with_message("There is no function to return from.")
						.with_color(a),
				)
				.finish(),

			Error::ScopeUnderflow { location } => report
				.with_message("Scope underflow")
				.with_label(
					location
						.label()
						.with_message("This closes a scope that was never opened.")
						.with_color(a),
				)
				.with_note("This is an internal error.")
				.finish(),
		}
	}
}

impl std::fmt::Display for Error
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		write!(
			f,
			"error[E{}] {}: {}",
			self.code(),
			self.location().format(),
			self.describe()
		)
	}
}

impl std::error::Error for Error {}

/// All errors collected during a failed run, in the order they were raised.
#[must_use]
#[derive(Debug, Default, Clone)]
pub struct Errors
{
	errors: Vec<Error>,
}

impl From<Vec<Error>> for Errors
{
	fn from(errors: Vec<Error>) -> Errors
	{
		Errors { errors }
	}
}

impl From<Error> for Errors
{
	fn from(error: Error) -> Errors
	{
		Errors {
			errors: vec![error],
		}
	}
}

impl IntoIterator for Errors
{
	type Item = Error;
	type IntoIter = std::vec::IntoIter<Error>;

	fn into_iter(self) -> Self::IntoIter
	{
		self.errors.into_iter()
	}
}

impl Errors
{
	pub fn codes(&self) -> Vec<u16>
	{
		self.errors.iter().map(|x| x.code()).collect()
	}

	pub fn iter(&self) -> std::slice::Iter<Error>
	{
		self.errors.iter()
	}

	pub fn len(&self) -> usize
	{
		self.errors.len()
	}

	pub fn is_empty(&self) -> bool
	{
		self.errors.is_empty()
	}

	pub fn push(&mut self, error: Error)
	{
		self.errors.push(error);
	}

	pub fn has_fatal(&self) -> bool
	{
		self.errors.iter().any(|x| x.is_fatal())
	}

	/// Panic with every error written out; for use in tests.
	pub fn panic(self) -> std::convert::Infallible
	{
		let messages: Vec<String> =
			self.errors.iter().map(|x| x.to_string()).collect();
		panic!("{} error(s):\n{}", messages.len(), messages.join("\n"))
	}
}

impl std::fmt::Display for Errors
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		for error in &self.errors
		{
			writeln!(f, "{}", error)?;
		}
		Ok(())
	}
}

impl std::error::Error for Errors {}

fn show_type(value_type: &ValueType) -> String
{
	format!("`{}`", value_type)
}

fn capitalize(message: &str) -> String
{
	let mut chars = message.chars();
	match chars.next()
	{
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
