//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! A syntax-directed semantic core for a small C-like language: scoped
//! symbol tables, type checking and three-address code, all driven by the
//! parser as it reduces productions.

pub mod actions;
pub mod analyzer;
pub mod error;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod scoper;
pub mod stdout;
pub mod value_type;

pub use analyzer::{Analysis, Analyzer};
pub use error::{Error, Errors};
pub use generator::{Format, Quadruple};
pub use value_type::ValueType;

/// Analyze one source file as an independent run.
///
/// Recoverable diagnostics end up in the returned `Analysis`, next to the
/// code generated despite them. A fatal error abandons the run: all
/// diagnostics collected up to that point are returned, followed by the
/// fatal error itself.
pub fn compile_source(source: &str, filename: &str) -> Result<Analysis, Errors>
{
	let tokens = lexer::lex(source, filename);
	let mut analyzer = Analyzer::new();
	match parser::parse(tokens, &mut analyzer)
	{
		Ok(()) => Ok(analyzer.finish()),
		Err(fatal) =>
		{
			log::debug!("run abandoned: {}", fatal);
			let mut errors = Errors::from(analyzer.take_diagnostics());
			errors.push(fatal);
			Err(errors)
		}
	}
}
