//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! The command line interface prints the generated code in color, and
//! dumps tokens and the symbol table when run with the _verbose_ flag.

use crate::error;
use crate::generator;
use crate::lexer;
use crate::scoper;

use serde::Deserialize;
use std::io::Write;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

#[derive(Debug, Default, Clone, Copy)]
pub struct Options
{
	pub verbose: bool,
	pub color: ColorChoice,
	pub arrows: CharSet,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice
{
	#[default]
	Auto,
	Always,
	Never,
}

impl From<ColorChoice> for termcolor::ColorChoice
{
	fn from(choice: ColorChoice) -> termcolor::ColorChoice
	{
		match choice
		{
			ColorChoice::Auto => termcolor::ColorChoice::Auto,
			ColorChoice::Always => termcolor::ColorChoice::Always,
			ColorChoice::Never => termcolor::ColorChoice::Never,
		}
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CharSet
{
	#[default]
	Unicode,
	Ascii,
}

impl From<CharSet> for ariadne::CharSet
{
	fn from(choice: CharSet) -> ariadne::CharSet
	{
		match choice
		{
			CharSet::Unicode => ariadne::CharSet::Unicode,
			CharSet::Ascii => ariadne::CharSet::Ascii,
		}
	}
}

pub struct StdOut
{
	stdout: StandardStream,
	is_verbose: bool,
	report_config: ariadne::Config,
}

impl StdOut
{
	pub fn new(options: &Options) -> StdOut
	{
		let stdout = StandardStream::stdout(options.color.into());
		let with_color = match options.color
		{
			ColorChoice::Auto => stdout.supports_color(),
			ColorChoice::Always => true,
			ColorChoice::Never => false,
		};
		let report_config = ariadne::Config::default()
			.with_color(with_color)
			.with_char_set(options.arrows.into());
		StdOut {
			stdout,
			is_verbose: options.verbose,
			report_config,
		}
	}

	pub fn header(
		&mut self,
		preamble: &str,
		filename: &str,
	) -> Result<(), std::io::Error>
	{
		let colorspec_header = ColorSpec::new();
		self.stdout.set_color(&colorspec_header)?;
		writeln!(self.stdout, "{} {}...", preamble, filename)?;
		Ok(())
	}

	pub fn dump_tokens(
		&mut self,
		tokens: &[lexer::LexedToken],
	) -> Result<(), std::io::Error>
	{
		if self.is_verbose
		{
			let colorspec_dump = ColorSpec::new().set_dimmed(true).to_owned();
			self.stdout.set_color(&colorspec_dump)?;
			for token in tokens
			{
				match &token.result
				{
					Ok(token) => write!(self.stdout, "{:?}   ", token)?,
					Err(_) => write!(self.stdout, "ERROR   ")?,
				}
			}
			writeln!(self.stdout)?;
			writeln!(self.stdout)?;
		}
		Ok(())
	}

	pub fn dump_symbols(
		&mut self,
		scope: &scoper::Scope,
	) -> Result<(), std::io::Error>
	{
		if self.is_verbose
		{
			let colorspec_dump = ColorSpec::new().set_dimmed(true).to_owned();
			self.stdout.set_color(&colorspec_dump)?;
			for symbol in scope.symbols()
			{
				writeln!(
					self.stdout,
					"{:<16} {:<12} {}",
					symbol.name,
					symbol.value_type,
					symbol.location.format()
				)?;
			}
			writeln!(self.stdout)?;
		}
		Ok(())
	}

	pub fn dump_instructions(
		&mut self,
		instructions: &[generator::Quadruple],
		format: generator::Format,
	) -> Result<(), std::io::Error>
	{
		let colorspec_marker =
			ColorSpec::new().set_fg(Some(Color::Cyan)).to_owned();
		let colorspec_code = ColorSpec::new();
		for instruction in instructions
		{
			match instruction.operator.as_str()
			{
				generator::LABEL
				| generator::FUNCTION
				| generator::END_FUNCTION =>
				{
					self.stdout.set_color(&colorspec_marker)?
				}
				_ => self.stdout.set_color(&colorspec_code)?,
			}
			let line = generator::render(std::iter::once(instruction), format);
			write!(self.stdout, "{}", line)?;
		}
		self.stdout.reset()?;
		Ok(())
	}

	pub fn prepare_for_errors(&mut self) -> Result<(), std::io::Error>
	{
		let colorspec_error = ColorSpec::new()
			.set_fg(Some(Color::Red))
			.set_bold(true)
			.to_owned();
		self.stdout.set_color(&colorspec_error)?;
		writeln!(self.stdout)?;
		Ok(())
	}

	pub fn show_errors<'a>(
		&mut self,
		errors: impl IntoIterator<Item = &'a error::Error>,
		mut source_cache: impl ariadne::Cache<String>,
	) -> Result<(), std::io::Error>
	{
		for error in errors
		{
			let report = error.build_report(self.report_config);
			report.eprint(&mut source_cache)?;
		}
		self.stdout.reset()?;
		Ok(())
	}

	pub fn success(&mut self, filename: &str) -> Result<(), std::io::Error>
	{
		let colorspec_success =
			ColorSpec::new().set_fg(Some(Color::Green)).to_owned();
		self.stdout.set_color(&colorspec_success)?;
		writeln!(self.stdout, "No errors in {}.", filename)?;
		self.stdout.reset()?;
		Ok(())
	}

	pub fn done(&mut self) -> Result<(), std::io::Error>
	{
		self.stdout.reset()?;
		writeln!(self.stdout, "Done.")?;
		Ok(())
	}
}
