//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! The generator records three-address code as a list of quadruples.
//! It does not check anything: by the time an instruction is emitted, the
//! analyzer has already typed its operands.

use serde::Deserialize;

/// The operator of a plain copy, `result = arg1`.
pub const ASSIGN: &str = "=";
pub const LABEL: &str = "label";
pub const GOTO: &str = "goto";
pub const IF_FALSE: &str = "if_false";
pub const PARAM: &str = "param";
pub const CALL: &str = "call";
pub const RETURN: &str = "return";
pub const FUNCTION: &str = "function";
pub const END_FUNCTION: &str = "end_function";

/// One three-address instruction, `result = arg1 operator arg2`.
/// Instructions without a destination keep their single address (a label
/// or a function name) in `result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadruple
{
	pub operator: String,
	pub arg1: Option<String>,
	pub arg2: Option<String>,
	pub result: String,
}

impl Quadruple
{
	pub fn new(
		operator: &str,
		arg1: Option<&str>,
		arg2: Option<&str>,
		result: &str,
	) -> Quadruple
	{
		Quadruple {
			operator: operator.to_string(),
			arg1: arg1.map(|x| x.to_string()),
			arg2: arg2.map(|x| x.to_string()),
			result: result.to_string(),
		}
	}

	/// Render the instruction the way it reads as code, e.g. `t1 = a + t0`.
	pub fn to_listing(&self) -> String
	{
		let arg1 = self.arg1.as_deref().unwrap_or("_");
		let arg2 = self.arg2.as_deref().unwrap_or("_");
		let result = &self.result;
		match self.operator.as_str()
		{
			ASSIGN => format!("{} = {}", result, arg1),
			LABEL => format!("{}:", result),
			GOTO => format!("goto {}", result),
			IF_FALSE => format!("if_false {} goto {}", arg1, result),
			PARAM => format!("param {}", arg1),
			CALL => format!("{} = call {}, {}", result, arg1, arg2),
			RETURN => match &self.arg1
			{
				Some(value) => format!("return {}", value),
				None => "return".to_string(),
			},
			FUNCTION => format!("function {}:", result),
			END_FUNCTION => format!("end function {}", result),
			operator => match &self.arg2
			{
				Some(arg2) =>
				{
					format!("{} = {} {} {}", result, arg1, operator, arg2)
				}
				None if operator.chars().all(|x| x.is_alphabetic()) =>
				{
					format!("{} = {} {}", result, operator, arg1)
				}
				None => format!("{} = {}{}", result, operator, arg1),
			},
		}
	}
}

impl std::fmt::Display for Quadruple
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		write!(
			f,
			"({}, {}, {}, {})",
			self.operator,
			self.arg1.as_deref().unwrap_or("_"),
			self.arg2.as_deref().unwrap_or("_"),
			self.result
		)
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format
{
	/// One `(operator, arg1, arg2, result)` tuple per line
	#[default]
	Tuples,
	/// Readable three-address code with indented instructions
	Listing,
}

#[derive(Debug, Default, Clone)]
pub struct Generator
{
	instructions: Vec<Quadruple>,
	temporary_count: usize,
	label_count: usize,
}

impl Generator
{
	pub fn new() -> Generator
	{
		Generator::default()
	}

	/// Return a fresh temporary name. Temporaries are numbered from zero
	/// and never reused within a run, not even after their scope ends.
	pub fn new_temporary(&mut self) -> String
	{
		let name = format!("t{}", self.temporary_count);
		self.temporary_count += 1;
		name
	}

	pub fn new_label(&mut self) -> String
	{
		let name = format!("L{}", self.label_count);
		self.label_count += 1;
		name
	}

	pub fn emit(
		&mut self,
		operator: &str,
		arg1: Option<&str>,
		arg2: Option<&str>,
		result: &str,
	)
	{
		let instruction = Quadruple::new(operator, arg1, arg2, result);
		log::trace!("emit {}", instruction);
		self.instructions.push(instruction);
	}

	pub fn emit_label(&mut self, label: &str)
	{
		self.emit(LABEL, None, None, label);
	}

	pub fn emit_goto(&mut self, label: &str)
	{
		self.emit(GOTO, None, None, label);
	}

	/// Iterate over the instructions in the order they were emitted.
	/// The iterator can be cloned to restart it.
	pub fn dump(&self) -> std::slice::Iter<Quadruple>
	{
		self.instructions.iter()
	}

	pub fn len(&self) -> usize
	{
		self.instructions.len()
	}

	pub fn is_empty(&self) -> bool
	{
		self.instructions.is_empty()
	}

	pub fn into_instructions(self) -> Vec<Quadruple>
	{
		self.instructions
	}

	pub fn reset(&mut self)
	{
		self.instructions.clear();
		self.temporary_count = 0;
		self.label_count = 0;
	}
}

/// Write out instructions in the requested format.
pub fn render<'a>(
	instructions: impl IntoIterator<Item = &'a Quadruple>,
	format: Format,
) -> String
{
	let mut buffer = String::new();
	for instruction in instructions
	{
		let line = match format
		{
			Format::Tuples => instruction.to_string(),
			Format::Listing => match instruction.operator.as_str()
			{
				LABEL | FUNCTION | END_FUNCTION => instruction.to_listing(),
				_ => format!("    {}", instruction.to_listing()),
			},
		};
		buffer.push_str(&line);
		buffer.push('\n');
	}
	buffer
}

#[cfg(test)]
mod tests
{
	use super::*;

	use pretty_assertions::assert_eq;

	#[test]
	fn number_temporaries_from_zero()
	{
		let mut generator = Generator::new();
		let names: Vec<String> =
			(0..4).map(|_| generator.new_temporary()).collect();
		assert_eq!(names, vec!["t0", "t1", "t2", "t3"]);
		assert_eq!(generator.new_label(), "L0");
		assert_eq!(generator.new_temporary(), "t4");
	}

	#[test]
	fn dump_is_restartable()
	{
		let mut generator = Generator::new();
		generator.emit("*", Some("b"), Some("2"), "t0");
		generator.emit("+", Some("a"), Some("t0"), "t1");
		generator.emit(ASSIGN, Some("t1"), None, "c");
		let dump = generator.dump();
		let first: Vec<String> = dump.clone().map(|x| x.to_string()).collect();
		let second: Vec<String> = dump.map(|x| x.to_string()).collect();
		assert_eq!(first, second);
		assert_eq!(
			first,
			vec!["(*, b, 2, t0)", "(+, a, t0, t1)", "(=, t1, _, c)"]
		);
	}

	#[test]
	fn render_listing()
	{
		let instructions = vec![
			Quadruple::new(FUNCTION, None, None, "f"),
			Quadruple::new("minus", Some("x"), None, "t0"),
			Quadruple::new("&", Some("p"), None, "t1"),
			Quadruple::new(IF_FALSE, Some("t0"), None, "L0"),
			Quadruple::new(CALL, Some("g"), Some("2"), "t2"),
			Quadruple::new(LABEL, None, None, "L0"),
			Quadruple::new(RETURN, Some("t2"), None, "f"),
			Quadruple::new(END_FUNCTION, None, None, "f"),
		];
		assert_eq!(
			render(&instructions, Format::Listing),
			"function f:\n    t0 = minus x\n    t1 = &p\n    \
			 if_false t0 goto L0\n    t2 = call g, 2\nL0:\n    \
			 return t2\nend function f\n"
		);
	}

	#[test]
	fn reset_counters()
	{
		let mut generator = Generator::new();
		generator.new_temporary();
		generator.new_label();
		generator.emit(ASSIGN, Some("1"), None, "x");
		generator.reset();
		assert!(generator.is_empty());
		assert_eq!(generator.new_temporary(), "t0");
		assert_eq!(generator.new_label(), "L0");
	}
}
