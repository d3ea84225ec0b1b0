//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! The lexer turns source text into tokens annotated with their location.
//! Characters that cannot start a token are not fatal: they become error
//! tokens, which the parser reports and skips.

use thiserror::Error;

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token
{
	// Single-character tokens.
	ParenLeft,
	ParenRight,
	BraceLeft,
	BraceRight,
	Semicolon,
	Comma,
	Colon,
	Plus,
	Minus,
	Times,
	Divide,
	Modulo,
	Assignment, // =
	Exclamation,
	Ampersand,
	Less,
	Greater,

	// Double-character tokens.
	Equals,       // ==
	DoesNotEqual, // !=
	LessEquals,
	GreaterEquals,
	LogicalAnd,
	LogicalOr,
	Increment,
	Decrement,

	// Type keywords.
	Int,
	Float,
	Char,
	Bool,
	Void,

	// Other keywords.
	If,
	Else,
	While,
	For,
	Switch,
	Case,
	Default,
	Break,
	Continue,
	Return,

	// Literals.
	Identifier(String),
	IntegerLiteral(String),
	FloatLiteral(String),
	CharLiteral(char),
	StringLiteral(String),
	BoolLiteral(bool),
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error
{
	#[error("unexpected character")]
	UnexpectedCharacter,
	#[error("invalid integer literal")]
	InvalidIntegerLiteral(#[from] std::num::ParseIntError),
	#[error("invalid float literal")]
	InvalidFloatLiteral(#[from] std::num::ParseFloatError),
	#[error("missing closing quote")]
	MissingClosingQuote,
	#[error("invalid character literal")]
	InvalidCharacterLiteral,
	#[error("unterminated comment")]
	UnterminatedComment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location
{
	pub source_filename: String,
	/// Character offsets into the source, as expected by `ariadne`.
	pub span: std::ops::Range<usize>,
	pub line_number: usize,
	pub line_offset: usize,
}

impl Location
{
	pub fn format(&self) -> String
	{
		format!(
			"at {}:{}:{}",
			self.source_filename, self.line_number, self.line_offset
		)
	}

	pub fn label(&self) -> ariadne::Label<(String, std::ops::Range<usize>)>
	{
		ariadne::Label::new((self.source_filename.clone(), self.span.clone()))
	}

	pub fn label_after_end(
		&self,
	) -> ariadne::Label<(String, std::ops::Range<usize>)>
	{
		let end = self.span.end;
		ariadne::Label::new((self.source_filename.clone(), end..(end + 1)))
	}

	pub fn combined_with(&self, other: &Location) -> Location
	{
		if self.source_filename != other.source_filename
		{
			return self.clone();
		}
		let (first, last) = if self.span.start <= other.span.start
		{
			(self, other)
		}
		else
		{
			(other, self)
		};
		Location {
			source_filename: first.source_filename.clone(),
			span: first.span.start..last.span.end.max(first.span.end),
			line_number: first.line_number,
			line_offset: first.line_offset,
		}
	}
}

#[derive(Debug, Clone)]
pub struct LexedToken
{
	pub result: Result<Token, Error>,
	pub location: Location,
}

type Chars<'a> = std::iter::Peekable<std::iter::Enumerate<std::str::Chars<'a>>>;

struct Cursor
{
	line_number: usize,
	last_line_start_offset: usize,
}

impl Cursor
{
	fn newline(&mut self, offset_of_newline: usize)
	{
		self.line_number += 1;
		self.last_line_start_offset = offset_of_newline + 1;
	}
}

pub fn lex(source: &str, source_filename: &str) -> Vec<LexedToken>
{
	let mut tokens = Vec::new();
	let mut cursor = Cursor {
		line_number: 1,
		last_line_start_offset: 0,
	};
	let mut iter: Chars = source.chars().enumerate().peekable();
	while let Some((offset_of_x, x)) = iter.next()
	{
		let line_number = cursor.line_number;
		let line_offset = offset_of_x - cursor.last_line_start_offset + 1;
		let result = match x
		{
			'(' => Ok(Token::ParenLeft),
			')' => Ok(Token::ParenRight),
			'{' => Ok(Token::BraceLeft),
			'}' => Ok(Token::BraceRight),
			';' => Ok(Token::Semicolon),
			',' => Ok(Token::Comma),
			':' => Ok(Token::Colon),
			'*' => Ok(Token::Times),
			'%' => Ok(Token::Modulo),
			'+' => match iter.peek()
			{
				Some((_, '+')) =>
				{
					iter.next();
					Ok(Token::Increment)
				}
				_ => Ok(Token::Plus),
			},
			'-' => match iter.peek()
			{
				Some((_, '-')) =>
				{
					iter.next();
					Ok(Token::Decrement)
				}
				_ => Ok(Token::Minus),
			},
			'=' => match iter.peek()
			{
				Some((_, '=')) =>
				{
					iter.next();
					Ok(Token::Equals)
				}
				_ => Ok(Token::Assignment),
			},
			'!' => match iter.peek()
			{
				Some((_, '=')) =>
				{
					iter.next();
					Ok(Token::DoesNotEqual)
				}
				_ => Ok(Token::Exclamation),
			},
			'<' => match iter.peek()
			{
				Some((_, '=')) =>
				{
					iter.next();
					Ok(Token::LessEquals)
				}
				_ => Ok(Token::Less),
			},
			'>' => match iter.peek()
			{
				Some((_, '=')) =>
				{
					iter.next();
					Ok(Token::GreaterEquals)
				}
				_ => Ok(Token::Greater),
			},
			'&' => match iter.peek()
			{
				Some((_, '&')) =>
				{
					iter.next();
					Ok(Token::LogicalAnd)
				}
				_ => Ok(Token::Ampersand),
			},
			'|' => match iter.peek()
			{
				Some((_, '|')) =>
				{
					iter.next();
					Ok(Token::LogicalOr)
				}
				_ => Err(Error::UnexpectedCharacter),
			},
			'/' => match iter.peek()
			{
				Some((_, '/')) =>
				{
					skip_line(&mut iter, &mut cursor);
					continue;
				}
				Some((_, '*')) =>
				{
					iter.next();
					match skip_block_comment(&mut iter, &mut cursor)
					{
						Ok(()) => continue,
						Err(error) => Err(error),
					}
				}
				_ => Ok(Token::Divide),
			},
			'#' =>
			{
				// Preprocessor directives are not part of the language.
				skip_line(&mut iter, &mut cursor);
				continue;
			}
			'\'' => lex_char_literal(&mut iter),
			'"' => lex_string_literal(&mut iter),
			'a'..='z' | 'A'..='Z' | '_' =>
			{
				let mut identifier = x.to_string();
				while let Some(&(_, y)) = iter.peek()
				{
					if is_identifier_continuation(y)
					{
						identifier.push(y);
						iter.next();
					}
					else
					{
						break;
					}
				}
				Ok(keyword_or_identifier(identifier))
			}
			'0'..='9' => lex_number(x, &mut iter),
			' ' | '\t' | '\r' => continue,
			'\n' =>
			{
				cursor.newline(offset_of_x);
				continue;
			}
			_ => Err(Error::UnexpectedCharacter),
		};
		let end = match iter.peek()
		{
			Some((offset, _)) => *offset,
			None => source.chars().count(),
		};
		let location = Location {
			source_filename: source_filename.to_string(),
			span: offset_of_x..end.max(offset_of_x + 1),
			line_number,
			line_offset,
		};
		tokens.push(LexedToken { result, location });
	}
	tokens
}

fn keyword_or_identifier(identifier: String) -> Token
{
	match identifier.as_str()
	{
		"int" => Token::Int,
		"float" => Token::Float,
		"char" => Token::Char,
		"bool" => Token::Bool,
		"boolean" => Token::Bool,
		"void" => Token::Void,
		"if" => Token::If,
		"else" => Token::Else,
		"while" => Token::While,
		"for" => Token::For,
		"switch" => Token::Switch,
		"case" => Token::Case,
		"default" => Token::Default,
		"break" => Token::Break,
		"continue" => Token::Continue,
		"return" => Token::Return,
		"true" => Token::BoolLiteral(true),
		"false" => Token::BoolLiteral(false),
		_ => Token::Identifier(identifier),
	}
}

fn lex_number(x: char, iter: &mut Chars) -> Result<Token, Error>
{
	let mut literal = x.to_string();
	take_digits(&mut literal, iter);

	let mut lookahead = iter.clone();
	let is_float = match (lookahead.next(), lookahead.peek())
	{
		(Some((_, '.')), Some((_, y))) => y.is_ascii_digit(),
		_ => false,
	};
	if is_float
	{
		iter.next();
		literal.push('.');
		take_digits(&mut literal, iter);
		let _value: f64 = literal.parse()?;
		Ok(Token::FloatLiteral(literal))
	}
	else
	{
		let _value: i64 = literal.parse()?;
		Ok(Token::IntegerLiteral(literal))
	}
}

fn take_digits(literal: &mut String, iter: &mut Chars)
{
	while let Some(&(_, y)) = iter.peek()
	{
		if y.is_ascii_digit()
		{
			literal.push(y);
			iter.next();
		}
		else
		{
			break;
		}
	}
}

fn lex_char_literal(iter: &mut Chars) -> Result<Token, Error>
{
	let value = match iter.next()
	{
		Some((_, '\\')) => match iter.next()
		{
			Some((_, y)) => unescape(y).ok_or(Error::InvalidCharacterLiteral)?,
			None => return Err(Error::MissingClosingQuote),
		},
		Some((_, '\'')) => return Err(Error::InvalidCharacterLiteral),
		Some((_, '\n')) => return Err(Error::MissingClosingQuote),
		Some((_, y)) => y,
		None => return Err(Error::MissingClosingQuote),
	};
	match iter.next()
	{
		Some((_, '\'')) => Ok(Token::CharLiteral(value)),
		Some((_, '\n')) | None => Err(Error::MissingClosingQuote),
		Some(_) =>
		{
			// Consume the rest of the malformed literal on this line.
			while let Some(&(_, y)) = iter.peek()
			{
				if y == '\n'
				{
					break;
				}
				iter.next();
				if y == '\''
				{
					break;
				}
			}
			Err(Error::InvalidCharacterLiteral)
		}
	}
}

fn lex_string_literal(iter: &mut Chars) -> Result<Token, Error>
{
	let mut value = String::new();
	loop
	{
		match iter.peek()
		{
			Some((_, '"')) =>
			{
				iter.next();
				return Ok(Token::StringLiteral(value));
			}
			Some((_, '\n')) | None => return Err(Error::MissingClosingQuote),
			Some((_, '\\')) =>
			{
				iter.next();
				match iter.next()
				{
					Some((_, y)) => match unescape(y)
					{
						Some(c) => value.push(c),
						None => value.push(y),
					},
					None => return Err(Error::MissingClosingQuote),
				}
			}
			Some(&(_, y)) =>
			{
				iter.next();
				value.push(y);
			}
		}
	}
}

/// Spell a character the way it is written inside a literal delimited by
/// `quote`. This is the inverse of the escapes the lexer understands.
pub fn escape(x: char, quote: char) -> String
{
	match x
	{
		'\n' => "\\n".to_string(),
		'\t' => "\\t".to_string(),
		'\r' => "\\r".to_string(),
		'\0' => "\\0".to_string(),
		'\\' => "\\\\".to_string(),
		x if x == quote => format!("\\{}", x),
		x => x.to_string(),
	}
}

fn unescape(x: char) -> Option<char>
{
	match x
	{
		'n' => Some('\n'),
		't' => Some('\t'),
		'r' => Some('\r'),
		'0' => Some('\0'),
		'\\' => Some('\\'),
		'\'' => Some('\''),
		'"' => Some('"'),
		_ => None,
	}
}

fn skip_line(iter: &mut Chars, cursor: &mut Cursor)
{
	while let Some((offset_of_y, y)) = iter.next()
	{
		if y == '\n'
		{
			cursor.newline(offset_of_y);
			break;
		}
	}
}

fn skip_block_comment(iter: &mut Chars, cursor: &mut Cursor)
	-> Result<(), Error>
{
	while let Some((offset_of_y, y)) = iter.next()
	{
		match y
		{
			'*' => match iter.peek()
			{
				Some((_, '/')) =>
				{
					iter.next();
					return Ok(());
				}
				_ => (),
			},
			'\n' => cursor.newline(offset_of_y),
			_ => (),
		}
	}
	Err(Error::UnterminatedComment)
}

fn is_identifier_continuation(x: char) -> bool
{
	match x
	{
		'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => true,
		_ => false,
	}
}
