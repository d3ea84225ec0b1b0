//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! The parser recognizes the grammar by recursive descent and calls the
//! semantic actions each time it completes a production, so that analysis
//! and code generation happen in lockstep with parsing. No tree is built.

use crate::actions::*;
use crate::error::Error;
use crate::lexer::{LexedToken, Location, Token};
use crate::value_type::{BinaryOp, ValueType};

use std::collections::VecDeque;

/// Parse a whole program. Lexical errors are reported as diagnostics
/// before parsing starts; a syntax error ends the run.
pub fn parse<A: SemanticActions>(
	tokens: Vec<LexedToken>,
	actions: &mut A,
) -> Result<(), Error>
{
	let mut tokens = Tokens::from(tokens);
	for error in tokens.lexical_errors.drain(..)
	{
		actions.diagnose(error);
	}

	while !tokens.is_empty()
	{
		parse_item(&mut tokens, actions)?;
	}
	Ok(())
}

struct Tokens
{
	tokens: VecDeque<(Token, Location)>,
	last_location: Location,
	lexical_errors: Vec<Error>,
}

impl From<Vec<LexedToken>> for Tokens
{
	fn from(lexed: Vec<LexedToken>) -> Tokens
	{
		let last_location = match lexed.first()
		{
			Some(LexedToken {
				result: _,
				location,
			}) => location.clone(),
			None => Location {
				source_filename: String::new(),
				span: 0..0,
				line_number: 1,
				line_offset: 1,
			},
		};
		let mut tokens = VecDeque::with_capacity(lexed.len());
		let mut lexical_errors = Vec::new();
		for LexedToken { result, location } in lexed
		{
			match result
			{
				Ok(token) => tokens.push_back((token, location)),
				Err(error) =>
				{
					lexical_errors.push(Error::Lexical { error, location })
				}
			}
		}
		Tokens {
			tokens,
			last_location,
			lexical_errors,
		}
	}
}

impl Tokens
{
	fn is_empty(&self) -> bool
	{
		self.tokens.is_empty()
	}

	fn pop_front(&mut self) -> Option<(Token, Location)>
	{
		let popped = self.tokens.pop_front();
		if let Some((_, location)) = &popped
		{
			self.last_location = location.clone();
		}
		popped
	}

	fn start_location_span(&self) -> Option<Location>
	{
		self.tokens.front().map(|(_, location)| location.clone())
	}

	fn location_of_span(&self, start: Option<Location>) -> Location
	{
		match start
		{
			Some(location) => location.combined_with(&self.last_location),
			None => self.last_location.clone(),
		}
	}
}

fn peek(tokens: &Tokens) -> Option<&Token>
{
	tokens.tokens.front().map(|(token, _)| token)
}

fn peek_second(tokens: &Tokens) -> Option<&Token>
{
	tokens.tokens.get(1).map(|(token, _)| token)
}

fn consume(
	expected_token: Token,
	expectation: &str,
	tokens: &mut Tokens,
) -> Result<Location, Error>
{
	match tokens.pop_front()
	{
		Some((token, location)) if token == expected_token => Ok(location),
		Some((_, location)) => Err(Error::UnexpectedToken {
			expectation: expectation.to_string(),
			location,
		}),
		None => Err(Error::UnexpectedEndOfFile {
			expectation: expectation.to_string(),
			last_location: tokens.last_location.clone(),
		}),
	}
}

fn extract_identifier(
	expectation: &str,
	tokens: &mut Tokens,
) -> Result<Identifier, Error>
{
	match tokens.pop_front()
	{
		Some((Token::Identifier(name), location)) =>
		{
			Ok(Identifier { name, location })
		}
		Some((_, location)) => Err(Error::UnexpectedToken {
			expectation: expectation.to_string(),
			location,
		}),
		None => Err(Error::UnexpectedEndOfFile {
			expectation: expectation.to_string(),
			last_location: tokens.last_location.clone(),
		}),
	}
}

fn extract(
	expectation: &str,
	tokens: &mut Tokens,
) -> Result<(Token, Location), Error>
{
	match tokens.pop_front()
	{
		Some(popped) => Ok(popped),
		None => Err(Error::UnexpectedEndOfFile {
			expectation: expectation.to_string(),
			last_location: tokens.last_location.clone(),
		}),
	}
}

fn can_start_type(token: &Token) -> bool
{
	matches!(
		token,
		Token::Int | Token::Float | Token::Char | Token::Bool | Token::Void
	)
}

fn can_start_expression(token: &Token) -> bool
{
	matches!(
		token,
		Token::Identifier(_)
			| Token::IntegerLiteral(_)
			| Token::FloatLiteral(_)
			| Token::CharLiteral(_)
			| Token::StringLiteral(_)
			| Token::BoolLiteral(_)
			| Token::ParenLeft
			| Token::Minus
			| Token::Exclamation
			| Token::Ampersand
			| Token::Times
			| Token::Increment
			| Token::Decrement
	)
}

fn parse_item<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	match peek(tokens)
	{
		Some(token) if can_start_type(token) => (),
		_ => return parse_statement(tokens, actions),
	}

	let base_type = parse_type(tokens)?;
	let pointer_depth = parse_pointer_depth(tokens);
	let name = extract_identifier("expected identifier", tokens)?;
	if let Some(Token::ParenLeft) = peek(tokens)
	{
		let return_type = base_type.with_pointer_depth(pointer_depth);
		parse_function(return_type, name, tokens, actions)
	}
	else
	{
		parse_rest_of_declaration(
			base_type,
			pointer_depth,
			name,
			tokens,
			actions,
		)
	}
}

fn parse_function<A: SemanticActions>(
	return_type: ValueType,
	name: Identifier,
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	let parameters = parse_parameters(tokens)?;
	consume(Token::BraceLeft, "expected function body", tokens)?;

	// The body shares its scope with the parameters.
	actions.enter_function(return_type, name, parameters);
	loop
	{
		if let Some(Token::BraceRight) = peek(tokens)
		{
			tokens.pop_front();
			break;
		}
		parse_statement(tokens, actions)?;
	}
	actions.exit_function(&tokens.last_location)
}

fn parse_parameters(tokens: &mut Tokens) -> Result<Vec<Parameter>, Error>
{
	consume(Token::ParenLeft, "expected parameter list", tokens)?;

	let mut parameters = Vec::new();

	// Allow `f(void)` for a function without parameters.
	if let (Some(Token::Void), Some(Token::ParenRight)) =
		(peek(tokens), peek_second(tokens))
	{
		tokens.pop_front();
	}

	loop
	{
		if let Some(Token::ParenRight) = peek(tokens)
		{
			break;
		}

		let base_type = parse_type(tokens)?;
		let pointer_depth = parse_pointer_depth(tokens);
		let name = extract_identifier("expected parameter name", tokens)?;
		parameters.push(Parameter {
			name,
			value_type: base_type.with_pointer_depth(pointer_depth),
		});

		if let Some(Token::Comma) = peek(tokens)
		{
			tokens.pop_front();
		}
		else
		{
			break;
		}
	}

	consume(
		Token::ParenRight,
		"expected comma or right parenthesis",
		tokens,
	)?;

	Ok(parameters)
}

fn parse_type(tokens: &mut Tokens) -> Result<ValueType, Error>
{
	let (token, location) = extract("expected type", tokens)?;
	match token
	{
		Token::Int => Ok(ValueType::Int),
		Token::Float => Ok(ValueType::Float),
		Token::Char => Ok(ValueType::Char),
		Token::Bool => Ok(ValueType::Bool),
		Token::Void => Ok(ValueType::Void),
		_ => Err(Error::UnexpectedToken {
			expectation: "expected type".to_string(),
			location,
		}),
	}
}

fn parse_pointer_depth(tokens: &mut Tokens) -> usize
{
	let mut depth = 0;
	while let Some(Token::Times) = peek(tokens)
	{
		tokens.pop_front();
		depth += 1;
	}
	depth
}

fn parse_declaration<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	let base_type = parse_type(tokens)?;
	let pointer_depth = parse_pointer_depth(tokens);
	let name = extract_identifier("expected variable name", tokens)?;
	parse_rest_of_declaration(base_type, pointer_depth, name, tokens, actions)
}

/// Each declarator is declared as soon as it is complete, so that later
/// initializers in the same declaration can refer to it.
fn parse_rest_of_declaration<A: SemanticActions>(
	base_type: ValueType,
	pointer_depth: usize,
	name: Identifier,
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	let mut declarator = (pointer_depth, name);
	loop
	{
		let (pointer_depth, name) = declarator;
		let initializer = if let Some(Token::Assignment) = peek(tokens)
		{
			tokens.pop_front();
			Some(parse_expression(tokens, actions)?)
		}
		else
		{
			None
		};
		actions.declare(
			&base_type,
			Declarator {
				name,
				pointer_depth,
				initializer,
			},
		);

		if let Some(Token::Comma) = peek(tokens)
		{
			tokens.pop_front();
			let pointer_depth = parse_pointer_depth(tokens);
			let name = extract_identifier("expected variable name", tokens)?;
			declarator = (pointer_depth, name);
		}
		else
		{
			break;
		}
	}
	consume(Token::Semicolon, "expected semicolon", tokens)?;
	Ok(())
}

fn parse_statement<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	match peek(tokens)
	{
		Some(token) if can_start_type(token) =>
		{
			return parse_declaration(tokens, actions);
		}
		Some(token) if can_start_expression(token) =>
		{
			parse_simple_statement(tokens, actions)?;
			consume(Token::Semicolon, "expected semicolon", tokens)?;
			return Ok(());
		}
		_ => (),
	}

	let (token, location) = extract("expected statement", tokens)?;
	match token
	{
		Token::Semicolon => Ok(()),
		Token::BraceLeft =>
		{
			actions.enter_block(&location);
			parse_rest_of_block(tokens, actions)?;
			actions.exit_block(&tokens.last_location)
		}
		Token::If =>
		{
			let condition = parse_condition(tokens, actions)?;
			let mut branch = actions.begin_if(condition);
			parse_statement(tokens, actions)?;
			if let Some(Token::Else) = peek(tokens)
			{
				tokens.pop_front();
				actions.begin_else(&mut branch);
				parse_statement(tokens, actions)?;
			}
			actions.end_if(branch);
			Ok(())
		}
		Token::While =>
		{
			let while_loop = actions.begin_while();
			let condition = parse_condition(tokens, actions)?;
			actions.while_condition(&while_loop, condition);
			parse_statement(tokens, actions)?;
			actions.end_while(while_loop);
			Ok(())
		}
		Token::For => parse_rest_of_for_statement(tokens, actions),
		Token::Switch => parse_rest_of_switch_statement(tokens, actions),
		Token::Break =>
		{
			consume(Token::Semicolon, "expected semicolon", tokens)?;
			actions.break_statement(location);
			Ok(())
		}
		Token::Continue =>
		{
			consume(Token::Semicolon, "expected semicolon", tokens)?;
			actions.continue_statement(location);
			Ok(())
		}
		Token::Return =>
		{
			if let Some(Token::Semicolon) = peek(tokens)
			{
				tokens.pop_front();
				actions.return_statement(None, location);
				return Ok(());
			}
			let start = tokens.start_location_span();
			let value = parse_expression(tokens, actions)?;
			let location_of_value = tokens.location_of_span(start);
			consume(Token::Semicolon, "expected semicolon", tokens)?;
			actions.return_statement(Some(value), location_of_value);
			Ok(())
		}
		_ => Err(Error::UnexpectedToken {
			expectation: "expected statement".to_string(),
			location,
		}),
	}
}

fn parse_rest_of_block<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	loop
	{
		if let Some(Token::BraceRight) = peek(tokens)
		{
			tokens.pop_front();
			return Ok(());
		}

		parse_statement(tokens, actions)?;
	}
}

fn parse_condition<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	consume(Token::ParenLeft, "expected left parenthesis", tokens)?;
	let condition = parse_expression(tokens, actions)?;
	consume(Token::ParenRight, "expected right parenthesis", tokens)?;
	Ok(condition)
}

fn parse_rest_of_for_statement<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	consume(Token::ParenLeft, "expected left parenthesis", tokens)?;
	if peek(tokens) != Some(&Token::Semicolon)
	{
		parse_simple_statement(tokens, actions)?;
	}
	consume(Token::Semicolon, "expected semicolon", tokens)?;

	let for_loop = actions.begin_for();
	let condition = if peek(tokens) != Some(&Token::Semicolon)
	{
		Some(parse_expression(tokens, actions)?)
	}
	else
	{
		None
	};
	consume(Token::Semicolon, "expected semicolon", tokens)?;
	actions.for_condition(&for_loop, condition);

	if peek(tokens) != Some(&Token::ParenRight)
	{
		parse_simple_statement(tokens, actions)?;
	}
	consume(Token::ParenRight, "expected right parenthesis", tokens)?;
	actions.for_step(&for_loop);

	parse_statement(tokens, actions)?;
	actions.end_for(for_loop);
	Ok(())
}

fn parse_rest_of_switch_statement<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	let scrutinee = parse_condition(tokens, actions)?;
	let mut switch = actions.begin_switch(scrutinee);
	let location = consume(Token::BraceLeft, "expected switch body", tokens)?;
	actions.enter_block(&location);
	loop
	{
		match peek(tokens)
		{
			Some(Token::BraceRight) =>
			{
				tokens.pop_front();
				break;
			}
			Some(Token::Case) =>
			{
				tokens.pop_front();
				let value = parse_case_value(tokens, actions)?;
				consume(Token::Colon, "expected colon", tokens)?;
				actions.case_label(&mut switch, value);
			}
			Some(Token::Default) =>
			{
				tokens.pop_front();
				consume(Token::Colon, "expected colon", tokens)?;
				actions.default_label(&mut switch);
			}
			_ => parse_statement(tokens, actions)?,
		}
	}
	actions.exit_block(&tokens.last_location)?;
	actions.end_switch(switch);
	Ok(())
}

/// Case values are constants, so that testing them emits no code.
fn parse_case_value<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let is_negative = if let Some(Token::Minus) = peek(tokens)
	{
		tokens.pop_front();
		true
	}
	else
	{
		false
	};
	let (token, location) = extract("expected constant", tokens)?;
	let literal = match token
	{
		Token::IntegerLiteral(text) if is_negative =>
		{
			Literal::Integer(format!("-{}", text))
		}
		Token::FloatLiteral(text) if is_negative =>
		{
			Literal::Float(format!("-{}", text))
		}
		Token::IntegerLiteral(text) => Literal::Integer(text),
		Token::FloatLiteral(text) => Literal::Float(text),
		Token::CharLiteral(value) if !is_negative => Literal::Char(value),
		Token::BoolLiteral(value) if !is_negative => Literal::Bool(value),
		_ =>
		{
			return Err(Error::UnexpectedToken {
				expectation: "expected constant".to_string(),
				location,
			})
		}
	};
	Ok(actions.literal(literal))
}

/// Either an assignment to a variable or an expression evaluated for its
/// side effects.
fn parse_simple_statement<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<(), Error>
{
	if let (Some(Token::Identifier(_)), Some(Token::Assignment)) =
		(peek(tokens), peek_second(tokens))
	{
		let start = tokens.start_location_span();
		let target = extract_identifier("expected variable name", tokens)?;
		tokens.pop_front();
		let value = parse_expression(tokens, actions)?;
		let location = tokens.location_of_span(start);
		actions.assign(target, value, location);
	}
	else
	{
		let value = parse_expression(tokens, actions)?;
		actions.expression_statement(value);
	}
	Ok(())
}

fn parse_expression<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	parse_disjunction(tokens, actions)
}

fn parse_disjunction<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let mut expression = parse_conjunction(tokens, actions)?;
	while let Some(Token::LogicalOr) = peek(tokens)
	{
		tokens.pop_front();
		let right = parse_conjunction(tokens, actions)?;
		expression = actions.binary(BinaryOp::LogicalOr, expression, right);
	}
	Ok(expression)
}

fn parse_conjunction<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let mut expression = parse_equality(tokens, actions)?;
	while let Some(Token::LogicalAnd) = peek(tokens)
	{
		tokens.pop_front();
		let right = parse_equality(tokens, actions)?;
		expression = actions.binary(BinaryOp::LogicalAnd, expression, right);
	}
	Ok(expression)
}

fn parse_equality<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let mut expression = parse_comparison(tokens, actions)?;
	loop
	{
		let op = match peek(tokens)
		{
			Some(Token::Equals) => BinaryOp::Equals,
			Some(Token::DoesNotEqual) => BinaryOp::DoesNotEqual,
			_ => return Ok(expression),
		};
		tokens.pop_front();
		let right = parse_comparison(tokens, actions)?;
		expression = actions.binary(op, expression, right);
	}
}

fn parse_comparison<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let mut expression = parse_addition(tokens, actions)?;
	loop
	{
		let op = match peek(tokens)
		{
			Some(Token::Less) => BinaryOp::IsLess,
			Some(Token::Greater) => BinaryOp::IsGreater,
			Some(Token::LessEquals) => BinaryOp::IsLE,
			Some(Token::GreaterEquals) => BinaryOp::IsGE,
			_ => return Ok(expression),
		};
		tokens.pop_front();
		let right = parse_addition(tokens, actions)?;
		expression = actions.binary(op, expression, right);
	}
}

fn parse_addition<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let mut expression = parse_multiplication(tokens, actions)?;
	loop
	{
		let op = match peek(tokens)
		{
			Some(Token::Plus) => BinaryOp::Add,
			Some(Token::Minus) => BinaryOp::Subtract,
			_ => return Ok(expression),
		};
		tokens.pop_front();
		let right = parse_multiplication(tokens, actions)?;
		expression = actions.binary(op, expression, right);
	}
}

fn parse_multiplication<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let mut expression = parse_unary_expression(tokens, actions)?;
	loop
	{
		let op = match peek(tokens)
		{
			Some(Token::Times) => BinaryOp::Multiply,
			Some(Token::Divide) => BinaryOp::Divide,
			Some(Token::Modulo) => BinaryOp::Modulo,
			_ => return Ok(expression),
		};
		tokens.pop_front();
		let right = parse_unary_expression(tokens, actions)?;
		expression = actions.binary(op, expression, right);
	}
}

fn parse_unary_expression<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let op = match peek(tokens)
	{
		Some(Token::Minus) => UnaryOp::Negate,
		Some(Token::Exclamation) => UnaryOp::Not,
		Some(Token::Ampersand) =>
		{
			tokens.pop_front();
			let name = extract_identifier("expected variable name", tokens)?;
			return Ok(actions.address_of(name));
		}
		Some(Token::Times) =>
		{
			tokens.pop_front();
			let name = extract_identifier("expected variable name", tokens)?;
			return Ok(actions.dereference(name));
		}
		Some(Token::Increment) | Some(Token::Decrement) =>
		{
			let op = match tokens.pop_front()
			{
				Some((Token::Increment, _)) => IncrementOp::PreIncrement,
				_ => IncrementOp::PreDecrement,
			};
			let name = extract_identifier("expected variable name", tokens)?;
			return Ok(actions.increment(op, name));
		}
		_ => return parse_postfix_expression(tokens, actions),
	};
	tokens.pop_front();
	let operand = parse_unary_expression(tokens, actions)?;
	Ok(actions.unary(op, operand))
}

fn parse_postfix_expression<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	if let Some(Token::Identifier(_)) = peek(tokens)
	{
		let name = extract_identifier("expected identifier", tokens)?;
		match peek(tokens)
		{
			Some(Token::Increment) =>
			{
				tokens.pop_front();
				Ok(actions.increment(IncrementOp::PostIncrement, name))
			}
			Some(Token::Decrement) =>
			{
				tokens.pop_front();
				Ok(actions.increment(IncrementOp::PostDecrement, name))
			}
			Some(Token::ParenLeft) =>
			{
				let arguments = parse_arguments(tokens, actions)?;
				Ok(actions.call(name, arguments))
			}
			_ => Ok(actions.identifier(name)),
		}
	}
	else
	{
		parse_primary_expression(tokens, actions)
	}
}

fn parse_primary_expression<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<ExprResult, Error>
{
	let (token, location) = extract("expected expression", tokens)?;
	let literal = match token
	{
		Token::ParenLeft =>
		{
			let expression = parse_expression(tokens, actions)?;
			consume(Token::ParenRight, "expected right parenthesis", tokens)?;
			return Ok(expression);
		}
		Token::IntegerLiteral(text) => Literal::Integer(text),
		Token::FloatLiteral(text) => Literal::Float(text),
		Token::CharLiteral(value) => Literal::Char(value),
		Token::StringLiteral(value) => Literal::String(value),
		Token::BoolLiteral(value) => Literal::Bool(value),
		_ =>
		{
			return Err(Error::UnexpectedToken {
				expectation: "expected expression".to_string(),
				location,
			})
		}
	};
	Ok(actions.literal(literal))
}

fn parse_arguments<A: SemanticActions>(
	tokens: &mut Tokens,
	actions: &mut A,
) -> Result<Vec<Argument>, Error>
{
	consume(Token::ParenLeft, "expected argument list", tokens)?;

	let mut arguments = Vec::new();

	loop
	{
		if let Some(Token::ParenRight) = peek(tokens)
		{
			break;
		}

		let start = tokens.start_location_span();
		let value = parse_expression(tokens, actions)?;
		let location = tokens.location_of_span(start);
		arguments.push(Argument { value, location });

		if let Some(Token::Comma) = peek(tokens)
		{
			tokens.pop_front();
		}
		else
		{
			break;
		}
	}

	consume(
		Token::ParenRight,
		"expected comma or right parenthesis",
		tokens,
	)?;

	Ok(arguments)
}
