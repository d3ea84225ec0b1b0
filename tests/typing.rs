//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

use tacit::actions::*;
use tacit::lexer::Location;
use tacit::value_type::{BinaryOp, ValueType};
use tacit::Analyzer;

use pretty_assertions::assert_eq;

fn here() -> Location
{
	Location {
		source_filename: "typing.tc".to_string(),
		span: 0..1,
		line_number: 1,
		line_offset: 1,
	}
}

fn value(value_type: ValueType, place: &str) -> ExprResult
{
	ExprResult {
		value_type,
		place: place.to_string(),
	}
}

fn type_of(source: &str, name: &str) -> ValueType
{
	let analysis = tacit::compile_source(source, "typing.tc").unwrap();
	assert!(analysis.is_clean(), "{}", analysis.diagnostics);
	let symbol = analysis.symbols.global_scope().get(name).unwrap();
	symbol.value_type.clone()
}

#[test]
fn promote_arithmetic()
{
	let mut analyzer = Analyzer::new();
	let cases = [
		(ValueType::Int, ValueType::Int, ValueType::Int),
		(ValueType::Int, ValueType::Float, ValueType::Float),
		(ValueType::Float, ValueType::Int, ValueType::Float),
		(ValueType::Float, ValueType::Float, ValueType::Float),
		(ValueType::Char, ValueType::Int, ValueType::Int),
		(ValueType::Error, ValueType::Float, ValueType::Error),
	];
	for (a, b, expected) in cases
	{
		let result =
			analyzer.binary(BinaryOp::Add, value(a, "a"), value(b, "b"));
		assert_eq!(result.value_type, expected);
	}
	assert!(analyzer.diagnostics().is_empty());
}

#[test]
fn compare_to_bool()
{
	let mut analyzer = Analyzer::new();
	let operators = [
		BinaryOp::Equals,
		BinaryOp::DoesNotEqual,
		BinaryOp::IsLess,
		BinaryOp::IsGreater,
		BinaryOp::IsLE,
		BinaryOp::IsGE,
		BinaryOp::LogicalAnd,
		BinaryOp::LogicalOr,
	];
	for op in operators
	{
		let result = analyzer.binary(
			op,
			value(ValueType::Float, "x"),
			value(ValueType::Int, "1"),
		);
		assert_eq!(result.value_type, ValueType::Bool, "{}", op.symbol());
	}
}

#[test]
fn widen_but_do_not_narrow()
{
	assert!(ValueType::Float.can_be_assigned_from(&ValueType::Int));
	assert!(!ValueType::Int.can_be_assigned_from(&ValueType::Float));
	assert!(ValueType::Int.can_be_assigned_from(&ValueType::Char));
	assert!(ValueType::Char.can_be_assigned_from(&ValueType::Int));
	assert!(!ValueType::Bool.can_be_assigned_from(&ValueType::Float));
	assert!(!ValueType::Void.can_be_assigned_from(&ValueType::Void));
}

#[test]
fn accept_error_anywhere()
{
	let int_pointer = ValueType::pointer_to(ValueType::Int);
	let error_pointer = ValueType::pointer_to(ValueType::Error);
	assert!(ValueType::Int.can_be_assigned_from(&ValueType::Error));
	assert!(ValueType::Error.can_be_assigned_from(&ValueType::Float));
	assert!(int_pointer.can_be_assigned_from(&error_pointer));
	assert!(!int_pointer.can_be_assigned_from(&ValueType::Int));
}

#[test]
fn infer_pointer_types()
{
	let source = "int n;\nint *p = &n;\nint **pp = &p;";
	assert_eq!(
		type_of(source, "pp"),
		ValueType::Int.with_pointer_depth(2)
	);

	let mut analyzer = Analyzer::new();
	let unknown = analyzer.address_of(Identifier {
		name: "nowhere".to_string(),
		location: here(),
	});
	assert_eq!(
		unknown.value_type,
		ValueType::pointer_to(ValueType::Error)
	);
	assert!(analyzer.diagnostics().is_empty());
}

#[test]
fn dereference_to_base_type()
{
	let source = "float f;\nfloat *p = &f;\nfloat g = *p;";
	assert_eq!(type_of(source, "g"), ValueType::Float);

	let analysis =
		tacit::compile_source("char *s = \"abc\";\nint n = *s;", "deref.tc")
			.unwrap();
	assert!(analysis.is_clean(), "{}", analysis.diagnostics);
}

#[test]
fn type_literals()
{
	let mut analyzer = Analyzer::new();
	let cases = [
		(Literal::Integer("7".to_string()), ValueType::Int, "7"),
		(Literal::Float("2.5".to_string()), ValueType::Float, "2.5"),
		(Literal::Char('c'), ValueType::Char, "'c'"),
		(Literal::Bool(false), ValueType::Bool, "false"),
		(
			Literal::String("s".to_string()),
			ValueType::pointer_to(ValueType::Char),
			"\"s\"",
		),
	];
	for (literal, expected_type, expected_place) in cases
	{
		let result = analyzer.literal(literal);
		assert_eq!(result.value_type, expected_type);
		assert_eq!(result.place, expected_place);
	}
	assert!(analyzer.generator().is_empty());
}

#[test]
fn suppress_cascading_diagnostics()
{
	// Each use of an undeclared name yields one diagnostic, however far
	// the error type propagates from there.
	let source = "float f;\nint i;\ni = (missing + 1) * 2;\nf = -missing;";
	let analysis = tacit::compile_source(source, "cascade.tc").unwrap();
	assert_eq!(analysis.diagnostics.codes(), vec![402, 402]);
}

#[test]
fn type_call_with_return_type()
{
	let source = "float half(int n)\n{\n\treturn n / 2.0;\n}\nfloat h = half(3);";
	assert_eq!(type_of(source, "h"), ValueType::Float);

	let source = "bool ok()\n{\n\treturn true;\n}\nint n = ok();";
	assert_eq!(type_of(source, "n"), ValueType::Int);
}

#[test]
fn negate_types()
{
	let mut analyzer = Analyzer::new();
	let negated =
		analyzer.unary(UnaryOp::Negate, value(ValueType::Float, "x"));
	assert_eq!(negated.value_type, ValueType::Float);
	let negated = analyzer.unary(UnaryOp::Negate, value(ValueType::Char, "c"));
	assert_eq!(negated.value_type, ValueType::Int);
	let inverted = analyzer.unary(UnaryOp::Not, value(ValueType::Float, "x"));
	assert_eq!(inverted.value_type, ValueType::Bool);
}
