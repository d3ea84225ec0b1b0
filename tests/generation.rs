//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

use tacit::generator::{render, Format};

use pretty_assertions::assert_eq;

fn generate(source: &str) -> Vec<String>
{
	let analysis = match tacit::compile_source(source, "generation.tc")
	{
		Ok(analysis) => analysis,
		Err(errors) => match errors.panic() {},
	};
	assert!(analysis.is_clean(), "{}", analysis.diagnostics);
	analysis
		.instructions
		.iter()
		.map(|instruction| instruction.to_string())
		.collect()
}

#[test]
fn generate_quadruple_fidelity()
{
	let source =
		std::fs::read_to_string("tests/samples/valid/quadruple_fidelity.tc")
			.unwrap();
	assert_eq!(
		generate(&source),
		vec![
			"(=, 10, _, a)",
			"(=, 20, _, b)",
			"(*, b, 2, t0)",
			"(+, a, t0, t1)",
			"(=, t1, _, c)",
		]
	);
}

#[test]
fn generate_declaration_and_assignment()
{
	assert_eq!(generate("int a;\na = 5;"), vec!["(=, 5, _, a)"]);
}

#[test]
fn generate_despite_incompatible_assignment()
{
	let analysis =
		tacit::compile_source("int n;\nn = 3.14;", "narrow.tc").unwrap();
	assert_eq!(analysis.diagnostics.codes(), vec![500]);
	let code: Vec<String> =
		analysis.instructions.iter().map(|x| x.to_string()).collect();
	assert_eq!(code, vec!["(=, 3.14, _, n)"]);
}

#[test]
fn skip_assignment_to_undeclared_variable()
{
	let analysis =
		tacit::compile_source("a = 10;\nint a;", "undeclared.tc").unwrap();
	assert_eq!(analysis.diagnostics.codes(), vec![402]);
	assert!(analysis.instructions.is_empty());
}

#[test]
fn generate_if_else()
{
	let source = "int x = 1;\nif (x > 0) x = 2; else x = 3;";
	assert_eq!(
		generate(source),
		vec![
			"(=, 1, _, x)",
			"(>, x, 0, t0)",
			"(if_false, t0, _, L0)",
			"(=, 2, _, x)",
			"(goto, _, _, L1)",
			"(label, _, _, L0)",
			"(=, 3, _, x)",
			"(label, _, _, L1)",
		]
	);
}

#[test]
fn generate_if_without_else()
{
	let source = "bool b = true;\nint x;\nif (b) { x = 1; }";
	assert_eq!(
		generate(source),
		vec![
			"(=, true, _, b)",
			"(if_false, b, _, L0)",
			"(=, 1, _, x)",
			"(label, _, _, L0)",
		]
	);
}

#[test]
fn generate_while()
{
	let source = "int i = 0;\nwhile (i < 3) { i = i + 1; }";
	assert_eq!(
		generate(source),
		vec![
			"(=, 0, _, i)",
			"(label, _, _, L0)",
			"(<, i, 3, t0)",
			"(if_false, t0, _, L1)",
			"(+, i, 1, t1)",
			"(=, t1, _, i)",
			"(goto, _, _, L0)",
			"(label, _, _, L1)",
		]
	);
}

#[test]
fn generate_for_with_break()
{
	let source = "int i;
int s = 0;
for (i = 0; i < 10; i++)
{
	if (i == 5) break;
	s = s + i;
}";
	assert_eq!(
		generate(source),
		vec![
			"(=, 0, _, s)",
			"(=, 0, _, i)",
			"(label, _, _, L0)",
			"(<, i, 10, t0)",
			"(if_false, t0, _, L3)",
			"(goto, _, _, L2)",
			"(label, _, _, L1)",
			"(=, i, _, t1)",
			"(+, i, 1, i)",
			"(goto, _, _, L0)",
			"(label, _, _, L2)",
			"(==, i, 5, t2)",
			"(if_false, t2, _, L4)",
			"(goto, _, _, L3)",
			"(label, _, _, L4)",
			"(+, s, i, t3)",
			"(=, t3, _, s)",
			"(goto, _, _, L1)",
			"(label, _, _, L3)",
		]
	);
}

#[test]
fn generate_continue_to_loop_step()
{
	let source = "int i;\nfor (;;) { continue; }";
	assert_eq!(
		generate(source),
		vec![
			"(label, _, _, L0)",
			"(goto, _, _, L2)",
			"(label, _, _, L1)",
			"(goto, _, _, L0)",
			"(label, _, _, L2)",
			"(goto, _, _, L1)",
			"(goto, _, _, L1)",
			"(label, _, _, L3)",
		]
	);
}

#[test]
fn generate_switch_with_fallthrough()
{
	let source = "int a = 2;
int b;
switch (a)
{
	case 1: b = 10; break;
	case 2: b = 20;
	default: b = 0;
}";
	assert_eq!(
		generate(source),
		vec![
			"(=, 2, _, a)",
			"(goto, _, _, L1)",
			"(label, _, _, L1)",
			"(==, a, 1, t0)",
			"(if_false, t0, _, L3)",
			"(label, _, _, L2)",
			"(=, 10, _, b)",
			"(goto, _, _, L0)",
			"(goto, _, _, L4)",
			"(label, _, _, L3)",
			"(==, a, 2, t1)",
			"(if_false, t1, _, L5)",
			"(label, _, _, L4)",
			"(=, 20, _, b)",
			"(label, _, _, L6)",
			"(=, 0, _, b)",
			"(goto, _, _, L0)",
			"(label, _, _, L5)",
			"(goto, _, _, L6)",
			"(label, _, _, L0)",
		]
	);
}

#[test]
fn generate_switch_with_leading_default()
{
	// Every case is tested before control reaches the default body.
	let source = "int x = 2;
int a;
switch (x)
{
	default: a = 1;
	case 2: a = 2;
}";
	assert_eq!(
		generate(source),
		vec![
			"(=, 2, _, x)",
			"(goto, _, _, L1)",
			"(label, _, _, L2)",
			"(=, 1, _, a)",
			"(goto, _, _, L3)",
			"(label, _, _, L1)",
			"(==, x, 2, t0)",
			"(if_false, t0, _, L4)",
			"(label, _, _, L3)",
			"(=, 2, _, a)",
			"(goto, _, _, L0)",
			"(label, _, _, L4)",
			"(goto, _, _, L2)",
			"(label, _, _, L0)",
		]
	);
}

#[test]
fn skip_statements_before_first_case()
{
	let source = "int x = 1;
int a;
switch (x)
{
	a = 7;
	case 1: a = 1;
}";
	assert_eq!(
		generate(source),
		vec![
			"(=, 1, _, x)",
			"(goto, _, _, L1)",
			"(=, 7, _, a)",
			"(label, _, _, L1)",
			"(==, x, 1, t0)",
			"(if_false, t0, _, L3)",
			"(label, _, _, L2)",
			"(=, 1, _, a)",
			"(label, _, _, L3)",
			"(label, _, _, L0)",
		]
	);
}

#[test]
fn generate_escaped_literals()
{
	let source = "char c = '\\n';\nchar q = '\\'';\nchar *s = \"say \\\"hi\\\"\\t\";";
	assert_eq!(
		generate(source),
		vec![
			"(=, '\\n', _, c)",
			"(=, '\\'', _, q)",
			"(=, \"say \\\"hi\\\"\\t\", _, s)",
		]
	);
}

#[test]
fn generate_function_and_call()
{
	let source = "int add(int x, int y)
{
	return x + y;
}
int r = add(1, 2);";
	assert_eq!(
		generate(source),
		vec![
			"(function, _, _, add)",
			"(+, x, y, t0)",
			"(return, t0, _, add)",
			"(end_function, _, _, add)",
			"(param, 1, _, add)",
			"(param, 2, _, add)",
			"(call, add, 2, t1)",
			"(=, t1, _, r)",
		]
	);
}

#[test]
fn generate_return_without_value()
{
	let source = "void noop(void)\n{\n\treturn;\n}\nnoop();";
	assert_eq!(
		generate(source),
		vec![
			"(function, _, _, noop)",
			"(return, _, _, noop)",
			"(end_function, _, _, noop)",
			"(call, noop, 0, t0)",
		]
	);
}

#[test]
fn generate_unary_and_pointer_operations()
{
	let source = "int n = 5;
int *p = &n;
int m = *p;
m = -n;
n++;
--m;
bool b = !m;";
	assert_eq!(
		generate(source),
		vec![
			"(=, 5, _, n)",
			"(&, n, _, t0)",
			"(=, t0, _, p)",
			"(*, p, _, t1)",
			"(=, t1, _, m)",
			"(minus, n, _, t2)",
			"(=, t2, _, m)",
			"(=, n, _, t3)",
			"(+, n, 1, n)",
			"(-, m, 1, m)",
			"(!, m, _, t4)",
			"(=, t4, _, b)",
		]
	);
}

#[test]
fn generate_character_and_string_literals()
{
	let source = "char c = 'x';\nchar *s = \"hi\";";
	assert_eq!(
		generate(source),
		vec!["(=, 'x', _, c)", "(=, \"hi\", _, s)"]
	);
}

#[test]
fn render_listing_of_function()
{
	let source = "int twice(int x)\n{\n\treturn x * 2;\n}";
	let analysis = tacit::compile_source(source, "listing.tc").unwrap();
	assert_eq!(
		render(&analysis.instructions, Format::Listing),
		"function twice:\n    t0 = x * 2\n    return t0\nend function twice\n"
	);
}

#[test]
fn temporaries_are_never_reused()
{
	let source = "int a = 1;
{ int b = a + 1; }
{ int b = a + 2; }
a = a * a;";
	let code = generate(source);
	assert_eq!(
		code,
		vec![
			"(=, 1, _, a)",
			"(+, a, 1, t0)",
			"(=, t0, _, b)",
			"(+, a, 2, t1)",
			"(=, t1, _, b)",
			"(*, a, a, t2)",
			"(=, t2, _, a)",
		]
	);
}
