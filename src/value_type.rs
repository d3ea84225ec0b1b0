//
// Part of tacit
// Copyright (c) 2026 The tacit authors
// License: MIT
//

//! Primitive value types and the rules for promotion and assignment.

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType
{
	Int,
	Float,
	Char,
	Bool,
	Void,
	Pointer
	{
		deref_type: Box<ValueType>,
	},
	/// Stands in for a type that could not be determined. It is accepted
	/// wherever a type is checked, so one mistake yields one diagnostic.
	Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp
{
	Add,
	Subtract,
	Multiply,
	Divide,
	Modulo,
	Equals,
	DoesNotEqual,
	IsLess,
	IsGreater,
	IsLE,
	IsGE,
	LogicalAnd,
	LogicalOr,
}

impl BinaryOp
{
	pub fn symbol(&self) -> &'static str
	{
		match self
		{
			BinaryOp::Add => "+",
			BinaryOp::Subtract => "-",
			BinaryOp::Multiply => "*",
			BinaryOp::Divide => "/",
			BinaryOp::Modulo => "%",
			BinaryOp::Equals => "==",
			BinaryOp::DoesNotEqual => "!=",
			BinaryOp::IsLess => "<",
			BinaryOp::IsGreater => ">",
			BinaryOp::IsLE => "<=",
			BinaryOp::IsGE => ">=",
			BinaryOp::LogicalAnd => "&&",
			BinaryOp::LogicalOr => "||",
		}
	}

	pub fn is_arithmetic(&self) -> bool
	{
		match self
		{
			BinaryOp::Add => true,
			BinaryOp::Subtract => true,
			BinaryOp::Multiply => true,
			BinaryOp::Divide => true,
			BinaryOp::Modulo => true,
			BinaryOp::Equals => false,
			BinaryOp::DoesNotEqual => false,
			BinaryOp::IsLess => false,
			BinaryOp::IsGreater => false,
			BinaryOp::IsLE => false,
			BinaryOp::IsGE => false,
			BinaryOp::LogicalAnd => false,
			BinaryOp::LogicalOr => false,
		}
	}
}

impl ValueType
{
	pub fn pointer_to(deref_type: ValueType) -> ValueType
	{
		ValueType::Pointer {
			deref_type: Box::new(deref_type),
		}
	}

	/// Wrap a base type in `depth` levels of pointers, as in `int **u`.
	pub fn with_pointer_depth(self, depth: usize) -> ValueType
	{
		(0..depth).fold(self, |vt, _| ValueType::pointer_to(vt))
	}

	pub fn get_pointee_type(&self) -> Option<ValueType>
	{
		match self
		{
			ValueType::Pointer { deref_type } => Some(deref_type.as_ref().clone()),
			_ => None,
		}
	}

	pub fn is_error(&self) -> bool
	{
		match self
		{
			ValueType::Error => true,
			_ => false,
		}
	}

	/// Whether a value of this type, or a pointer chain ending in it,
	/// could not be determined.
	pub fn contains_error(&self) -> bool
	{
		match self
		{
			ValueType::Error => true,
			ValueType::Pointer { deref_type } => deref_type.contains_error(),
			_ => false,
		}
	}

	pub fn is_integral(&self) -> bool
	{
		match self
		{
			ValueType::Int => true,
			ValueType::Char => true,
			ValueType::Bool => true,
			ValueType::Float => false,
			ValueType::Void => false,
			ValueType::Pointer { .. } => false,
			ValueType::Error => false,
		}
	}

	/// The result type of an arithmetic operation: `Float` wins over
	/// everything else and `Error` wins over `Float`.
	pub fn promote(a: &ValueType, b: &ValueType) -> ValueType
	{
		match (a, b)
		{
			(ValueType::Error, _) | (_, ValueType::Error) => ValueType::Error,
			(ValueType::Float, _) | (_, ValueType::Float) => ValueType::Float,
			_ => ValueType::Int,
		}
	}

	/// The result type of any binary operation. Comparisons and logical
	/// operators produce a `Bool` whatever their operands are.
	pub fn binary_result(op: BinaryOp, a: &ValueType, b: &ValueType)
		-> ValueType
	{
		if op.is_arithmetic()
		{
			ValueType::promote(a, b)
		}
		else
		{
			ValueType::Bool
		}
	}

	/// The result type of arithmetic negation.
	pub fn negated(&self) -> ValueType
	{
		match self
		{
			ValueType::Float => ValueType::Float,
			ValueType::Error => ValueType::Error,
			_ => ValueType::Int,
		}
	}

	/// Whether a value of type `source` may be stored in a variable of this
	/// type. Widening from `Int` to `Float` happens implicitly, narrowing
	/// from `Float` to any integral type does not.
	pub fn can_be_assigned_from(&self, source: &ValueType) -> bool
	{
		if self == source
		{
			return !matches!(self, ValueType::Void);
		}
		match (self, source)
		{
			(ValueType::Error, _) => true,
			(_, ValueType::Error) => true,
			(ValueType::Float, x) if x.is_integral() => true,
			(x, y) if x.is_integral() && y.is_integral() => true,
			(ValueType::Pointer { deref_type: a }, ValueType::Pointer {
				deref_type: b,
			}) => match (a.as_ref(), b.as_ref())
			{
				(ValueType::Void, _) => true,
				(_, ValueType::Void) => true,
				(a, b) if a.contains_error() || b.contains_error() => true,
				(a, b) => a == b,
			},
			_ => false,
		}
	}
}

impl std::fmt::Display for ValueType
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self
		{
			ValueType::Int => write!(f, "int"),
			ValueType::Float => write!(f, "float"),
			ValueType::Char => write!(f, "char"),
			ValueType::Bool => write!(f, "bool"),
			ValueType::Void => write!(f, "void"),
			ValueType::Pointer { deref_type } => write!(f, "{}*", deref_type),
			ValueType::Error => write!(f, "<error>"),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn promote_arithmetic()
	{
		let int = ValueType::Int;
		let float = ValueType::Float;
		assert_eq!(ValueType::promote(&int, &int), ValueType::Int);
		assert_eq!(ValueType::promote(&int, &float), ValueType::Float);
		assert_eq!(ValueType::promote(&float, &int), ValueType::Float);
		assert_eq!(ValueType::promote(&float, &float), ValueType::Float);
		assert_eq!(
			ValueType::promote(&ValueType::Char, &ValueType::Bool),
			ValueType::Int
		);
	}

	#[test]
	fn propagate_error_through_arithmetic()
	{
		let error = ValueType::Error;
		assert_eq!(ValueType::promote(&error, &ValueType::Float), error);
		assert_eq!(ValueType::promote(&ValueType::Int, &error), error);
		assert_eq!(
			ValueType::binary_result(BinaryOp::Add, &error, &ValueType::Int),
			error
		);
	}

	#[test]
	fn comparisons_are_bool()
	{
		let ops = [
			BinaryOp::Equals,
			BinaryOp::DoesNotEqual,
			BinaryOp::IsLess,
			BinaryOp::IsGreater,
			BinaryOp::IsLE,
			BinaryOp::IsGE,
			BinaryOp::LogicalAnd,
			BinaryOp::LogicalOr,
		];
		for op in ops
		{
			for (a, b) in [
				(ValueType::Int, ValueType::Float),
				(ValueType::Float, ValueType::Float),
				(ValueType::Char, ValueType::Int),
				(ValueType::Error, ValueType::Int),
			]
			{
				assert_eq!(ValueType::binary_result(op, &a, &b), ValueType::Bool);
			}
		}
	}

	#[test]
	fn reject_narrowing()
	{
		assert!(!ValueType::Int.can_be_assigned_from(&ValueType::Float));
		assert!(!ValueType::Char.can_be_assigned_from(&ValueType::Float));
		assert!(ValueType::Float.can_be_assigned_from(&ValueType::Int));
		assert!(ValueType::Int.can_be_assigned_from(&ValueType::Int));
		assert!(ValueType::Int.can_be_assigned_from(&ValueType::Error));
		assert!(ValueType::Error.can_be_assigned_from(&ValueType::Float));
		assert!(!ValueType::Void.can_be_assigned_from(&ValueType::Void));
	}

	#[test]
	fn assign_pointers()
	{
		let int_ptr = ValueType::pointer_to(ValueType::Int);
		let float_ptr = ValueType::pointer_to(ValueType::Float);
		let void_ptr = ValueType::pointer_to(ValueType::Void);
		let error_ptr = ValueType::pointer_to(ValueType::Error);
		assert!(int_ptr.can_be_assigned_from(&int_ptr));
		assert!(!int_ptr.can_be_assigned_from(&float_ptr));
		assert!(int_ptr.can_be_assigned_from(&void_ptr));
		assert!(int_ptr.can_be_assigned_from(&error_ptr));
		assert!(!int_ptr.can_be_assigned_from(&ValueType::Int));
		assert!(!ValueType::Int.can_be_assigned_from(&int_ptr));
	}

	#[test]
	fn display_nested_pointers()
	{
		let vt = ValueType::Int.with_pointer_depth(2);
		assert_eq!(vt.to_string(), "int**");
		assert_eq!(vt.get_pointee_type(), Some(ValueType::pointer_to(ValueType::Int)));
	}
}
