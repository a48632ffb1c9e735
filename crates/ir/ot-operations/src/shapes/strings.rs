//! Interpolated strings and their handler-based lowering

use crate::attributes::HandlerPlaceholderKind;
use crate::slot::{Child, ChildList, OptionalChild};
use crate::OperationKind;
use ot_derive::Shape;

/// `$"..."`
#[derive(Debug, Shape)]
#[shape(kind = InterpolatedString)]
pub struct InterpolatedStringOperation {
    /// Text and interpolation parts in order
    pub parts: ChildList,
}

/// Literal text between interpolations
#[derive(Debug, Shape)]
#[shape(kind = InterpolatedStringText)]
pub struct InterpolatedStringTextOperation {
    /// The text as a literal
    pub text: Child,
}

/// `{expression,alignment:format}`
#[derive(Debug, Shape)]
#[shape(kind = Interpolation)]
pub struct InterpolationOperation {
    /// Formatted value
    pub expression: Child,
    /// Alignment
    pub alignment: OptionalChild,
    /// Format string
    pub format_string: OptionalChild,
}

/// Interpolated string lowered onto a handler type
#[derive(Debug, Shape)]
#[shape(kind = InterpolatedStringHandlerCreation)]
pub struct InterpolatedStringHandlerCreationOperation {
    /// Construction of the handler
    pub handler_creation: Child,
    /// Append calls, as an interpolated string or an addition of them
    pub content: Child,
    /// Handler constructor reports whether appending should proceed
    pub handler_creation_has_success_parameter: bool,
    /// Append calls report whether appending should continue
    pub handler_append_calls_return_bool: bool,
}

/// `$"a" + $"b"` lowered onto one handler
#[derive(Debug, Shape)]
#[shape(kind = InterpolatedStringAddition)]
pub struct InterpolatedStringAdditionOperation {
    /// Left part
    pub left: Child,
    /// Right part
    pub right: Child,
}

/// Append call on a handler
#[derive(Debug, Shape)]
#[shape(kinds(InterpolatedStringAppendLiteral, InterpolatedStringAppendFormatted, InterpolatedStringAppendInvalid))]
pub struct InterpolatedStringAppendOperation {
    /// Literal, formatted or failed append
    pub kind: OperationKind,
    /// The call
    pub append_call: Child,
}

/// Value passed to a handler constructor from the call site
#[derive(Debug, Shape)]
#[shape(kind = InterpolatedStringHandlerArgumentPlaceholder)]
pub struct InterpolatedStringHandlerArgumentPlaceholderOperation {
    /// What the placeholder stands for
    pub placeholder_kind: HandlerPlaceholderKind,
}
