//! Indented textual dump of an operation tree
//!
//! One line per node: kind, result type, constant, implicitness, locus and
//! plain attributes. Each attached slot follows on its own line, with the
//! slot's operations indented below it.
//!
//! ```text
//! ExpressionStatement @ file#0@0..6
//!   operation:
//!     SimpleAssignment type=type#1 @ file#0@0..5 is_ref=false
//!       target:
//!         LocalReference type=type#1 @ file#0@0..1 local=LocalId(0) is_declaration=false
//!       value:
//!         Literal type=type#1 constant=2 @ file#0@4..5
//! ```

use crate::node::Operation;
use crate::visitor::OperationVisitor;
use std::fmt::Write;

/// Renders `operation` and everything below it
#[must_use]
pub fn dump(operation: &Operation) -> String {
    let mut dumper = TreeDumper::default();
    operation.accept(&mut dumper);
    dumper.output
}

#[derive(Default)]
struct TreeDumper {
    output: String,
    depth: usize,
}

impl TreeDumper {
    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
    }

    fn write_node(&mut self, operation: &Operation) {
        self.indent();
        let header = operation.header();
        let _ = write!(self.output, "{}", operation.kind());
        if let Some(result_type) = header.result_type {
            let _ = write!(self.output, " type={result_type}");
        }
        if let Some(constant) = &header.constant_value {
            let _ = write!(self.output, " constant={constant}");
        }
        if header.is_implicit {
            self.output.push_str(" implicit");
        }
        let _ = write!(self.output, " @ {}", header.locus);
        operation.payload().describe(&mut |name, value| {
            let _ = write!(self.output, " {name}={value:?}");
        });
        self.output.push('\n');
    }
}

impl OperationVisitor for TreeDumper {
    fn default_visit(&mut self, operation: &Operation) {
        self.write_node(operation);
        self.depth += 1;
        for slot in operation.slots() {
            self.indent();
            if slot.is_empty() {
                let _ = writeln!(self.output, "{}: <empty>", slot.name());
                continue;
            }
            let _ = writeln!(self.output, "{}:", slot.name());
            self.depth += 1;
            for child in slot.iter() {
                child.accept(self);
            }
            self.depth -= 1;
        }
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{LiteralOperation, ReturnOperation};
    use crate::slot::OptionalChild;
    use crate::{OperationHeader, OperationKind};
    use expect_test::expect;
    use ot_span::{FileId, SourceLocus, Span};
    use ot_symbols::TypeId;

    #[test]
    fn test_dump_nests_slots_under_their_node() {
        let value = Operation::new(
            OperationHeader::new(SourceLocus::new(FileId(1), Span::new(7, 11)))
                .with_type(TypeId(4))
                .with_constant(true)
                .implicit(),
            LiteralOperation {},
        )
        .expect("literal");
        let statement = Operation::new(
            OperationHeader::new(SourceLocus::new(FileId(1), Span::new(0, 12))),
            ReturnOperation {
                kind: OperationKind::YieldReturn,
                returned_value: OptionalChild::eager(Some(value)),
            },
        )
        .expect("yield return");

        expect![[r#"
            YieldReturn @ file#1@0..12
              returned_value:
                Literal type=type#4 constant=true implicit @ file#1@7..11
        "#]]
        .assert_eq(&dump(&statement));
    }
}
