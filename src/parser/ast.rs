use std::{fmt, mem};

use crate::lexer::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
        };
        f.write_str(op)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Num {
        value: f64,
        pos: Position,
    },
    Ident {
        name: String,
        pos: Position,
    },
    /// `pos` is where the operator token sits.
    BinOp {
        op: BinOpKind,
        left: Box<Node>,
        right: Box<Node>,
        pos: Position,
    },
}

impl Node {
    pub fn new_number(value: f64, pos: Position) -> Self {
        Node::Num { value, pos }
    }

    pub fn new_ident(name: impl Into<String>, pos: Position) -> Self {
        Node::Ident {
            name: name.into(),
            pos,
        }
    }

    pub fn new_binop(op: BinOpKind, left: Node, right: Node, pos: Position) -> Self {
        Node::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            pos,
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            Node::Num { pos, .. } | Node::Ident { pos, .. } | Node::BinOp { pos, .. } => *pos,
        }
    }
}

/// Indented outline, two spaces per level, no trailing newline.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Left-leaning chains get as deep as the expression is long, so walk
        // with an explicit stack rather than recursing.
        let mut stack = vec![(self, 0)];
        let mut first = true;

        while let Some((node, depth)) = stack.pop() {
            if !first {
                writeln!(f)?;
            }
            first = false;

            let indent = "  ".repeat(depth);
            match node {
                Node::Num { value, .. } => write!(f, "{indent}Num({value})")?,
                Node::Ident { name, .. } => write!(f, "{indent}Id({name})")?,
                Node::BinOp {
                    op, left, right, ..
                } => {
                    write!(f, "{indent}BinOp({op})")?;
                    stack.push((right.as_ref(), depth + 1));
                    stack.push((left.as_ref(), depth + 1));
                }
            }
        }
        Ok(())
    }
}

/// Detaches nested operator children so dropping a deep tree stays iterative.
fn take_children(node: &mut Node, pending: &mut Vec<Node>) {
    if let Node::BinOp { left, right, .. } = node {
        for child in [left, right] {
            if matches!(**child, Node::BinOp { .. }) {
                let leaf = Node::new_number(0.0, child.pos());
                pending.push(mem::replace(&mut **child, leaf));
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = vec![];
        take_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            take_children(&mut node, &mut pending);
        }
    }
}
