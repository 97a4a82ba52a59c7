use std::fmt;

use log::{debug, trace};

use crate::parser::{BinOpKind, Node};

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Temp(usize),
    Ident(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Temp(n) => write!(f, "t{n}"),
            Operand::Ident(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// `tN = value`
    Load { dest: usize, value: f64 },
    /// `tN = lhs op rhs`
    Binary {
        dest: usize,
        op: BinOpKind,
        lhs: Operand,
        rhs: Operand,
    },
    /// `result in: operand`
    Result(Operand),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Load { dest, value } => write!(f, "{} = {value}", Operand::Temp(*dest)),
            Instruction::Binary { dest, op, lhs, rhs } => {
                write!(f, "{} = {lhs} {op} {rhs}", Operand::Temp(*dest))
            }
            Instruction::Result(operand) => write!(f, "result in: {operand}"),
        }
    }
}

/// Linear three-address code, always terminated by a `Result` instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Tac(pub Vec<Instruction>);

impl Tac {
    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }

    /// The operand named by the closing `result in:` line.
    pub fn result(&self) -> Option<&Operand> {
        match self.0.last() {
            Some(Instruction::Result(operand)) => Some(operand),
            _ => None,
        }
    }
}

impl fmt::Display for Tac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

pub struct Codegen {
    temp_index: usize,
    instructions: Vec<Instruction>,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            temp_index: 1,
            instructions: vec![],
        }
    }

    pub fn generate(mut self, node: &Node) -> Tac {
        let result = self.gen_node(node);
        self.instructions.push(Instruction::Result(result));
        debug!("generated {} instructions", self.instructions.len());

        Tac(self.instructions)
    }

    fn new_temp(&mut self) -> usize {
        let t = self.temp_index;
        self.temp_index += 1;
        t
    }

    fn emit(&mut self, instruction: Instruction) {
        trace!("{instruction}");
        self.instructions.push(instruction);
    }

    /// Post-order with explicit stacks; the left subtree is fully emitted
    /// before the right one starts.
    fn gen_node(&mut self, node: &Node) -> Operand {
        let mut work = vec![Step::Visit(node)];
        let mut operands = vec![];

        while let Some(step) = work.pop() {
            match step {
                Step::Visit(Node::Num { value, .. }) => {
                    let dest = self.new_temp();
                    self.emit(Instruction::Load {
                        dest,
                        value: *value,
                    });
                    operands.push(Operand::Temp(dest));
                }
                Step::Visit(Node::Ident { name, .. }) => {
                    operands.push(Operand::Ident(name.clone()));
                }
                Step::Visit(Node::BinOp {
                    op, left, right, ..
                }) => {
                    work.push(Step::Combine(*op));
                    work.push(Step::Visit(right.as_ref()));
                    work.push(Step::Visit(left.as_ref()));
                }
                Step::Combine(op) => {
                    let (Some(rhs), Some(lhs)) = (operands.pop(), operands.pop()) else {
                        unreachable!("operand stack underflow combining {op}");
                    };
                    let dest = self.new_temp();
                    self.emit(Instruction::Binary { dest, op, lhs, rhs });
                    operands.push(Operand::Temp(dest));
                }
            }
        }

        match (operands.pop(), operands.is_empty()) {
            (Some(result), true) => result,
            _ => unreachable!("unbalanced operand stack"),
        }
    }
}

enum Step<'a> {
    Visit(&'a Node),
    Combine(BinOpKind),
}
