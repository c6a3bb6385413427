//! Expression translator - scalar expressions to dialect text.

use crate::oql::token::{Token, TokenStream};
use crate::rex::{Literal, RexNode, RexOp};

use super::Unsupported;

/// Tree-walking renderer from [`RexNode`] to dialect text.
///
/// Field references resolve against the uniquified input field names. Any
/// construct without a rendering rule fails with [`Unsupported`], which the
/// enclosing acceptance rule turns into a rejection.
pub struct OqlTranslator {
    fields: Vec<String>,
}

impl OqlTranslator {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Render `expr` to dialect text.
    pub fn translate(&self, expr: &RexNode) -> Result<String, Unsupported> {
        Ok(self.tokens(expr)?.serialize())
    }

    fn tokens(&self, expr: &RexNode) -> Result<TokenStream, Unsupported> {
        let mut ts = TokenStream::new();
        match expr {
            RexNode::FieldRef(index) => {
                let name = self.fields.get(*index).ok_or(Unsupported)?;
                ts.push(Token::Ident(name.clone()));
            }

            RexNode::Literal(lit) => {
                ts.push(literal_token(lit)?);
            }

            // Casts carry no dialect syntax; render the inner expression.
            RexNode::Cast { expr, .. } => {
                ts.append(&self.tokens(expr)?);
            }

            RexNode::Call { op, operands } => match op {
                RexOp::Item => self.item_access(&mut ts, operands)?,
                RexOp::And | RexOp::Or => {
                    let joiner = if *op == RexOp::And {
                        Token::And
                    } else {
                        Token::Or
                    };
                    for (i, operand) in operands.iter().enumerate() {
                        if i > 0 {
                            ts.space().push(joiner.clone()).space();
                        }
                        ts.append(&self.tokens(operand)?);
                    }
                }
                _ if op.is_comparison() => {
                    if operands.len() != 2 {
                        return Err(Unsupported);
                    }
                    ts.append(&self.tokens(&operands[0])?);
                    ts.space().push(comparison_token(*op)?).space();
                    ts.append(&self.tokens(&operands[1])?);
                }
                // NOT and anything else have no rendering rule.
                _ => return Err(Unsupported),
            },
        }
        Ok(ts)
    }

    /// Item access renders on the key's static type: integer keys as
    /// `base[n]`, string keys as `base.key` with the quotes stripped.
    fn item_access(&self, ts: &mut TokenStream, operands: &[RexNode]) -> Result<(), Unsupported> {
        if operands.len() != 2 {
            return Err(Unsupported);
        }
        let base = self.tokens(&operands[0])?;
        match operands[1].skip_casts() {
            RexNode::Literal(Literal::Int(n)) => {
                ts.append(&base);
                ts.push(Token::LBracket)
                    .push(Token::LitInt(*n))
                    .push(Token::RBracket);
            }
            RexNode::Literal(Literal::String(key)) => {
                ts.append(&base);
                ts.push(Token::Dot).push(Token::Ident(key.clone()));
            }
            _ => return Err(Unsupported),
        }
        Ok(())
    }
}

fn literal_token(lit: &Literal) -> Result<Token, Unsupported> {
    Ok(match lit {
        Literal::Int(n) => Token::LitInt(*n),
        Literal::Float(f) => {
            if f.is_nan() || f.is_infinite() {
                return Err(Unsupported);
            }
            Token::LitFloat(*f)
        }
        Literal::String(s) => Token::LitString(s.clone()),
        Literal::Bool(b) => Token::LitBool(*b),
        Literal::Null => Token::LitNull,
    })
}

fn comparison_token(op: RexOp) -> Result<Token, Unsupported> {
    Ok(match op {
        RexOp::Eq => Token::Eq,
        RexOp::Ne => Token::Ne,
        RexOp::Lt => Token::Lt,
        RexOp::Lte => Token::Lte,
        RexOp::Gt => Token::Gt,
        RexOp::Gte => Token::Gte,
        _ => return Err(Unsupported),
    })
}
