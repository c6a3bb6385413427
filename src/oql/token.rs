//! OQL tokens - the atomic units of query output.
//!
//! Tokens serialize to the single dialect the region store understands, so
//! serialization takes no dialect parameter. Adding a variant forces every
//! match site to be revisited.

/// OQL token - every element that can appear in a rendered query.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    Or,
    As,
    GroupBy,
    OrderBy,
    Asc,
    Desc,
    Limit,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,
    LBracket,
    RBracket,

    // === Operators ===
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,

    // === Whitespace ===
    Space,

    // === Dynamic content ===
    /// Unquoted identifier (field name, alias). The dialect has no
    /// identifier quoting.
    Ident(String),
    /// Region path, rendered with a leading slash: `/BookMaster`.
    Region(String),
    /// Integer literal
    LitInt(i64),
    /// Unsigned integer literal (row limits)
    LitUint(u64),
    /// Float literal
    LitFloat(f64),
    /// String literal, single-quoted with `''` escaping
    LitString(String),
    /// Boolean literal
    LitBool(bool),
    /// NULL literal
    LitNull,

    /// Aggregate or other function name, rendered uppercase.
    FunctionName(String),

    /// Already-rendered fragment (predicate atoms, aggregate call text).
    /// Fragments are produced by the expression translator and are never
    /// re-parsed here.
    Fragment(String),
}

impl Token {
    /// Serialize this token to query text.
    pub fn serialize(&self) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::As => "AS".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::Limit => "LIMIT".into(),

            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::LBracket => "[".into(),
            Token::RBracket => "]".into(),

            Token::Eq => "=".into(),
            Token::Ne => "<>".into(),
            Token::Lt => "<".into(),
            Token::Gt => ">".into(),
            Token::Lte => "<=".into(),
            Token::Gte => ">=".into(),

            Token::Space => " ".into(),

            Token::Ident(name) => name.clone(),
            Token::Region(name) => format!("/{}", name),
            Token::LitInt(n) => n.to_string(),
            Token::LitUint(n) => n.to_string(),
            Token::LitFloat(f) => {
                if f.is_nan() {
                    panic!("Cannot serialize NaN literal")
                }
                if f.is_infinite() {
                    panic!("Cannot serialize Infinity literal")
                }
                let mut buffer = ryu::Buffer::new();
                buffer.format(*f).to_string()
            }
            Token::LitString(s) => format!("'{}'", s.replace('\'', "''")),
            Token::LitBool(b) => if *b { "true" } else { "false" }.into(),
            Token::LitNull => "NULL".into(),

            Token::FunctionName(name) => name.to_uppercase(),

            Token::Fragment(s) => s.clone(),
        }
    }
}

/// A stream of tokens that serializes to one query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize all tokens to query text.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(Token::serialize).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}
