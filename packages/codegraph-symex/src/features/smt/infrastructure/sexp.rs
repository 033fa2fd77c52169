//! Minimal s-expression reader for solver responses

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    /// Symbol, numeral, `#b`/`#x` literal (quotes of `|sym|` removed)
    Atom(String),
    /// String literal with `""` escapes resolved
    Str(String),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(items) => Some(items),
            _ => None,
        }
    }

    /// `(error "...")` reply, if this is one
    pub fn error_message(&self) -> Option<&str> {
        match self.as_list()? {
            [SExpr::Atom(head), SExpr::Str(message)] if head == "error" => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(a) => f.write_str(a),
            SExpr::Str(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            SExpr::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// True once `text` holds at least one complete top-level expression
/// (parentheses balanced outside string literals and quoted symbols).
pub fn is_complete(text: &str) -> bool {
    let mut depth = 0i64;
    let mut seen_token = false;
    let mut in_string = false;
    let mut in_quoted = false;
    for c in text.chars() {
        if in_string {
            if c == '"' {
                in_string = false;
            }
            continue;
        }
        if in_quoted {
            if c == '|' {
                in_quoted = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                seen_token = true;
            }
            '|' => {
                in_quoted = true;
                seen_token = true;
            }
            '(' => {
                depth += 1;
                seen_token = true;
            }
            ')' => depth -= 1,
            c if !c.is_whitespace() => seen_token = true,
            _ => {}
        }
    }
    // A doubled `""` escape closes and reopens the string, so the state
    // after the last character is still accurate.
    seen_token && depth <= 0 && !in_string && !in_quoted
}

/// Parse exactly one expression (surrounding whitespace allowed)
pub fn parse(text: &str) -> Result<SExpr, String> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
    };
    let expr = parser.expr()?;
    parser.skip_whitespace();
    if parser.pos != parser.chars.len() {
        return Err(format!("trailing input at offset {}", parser.pos));
    }
    Ok(expr)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expr(&mut self) -> Result<SExpr, String> {
        self.skip_whitespace();
        match self.peek() {
            None => Err("unexpected end of input".to_string()),
            Some('(') => {
                self.pos += 1;
                let mut items = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.peek() {
                        None => return Err("unclosed list".to_string()),
                        Some(')') => {
                            self.pos += 1;
                            return Ok(SExpr::List(items));
                        }
                        Some(_) => items.push(self.expr()?),
                    }
                }
            }
            Some(')') => Err(format!("unexpected ')' at offset {}", self.pos)),
            Some('"') => self.string(),
            Some('|') => self.quoted_symbol(),
            Some(_) => Ok(self.atom()),
        }
    }

    fn string(&mut self) -> Result<SExpr, String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err("unterminated string literal".to_string()),
                Some('"') => {
                    self.pos += 1;
                    if self.peek() == Some('"') {
                        out.push('"');
                        self.pos += 1;
                    } else {
                        return Ok(SExpr::Str(out));
                    }
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn quoted_symbol(&mut self) -> Result<SExpr, String> {
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '|' {
                let name: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(SExpr::Atom(name));
            }
            self.pos += 1;
        }
        Err("unterminated quoted symbol".to_string())
    }

    fn atom(&mut self) -> SExpr {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' || c == '"' || c == '|' {
                break;
            }
            self.pos += 1;
        }
        SExpr::Atom(self.chars[start..self.pos].iter().collect())
    }
}
