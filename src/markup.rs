//! Plot titles for humans. A title wants θ, ° and |a|, which are fine in a modern terminal or
//! plotting library but brittle elsewhere, so there isn't just one way to turn a title into a
//! string. Titles are written once as lines of [`Block`]s and each [`RenderMode`] decides how those
//! look.

use fortuples::fortuples;

/// One piece of a title line.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Plain text, formatted for humans.
    Text(String),
    /// A symbol with an ASCII fallback, such as θ.
    Symbol(Symbol),
    /// A lattice parameter. Printed the way `{:?}` prints it, so `1.0` stays `1.0`.
    Number(f64),
    /// The magnitude of a vector: `|a|`.
    Norm(Box<Block>),
    /// Blocks rendered one after another on the same line.
    Concatenation(Vec<Block>),
}

/// A symbol that can be represented using Unicode or ASCII.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Symbol {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl Block {
    pub fn text<T: Into<String>>(string: T) -> Self {
        Block::Text(string.into())
    }

    pub const fn symbol(ascii: &'static str, unicode: &'static str) -> Self {
        Block::Symbol(Symbol { ascii, unicode })
    }

    pub fn number(x: f64) -> Self {
        Block::Number(x)
    }

    pub fn norm(inner: Block) -> Self {
        Block::Norm(Box::new(inner))
    }

    pub fn concat<T: IntoIterator<Item = Block>>(t: T) -> Self {
        Block::Concatenation(t.into_iter().collect())
    }
}

/// How blocks turn into characters.
pub trait RenderMode: Default {
    fn symbol<'s>(&self, sym: &'s Symbol) -> &'s str {
        sym.unicode
    }

    fn render(&self, block: &Block) -> String {
        match block {
            Block::Text(t) => t.clone(),
            Block::Symbol(sym) => self.symbol(sym).to_string(),
            Block::Number(x) => format!("{x:?}"),
            Block::Norm(inner) => format!("|{}|", self.render(inner)),
            Block::Concatenation(blocks) => blocks.iter().map(|b| self.render(b)).collect(),
        }
    }
}

/// A title in progress: one rendered string per line.
#[derive(Debug, Default, Clone)]
pub struct TitleLines<M: RenderMode> {
    lines: Vec<String>,
    mode: M,
}

impl<M: RenderMode> TitleLines<M> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            mode: M::default(),
        }
    }

    /// Renders `block` as a line of its own.
    pub fn push_line(&mut self, block: &Block) -> &mut Self {
        let line = self.mode.render(block);
        self.lines.push(line);
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The finished title, lines joined by `\n`.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Something that contributes zero or more lines to a title.
pub trait Render<M: RenderMode> {
    fn render_lines<'a>(&self, out: &'a mut TitleLines<M>) -> &'a mut TitleLines<M>;

    fn render_as_str(&self) -> String {
        let mut out = TitleLines::<M>::new();
        self.render_lines(&mut out);
        out.finish()
    }
}

impl<M: RenderMode> Render<M> for Block {
    fn render_lines<'a>(&self, out: &'a mut TitleLines<M>) -> &'a mut TitleLines<M> {
        out.push_line(self)
    }
}

/// A line that may be switched off.
impl<M: RenderMode, T: Render<M>> Render<M> for Option<T> {
    fn render_lines<'a>(&self, out: &'a mut TitleLines<M>) -> &'a mut TitleLines<M> {
        match self {
            Some(t) => t.render_lines(out),
            None => out,
        }
    }
}

fortuples! {
    #[tuples::min_size(1)]
    impl<M: RenderMode> Render<M> for #Tuple
    where
        #(#Member: Render<M>),*
    {
        fn render_lines<'a>(&self, out: &'a mut TitleLines<M>) -> &'a mut TitleLines<M> {
            #(#self.render_lines(out);)*

            out
        }
    }
}

/// Full Unicode output.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Unicode {}

impl RenderMode for Unicode {}

/// Plain ASCII, for terminals and files that can't be trusted with anything else.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Ascii {}

impl RenderMode for Ascii {
    fn symbol<'s>(&self, sym: &'s Symbol) -> &'s str {
        sym.ascii
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{DEGREE, THETA};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_symbol_modes() {
        let angle = Block::concat([THETA, Block::text(" = "), Block::number(90.), DEGREE]);
        assert_eq!(Unicode::default().render(&angle), "\u{03B8} = 90.0\u{00B0}");
        assert_eq!(Ascii::default().render(&angle), "theta = 90.0 deg");
    }

    #[test]
    fn test_norm_and_number() {
        let line = Block::concat([
            Block::norm(Block::text("b")),
            Block::text(" = "),
            Block::number(0.5),
        ]);
        assert_eq!(Ascii::default().render(&line), "|b| = 0.5");
        assert_eq!(Unicode::default().render(&Block::number(1.)), "1.0");
    }

    #[test]
    fn test_lines_skip_missing() {
        let title = (Block::text("first"), None::<Block>, Some(Block::text("last")));
        assert_eq!(Render::<Ascii>::render_as_str(&title), "first\nlast");

        let mut out = TitleLines::<Unicode>::new();
        assert!(out.is_empty());
        Render::<Unicode>::render_lines(&title, &mut out);
        assert_eq!(out.len(), 2);
    }
}
