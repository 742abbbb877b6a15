//! Debug printer.

use core::fmt::{self, Write as _};

use crate::identity::Identify;
use crate::tree::traverse::DftEvent;
use crate::tree::Tree;

/// Indent of one nesting level.
#[derive(Clone, Copy)]
struct IndentLevel {
    /// Whether the item is the last of its siblings.
    is_last_item: bool,
    /// Whether the current line is the first line of the item.
    is_first_line: bool,
}

impl IndentLevel {
    /// Returns the indent string, without trailing whitespaces if `trim`.
    fn as_str(self, trim: bool) -> &'static str {
        match (self.is_last_item, self.is_first_line, trim) {
            (false, true, false) => "|-- ",
            (false, true, true) => "|--",
            (false, false, false) => "|   ",
            (false, false, true) => "|",
            (true, true, false) => "`-- ",
            (true, true, true) => "`--",
            (true, false, false) => "    ",
            (true, false, true) => "",
        }
    }
}

/// Indent writer for the debug printer.
///
/// Trailing whitespaces of the indent are written lazily, so that empty
/// lines do not end with spaces.
struct IndentWriter<'a, 'b> {
    /// Backend formatter.
    fmt: &'b mut fmt::Formatter<'a>,
    /// Whether the current line has content or partial indent.
    line_started: bool,
    /// Whether the current line has content.
    has_content: bool,
    /// Indents.
    indents: Vec<IndentLevel>,
}

impl<'a, 'b> IndentWriter<'a, 'b> {
    /// Creates a new indent writer.
    fn new(fmt: &'b mut fmt::Formatter<'a>) -> Self {
        Self {
            fmt,
            line_started: false,
            has_content: false,
            indents: Vec::new(),
        }
    }

    /// Ends the current line if something has been written to it.
    fn break_line(&mut self) -> fmt::Result {
        if self.line_started {
            self.fmt.write_char('\n')?;
            self.line_started = false;
            self.has_content = false;
        }
        Ok(())
    }

    /// Opens a root item.
    fn open_root(&mut self) -> fmt::Result {
        debug_assert!(
            self.indents.is_empty(),
            "[consistency] all items must be closed before a new root"
        );
        self.break_line()
    }

    /// Opens a non-root item.
    fn open_item(&mut self, is_last_item: bool) -> fmt::Result {
        self.break_line()?;
        if let Some(indent) = self.indents.last_mut() {
            indent.is_first_line = false;
        }
        self.indents.push(IndentLevel {
            is_last_item,
            is_first_line: true,
        });
        Ok(())
    }

    /// Closes the current non-root item.
    fn close_item(&mut self) {
        self.indents.pop();
    }

    /// Returns the number of levels up to the last one with visible characters.
    fn visible_levels(&self) -> usize {
        self.indents
            .iter()
            .rposition(|indent| !indent.as_str(true).is_empty())
            .map_or(0, |pos| pos + 1)
    }

    /// Writes the indent of a new line, except for its trailing whitespaces.
    fn start_line(&mut self) -> fmt::Result {
        let end = self.visible_levels();
        if let Some((last, leading)) = self.indents[..end].split_last() {
            for indent in leading {
                self.fmt.write_str(indent.as_str(false))?;
            }
            self.fmt.write_str(last.as_str(true))?;
        }
        self.line_started = true;
        Ok(())
    }

    /// Writes the trailing whitespaces of the indent before the first content.
    fn finish_indent(&mut self) -> fmt::Result {
        let end = self.visible_levels();
        if let Some(last) = end.checked_sub(1).map(|i| self.indents[i]) {
            let trimmed_len = last.as_str(true).len();
            self.fmt.write_str(&last.as_str(false)[trimmed_len..])?;
        }
        for indent in &self.indents[end..] {
            self.fmt.write_str(indent.as_str(false))?;
        }
        self.has_content = true;
        Ok(())
    }
}

impl fmt::Write for IndentWriter<'_, '_> {
    fn write_str(&mut self, mut s: &str) -> fmt::Result {
        while !s.is_empty() {
            if !self.line_started {
                self.start_line()?;
            }

            let (line_end, ends_with_newline) = match s.find('\n') {
                Some(pos) => (pos + 1, true),
                None => (s.len(), false),
            };
            let content = &s[..line_end];
            if !self.has_content && content != "\n" {
                self.finish_indent()?;
            }
            self.fmt.write_str(content)?;
            if ends_with_newline {
                if let Some(level) = self.indents.last_mut() {
                    level.is_first_line = false;
                }
                self.line_started = false;
                self.has_content = false;
            }
            s = &s[line_end..];
        }

        Ok(())
    }
}

/// Forest printer for debugging.
///
/// This is provided mainly for debugging purpose. Note that the output format
/// is not guaranteed to be stable, and any format changes won't be considered
/// as breaking changes.
///
/// Each tree of the forest starts at its own line without indent.
///
/// # Examples
///
/// ```
/// use idforest::{Identify, InsertAs, Tree};
///
/// #[derive(Debug, Clone)]
/// struct Item(&'static str);
///
/// impl Identify for Item {
///     type Identity = &'static str;
///
///     fn identity(&self) -> Option<Self::Identity> {
///         Some(self.0)
///     }
/// }
///
/// impl std::fmt::Display for Item {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str(self.0)
///     }
/// }
///
/// let mut tree = Tree::from_roots([Item("root"), Item("other")])?;
/// tree.add(Item("0"), InsertAs::LastChildOf(&Item("root")))?;
/// tree.add(Item("0-0"), InsertAs::LastChildOf(&Item("0")))?;
/// tree.add(Item("1"), InsertAs::LastChildOf(&Item("root")))?;
///
/// let expected = "\
/// root
/// |-- 0
/// |   `-- 0-0
/// `-- 1
/// other";
/// assert_eq!(tree.debug_print().to_string(), expected);
/// # Ok::<_, idforest::TreeError>(())
/// ```
pub struct DebugPrint<'a, T: Identify> {
    /// Forest to print.
    tree: &'a Tree<T>,
}

impl<'a, T: Identify> DebugPrint<'a, T> {
    /// Creates a new `DebugPrint` object for the forest.
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self { tree }
    }

    /// Prints the forest, formatting each element with the given function.
    fn print<F>(&self, f: &mut fmt::Formatter<'_>, mut write_element: F) -> fmt::Result
    where
        F: FnMut(&mut IndentWriter<'_, '_>, &T) -> fmt::Result,
    {
        let mut writer = IndentWriter::new(f);
        for ev in self.tree.depth_first_traverse() {
            match ev {
                DftEvent::Open(node) => {
                    if node.is_root() {
                        writer.open_root()?;
                    } else {
                        writer.open_item(node.is_last_sibling())?;
                    }
                    write_element(&mut writer, node.element())?;
                }
                DftEvent::Close(node) => {
                    if !node.is_root() {
                        writer.close_item();
                    }
                }
            }
        }

        Ok(())
    }
}

impl<T: Identify + fmt::Display> fmt::Display for DebugPrint<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f, |writer, element| write!(writer, "{}", element))
    }
}

impl<T: Identify + fmt::Debug> fmt::Debug for DebugPrint<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f, |writer, element| write!(writer, "{:?}", element))
    }
}
