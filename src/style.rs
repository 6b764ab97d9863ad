//! # Style Table and Stylizer
//!
//! Maps style names (`red`, `bold`, `bgBlack`, ...) to the ANSI escape
//! sequences that open and close them. Color codes are taken from the
//! `colored` crate's color table; each style closes with its own reset code
//! (39 for foreground, 49 for background, 22 for bold and dim) instead of a
//! full reset, so styles can be nested.

use crate::options::LoggerOptions;
use colored::Color;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Open and close escape sequences for one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub open: String,
    pub close: String,
}

impl Style {
    fn sgr(open: &str, close: &str) -> Self {
        Self {
            open: format!("\u{1b}[{}m", open),
            close: format!("\u{1b}[{}m", close),
        }
    }

    /// Wrap `text` in this style
    ///
    /// A close code of the same style inside `text` is followed by the
    /// open code again, so an inner span does not end the outer one.
    pub fn apply(&self, text: &str) -> String {
        let inner = if text.contains(&self.close) {
            text.replace(&self.close, &format!("{}{}", self.close, self.open))
        } else {
            text.to_string()
        };
        format!("{}{}{}", self.open, inner, self.close)
    }
}

/// Name to style mapping
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: BTreeMap<String, Style>,
}

const FOREGROUND: [(&str, Color); 8] = [
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
];

const BACKGROUND: [(&str, Color); 8] = [
    ("bgBlack", Color::Black),
    ("bgRed", Color::Red),
    ("bgGreen", Color::Green),
    ("bgYellow", Color::Yellow),
    ("bgBlue", Color::Blue),
    ("bgMagenta", Color::Magenta),
    ("bgCyan", Color::Cyan),
    ("bgWhite", Color::White),
];

impl StyleTable {
    /// The standard terminal palette
    pub fn ansi() -> Self {
        let mut table = Self::default();

        for (name, open, close) in [
            ("reset", "0", "0"),
            ("bold", "1", "22"),
            ("dim", "2", "22"),
            ("italic", "3", "23"),
            ("underline", "4", "24"),
            ("inverse", "7", "27"),
            ("hidden", "8", "28"),
            ("strikethrough", "9", "29"),
        ] {
            table.insert(name, Style::sgr(open, close));
        }

        for (name, color) in FOREGROUND {
            table.insert(name, Style::sgr(&color.to_fg_str(), "39"));
        }
        let gray = Style::sgr(&Color::BrightBlack.to_fg_str(), "39");
        table.insert("gray", gray.clone());
        table.insert("grey", gray);

        for (name, color) in BACKGROUND {
            table.insert(name, Style::sgr(&color.to_bg_str(), "49"));
        }

        table
    }

    pub fn insert(&mut self, name: &str, style: Style) {
        self.styles.insert(name.to_string(), style);
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}

/// Applies styles from a table, honouring the `stripColor` option
#[derive(Clone, Debug)]
pub struct Stylizer {
    styles: Rc<StyleTable>,
    options: Rc<RefCell<LoggerOptions>>,
}

impl Stylizer {
    pub fn new(styles: StyleTable, options: Rc<RefCell<LoggerOptions>>) -> Self {
        Self {
            styles: Rc::new(styles),
            options,
        }
    }

    pub fn table(&self) -> &StyleTable {
        &self.styles
    }

    /// Style `text` with the named style
    ///
    /// Unknown names return the text unchanged. With `stripColor` set, any
    /// escapes already in `text` are removed and no style is added.
    pub fn stylize(&self, name: &str, text: &str) -> String {
        if self.options.borrow().strip_color {
            return strip_ansi_escapes::strip_str(text);
        }
        match self.styles.get(name) {
            Some(style) => style.apply(text),
            None => text.to_string(),
        }
    }

    /// Apply several styles, innermost first
    pub fn stylize_all(&self, names: &[&str], text: &str) -> String {
        names
            .iter()
            .fold(text.to_string(), |acc, name| self.stylize(name, &acc))
    }
}
