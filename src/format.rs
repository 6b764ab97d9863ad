//! printf-style message formatting over JSON values
//!
//! The first argument, when it is a string, acts as a template. Supported
//! markers are `%s`, `%d`, `%i`, `%f`, `%j`, `%o`, `%O` and `%%`. A marker
//! without a matching argument is left as written, and arguments beyond the
//! template's markers are appended separated by single spaces.

use serde_json::Value;

/// Format an argument list into a single display string
///
/// A lone array argument is spread into the argument list, so
/// `format(&[json!([])])` and `format(&[])` both return `""`.
pub fn format(args: &[Value]) -> String {
    let args = match args {
        [Value::Array(inner)] => inner.as_slice(),
        _ => args,
    };

    let Some((first, rest)) = args.split_first() else {
        return String::new();
    };

    let (mut out, consumed) = match first {
        Value::String(template) => substitute(template, rest),
        other => (display(other), 0),
    };

    for arg in &rest[consumed..] {
        out.push(' ');
        out.push_str(&display(arg));
    }
    out
}

/// Expand markers in `template`, returning the text and how many args were used
fn substitute(template: &str, args: &[Value]) -> (String, usize) {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(&marker) = chars.peek() else {
            out.push('%');
            break;
        };
        if marker == '%' {
            chars.next();
            out.push('%');
            continue;
        }
        if !matches!(marker, 's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O') {
            out.push('%');
            continue;
        }
        chars.next();
        match args.get(next) {
            Some(arg) => {
                next += 1;
                out.push_str(&render_marker(marker, arg));
            }
            None => {
                out.push('%');
                out.push(marker);
            }
        }
    }

    (out, next)
}

fn render_marker(marker: char, arg: &Value) -> String {
    match marker {
        's' => display(arg),
        'd' => number_repr(to_number(arg)),
        'i' => number_repr(to_number(arg).trunc()),
        'f' => number_repr(to_number(arg)),
        _ => arg.to_string(),
    }
}

/// Conversion into the argument list of a terminal call
pub trait IntoArgs {
    fn into_args(self) -> Vec<Value>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Value> {
        Vec::new()
    }
}

impl IntoArgs for &str {
    fn into_args(self) -> Vec<Value> {
        vec![Value::from(self)]
    }
}

impl IntoArgs for String {
    fn into_args(self) -> Vec<Value> {
        vec![Value::from(self)]
    }
}

impl IntoArgs for Value {
    fn into_args(self) -> Vec<Value> {
        vec![self]
    }
}

impl IntoArgs for &[Value] {
    fn into_args(self) -> Vec<Value> {
        self.to_vec()
    }
}

impl<T: Into<Value>> IntoArgs for Vec<T> {
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Value>, const N: usize> IntoArgs for [T; N] {
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

/// Strings print raw, everything else prints as JSON
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        _ => f64::NAN,
    }
}

fn number_repr(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
