//! Plain `{name}` placeholder substitution.
//!
//! Mirrors the subset of Python's `str.format` used by filename templates:
//! named placeholders, `{{` and `}}` as escaped braces, an optional `!s`
//! conversion, and format specs of the form
//! `[[fill]align][0][width][.precision][type]` with type `s` or `d`.

use crate::error::{Result, TemplateError};
use std::fmt;

/// A value substituted into a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Text. Left aligned by default.
    Str(&'a str),
    /// Integer. Right aligned by default and zero-paddable.
    Int(i64),
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(text),
            Self::Int(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

impl Align {
    const fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            '=' => Some(Self::AfterSign),
            _ => None,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    kind: Option<char>,
}

impl FormatSpec {
    /// Parses the text after `:`. `None` when it leaves the supported subset.
    fn parse(spec: &str) -> Option<Self> {
        let mut parsed = Self::default();
        let mut rest = spec;

        let mut lead = spec.chars();
        match (lead.next(), lead.next()) {
            (Some(fill), Some(align)) if Align::from_char(align).is_some() => {
                parsed.fill = Some(fill);
                parsed.align = Align::from_char(align);
                rest = lead.as_str();
            }
            (Some(align), _) if Align::from_char(align).is_some() => {
                parsed.align = Align::from_char(align);
                rest = &spec[align.len_utf8()..];
            }
            _ => {}
        }

        if let Some(after) = rest.strip_prefix('0') {
            parsed.zero = true;
            rest = after;
        }

        let (width, after) = split_digits(rest);
        if !width.is_empty() {
            parsed.width = width.parse().ok()?;
        }
        rest = after;

        if let Some(after) = rest.strip_prefix('.') {
            let (precision, after) = split_digits(after);
            if precision.is_empty() {
                return None;
            }
            parsed.precision = Some(precision.parse().ok()?);
            rest = after;
        }

        match rest {
            "" => {}
            "s" | "d" => parsed.kind = rest.chars().next(),
            _ => return None,
        }
        Some(parsed)
    }

    /// Formats `arg`, or `None` when the spec does not apply to its type.
    fn apply(&self, arg: Arg<'_>) -> Option<String> {
        match arg {
            Arg::Str(text) => {
                if self.kind == Some('d') || self.align == Some(Align::AfterSign) {
                    return None;
                }
                let text: String = match self.precision {
                    Some(precision) => text.chars().take(precision).collect(),
                    None => text.to_string(),
                };
                let fill = self.fill.unwrap_or(if self.zero { '0' } else { ' ' });
                Some(pad(&text, "", fill, self.align.unwrap_or(Align::Left), self.width))
            }
            Arg::Int(number) => {
                if self.kind == Some('s') || self.precision.is_some() {
                    return None;
                }
                let (fill, align) = match (self.fill, self.align, self.zero) {
                    (Some(fill), align, _) => (fill, align.unwrap_or(Align::Right)),
                    (None, None, true) => ('0', Align::AfterSign),
                    (None, align, zero) => {
                        (if zero { '0' } else { ' ' }, align.unwrap_or(Align::Right))
                    }
                };
                let sign = if number < 0 { "-" } else { "" };
                let digits = number.unsigned_abs().to_string();
                Some(pad(&digits, sign, fill, align, self.width))
            }
        }
    }
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn pad(body: &str, sign: &str, fill: char, align: Align, width: usize) -> String {
    let padding = width.saturating_sub(sign.chars().count() + body.chars().count());
    let run = |n: usize| std::iter::repeat_n(fill, n).collect::<String>();
    match align {
        Align::Left => format!("{sign}{body}{}", run(padding)),
        Align::Right => format!("{}{sign}{body}", run(padding)),
        Align::Center => {
            let left = padding / 2;
            format!("{}{sign}{body}{}", run(left), run(padding - left))
        }
        Align::AfterSign => format!("{sign}{}{body}", run(padding)),
    }
}

/// Substitutes every `{name}` in `source` with `lookup(name)`.
///
/// A placeholder may carry a conversion and a spec, as in
/// `{try_number!s:>3}` or `{try_number:03d}`.
///
/// # Errors
///
/// [`TemplateError::UnknownPlaceholder`] when `lookup` has no value for a
/// name, [`TemplateError::InvalidFormatSpec`] for a conversion other than
/// `!s` or a spec that is malformed or does not fit the value's type, and
/// [`TemplateError::UnbalancedBrace`] for an unclosed `{` or a lone `}`.
pub fn render<'a, F>(source: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<Arg<'a>>,
{
    let mut output = String::with_capacity(source.len());
    let mut chars = source.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' if chars.next_if(|&(_, c)| c == '{').is_some() => output.push('{'),
            '}' if chars.next_if(|&(_, c)| c == '}').is_some() => output.push('}'),
            '{' => {
                let start = offset + 1;
                let end = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some((_, '{')) | None => {
                            return Err(TemplateError::UnbalancedBrace { offset }.into());
                        }
                        Some(_) => {}
                    }
                };
                output.push_str(&substitute(&source[start..end], &lookup)?);
            }
            '}' => return Err(TemplateError::UnbalancedBrace { offset }.into()),
            _ => output.push(ch),
        }
    }

    Ok(output)
}

/// Renders one `name[!conversion][:spec]` field.
fn substitute<'a, F>(field: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<Arg<'a>>,
{
    let (name, rest) = field.split_at(field.find(['!', ':']).unwrap_or(field.len()));
    let value = lookup(name).ok_or_else(|| TemplateError::UnknownPlaceholder {
        name: name.to_string(),
    })?;
    let invalid = || TemplateError::InvalidFormatSpec {
        name: name.to_string(),
        spec: rest.to_string(),
    };

    let (conversion, spec) = match rest.strip_prefix('!') {
        Some(after) => match after.split_once(':') {
            Some((conversion, spec)) => (Some(conversion), spec),
            None => (Some(after), ""),
        },
        None => (None, rest.strip_prefix(':').unwrap_or_default()),
    };

    let converted;
    let value = match conversion {
        None => value,
        Some("s") => {
            converted = value.to_string();
            Arg::Str(&converted)
        }
        Some(_) => return Err(invalid().into()),
    };

    let spec = FormatSpec::parse(spec).ok_or_else(invalid)?;
    spec.apply(value).ok_or_else(|| invalid().into())
}
