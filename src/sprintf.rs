//! Positional `printf`-style formatting.
//!
//! Directives have the shape `%[flags][width][.precision][[n]]verb`:
//!
//! | part | meaning |
//! |---|---|
//! | flags | `-` left justify, `0` zero pad numbers, `+` always sign, ` ` space for sign, `#` radix prefix |
//! | width | minimum visible width |
//! | precision | digits after the point (`f`, `e`), significant digits (`g`), minimum digits (`d`), maximum visible characters (`s`, `v`, `q`) |
//! | `[n]` | 1-based argument index; the next unindexed directive uses `n + 1` |
//! | verb | `v` `s` `q` `d` `x` `X` `o` `b` `f` `F` `e` `E` `g` `G` `t`; `%%` is a literal percent |
//!
//! Exponents always carry a sign and at least two digits (`1.5e+03`). Without
//! a precision `%g` prints the shortest representation and switches to
//! exponent form below `1e-4` or from `1e+06` on. `#` keeps the trailing zeros
//! `%g` would otherwise drop.
//!
//! Width and precision count visible characters only: ANSI escape sequences
//! already present in an argument are neither counted nor cut, so colorized
//! values pad to the same column as plain ones and keep their trailing reset.
//!
//! A `%` that does not start a well-formed directive (for example
//! `%[someName]s`, whose index is not a number) is copied through literally.

use std::borrow::Cow;

use thiserror::Error;

use crate::event::Value;

/// Errors produced while substituting arguments into a format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A directive refers to an argument that was not supplied.
    #[error("missing argument {index} for %{verb}")]
    MissingArgument { index: usize, verb: char },

    /// The argument's type cannot be rendered with the directive's verb.
    #[error("%{verb} cannot format {kind} argument {index}")]
    BadVerb {
        verb: char,
        kind: &'static str,
        index: usize,
    },

    /// The verb character is not one this formatter knows.
    #[error("unsupported verb %{verb}")]
    UnsupportedVerb { verb: char },
}

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    sharp: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

enum Directive {
    /// `%%`
    Percent,
    /// Not a directive; emit the `%` and keep scanning after it.
    Literal,
    Verb {
        spec: Spec,
        index: Option<usize>,
        len: usize,
    },
}

/// Substitute `args` into `template`.
///
/// Fails on the first directive that has no argument or whose verb does not
/// fit the argument type; no partial output is returned.
pub fn sprintf(template: &str, args: &[Value]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + 64);
    sprintf_into(template, args, &mut out)?;
    Ok(out)
}

/// Like [`sprintf`] but appends to `out`.
///
/// On error `out` may hold a partially written line; callers that need the
/// all-or-nothing guarantee use [`sprintf`].
pub fn sprintf_into(template: &str, args: &[Value], out: &mut String) -> Result<(), FormatError> {
    let mut next_arg = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let directive = &rest[pos..];
        match parse_directive(directive) {
            Directive::Percent => {
                out.push('%');
                rest = &directive[2..];
            }
            Directive::Literal => {
                out.push('%');
                rest = &directive[1..];
            }
            Directive::Verb { spec, index, len } => {
                let i = index.unwrap_or(next_arg);
                let arg = args.get(i).ok_or(FormatError::MissingArgument {
                    index: i + 1,
                    verb: spec.verb,
                })?;
                format_arg(out, &spec, arg, i + 1)?;
                next_arg = i + 1;
                rest = &directive[len..];
            }
        }
    }
    out.push_str(rest);
    Ok(())
}

/// Parse one directive; `s` starts at the `%`.
fn parse_directive(s: &str) -> Directive {
    let bytes = s.as_bytes();
    if bytes.get(1) == Some(&b'%') {
        return Directive::Percent;
    }

    let mut spec = Spec::default();
    let mut i = 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'-' => spec.minus = true,
            b'+' => spec.plus = true,
            b' ' => spec.space = true,
            b'0' => spec.zero = true,
            b'#' => spec.sharp = true,
            _ => break,
        }
        i += 1;
    }

    let (width, n) = parse_number(&bytes[i..]);
    spec.width = width;
    i += n;

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let (precision, n) = parse_number(&bytes[i..]);
        spec.precision = Some(precision.unwrap_or(0));
        i += n;
    }

    let mut index = None;
    if bytes.get(i) == Some(&b'[') {
        let Some(close) = s[i..].find(']') else {
            return Directive::Literal;
        };
        let inner = &s[i + 1..i + close];
        if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
            return Directive::Literal;
        }
        match inner.parse::<usize>() {
            Ok(n) if n >= 1 => index = Some(n - 1),
            _ => return Directive::Literal,
        }
        i += close + 1;
    }

    let Some(verb) = s[i..].chars().next() else {
        return Directive::Literal;
    };
    spec.verb = verb;
    Directive::Verb {
        spec,
        index,
        len: i + verb.len_utf8(),
    }
}

/// Parse leading ASCII digits, returning the value and how many bytes were read.
fn parse_number(bytes: &[u8]) -> (Option<usize>, usize) {
    let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return (None, 0);
    }
    let value = bytes[..len]
        .iter()
        .fold(0usize, |acc, b| acc.saturating_mul(10).saturating_add(usize::from(b - b'0')));
    (Some(value), len)
}

fn format_arg(out: &mut String, spec: &Spec, arg: &Value, index: usize) -> Result<(), FormatError> {
    let bad_verb = || FormatError::BadVerb {
        verb: spec.verb,
        kind: arg.kind(),
        index,
    };

    match spec.verb {
        'v' => match arg {
            Value::Int(_) | Value::Uint(_) => format_integer(out, spec, arg, 10, false),
            Value::Float(x) => {
                let body = match spec.precision {
                    Some(p) => format!("{:.*}", p, x.abs()),
                    None => x.abs().to_string(),
                };
                pad_number(out, spec, float_sign(spec, *x), "", &body);
            }
            _ => pad_text(out, spec, &truncate_visible(&arg.to_string(), spec.precision)),
        },
        's' => {
            let text = arg.to_string();
            pad_text(out, spec, &truncate_visible(&text, spec.precision));
        }
        'q' => match arg {
            Value::Str(s) => {
                let quoted = format!("{:?}", truncate_visible(s, spec.precision));
                pad_text(out, spec, &quoted);
            }
            _ => return Err(bad_verb()),
        },
        'd' => match arg {
            Value::Int(_) | Value::Uint(_) => format_integer(out, spec, arg, 10, false),
            _ => return Err(bad_verb()),
        },
        'x' | 'X' | 'o' | 'b' => {
            let (radix, upper) = match spec.verb {
                'x' => (16, false),
                'X' => (16, true),
                'o' => (8, false),
                _ => (2, false),
            };
            match arg {
                Value::Int(_) | Value::Uint(_) => format_integer(out, spec, arg, radix, upper),
                Value::Str(s) if radix == 16 => {
                    let hex: String = s
                        .bytes()
                        .map(|b| {
                            if upper {
                                format!("{b:02X}")
                            } else {
                                format!("{b:02x}")
                            }
                        })
                        .collect();
                    pad_text(out, spec, &hex);
                }
                _ => return Err(bad_verb()),
            }
        }
        'f' | 'F' => match arg {
            Value::Float(x) => {
                let body = format!("{:.*}", spec.precision.unwrap_or(6), x.abs());
                pad_number(out, spec, float_sign(spec, *x), "", &body);
            }
            _ => return Err(bad_verb()),
        },
        'e' | 'E' | 'g' | 'G' => match arg {
            Value::Float(x) => pad_number(out, spec, float_sign(spec, *x), "", &float_body(spec, *x)),
            _ => return Err(bad_verb()),
        },
        't' => match arg {
            Value::Bool(b) => pad_text(out, spec, if *b { "true" } else { "false" }),
            _ => return Err(bad_verb()),
        },
        verb => return Err(FormatError::UnsupportedVerb { verb }),
    }
    Ok(())
}

/// Unsigned text of `x` for the exponent-capable verbs.
fn float_body(spec: &Spec, x: f64) -> String {
    let x = x.abs();
    if !x.is_finite() {
        return x.to_string();
    }
    let upper = spec.verb.is_ascii_uppercase();

    if matches!(spec.verb, 'e' | 'E') {
        return exponent_form(&format!("{:.*e}", spec.precision.unwrap_or(6), x), upper, false);
    }

    let Some(precision) = spec.precision else {
        let sci = format!("{x:e}");
        return if (-4..6).contains(&decimal_exponent(&sci)) {
            x.to_string()
        } else {
            exponent_form(&sci, upper, false)
        };
    };

    let significant = precision.max(1);
    let sci = format!("{:.*e}", significant - 1, x);
    let exp = decimal_exponent(&sci);
    let limit = i32::try_from(significant).unwrap_or(i32::MAX);
    if exp < -4 || exp >= limit {
        exponent_form(&sci, upper, !spec.sharp)
    } else {
        let decimals = usize::try_from(limit - 1 - exp).unwrap_or(0);
        let fixed = format!("{x:.decimals$}");
        if spec.sharp {
            fixed
        } else {
            trim_fraction_zeros(&fixed).to_string()
        }
    }
}

/// Rewrite Rust's `1.5e3` as `1.5e+03`.
fn exponent_form(sci: &str, upper: bool, trim: bool) -> String {
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci, "0"));
    let mantissa = if trim { trim_fraction_zeros(mantissa) } else { mantissa };
    let exp: i32 = exp.parse().unwrap_or_default();
    let e = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{e}{sign}{:02}", exp.unsigned_abs())
}

fn decimal_exponent(sci: &str) -> i32 {
    sci.split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn float_sign(spec: &Spec, x: f64) -> &'static str {
    if x.is_sign_negative() && !x.is_nan() {
        "-"
    } else {
        positive_sign(spec)
    }
}

fn positive_sign(spec: &Spec) -> &'static str {
    if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn format_integer(out: &mut String, spec: &Spec, arg: &Value, radix: u32, upper: bool) {
    let (negative, magnitude) = match arg {
        Value::Int(i) => (*i < 0, i.unsigned_abs()),
        Value::Uint(u) => (false, *u),
        _ => (false, 0),
    };

    let mut digits = match (radix, upper) {
        (16, true) => format!("{magnitude:X}"),
        (16, false) => format!("{magnitude:x}"),
        (8, _) => format!("{magnitude:o}"),
        (2, _) => format!("{magnitude:b}"),
        _ => magnitude.to_string(),
    };

    // Explicit precision is a minimum digit count; `%.0d` of zero prints nothing.
    if let Some(p) = spec.precision {
        if p == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < p {
            digits.insert_str(0, &"0".repeat(p - digits.len()));
        }
    }

    let prefix = match (spec.sharp, radix, upper) {
        (true, 16, true) => "0X",
        (true, 16, false) => "0x",
        (true, 8, _) => "0",
        (true, 2, _) => "0b",
        _ => "",
    };
    let sign = if negative { "-" } else { positive_sign(spec) };
    pad_number(out, spec, sign, prefix, &digits);
}

/// Pad a number; zero padding goes between sign/prefix and digits.
fn pad_number(out: &mut String, spec: &Spec, sign: &str, prefix: &str, digits: &str) {
    let len = sign.len() + prefix.len() + digits.len();
    let width = spec.width.unwrap_or(0);
    let fill = width.saturating_sub(len);

    if spec.minus {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(digits);
        push_repeated(out, ' ', fill);
    } else if spec.zero && (spec.precision.is_none() || matches!(spec.verb, 'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'v')) {
        out.push_str(sign);
        out.push_str(prefix);
        push_repeated(out, '0', fill);
        out.push_str(digits);
    } else {
        push_repeated(out, ' ', fill);
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(digits);
    }
}

fn pad_text(out: &mut String, spec: &Spec, text: &str) {
    let fill = spec.width.unwrap_or(0).saturating_sub(visible_width(text));
    if spec.minus {
        out.push_str(text);
        push_repeated(out, ' ', fill);
    } else {
        push_repeated(out, ' ', fill);
        out.push_str(text);
    }
}

fn push_repeated(out: &mut String, c: char, n: usize) {
    out.extend(std::iter::repeat_n(c, n));
}

/// Number of characters a terminal will display for `s`, ignoring ANSI escapes.
pub fn visible_width(s: &str) -> usize {
    if s.contains('\x1b') {
        strip_ansi_escapes::strip_str(s).chars().count()
    } else {
        s.chars().count()
    }
}

/// Keep at most `max` visible characters, preserving every escape sequence.
fn truncate_visible(s: &str, max: Option<usize>) -> Cow<'_, str> {
    let Some(max) = max else {
        return Cow::Borrowed(s);
    };
    if visible_width(s) <= max {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut visible = 0;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            if chars.peek() == Some(&'[') {
                out.push('[');
                chars.next();
                // CSI runs until a final byte in '@'..='~'
                for c in chars.by_ref() {
                    out.push(c);
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        if visible < max {
            out.push(c);
            visible += 1;
        }
    }
    Cow::Owned(out)
}
