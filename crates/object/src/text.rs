//! Textual representations of values.
//!
//! `text()` is what the value predicates search; `repr()` is the quoted form
//! used for elements inside containers. Both guard against containers that
//! reach themselves and print `[...]`-style placeholders instead.

use crate::error::TextError;
use crate::value::Value;

impl Value {
    /// Textual form: strings unquoted, bytes decoded, containers as their repr
    pub fn text(&self) -> Result<String, TextError> {
        match self {
            Value::Str(s) => Ok(s.to_string()),
            Value::Bytes(b) => Ok(std::str::from_utf8(b)?.to_owned()),
            Value::Exception(msg) => Ok(msg.to_string()),
            Value::Object(object) => object.text(),
            _ => self.repr(),
        }
    }

    /// Quoted representation, as shown inside containers
    pub fn repr(&self) -> Result<String, TextError> {
        let mut out = String::new();
        Renderer::default().write(self, &mut out)?;
        Ok(out)
    }
}

#[derive(Default)]
struct Renderer {
    stack: Vec<usize>,
}

impl Renderer {
    fn write(&mut self, value: &Value, out: &mut String) -> Result<(), TextError> {
        if let Some(id) = value.identity() {
            if self.stack.contains(&id) {
                out.push_str(placeholder(value));
                return Ok(());
            }
            self.stack.push(id);
            let result = self.write_inner(value, out);
            self.stack.pop();
            return result;
        }
        self.write_inner(value, out)
    }

    fn write_inner(&mut self, value: &Value, out: &mut String) -> Result<(), TextError> {
        match value {
            Value::None => out.push_str("None"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::Float(x) => out.push_str(&format_float(*x)),
            Value::Complex { re, im } => out.push_str(&format_complex(*re, *im)),
            Value::Str(s) => out.push_str(&format!("'{s}'")),
            Value::Bytes(b) => out.push_str(&format!("b'{}'", b.escape_ascii())),
            Value::Exception(msg) => out.push_str(&format!("Exception('{msg}')")),
            Value::Object(object) => out.push_str(&object.text()?),
            Value::List(list) => {
                let items = list.read().clone();
                self.write_seq(&items, "[", "]", out)?;
            }
            Value::Tuple(items) => {
                if items.len() == 1 {
                    out.push('(');
                    self.write(&items[0], out)?;
                    out.push_str(",)");
                } else {
                    self.write_seq(items, "(", ")", out)?;
                }
            }
            Value::Set(items) => {
                if items.is_empty() {
                    out.push_str("set()");
                } else {
                    self.write_seq(items, "{", "}", out)?;
                }
            }
            Value::FrozenSet(items) => {
                out.push_str("frozenset(");
                if !items.is_empty() {
                    self.write_seq(items, "{", "}", out)?;
                }
                out.push(')');
            }
            Value::Dict(dict) => {
                let entries = dict.read().clone();
                out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&key.repr());
                    out.push_str(": ");
                    self.write(item, out)?;
                }
                out.push('}');
            }
            Value::Array(array) => {
                let items: Vec<Value> = array.iter().cloned().collect();
                out.push_str("array(");
                self.write_seq(&items, "[", "]", out)?;
                if array.ndim() != 1 {
                    out.push_str(&format!(", shape={}", shape_tuple(array.shape())));
                }
                out.push(')');
            }
        }
        Ok(())
    }

    fn write_seq(
        &mut self,
        items: &[Value],
        open: &str,
        close: &str,
        out: &mut String,
    ) -> Result<(), TextError> {
        out.push_str(open);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write(item, out)?;
        }
        out.push_str(close);
        Ok(())
    }
}

fn placeholder(value: &Value) -> &'static str {
    match value {
        Value::List(_) | Value::Array(_) => "[...]",
        Value::Dict(_) | Value::Set(_) | Value::FrozenSet(_) => "{...}",
        Value::Tuple(_) => "(...)",
        _ => "...",
    }
}

/// Dimensions formatted as a tuple: `(3,)`, `(2, 4)`
#[must_use]
pub fn shape_tuple(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({single},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(usize::to_string).collect();
            format!("({})", parts.join(", "))
        }
    }
}

fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        let sign = if x > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else {
        format!("{x:?}")
    }
}

fn format_complex(re: f64, im: f64) -> String {
    // Whole components drop the trailing ".0": (1+2j)
    fn part(x: f64) -> String {
        if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
            format!("{}", x as i64)
        } else {
            format_float(x)
        }
    }
    if re == 0.0 {
        return format!("{}j", part(im));
    }
    let sign = if im < 0.0 || (im == 0.0 && im.is_sign_negative()) { '-' } else { '+' };
    format!("({}{}{}j)", part(re), sign, part(im.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Instance;

    #[test]
    fn scalars_render_plainly() {
        assert_eq!(Value::None.text().unwrap(), "None");
        assert_eq!(Value::Bool(true).text().unwrap(), "True");
        assert_eq!(Value::from(3.0).text().unwrap(), "3.0");
        assert_eq!(Value::from(0.5).text().unwrap(), "0.5");
        assert_eq!(Value::Complex { re: 1.0, im: 2.0 }.text().unwrap(), "(1+2j)");
        assert_eq!(Value::Complex { re: 0.0, im: -1.5 }.text().unwrap(), "-1.5j");
        assert_eq!(Value::str("plain").text().unwrap(), "plain");
        assert_eq!(Value::str("plain").repr().unwrap(), "'plain'");
    }

    #[test]
    fn containers_embed_element_reprs() {
        let value = Value::dict([("a", Value::list([Value::from(1), Value::str("x")]))]);
        assert_eq!(value.text().unwrap(), "{'a': [1, 'x']}");
        assert_eq!(Value::tuple([1]).text().unwrap(), "(1,)");
        assert_eq!(Value::tuple([1, 2]).text().unwrap(), "(1, 2)");
        assert_eq!(Value::set(Vec::<Value>::new()).text().unwrap(), "set()");
        assert_eq!(Value::frozenset([1]).text().unwrap(), "frozenset({1})");
    }

    #[test]
    fn invalid_utf8_bytes_fail_only_as_text() {
        let raw = Value::bytes([b'o', b'k', 0xff]);
        assert_eq!(raw.text(), Err(TextError::InvalidUtf8 { valid_up_to: 2 }));
        assert_eq!(raw.repr().unwrap(), "b'ok\\xff'");
        assert_eq!(Value::bytes(b"fine").text().unwrap(), "fine");
    }

    #[test]
    fn recursive_containers_use_placeholders() {
        let list = Value::list([1]);
        list.push(list.clone());
        assert_eq!(list.text().unwrap(), "[1, [...]]");

        let dict = Value::dict([("n", 1)]);
        dict.insert("me", dict.clone());
        assert_eq!(dict.text().unwrap(), "{'n': 1, 'me': {...}}");
    }

    #[test]
    fn shared_but_acyclic_values_render_twice() {
        let shared = Value::list([1]);
        let outer = Value::list([shared.clone(), shared]);
        assert_eq!(outer.text().unwrap(), "[[1], [1]]");
    }

    #[test]
    fn arrays_show_shape_when_not_flat() {
        let grid = Value::array(&[2, 2], (1..=4).map(Value::from).collect()).unwrap();
        assert_eq!(grid.text().unwrap(), "array([1, 2, 3, 4], shape=(2, 2))");
        assert_eq!(shape_tuple(&[3]), "(3,)");
    }

    #[test]
    fn scalar_reprs_inside_containers() {
        let value = Value::list([
            Value::from(-7),
            Value::bytes(b"a\n"),
            Value::exception("boom"),
        ]);
        assert_eq!(value.repr().unwrap(), "[-7, b'a\\n', Exception('boom')]");
        let cube = Value::array(&[1, 1, 1], vec![Value::from(0)]).unwrap();
        assert_eq!(cube.repr().unwrap(), "array([0], shape=(1, 1, 1))");
    }

    #[test]
    fn objects_render_through_their_own_text() {
        let module = Value::object(Instance::module("os"));
        assert_eq!(module.text().unwrap(), "<module 'os'>");
    }
}
