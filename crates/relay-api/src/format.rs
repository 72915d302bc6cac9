//! Rendering submissions into chat notifications.
//!
//! Values are interpolated loosely: strings verbatim, numbers and booleans as
//! written, a missing field as `undefined`. User text is not escaped, so a
//! name containing markup characters may be rejected by the chat API at send
//! time.

use serde_json::{Number, Value};

use crate::error::FormatError;
use crate::types::Submission;

const DELIVERY_TITLE: &str = "Новая заявка на доставку";

/// Markup dialect the chat transport should parse the text with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MarkdownV2,
    Html,
}

/// Which template to render a submission with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// MarkdownV2 delivery request with a clickable phone link.
    DeliveryPlain,
    /// HTML delivery request.
    DeliveryHtml,
    /// HTML delivery request followed by line items and the total amount.
    Order,
}

impl NotificationKind {
    pub fn dialect(self) -> Dialect {
        match self {
            NotificationKind::DeliveryPlain => Dialect::MarkdownV2,
            NotificationKind::DeliveryHtml | NotificationKind::Order => Dialect::Html,
        }
    }
}

/// A rendered message, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub dialect: Dialect,
}

/// Renders a submission with the template for `kind`.
pub fn format(kind: NotificationKind, submission: &Submission) -> Result<Notification, FormatError> {
    let name = interpolate(submission.field("name"));
    let phone = interpolate(submission.field("phone"));

    let text = match kind {
        NotificationKind::DeliveryPlain => format!(
            "*{DELIVERY_TITLE}*\n      от: *{name}*\n      Телефон: [{phone}](tel:{phone})"
        ),
        NotificationKind::DeliveryHtml => delivery_html(&name, &phone),
        NotificationKind::Order => {
            let details = order_lines(submission.field("items"))?;
            let amount = interpolate(submission.field("amount"));
            format!(
                "{}\n\nДетали:\n{details}\n\nСумма:   <b>{amount}</b>",
                delivery_html(&name, &phone)
            )
        }
    };

    Ok(Notification {
        text,
        dialect: kind.dialect(),
    })
}

fn delivery_html(name: &str, phone: &str) -> String {
    format!("<b>{DELIVERY_TITLE}</b>\n\nот:   <b>{name}</b>\nТелефон: {phone}")
}

/// One line per item, in document order, joined with commas.
fn order_lines(items: Option<&Value>) -> Result<String, FormatError> {
    let entries: Vec<&Value> = match items {
        None | Some(Value::Null) => return Err(FormatError::MissingItems),
        Some(Value::Object(map)) => map.values().collect(),
        Some(Value::Array(list)) => list.iter().collect(),
        // The characters of a string have no product.
        Some(Value::String(s)) if !s.is_empty() => {
            return Err(FormatError::MissingProduct { index: 0 })
        }
        Some(_) => Vec::new(),
    };

    let lines = entries
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let product = item
                .get("product")
                .filter(|p| !p.is_null())
                .ok_or(FormatError::MissingProduct { index })?;
            Ok(format!(
                "\n{}   X   {}",
                interpolate(product.get("name")),
                interpolate(item.get("quantity"))
            ))
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    Ok(lines.join(","))
}

fn interpolate(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => display(value),
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number(n),
        Value::String(s) => s.clone(),
        Value::Array(list) => list
            .iter()
            .map(|v| if v.is_null() { String::new() } else { display(v) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Integral floats print without a fraction (`1e3` is `1000`).
fn number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}
