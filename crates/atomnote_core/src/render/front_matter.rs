//! YAML front matter view.
//!
//! # Invariants
//! - Field order is fixed and every field is emitted, valued or not.
//! - `relacionado` and `tags` keep authored order.
//! - Plain scalars are emitted verbatim unless YAML would misread them.

use crate::model::config::GenerationConfig;
use crate::model::note::NoteRecord;
use crate::render::link::wiki_link;
use crate::render::template::{Slots, Template, TemplateError};
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::fmt::Write;

/// Front matter keys in emission order.
pub const FRONT_MATTER_KEYS: &[&str] = &[
    "titulo",
    "pai",
    "colecao",
    "area",
    "projeto",
    "pessoa",
    "relacionado",
    "tipo_nota",
    "data_criado",
    "data_atualizado",
    "cssclasses",
    "imagem_destaque",
    "mostrar_bloco_saas",
    "status_saas",
    "share_link",
    "share_updated",
    "status",
    "tags",
];

static FRONT_MATTER: Lazy<Template> = Lazy::new(|| {
    Template::new(
        r#"---
titulo: {title}
pai: {parent_link}
colecao: {collection}
area:
projeto:
pessoa:
relacionado:
{related_list}
tipo_nota: atomica
data_criado: {created_at}
data_atualizado: {updated_at}
cssclasses: normal
imagem_destaque:
mostrar_bloco_saas: {show_saas_block}
status_saas: {saas_status}
share_link:
share_updated:
status: concluido
tags:
{tag_list}
---"#,
    )
});

/// Renders the `---` delimited metadata block, without a trailing newline.
pub fn render_front_matter(
    note: &NoteRecord,
    config: &GenerationConfig,
) -> Result<String, TemplateError> {
    let related_list = note
        .related
        .iter()
        .map(|title| format!("  - {}", quoted_scalar(&wiki_link(title))))
        .collect::<Vec<_>>()
        .join("\n");
    let tag_list = note
        .tags
        .iter()
        .map(|tag| format!("  - {}", plain_scalar(tag)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut slots = Slots::new();
    slots
        .set("title", plain_scalar(&note.title))
        .set("parent_link", quoted_scalar(&wiki_link(&config.parent_title)))
        .set("collection", plain_scalar(&note.collection.to_lowercase()))
        .set("related_list", related_list)
        .set("created_at", config.created_at_text())
        .set("updated_at", config.updated_at_text())
        .set("show_saas_block", config.show_saas_block.to_string())
        .set("saas_status", config.saas_status.to_string())
        .set("tag_list", tag_list);
    FRONT_MATTER.render(&slots)
}

/// Returns `value` as-is when YAML reads it back as the same string,
/// otherwise a double-quoted escaped form.
pub fn plain_scalar(value: &str) -> Cow<'_, str> {
    if needs_quotes(value) {
        Cow::Owned(quoted_scalar(value))
    } else {
        Cow::Borrowed(value)
    }
}

/// Double-quoted YAML scalar with `\`, `"` and control escapes.
///
/// Characters YAML does not allow raw in a stream, or reads as line breaks,
/// are written as `\uNNNN`.
pub fn quoted_scalar(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other if needs_escape(other) => {
                let _ = write!(out, "\\u{:04X}", u32::from(other));
            }
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn needs_escape(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}'
        )
}

/// Plain scalars YAML resolves to an int or float instead of a string.
fn is_yaml_number(value: &str) -> bool {
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let lower = unsigned.to_ascii_lowercase();
    if matches!(lower.as_str(), ".inf" | ".nan") {
        return true;
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }
    value.parse::<f64>().is_ok()
}

fn needs_quotes(value: &str) -> bool {
    if value.is_empty() || value.trim() != value {
        return true;
    }
    if matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~"
    ) || is_yaml_number(value)
    {
        return true;
    }
    if value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || value.chars().any(|c| needs_escape(c) || c == '"' || c == '\'')
    {
        return true;
    }

    let mut chars = value.chars();
    match chars.next() {
        Some('-' | '?' | ':') => matches!(chars.next(), None | Some(' ')),
        Some(
            ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '%' | '@' | '`',
        ) => true,
        _ => false,
    }
}
