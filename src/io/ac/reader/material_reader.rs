//! MATERIAL line reader

use super::lexer::{Line, Token};
use super::line_reader::{check_numbers, token_int, token_number, token_text};
use crate::error::{AcError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::scene::{Material, MAX_SHININESS};
use crate::types::Rgb;

/// Parse one `MATERIAL` line.
///
/// Fields must come in the fixed order `rgb amb emis spec shi trans`. Tokens
/// after `trans` are kept verbatim in [`Material::extra_tokens`] unless
/// `preserve_unknown` is off.
pub fn read_material(
    line: &Line,
    preserve_unknown: bool,
    notifications: &mut NotificationCollection,
) -> Result<Material> {
    let mut cursor = FieldCursor {
        tokens: line.args(),
        pos: 0,
        line: line.number,
    };

    let name = match cursor.next() {
        Some(token) => token_text(token),
        None => return Err(cursor.error("missing material name")),
    };

    let diffuse = cursor.color("rgb")?;
    let ambient = cursor.color("amb")?;
    let emissive = cursor.color("emis")?;
    let specular = cursor.color("spec")?;

    cursor.keyword("shi")?;
    let raw_shininess = cursor
        .numeric()?
        .and_then(token_int)
        .ok_or_else(|| cursor.error("shi expects an integer"))?;
    let shininess = raw_shininess.clamp(0, i64::from(MAX_SHININESS)) as i32;
    if i64::from(shininess) != raw_shininess {
        notifications.notify_at(
            NotificationType::Warning,
            line.number,
            format!(
                "material {:?}: shininess {} clamped to {}",
                name, raw_shininess, shininess
            ),
        );
    }

    cursor.keyword("trans")?;
    let transparency = cursor
        .numeric()?
        .and_then(token_number)
        .ok_or_else(|| cursor.error("trans expects a number"))?;

    let extra_tokens: Vec<String> = cursor.remaining().iter().map(Token::raw).collect();
    if !extra_tokens.is_empty() {
        notifications.notify_at(
            NotificationType::UnknownDirective,
            line.number,
            format!(
                "material {:?}: {} trailing token(s) {}",
                name,
                extra_tokens.len(),
                if preserve_unknown { "kept" } else { "dropped" }
            ),
        );
    }

    Ok(Material {
        name,
        diffuse,
        ambient,
        emissive,
        specular,
        shininess,
        transparency,
        mirror: None,
        extra_tokens: if preserve_unknown { extra_tokens } else { Vec::new() },
    })
}

struct FieldCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    line: usize,
}

impl<'t> FieldCursor<'t> {
    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Next token of a numeric field; `1.2.3` is a lex error
    fn numeric(&mut self) -> Result<Option<&'t Token>> {
        let token = self.next();
        if let Some(token) = token {
            check_numbers(std::slice::from_ref(token), self.line)?;
        }
        Ok(token)
    }

    fn remaining(&self) -> &'t [Token] {
        self.tokens.get(self.pos..).unwrap_or(&[])
    }

    fn error(&self, message: impl Into<String>) -> AcError {
        AcError::MaterialParse {
            line: self.line,
            message: message.into(),
        }
    }

    fn keyword(&mut self, expected: &str) -> Result<()> {
        match self.next() {
            Some(Token::Identifier(word)) if word == expected => Ok(()),
            Some(other) => Err(self.error(format!("expected {:?}, found {:?}", expected, other.raw()))),
            None => Err(self.error(format!("expected {:?}, found end of line", expected))),
        }
    }

    fn color(&mut self, keyword: &str) -> Result<Rgb> {
        self.keyword(keyword)?;
        let mut channels = [0.0; 3];
        for channel in channels.iter_mut() {
            *channel = self
                .numeric()?
                .and_then(token_number)
                .ok_or_else(|| self.error(format!("{} expects 3 numbers", keyword)))?;
        }
        Ok(Rgb::from(channels))
    }
}
