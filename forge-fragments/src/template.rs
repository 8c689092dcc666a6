//! Typed fragment templates.
//!
//! A fragment template is parsed once into literal text and named slots.
//! Rendering is a single pass over those segments, so text substituted
//! into a slot is never scanned for placeholders again.
//!
//! Syntax:
//! - `{name}` is a required slot
//! - `{name?}` is an optional slot, rendered empty when not supplied
//! - `{{` and `}}` are literal braces

use indexmap::IndexMap;

use crate::{FragmentError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(usize),
}

/// A slot declared by a fragment template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub optional: bool,
}

/// A named, reusable code template.
#[derive(Debug, Clone)]
pub struct Fragment {
    id: String,
    template: String,
    segments: Vec<Segment>,
    slots: Vec<Slot>,
}

impl Fragment {
    /// Parse a template into a fragment.
    pub fn parse(id: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let template = template.into();
        let (segments, slots) = parse_segments(&id, &template)?;
        Ok(Self {
            id,
            template,
            segments,
            slots,
        })
    }

    /// The fragment id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The raw template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Slots declared by the template, in order of first appearance.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Render the fragment with the given slot values.
    ///
    /// Every required slot must be supplied and every supplied slot must
    /// be declared by the template.
    pub fn render(&self, values: &Slots<'_>) -> Result<String> {
        for name in values.names() {
            if !self.slots.iter().any(|s| s.name == name) {
                return Err(FragmentError::UnknownSlot {
                    id: self.id.clone(),
                    slot: name.to_string(),
                });
            }
        }

        for slot in &self.slots {
            if !slot.optional && values.get(&slot.name).is_none() {
                return Err(FragmentError::MissingSlot {
                    id: self.id.clone(),
                    slot: slot.name.clone(),
                });
            }
        }

        let mut out = String::with_capacity(self.template.len() + values.len_hint());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(index) => {
                    if let Some(value) = values.get(&self.slots[*index].name) {
                        out.push_str(value);
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Slot values for a single render call.
#[derive(Debug, Default, Clone)]
pub struct Slots<'a> {
    values: IndexMap<&'a str, &'a str>,
}

impl<'a> Slots<'a> {
    /// No slot values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot value.
    pub fn with(mut self, name: &'a str, value: &'a str) -> Self {
        self.values.insert(name, value);
        self
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        self.values.get(name).copied()
    }

    fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.values.keys().copied()
    }

    fn len_hint(&self) -> usize {
        self.values.values().map(|v| v.len()).sum()
    }
}

fn parse_segments(id: &str, template: &str) -> Result<(Vec<Segment>, Vec<Slot>)> {
    let mut segments = Vec::new();
    let mut slots: Vec<Slot> = Vec::new();
    let mut literal = String::new();

    let mut chars = template.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '}' => {
                return Err(FragmentError::malformed(
                    id,
                    template,
                    "unmatched '}', write '}}' for a literal brace",
                    (pos, 1),
                ));
            }
            '{' => {
                let mut raw = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    raw.push(c);
                }

                if !closed {
                    return Err(FragmentError::malformed(
                        id,
                        template,
                        "unclosed slot",
                        (pos, template.len() - pos),
                    ));
                }

                let (name, optional) = match raw.strip_suffix('?') {
                    Some(name) => (name, true),
                    None => (raw.as_str(), false),
                };

                if !is_slot_name(name) {
                    return Err(FragmentError::malformed(
                        id,
                        template,
                        format!("invalid slot name '{raw}'"),
                        (pos, raw.len() + 2),
                    ));
                }

                let index = match slots.iter().position(|s| s.name == name) {
                    Some(index) => {
                        if slots[index].optional != optional {
                            return Err(FragmentError::malformed(
                                id,
                                template,
                                format!("slot '{name}' is both required and optional"),
                                (pos, raw.len() + 2),
                            ));
                        }
                        index
                    }
                    None => {
                        slots.push(Slot {
                            name: name.to_string(),
                            optional,
                        });
                        slots.len() - 1
                    }
                };

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Slot(index));
            }
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok((segments, slots))
}

fn is_slot_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
