//! Chat prompt templates.
//!
//! A template is an ordered list of role-tagged message templates with
//! `{name}` placeholders. Rendering substitutes variables and produces a
//! [`ChatRequest`]. `{{` and `}}` render as literal braces.
//!
//! ```text
//! system: Answer questions about {product}.
//! user:   {question}
//! ```

use std::collections::HashMap;

use crate::error::{InferenceError, InferenceResult};
use crate::models::{ChatMessage, ChatRequest, Role};

/// One piece of a parsed message template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// Role-tagged message templates rendered into a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    messages: Vec<(Role, Vec<Segment>)>,
}

impl ChatPromptTemplate {
    /// Parse `(role, template)` pairs.
    ///
    /// Fails with an invalid-request error on unbalanced braces or an empty
    /// placeholder name.
    pub fn from_messages<I, S>(messages: I) -> InferenceResult<Self>
    where
        I: IntoIterator<Item = (Role, S)>,
        S: AsRef<str>,
    {
        let messages = messages
            .into_iter()
            .map(|(role, template)| parse(template.as_ref()).map(|segments| (role, segments)))
            .collect::<InferenceResult<Vec<_>>>()?;

        Ok(Self { messages })
    }

    /// Placeholder names in order of first appearance.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, segments) in &self.messages {
            for segment in segments {
                if let Segment::Variable(name) = segment {
                    if !names.contains(&name.as_str()) {
                        names.push(name.as_str());
                    }
                }
            }
        }
        names
    }

    /// Substitute variables and build the chat request.
    ///
    /// Every placeholder needs a value; unused variables are ignored.
    pub fn render(&self, variables: &HashMap<String, String>) -> InferenceResult<ChatRequest> {
        let mut rendered = Vec::with_capacity(self.messages.len());

        for (role, segments) in &self.messages {
            let mut content = String::new();
            for segment in segments {
                match segment {
                    Segment::Literal(text) => content.push_str(text),
                    Segment::Variable(name) => {
                        let value = variables.get(name).ok_or_else(|| {
                            InferenceError::invalid_request(format!(
                                "missing value for prompt variable '{}'",
                                name
                            ))
                        })?;
                        content.push_str(value);
                    }
                }
            }
            rendered.push(ChatMessage::new(*role, content));
        }

        Ok(ChatRequest::new(rendered))
    }
}

fn parse(template: &str) -> InferenceResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(InferenceError::invalid_request(format!(
                                "unclosed placeholder in prompt template: {}",
                                template
                            )))
                        }
                        Some(ch) => name.push(ch),
                    }
                }
                let name = name.trim();
                if name.is_empty() {
                    return Err(InferenceError::invalid_request(
                        "empty placeholder in prompt template",
                    ));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(name.to_string()));
            }
            '}' => {
                return Err(InferenceError::invalid_request(format!(
                    "unmatched '}}' in prompt template: {}",
                    template
                )))
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
