//! # dispatch::descriptor
//!
//! What the responder decides, as plain data. Turning it into bytes on the
//! wire is [`crate::render`]'s job.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ErrorResponse;

/// Named model attributes handed to a page template.
pub type Attributes = BTreeMap<String, Value>;

// ─── Page ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub template:   &'static str,
    pub attributes: Attributes,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            attributes: Attributes::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Like [`Page::with`], but `None` leaves the attribute out.
    pub fn with_opt(self, name: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

// ─── ResponseDescriptor ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseDescriptor {
    RenderPage(Page),
    JsonError(ErrorResponse),
    Redirect { location: String },
}

impl ResponseDescriptor {
    pub fn redirect(location: impl Into<String>) -> Self {
        ResponseDescriptor::Redirect {
            location: location.into(),
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            ResponseDescriptor::RenderPage(page) => Some(page),
            _ => None,
        }
    }
}

impl From<Page> for ResponseDescriptor {
    fn from(page: Page) -> Self {
        ResponseDescriptor::RenderPage(page)
    }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

/// Outcome of a responder in the chain: it either answered, or hands the
/// failure on to the next handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Handled(ResponseDescriptor),
    Deferred,
}

impl Dispatch {
    pub fn descriptor(&self) -> Option<&ResponseDescriptor> {
        match self {
            Dispatch::Handled(descriptor) => Some(descriptor),
            Dispatch::Deferred => None,
        }
    }
}
