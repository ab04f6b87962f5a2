//! Minimal namespaced XML tree builder.
//!
//! Elements are created detached, assembled bottom-up and finally attached
//! as the single document root. Namespace prefixes are registered once and
//! declared on the root as `xmlns:*` attributes.

use log::trace;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use crate::core::XmlError;

/// A namespace-qualified XML element (`prefix:localName`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Qualified name, e.g. `ram:LineID`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, replacing any previous value of the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set the text content. An empty string serializes as an empty element.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Builds a single-root XML document with registered namespace prefixes.
#[derive(Debug, Default)]
pub struct XmlDocumentBuilder {
    /// (uri, prefix), in registration order.
    namespaces: Vec<(String, String)>,
    root: Option<Element>,
}

impl XmlDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `prefix` for `uri`. Re-registering a URI replaces its prefix.
    ///
    /// May be called before or after [`set_root`](Self::set_root); the root
    /// always carries the declarations of every registered namespace.
    pub fn register_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        trace!("register namespace {prefix} -> {uri}");
        match self.namespaces.iter_mut().find(|(u, _)| *u == uri) {
            Some(slot) => slot.1 = prefix,
            None => self.namespaces.push((uri, prefix)),
        }
        self.apply_namespace_declarations();
    }

    /// Create a detached element `prefix:local_name` in a registered namespace.
    pub fn create_element(&self, namespace_uri: &str, local_name: &str) -> Result<Element, XmlError> {
        let prefix = self
            .namespaces
            .iter()
            .find(|(u, _)| u == namespace_uri)
            .map(|(_, p)| p)
            .ok_or_else(|| XmlError::UnknownNamespace(namespace_uri.to_string()))?;
        Ok(Element::new(format!("{prefix}:{local_name}")))
    }

    /// Attach the document root. Can only be done once.
    pub fn set_root(&mut self, element: Element) -> Result<(), XmlError> {
        if self.root.is_some() {
            return Err(XmlError::RootAlreadySet);
        }
        trace!("set root {}", element.name);
        self.root = Some(element);
        self.apply_namespace_declarations();
        Ok(())
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    fn apply_namespace_declarations(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        for (uri, prefix) in &self.namespaces {
            root.set_attribute(format!("xmlns:{prefix}"), uri.as_str());
        }
    }

    /// Serialize the document as indented UTF-8 XML with declaration.
    pub fn serialize(&self) -> Result<Vec<u8>, XmlError> {
        let root = self.root.as_ref().ok_or(XmlError::MissingRoot)?;
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, root)?;
        Ok(writer.into_inner().into_inner())
    }
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, element: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (k, v) in &element.attributes {
        start.push_attribute((k.as_str(), v.as_str()));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
