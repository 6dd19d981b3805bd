// ============================================================================
// ELEMENT BUILDER - Chained element construction
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, MouseEvent};

use crate::dom::{append_child, create_element, on_click, on_event};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Replaces every class
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        self.element.set_attribute("id", id)?;
        Ok(self)
    }

    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        self.element.set_attribute(name, value)?;
        Ok(self)
    }

    /// Set or drop a boolean attribute such as `disabled` or `selected`
    pub fn flag(self, name: &str, on: bool) -> Result<Self, JsValue> {
        if on {
            self.element.set_attribute(name, "")?;
        } else {
            self.element.remove_attribute(name)?;
        }
        Ok(self)
    }

    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn children<I>(self, children: I) -> Result<Self, JsValue>
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            append_child(&self.element, &child)?;
        }
        Ok(self)
    }

    pub fn on_click<F>(self, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        on_click(&self.element, handler)?;
        Ok(self)
    }

    pub fn on<F>(self, event_type: &str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        on_event(&self.element, event_type, handler)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// `<tag class=..>text</tag>` in one call
pub fn text_el(tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new(tag)?.class(class).text(text).build())
}
