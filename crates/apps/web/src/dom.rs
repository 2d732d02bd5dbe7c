use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

pub fn document() -> Result<Document, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// Replaces the content of the container with the given id.
pub fn replace_content(id: &str, markup: &str) -> Result<(), JsValue> {
    element(id)?.set_inner_html(markup);
    Ok(())
}

/// Appends `markup` inside every element matching `selector`; returns how
/// many elements were touched.
pub fn append_to_each(selector: &str, markup: &str) -> Result<u32, JsValue> {
    let nodes = document()?.query_selector_all(selector)?;
    let mut touched = 0;
    for idx in 0..nodes.length() {
        let Some(node) = nodes.item(idx) else {
            continue;
        };
        let el = node.dyn_into::<Element>()?;
        el.insert_adjacent_html("beforeend", markup)?;
        touched += 1;
    }
    Ok(touched)
}

pub fn set_title(title: &str) -> Result<(), JsValue> {
    document()?.set_title(title);
    Ok(())
}

pub fn current_hash() -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.location().hash()
}

/// The live document as a chapter render target.
#[derive(Debug, Default)]
pub struct DomSink;

impl crate::chapter::PageSink for DomSink {
    type Error = JsValue;

    fn replace_content(&mut self, id: &str, markup: &str) -> Result<(), JsValue> {
        replace_content(id, markup)
    }

    fn append_to_each(&mut self, selector: &str, markup: &str) -> Result<u32, JsValue> {
        append_to_each(selector, markup)
    }

    fn set_title(&mut self, title: &str) -> Result<(), JsValue> {
        set_title(title)
    }
}
