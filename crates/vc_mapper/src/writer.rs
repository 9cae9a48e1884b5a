use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::Any;

use serde_json::{Map, Value as Json};

use crate::codec::Codec;
use crate::info::TypeIdent;
use crate::{Entries, Mappable, ObjectMapper, View};

// -----------------------------------------------------------------------------
// Writer

/// Converts values into JSON for one [`ObjectMapper`]. Never fails.
pub(crate) struct Writer<'m> {
    mapper: &'m ObjectMapper,
}

impl<'m> Writer<'m> {
    #[inline]
    pub(crate) fn new(mapper: &'m ObjectMapper) -> Self {
        Self { mapper }
    }

    /// Text is returned verbatim, null as empty text, containers and
    /// objects as JSON text.
    pub(crate) fn write_text(&self, value: &dyn Mappable) -> String {
        match value.view() {
            View::Inner(inner) => self.write_text(inner),
            View::Text(text) => text.into(),
            View::Null => String::new(),
            View::Entries(entries) => self.stringify(&self.convert_entries(entries)),
            view @ (View::Bool(_) | View::Int(_) | View::Float(_)) => self.leaf_text(value, &view),
            View::Object => self.write_object(value),
        }
    }

    /// The JSON tree embedded for `value` inside a container or an object.
    pub(crate) fn convert_output(&self, value: &dyn Mappable) -> Json {
        match value.view() {
            View::Inner(inner) => self.convert_output(inner),
            View::Null => Json::Null,
            View::Entries(entries) => self.convert_entries(entries),
            View::Object => {
                let text = self.write_object(value);
                serde_json::from_str(&text).unwrap_or_else(|_| Json::String(text))
            }
            view => self.convert_leaf(value, &view),
        }
    }

    fn convert_entries(&self, entries: Entries<'_>) -> Json {
        match entries {
            Entries::List(items) => Json::Array(
                items
                    .into_iter()
                    .map(|item| self.convert_output(item))
                    .collect(),
            ),
            Entries::Keyed(items) => Json::Object(
                items
                    .into_iter()
                    .map(|(key, item)| (key.to_string(), self.convert_output(item)))
                    .collect(),
            ),
        }
    }

    fn leaf_codec(&self, view: &View<'_>) -> Option<(&'static str, Arc<dyn Codec>)> {
        let kind = view.scalar_kind()?;
        let codec = self.mapper.find_codec(&TypeIdent::scalar(kind))?;
        Some((kind.name(), codec))
    }

    fn convert_leaf(&self, value: &dyn Mappable, view: &View<'_>) -> Json {
        if let Some((kind, codec)) = self.leaf_codec(view) {
            return Json::String(codec.encode(value, kind));
        }
        match *view {
            View::Text(text) => Json::String(text.into()),
            View::Bool(b) => Json::Bool(b),
            View::Int(i) => Json::from(i),
            View::Float(f) => serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number),
            _ => Json::Null,
        }
    }

    fn leaf_text(&self, value: &dyn Mappable, view: &View<'_>) -> String {
        if let Some((kind, codec)) = self.leaf_codec(view) {
            return codec.encode(value, kind);
        }
        match *view {
            View::Text(text) => text.into(),
            View::Bool(true) => String::from("1"),
            View::Bool(false) => String::new(),
            View::Int(i) => i.to_string(),
            View::Float(f) => f.to_string(),
            _ => String::new(),
        }
    }

    /// Codec, then output capabilities in order, then the descriptor.
    fn write_object(&self, value: &dyn Mappable) -> String {
        let ident = value.type_ident();

        if let Some(codec) = self.mapper.find_codec(&ident) {
            return codec.encode(value, ident.name());
        }
        if let Some(entries) = value.as_entries() {
            return self.stringify(&self.convert_entries(entries));
        }
        if let Some(serialize) = value.as_serialize() {
            match serde_json::to_value(serialize) {
                Ok(json) => return self.stringify(&json),
                Err(err) => log::warn!("serializing `{ident}` failed, trying other outputs: {err}"),
            }
        }
        if let Some(map) = value.to_mapping() {
            return self.stringify(&Json::Object(map));
        }
        if let Some(text) = value.to_json() {
            return text;
        }
        if let Some(display) = value.as_display() {
            return display.to_string();
        }

        self.stringify(&Json::Object(self.write_fields(value, &ident)))
    }

    /// Public fields (through their getter if any), non-public fields with a
    /// getter, then appended getters.
    fn write_fields(&self, value: &dyn Mappable, ident: &TypeIdent) -> Map<String, Json> {
        let mut out = Map::new();

        let class = match self.mapper.context().descriptors().describe_ident(ident) {
            Ok(class) => class,
            Err(err) => {
                log::debug!("`{ident}` written as an empty object: {err}");
                return out;
            }
        };
        let instance: &dyn Any = value;

        for field in class.fields() {
            let json = match class.getter_for(field.name()) {
                Some(getter) => getter
                    .call_getter(instance)
                    .map_or(Json::Null, |result| self.convert_output(&*result)),
                None => field
                    .read(instance)
                    .map_or(Json::Null, |field| self.convert_output(field)),
            };
            out.insert(field.wire_name().into(), json);
        }

        for field in class.hidden_fields() {
            if let Some(getter) = class.getter_for(field.name()) {
                let json = getter
                    .call_getter(instance)
                    .map_or(Json::Null, |result| self.convert_output(&*result));
                out.insert(field.wire_name().into(), json);
            }
        }

        for (wire_name, getter) in class.appended() {
            let json = getter
                .call_getter(instance)
                .map_or(Json::Null, |result| self.convert_output(&*result));
            out.insert(wire_name.into(), json);
        }

        out
    }

    fn stringify(&self, json: &Json) -> String {
        let text = if self.mapper.options().pretty {
            serde_json::to_string_pretty(json)
        } else {
            serde_json::to_string(json)
        };
        text.unwrap_or_default()
    }
}
