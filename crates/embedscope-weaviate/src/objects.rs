//! Object payloads returned by the `/v1/objects` endpoint.

use std::collections::HashMap;

use embedscope_core::{Record, UNKNOWN_LABEL};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One page of objects from a cursor listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPage {
    /// Objects on this page, ordered by id.
    #[serde(default)]
    pub objects: Vec<WeaviateObject>,
    /// Total number of objects reported by the server, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
}

/// A stored Weaviate object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaviateObject {
    /// Object UUID.
    pub id: String,
    /// Collection (class) name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Object properties.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// The single default vector, for collections without named vectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
    /// Named vectors keyed by vectorizer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectors: Option<HashMap<String, Vec<f32>>>,
}

/// The embedding attached to an object.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectVector {
    /// A plain numeric sequence.
    Flat(Vec<f32>),
    /// Vectors keyed by name.
    Named(HashMap<String, Vec<f32>>),
}

impl ObjectVector {
    /// Resolves the numeric sequence to use, reading `name` from a named map.
    pub fn resolve(self, id: &str, name: &str) -> Result<Vec<f32>> {
        match self {
            Self::Flat(vector) => Ok(vector),
            Self::Named(mut named) => named
                .remove(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::MissingNamedVector {
                    id: id.to_owned(),
                    name: name.to_owned(),
                }),
        }
    }
}

impl WeaviateObject {
    /// Returns the object's embedding.
    ///
    /// A non-empty named vector map takes precedence over the flat vector.
    pub fn take_vector(&mut self) -> Option<ObjectVector> {
        match (self.vectors.take(), self.vector.take()) {
            (Some(named), _) if !named.is_empty() => Some(ObjectVector::Named(named)),
            (_, Some(flat)) => Some(ObjectVector::Flat(flat)),
            _ => None,
        }
    }

    /// Returns the label stored under `property`, or [`UNKNOWN_LABEL`].
    ///
    /// Strings are used verbatim, other JSON values by their JSON text.
    pub fn label(&self, property: &str) -> String {
        match self.properties.get(property) {
            None | Some(Value::Null) => UNKNOWN_LABEL.to_owned(),
            Some(Value::String(label)) => label.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Converts the object into a pipeline record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingVector`] if the object carries no vector, or
    /// [`Error::MissingNamedVector`] if a named map lacks `vector_name`.
    pub fn into_record(mut self, label_property: &str, vector_name: &str) -> Result<Record> {
        let label = self.label(label_property);
        let vector = self
            .take_vector()
            .ok_or_else(|| Error::MissingVector {
                id: self.id.clone(),
            })?
            .resolve(&self.id, vector_name)?;

        Ok(Record::new(vector, label))
    }
}
