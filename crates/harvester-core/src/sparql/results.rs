//! SPARQL 1.1 query results in the JSON format (`application/sparql-results+json`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One RDF term in a binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfTerm {
    /// `uri`, `literal`, `typed-literal` or `bnode`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, rename = "xml:lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl RdfTerm {
    pub fn iri(value: impl Into<String>) -> Self {
        Self {
            kind: "uri".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: "literal".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn bnode(value: impl Into<String>) -> Self {
        Self {
            kind: "bnode".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }
}

/// Variable name -> bound term. Unbound variables are absent.
pub type Binding = HashMap<String, RdfTerm>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// Parsed response of a SELECT or ASK query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResults {
    #[serde(default)]
    pub head: ResultsHead,
    #[serde(default)]
    pub results: ResultSet,
    /// Present for ASK queries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

impl QueryResults {
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn from_bindings(vars: Vec<String>, bindings: Vec<Binding>) -> Self {
        Self {
            head: ResultsHead { vars },
            results: ResultSet { bindings },
            boolean: None,
        }
    }

    pub fn from_boolean(value: bool) -> Self {
        Self {
            boolean: Some(value),
            ..Self::default()
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.results.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }

    /// Values bound to `var`, in row order, skipping rows where it is unbound.
    pub fn values<'a>(&'a self, var: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.results
            .bindings
            .iter()
            .filter_map(move |row| row.get(var).map(|t| t.value.as_str()))
    }

    /// First value bound to `var`, if any.
    pub fn first<'a>(&'a self, var: &'a str) -> Option<&'a str> {
        self.values(var).next()
    }
}
