//! Register harvested URLs: remote data objects, one collection, one container.
//!
//! Write order follows the forward references (object ← collection ← container),
//! so a reader that finds the container can always follow it to the objects.

use crate::config::HarvesterConfig;
use crate::error::StoreError;
use crate::sparql::{escape, prefixes, GraphStore};

/// A URI minted from a configured base plus its UUID.
#[derive(Debug, Clone)]
struct NewResource {
    uuid: String,
    uri: String,
}

impl NewResource {
    fn mint(base: &str) -> Self {
        let uuid = uuid::Uuid::new_v4().to_string();
        let uri = format!("{base}{uuid}");
        Self { uuid, uri }
    }
}

pub struct EntityMaterializer<'a> {
    store: &'a dyn GraphStore,
    cfg: &'a HarvesterConfig,
}

impl<'a> EntityMaterializer<'a> {
    pub fn new(store: &'a dyn GraphStore, cfg: &'a HarvesterConfig) -> Self {
        Self { store, cfg }
    }

    /// Create one remote data object per URL, a collection holding all of them
    /// and a data container pointing at the collection. Returns the container URI,
    /// or `None` for an empty input (nothing is written).
    pub fn materialize(&self, urls: &[String]) -> Result<Option<String>, StoreError> {
        if urls.is_empty() {
            return Ok(None);
        }
        let mut objects = Vec::with_capacity(urls.len());
        for url in urls {
            objects.push(self.insert_remote_object(url)?);
        }
        let collection = self.insert_collection(&objects)?;
        let container = self.insert_container(&collection)?;
        tracing::info!(
            objects = objects.len(),
            collection = %collection,
            container = %container,
            "materialized harvest result"
        );
        Ok(Some(container))
    }

    fn insert_remote_object(&self, url: &str) -> Result<String, StoreError> {
        let r = NewResource::mint(&self.cfg.resources.remote_data_object_base);
        let update = format!(
            "{prefixes}\
INSERT DATA {{
  GRAPH {graph} {{
    {uri} a nfo:RemoteDataObject ;
      mu:uuid {uuid} ;
      nie:url {url} .
  }}
}}",
            prefixes = prefixes::header(&["nfo", "mu", "nie"]),
            graph = escape::iri(&self.cfg.graphs.remote_objects),
            uri = escape::iri(&r.uri),
            uuid = escape::literal(&r.uuid),
            url = escape::iri(url),
        );
        self.store.update(&update)?;
        Ok(r.uri)
    }

    fn insert_collection(&self, objects: &[String]) -> Result<String, StoreError> {
        let r = NewResource::mint(&self.cfg.resources.harvest_collection_base);
        let parts: Vec<String> = objects.iter().map(|o| escape::iri(o)).collect();
        let update = format!(
            "{prefixes}\
INSERT DATA {{
  GRAPH {graph} {{
    {uri} a harvesting:HarvestingCollection ;
      mu:uuid {uuid} ;
      dct:hasPart {parts} .
  }}
}}",
            prefixes = prefixes::header(&["harvesting", "mu", "dct"]),
            graph = escape::iri(&self.cfg.graphs.harvest_collections),
            uri = escape::iri(&r.uri),
            uuid = escape::literal(&r.uuid),
            parts = parts.join(",\n        "),
        );
        self.store.update(&update)?;
        Ok(r.uri)
    }

    fn insert_container(&self, collection: &str) -> Result<String, StoreError> {
        let r = NewResource::mint(&self.cfg.resources.data_container_base);
        let update = format!(
            "{prefixes}\
INSERT DATA {{
  GRAPH {graph} {{
    {uri} a nfo:DataContainer ;
      mu:uuid {uuid} ;
      task:hasHarvestingCollection {collection} .
  }}
}}",
            prefixes = prefixes::header(&["nfo", "mu", "task"]),
            graph = escape::iri(&self.cfg.graphs.data_containers),
            uri = escape::iri(&r.uri),
            uuid = escape::literal(&r.uuid),
            collection = escape::iri(collection),
        );
        self.store.update(&update)?;
        Ok(r.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_uri_is_base_plus_uuid() {
        let r = NewResource::mint("http://lblod.data.gift/id/harvest-collections/");
        assert!(r.uri.starts_with("http://lblod.data.gift/id/harvest-collections/"));
        assert!(r.uri.ends_with(&r.uuid));
        assert_eq!(r.uuid.len(), 36);
        assert_ne!(r.uuid, NewResource::mint("x/").uuid);
    }
}
