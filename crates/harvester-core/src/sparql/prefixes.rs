//! Namespace prefixes used in generated queries.

pub const TASK: &str = "http://redpencil.data.gift/vocabularies/tasks/";
pub const ADMS: &str = "http://www.w3.org/ns/adms#";
pub const DCT: &str = "http://purl.org/dc/terms/";
pub const NFO: &str = "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#";
pub const NIE: &str = "http://www.semanticdesktop.org/ontologies/2007/01/19/nie#";
pub const MU: &str = "http://mu.semte.ch/vocabularies/core/";
pub const EXT: &str = "http://mu.semte.ch/vocabularies/ext/";
pub const ELI: &str = "http://data.europa.eu/eli/ontology#";
pub const HARVESTING: &str = "http://lblod.data.gift/vocabularies/harvesting/";

const ALL: &[(&str, &str)] = &[
    ("task", TASK),
    ("adms", ADMS),
    ("dct", DCT),
    ("nfo", NFO),
    ("nie", NIE),
    ("mu", MU),
    ("ext", EXT),
    ("eli", ELI),
    ("harvesting", HARVESTING),
];

/// `PREFIX` header for the given short names. Unknown names are skipped.
pub fn header(names: &[&str]) -> String {
    let mut out = String::new();
    for name in names {
        if let Some((short, ns)) = ALL.iter().find(|(short, _)| short == name) {
            out.push_str(&format!("PREFIX {short}: <{ns}>\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lists_requested_prefixes_in_order() {
        let h = header(&["adms", "task"]);
        assert_eq!(
            h,
            "PREFIX adms: <http://www.w3.org/ns/adms#>\n\
             PREFIX task: <http://redpencil.data.gift/vocabularies/tasks/>\n"
        );
    }

    #[test]
    fn header_skips_unknown() {
        assert_eq!(header(&["nope"]), "");
    }
}
