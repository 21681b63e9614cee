// Enigma2 service-list XML models
//
// `/web/getservices?sRef=...` answers with a flat `<e2servicelist>`;
// `/web/getallservices` answers with `<e2servicelistrecursive>`, one
// `<e2bouquet>` per channel group, each carrying its own nested list.
// Only the reference and name of each entry are modelled; every other
// element (`e2serviceisplayable`, ...) is ignored by serde.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use crate::error::Error;

const FLAT_ROOT: &str = "e2servicelist";
const GROUPED_ROOT: &str = "e2servicelistrecursive";

/// One channel (or marker) entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Service {
    #[serde(rename = "e2servicereference")]
    pub reference: String,
    #[serde(rename = "e2servicename", default)]
    pub name: String,
}

/// `<e2servicelist>`: a flat sequence of services.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceList {
    #[serde(rename = "e2service", default)]
    pub services: Vec<Service>,
}

/// `<e2bouquet>`: a named channel group with its nested service list.
#[derive(Debug, Clone, Deserialize)]
pub struct Bouquet {
    #[serde(rename = "e2servicereference")]
    pub reference: String,
    #[serde(rename = "e2servicename", default)]
    pub name: String,
    #[serde(rename = "e2servicelist", default)]
    pub services: ServiceList,
}

/// `<e2servicelistrecursive>`: every bouquet with its services.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceListRecursive {
    #[serde(rename = "e2bouquet", default)]
    pub bouquets: Vec<Bouquet>,
}

/// A decoded service-list response, in whichever shape the box sent.
#[derive(Debug, Clone)]
pub enum ServiceListDocument {
    Flat(ServiceList),
    Grouped(ServiceListRecursive),
}

impl ServiceListDocument {
    /// Decode a response body, dispatching on its root element.
    pub fn parse(body: &str) -> Result<Self, Error> {
        let root = root_element(body)?;
        match root.as_str() {
            FLAT_ROOT => quick_xml::de::from_str(body)
                .map(Self::Flat)
                .map_err(|e| deserialization(e.to_string(), body)),
            GROUPED_ROOT => quick_xml::de::from_str(body)
                .map(Self::Grouped)
                .map_err(|e| deserialization(e.to_string(), body)),
            other => Err(deserialization(
                format!("unexpected root element <{other}>"),
                body,
            )),
        }
    }

    /// Total number of service entries across all groups.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(list) => list.services.len(),
            Self::Grouped(tree) => tree.bouquets.iter().map(|b| b.services.services.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Name of the first element in the document, skipping the prolog.
fn root_element(body: &str) -> Result<String, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => return Err(deserialization("empty document".into(), body)),
            Ok(_) => {}
            Err(e) => return Err(deserialization(e.to_string(), body)),
        }
    }
}

fn deserialization(message: String, body: &str) -> Error {
    Error::Deserialization {
        message,
        body: body.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FLAT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<e2servicelist>
    <e2service>
        <e2servicereference>1:0:19:283D:3FB:1:C00000:0:0:0:</e2servicereference>
        <e2servicename>Das Erste HD</e2servicename>
    </e2service>
    <e2service>
        <e2servicereference>1:0:19:2B66:3F3:1:C00000:0:0:0:</e2servicereference>
        <e2servicename>ZDF HD</e2servicename>
    </e2service>
</e2servicelist>"#;

    const GROUPED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<e2servicelistrecursive>
    <e2bouquet>
        <e2servicereference>1:7:1:0:0:0:0:0:0:0:FROM BOUQUET "userbouquet.favourites.tv" ORDER BY bouquet</e2servicereference>
        <e2servicename>Favourites (TV)</e2servicename>
        <e2servicelist>
            <e2service>
                <e2servicereference>1:0:1:445D:453:1:C00000:0:0:0:</e2servicereference>
                <e2servicename>BBC One</e2servicename>
            </e2service>
        </e2servicelist>
    </e2bouquet>
    <e2bouquet>
        <e2servicereference>1:7:1:0:0:0:0:0:0:0:FROM BOUQUET "userbouquet.news.tv" ORDER BY bouquet</e2servicereference>
        <e2servicename>News</e2servicename>
        <e2servicelist/>
    </e2bouquet>
</e2servicelistrecursive>"#;

    #[test]
    fn parses_flat_listing() {
        let doc = ServiceListDocument::parse(FLAT).unwrap();
        let ServiceListDocument::Flat(list) = doc else {
            panic!("expected flat listing");
        };
        assert_eq!(list.services.len(), 2);
        assert_eq!(list.services[0].name, "Das Erste HD");
        assert_eq!(list.services[1].reference, "1:0:19:2B66:3F3:1:C00000:0:0:0:");
    }

    #[test]
    fn parses_grouped_listing_with_empty_bouquet() {
        let doc = ServiceListDocument::parse(GROUPED).unwrap();
        assert_eq!(doc.len(), 1);
        let ServiceListDocument::Grouped(tree) = doc else {
            panic!("expected grouped listing");
        };
        assert_eq!(tree.bouquets.len(), 2);
        assert_eq!(tree.bouquets[0].name, "Favourites (TV)");
        assert_eq!(tree.bouquets[0].services.services[0].name, "BBC One");
        assert!(tree.bouquets[1].services.services.is_empty());
    }

    #[test]
    fn empty_flat_listing_is_valid() {
        let doc = ServiceListDocument::parse("<e2servicelist></e2servicelist>").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn unknown_root_is_rejected() {
        let result = ServiceListDocument::parse("<e2simplexmlresult><e2state>True</e2state></e2simplexmlresult>");
        assert!(
            matches!(&result, Err(Error::Deserialization { message, .. }) if message.contains("e2simplexmlresult")),
            "got: {result:?}"
        );
    }

    #[test]
    fn non_xml_body_is_rejected() {
        let result = ServiceListDocument::parse("");
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }
}
