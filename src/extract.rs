use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Error;
use crate::kml::Element;

/// A placemark that carries both a name and an image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placemark {
    pub name: String,
    pub image_url: String,
}

impl Placemark {
    /// Reads `name` and `ExtendedData/Data/value`. `None` if either is missing or empty.
    pub fn from_element(placemark: &Element) -> Option<Placemark> {
        let name = placemark.child("name")?.text()?;
        let image_url = placemark
            .child("ExtendedData")?
            .child("Data")?
            .child("value")?
            .text()?;

        Some(Placemark {
            name: name.to_string(),
            image_url: image_url.to_string(),
        })
    }

    /// One compact JSON object, as printed in list mode.
    pub fn to_json_line(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Yields every complete placemark under `Document/Folder`. Incomplete ones are skipped.
pub fn placemarks(root: &Element) -> impl Iterator<Item = Placemark> + '_ {
    let folder = root.child("Document").and_then(|d| d.child("Folder"));
    if folder.is_none() {
        warn!(root = root.name(), "no Document/Folder found, nothing to extract");
    }

    folder
        .into_iter()
        .flat_map(|f| f.children_named("Placemark"))
        .filter_map(|element| {
            let placemark = Placemark::from_element(element);
            if placemark.is_none() {
                debug!(
                    name = element.child("name").and_then(Element::text),
                    "skipping placemark without name or image url"
                );
            }
            placemark
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kml::parse_str;

    fn placemark(name: Option<&str>, value: Option<&str>) -> String {
        let name = name.map(|n| format!("<name>{n}</name>")).unwrap_or_default();
        let value = value
            .map(|v| {
                format!(
                    r#"<ExtendedData><Data name="gx_media_links"><value>{v}</value></Data></ExtendedData>"#
                )
            })
            .unwrap_or_default();
        format!("<Placemark>{name}<Point><coordinates>2.29,48.85,0</coordinates></Point>{value}</Placemark>")
    }

    fn document(placemarks: &[String]) -> Element {
        parse_str(&format!(
            r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document><Folder>{}</Folder></Document></kml>"#,
            placemarks.concat()
        ))
        .unwrap()
    }

    #[test]
    fn given_complete_placemarks_when_extract_then_all_in_order() {
        // Given
        let root = document(&[
            placemark(Some("Eiffel Tower"), Some("http://example.com/a.jpg")),
            placemark(Some("Louvre"), Some("http://example.com/b.png")),
        ]);

        // When
        let records: Vec<_> = placemarks(&root).collect();

        // Then
        assert_eq!(
            records,
            vec![
                Placemark {
                    name: "Eiffel Tower".to_string(),
                    image_url: "http://example.com/a.jpg".to_string()
                },
                Placemark {
                    name: "Louvre".to_string(),
                    image_url: "http://example.com/b.png".to_string()
                },
            ]
        );
    }

    #[test]
    fn given_incomplete_placemarks_when_extract_then_they_are_skipped() {
        // Given
        let root = document(&[
            placemark(None, Some("http://example.com/no-name.jpg")),
            placemark(Some("No photo"), None),
            placemark(Some("Empty photo"), Some("")),
            placemark(Some("Kept"), Some("http://example.com/kept.jpg")),
            "<Placemark><name>Partial</name><ExtendedData><Data/></ExtendedData></Placemark>".to_string(),
        ]);

        // When
        let names: Vec<_> = placemarks(&root).map(|p| p.name).collect();

        // Then
        assert_eq!(names, vec!["Kept"]);
    }

    #[test]
    fn given_missing_folder_when_extract_then_empty() {
        let root = parse_str("<kml><Document><Placemark/></Document></kml>").unwrap();

        assert_eq!(placemarks(&root).count(), 0);
    }

    #[test]
    fn given_same_tree_when_extract_twice_then_same_records() {
        let root = document(&[placemark(Some("A"), Some("http://example.com/a.jpg"))]);

        let first: Vec<_> = placemarks(&root).collect();
        let second: Vec<_> = placemarks(&root).collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn json_line_has_name_and_image_url() {
        let placemark = Placemark {
            name: "Caf\u{e9} \"Chez Nous\"".to_string(),
            image_url: "http://example.com/a.jpg".to_string(),
        };

        assert_eq!(
            placemark.to_json_line().unwrap(),
            r#"{"name":"Café \"Chez Nous\"","image_url":"http://example.com/a.jpg"}"#
        );
    }

    #[test]
    fn only_first_folder_is_walked() {
        let root = parse_str(&format!(
            "<kml><Document><Folder>{}</Folder><Folder>{}</Folder></Document></kml>",
            placemark(Some("First"), Some("http://example.com/1.jpg")),
            placemark(Some("Second"), Some("http://example.com/2.jpg")),
        ))
        .unwrap();

        let names: Vec<_> = placemarks(&root).map(|p| p.name).collect();

        assert_eq!(names, vec!["First"]);
    }
}
