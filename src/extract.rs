use select::document::Document;
use select::node::Node;

use crate::error::LocateError;
use crate::path::ElementPath;
use crate::report::ErrorReporter;

/// Leading text of `node`, up to its first non-text child, trimmed.
/// `None` when blank.
pub fn direct_text(node: Node) -> Option<String> {
    let mut text = String::new();
    for child in node.children() {
        match child.as_text() {
            Some(t) => text.push_str(t),
            None => break,
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

pub fn locate_text(document: &Document, path: &ElementPath) -> Result<String, LocateError> {
    let node = path.resolve(document).ok_or(LocateError::NotFound)?;
    direct_text(node).ok_or(LocateError::NoText)
}

/// One entry per selector, in selector order. Each miss is reported once.
pub fn extract_names<R: ErrorReporter>(
    document: &Document,
    selectors: &[ElementPath],
    reporter: &R,
) -> Vec<Option<String>> {
    selectors
        .iter()
        .map(|path| match locate_text(document, path) {
            Ok(name) => Some(name),
            Err(err) => {
                reporter.report(&format!(
                    "element not found at path: '{}'. Cause: {}",
                    path, err
                ));
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridLayout, NAME_PATH};
    use crate::path::NameSelectors;
    use crate::report::RecordingReporter;

    fn card(name: Option<&str>) -> String {
        let heading = match name {
            Some(name) => format!("<h2>{}</h2>", name),
            None => String::new(),
        };
        format!(
            r#"<div><a href="/c"><div><div><div><img></div><div>{}<p>city</p></div></div></div></a></div>"#,
            heading
        )
    }

    fn listing(layout: &GridLayout, missing: Option<(usize, usize)>) -> String {
        let mut rows = String::from("<div>filters</div>");
        for (i, &width) in layout.row_widths.iter().enumerate() {
            let row = layout.first_row + i;
            let cards: String = (1..=width)
                .map(|col| {
                    let name = format!("Carrier {}-{}", row, col);
                    card((missing != Some((row, col))).then_some(name.as_str()))
                })
                .collect();
            rows.push_str(&format!("<div>{}</div>", cards));
        }
        format!(
            r#"<html><body><div id="sapper"><main><div><div>hero</div><div>{}</div></div></main></div></body></html>"#,
            rows
        )
    }

    #[test]
    fn direct_text_stops_at_first_child_element() {
        let document = Document::from("<h2>  Acme Freight <small>LLC</small> tail</h2>");
        let path = ElementPath::parse("//h2").unwrap();
        assert_eq!(locate_text(&document, &path).as_deref(), Ok("Acme Freight"));
    }

    #[test]
    fn direct_text_stops_at_a_comment() {
        let document = Document::from("<h2>Acme<!--x--> Freight</h2>");
        let path = ElementPath::parse("//h2").unwrap();
        assert_eq!(locate_text(&document, &path).as_deref(), Ok("Acme"));
    }

    #[test]
    fn blank_or_absent_elements_fail() {
        let document = Document::from("<h2>   </h2><h3><b>x</b></h3>");
        let h2 = ElementPath::parse("//h2").unwrap();
        let h3 = ElementPath::parse("//h3").unwrap();
        let h4 = ElementPath::parse("//h4").unwrap();
        assert_eq!(locate_text(&document, &h2), Err(LocateError::NoText));
        assert_eq!(locate_text(&document, &h3), Err(LocateError::NoText));
        assert_eq!(locate_text(&document, &h4), Err(LocateError::NotFound));
    }

    #[test]
    fn extracts_full_grid_in_row_major_order() {
        let layout = GridLayout::default();
        let selectors = NameSelectors::from_template(NAME_PATH, &layout).unwrap();
        let document = Document::from(listing(&layout, None).as_str());
        let reporter = RecordingReporter::new();

        let names = extract_names(&document, &selectors, &reporter);

        assert_eq!(names.len(), 21);
        assert!(reporter.is_empty());
        let expected: Vec<Option<String>> = layout
            .cells()
            .into_iter()
            .map(|(row, col)| Some(format!("Carrier {}-{}", row, col)))
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn missing_cell_yields_none_and_one_report() {
        let layout = GridLayout::default();
        let selectors = NameSelectors::from_template(NAME_PATH, &layout).unwrap();
        let document = Document::from(listing(&layout, Some((5, 2))).as_str());
        let reporter = RecordingReporter::new();

        let names = extract_names(&document, &selectors, &reporter);

        assert_eq!(names.len(), 21);
        assert_eq!(names[10], None);
        assert_eq!(names.iter().filter(|n| n.is_none()).count(), 1);

        let messages = reporter.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("element not found at path: '"));
        assert!(messages[0].contains("/div[5]/div[2]/a/"));
    }

    #[test]
    fn unrelated_page_reports_every_cell() {
        let selectors = NameSelectors::from_template(NAME_PATH, &GridLayout::default()).unwrap();
        let document = Document::from("<html><body><p>maintenance</p></body></html>");
        let reporter = RecordingReporter::new();

        let names = extract_names(&document, &selectors, &reporter);

        assert!(names.iter().all(Option::is_none));
        assert_eq!(reporter.len(), 21);
    }
}
