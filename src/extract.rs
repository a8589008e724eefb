// Structural extraction from a fetched HTML document. Everything here is
// synchronous: `scraper::Html` is not Send, so parsing must finish before the
// caller awaits anything.

use scraper::{Html, Selector};

use crate::config::ScrapeLimits;
use crate::types::{PageImage, PageLink, ScrapedPage};

/// Reduce a document to its bounded structural summary. Items are emitted in
/// document order, first match wins; elements failing a filter do not consume
/// a slot toward the cap.
pub fn extract_page(html: &str, limits: &ScrapeLimits) -> ScrapedPage {
    let document = Html::parse_document(html);

    // Selectors are static and known-valid
    let title_sel = Selector::parse("title").unwrap();
    let description_sel = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let heading_sel = Selector::parse("h1, h2, h3").unwrap();
    let paragraph_sel = Selector::parse("p").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();
    let image_sel = Selector::parse("img[src]").unwrap();

    let title = document
        .select(&title_sel)
        .next()
        .map(|elem| element_text(&elem))
        .unwrap_or_default();

    let description = document
        .select(&description_sel)
        .next()
        .and_then(|elem| elem.value().attr("content"))
        .unwrap_or("")
        .to_string();

    let headings = document
        .select(&heading_sel)
        .map(|elem| element_text(&elem))
        .take(limits.headings)
        .collect();

    let paragraphs = document
        .select(&paragraph_sel)
        .map(|elem| element_text(&elem))
        .filter(|text| text.chars().count() > 20)
        .take(limits.paragraphs)
        .collect();

    let links = document
        .select(&link_sel)
        .filter_map(|elem| {
            let href = elem.value().attr("href")?;
            let text = element_text(&elem);
            if href.is_empty() || text.is_empty() {
                return None;
            }
            Some(PageLink {
                text,
                href: href.to_string(),
            })
        })
        .take(limits.links)
        .collect();

    let images = document
        .select(&image_sel)
        .filter_map(|elem| {
            let src = elem.value().attr("src")?;
            if src.is_empty() {
                return None;
            }
            Some(PageImage {
                src: src.to_string(),
                alt: elem.value().attr("alt").unwrap_or("").to_string(),
            })
        })
        .take(limits.images)
        .collect();

    ScrapedPage {
        title,
        description,
        headings,
        paragraphs,
        links,
        images,
    }
}

fn element_text(elem: &scraper::ElementRef<'_>) -> String {
    elem.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ScrapedPage {
        extract_page(html, &ScrapeLimits::default())
    }

    #[test]
    fn test_title_and_description() {
        let page = extract(
            r#"<html><head>
                <title>  Neon City News  </title>
                <meta name="description" content="Latest from the grid">
            </head><body></body></html>"#,
        );
        assert_eq!(page.title, "Neon City News");
        assert_eq!(page.description, "Latest from the grid");
    }

    #[test]
    fn test_missing_title_and_description_are_empty() {
        let page = extract("<html><body><p>Just a lonely paragraph here.</p></body></html>");
        assert_eq!(page.title, "");
        assert_eq!(page.description, "");
    }

    #[test]
    fn test_headings_in_document_order_capped_at_ten() {
        let body: String = (1..=12)
            .map(|i| format!("<h2>Heading {}</h2>", i))
            .collect();
        let page = extract(&format!("<html><body><h1>Top</h1>{}</body></html>", body));
        assert_eq!(page.headings.len(), 10);
        assert_eq!(page.headings[0], "Top");
        assert_eq!(page.headings[1], "Heading 1");
        assert_eq!(page.headings[9], "Heading 9");
    }

    #[test]
    fn test_short_paragraphs_do_not_consume_slots() {
        // 15 paragraphs, 3 of them at or under 20 chars; the cap applies after
        // the length filter, so all 12 long ones compete for 10 slots.
        let mut body = String::new();
        for i in 1..=15 {
            if i % 5 == 0 {
                body.push_str("<p>short</p>");
            } else {
                body.push_str(&format!("<p>This is long paragraph number {:02}.</p>", i));
            }
        }
        let page = extract(&format!("<html><body>{}</body></html>", body));
        assert_eq!(page.paragraphs.len(), 10);
        assert!(page.paragraphs.iter().all(|p| p.chars().count() > 20));
        assert_eq!(page.paragraphs[0], "This is long paragraph number 01.");
        // Document order preserved among the survivors
        let numbers: Vec<&str> = page
            .paragraphs
            .iter()
            .map(|p| p.rsplit(' ').next().unwrap())
            .collect();
        assert_eq!(
            numbers,
            vec![
                "01.", "02.", "03.", "04.", "06.", "07.", "08.", "09.", "11.", "12."
            ]
        );
    }

    #[test]
    fn test_paragraph_text_is_trimmed_before_length_check() {
        let page = extract("<html><body><p>   padded but short   </p></body></html>");
        assert!(page.paragraphs.is_empty());
    }

    #[test]
    fn test_links_skip_empty_text_or_href() {
        let page = extract(
            r#"<html><body>
                <a href="/one">First</a>
                <a href="">No href</a>
                <a href="/icon"><img src="i.png"></a>
                <a href="/two">Second</a>
            </body></html>"#,
        );
        assert_eq!(page.links.len(), 2);
        assert_eq!(page.links[0].text, "First");
        assert_eq!(page.links[0].href, "/one");
        assert_eq!(page.links[1].text, "Second");
    }

    #[test]
    fn test_links_capped_at_twenty_after_filter() {
        let mut body = String::new();
        for i in 1..=25 {
            // Every third anchor is empty-text and must not count toward the cap
            if i % 3 == 0 {
                body.push_str(&format!("<a href=\"/skip{}\"></a>", i));
            } else {
                body.push_str(&format!("<a href=\"/l{}\">Link {}</a>", i, i));
            }
        }
        let page = extract(&format!("<html><body>{}</body></html>", body));
        assert_eq!(page.links.len(), 17);
        assert_eq!(page.links[0].href, "/l1");
        assert!(page.links.iter().all(|l| !l.text.is_empty()));
    }

    #[test]
    fn test_images_default_alt_and_cap() {
        let mut body = String::from(r#"<img src="hero.png" alt="Hero shot">"#);
        for i in 1..=12 {
            body.push_str(&format!("<img src=\"img{}.png\">", i));
        }
        let page = extract(&format!("<html><body>{}</body></html>", body));
        assert_eq!(page.images.len(), 10);
        assert_eq!(page.images[0].src, "hero.png");
        assert_eq!(page.images[0].alt, "Hero shot");
        assert_eq!(page.images[1].alt, "");
    }

    #[test]
    fn test_nested_text_is_flattened() {
        let page = extract(
            "<html><body><p>Mixed <b>bold</b> and <i>italic</i> words in one line.</p></body></html>",
        );
        assert_eq!(
            page.paragraphs[0],
            "Mixed bold and italic words in one line."
        );
    }
}
