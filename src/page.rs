use scraper::{ElementRef, Html, Selector};

use crate::errors::ScrapeError;

pub struct Page {
    document: Html,
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::ParseFailed(format!("selector {css}")))
}

impl Page {
    pub fn parse(html: &str) -> Page {
        Page {
            document: Html::parse_document(html),
        }
    }

    /// Attribute `name` of the first element matching `css`.
    pub fn attr(&self, css: &str, name: &str) -> Result<Option<String>, ScrapeError> {
        let selector = selector(css)?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(name))
            .map(str::to_owned))
    }

    /// Attribute `name` of the first element child of the first match.
    pub fn first_child_attr(&self, css: &str, name: &str) -> Result<Option<String>, ScrapeError> {
        let selector = selector(css)?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .and_then(|el| el.children().find_map(ElementRef::wrap))
            .and_then(|child| child.value().attr(name))
            .map(str::to_owned))
    }

    /// Attribute `name` of every match carrying it, in document order.
    pub fn attrs(&self, css: &str, name: &str) -> Result<Vec<String>, ScrapeError> {
        let selector = selector(css)?;
        Ok(self
            .document
            .select(&selector)
            .filter_map(|el| el.value().attr(name))
            .map(str::to_owned)
            .collect())
    }

    /// Text of the first match, trimmed. Empty when nothing matches.
    pub fn text(&self, css: &str) -> Result<String, ScrapeError> {
        let selector = selector(css)?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r##"
        <html><body>
          <input type="hidden" class="movie_id" value="4242">
          <div class="anime_info_body_bg"><h1>  Cowboy <b>Bebop</b> </h1></div>
          <div class="rapidvideo">
            text before
            <a href="#" data-video="//host/e/abc">play</a>
            <a href="#" data-video="//host/e/other">other</a>
          </div>
          <ul>
            <li><a href="/one">1</a></li>
            <li><a>no href</a></li>
            <li><a href="/two">2</a></li>
          </ul>
        </body></html>
    "##;

    #[test]
    fn attr_of_first_match() {
        let page = Page::parse(HTML);
        assert_eq!(page.attr(".movie_id", "value").unwrap().as_deref(), Some("4242"));
        assert_eq!(page.attr(".movie_id", "missing").unwrap(), None);
        assert_eq!(page.attr(".nothing", "value").unwrap(), None);
    }

    #[test]
    fn first_child_skips_text_nodes() {
        let page = Page::parse(HTML);
        assert_eq!(
            page.first_child_attr(".rapidvideo", "data-video").unwrap().as_deref(),
            Some("//host/e/abc")
        );
    }

    #[test]
    fn attrs_keeps_document_order() {
        let page = Page::parse(HTML);
        assert_eq!(page.attrs("li a", "href").unwrap(), vec!["/one", "/two"]);
    }

    #[test]
    fn text_is_trimmed_and_defaults_to_empty() {
        let page = Page::parse(HTML);
        assert_eq!(page.text(".anime_info_body_bg h1").unwrap(), "Cowboy Bebop");
        assert_eq!(page.text("h2").unwrap(), "");
    }

    #[test]
    fn text_reads_only_first_match() {
        let page = Page::parse("<div><h1>Trigun</h1><h1>Trigun Stampede</h1></div>");
        assert_eq!(page.text("div h1").unwrap(), "Trigun");
    }

    #[test]
    fn bad_selector_is_parse_error() {
        let page = Page::parse(HTML);
        assert!(matches!(
            page.attr("a[", "href"),
            Err(ScrapeError::ParseFailed(_))
        ));
    }
}
