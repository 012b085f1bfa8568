//! Module: response
//! Responsibility: wire-facing page payload returned to HTTP-style clients.
//! Does not own: page construction, token derivation, or config resolution.
//! Boundary: the only shape pages take once they leave the core.

use crate::{
    page::{Page, PageSize},
    token::ContinuationToken,
};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

///
/// PageView
///
/// Serialized page: mapped items, the token text, and a ready-made link to the
/// next page when one may exist.
///
/// The token is present whenever the page carried one, even on the last page,
/// so a client can poll the tail later for newer entities.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub continuation_token: Option<ContinuationToken>,
    pub next_page: Option<String>,
    pub has_next: bool,
}

impl<E> Page<E> {
    /// Map this page into its wire view.
    ///
    /// `next_page` is only built when `has_next` is true and `next_page_base`
    /// is configured.
    pub fn into_view<T>(
        self,
        page_size: PageSize,
        next_page_base: Option<&str>,
        map: impl FnMut(E) -> T,
    ) -> PageView<T> {
        let (entities, token, has_next) = self.into_parts();

        let next_page = match (has_next, next_page_base, token.as_ref()) {
            (true, Some(base), Some(token)) => Some(next_page_link(base, page_size, token)),
            _ => None,
        };

        PageView {
            items: entities.into_iter().map(map).collect(),
            continuation_token: token,
            next_page,
            has_next,
        }
    }
}

// Parameters are form-encoded and appended to whatever query `base` already has.
fn next_page_link(base: &str, page_size: PageSize, token: &ContinuationToken) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("pageSize", &page_size.to_string())
        .append_pair("continuationToken", &token.to_string())
        .finish();

    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };

    format!("{base}{separator}{query}")
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        checksum::checksum,
        page::create_page,
        test_support::{TestPageable, keyed},
        traits::Pageable,
    };
    use serde_json::json;

    fn size(n: u32) -> PageSize {
        PageSize::new(n).expect("non-zero page size")
    }

    fn id_of(entity: TestPageable) -> String {
        entity.id().to_string()
    }

    #[test]
    fn full_page_links_to_the_next_one() {
        let page = create_page(keyed(&[1, 2, 3, 4]), None, size(2));

        let view = page.into_view(
            size(2),
            Some("https://api.example.com/designs"),
            id_of,
        );

        assert_eq!(
            serde_json::to_value(&view).expect("view should serialize"),
            json!({
                "items": ["1", "2"],
                "continuationToken": format!("2:1:{}", checksum(["2"])),
                "nextPage": format!(
                    "https://api.example.com/designs?pageSize=2&continuationToken=2%3A1%3A{}",
                    checksum(["2"])
                ),
                "hasNext": true,
            })
        );
    }

    #[test]
    fn last_page_keeps_token_but_has_no_link() {
        let page = create_page(keyed(&[1]), None, size(2));

        let view = page.into_view(size(2), Some("/designs"), id_of);

        assert_eq!(view.next_page, None);
        assert!(!view.has_next);
        assert_eq!(
            view.continuation_token,
            Some(ContinuationToken::new(1, 1, checksum(["1"])))
        );
    }

    #[test]
    fn link_needs_a_base() {
        let page = create_page(keyed(&[1, 2]), None, size(2));

        let view = page.into_view(size(2), None, id_of);

        assert!(view.has_next);
        assert_eq!(view.next_page, None);
    }

    #[test]
    fn base_with_query_appends_parameters() {
        let token = ContinuationToken::new(7, 2, 9);

        assert_eq!(
            next_page_link("/designs?owner=me", size(5), &token),
            "/designs?owner=me&pageSize=5&continuationToken=7%3A2%3A9"
        );
    }

    #[test]
    fn base_ending_in_separator_is_not_doubled() {
        let token = ContinuationToken::new(7, 2, 9);

        for base in ["/designs?", "/designs?owner=me&"] {
            let link = next_page_link(base, size(5), &token);

            assert_eq!(link, format!("{base}pageSize=5&continuationToken=7%3A2%3A9"));
            assert!(!link.contains("?&") && !link.contains("&&"), "link: {link}");
        }
    }

    #[test]
    fn link_query_decodes_back_to_the_token() {
        let token = ContinuationToken::new(1_512_757_072, 3, 4_294_967_295);
        let link = next_page_link("/designs", size(3), &token);

        let (_, query) = link.split_once('?').expect("link carries a query");
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        assert_eq!(
            pairs,
            [
                ("pageSize".to_string(), "3".to_string()),
                ("continuationToken".to_string(), token.to_string()),
            ]
        );
    }

    #[test]
    fn empty_first_page_serializes_nulls() {
        let view = create_page(Vec::<TestPageable>::new(), None, size(3)).into_view(
            size(3),
            Some("/designs"),
            id_of,
        );

        assert_eq!(
            serde_json::to_value(&view).expect("view should serialize"),
            json!({
                "items": [],
                "continuationToken": null,
                "nextPage": null,
                "hasNext": false,
            })
        );
    }

    #[test]
    fn view_deserializes_from_client_json() {
        let text = r#"{"items":[1,2],"continuationToken":"5:1:3","nextPage":null,"hasNext":false}"#;

        let view: PageView<u32> = serde_json::from_str(text).expect("view should deserialize");

        assert_eq!(view.items, [1, 2]);
        assert_eq!(view.continuation_token, Some(ContinuationToken::new(5, 1, 3)));
    }
}
