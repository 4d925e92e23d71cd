//! The request the kiosk window turns into a navigation of the local base
//! page. The load generation travels in the query string and comes back on
//! page-load completion.

use crate::input::InputPolicy;

pub const KIOSK_PAGE_PATH: &str = "/kiosk.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Remote { url: String },
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub content: PageContent,
    pub policy: InputPolicy,
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

impl PageRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("gen", self.generation.to_string())];
        match &self.content {
            PageContent::Remote { url } => {
                pairs.push(("mode", "remote".to_string()));
                pairs.push(("src", url.clone()));
            }
            PageContent::Local => pairs.push(("mode", "local".to_string())),
        }
        pairs.push(("block", flag(self.policy.blocks_clicks()).to_string()));
        pairs.push(("strict", flag(self.policy.strict_lock).to_string()));
        pairs
    }

    /// Percent-encoded query string, without the leading `?`.
    pub fn query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish()
    }
}

/// Generation carried by a kiosk page URL query.
pub fn parse_generation(query: &str) -> Option<u64> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "gen")
        .and_then(|(_, value)| value.parse().ok())
}
