use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER, USER_AGENT};
use serde_json::json;
use tracing::debug;

use crate::config::Settings;
use crate::error::FetchError;
use crate::model::CandidateMember;

const LIST_ENDPOINT: &str = "bnicms/v3/frontend/memberlist/display";
const DETAIL_ENDPOINT: &str = "bnicms/v3/frontend/memberdetail/display";
const PAGE_MODE: &str = "Live_Site";
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Where listing and detail markup come from.
#[async_trait]
pub trait Fetcher {
    async fn fetch_listing(&self) -> Result<String, FetchError>;
    async fn fetch_detail(&self, candidate: &CandidateMember) -> Result<String, FetchError>;
}

/// HTTP client for the chapter site's CMS widget endpoints.
pub struct CmsClient {
    http: reqwest::Client,
    settings: Settings,
    delay: Duration,
    detail_requested: AtomicBool,
}

impl CmsClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let endpoint = settings.base_url.clone();
        let http = reqwest::Client::builder()
            .default_headers(default_headers(settings))
            .timeout(settings.timeout())
            .build()
            .map_err(|source| FetchError::Request { endpoint, source })?;
        Ok(CmsClient {
            http,
            settings: settings.clone(),
            delay: settings.request_delay(),
            detail_requested: AtomicBool::new(false),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<String, FetchError> {
        let endpoint = self.endpoint(path);
        debug!("POST {}", endpoint);
        let response = self
            .http
            .post(&endpoint)
            .form(form)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        response
            .text()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })
    }

    /// Politeness pause between detail requests; the first one goes out immediately.
    async fn pace(&self) {
        if self.detail_requested.swap(true, Ordering::Relaxed) && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl Fetcher for CmsClient {
    async fn fetch_listing(&self) -> Result<String, FetchError> {
        self.post_form(LIST_ENDPOINT, &listing_form(&self.settings)).await
    }

    async fn fetch_detail(&self, candidate: &CandidateMember) -> Result<String, FetchError> {
        self.pace().await;
        self.post_form(DETAIL_ENDPOINT, &detail_form(&self.settings, candidate))
            .await
    }
}

fn default_headers(settings: &Settings) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
    headers.insert(ACCEPT, HeaderValue::from_static("text/html, */*; q=0.01"));
    headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
    if let Ok(v) = HeaderValue::from_str(&settings.memberlist_page()) {
        headers.insert(REFERER, v);
    }
    if let Ok(v) = HeaderValue::from_str(settings.base_url.trim_end_matches('/')) {
        headers.insert(ORIGIN, v);
    }
    headers
}

/// Active-language descriptor the CMS expects alongside every widget call.
fn languages_payload(settings: &Settings) -> String {
    json!({
        "availableLanguages": [{
            "type": "published",
            "url": settings.memberlist_page(),
            "descriptionKey": settings.language_name,
            "id": settings.locale_id,
            "localeCode": settings.locale,
        }],
        "activeLanguage": {
            "id": settings.locale_id,
            "localeCode": settings.locale,
            "descriptionKey": settings.language_name,
            "cookieBotCode": settings.locale,
        }
    })
    .to_string()
}

fn widget_settings(entries: &[(u32, &str, &str)]) -> String {
    let list: Vec<_> = entries
        .iter()
        .map(|(key, name, value)| json!({ "key": key, "name": name, "value": value }))
        .collect();
    serde_json::Value::from(list).to_string()
}

fn listing_form(settings: &Settings) -> Vec<(&'static str, String)> {
    let labels = widget_settings(&[
        (113, "Member Names", "Nome Membro BNI"),
        (117, "Profession/Specialty", "Professione/Specializzazione"),
        (118, "Company", "Società"),
        (119, "Showing", "Mostra"),
        (120, "to", "di"),
        (121, "of", "di"),
        (122, "entries", "risultati"),
        (304, "Zero Records", "Nessun risultato"),
        (343, "Phone", "Telefono"),
        (344, "Send Mail", "Invia email"),
    ]);
    vec![
        (
            "parameters",
            format!(
                "chapterName={}&regionIds={}&chapterWebsite=1",
                settings.chapter_id, settings.region_id
            ),
        ),
        ("languages", languages_payload(settings)),
        ("cmsv3", "true".to_string()),
        ("website_type", settings.website_type.clone()),
        ("website_id", settings.website_id.clone()),
        ("mappedWidgetSettings", labels),
        ("pageMode", PAGE_MODE.to_string()),
    ]
}

fn detail_form(settings: &Settings, candidate: &CandidateMember) -> Vec<(&'static str, String)> {
    let labels = widget_settings(&[
        (124, "Direct", "Direct"),
        (125, "Mobile", "Mobile"),
        (126, "Freephone", "Freephone"),
        (127, "Fax", "Fax"),
        (217, "Phone", "Telefono"),
    ]);
    vec![
        ("parameters", candidate.query_pair()),
        ("languages", languages_payload(settings)),
        ("pageMode", PAGE_MODE.to_string()),
        ("mappedWidgetSettings", labels),
        ("websitetype", settings.website_type.clone()),
        ("website_type", settings.website_type.clone()),
        ("website_id", settings.website_id.clone()),
        ("memberId", candidate.external_id.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdKind;

    fn field<'a>(form: &'a [(&str, String)], key: &str) -> &'a str {
        form.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str()).unwrap()
    }

    #[test]
    fn listing_form_carries_chapter_and_site() {
        let s = Settings::default();
        let form = listing_form(&s);
        assert_eq!(
            field(&form, "parameters"),
            "chapterName=36677&regionIds=13076&chapterWebsite=1"
        );
        assert_eq!(field(&form, "website_id"), "20473");
        assert_eq!(field(&form, "pageMode"), "Live_Site");
        let labels: serde_json::Value =
            serde_json::from_str(field(&form, "mappedWidgetSettings")).unwrap();
        assert_eq!(labels[0]["key"], 113);
        assert_eq!(labels.as_array().unwrap().len(), 10);
    }

    #[test]
    fn detail_form_uses_candidate_param() {
        let s = Settings::default();
        let c = CandidateMember {
            external_id: "BBB".into(),
            id_kind: IdKind::UserId,
            raw_display_name: "Anna".into(),
            source_link: String::new(),
        };
        let form = detail_form(&s, &c);
        assert_eq!(field(&form, "parameters"), "encryptedUserId=BBB");
        assert_eq!(field(&form, "memberId"), "BBB");
        assert_eq!(field(&form, "websitetype"), "3");
    }

    #[test]
    fn languages_payload_is_active_locale() {
        let v: serde_json::Value =
            serde_json::from_str(&languages_payload(&Settings::default())).unwrap();
        assert_eq!(v["activeLanguage"]["localeCode"], "it");
        assert_eq!(v["activeLanguage"]["id"], 14);
        assert_eq!(
            v["availableLanguages"][0]["url"],
            "https://bni-riviereliguri.it/17-riviere-liguri-corsaro-nero/it/memberlist"
        );
    }

    #[test]
    fn endpoints_join_base() {
        let mut s = Settings::default();
        s.base_url = "https://example.it/".into();
        let client = CmsClient::new(&s).unwrap();
        assert_eq!(
            client.endpoint(LIST_ENDPOINT),
            "https://example.it/bnicms/v3/frontend/memberlist/display"
        );
    }
}
