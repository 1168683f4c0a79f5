//! URL construction helpers for the backend API.
//!
//! Pure functions so that every call site builds the same URL for the same
//! inputs. Path segments taken from user or listing input are percent-encoded.

use matchlog_core::Endpoint;
use url::Url;

fn with_path(base: &Url, tail: &str) -> Url {
    let mut url = base.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{tail}"));
    url.set_query(None);
    url
}

/// `{base}/match/v1/match/{match_id}`, used by the existence gate.
pub fn build_match_url(base: &Url, match_id: &str) -> Url {
    with_path(
        base,
        &format!("match/v1/match/{}", urlencoding::encode(match_id)),
    )
}

/// `{base}/file/v1/{endpoint}/match/{match_id}`, the listing of one endpoint.
pub fn build_list_url(base: &Url, endpoint: Endpoint, match_id: &str) -> Url {
    with_path(
        base,
        &format!(
            "file/v1/{}/match/{}",
            endpoint.as_path_segment(),
            urlencoding::encode(match_id)
        ),
    )
}

/// `{base}/file/v1/{endpoint}/match/{match_id}/{filename}`, one file's bytes.
pub fn build_download_url(base: &Url, endpoint: Endpoint, match_id: &str, filename: &str) -> Url {
    with_path(
        base,
        &format!(
            "file/v1/{}/match/{}/{}",
            endpoint.as_path_segment(),
            urlencoding::encode(match_id),
            urlencoding::encode(filename)
        ),
    )
}
