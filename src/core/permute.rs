//! FUZZ keyword permutations for a single endpoint

use super::jsluice::ExtractedEndpoint;

pub const FUZZ_KEYWORD: &str = "FUZZ";

/// Leading `/`-split segments never fuzzed: scheme, empty, host
const PRESERVED_SEGMENTS: usize = 3;

/// Strip everything from the first `?` onward
pub fn base_url(url: &str) -> &str {
    url.find('?').map_or(url, |idx| &url[..idx])
}

/// `a=FUZZ&b=FUZZ&...`
pub fn join_params(params: &[String]) -> String {
    params
        .iter()
        .map(|param| format!("{}={}", param, FUZZ_KEYWORD))
        .collect::<Vec<_>>()
        .join("&")
}

fn carries_body(method: &str) -> bool {
    method == "POST" || method == "PUT"
}

/// Generate every fuzzed URL candidate for `endpoint`.
///
/// Candidates are emitted in a fixed order: the base URL, each query
/// parameter alone, all query parameters, then (for `POST`/`PUT`) each body
/// parameter alone and all body parameters behind a `|`, and finally one
/// candidate per path segment. Duplicates are kept.
pub fn generate(endpoint: &ExtractedEndpoint) -> Vec<String> {
    let base = base_url(&endpoint.url);
    let mut urls = vec![base.to_string()];

    for param in &endpoint.query_params {
        urls.push(format!("{}?{}={}", base, param, FUZZ_KEYWORD));
    }
    if !endpoint.query_params.is_empty() {
        urls.push(format!("{}?{}", base, join_params(&endpoint.query_params)));
    }

    if carries_body(&endpoint.method) {
        for param in &endpoint.body_params {
            urls.push(format!("{}|{}={}", base, param, FUZZ_KEYWORD));
        }
        if !endpoint.body_params.is_empty() {
            urls.push(format!("{}|{}", base, join_params(&endpoint.body_params)));
        }
    }

    let segments: Vec<&str> = base.split('/').collect();
    for idx in PRESERVED_SEGMENTS..segments.len() {
        let mut fuzzed = segments.clone();
        fuzzed[idx] = FUZZ_KEYWORD;
        urls.push(fuzzed.join("/"));
    }

    urls
}
