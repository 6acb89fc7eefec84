//! jsluice subprocess wrapper and record decoding

use crate::error::{JsfuzzError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;
use url::Url;

/// One URL reported by `jsluice urls`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEndpoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub method: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub query_params: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub body_params: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,

    /// jsluice's match classification (`fetch`, `stringLiteral`, ...)
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

impl ExtractedEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_query_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_body_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body_params = params.into_iter().map(Into::into).collect();
        self
    }
}

// jsluice writes `null` for empty collections
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Runner for the external `jsluice` binary
#[derive(Debug, Clone)]
pub struct Jsluice {
    program: PathBuf,
    resolve: Option<Url>,
}

impl Default for Jsluice {
    fn default() -> Self {
        Self::new("jsluice")
    }
}

impl Jsluice {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            resolve: None,
        }
    }

    /// Resolve relative URLs against `base` (`jsluice urls -R <base>`)
    pub fn with_resolve(mut self, base: Url) -> Self {
        self.resolve = Some(base);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["urls".into()];
        if let Some(ref base) = self.resolve {
            args.push("-R".into());
            args.push(base.as_str().into());
        }
        args.push(input.as_os_str().to_owned());
        args
    }

    /// Run `jsluice urls` on `input` and decode the reported endpoints
    pub async fn run(&self, input: &Path) -> Result<Vec<ExtractedEndpoint>> {
        let args = self.args(input);
        debug!(program = %self.program.display(), ?args, "running extractor");

        let output = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                JsfuzzError::ExecutionError(format!(
                    "failed to start {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let mut message = format!("{} exited with {}", self.program.display(), output.status);
            if !stderr.is_empty() {
                message.push_str(": ");
                message.push_str(stderr);
            }
            return Err(JsfuzzError::ExecutionError(message));
        }

        let endpoints = parse_output(&output.stdout)?;
        debug!(count = endpoints.len(), "decoded extractor output");
        Ok(endpoints)
    }
}

/// Decode extractor stdout: a JSON array, or one JSON object per line.
///
/// Empty output and a bare `null` both mean no records.
pub fn parse_output(stdout: &[u8]) -> Result<Vec<ExtractedEndpoint>> {
    let first = stdout.iter().find(|b| !b.is_ascii_whitespace());

    match first {
        None => Ok(Vec::new()),
        Some(b'[') | Some(b'n') => {
            let records: Option<Vec<ExtractedEndpoint>> = serde_json::from_slice(stdout)?;
            Ok(records.unwrap_or_default())
        }
        Some(_) => serde_json::Deserializer::from_slice(stdout)
            .into_iter::<ExtractedEndpoint>()
            .map(|record| record.map_err(JsfuzzError::from))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_array() {
        let raw = br#"[
            {"url":"http://site.test/api?id=5","method":"GET","queryParams":["id"],
             "bodyParams":[],"headers":{"X-Token":"a"},"type":"fetch"}
        ]"#;
        let endpoints = parse_output(raw).unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].url, "http://site.test/api?id=5");
        assert_eq!(endpoints[0].method, "GET");
        assert_eq!(endpoints[0].query_params, vec!["id"]);
        assert!(endpoints[0].body_params.is_empty());
        assert_eq!(endpoints[0].headers.get("X-Token").map(String::as_str), Some("a"));
        assert_eq!(endpoints[0].kind, "fetch");
    }

    #[test]
    fn decodes_json_lines() {
        let raw = b"{\"url\":\"/a\",\"queryParams\":[\"q\"]}\n{\"url\":\"/b\",\"method\":\"POST\",\"bodyParams\":[\"t\"]}\n";
        let endpoints = parse_output(raw).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].query_params, vec!["q"]);
        assert_eq!(endpoints[1].method, "POST");
        assert_eq!(endpoints[1].body_params, vec!["t"]);
    }

    #[test]
    fn null_and_missing_fields_default() {
        let raw = br#"[{"url":"/x","queryParams":null,"headers":null,"type":null}]"#;
        let endpoints = parse_output(raw).unwrap();
        assert_eq!(endpoints[0], ExtractedEndpoint::new("/x"));
    }

    #[test]
    fn record_without_url_gets_empty_url() {
        let raw = br#"[{"method":"GET","queryParams":["id"]},{"url":null}]"#;
        let endpoints = parse_output(raw).unwrap();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].url, "");
        assert_eq!(endpoints[0].method, "GET");
        assert_eq!(endpoints[0].query_params, vec!["id"]);
        assert_eq!(endpoints[1], ExtractedEndpoint::default());
    }

    #[test]
    fn unknown_fields_ignored() {
        let raw = br#"[{"url":"/x","filename":"app.js","contentType":"application/json"}]"#;
        assert_eq!(parse_output(raw).unwrap().len(), 1);
    }

    #[test]
    fn empty_output_is_empty_list() {
        assert!(parse_output(b"").unwrap().is_empty());
        assert!(parse_output(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn null_output_is_empty_list() {
        assert!(parse_output(b"null").unwrap().is_empty());
        assert!(parse_output(b"  null\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_output_is_decode_error() {
        assert!(matches!(
            parse_output(b"not json"),
            Err(JsfuzzError::DecodeError(_))
        ));
        assert!(matches!(
            parse_output(br#"[{"url":5}]"#),
            Err(JsfuzzError::DecodeError(_))
        ));
        assert!(matches!(
            parse_output(b"null null"),
            Err(JsfuzzError::DecodeError(_))
        ));
        assert!(matches!(
            parse_output(b"{\"url\":\"/a\"}\n{\"url\":"),
            Err(JsfuzzError::DecodeError(_))
        ));
    }

    #[test]
    fn args_include_resolve_base() {
        let runner = Jsluice::default();
        assert_eq!(
            runner.args(Path::new("app.js")),
            vec![OsString::from("urls"), OsString::from("app.js")]
        );

        let base = Url::parse("https://site.test/").unwrap();
        let runner = Jsluice::new("/opt/jsluice").with_resolve(base);
        assert_eq!(runner.program(), Path::new("/opt/jsluice"));
        assert_eq!(
            runner.args(Path::new("app.js")),
            vec![
                OsString::from("urls"),
                OsString::from("-R"),
                OsString::from("https://site.test/"),
                OsString::from("app.js"),
            ]
        );
    }

    #[tokio::test]
    async fn missing_program_is_execution_error() {
        let runner = Jsluice::new("/nonexistent/jsfuzz-test-jsluice");
        let err = runner.run(Path::new("app.js")).await.unwrap_err();
        assert!(matches!(err, JsfuzzError::ExecutionError(_)));
    }
}
