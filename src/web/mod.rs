//! Webserver URL building.
//!
//! Builds links to a DAG view of the orchestration webserver from its base
//! URL and the configured default view.

use crate::error::{Error, Result};
use url::Url;

/// Default webserver base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default DAG view.
pub const DEFAULT_DAG_VIEW: &str = "tree";

/// Views a DAG link may point at.
pub const DAG_VIEWS: [&str; 5] = ["tree", "graph", "duration", "gantt", "landing_times"];

/// Webserver settings needed to build links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    base_url: Url,
    dag_default_view: String,
}

impl WebConfig {
    /// Creates a config, validating both settings.
    ///
    /// The view name is case-insensitive and stored lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base_url` is not an absolute URL that can
    /// carry a path, or `dag_default_view` is not one of [`DAG_VIEWS`].
    pub fn new(base_url: &str, dag_default_view: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("base URL cannot carry a path: {base_url}"),
            });
        }
        let view = dag_default_view.to_lowercase();
        if !DAG_VIEWS.contains(&view.as_str()) {
            return Err(Error::Config {
                message: format!(
                    "unknown DAG view '{dag_default_view}', expected one of: {}",
                    DAG_VIEWS.join(", ")
                ),
            });
        }
        Ok(Self {
            base_url,
            dag_default_view: view,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the lowercase default view.
    #[must_use]
    pub fn dag_default_view(&self) -> &str {
        &self.dag_default_view
    }
}

/// Builds a link to the default DAG view with `query` as its query string.
///
/// The query is form-urlencoded: spaces become `+` and reserved characters
/// are percent-encoded. The `?` is always present.
///
/// # Examples
///
/// ```
/// use flow_helpers::web::{WebConfig, build_url_with_query};
///
/// let config = WebConfig::new("http://0.0.0.0:8000/base", "graph").unwrap();
/// let url = build_url_with_query(&config, &[("dag_id", "my-task"), ("root", "")]).unwrap();
/// assert_eq!(url, "http://0.0.0.0:8000/base/graph?dag_id=my-task&root=");
/// ```
pub fn build_url_with_query<K, V>(config: &WebConfig, query: &[(K, V)]) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = config.base_url.clone();
    url.path_segments_mut()
        .map_err(|()| Error::Config {
            message: format!("base URL cannot carry a path: {}", config.base_url),
        })?
        .pop_if_empty()
        .push(&config.dag_default_view);

    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish();
    url.set_query(Some(&encoded));
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_query() {
        let config = WebConfig::new("http://0.0.0.0:8000/base", "graph").unwrap();
        let url = build_url_with_query(
            &config,
            &[
                ("dag_id", "my-task"),
                ("root", ""),
                ("execution_date", "2020-10-27T10:59:25.615587"),
            ],
        )
        .unwrap();
        assert_eq!(
            url,
            "http://0.0.0.0:8000/base/graph?dag_id=my-task&root=&execution_date=2020-10-27T10%3A59%3A25.615587"
        );
    }

    #[test]
    fn test_build_url_empty_query() {
        let config = WebConfig::new("http://localhost:8080", "tree").unwrap();
        let url = build_url_with_query::<&str, &str>(&config, &[]).unwrap();
        assert_eq!(url, "http://localhost:8080/tree?");
    }

    #[test]
    fn test_build_url_trailing_slash_base() {
        let config = WebConfig::new("http://localhost:8080/airflow/", "Gantt").unwrap();
        let url = build_url_with_query(&config, &[("dag_id", "a b")]).unwrap();
        assert_eq!(url, "http://localhost:8080/airflow/gantt?dag_id=a+b");
    }

    #[test]
    fn test_build_url_owned_pairs() {
        let config = WebConfig::new(DEFAULT_BASE_URL, DEFAULT_DAG_VIEW).unwrap();
        let query = vec![("dag_id".to_string(), "x&y".to_string())];
        let url = build_url_with_query(&config, &query).unwrap();
        assert_eq!(url, "http://localhost:8080/tree?dag_id=x%26y");
    }

    #[test]
    fn test_config_view_lowercased() {
        let config = WebConfig::new(DEFAULT_BASE_URL, "GRAPH").unwrap();
        assert_eq!(config.dag_default_view(), "graph");
        assert_eq!(config.base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_config_rejects_unknown_view() {
        let err = WebConfig::new(DEFAULT_BASE_URL, "calendar").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("calendar"));
    }

    #[test]
    fn test_config_rejects_bad_url() {
        assert!(matches!(
            WebConfig::new("localhost:8080", "tree"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            WebConfig::new("not a url", "tree"),
            Err(Error::Config { .. })
        ));
    }
}
