use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }
}

/// Thin PostgREST client authenticated with the project's anon key
#[derive(Clone)]
pub struct SupabaseClient {
    http_client: reqwest::Client,
    rest_url: String,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(PersistError::Configuration("Supabase URL is empty".to_string()));
        }
        if config.anon_key.trim().is_empty() {
            return Err(PersistError::Configuration("Supabase anon key is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.anon_key)
                .map_err(|e| PersistError::Configuration(format!("Invalid anon key: {}", e)))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
                .map_err(|e| PersistError::Configuration(format!("Invalid anon key: {}", e)))?,
        );

        let http_client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http_client,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
        })
    }

    /// Start a query against `table`
    pub fn from(&self, table: &str) -> SupabaseQuery<'_> {
        SupabaseQuery {
            client: self,
            table: table.to_string(),
            params: Vec::new(),
        }
    }

    /// Insert one or more rows without reading them back
    pub async fn insert<T: Serialize + ?Sized>(&self, table: &str, rows: &T) -> Result<()> {
        let response = self
            .http_client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }
}

/// Filter/order/limit builder for a single table read
pub struct SupabaseQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> SupabaseQuery<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        self.set_param("select", columns.to_string());
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.set_param("order", format!("{}.{}", column, direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.set_param("limit", limit.to_string());
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Rendered query string, `select` first
    pub fn query_string(&self) -> String {
        self.resolved_params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Fetch all matching rows
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let params = self.resolved_params();
        tracing::debug!(table = %self.table, query = %self.query_string(), "Supabase select");

        let response = self
            .client
            .http_client
            .get(self.client.table_url(&self.table))
            .query(&params)
            .send()
            .await?;
        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Zero rows is `None`; otherwise the first row
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let rows: Vec<T> = self.limit(1).execute().await?;
        Ok(rows.into_iter().next())
    }

    fn set_param(&mut self, key: &str, value: String) {
        self.params.retain(|(k, _)| k != key);
        self.params.push((key.to_string(), value));
    }

    fn resolved_params(&self) -> Vec<(String, String)> {
        let select = self
            .params
            .iter()
            .find(|(k, _)| k == "select")
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| "*".to_string());

        std::iter::once(("select".to_string(), select))
            .chain(self.params.iter().filter(|(k, _)| k != "select").cloned())
            .collect()
    }
}

async fn check_status(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Supabase request failed");
        return Err(PersistError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig::new("https://demo.supabase.co/", "anon")).unwrap()
    }

    #[test]
    fn test_query_string() {
        let client = client();
        let query = client
            .from("workouts")
            .eq("user_id", "u1")
            .eq("status", "in_progress")
            .order("created_at", false)
            .limit(10);

        assert_eq!(
            query.query_string(),
            "select=*&user_id=eq.u1&status=eq.in_progress&order=created_at.desc&limit=10"
        );
    }

    #[test]
    fn test_select_and_limit_override() {
        let client = client();
        let query = client.from("user_goals").limit(5).select("id,primary_goal").limit(1);
        assert_eq!(query.query_string(), "select=id,primary_goal&limit=1");
    }

    #[test]
    fn test_rest_url() {
        assert_eq!(client().table_url("workouts"), "https://demo.supabase.co/rest/v1/workouts");
    }

    #[test]
    fn test_missing_config_rejected() {
        assert!(SupabaseClient::new(&SupabaseConfig::new("", "anon")).is_err());
        assert!(SupabaseClient::new(&SupabaseConfig::new("https://x.supabase.co", " ")).is_err());
    }
}
