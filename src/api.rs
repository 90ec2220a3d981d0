// API client module: two small blocking HTTP clients, one for the
// Polkassembly governance-data API and one for an OpenAI-compatible
// completion service. Both are intentionally synchronous: every call
// blocks until the remote side answers or fails, with no retries and
// no caching.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Production base URL for the Polkassembly API.
pub const POLKASSEMBLY_BASE_URL: &str = "https://api.polkassembly.io/api/v1";

/// Production base URL for the summarization service.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// System instruction sent with every summarization request. The output
/// lands on a terminal, hence the plain-text constraint.
const SYSTEM_PROMPT: &str = "You are a neutral Polkadot governance analyst.\n\
    Summarise the referendum in 150-200 words.\n\
    \u{2022} Purpose\n\u{2022} Funding/mechanics\n\
    \u{2022} Potential impact\n\u{2022} Controversial points (if any)\n\n\
    The output of this summary is for the command line, so it is \
    imperative that plain text is output - not markdown, not HTML, etc. \
    Just plain text.";

const SUMMARY_MODEL: &str = "gpt-4.1";

/// Failures produced by the HTTP clients beyond plain transport errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote service answered with a non-success status.
    #[error("HTTP status error: {0}")]
    Status(StatusCode),
    /// The completion service answered 2xx but returned no choices.
    #[error("summarization service returned no choices")]
    EmptyCompletion,
}

/// One referendum as returned by Polkassembly. The upstream response
/// carries many more fields; only the ones the CLI renders are decoded,
/// with missing values defaulted here at the boundary rather than at
/// each print site.
#[derive(Debug, Clone, Deserialize)]
pub struct Referendum {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub comments_count: u64,
    // Polkassembly sends `content: false` when a post has no content,
    // so anything that is not a JSON string decodes to None.
    #[serde(default, deserialize_with = "string_or_none")]
    pub content: Option<String>,
}

impl Referendum {
    /// The proposal text, if there is any to summarise. An empty string
    /// counts as no content.
    pub fn content_text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Anything that can produce a referendum record for an ID. The HTTP
/// client implements this; tests substitute in-memory fakes.
pub trait ReferendumSource {
    fn get_referendum(&self, ref_id: i64) -> Result<Referendum>;
}

/// Anything that can turn proposal text into a summary.
pub trait Summarizer {
    fn summarise(&self, content: &str) -> Result<String>;
}

/// Blocking client for the Polkassembly governance-data API.
#[derive(Clone)]
pub struct PolkassemblyClient {
    client: Client,
    base_url: String,
}

impl PolkassemblyClient {
    /// Create a client configured from the environment variable
    /// `POLKASSEMBLY_URL` or fallback to the production endpoint.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("POLKASSEMBLY_URL").unwrap_or_else(|_| POLKASSEMBLY_BASE_URL.into());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        // The governance API can be slow on large posts; no client-side
        // timeout is imposed.
        let client = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(PolkassemblyClient {
            client,
            base_url: base_url.into(),
        })
    }
}

impl ReferendumSource for PolkassemblyClient {
    /// Fetch one referendum record. Any non-2xx status is an
    /// `ApiError::Status`; the call is not retried.
    fn get_referendum(&self, ref_id: i64) -> Result<Referendum> {
        let url = format!("{}/posts/on-chain-post", &self.base_url);
        let post_id = ref_id.to_string();
        let res = self
            .client
            .get(&url)
            .query(&[
                ("postId", post_id.as_str()),
                ("proposalType", "referendums_v2"),
            ])
            .header("x-network", "polkadot")
            .send()
            .context("Failed to send referendum request")?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()).into());
        }
        let referendum: Referendum = res.json().context("Parsing referendum response json")?;
        Ok(referendum)
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Blocking client for the summarization service. Holds the API key
/// explicitly; a missing key is not validated here and surfaces as an
/// auth failure from the remote side at call time.
#[derive(Clone)]
pub struct SummaryClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SummaryClient {
    /// Create a client from `OPENAI_API_KEY` and optionally
    /// `OPENAI_BASE_URL`, defaulting to the production endpoint.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| OPENAI_BASE_URL.into());
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        Self::new(base_url, api_key)
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        // Completion calls routinely take longer than reqwest's default
        // timeout, so none is set.
        let client = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(SummaryClient {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

impl Summarizer for SummaryClient {
    /// Ask the completion service for a plain-text summary of `content`.
    /// Remote failures (auth, rate limit, network) propagate unchanged.
    fn summarise(&self, content: &str) -> Result<String> {
        let url = format!("{}/v1/chat/completions", &self.base_url);
        let req = ChatRequest {
            model: SUMMARY_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content,
                },
            ],
            temperature: 1.0,
            top_p: 1.0,
            max_tokens: 2048,
        };
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .context("Failed to send summarization request")?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()).into());
        }
        let resp: ChatResponse = res.json().context("Parsing completion response json")?;
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or(ApiError::EmptyCompletion)?;
        Ok(choice.message.content)
    }
}
