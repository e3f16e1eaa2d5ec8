use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{Category, CategorySource, Question, QuestionRequest, QuestionSource};
use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

#[derive(Deserialize)]
struct CategoryResponse {
    trivia_categories: Vec<Category>,
}

#[derive(Deserialize)]
struct QuestionResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<Question>,
}

/// Blocking client for the Open Trivia DB HTTP API.
#[derive(Debug, Clone)]
pub struct OpenTdbClient {
    client: Client,
    base_url: String,
}

impl OpenTdbClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

impl CategorySource for OpenTdbClient {
    fn categories(&self) -> Result<Vec<Category>, FetchError> {
        let body = self.get_text(&format!("{}/api_category.php", self.base_url))?;
        let parsed: CategoryResponse = serde_json::from_str(&body)?;
        info!("fetched {} categories", parsed.trivia_categories.len());
        Ok(parsed.trivia_categories)
    }
}

impl QuestionSource for OpenTdbClient {
    fn questions(&self, request: &QuestionRequest) -> Result<Vec<Question>, FetchError> {
        let url = format!(
            "{}/api.php?amount={}&category={}&difficulty={}&encode=url3986",
            self.base_url, request.amount, request.category_id, request.difficulty
        );
        let body = self.get_text(&url)?;
        let parsed: QuestionResponse = serde_json::from_str(&body)?;
        if parsed.response_code != 0 {
            return Err(FetchError::Api {
                code: parsed.response_code,
            });
        }

        let questions = parsed
            .results
            .into_iter()
            .map(Question::decoded)
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "fetched {} questions for category {} ({})",
            questions.len(),
            request.category_id,
            request.difficulty
        );
        Ok(questions)
    }
}
