use crate::config::{DEFAULT_DNA_OUTPUT, DEFAULT_ENSEMBL_ENDPOINT};
use crate::core::{Prompter, SetupStep, Storage};
use crate::domain::model::{
    DnaRecord, FetchOutcome, StepOutcome, TruncationBounds, MAX_SEQUENCE_LENGTH,
};
use crate::utils::error::{Result, SetupError};
use reqwest::{Client, StatusCode};

const SEQUENCE_ID_PROMPT: &str = "Enter the DNA sequence ID (e.g., ENSG00000012048): ";
const START_PROMPT: &str = "Enter the start position: ";
const END_PROMPT: &str = "Enter the end position: ";

/// 從 Ensembl REST API 取得 DNA 序列並存成 JSON
pub struct DnaFetcher<S: Storage, P: Prompter> {
    storage: S,
    prompter: P,
    client: Client,
    endpoint: String,
    sequence_id: Option<String>,
    bounds: Option<TruncationBounds>,
    output_file: String,
}

impl<S: Storage, P: Prompter> DnaFetcher<S, P> {
    pub fn new(storage: S, prompter: P) -> Self {
        Self {
            storage,
            prompter,
            client: Client::new(),
            endpoint: DEFAULT_ENSEMBL_ENDPOINT.to_string(),
            sequence_id: None,
            bounds: None,
            output_file: DEFAULT_DNA_OUTPUT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_sequence_id(mut self, sequence_id: Option<String>) -> Self {
        self.sequence_id = sequence_id;
        self
    }

    pub fn with_bounds(mut self, bounds: Option<TruncationBounds>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = output_file.into();
        self
    }

    pub fn sequence_url(&self, sequence_id: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), sequence_id)
    }

    pub async fn fetch_and_save(&self) -> Result<FetchOutcome> {
        let sequence_id = self.resolve_sequence_id()?;
        let url = self.sequence_url(&sequence_id);

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status != StatusCode::OK {
            tracing::debug!("Ensembl returned {} for {}", status, sequence_id);
            println!("Failed to retrieve the DNA sequence from Ensembl.");
            println!("Status Code: {}", status.as_u16());
            return Ok(FetchOutcome::Unavailable {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let mut record = DnaRecord::from_value(body)?;
        let sequence_length = record.sequence_length()?;
        tracing::info!(
            "Retrieved {} ({} bases)",
            record.id().unwrap_or(&sequence_id),
            sequence_length
        );

        let truncated = sequence_length > MAX_SEQUENCE_LENGTH;
        if truncated {
            println!(
                "The sequence length is {}, which exceeds the limit of 131,000 bases.",
                sequence_length
            );
            let bounds = self.resolve_bounds()?;
            record.truncate(bounds)?;
            tracing::info!(
                "✂️ Truncated sequence to positions {}..={} ({} bases)",
                bounds.start(),
                bounds.end(),
                record.sequence_length()?
            );
        }

        let json = record.to_json()?;
        self.storage
            .write_file(&self.output_file, json.as_bytes())
            .await?;

        let path = self.storage.base_path().join(&self.output_file);
        println!("Data saved to {}", self.output_file);
        tracing::debug!("📁 Data saved to: {}", path.display());

        Ok(FetchOutcome::Saved {
            path: path.display().to_string(),
            sequence_length: record.sequence_length()?,
            truncated,
        })
    }

    fn resolve_sequence_id(&self) -> Result<String> {
        let raw = match &self.sequence_id {
            Some(id) => id.clone(),
            None => self.prompter.prompt(SEQUENCE_ID_PROMPT)?,
        };

        let id = raw.trim();
        if id.is_empty() {
            return Err(SetupError::InvalidInputError {
                input: raw.clone(),
                reason: "Sequence id cannot be empty".to_string(),
            });
        }
        Ok(id.to_string())
    }

    fn resolve_bounds(&self) -> Result<TruncationBounds> {
        if let Some(bounds) = self.bounds {
            return Ok(bounds);
        }

        let start = parse_position(&self.prompter.prompt(START_PROMPT)?)?;
        let end = parse_position(&self.prompter.prompt(END_PROMPT)?)?;
        TruncationBounds::new(start, end)
    }
}

fn parse_position(input: &str) -> Result<usize> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|e| SetupError::InvalidInputError {
            input: input.to_string(),
            reason: format!("Not a valid position: {}", e),
        })
}

#[async_trait::async_trait]
impl<S: Storage, P: Prompter> SetupStep for DnaFetcher<S, P> {
    fn name(&self) -> &str {
        "dna-fetch"
    }

    async fn run(&self) -> Result<StepOutcome> {
        Ok(StepOutcome::Sequence(self.fetch_and_save().await?))
    }
}
