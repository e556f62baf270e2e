//! Conduit to the external text-generation capability backing the HR
//! assistant. Stateless across calls: the chat transcript lives with the
//! caller, and each call carries only the query plus a short identity
//! context line. Degrades to fixed strings instead of erroring.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::model::user::Identity;

pub const UNAVAILABLE_REPLY: &str =
    "AI Assistant is unavailable. Please check the API configuration.";
pub const ERROR_REPLY: &str =
    "Sorry, I'm having trouble connecting to the HR knowledge base right now.";
pub const EMPTY_REPLY: &str = "I couldn't generate a response at this time.";

const GENERATION_TEMPERATURE: f32 = 0.7;
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct AssistantConduit {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl AssistantConduit {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The free-text context line passed alongside each query.
    pub fn context_for(identity: &Identity) -> String {
        format!(
            "User: {}, Role: {}, Level: {}, XP: {}",
            identity.name, identity.role, identity.level, identity.xp
        )
    }

    /// Sends `query` with the HR-scoped system instruction and relays the
    /// reply. Never fails: an unconfigured capability and a failed call
    /// each map to their fixed message.
    pub async fn ask(&self, query: &str, context: &str) -> String {
        match self.generate(query, context).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => EMPTY_REPLY.to_string(),
            Err(Error::CapabilityUnconfigured) => {
                warn!("Assistant queried without an API key configured");
                UNAVAILABLE_REPLY.to_string()
            }
            Err(e) => {
                error!(error = %e, "Assistant call failed");
                ERROR_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, query: &str, context: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(Error::CapabilityUnconfigured)?;

        let system_instruction = format!(
            "You are a helpful and professional HR Assistant for a company called \
             'Employee Management System (EMS)'. \
             Your goal is to assist employees with questions about leave policies, \
             salary breakdowns, and attendance rules.\n\n\
             Current User Context: {context}\n\n\
             Keep answers concise, polite, and strictly related to HR topics. \
             If you don't know an answer, suggest contacting the HR department directly."
        );

        let body = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: &system_instruction,
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text: query }],
            }],
            generation_config: GenerationConfig {
                temperature: GENERATION_TEMPERATURE,
            },
        };

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let generated: GenerateResponse = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(generated
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}
