//! Reasoning-service abstraction
//!
//! The retrieval core never talks to a language model directly; it hands
//! the fused context to an injected [`Reasoner`] and gets a structured
//! triage report back. Provenance fields in the report are always
//! overwritten with what the pipeline actually used - the model is not
//! trusted to describe its own sources.

use crate::pipeline::{ContextOrigin, FusedContext, RetrievalPipeline};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use vidhi_common::config::ReasonerConfig;
use vidhi_common::errors::{AppError, Result};

/// Structured triage answer for one user query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageReport {
    /// One of: RTI, Domestic Violence, Divorce, Unknown
    pub intent_detected: String,

    /// True when the query is out of scope or asks for subjective advice
    pub kill_switch_triggered: bool,

    /// Tailored explanation citing specific act sections
    pub simplified_explanation: String,

    /// Specific sections that apply, with brief descriptions
    #[serde(default)]
    pub relevant_acts: Vec<String>,

    /// Concrete next steps for this user's situation
    #[serde(default)]
    pub immediate_action_steps: Vec<String>,

    /// One-sentence summary of the user's problem
    #[serde(default)]
    pub extracted_user_issue: String,

    /// One clarifying question, or empty
    #[serde(default)]
    pub follow_up_question: String,

    /// Provenance tag, injected by the pipeline after the model call
    #[serde(default = "default_context_source")]
    pub context_source: ContextOrigin,

    /// Contributing portal labels, injected by the pipeline
    #[serde(default)]
    pub sources_used: Vec<String>,
}

fn default_context_source() -> ContextOrigin {
    ContextOrigin::SemanticOnly
}

/// Opaque reasoning service: fused context in, structured report out
#[async_trait]
pub trait Reasoner: Send + Sync {
    async fn analyze(&self, query: &str, context: &str) -> Result<TriageReport>;
}

const SYSTEM_PROMPT: &str = "You are Vidhi, an Indian legal information assistant \
specialising in RTI, Domestic Violence, and Divorce law. Respond in the language the \
user wrote in, except that relevant_acts and intent_detected stay in English. Always \
cite specific act names and section numbers from the provided context, tailor every \
action step to what this user said, and include fees, timelines, and exact authorities. \
Set kill_switch_triggered = true only for purely subjective questions or topics outside \
RTI, Domestic Violence, and Divorce. Respond with ONLY a valid JSON object with the \
fields: intent_detected, kill_switch_triggered, simplified_explanation, relevant_acts, \
immediate_action_steps, extracted_user_issue, follow_up_question.";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Reasoner backed by an OpenAI-compatible chat-completions endpoint
pub struct ChatReasoner {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl ChatReasoner {
    pub fn new(config: &ReasonerConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| AppError::Configuration {
            message: "reasoner.api_key is required".to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.api_base.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl Reasoner for ChatReasoner {
    async fn analyze(&self, query: &str, context: &str) -> Result<TriageReport> {
        let prompt = format!(
            "User's statement: \"{query}\"\n\n\
             Context (priority: use government portal data first if available):\n{context}\n\n\
             Produce a specific, legally precise JSON response for this user's exact situation."
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Reasoner {
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Reasoner {
                message: format!("API error {}: {}", status, body),
            });
        }

        let completion: ChatResponse = response.json().await.map_err(|e| AppError::Reasoner {
            message: format!("Failed to parse response: {}", e),
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Reasoner {
                message: "Empty completion".to_string(),
            })?;

        serde_json::from_str(&content).map_err(|e| AppError::Reasoner {
            message: format!("Model returned invalid report JSON: {}", e),
        })
    }
}

/// Retrieval plus reasoning: the full triage path for one query
pub struct TriageService {
    pipeline: RetrievalPipeline,
    reasoner: Arc<dyn Reasoner>,
}

impl TriageService {
    pub fn new(pipeline: RetrievalPipeline, reasoner: Arc<dyn Reasoner>) -> Self {
        Self { pipeline, reasoner }
    }

    /// The underlying retrieval pipeline, for debug views
    pub fn pipeline(&self) -> &RetrievalPipeline {
        &self.pipeline
    }

    /// Run retrieval, hand the fused context to the reasoner, and stamp the
    /// report with the pipeline's actual provenance.
    pub async fn analyze(&self, query: &str) -> Result<TriageReport> {
        let context: FusedContext = self.pipeline.retrieve(query).await?;

        let mut report = self.reasoner.analyze(query, &context.text).await?;
        report.context_source = context.origin;
        report.sources_used = context.sources_used;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{KnowledgeChunk, Topic};
    use crate::fetcher::{SourceFetcher, SourcePage};
    use crate::fusion::ContextFusionEngine;
    use crate::index::SemanticIndex;
    use crate::sources::{SourceDescriptor, SourceRegistry};
    use std::collections::HashMap;
    use vidhi_common::config::{FusionConfig, RetrievalConfig};
    use vidhi_common::embeddings::HashEmbedder;

    struct FailingFetcher;

    #[async_trait]
    impl SourceFetcher for FailingFetcher {
        async fn fetch(&self, _source: &SourceDescriptor) -> Option<SourcePage> {
            None
        }
    }

    /// Stub model that hallucinates provenance it never had
    struct CannedReasoner;

    #[async_trait]
    impl Reasoner for CannedReasoner {
        async fn analyze(&self, _query: &str, context: &str) -> Result<TriageReport> {
            assert!(context.contains("Section 6(1)"), "reasoner must see the fused context");
            Ok(TriageReport {
                intent_detected: "RTI".to_string(),
                kill_switch_triggered: false,
                simplified_explanation: "File under Section 6(1).".to_string(),
                relevant_acts: vec!["Section 6(1), RTI Act 2005".to_string()],
                immediate_action_steps: vec!["Identify the PIO.".to_string()],
                extracted_user_issue: "Wants to file an RTI.".to_string(),
                follow_up_question: String::new(),
                context_source: ContextOrigin::WebSemantic,
                sources_used: vec!["Hallucinated Portal".to_string()],
            })
        }
    }

    async fn service() -> TriageService {
        let corpus = vec![KnowledgeChunk::new(
            "rti_filing",
            Topic::Rti,
            "Filing Procedure",
            "File an RTI application under Section 6(1) with the PIO, no reasons required",
        )];
        let index = Arc::new(
            SemanticIndex::build(Arc::new(HashEmbedder::new(384)), corpus)
                .await
                .unwrap(),
        );

        let mut sources = HashMap::new();
        sources.insert(
            Topic::Rti,
            vec![SourceDescriptor::new("http://portal.test/", "RTI Portal")],
        );

        let fusion = ContextFusionEngine::new(
            Arc::new(FailingFetcher),
            SourceRegistry::with_sources(sources),
            FusionConfig::default(),
        );
        let pipeline = RetrievalPipeline::new(index, fusion, RetrievalConfig::default());

        TriageService::new(pipeline, Arc::new(CannedReasoner))
    }

    #[tokio::test]
    async fn test_pipeline_provenance_overrides_model_claims() {
        let service = service().await;
        let report = service.analyze("how do I file an RTI").await.unwrap();

        // All portals failed, so whatever the model claimed is replaced.
        assert_eq!(report.context_source, ContextOrigin::SemanticOnly);
        assert!(report.sources_used.is_empty());
        assert_eq!(report.intent_detected, "RTI");
    }

    #[test]
    fn test_report_parses_with_optional_fields_missing() {
        let raw = r#"{
            "intent_detected": "Divorce",
            "kill_switch_triggered": false,
            "simplified_explanation": "Section 13B applies."
        }"#;
        let report: TriageReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.intent_detected, "Divorce");
        assert!(report.relevant_acts.is_empty());
        assert_eq!(report.context_source, ContextOrigin::SemanticOnly);
        assert!(report.sources_used.is_empty());
    }
}
