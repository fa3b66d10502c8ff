//! An echo generation adapter: the only concrete [`Adapter`] this crate
//! ships, used by the scenario tests in `spec.md` §8 and as a template for a
//! real integration.
//!
//! It "generates" by echoing its prompt back, word by word, feeding each
//! emitted word through a [`StopStringDetector`] exactly as a real streaming
//! model would feed its decoded tokens — this is the crate's only adapter
//! that demonstrates the `step`/`step_str` integration point end to end.

use std::collections::HashSet;

use axum::extract::{Json, State};
use axum::routing::post;
use axum::Router;
use serde_json::Value;

use crate::adapter::{Adapter, AdapterKind, FieldSpec, GenerationOutput, GenerationSize, RequestSchema};
use crate::envelope::Envelope;
use crate::error::RequestError;
use crate::http::AppState;
use crate::stopstring::{StopStringDetector, StopStringRules};
use crate::token_counter::TokenCounter;

pub struct DummyAdapter;

impl DummyAdapter {
    pub fn new() -> Self {
        DummyAdapter
    }

    fn generate_one(prompt: &str, max_new_tokens: u32, stop: &HashSet<String>) -> GenerationOutput {
        let words: Vec<&str> = prompt.split_whitespace().collect();
        let input_len = words.len() as u32;

        let mut rules = StopStringRules::new();
        rules.wildcard = stop.clone();
        let mut detector = StopStringDetector::new(prompt, &StopStringRules::new(), &rules);

        let mut generated = String::new();
        let mut produced: u32 = 0;
        let mut stopping_reason = None;

        for (i, word) in words.iter().enumerate() {
            if produced >= max_new_tokens {
                break;
            }
            let piece = if i == 0 { (*word).to_string() } else { format!(" {word}") };
            generated.push_str(&piece);
            produced += 1;
            if detector.step_str(&piece) {
                stopping_reason = detector.stopping_reason().map(str::to_string);
                generated = detector.trim(&generated);
                break;
            }
        }

        let overflow = input_len.saturating_sub(max_new_tokens);
        GenerationOutput {
            generated,
            size: GenerationSize {
                input: input_len,
                output: produced,
                overflow,
            },
            stopping_reason,
        }
    }
}

impl Default for DummyAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Adapter for DummyAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Generation
    }

    fn schema(&self) -> RequestSchema {
        RequestSchema {
            kind: AdapterKind::Generation,
            fields: vec![
                FieldSpec {
                    name: "max_new_tokens",
                    schema: serde_json::json!({"type": "integer", "minimum": 1}),
                    required: false,
                    default: Some(serde_json::json!(16)),
                    shape_sensitive: true,
                },
                FieldSpec {
                    name: "stop",
                    schema: serde_json::json!({"type": "array", "items": {"type": "string"}}),
                    required: false,
                    default: Some(serde_json::json!([])),
                    shape_sensitive: true,
                },
            ],
        }
    }

    async fn call(&self, batch: Vec<Value>) -> Result<Vec<Value>, RequestError> {
        let mut outputs = Vec::with_capacity(batch.len());
        for body in batch {
            let prompts = body
                .get("batch")
                .and_then(Value::as_array)
                .ok_or_else(|| RequestError::Application("missing 'batch' field".to_string()))?;
            let max_new_tokens = body
                .get("max_new_tokens")
                .and_then(Value::as_u64)
                .unwrap_or(16) as u32;
            let stop: HashSet<String> = body
                .get("stop")
                .and_then(Value::as_array)
                .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
                .unwrap_or_default();

            let mut results = Vec::with_capacity(prompts.len());
            for prompt in prompts {
                let prompt = prompt
                    .as_str()
                    .ok_or_else(|| RequestError::User("'batch' entries must be strings".to_string()))?;
                results.push(Self::generate_one(prompt, max_new_tokens, &stop));
            }
            outputs.push(serde_json::to_value(results).expect("GenerationOutput always serializes"));
        }
        Ok(outputs)
    }

    fn meta(&self) -> serde_json::Map<String, Value> {
        let mut m = serde_json::Map::new();
        m.insert("adapter".to_string(), Value::String("dummy-echo".to_string()));
        m
    }

    /// Installs `/tokenizer/count`, the auxiliary endpoint `spec.md` §6
    /// names as an example of an adapter-specific route (`spec.md` §4.7,
    /// "Token Counter").
    fn router_hook(&self, router: Router<AppState>) -> Router<AppState> {
        router.route("/tokenizer/count", post(tokenizer_count))
    }
}

/// A whitespace-boundary word "tokenizer" standing in for a real one —
/// this adapter has no model-specific vocabulary, so it treats each
/// maximal run of non-whitespace characters as one token, matching the
/// same word-splitting [`DummyAdapter::generate_one`] uses to "generate".
fn word_token_ends(concatenated: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut in_word = false;
    let mut position = 0usize;
    for ch in concatenated.chars() {
        position += 1;
        if ch.is_whitespace() {
            if in_word {
                ends.push(position - 1);
                in_word = false;
            }
        } else {
            in_word = true;
        }
    }
    if in_word {
        ends.push(position);
    }
    ends
}

async fn tokenizer_count(State(state): State<AppState>, Json(body): Json<Value>) -> Envelope {
    let segments: Vec<String> = match body.get("segments").and_then(Value::as_array) {
        Some(arr) => arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        None => {
            let err = RequestError::Validation(vec![
                serde_json::json!({"loc": "segments", "msg": "required array of strings"}),
            ]);
            return Envelope::from_error(&err, state.meta());
        }
    };
    let indicate_shared = body.get("indicate_shared").and_then(Value::as_bool).unwrap_or(false);

    let concatenated: String = segments.concat();
    let ends = word_token_ends(&concatenated);
    let segment_lengths: Vec<usize> = segments.iter().map(|s| s.chars().count()).collect();

    let mut counter = TokenCounter::new(&segment_lengths, ends, 0, indicate_shared);
    match counter.consume() {
        Ok(counts) => Envelope::success(serde_json::to_value(counts).expect("TokenCounts always serializes"), state.meta()),
        Err(_) => Envelope::from_error(
            &RequestError::Application("token counter already consumed".to_string()),
            state.meta(),
        ),
    }
}
