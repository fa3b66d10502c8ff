//! Streaming textual stop condition (`spec.md` §4.6, "Stop-String Detector").
//!
//! Ported from `language_models/server/models/_stopping_criteria.py`'s
//! `StringStoppingCriteria`: model tokens rarely align with the strings a
//! caller wants to stop generation on (`]`, `"`, `<|endoftext|>`, ...), so
//! this runs as a small state machine over the decoded output, fed one
//! token at a time.

use std::collections::{HashMap, HashSet};

use crate::stream_detokenizer::StreamDetokenizer;

/// A set of stop strings keyed by the prompt suffix that activates them,
/// plus a wildcard set that is always active (`spec.md` §4.6 inputs).
#[derive(Debug, Clone, Default)]
pub struct StopStringRules {
    pub wildcard: HashSet<String>,
    pub by_prompt_suffix: HashMap<String, HashSet<String>>,
}

impl StopStringRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Longest-suffix-wins rule selection (`spec.md` §4.6 steps 1-4): every
    /// key that is a suffix of the (right-stripped) prompt is a candidate;
    /// only the longest matching keys' stop strings become active, so a
    /// `["`-specific rule shadows a more general `"` rule.
    fn select_active(&self, stripped_prompt: &str) -> HashSet<String> {
        let mut active = self.wildcard.clone();

        let matching_keys: Vec<&String> = self
            .by_prompt_suffix
            .keys()
            .filter(|key| !key.is_empty() && stripped_prompt.ends_with(key.as_str()))
            .collect();

        if let Some(max_len) = matching_keys.iter().map(|key| key.len()).max() {
            for key in matching_keys.into_iter().filter(|key| key.len() == max_len) {
                active.extend(self.by_prompt_suffix[key].iter().cloned());
            }
        }
        active
    }
}

#[derive(Debug, Clone)]
struct Trigger {
    string: String,
    /// `true` for an exclusive match (stop string removed from the
    /// returned text), `false` for inclusive (kept).
    remove: bool,
}

pub struct StopStringDetector {
    detokenizer: StreamDetokenizer,
    decoded_so_far: String,
    active_inclusive: HashSet<String>,
    active_exclusive: HashSet<String>,
    trigger: Option<Trigger>,
}

impl StopStringDetector {
    pub fn new(prompt: &str, inclusive: &StopStringRules, exclusive: &StopStringRules) -> Self {
        let stripped = prompt.trim_end();
        StopStringDetector {
            detokenizer: StreamDetokenizer::new(),
            decoded_so_far: String::new(),
            active_inclusive: inclusive.select_active(stripped),
            active_exclusive: exclusive.select_active(stripped),
            trigger: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active_inclusive.is_empty() && self.active_exclusive.is_empty()
    }

    pub fn has_stopped(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn stopping_reason(&self) -> Option<&str> {
        self.trigger.as_ref().map(|t| t.string.as_str())
    }

    /// Feeds one token's raw bytes through the stream detokenizer. Returns
    /// `true` the step that triggers a stop.
    pub fn step(&mut self, token_bytes: &[u8]) -> bool {
        if self.trigger.is_some() || self.is_empty() {
            return self.trigger.is_some();
        }
        let emitted = self.detokenizer.push(token_bytes);
        self.record_emitted(&emitted)
    }

    /// Feeds one already-decoded token's text directly, for adapters (or
    /// tests) that don't need the byte-level stream detokenizer.
    pub fn step_str(&mut self, token_text: &str) -> bool {
        if self.trigger.is_some() || self.is_empty() {
            return self.trigger.is_some();
        }
        self.record_emitted(token_text)
    }

    fn record_emitted(&mut self, emitted: &str) -> bool {
        if emitted.is_empty() {
            return false;
        }
        self.decoded_so_far.push_str(emitted);
        let emitted_chars = emitted.chars().count();

        // Exclusive is checked before inclusive: `spec.md` §4.6 step 3
        // ("First hit wins") preserves the source's evaluation order.
        if let Some(matched) = Self::find_match(&self.decoded_so_far, &self.active_exclusive, emitted_chars) {
            self.trigger = Some(Trigger { string: matched, remove: true });
            return true;
        }
        if let Some(matched) = Self::find_match(&self.decoded_so_far, &self.active_inclusive, emitted_chars) {
            self.trigger = Some(Trigger { string: matched, remove: false });
            return true;
        }
        false
    }

    fn find_match(decoded_so_far: &str, active: &HashSet<String>, emitted_chars: usize) -> Option<String> {
        for candidate in active {
            let lookback = candidate.chars().count() + emitted_chars - 1;
            if tail_chars(decoded_so_far, lookback).contains(candidate.as_str()) {
                return Some(candidate.clone());
            }
        }
        None
    }

    /// Trims the fully generated text once a trigger has fired: up to (and
    /// including, for inclusive) the trigger's last occurrence, right
    /// stripped (`spec.md` §4.6 "Trim policy").
    pub fn trim(&self, generated: &str) -> String {
        let Some(trigger) = &self.trigger else {
            return generated.to_string();
        };
        match generated.rfind(&trigger.string) {
            Some(pos) => {
                let cut = if trigger.remove { pos } else { pos + trigger.string.len() };
                generated[..cut].trim_end().to_string()
            }
            None => generated.trim_end().to_string(),
        }
    }
}

/// Returns the last `n` characters of `s` (or the whole string if it has
/// fewer), without panicking on a non-char-boundary byte offset.
fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}
