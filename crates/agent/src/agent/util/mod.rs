use std::collections::HashMap;
use std::env::VarError;

use consts::env_var::CLI_IS_INTEG_TEST;
use regex::Regex;

pub mod consts;
pub mod directories;
pub mod error;
pub mod glob;
pub mod path;
pub mod request_channel;

pub fn expand_env_vars(env_vars: &mut HashMap<String, String>) {
    let env_provider = |input: &str| Ok(std::env::var(input).ok());
    expand_env_vars_impl(env_vars, env_provider);
}

fn expand_env_vars_impl<E>(env_vars: &mut HashMap<String, String>, env_provider: E)
where
    E: Fn(&str) -> Result<Option<String>, VarError>,
{
    // Create a regex to match ${env:VAR_NAME} pattern
    let re = Regex::new(r"\$\{env:([^}]+)\}").unwrap();
    for (_, value) in env_vars.iter_mut() {
        *value = re
            .replace_all(value, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                env_provider(var_name)
                    .unwrap_or_else(|_| Some(format!("${{{}}}", var_name)))
                    .unwrap_or_else(|| format!("${{{}}}", var_name))
            })
            .to_string();
    }
}

pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut byte_count = 0;
    let mut char_indices = s.char_indices();

    for (byte_idx, _) in &mut char_indices {
        if byte_count + (byte_idx - byte_count) > max_bytes {
            break;
        }
        byte_count = byte_idx;
    }

    &s[..byte_count]
}

/// Truncates `s` to a maximum length of `max_bytes`, appending `suffix` if `s` was truncated. The
/// result is always guaranteed to be at least less than `max_bytes`.
///
/// If `suffix` is larger than `max_bytes`, or `s` is within `max_bytes`, then this function does
/// nothing.
pub fn truncate_safe_in_place(s: &mut String, max_bytes: usize, suffix: &str) {
    // Do nothing if the suffix is too large to be truncated within max_bytes, or s is already small
    // enough to not be truncated.
    if suffix.len() > max_bytes || s.len() <= max_bytes {
        return;
    }

    let end = truncate_safe(s, max_bytes - suffix.len()).len();
    s.replace_range(end..s.len(), suffix);
    s.truncate(max_bytes);
}

pub fn is_integ_test() -> bool {
    std::env::var_os(CLI_IS_INTEG_TEST).is_some_and(|s| !s.is_empty())
}
