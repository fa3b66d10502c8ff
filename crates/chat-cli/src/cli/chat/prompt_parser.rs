use crate::cli::agent::DEFAULT_AGENT_NAME;
use crossterm::style::Stylize;

/// Components extracted from a prompt string
#[derive(Debug, PartialEq)]
pub struct PromptComponents {
    pub profile: Option<String>,
    pub warning: bool,
    pub tangent_mode: bool,
    pub leader: String,
}

/// Parse prompt components from a plain text prompt
pub fn parse_prompt_components(prompt: &str) -> Option<PromptComponents> {
    // Expected format: "[agent] !> " or "> " or "!> " or "[agent] ↯ > " or "↯ > " or "[agent] ↯ !> "
    // or with $ leader: "[agent] !$ " or "$ " etc.
    let mut profile = None;
    let mut warning = false;
    let mut tangent_mode = false;
    let mut remaining = prompt.trim();

    // Check for agent pattern [agent] first
    if let Some(start) = remaining.find('[') {
        if let Some(end) = remaining.find(']') {
            if start < end {
                let content = &remaining[start + 1..end];
                profile = Some(content.to_string());
                remaining = remaining[end + 1..].trim_start();
            }
        }
    }

    // Check for tangent mode ↯ first
    if let Some(after_tangent) = remaining.strip_prefix('↯') {
        tangent_mode = true;
        remaining = after_tangent.trim_start();
    }

    // Check for warning symbol ! (comes after tangent mode)
    if remaining.starts_with('!') {
        warning = true;
        remaining = remaining[1..].trim_start();
    }

    // Extract the leader (should be > or $ followed by space)
    let trimmed = remaining.trim_end();
    if trimmed == ">" {
        Some(PromptComponents {
            profile,
            warning,
            tangent_mode,
            leader: ">".to_string(),
        })
    } else if trimmed == "$" {
        Some(PromptComponents {
            profile,
            warning,
            tangent_mode,
            leader: "$".to_string(),
        })
    } else {
        None
    }
}

pub fn generate_prompt(current_profile: Option<&str>, warning: bool, tangent_mode: bool) -> String {
    generate_prompt_with_leader(current_profile, warning, tangent_mode, ">")
}

pub fn generate_prompt_with_leader(current_profile: Option<&str>, warning: bool, tangent_mode: bool, leader: &str) -> String {
    // Generate plain text prompt that will be colored by highlight_prompt
    let warning_symbol = if warning { "!" } else { "" };
    let profile_part = current_profile
        .filter(|&p| p != DEFAULT_AGENT_NAME)
        .map(|p| format!("[{p}] "))
        .unwrap_or_default();

    if tangent_mode {
        format!("{profile_part}↯ {warning_symbol}{leader} ")
    } else {
        format!("{profile_part}{warning_symbol}{leader} ")
    }
}

pub fn generate_colored_prompt_with_leader(current_profile: Option<&str>, warning: bool, tangent_mode: bool, leader: &str) -> String {
    let mut result = String::new();
    
    // Add profile part (cyan)
    if let Some(profile) = current_profile.filter(|&p| p != DEFAULT_AGENT_NAME) {
        result.push_str(&format!("[{}] ", profile).cyan().to_string());
    }
    
    // Add tangent mode symbol (yellow)
    if tangent_mode {
        result.push_str(&"↯ ".yellow().to_string());
    }
    
    // Add warning symbol (red)
    if warning {
        result.push_str(&"!".red().to_string());
    }
    
    // Add the prompt symbol (magenta for >, green for $)
    if leader == "$" {
        result.push_str(&"$ ".green().to_string());
    } else {
        result.push_str(&"> ".magenta().to_string());
    }
    
    result
}
