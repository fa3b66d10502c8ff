use std::collections::HashSet;

use crate::util::pattern_matching::matches_any_pattern;
use crate::util::MCP_SERVER_TOOL_DELIMITER;
use tracing::info;

/// Checks if a tool is allowed based on the agent's allowed_tools configuration.
/// This function handles both native tools and MCP tools with wildcard pattern support.
pub fn is_tool_allowed(
    allowed_tools: &HashSet<String>,
    tool_name: &str,
    server_name: Option<&str>,
) -> bool {
    let filter_patterns = |predicate: fn(&str) -> bool| -> HashSet<String> {
        allowed_tools
            .iter()
            .filter(|pattern| predicate(pattern))
            .cloned()
            .collect()
    };
    
    match server_name {
        // Native tool
        None => {
            let patterns = filter_patterns(|p| !p.starts_with('@'));
            info!("Native patterns: {:?}", patterns);
            let result = matches_any_pattern(&patterns, tool_name);
            info!("Native tool '{}' permission check result: {}", tool_name, result);
            result
        },
        // MCP tool
        Some(server) => {
            let patterns = filter_patterns(|p| p.starts_with('@'));
            info!("MCP patterns: {:?}", patterns);
            
            // Check server-level permission first: @server_name
            let server_pattern = format!("@{}", server);
            info!("Checking server-level pattern: '{}'", server_pattern);
            if matches_any_pattern(&patterns, &server_pattern) {
                info!("Server-level permission granted for '{}'", server_pattern);
                return true;
            }
            
            // Check tool-specific permission: @server_name/tool_name
            let tool_pattern = format!("@{}{}{}", server, MCP_SERVER_TOOL_DELIMITER, tool_name);
            info!("Checking tool-specific pattern: '{}'", tool_pattern);
            let result = matches_any_pattern(&patterns, &tool_pattern);
            info!("Tool-specific permission result for '{}': {}", tool_pattern, result);
            result
        }
    }
}
