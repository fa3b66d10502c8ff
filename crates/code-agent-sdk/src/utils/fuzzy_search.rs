use crate::model::entities::SymbolInfo;

/// Calculate the similarity score between a query and a symbol name using strsim algorithms
pub fn calculate_symbol_score(query: &str, symbol_name: &str, symbol_type: Option<&str>) -> f64 {
    if query.is_empty() {
        return 0.0;
    }

    // Exact match gets highest score
    if query == symbol_name {
        return 1.0;
    }

    // Prefix match gets high score
    if symbol_name.starts_with(query) {
        return 0.9;
    }

    // Contains match gets medium-high score
    if symbol_name.contains(query) {
        return 0.8;
    }

    // Use strsim algorithms for fuzzy matching
    let jaro_winkler_score = strsim::jaro_winkler(query, symbol_name);
    let normalized_levenshtein_score = strsim::normalized_levenshtein(query, symbol_name);
    let sorensen_dice_score = strsim::sorensen_dice(query, symbol_name);

    // Combine scores with weights
    let fuzzy_score = (jaro_winkler_score * 0.4)
        + (normalized_levenshtein_score * 0.4)
        + (sorensen_dice_score * 0.2);

    // Additional scoring for camelCase and snake_case patterns
    let pattern_score = calculate_pattern_score(query, symbol_name);
    let combined_score = (fuzzy_score * 0.7) + (pattern_score * 0.3);

    // Boost score for important symbol types
    let kind_boost = match symbol_type {
        Some("Function") | Some("Method") => 1.1,
        Some("Class") | Some("Interface") => 1.05,
        Some("Constant") => 1.02,
        _ => 1.0,
    };

    (combined_score * kind_boost).min(1.0)
}

/// Calculate additional score based on naming patterns (camelCase, snake_case, etc.)
fn calculate_pattern_score(query: &str, symbol_name: &str) -> f64 {
    let camel_case_score = calculate_camel_case_score(query, symbol_name);
    let snake_case_score = calculate_snake_case_score(query, symbol_name);
    camel_case_score.max(snake_case_score)
}

/// Calculate score for camelCase pattern matching
fn calculate_camel_case_score(query: &str, symbol_name: &str) -> f64 {
    // Extract capital letters and first letter for camelCase matching
    let mut camel_chars = Vec::new();
    let mut chars = symbol_name.chars();

    // Always include first character
    if let Some(first_char) = chars.next() {
        camel_chars.push(first_char.to_lowercase().next().unwrap_or(first_char));
    }

    // Add capital letters
    for ch in chars {
        if ch.is_uppercase() {
            camel_chars.push(ch.to_lowercase().next().unwrap_or(ch));
        }
    }

    let camel_string: String = camel_chars.iter().collect();

    if camel_string.starts_with(query) {
        return 0.7;
    }

    if camel_string.contains(query) {
        return 0.5;
    }

    // Use Jaro-Winkler for fuzzy matching on camelCase pattern
    strsim::jaro_winkler(query, &camel_string) * 0.6
}

/// Calculate score for snake_case pattern matching
fn calculate_snake_case_score(query: &str, symbol_name: &str) -> f64 {
    let words: Vec<&str> = symbol_name.split('_').collect();

    // Check if query matches the start of any word
    for word in &words {
        if word.starts_with(query) {
            return 0.6;
        }
    }

    // Check if query matches concatenated first letters of words
    let first_letters: String = words
        .iter()
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_lowercase();

    if first_letters.starts_with(query) {
        return 0.5;
    }

    0.0
}

/// Search symbols using fuzzy matching
pub fn search_symbols_fuzzy(
    symbols: Vec<SymbolInfo>,
    query: &str,
    limit: usize,
    min_score: f64,
) -> Vec<SymbolInfo> {
    if symbols.is_empty() || query.is_empty() {
        return symbols.into_iter().take(limit).collect();
    }

    let query_lower = query.to_lowercase();
    let mut scored_symbols: Vec<(f64, SymbolInfo)> = Vec::new();

    for symbol in symbols {
        let score = calculate_symbol_score(
            &query_lower,
            &symbol.name.to_lowercase(),
            symbol.symbol_type.as_deref(),
        );

        if score >= min_score {
            scored_symbols.push((score, symbol));
        }
    }

    scored_symbols.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored_symbols.truncate(limit);

    scored_symbols
        .into_iter()
        .map(|(_, symbol)| symbol)
        .collect()
}
