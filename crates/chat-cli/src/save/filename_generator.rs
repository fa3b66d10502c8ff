// filename_generator.rs
// Filename generator for Amazon Q CLI automatic naming feature

use chrono::{Local, Datelike, Timelike};
use regex::Regex;
use crate::conversation::Conversation;
use crate::topic_extractor::{self, basic, enhanced, advanced};
use crate::save_config::{SaveConfig, FilenameFormat};

/// Type definition for topic extractor functions
pub type TopicExtractorFn = fn(&Conversation) -> (String, String, String);

/// Generate a filename for a conversation
///
/// The filename format is: Q_[MainTopic]_[SubTopic]_[ActionType] - DDMMMYY-HHMM
/// For example: Q_AmazonQ_CLI_FeatureRequest - 04JUL25-1600
///
/// If topics cannot be extracted, a fallback format is used: Q_Conversation - DDMMMYY-HHMM
pub fn generate_filename(conversation: &Conversation) -> String {
    // Use the default topic extractor
    generate_filename_with_extractor(conversation, &topic_extractor::extract_topics)
}

/// Generate a filename for a conversation using a specific topic extractor
pub fn generate_filename_with_extractor(
    conversation: &Conversation,
    extractor: &TopicExtractorFn
) -> String {
    // Extract topics from the conversation
    let (main_topic, sub_topic, action_type) = extractor(conversation);
    
    // Format the date and time
    let now = Local::now();
    let date_suffix = format!(
        " - {:02}{}{:02}-{:02}{:02}",
        now.day(),
        month_to_abbr(now.month()),
        now.year() % 100,
        now.hour(),
        now.minute()
    );
    
    // Generate the filename
    let filename = if !main_topic.is_empty() {
        format!(
            "Q_{}_{}_{}{}", 
            sanitize_for_filename(&main_topic),
            sanitize_for_filename(&sub_topic),
            sanitize_for_filename(&action_type),
            date_suffix
        )
    } else {
        format!("Q_Conversation{}", date_suffix)
    };
    
    // Ensure the filename is not too long
    truncate_filename(&filename)
}

/// Generate a filename for a conversation using configuration settings
pub fn generate_filename_with_config(
    conversation: &Conversation,
    config: &SaveConfig
) -> String {
    // Get the topic extractor based on configuration
    let extractor = get_topic_extractor(config.get_topic_extractor_name());
    
    // Extract topics from the conversation
    let (main_topic, sub_topic, action_type) = extractor(conversation);
    
    // Format the date and time
    let now = Local::now();
    let date_str = format_date(&now, config.get_date_format());
    
    // Generate the filename based on the format
    let filename = match config.get_filename_format() {
        FilenameFormat::Default => {
            if !main_topic.is_empty() {
                format!(
                    "{}{}{}{}{}{}{}", 
                    config.get_prefix(),
                    sanitize_for_filename(&main_topic),
                    config.get_separator(),
                    sanitize_for_filename(&sub_topic),
                    config.get_separator(),
                    sanitize_for_filename(&action_type),
                    if date_str.is_empty() { String::new() } else { format!(" - {}", date_str) }
                )
            } else {
                format!(
                    "{}Conversation{}", 
                    config.get_prefix(),
                    if date_str.is_empty() { String::new() } else { format!(" - {}", date_str) }
                )
            }
        },
        FilenameFormat::Custom(format) => {
            let mut result = format.clone();
            result = result.replace("{main_topic}", &sanitize_for_filename(&main_topic));
            result = result.replace("{sub_topic}", &sanitize_for_filename(&sub_topic));
            result = result.replace("{action_type}", &sanitize_for_filename(&action_type));
            result = result.replace("{date}", &date_str);
            result = result.replace("{id}", &conversation.id);
            result
        }
    };
    
    // Ensure the filename is not too long
    truncate_filename(&filename)
}

/// Generate a filename for a conversation using a template
pub fn generate_filename_with_template(
    conversation: &Conversation,
    config: &SaveConfig,
    template_name: &str
) -> String {
    // Get the template format
    if let Some(template_format) = config.get_template(template_name) {
        // Create a temporary config with the template format
        let mut temp_config = config.clone();
        temp_config.set_filename_format(template_format.clone()).unwrap_or(());
        
        // Generate the filename with the temporary config
        generate_filename_with_config(conversation, &temp_config)
    } else {
        // Fall back to the default format
        generate_filename_with_config(conversation, config)
    }
}

/// Get a topic extractor function by name
fn get_topic_extractor(name: &str) -> TopicExtractorFn {
    match name {
        "basic" => basic::extract_topics,
        "enhanced" => enhanced::extract_topics,
        "advanced" => advanced::extract_topics,
        _ => topic_extractor::extract_topics,
    }
}

/// Format a date according to the specified format
fn format_date(date: &chrono::DateTime<chrono::Local>, format: &str) -> String {
    match format {
        "DDMMMYY-HHMM" => format!(
            "{:02}{}{:02}-{:02}{:02}",
            date.day(),
            month_to_abbr(date.month()),
            date.year() % 100,
            date.hour(),
            date.minute()
        ),
        "YYYY-MM-DD" => format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            date.month(),
            date.day()
        ),
        "MM-DD-YYYY" => format!(
            "{:02}-{:02}-{:04}",
            date.month(),
            date.day(),
            date.year()
        ),
        "DD-MM-YYYY" => format!(
            "{:02}-{:02}-{:04}",
            date.day(),
            date.month(),
            date.year()
        ),
        "YYYY/MM/DD" => format!(
            "{:04}/{:02}/{:02}",
            date.year(),
            date.month(),
            date.day()
        ),
        _ => format!(
            "{:02}{}{:02}-{:02}{:02}",
            date.day(),
            month_to_abbr(date.month()),
            date.year() % 100,
            date.hour(),
            date.minute()
        ),
    }
}

/// Sanitize a string for use in a filename
///
/// Replaces spaces with underscores and removes special characters
fn sanitize_for_filename(input: &str) -> String {
    // Replace spaces with underscores
    let with_underscores = input.replace(' ', "_");
    
    // Remove special characters
    let re = Regex::new(r"[^\w\-.]").unwrap();
    let sanitized = re.replace_all(&with_underscores, "").to_string();
    
    // Ensure the result is not empty
    if sanitized.is_empty() {
        "Unknown".to_string()
    } else {
        sanitized
    }
}

/// Convert a month number to a three-letter abbreviation
fn month_to_abbr(month: u32) -> &'static str {
    match month {
        1 => "JAN",
        2 => "FEB",
        3 => "MAR",
        4 => "APR",
        5 => "MAY",
        6 => "JUN",
        7 => "JUL",
        8 => "AUG",
        9 => "SEP",
        10 => "OCT",
        11 => "NOV",
        12 => "DEC",
        _ => "UNK",
    }
}

/// Truncate a filename to a reasonable length
fn truncate_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;
    
    if filename.len() <= MAX_FILENAME_LENGTH {
        filename.to_string()
    } else {
        // Split the filename into base and date parts
        let parts: Vec<&str> = filename.split(" - ").collect();
        if parts.len() != 2 {
            // If we can't split properly, just truncate
            return filename[..MAX_FILENAME_LENGTH].to_string();
        }
        
        let base = parts[0];
        let date = parts[1];
        
        // Calculate how much to truncate the base
        let max_base_length = MAX_FILENAME_LENGTH - date.len() - 3; // 3 for " - "
        let truncated_base = if base.len() > max_base_length {
            &base[..max_base_length]
        } else {
            base
        };
        
        format!("{} - {}", truncated_base, date)
    }
}
