// commands/mod.rs
// Command registration for Amazon Q CLI automatic naming feature

pub mod save;

use std::collections::HashMap;
use crate::conversation::Conversation;
use crate::save_config::SaveConfig;
use self::save::handle_save_command;

/// Command handler function type
pub type CommandHandler = fn(&[String], &Conversation, &SaveConfig) -> Result<String, Box<dyn std::error::Error>>;

/// Command registry
pub struct CommandRegistry {
    /// Registered commands
    commands: HashMap<String, CommandHandler>,
    
    /// Save configuration
    config: SaveConfig,
}

impl CommandRegistry {
    /// Create a new command registry
    pub fn new(config: SaveConfig) -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
            config,
        };
        
        // Register the save command
        registry.register_save_command();
        
        registry
    }
    
    /// Register the save command
    fn register_save_command(&mut self) {
        self.commands.insert("save".to_string(), |args, conv, config| {
            handle_save_command(args, conv, config)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        });
    }
    
    /// Execute a command
    pub fn execute_command(
        &self,
        command: &str,
        args: &[String],
        conversation: &Conversation,
    ) -> Result<String, Box<dyn std::error::Error>> {
        if let Some(handler) = self.commands.get(command) {
            handler(args, conversation, &self.config)
        } else {
            Err(format!("Unknown command: {}", command).into())
        }
    }
    
    /// Get help text for a command
    pub fn get_help_text(&self, command: &str) -> Option<String> {
        match command {
            "save" => Some(
                "/save [path]\n  Save the current conversation.\n\n  \
                Without arguments: Automatically generates a filename and saves to the default location.\n  \
                With directory path: Saves to the specified directory with an auto-generated filename.\n  \
                With full path: Saves to the specified path with the given filename.\n\n  \
                Examples:\n    \
                /save\n    \
                /save ~/my-conversations/\n    \
                /save ~/my-conversations/important-chat.q.json".to_string()
            ),
            _ => None,
        }
    }
    
    /// Get the list of available commands
    pub fn get_commands(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
    
    /// Get the save configuration
    pub fn get_config(&self) -> &SaveConfig {
        &self.config
    }
    
    /// Get a mutable reference to the save configuration
    pub fn get_config_mut(&mut self) -> &mut SaveConfig {
        &mut self.config
    }
}
