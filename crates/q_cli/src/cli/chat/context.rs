use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};

/// Configuration for context files, containing paths to include in the context.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContextConfig {
    /// List of file paths or glob patterns to include in the context.
    pub paths: Vec<String>,
}

/// Manager for context files and profiles.
#[derive(Debug, Clone)]
pub struct ContextManager {
    /// Directory where context configurations are stored.
    config_dir: PathBuf,
    
    /// Directory where profile configurations are stored.
    profiles_dir: PathBuf,
    
    /// Global context configuration that applies to all profiles.
    pub global_config: ContextConfig,
    
    /// Name of the current active profile.
    pub current_profile: String,
    
    /// Context configuration for the current profile.
    pub profile_config: ContextConfig,
}

impl ContextManager {
    /// Create a new ContextManager with default settings.
    ///
    /// This will:
    /// 1. Create the necessary directories if they don't exist
    /// 2. Load the global configuration
    /// 3. Load the default profile configuration
    ///
    /// # Returns
    /// A Result containing the new ContextManager or an error
    pub fn new() -> Result<Self> {
        // Get the home directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| eyre!("Could not determine home directory"))?;
        
        // Set up the configuration directories
        let config_dir = home_dir
            .join(".aws")
            .join("amazonq")
            .join("context");
        
        let profiles_dir = config_dir.join("profiles");
        
        // Create directories if they don't exist
        fs::create_dir_all(&profiles_dir)?;
        
        // Load global configuration
        let global_config = Self::load_global_config(&config_dir)?;
        
        // Load default profile
        let current_profile = "default".to_string();
        let profile_config = Self::load_profile_config(&profiles_dir, &current_profile)?;
        
        Ok(Self {
            config_dir,
            profiles_dir,
            global_config,
            current_profile,
            profile_config,
        })
    }
    
    /// Load the global context configuration.
    ///
    /// If the global configuration file doesn't exist, returns a default configuration.
    ///
    /// # Arguments
    /// * `config_dir` - The directory where the global configuration is stored
    ///
    /// # Returns
    /// A Result containing the global ContextConfig or an error
    fn load_global_config(config_dir: &Path) -> Result<ContextConfig> {
        let global_path = config_dir.join("global.json");
        
        if global_path.exists() {
            // Read and parse the existing configuration file
            let mut file = File::open(&global_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            
            let config: ContextConfig = serde_json::from_str(&contents)
                .map_err(|e| eyre!("Failed to parse global configuration: {}", e))?;
            
            Ok(config)
        } else {
            // Return default global configuration with predefined paths
            Ok(ContextConfig {
                paths: vec![
                    "~/.aws/amazonq/rules/**/*.md".to_string(),
                    "AmazonQ.md".to_string(),
                ],
            })
        }
    }
    
    /// Load a profile's context configuration.
    ///
    /// If the profile configuration file doesn't exist, creates a default configuration.
    ///
    /// # Arguments
    /// * `profiles_dir` - The directory where profile configurations are stored
    /// * `profile` - The name of the profile to load
    ///
    /// # Returns
    /// A Result containing the profile's ContextConfig or an error
    fn load_profile_config(profiles_dir: &Path, profile: &str) -> Result<ContextConfig> {
        let profile_path = profiles_dir.join(format!("{}.json", profile));
        
        if profile_path.exists() {
            // Read and parse the existing configuration file
            let mut file = File::open(&profile_path)?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            
            let config: ContextConfig = serde_json::from_str(&contents)
                .map_err(|e| eyre!("Failed to parse profile configuration: {}", e))?;
            
            Ok(config)
        } else {
            // Return empty configuration for new profiles
            Ok(ContextConfig::default())
        }
    }
    
    /// Save the current configuration to disk.
    ///
    /// # Arguments
    /// * `global` - If true, save the global configuration; otherwise, save the current profile configuration
    ///
    /// # Returns
    /// A Result indicating success or an error
    fn save_config(&self, global: bool) -> Result<()> {
        if global {
            // Save global configuration
            let global_path = self.config_dir.join("global.json");
            let contents = serde_json::to_string_pretty(&self.global_config)
                .map_err(|e| eyre!("Failed to serialize global configuration: {}", e))?;
            
            let mut file = File::create(&global_path)?;
            file.write_all(contents.as_bytes())?;
        } else {
            // Save profile configuration
            let profile_path = self.profiles_dir.join(format!("{}.json", self.current_profile));
            let contents = serde_json::to_string_pretty(&self.profile_config)
                .map_err(|e| eyre!("Failed to serialize profile configuration: {}", e))?;
            
            let mut file = File::create(&profile_path)?;
            file.write_all(contents.as_bytes())?;
        }
        
        Ok(())
    }
    
    /// Add paths to the context configuration.
    ///
    /// # Arguments
    /// * `paths` - List of paths to add
    /// * `global` - If true, add to global configuration; otherwise, add to current profile configuration
    ///
    /// # Returns
    /// A Result indicating success or an error
    pub fn add_paths(&mut self, paths: Vec<String>, global: bool) -> Result<()> {
        // Get reference to the appropriate config
        let config = if global {
            &mut self.global_config
        } else {
            &mut self.profile_config
        };
        
        // Add each path, checking for duplicates
        for path in paths {
            if config.paths.contains(&path) {
                return Err(eyre!("Path '{}' already exists in the context", path));
            }
            config.paths.push(path);
        }
        
        // Save the updated configuration
        self.save_config(global)?;
        
        Ok(())
    }
    
    /// Remove paths from the context configuration.
    ///
    /// # Arguments
    /// * `paths` - List of paths to remove
    /// * `global` - If true, remove from global configuration; otherwise, remove from current profile configuration
    ///
    /// # Returns
    /// A Result indicating success or an error
    pub fn remove_paths(&mut self, paths: Vec<String>, global: bool) -> Result<()> {
        // Get reference to the appropriate config
        let config = if global {
            &mut self.global_config
        } else {
            &mut self.profile_config
        };
        
        // Track if any paths were removed
        let mut removed_any = false;
        
        // Remove each path if it exists
        for path in paths {
            let original_len = config.paths.len();
            config.paths.retain(|p| p != &path);
            
            if config.paths.len() < original_len {
                removed_any = true;
            }
        }
        
        if !removed_any {
            return Err(eyre!("None of the specified paths were found in the context"));
        }
        
        // Save the updated configuration
        self.save_config(global)?;
        
        Ok(())
    }
    
    /// Clear all paths from the context configuration.
    ///
    /// # Arguments
    /// * `global` - If true, clear global configuration; otherwise, clear current profile configuration
    ///
    /// # Returns
    /// A Result indicating success or an error
    pub fn clear(&mut self, global: bool) -> Result<()> {
        // Clear the appropriate config
        if global {
            self.global_config.paths.clear();
        } else {
            self.profile_config.paths.clear();
        }
        
        // Save the updated configuration
        self.save_config(global)?;
        
        Ok(())
    }
}
