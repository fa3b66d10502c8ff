use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use chrono::Utc;
use clap::Args;
use crossterm::execute;
use crossterm::style::{
    self,
};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::cli::chat::{
    ChatError,
    ChatSession,
    ChatState,
};
use crate::theme::StyledText;
use crate::util::directories::logs_dir;

/// Arguments for the logdump command that collects logs for support investigation
#[derive(Debug, PartialEq, Args)]
pub struct LogdumpArgs {
    /// Include MCP logs
    #[arg(long)]
    pub mcp: bool,
}

impl LogdumpArgs {
    pub async fn execute(self, session: &mut ChatSession) -> Result<ChatState, ChatError> {
        execute!(
            session.stderr,
            StyledText::brand_fg(),
            style::Print("Collecting logs...\n"),
            StyledText::reset(),
        )?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string();
        let zip_filename = format!("q-logs-{timestamp}.zip");
        let zip_path: PathBuf = PathBuf::from(&zip_filename);
        let logs_directory =
            logs_dir().map_err(|e| ChatError::Custom(format!("Failed to get logs directory: {e}").into()))?;

        match self.create_log_dump(&zip_path, logs_directory).await {
            Ok(log_count) => {
                execute!(
                    session.stderr,
                    StyledText::success_fg(),
                    style::Print(format!(
                        "✓ Successfully created {zip_filename} with {log_count} log files\n"
                    )),
                    StyledText::reset(),
                )?;
            },
            Err(e) => {
                execute!(
                    session.stderr,
                    StyledText::error_fg(),
                    style::Print(format!("✗ Failed to create log dump: {e}\n\n")),
                    StyledText::reset(),
                )?;
                return Err(ChatError::Custom(format!("Log dump failed: {e}").into()));
            },
        }

        Ok(ChatState::PromptUser {
            skip_printing_tools: true,
        })
    }

    async fn create_log_dump(&self, zip_path: &Path, logs_dir: PathBuf) -> Result<usize, Box<dyn std::error::Error>> {
        let file = std::fs::File::create(zip_path)?;
        let mut zip = ZipWriter::new(file);
        let mut log_count = 0;

        // Collect qchat.log
        log_count += Self::collect_qchat_log(&mut zip, &logs_dir)?;

        // Collect mcp.log if --mcp flag is set
        if self.mcp {
            log_count += Self::collect_mcp_log(&mut zip, &logs_dir)?;
        }

        zip.finish()?;
        Ok(log_count)
    }

    fn collect_qchat_log(
        zip: &mut ZipWriter<std::fs::File>,
        logs_dir: &Path,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let qchat_log_path = logs_dir.join("qchat.log");
        if qchat_log_path.exists() {
            return Self::add_log_file_to_zip(&qchat_log_path, zip, "logs");
        }
        Ok(0)
    }

    fn collect_mcp_log(
        zip: &mut ZipWriter<std::fs::File>,
        logs_dir: &Path,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let mcp_log_path = logs_dir.join("mcp.log");
        if mcp_log_path.exists() {
            return Self::add_log_file_to_zip(&mcp_log_path, zip, "logs");
        }
        Ok(0)
    }

    fn add_log_file_to_zip(
        path: &Path,
        zip: &mut ZipWriter<std::fs::File>,
        prefix: &str,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let content = std::fs::read(path)?;
        let filename = format!(
            "{}/{}",
            prefix,
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("unknown.log"))
                .to_string_lossy()
        );

        zip.start_file(filename, SimpleFileOptions::default())?;
        zip.write_all(&content)?;
        Ok(1)
    }
}
