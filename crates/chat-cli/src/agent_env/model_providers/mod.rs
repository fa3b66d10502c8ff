mod model_provider;
pub mod bedrock_converse_stream;
pub mod codewhisperer;

pub use model_provider::*;
pub use bedrock_converse_stream::BedrockConverseStreamModelProvider;
pub use codewhisperer::CodeWhispererModelProvider;
