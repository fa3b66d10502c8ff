/// Name of the default agent.
pub const BUILTIN_VIBER_AGENT_NAME: &str = "cli_default";
pub const BUILTIN_PLANNER_AGENT_NAME: &str = "cli_planner";

pub const MAX_CONVERSATION_STATE_HISTORY_LEN: usize = 500;

pub const DUMMY_TOOL_NAME: &str = "dummy";
