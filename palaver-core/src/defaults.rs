//! Default values shared by clients, routers and adapters.

use std::time::Duration;

/// How long a router waits for `send_message` before giving up.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Request timeout for upstream HTTP clients.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
