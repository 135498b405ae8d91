use std::{net::SocketAddr, time::Duration};

use clap::Parser;

use crate::llm::huggingface::HuggingFaceClient;

#[derive(Debug, Clone, Parser)]
#[command(name = "sumup-api", about = "Video transcript summarization service")]
pub struct Config {
    /// Hugging Face inference api key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Address to bind the http server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: std::net::IpAddr,

    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Base url of the inference api
    #[arg(long, env = "INFERENCE_BASE_URL", default_value = HuggingFaceClient::DEFAULT_BASE_URL)]
    pub inference_base_url: String,

    /// Timeout applied to every outbound http call
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "60")]
    pub request_timeout_secs: u64,

    /// Retries for transient inference failures (model loading, rate limits)
    #[arg(long, env = "MAX_RETRIES", default_value = "2")]
    pub max_retries: u32,

    /// Preferred caption language
    #[arg(long, env = "TRANSCRIPT_LANG", default_value = "en")]
    pub transcript_lang: String,

    /// Run grammar correction when a request does not set `check_grammar`
    #[arg(long, env = "DEFAULT_CHECK_GRAMMAR", default_value = "false", action = clap::ArgAction::Set)]
    pub default_check_grammar: bool,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
