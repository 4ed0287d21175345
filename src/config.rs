use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory containing one model subdirectory per produce type
    #[arg(long, env = "MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,

    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port to bind to
    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Always use mock predictions, never touch the model directory
    #[arg(long, env = "USE_MOCK")]
    pub use_mock: bool,

    /// Run inference on CPU even if an accelerator is available
    #[arg(long, env = "CPU_ONLY")]
    pub cpu_only: bool,
}

impl Config {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
