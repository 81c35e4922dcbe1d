use std::path::PathBuf;

/// Client configuration loaded from environment variables.
///
/// | Env var              | Default                         |
/// |----------------------|---------------------------------|
/// | `BABYLIST_API_URL`   | `http://localhost:3000`         |
/// | `BABYLIST_STATE_DIR` | `$HOME/.babylist`, else `.`     |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub state_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("BABYLIST_API_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        let state_dir = std::env::var_os("BABYLIST_STATE_DIR")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".babylist")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self { api_url, state_dir }
    }
}
