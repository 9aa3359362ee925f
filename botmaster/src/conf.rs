use {
    crate::{i18n::Language, prelude::*},
    social_twitter::TWITTER_API_BASE,
    std::{net::SocketAddr, time::Duration},
};

// Where to find config file.
pub const BOTMASTER_CONF_PATH: &str = "~/.botmaster/conf.toml";

/// Struct holding the config structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BotmasterConf {
    #[serde(default)]
    pub server: ServerConf,
    #[serde(default)]
    pub twitter: TwitterConf,
    #[serde(default)]
    pub ui: UiConf,
}

impl BotmasterConf {
    /// Loads the config at `path`. A missing file means defaults, a file that
    /// exists but does not parse is an error.
    pub async fn load_from_path(path: &Path) -> AnyResult<Self> {
        if !tokio::fs::try_exists(path).await? {
            log::info!("No config at {}, using defaults", path.display());

            return Ok(Self::default());
        }

        let conf = tokio::fs::read_to_string(path).await?;

        toml::from_str(&conf).map_err(|e| anyhow!("Invalid config {}: {}", path.display(), e))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerConf {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Largest accepted form submission, file upload included.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for ServerConf {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwitterConf {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl TwitterConf {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TwitterConf {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConf {
    #[serde(default)]
    pub default_language: Language,
}

// == Used by clap ==

/// Expands `~/` to the user's home directory in path arguments.
pub fn expand_tilde(path: &str) -> AnyResult<PathBuf> {
    if let Some(path) = path.strip_prefix("~/") {
        match home::home_dir() {
            Some(home) => return Ok(home.join(path)),
            None => return Err(anyhow!("Could not find home directory")),
        }
    }

    Ok(path.into())
}

// == Used by serde ==

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn default_max_upload_bytes() -> u64 {
    1024 * 1024
}

fn default_api_base() -> String {
    TWITTER_API_BASE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    #[tokio::test]
    async fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();

        let conf = BotmasterConf::load_from_path(&dir.path().join("conf.toml"))
            .await
            .unwrap();

        assert_eq!(conf, BotmasterConf::default());
        assert_eq!(conf.server.bind.port(), 8501);
        assert_eq!(conf.twitter.api_base, "https://api.twitter.com/2");
        assert_eq!(conf.ui.default_language, Language::En);
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.toml");

        tokio::fs::write(
            &path,
            "[server]\nbind = \"0.0.0.0:9000\"\n\n[ui]\ndefault_language = \"pt\"\n",
        )
        .await
        .unwrap();

        let conf = BotmasterConf::load_from_path(&path).await.unwrap();

        assert_eq!(conf.server.bind, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(conf.server.max_upload_bytes, 1024 * 1024);
        assert_eq!(conf.twitter, TwitterConf::default());
        assert_eq!(conf.ui.default_language, Language::Pt);
    }

    #[tokio::test]
    async fn test_written_conf_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("conf.toml");

        let mut conf = BotmasterConf::default();
        conf.twitter.api_base = "http://localhost:1234/2".to_string();
        conf.twitter.request_timeout_secs = 3;
        conf.ui.default_language = Language::Es;

        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, toml::to_string_pretty(&conf).unwrap())
            .await
            .unwrap();

        let loaded = BotmasterConf::load_from_path(&path).await.unwrap();

        assert_eq!(loaded, conf);
        assert_eq!(loaded.twitter.request_timeout(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.toml");

        tokio::fs::write(&path, "[ui]\ndefault_language = \"klingon\"\n")
            .await
            .unwrap();

        let result = BotmasterConf::load_from_path(&path).await;

        assert_matches!(result, Err(e) if e.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(
            expand_tilde("/etc/botmaster.toml").unwrap(),
            PathBuf::from("/etc/botmaster.toml")
        );

        if let Some(home) = home::home_dir() {
            assert_eq!(expand_tilde("~/conf.toml").unwrap(), home.join("conf.toml"));
        }
    }
}
