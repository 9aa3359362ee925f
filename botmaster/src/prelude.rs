pub(crate) use {
    crate::error::BotmasterError,
    anyhow::{anyhow, Result as AnyResult},
    colored::Colorize,
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};
