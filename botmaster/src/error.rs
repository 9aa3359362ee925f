use {crate::prelude::*, colored::ColoredString, thiserror::Error};

/// Grey line separating the error title from its details.
fn separator() -> ColoredString {
    "\n-=-=-=-=-=-=-=-".truecolor(100, 100, 100)
}

/// Fatal errors of the botmaster server. Takes care of displaying a pretty
/// summary in the console.
#[derive(Debug, Error)]
pub enum BotmasterError {
    #[error("{error}{separator}\n{0}", error = "Syntax Error".red().bold(), separator = separator())]
    Syntax(clap::error::Error),
    #[error("{error}{separator}\n{0}", error = "Config Error".red().bold(), separator = separator())]
    Conf(anyhow::Error),
    #[error("{error}{separator}\n{0}", error = "Template Error".red().bold(), separator = separator())]
    Render(#[from] minijinja::Error),
    #[error("{error}{separator}\n{0}", error = "Twitter Client Error".red().bold(), separator = separator())]
    Twitter(#[from] social_twitter::TwitterError),
    #[error("{error}{separator}\n{0}", error = "Server Error".red().bold(), separator = separator())]
    Bind(#[from] warp::Error),
}
