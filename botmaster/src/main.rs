use {
    botmaster::{conf::expand_tilde, BotmasterConf, BotmasterError},
    clap::{builder::ValueParser, Parser},
    colored::Colorize,
    std::{net::SocketAddr, path::PathBuf},
};

#[derive(Parser)]
#[command(version, about = "Publish tweets from many Twitter accounts through a web form")]
struct Cli {
    #[arg(
        long = "conf-path",
        short = 'c',
        help = "Path to the botmaster config file",
        default_value = botmaster::conf::BOTMASTER_CONF_PATH,
        value_parser = ValueParser::from(expand_tilde)
    )]
    conf_path: PathBuf,
    #[arg(long = "bind", short = 'b', help = "Address to serve the form on, overrides the config")]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Customize parsing error handling.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // These 2 are "not real errors" that are used to stop the execution
            // to display the CLI help or version.
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    println!("{}", e);

                    std::process::exit(0);
                }
                _ => (),
            }

            eprintln!(
                "{ballot} {error}",
                ballot = "✘".red().bold(),
                error = BotmasterError::Syntax(e)
            );

            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli).await {
        eprintln!("{ballot} {e}", ballot = "✘".red().bold());

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), BotmasterError> {
    let mut conf = BotmasterConf::load_from_path(&cli.conf_path)
        .await
        .map_err(BotmasterError::Conf)?;

    if let Some(bind) = cli.bind {
        conf.server.bind = bind;
    }

    botmaster::serve(conf).await
}
