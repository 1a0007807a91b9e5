use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::sync::Arc;

use nowplaying_notify::{
    feed, Notification, NotificationBackend, Notifier, Options, PlaybackState, ServerInformation, TrackInfo,
};

#[derive(Parser)]
#[command(name = "nowplaying-notify", version, about = "Now-playing desktop notifications")]
struct Cli {
    #[command(flatten)]
    options: OptionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct OptionArgs {
    /// Application name shown in notifications
    #[arg(long, global = true, default_value = "")]
    app_name: String,

    /// Icon name or path
    #[arg(long, global = true, default_value = nowplaying_notify::types::DEFAULT_ICON)]
    icon: String,

    /// Timeout in ms (-1 = daemon default, 0 = never expire)
    #[arg(long, global = true, default_value_t = nowplaying_notify::types::DEFAULT_TIMEOUT_MS, allow_negative_numbers = true)]
    timeout: i32,

    /// Also notify while paused
    #[arg(long, global = true)]
    notify_on_pause: bool,

    /// Stack notifications instead of replacing the previous one
    #[arg(long, global = true)]
    no_replace: bool,
}

impl From<OptionArgs> for Options {
    fn from(args: OptionArgs) -> Self {
        Options {
            app_name: args.app_name,
            icon: args.icon,
            timeout: args.timeout,
            notify_on_pause: args.notify_on_pause,
            replace_existing: !args.no_replace,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show a single notification
    Show {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        artist: String,
        #[arg(long, default_value = "")]
        album: String,
        #[arg(long, default_value = "")]
        station: String,
        #[arg(long)]
        paused: bool,
    },
    /// Print the daemon's name and capabilities
    Capabilities,
    /// Read JSON player updates from stdin, one per line
    Watch,
}

/// Stand-in used by `watch` when no notification daemon is reachable
struct Offline;

impl NotificationBackend for Offline {
    fn notify(&mut self, notification: &Notification, _replaces_id: u32) -> nowplaying_notify::Result<u32> {
        log::debug!("Notifications offline, dropping {:?}", notification.summary);
        Ok(0)
    }

    fn capabilities(&mut self) -> nowplaying_notify::Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn close_notification(&mut self, _id: u32) -> nowplaying_notify::Result<()> {
        Ok(())
    }

    fn server_information(&mut self) -> nowplaying_notify::Result<ServerInformation> {
        Ok(ServerInformation {
            name: "offline".to_string(),
            vendor: String::new(),
            version: String::new(),
            spec_version: String::new(),
        })
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options: Options = cli.options.into();

    match Notifier::new(options.clone()) {
        Ok(notifier) => run(notifier, cli.command),
        Err(e) if e.is_unavailable() && matches!(cli.command, Command::Watch) => {
            log::warn!("{:#}; watching without notifications", anyhow::Error::from(e));
            run(Notifier::with_backend(Offline, options), cli.command)
        }
        Err(e) => Err(e).context("Failed to set up desktop notifications"),
    }
}

fn run<B: NotificationBackend + Send + 'static>(notifier: Notifier<B>, command: Command) -> Result<()> {
    match command {
        Command::Show {
            title,
            artist,
            album,
            station,
            paused,
        } => {
            let track = TrackInfo {
                station,
                ..TrackInfo::new(title, artist, album)
            };
            let state = if paused {
                PlaybackState::Paused
            } else {
                PlaybackState::Playing
            };
            notifier
                .notify_now(Some(&track), state)
                .context("Failed to show notification")?;
        }
        Command::Capabilities => {
            let info = notifier.server_information().context("Failed to query server information")?;
            println!("{} {} ({}), spec {}", info.name, info.version, info.vendor, info.spec_version);
            for capability in notifier.capabilities().context("Failed to query capabilities")? {
                println!("  - {}", capability);
            }
        }
        Command::Watch => {
            let notifier = Arc::new(notifier);
            log::info!(
                "Watching stdin for player updates (notify on pause: {}, replace: {})",
                notifier.options().notify_on_pause,
                notifier.options().replace_existing
            );

            // Setup signal handler for Ctrl+C (SIGINT) and SIGTERM
            let notifier_for_signal = Arc::clone(&notifier);
            ctrlc::set_handler(move || {
                log::info!("Received interrupt signal, closing notification connection...");
                notifier_for_signal.close();
                std::process::exit(0);
            })
            .context("Failed to set Ctrl+C handler")?;

            feed::run(io::stdin().lock(), &notifier)?;
            notifier.close();
        }
    }

    Ok(())
}
