use carriot_link::{ApiClient, CommandId, MovementRequest, SOCKET_PATH, Speed};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "carriot-link", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Submit a single movement to the vehicle API.
    Send {
        /// Movement identifier (e.g. "adelante", "90-derecha", "detener")
        action: String,

        /// Speed: rapido, normal, lento, reversa (or 1-4)
        #[arg(short = 's', long, default_value = "normal")]
        speed: Speed,

        /// Base URL of the vehicle API
        #[arg(long, env = "CARRIOT_API", default_value = "http://127.0.0.1:5555")]
        server: String,
    },
    /// Print the recorded movements, obstacles and demos.
    Monitor {
        /// Vehicle whose history is read
        #[arg(short = 'd', long, default_value_t = 1)]
        device: u32,

        /// Base URL of the vehicle API
        #[arg(long, env = "CARRIOT_API", default_value = "http://127.0.0.1:5555")]
        server: String,
    },
    /// Show the dashboard window.
    Show,
    /// Hide the dashboard window
    Hide,
    /// Ask the running dashboard to submit its stop command.
    Stop,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            action,
            speed,
            server,
        } => send(action, speed, server).await,
        Commands::Monitor { device, server } => monitor(device, server).await,
        Commands::Show => send_command("show"),
        Commands::Hide => send_command("hide"),
        Commands::Stop => send_command("stop"),
    }
}

async fn send(action: String, speed: Speed, server: String) -> anyhow::Result<()> {
    if action.trim().is_empty() {
        anyhow::bail!("Movement identifier must not be empty.");
    }

    let client = ApiClient::new(server);
    let record = client
        .submit(MovementRequest::new(CommandId::new(action), speed))
        .await?;
    println!("{record}");
    Ok(())
}

async fn monitor(device: u32, server: String) -> anyhow::Result<()> {
    let client = ApiClient::new(server);
    let (movements, obstacles, demos) = tokio::try_join!(
        client.recent_movements(device),
        client.recent_obstacles(device),
        client.recent_demos(),
    )?;

    println!("Movements (vehicle {device}):");
    print_list(&movements);
    println!("Obstacles (vehicle {device}):");
    print_list(&obstacles);
    println!("Demos:");
    print_list(&demos);
    Ok(())
}

fn print_list<T: std::fmt::Display>(items: &[T]) {
    if items.is_empty() {
        println!("  (none)");
    }
    for item in items {
        println!("  {item}");
    }
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to carriot dashboard at {}: {}. Is carriot running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
