//! Command-line client for the chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-client -- register alice
//! cargo run --bin agora-client -- create-room general
//! cargo run --bin agora-client -- join general alice
//! cargo run --bin agora-client -- post general alice "hello, world"
//! cargo run --bin agora-client -- messages general
//! ```

use agora_client::{ChatClient, ClientError};
use agora_shared::logger::setup_logger;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "agora-client")]
#[command(about = "Command-line client for the multi-room chat server", long_about = None)]
struct Args {
    /// Chat server URL
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a user
    Register { username: String },
    /// List registered users
    Users,
    /// Create a room
    CreateRoom { room: String },
    /// Join a user to a room
    Join { room: String, username: String },
    /// List room names
    Rooms,
    /// List the members of a room
    Members { room: String },
    /// Post a message to a room
    Post {
        room: String,
        username: String,
        message: String,
    },
    /// Print the transcript of a room
    Messages { room: String },
    /// Check that the server is up
    Health,
}

async fn run(client: &ChatClient, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Register { username } => {
            client.register_user(&username).await?;
            println!("registered {}", username);
        }
        Command::Users => print_names(client.list_users().await?),
        Command::CreateRoom { room } => {
            client.create_room(&room).await?;
            println!("created room {}", room);
        }
        Command::Join { room, username } => {
            client.join_room(&room, &username).await?;
            println!("{} joined {}", username, room);
        }
        Command::Rooms => print_names(client.get_rooms().await?),
        Command::Members { room } => print_names(client.get_room_users(&room).await?),
        Command::Post {
            room,
            username,
            message,
        } => client.post_message(&room, &username, &message).await?,
        Command::Messages { room } => println!("{}", client.get_messages(&room).await?),
        Command::Health => {
            client.health().await?;
            println!("ok");
        }
    }
    Ok(())
}

fn print_names(names: Vec<String>) {
    for name in names {
        println!("{}", name);
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let client = ChatClient::new(args.url);

    if let Err(e) = run(&client, args.command).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
