//! Multi-room chat server.
//!
//! Keeps users, rooms, memberships and messages in memory and serves them over
//! a plaintext HTTP API.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-server
//! cargo run --bin agora-server -- --host 0.0.0.0 --port 3000 --post-policy members-only
//! ```

use std::sync::Arc;

use agora_server::{
    infrastructure::repository::{InMemoryRoomRepository, InMemoryUserRepository},
    ui::Server,
    usecase::{ChatService, PostPolicy},
};
use agora_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agora-server")]
#[command(about = "In-memory multi-room chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Which authors may post to a room
    #[arg(long, value_enum, default_value_t = PostPolicy::Open)]
    post_policy: PostPolicy,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. ChatService
    // 3. Server

    // 1. Create Repositories (in-memory database)
    let users = Arc::new(InMemoryUserRepository::new());
    let rooms = Arc::new(InMemoryRoomRepository::new());

    // 2. Create ChatService
    let chat_service = Arc::new(
        ChatService::new(users, rooms, Arc::new(SystemClock)).with_post_policy(args.post_policy),
    );

    // 3. Create and run the server
    let server = Server::new(chat_service);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
