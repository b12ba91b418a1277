//! desk-server: the channel desk web UI.
//!
//! Usage:
//!   desk-server
//!
//! Settings come from an optional `channel-desk.json` in the working
//! directory; logging is controlled with `RUST_LOG`.

mod app;
mod html;

use anyhow::Result;
use channel_desk_core::{
    config::{DeskConfig, CONFIG_FILE},
    desk::Desk,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = DeskConfig::load(CONFIG_FILE)?;
    println!("{}", config.title);
    println!("  data_dir:  {}", config.data_dir.display());
    println!("  bind_addr: {}", config.bind_addr);
    println!();

    let bind_addr = config.bind_addr.clone();
    let desk = Desk::build(config)?;
    let router = app::router(app::AppState::new(desk));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("listening on http://{bind_addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
