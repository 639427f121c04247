use crate::config::Config;
use crate::console::{Console, Terminal};

mod config;
mod console;
mod error;
mod game;
mod menu;
mod session;
mod store;
mod time;

fn main() {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {:#}", err);
            return;
        }
    };

    let store = match store::open(&config) {
        Ok(store) => store,
        Err(err) => {
            log::error!("{:#}", err);
            return;
        }
    };

    Console::new(Terminal, store.as_ref(), &config).run();
    log::info!("Goodbye");
}
