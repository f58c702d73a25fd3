use std::process;

use dataset::{Dataset, DatasetPaths};
use web::{bind_address_from_env, start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // dataset
    let paths = DatasetPaths::from_env();
    let dataset = match Dataset::load(&paths) {
        Ok(dataset) => dataset,
        Err(why) => {
            log::error!("could not load the dataset: {}", why);
            process::exit(1);
        }
    };

    // web server
    let bind_address = bind_address_from_env();
    if let Err(why) = start_web_server(WebState::new(dataset), &bind_address).await {
        log::error!("web server on {} stopped: {}", bind_address, why);
        process::exit(1);
    }
}
