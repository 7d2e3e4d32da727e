mod app;
mod args;
mod constants;
mod episode;
mod logger;
mod prompt;
mod utils;

use app::App;

#[tokio::main]
async fn main() {
    App::new().run().await;
}
