use meadow_server_lib::api::server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    server::start().await;
}
