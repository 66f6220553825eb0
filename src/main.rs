use bookshop::{configuration::Settings, startup::Application};
use dotenv::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    // Panics if the configuration can't be read
    let settings = Settings::from_env().expect("Failed to read configuration.");

    let application = match Application::build(settings) {
        Ok(application) => application,
        Err(error) => panic!("Failed to build application: {:?}", error),
    };

    application.run_until_stopped().await
}
