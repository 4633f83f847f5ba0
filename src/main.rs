use anyhow::Context;
use shelf_app::shell::Shell;
use shelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        books = %settings.services.books,
        orders = %settings.services.orders,
        notifications = %settings.services.notifications,
        "storefront shell starting"
    );

    let clients = shelf_api::Clients::from_settings(&settings.services);
    let shell = Shell::new(&clients);
    shell.run().await
}
