use bean_framework::tracing::setup_tracing;
use bean_recipe::config;
use bean_recipe::error::AppError;
use bean_recipe::lifecycle::{AppContext, SharedContainer};
use bean_recipe::model::UserService;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application with the sample service graph");

    let overrides = config::load_overrides()?;
    let mut context = AppContext::new(overrides)?;

    let span = tracing::info_span!("startup");
    let services = span.in_scope(|| context.start())?;

    {
        let settings = services.settings.read();
        info!(
            service = %settings.service_name,
            address = %settings.bind_address(),
            verbose = settings.verbose,
            sample_rate = settings.sample_rate,
            "Settings loaded"
        );
    }
    info!(database = %services.database.read().describe(), "Database configured");

    let greeting = services.users.read().register_user("alice");
    info!(%greeting, entries = services.audit.read().entries().len(), "User registered");

    // Hand the container to concurrent tasks; they all see the instances created above
    let shared = SharedContainer::new(context.into_container());
    let mut handles = Vec::new();
    for worker in 0..3 {
        let shared = shared.clone();
        let span = tracing::info_span!("worker", worker);
        handles.push(tokio::spawn(
            async move { shared.get::<UserService>("userService").await }.instrument(span),
        ));
    }

    for handle in handles {
        match handle.await {
            Ok(Ok(loaded)) => {
                let same = loaded.get().ptr_eq(&services.users);
                info!(complete = loaded.is_complete(), same, "Worker resolved userService");
            }
            Ok(Err(e)) => error!(error = %e, "Worker failed to resolve userService"),
            Err(e) => error!(error = %e, "Worker task panicked"),
        }
    }

    info!("Application completed successfully");
    Ok(())
}
