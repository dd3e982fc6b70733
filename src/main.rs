pub mod api;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::auth;
pub use modules::email;

// Test helpers module - only compiled with feature flag
#[cfg(feature = "test-helpers")]
mod test_helpers;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::{
    BcryptHasher, JwtConfig, JwtTokenService, RedisVerificationTokenRepository, UserQueryPostgres,
    UserRepositoryPostgres,
};
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::incoming::password_policy::PasswordPolicy;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, VerificationTokenRepository,
};
use crate::auth::application::services::password::StrongPasswordPolicy;
use crate::auth::application::services::verification::{
    VerificationConfig, VerificationTokenService,
};
use crate::auth::application::use_cases::{
    create_user::{CreateUserUseCase, ICreateUserUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    verify_user::{IVerifyUserUseCase, VerifyUserUseCase},
};
use crate::email::adapter::outgoing::{MailConfig, SmtpEmailSender};
use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;
use crate::email::application::services::UserEmailService;
use crate::shared::config;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config, Runtime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_user_orchestrator: Arc<UserRegistrationOrchestrator>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub verify_user_use_case: Arc<dyn IVerifyUserUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let rust_env = config::string_or("RUST_ENV", "development");

    // SAFETY GUARD: Prevent test-helpers in production
    #[cfg(feature = "test-helpers")]
    {
        if rust_env == "production" {
            anyhow::bail!("test-helpers feature enabled in production environment");
        }
        tracing::warn!(environment = %rust_env, "Test helper routes are ENABLED");
    }

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let host = config::required("HOST")?;
    let port: u16 = config::parse_or("PORT", 8080)?;
    let db_url = config::required("DATABASE_URL")?;
    let redis_url = config::required("REDIS_URL")?;
    let run_migrations = config::bool_or("RUN_MIGRATIONS", true)?;

    let jwt_config = JwtConfig::from_env()?;
    let verification_config = VerificationConfig::from_env()?;
    let mail_config = MailConfig::from_env(&rust_env)?;

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    if run_migrations {
        Migrator::up(&conn, None)
            .await
            .context("Failed to run migrations")?;
        info!("Migrations applied");
    }

    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_pool = Config::from_url(&redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .context("Failed to create Redis pool")?;
    let redis_arc = Arc::new(redis_pool);

    let smtp_sender =
        SmtpEmailSender::from_config(&mail_config).context("Failed to build SMTP transport")?;

    // Outgoing adapters
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let token_repo: Arc<dyn VerificationTokenRepository> =
        Arc::new(RedisVerificationTokenRepository::new(Arc::clone(&redis_arc)));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::default());
    let password_policy: Arc<dyn PasswordPolicy> = Arc::new(StrongPasswordPolicy);
    let token_provider: Arc<dyn TokenProvider> = Arc::new(JwtTokenService::new(jwt_config));

    let verification_tokens =
        VerificationTokenService::new(Arc::clone(&token_repo), verification_config.clone());
    let email_notifier: Arc<dyn UserEmailNotifier + Send + Sync> = Arc::new(
        UserEmailService::new(Arc::new(smtp_sender), &verification_config.frontend_url),
    );

    // User Registration components
    let create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync> =
        Arc::new(CreateUserUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            Arc::clone(&password_hasher),
            password_policy,
            verification_tokens.clone(),
        ));
    let register_user_orchestrator =
        UserRegistrationOrchestrator::new(create_user_use_case, Arc::clone(&email_notifier));

    let login_user_use_case = LoginUserUseCase::new(
        user_query,
        password_hasher,
        token_provider,
        verification_tokens.clone(),
        email_notifier,
    );
    let verify_user_use_case = VerifyUserUseCase::new(user_repo, verification_tokens);

    let state = AppState {
        register_user_orchestrator: Arc::new(register_user_orchestrator),
        login_user_use_case: Arc::new(login_user_use_case),
        verify_user_use_case: Arc::new(verify_user_use_case),
    };

    let server_url = format!("{host}:{port}");
    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        #[allow(unused_mut)]
        let mut app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .app_data(web::Data::new(Arc::clone(&token_repo)))
            .app_data(crate::shared::api::custom_json_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );

        // Conditionally add test routes
        #[cfg(feature = "test-helpers")]
        {
            app = app.configure(test_helpers::configure_routes);
        }

        app
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_user_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
