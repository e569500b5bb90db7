//! Application state and factory
//!
//! This module holds the shared application state and builds the
//! Actix-web application around it.

use std::sync::Arc;

use actix_web::{error::InternalError, web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use mt_core::repositories::UserRepository;
use mt_core::services::account::AccountService;
use mt_core::services::otp::{MailServiceTrait, OtpService};
use mt_shared::config::CorsConfig;
use mt_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::health::health_check;
use crate::middleware::cors::create_cors;
use crate::routes::{email, users};

/// Application state that holds shared services
pub struct AppState<U, M>
where
    U: UserRepository,
    M: MailServiceTrait,
{
    pub otp_service: Arc<OtpService<M>>,
    pub account_service: Arc<AccountService<U, M>>,
    /// Echo issued codes in responses (development only)
    pub expose_code_in_response: bool,
}

impl<U, M> AppState<U, M>
where
    U: UserRepository,
    M: MailServiceTrait,
{
    pub fn new(
        otp_service: Arc<OtpService<M>>,
        account_service: Arc<AccountService<U, M>>,
        expose_code_in_response: bool,
    ) -> Self {
        Self {
            otp_service,
            account_service,
            expose_code_in_response,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, M>(
    app_state: web::Data<AppState<U, M>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    M: MailServiceTrait + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
            InternalError::from_response(err, response).into()
        });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Order matters: the last wrap runs first
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/email")
                        .route("/send-otp", web::post().to(email::send_otp::<U, M>))
                        .route("/verify-otp", web::post().to(email::verify_otp::<U, M>)),
                )
                .service(
                    web::scope("/users")
                        .route(
                            "/request-verification",
                            web::post().to(users::request_verification::<U, M>),
                        )
                        .route("/verify-email", web::post().to(users::verify_email::<U, M>))
                        .route("/forgot-password", web::post().to(users::forgot_password::<U, M>))
                        .route("/reset-password", web::post().to(users::reset_password::<U, M>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
