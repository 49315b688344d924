use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::controller::register,
        auth::controller::login,
        auth::controller::refresh,
        auth::controller::me,
    ),
    components(schemas(
        auth::model::RegisterRequest,
        auth::model::LoginRequest,
        auth::model::RefreshRequest,
        auth::model::AuthResponse,
        auth::model::MeResponse,
        auth::controller::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and session refresh")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
