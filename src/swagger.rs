use rocket_okapi::swagger_ui::SwaggerUIConfig;

/// Where `openapi_get_routes!` serves the generated document once mounted at `/api`.
pub const OPENAPI_URL: &str = "/api/openapi.json";

pub fn swagger_ui() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: OPENAPI_URL.to_string(),
        deep_linking: true,
        display_operation_id: true,
        ..Default::default()
    }
}
