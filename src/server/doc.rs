use utoipa::OpenApi;

/// OpenAPI document root. Paths are registered by the router.
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "auth", description = "Customer registration, login and password reset"),
        (name = "admin", description = "Admin accounts"),
        (name = "vehicle", description = "Fleet inventory"),
        (name = "pending-vehicle", description = "Vehicle changes awaiting super-admin approval"),
        (name = "maintenance", description = "Maintenance records and staged maintenance"),
        (name = "reservation", description = "Bookings"),
        (name = "email", description = "Email verification codes"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Ronaldo's Rentals API",
        version = "0.1.0",
        description = "Vehicle rental backend"
    )
)]
pub struct ApiDoc;
