use crate::{
    auth::{
        auth_dto::{AuthResponse, GoogleLoginRequest, LoginRequest, RegisterRequest},
        auth_handlers,
    },
    middleware::{admin_middleware, auth_middleware},
    state::AppState,
    tournament::{
        tournament_dto::{CreateTournamentRequest, TournamentDetail, UpdateTournamentRequest},
        tournament_handlers,
        tournament_models::{Game, Participant, Tournament, TournamentStatus},
    },
    user::user_models::{ProfileResponse, ProfileUser, UserResponse},
};
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::auth_handlers::register,
        crate::auth::auth_handlers::login,
        crate::auth::auth_handlers::google_login,
        crate::auth::auth_handlers::refresh_token,
        crate::auth::auth_handlers::logout,
        crate::auth::auth_handlers::profile,
        crate::tournament::tournament_handlers::get_tournaments,
        crate::tournament::tournament_handlers::get_tournament,
        crate::tournament::tournament_handlers::create_tournament,
        crate::tournament::tournament_handlers::update_tournament,
        crate::tournament::tournament_handlers::delete_tournament,
        crate::tournament::tournament_handlers::register_for_tournament,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            GoogleLoginRequest,
            AuthResponse,
            UserResponse,
            ProfileResponse,
            ProfileUser,
            CreateTournamentRequest,
            UpdateTournamentRequest,
            TournamentDetail,
            Tournament,
            Game,
            TournamentStatus,
            Participant,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "tournaments", description = "Tournament listing and registration endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "message": "Server is running" }))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([state
            .config
            .client_origin
            .parse()
            .expect("CLIENT_URL must be a valid origin")]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/google", post(auth_handlers::google_login))
        .route("/google-verify", post(auth_handlers::google_login))
        .route("/refresh", post(auth_handlers::refresh_token))
        .route("/logout", post(auth_handlers::logout));

    // Profile requires a bearer token; /profile and /me serve the same data.
    let profile_routes = Router::new()
        .route("/profile", get(auth_handlers::profile))
        .route("/me", get(auth_handlers::profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let tournament_public_routes = Router::new()
        .route("/", get(tournament_handlers::get_tournaments))
        .route("/:id", get(tournament_handlers::get_tournament));

    let tournament_registration_routes = Router::new()
        .route(
            "/:id/register",
            post(tournament_handlers::register_for_tournament),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Admin routes
    let tournament_admin_routes = Router::new()
        .route("/", post(tournament_handlers::create_tournament))
        .route(
            "/:id",
            put(tournament_handlers::update_tournament)
                .delete(tournament_handlers::delete_tournament),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let tournament_routes = tournament_public_routes
        .merge(tournament_registration_routes)
        .merge(tournament_admin_routes);

    let api_routes = Router::new()
        .nest("/auth", auth_routes.merge(profile_routes))
        .nest("/tournaments", tournament_routes)
        .route("/health", get(health));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
