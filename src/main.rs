// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use backoffice::config::AppState;
use backoffice::middleware::auth::auth_guard;
use backoffice::{docs, handlers};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações versionadas na inicialização (o histórico fica
    // na tabela de controle do próprio SQLx)
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_public = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de sessão (protegidas): identidade e menu de módulos do próprio ator
    let auth_session = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/permissions", get(handlers::rbac::my_modules))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Checkout (direto e via gateway) + relatório de vendas
    let sales_routes = Router::new()
        .route("/checkout", post(handlers::sales::checkout))
        .route(
            "/create-checkout-session",
            post(handlers::sales::create_checkout_session),
        )
        .route("/verify-payment", post(handlers::sales::verify_payment))
        .route("/", get(handlers::sales::list_sales))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let order_routes = Router::new()
        .route("/", get(handlers::sales::list_orders))
        .route("/{id}", get(handlers::sales::get_order))
        .route("/{id}/status", patch(handlers::sales::update_order_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::catalog::create_product).get(handlers::catalog::list_products),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_product)
                .patch(handlers::catalog::update_product)
                .delete(handlers::catalog::delete_product),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inventory_routes = Router::new()
        .route("/", get(handlers::inventory::list_levels))
        .route("/low-stock", get(handlers::inventory::list_low_stock))
        .route("/adjust", post(handlers::inventory::adjust_stock))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Gestão de usuários (aprovação de contas, troca de cargo)
    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route("/{id}/status", patch(handlers::users::update_user_status))
        .route("/{id}/role", patch(handlers::users::update_user_role))
        .route("/{id}", delete(handlers::users::delete_user))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let role_routes = Router::new()
        .route(
            "/",
            post(handlers::rbac::create_role).get(handlers::rbac::list_roles),
        )
        .route(
            "/{id}",
            put(handlers::rbac::update_role).delete(handlers::rbac::delete_role),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let module_routes = Router::new()
        .route("/", get(handlers::rbac::list_modules))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .nest("/auth", auth_public.merge(auth_session))
        .nest("/sales", sales_routes)
        .nest("/orders", order_routes)
        .nest("/products", product_routes)
        .nest("/inventory", inventory_routes)
        .nest("/users", user_routes)
        .nest("/roles", role_routes)
        .nest("/modules", module_routes)
        .nest("/dashboard", dashboard_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
