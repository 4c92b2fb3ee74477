// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CatalogRepository, DashboardRepository, InventoryRepository, RbacRepository,
        SalesRepository, UserRepository,
    },
    gateway::GatewayClient,
    services::{
        AuthService, CatalogService, CheckoutService, InventoryService, RbacService, UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub auth_service: AuthService,
    pub user_service: UserService,
    pub rbac_service: RbacService,
    pub catalog_service: CatalogService,
    pub inventory_service: InventoryService,
    pub checkout_service: CheckoutService,

    // Repositórios de leitura usados direto pelos handlers
    pub sales_repo: SalesRepository,
    pub dashboard_repo: DashboardRepository,
}

impl AppState {
    // Carrega as configurações e monta o estado da aplicação
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Gateway de pagamento (a URL é trocável para apontar num mock)
        let gateway_url = env::var("GATEWAY_API_URL").expect("GATEWAY_API_URL deve ser definida");
        let gateway_key = env::var("GATEWAY_API_KEY").expect("GATEWAY_API_KEY deve ser definida");
        let success_url = env::var("CHECKOUT_SUCCESS_URL")
            .unwrap_or_else(|_| "http://localhost:5173/checkout/success".to_string());
        let cancel_url = env::var("CHECKOUT_CANCEL_URL")
            .unwrap_or_else(|_| "http://localhost:5173/checkout/cancel".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let rbac_repo = RbacRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let gateway = GatewayClient::new(gateway_url, gateway_key);

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let user_service =
            UserService::new(user_repo.clone(), rbac_repo.clone(), db_pool.clone());
        let rbac_service = RbacService::new(rbac_repo.clone(), db_pool.clone());
        let catalog_service = CatalogService::new(
            catalog_repo.clone(),
            inventory_repo.clone(),
            db_pool.clone(),
        );
        let inventory_service = InventoryService::new(inventory_repo.clone(), db_pool.clone());
        let checkout_service = CheckoutService::new(
            sales_repo.clone(),
            inventory_repo.clone(),
            gateway,
            success_url,
            cancel_url,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            user_service,
            rbac_service,
            catalog_service,
            inventory_service,
            checkout_service,
            sales_repo,
            dashboard_repo,
        })
    }
}
