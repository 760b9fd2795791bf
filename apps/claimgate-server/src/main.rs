use std::sync::Arc;

use chrono::Duration;
use tracing_subscriber::EnvFilter;

use claimgate_api::{workflow_router, WorkflowState};
use claimgate_workflow::{
    ApprovalWorkflowService, ComplianceMonitorService, DocumentApprovalService,
    InMemoryApprovalRequestStore, InMemoryComplianceCheckStore, InMemoryDocumentApprovalStore,
    InMemoryFcaEventStore, LogEventSink, SystemClock,
};

mod config;

use config::ServerConfig;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,claimgate_workflow=debug")),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    tracing::info!(
        listen_addr = %config.listen_addr,
        warning_window_days = config.warning_window_days,
        "starting claimgate server"
    );

    let clock = Arc::new(SystemClock);
    let sink = Arc::new(LogEventSink);

    let approvals = Arc::new(ApprovalWorkflowService::new(
        Arc::new(InMemoryApprovalRequestStore::new()),
        sink.clone(),
        clock.clone(),
    ));
    let documents = Arc::new(DocumentApprovalService::new(
        Arc::new(InMemoryDocumentApprovalStore::new()),
        sink,
        clock.clone(),
    ));
    let compliance = Arc::new(
        ComplianceMonitorService::new(
            Arc::new(InMemoryComplianceCheckStore::new()),
            Arc::new(InMemoryFcaEventStore::new()),
            clock,
        )
        .with_warning_window(Duration::days(config.warning_window_days)),
    );

    let app = workflow_router(WorkflowState::new(approvals, documents, compliance));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Bind error on {}: {e}", config.listen_addr);
            std::process::exit(1);
        });

    tracing::info!(listen_addr = %config.listen_addr, "claimgate HTTP server listening");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    });
}
