use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Readiness {
    status: &'static str,
    checks: ReadinessChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    database: &'static str,
    database_ms: u64,
}

/// Liveness probe; answers without touching any dependency.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: "menteabierta-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe; a failed database round-trip takes the instance out of
/// rotation until the pool recovers.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let started = Instant::now();
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if !db_ok {
        tracing::warn!(elapsed_ms, "Readiness probe failed to reach the database");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Readiness {
                status: "not_ready",
                checks: ReadinessChecks {
                    database: "unreachable",
                    database_ms: elapsed_ms,
                },
            }),
        );
    }

    (
        StatusCode::OK,
        Json(Readiness {
            status: "ready",
            checks: ReadinessChecks {
                database: "ok",
                database_ms: elapsed_ms,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_body_reports_the_service_and_version() {
        let body = HealthStatus {
            status: "ok",
            service: "menteabierta-api",
            version: env!("CARGO_PKG_VERSION"),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "menteabierta-api");
        assert!(json["version"].as_str().is_some());
    }

    #[test]
    fn readiness_body_nests_the_database_check() {
        let body = Readiness {
            status: "ready",
            checks: ReadinessChecks {
                database: "ok",
                database_ms: 4,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["checks"]["database"], "ok");
        assert_eq!(json["checks"]["database_ms"], 4);
    }
}
