use std::env;
use tracing::warn;

/// Which cancellation workflow the deployment exposes. Exactly one of the
/// two is routed; the other is absent from the router entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationWorkflow {
    /// Patient cancels immediately (`DELETE /appointments/cancel/{id}`).
    Direct,
    /// Patient requests, doctor approves (two-step).
    RequestApprove,
}

impl CancellationWorkflow {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "direct" => Some(Self::Direct),
            "request_approve" | "request-approve" => Some(Self::RequestApprove),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub cancellation_workflow: CancellationWorkflow,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            cancellation_workflow: env::var("CANCELLATION_WORKFLOW")
                .ok()
                .and_then(|v| {
                    let parsed = CancellationWorkflow::from_env_value(&v);
                    if parsed.is_none() {
                        warn!("CANCELLATION_WORKFLOW has unknown value {:?}, using direct", v);
                    }
                    parsed
                })
                .unwrap_or(CancellationWorkflow::Direct),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }
}
