use crate::domain::model::{
    string_or_number, AdminStats, EmployeeLookup, RegisterRequest, Registration,
};
use crate::domain::ports::{ConfigProvider, RegistrationApi};
use crate::utils::error::{RegistrationError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Fields the service may put in any JSON reply.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reply {
    already_registered: Option<bool>,
    #[serde(default, deserialize_with = "string_or_number")]
    rnd: Option<String>,
    emp_name: Option<String>,
    company_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    phone_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    participants: Option<String>,
    error: Option<String>,
}

impl Reply {
    fn is_already_registered(&self) -> bool {
        self.already_registered.unwrap_or(false)
    }
}

/// `RegistrationApi` over plain JSON/HTTP.
pub struct HttpRegistrationApi {
    base_url: Url,
    health_timeout: Duration,
    client: Client,
}

impl HttpRegistrationApi {
    pub fn new(
        base_url: &str,
        health_timeout: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // `Url::join` drops the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            health_timeout,
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.base_url(),
            config.health_timeout(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn read_reply(response: Response) -> Result<(StatusCode, Reply)> {
        let status = response.status();
        let text = response.text().await?;
        Ok((status, serde_json::from_str(&text)?))
    }

    /// Like `read_reply`, but an empty body is read as an empty reply.
    async fn read_optional_reply(response: Response) -> Result<(StatusCode, Reply)> {
        let status = response.status();
        let text = response.text().await?;
        let reply = if text.trim().is_empty() {
            Reply::default()
        } else {
            serde_json::from_str(&text)?
        };
        Ok((status, reply))
    }

    fn rejection(status: StatusCode, message: Option<String>) -> RegistrationError {
        tracing::warn!(
            "Server rejected request with {}: {}",
            status,
            message.as_deref().unwrap_or("<no message>")
        );
        RegistrationError::ServerError {
            status: status.as_u16(),
            message,
        }
    }
}

fn missing_field(field: &'static str) -> RegistrationError {
    <serde_json::Error as serde::de::Error>::missing_field(field).into()
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn health(&self) -> Result<()> {
        let url = self.endpoint("health")?;
        tracing::debug!("GET {} (timeout {:?})", url, self.health_timeout);

        // Dropping the send future on expiry aborts the request.
        let response = tokio::time::timeout(self.health_timeout, self.client.get(url).send())
            .await
            .map_err(|_| {
                tracing::warn!("Health probe timed out after {:?}", self.health_timeout);
                RegistrationError::TimeoutError {
                    after: self.health_timeout,
                }
            })??;

        tracing::debug!("Health probe status: {}", response.status());
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response.status(), None))
        }
    }

    async fn check_employee(&self, emp_id: &str) -> Result<EmployeeLookup> {
        let url = self.endpoint("check-employee")?;
        tracing::debug!("GET {} empId={}", url, emp_id);

        let response = self
            .client
            .get(url)
            .query(&[("empId", emp_id)])
            .send()
            .await?;
        let (status, reply) = Self::read_reply(response).await?;

        if reply.is_already_registered() {
            tracing::info!("Employee {} is already registered", emp_id);
            return Ok(EmployeeLookup::AlreadyRegistered {
                registration_number: reply.rnd.unwrap_or_default(),
                emp_name: reply.emp_name.unwrap_or_default(),
                company_name: reply.company_name.unwrap_or_default(),
                phone_number: reply.phone_number.unwrap_or_default(),
                participants: reply.participants.unwrap_or_default(),
            });
        }

        if !status.is_success() {
            return Err(Self::rejection(status, reply.error));
        }

        Ok(EmployeeLookup::Available {
            emp_name: reply.emp_name.unwrap_or_default(),
            company_name: reply.company_name.unwrap_or_default(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Registration> {
        let url = self.endpoint("register")?;
        tracing::debug!("POST {} empId={}", url, request.emp_id);

        let response = self.client.post(url).json(request).send().await?;
        let (status, reply) = Self::read_reply(response).await?;

        if reply.is_already_registered() {
            tracing::info!("Employee {} was already registered", request.emp_id);
            return Ok(Registration::AlreadyRegistered {
                registration_number: reply.rnd.unwrap_or_default(),
            });
        }

        if !status.is_success() {
            return Err(Self::rejection(status, reply.error));
        }

        let registration_number = reply.rnd.ok_or_else(|| missing_field("rnd"))?;
        tracing::info!(
            "Registered {} with number {}",
            request.emp_id,
            registration_number
        );
        Ok(Registration::Created {
            registration_number,
        })
    }

    async fn admin_login(&self, password: &str) -> Result<()> {
        let url = self.endpoint("admin-login")?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        let (status, reply) = Self::read_optional_reply(response).await?;

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::rejection(status, reply.error))
        }
    }

    async fn admin_stats(&self) -> Result<AdminStats> {
        let url = self.endpoint("admin-stats")?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body: serde_json::Value = response.json().await?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            return Err(Self::rejection(status, message));
        }

        let stats: AdminStats = serde_json::from_value(body)?;
        tracing::debug!(
            "Loaded stats for {} companies",
            stats.per_company.len()
        );
        Ok(stats)
    }
}
